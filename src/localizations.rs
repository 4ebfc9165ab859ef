use std::collections::HashMap;

#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

const FALLBACK: &str = "en-US";

pub struct Localizations {
    translations: HashMap<&'static str, Translations>,
    current_lang: String,
}

impl Localizations {
    /// `preferred` wins over `LANG`; unknown languages fall back to English.
    pub fn new(preferred: Option<&str>) -> Self {
        let mut translations = HashMap::new();

        let mut en = Translations::new();
        en.insert("app-title", "Video Downloader");
        en.insert("url-label", "Video URL:");
        en.insert("url-placeholder", "Paste a video link (YouTube, TikTok, Instagram...)");
        en.insert("get-info-button", "Get info");
        en.insert("fetching-button", "Fetching...");
        en.insert("loading-info", "Fetching video information...");
        en.insert("enter-url", "Enter a video URL first!");
        en.insert("invalid-url", "Invalid URL! Make sure it starts with http:// or https://");
        en.insert("info-loaded", "Video information loaded!");
        en.insert("retrying", "Could not get info, retrying");
        en.insert("uploader", "Uploader");
        en.insert("platform", "Platform");
        en.insert("views", "Views");
        en.insert("duration", "Duration");
        en.insert("formats", "Choose a format");
        en.insert("recommended", "RECOMMENDED");
        en.insert("size", "Size");
        en.insert("download-button", "Download");
        en.insert("processing", "Processing...");
        en.insert("starting-download", "Starting download...");
        en.insert("redirecting", "Redirecting to download page...");
        en.insert("error-title", "Could not load video");
        en.insert("suggestions", "Suggestions:");
        en.insert("hint-protected", "This video may be protected or not downloadable");
        en.insert("hint-lower-quality", "Try a lower quality");
        en.insert("hint-copy-again", "Copy the URL from the browser again");
        en.insert("hint-expired", "The video URL may have expired or been removed");
        en.insert("hint-paste-again", "Refresh and paste the URL again");
        en.insert("hint-slow", "The connection is too slow");
        en.insert("hint-check-connection", "Check your internet connection");
        en.insert("hint-other-format", "Try a different format or quality");
        en.insert("hint-valid-url", "Make sure the video URL is valid and still online");
        en.insert("hint-retry", "Try again");
        en.insert("downloading-title", "Preparing download");
        en.insert("back-button", "Back");
        translations.insert("en-US", en);

        let mut id = Translations::new();
        id.insert("app-title", "Pengunduh Video");
        id.insert("url-label", "URL Video:");
        id.insert("url-placeholder", "Tempel link video (YouTube, TikTok, Instagram...)");
        id.insert("get-info-button", "Ambil info");
        id.insert("fetching-button", "Memproses...");
        id.insert("loading-info", "Mengambil informasi video...");
        id.insert("enter-url", "Masukkan URL video terlebih dahulu!");
        id.insert(
            "invalid-url",
            "URL tidak valid! Pastikan URL dimulai dengan http:// atau https://",
        );
        id.insert("info-loaded", "Informasi video berhasil dimuat!");
        id.insert("retrying", "Gagal mengambil info, mencoba lagi");
        id.insert("formats", "Pilih format");
        id.insert("download-button", "Download");
        id.insert("processing", "Memproses...");
        id.insert("starting-download", "Memulai download...");
        id.insert("redirecting", "Redirecting ke halaman download...");
        id.insert("suggestions", "Saran:");
        id.insert("hint-protected", "Video ini mungkin dilindungi atau tidak bisa didownload");
        id.insert("hint-lower-quality", "Coba gunakan kualitas yang lebih rendah");
        id.insert("hint-copy-again", "Coba copy URL lagi dari browser");
        id.insert("hint-expired", "URL video mungkin sudah expired atau dihapus");
        id.insert("hint-paste-again", "Coba refresh halaman dan paste URL lagi");
        id.insert("hint-slow", "Koneksi terlalu lambat");
        id.insert("hint-check-connection", "Periksa koneksi internet Anda");
        id.insert("hint-other-format", "Coba gunakan format atau kualitas yang berbeda");
        id.insert("hint-valid-url", "Pastikan URL video valid dan masih aktif");
        id.insert("hint-retry", "Refresh halaman dan coba lagi");
        id.insert("back-button", "Kembali");
        translations.insert("id-ID", id);

        let system = std::env::var("LANG").ok();
        let mut localizer = Self {
            translations,
            current_lang: FALLBACK.to_string(),
        };
        if let Some(lang) = preferred.or(system.as_deref()) {
            localizer.select(lang);
        }
        localizer
    }

    /// Looks `key` up in the current language, then English, then returns
    /// the key itself.
    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(self.current_lang.as_str())
            .and_then(|t| t.lookup(key))
            .or_else(|| self.translations.get(FALLBACK).and_then(|t| t.lookup(key)))
            .unwrap_or(key)
            .to_string()
    }

    pub fn select(&mut self, lang: &str) {
        // "id_ID.UTF-8" and "id-ID" both select Indonesian.
        let lang_part = lang
            .split(['-', '_', '.'])
            .next()
            .unwrap_or(lang)
            .to_lowercase();
        self.current_lang = self
            .translations
            .keys()
            .find(|key| key.split('-').next() == Some(lang_part.as_str()))
            .copied()
            .unwrap_or(FALLBACK)
            .to_string();
    }
}
