use crate::models::{FormatOption, VideoInfo};

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Best,
    Hd,
    Sd,
    Low,
    Audio,
}

impl QualityTier {
    /// First match wins, so "best 720p" is `Best`.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("best") {
            Self::Best
        } else if label.contains("720") {
            Self::Hd
        } else if label.contains("480") {
            Self::Sd
        } else if label.contains("360") {
            Self::Low
        } else if label.contains("audio") || label.contains("mp3") {
            Self::Audio
        } else {
            Self::Low
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Best => "👑",
            Self::Hd => "🎬",
            Self::Sd => "📺",
            Self::Low => "📱",
            Self::Audio => "🎵",
        }
    }

    pub fn is_recommended(self) -> bool {
        matches!(self, Self::Best)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFormat<'a> {
    pub option: &'a FormatOption,
    pub tier: QualityTier,
    pub icon: &'static str,
    pub is_recommended: bool,
}

pub fn classify(formats: &[FormatOption]) -> Vec<ClassifiedFormat<'_>> {
    formats
        .iter()
        .map(|option| {
            let tier = QualityTier::from_label(&option.quality_label);
            ClassifiedFormat {
                option,
                tier,
                icon: tier.icon(),
                is_recommended: tier.is_recommended(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }
}

/// What the user did on a format card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Select(usize),
    Download(usize),
}

/// Applies a card action to the selection. Returns the option to hand off
/// when the action was a download click; download clicks leave the
/// selection untouched.
pub fn apply_action<'a>(
    info: &'a VideoInfo,
    selection: &mut SelectionState,
    action: FormatAction,
) -> Option<&'a FormatOption> {
    match action {
        FormatAction::Select(index) => {
            if index < info.formats.len() {
                selection.select(index);
            }
            None
        }
        FormatAction::Download(index) => info.formats.get(index),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatCard<'a> {
    pub format: ClassifiedFormat<'a>,
    pub selected: bool,
    pub size_label: String,
}

pub fn present<'a>(info: &'a VideoInfo, selection: &SelectionState) -> Vec<FormatCard<'a>> {
    classify(&info.formats)
        .into_iter()
        .enumerate()
        .map(|(index, format)| FormatCard {
            size_label: size_label(format.option.filesize_bytes),
            selected: selection.is_selected(index),
            format,
        })
        .collect()
}

/// Card size text. Unknown or zero sizes are decided by the backend at
/// download time.
pub fn size_label(filesize: Option<u64>) -> String {
    match filesize {
        Some(bytes) if bytes > 0 => format_file_size(bytes),
        _ => "Auto".to_string(),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    let value = bytes as f64;
    match bytes {
        0 => "Unknown".to_string(),
        b if b >= GB => format!("{:.2} GB", value / GB as f64),
        b if b >= MB => format!("{:.2} MB", value / MB as f64),
        b if b >= KB => format!("{:.2} KB", value / KB as f64),
        b => format!("{b} B"),
    }
}

pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, filesize: Option<u64>) -> FormatOption {
        FormatOption {
            quality_label: label.to_string(),
            format_id: format!("id-{label}"),
            filesize_bytes: filesize,
            ext: None,
            description: None,
        }
    }

    fn info(labels: &[&str]) -> VideoInfo {
        VideoInfo {
            title: "Clip".into(),
            uploader: "someone".into(),
            platform: "youtube".into(),
            thumbnail: String::new(),
            formats: labels.iter().map(|l| option(l, None)).collect(),
            duration: None,
            view_count: None,
        }
    }

    #[test]
    fn tiers_follow_label_precedence() {
        let cases = [
            ("1080p best", QualityTier::Best),
            ("Best Quality", QualityTier::Best),
            ("720p", QualityTier::Hd),
            ("HD 720p", QualityTier::Hd),
            ("SD 480p", QualityTier::Sd),
            ("Low 360p", QualityTier::Low),
            ("audio only", QualityTier::Audio),
            ("Audio Only (MP3)", QualityTier::Audio),
            ("MP3 320k", QualityTier::Audio),
            ("240p", QualityTier::Low),
            ("BEST 720p audio", QualityTier::Best),
            ("720p with audio", QualityTier::Hd),
        ];
        for (label, tier) in cases {
            assert_eq!(QualityTier::from_label(label), tier, "{label}");
        }
    }

    #[test]
    fn only_best_is_recommended() {
        let formats = vec![option("1080p best", None), option("720p", None), option("240p", None)];
        let classified = classify(&formats);
        assert!(classified[0].is_recommended);
        assert_eq!(classified[0].icon, "👑");
        assert!(!classified[1].is_recommended);
        assert_eq!(classified[1].icon, "🎬");
        assert_eq!(classified[2].tier, QualityTier::Low);
        assert_eq!(classified[2].icon, "📱");
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let info = info(&["Best", "720p", "480p"]);
        let mut selection = SelectionState::default();

        apply_action(&info, &mut selection, FormatAction::Select(0));
        apply_action(&info, &mut selection, FormatAction::Select(1));

        let cards = present(&info, &selection);
        let selected: Vec<_> = cards.iter().map(|c| c.selected).collect();
        assert_eq!(selected, vec![false, true, false]);
    }

    #[test]
    fn download_click_keeps_selection() {
        let info = info(&["Best", "720p"]);
        let mut selection = SelectionState::default();
        apply_action(&info, &mut selection, FormatAction::Select(0));

        let chosen = apply_action(&info, &mut selection, FormatAction::Download(1));

        assert_eq!(chosen.map(|o| o.quality_label.as_str()), Some("720p"));
        assert_eq!(selection.selected(), Some(0));
    }

    #[test]
    fn out_of_range_actions_are_ignored() {
        let info = info(&["Best"]);
        let mut selection = SelectionState::default();
        assert!(apply_action(&info, &mut selection, FormatAction::Select(5)).is_none());
        assert!(apply_action(&info, &mut selection, FormatAction::Download(5)).is_none());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(1_073_741_824), "1.00 GB");
        assert_eq!(format_file_size(1500), "1.46 KB");
        assert_eq!(format_file_size(5 * MB + MB / 2), "5.50 MB");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(0), "Unknown");
    }

    #[test]
    fn card_size_label_defaults_to_auto() {
        assert_eq!(size_label(None), "Auto");
        assert_eq!(size_label(Some(0)), "Auto");
        assert_eq!(size_label(Some(2048)), "2.00 KB");
    }

    #[test]
    fn durations_and_counts() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(125), "2:05");
        assert_eq!(format_duration(3725), "1:02:05");
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1500), "1.5K");
        assert_eq!(format_count(2_340_000), "2.3M");
    }
}
