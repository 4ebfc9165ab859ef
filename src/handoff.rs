use std::path::PathBuf;

use crate::error::PersistenceError;
use crate::models::{FormatOption, HandoffRecord, VideoInfo};

pub const HANDOFF_KEY: &str = "downloadData";

/// Storage shared between the info page and the download view.
pub trait HandoffStore: Send {
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
}

/// Keeps one JSON file per key in a session directory that is wiped when
/// the store is opened, so records do not survive a restart.
pub struct FileHandoffStore {
    dir: PathBuf,
}

impl FileHandoffStore {
    pub fn open(dir: PathBuf) -> Result<Self, PersistenceError> {
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        }
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn session_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(crate::config::APP_DIR)
            .join("session")
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HandoffStore for FileHandoffStore {
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Fallback when the session directory cannot be used.
#[derive(Default)]
pub struct MemoryHandoffStore {
    values: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl HandoffStore for MemoryHandoffStore {
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }
}

/// Opens the file store in `dir`, or keeps records in memory when the
/// directory cannot be prepared.
pub fn open_session_store(dir: PathBuf) -> Box<dyn HandoffStore> {
    match FileHandoffStore::open(dir.clone()) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!(
                "handoff storage at {} unavailable, keeping records in memory: {err}",
                dir.display()
            );
            Box::<MemoryHandoffStore>::default()
        }
    }
}

/// The page the user was on when they clicked download.
pub struct VideoContext<'a> {
    pub url: &'a str,
    pub info: &'a VideoInfo,
}

pub fn build_record(option: &FormatOption, context: &VideoContext<'_>) -> HandoffRecord {
    HandoffRecord {
        url: context.url.to_string(),
        quality: option.quality_label.clone(),
        format_id: option.format_id.clone(),
        video_title: context.info.title.clone(),
        thumbnail: context.info.thumbnail.clone(),
    }
}

/// Writes the handoff record, overwriting any earlier one.
pub fn begin_download(
    store: &dyn HandoffStore,
    option: &FormatOption,
    context: &VideoContext<'_>,
) -> Result<HandoffRecord, PersistenceError> {
    let record = build_record(option, context);
    let json = serde_json::to_string(&record)?;
    store.write(HANDOFF_KEY, &json)?;
    log::info!("handoff {} ({}) for {}", record.quality, record.format_id, record.url);
    Ok(record)
}

pub fn load_record(store: &dyn HandoffStore) -> Result<Option<HandoffRecord>, PersistenceError> {
    match store.read(HANDOFF_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
