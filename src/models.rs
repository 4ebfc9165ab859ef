use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::formats::SelectionState;

/// A validated URL submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    url: String,
}

impl VideoQuery {
    /// Trims `raw` and checks it is a non-empty http(s) URL.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let url = raw.trim();
        if url.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::MissingScheme);
        }
        Ok(Self {
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatOption {
    #[serde(rename = "quality")]
    pub quality_label: String,
    pub format_id: String,
    #[serde(rename = "filesize", default)]
    pub filesize_bytes: Option<u64>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// The backend forwards extractor fields as-is, so any of them may be null.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// yt-dlp reports some counts and durations as floats (e.g. 14.967 s).
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uploader: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    pub formats: Vec<FormatOption>,
    // Seconds; the backend sends 0 when unknown.
    #[serde(default, deserialize_with = "whole_number")]
    pub duration: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub view_count: Option<u64>,
}

/// Which of the mutually exclusive result panels is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Loading,
    Video {
        info: VideoInfo,
        selection: SelectionState,
    },
    Error(String),
}

impl PanelState {
    pub fn show_video(info: VideoInfo) -> Self {
        Self::Video {
            info,
            selection: SelectionState::default(),
        }
    }
}

/// Data handed from the info page to the download view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffRecord {
    pub url: String,
    pub quality: String,
    pub format_id: String,
    pub video_title: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Route {
    #[default]
    Home,
    Downloading(HandoffRecord),
}

#[derive(Default)]
pub struct AppState {
    pub url: String,
    pub current_url: String,
    pub is_fetching: bool,
    pub panel: PanelState,
    pub route: Route,
}
