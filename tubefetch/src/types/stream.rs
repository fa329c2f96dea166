use serde::{Deserialize, Serialize};

/// One downloadable variant from the stream manifest.
///
/// Order of records follows the manifest, which lists its preferred
/// (typically highest-quality) variant first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    pub quality: String,
    /// Container/codec descriptor, e.g. `video/mp4; codecs="avc1.64001F"`.
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String
}
