use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid characters in video id '{0}'")]
    InvalidVideoId(String),

    #[error("video id '{0}' must be at least 10 characters long")]
    VideoIdTooShort(String),

    #[error("video info request failed: {0}")]
    InfoRequest(#[source] reqwest::Error),

    #[error("video info endpoint answered with status {0}")]
    InfoStatus(StatusCode),

    #[error("no response status found in the video info")]
    MissingStatus,

    #[error("'fail' response status found in the video info, reason: '{}'", .reason.as_deref().unwrap_or("no reason given"))]
    StatusFail { reason: Option<String> },

    #[error("non-success response status found in the video info: '{0}'")]
    UnexpectedInfoStatus(String),

    #[error("no stream map found in the video info")]
    MissingStreamMap,

    #[error("no usable streams found in the video info")]
    EmptyStreamList,

    #[error("stream request failed: {0}")]
    DownloadRequest(#[source] reqwest::Error),

    #[error("stream endpoint answered with status {0}")]
    DownloadStatus(StatusCode),

    #[error("failed to write downloaded data: {0}")]
    Io(#[from] std::io::Error),

    #[error("download cancelled")]
    Cancelled
}

pub type Result<T> = std::result::Result<T, Error>;
