use std::path::Path;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::types::{PROGRESS_CAPACITY, ProgressMeter, StreamRecord};
use crate::{download, extract, manifest};

const DEFAULT_INFO_HOST: &str = "youtube.com";

/// One download intent, from raw input string to file on disk.
///
/// A session is single-flow: [`Session::decode_url`] resolves the video id,
/// fetches the info endpoint and parses the stream manifest exactly once,
/// then [`Session::start_download`] walks the parsed variants until one
/// downloads. Sessions are not reused; build a fresh one per video.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    info_host: String,
    video_id: Option<String>,
    raw_info: Option<String>,
    streams: Vec<StreamRecord>,
    progress_tx: mpsc::Sender<u32>,
    progress_rx: Option<mpsc::Receiver<u32>>,
    cancel: CancellationToken
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (progress_tx, progress_rx) = mpsc::channel(PROGRESS_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            info_host: DEFAULT_INFO_HOST.to_string(),
            video_id: None,
            raw_info: None,
            streams: Vec::new(),
            progress_tx,
            progress_rx: Some(progress_rx),
            cancel: CancellationToken::new()
        }
    }

    pub fn with_info_host(host: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.info_host = host.into();
        session
    }

    pub fn set_info_host(&mut self, host: String) {
        self.info_host = host;
    }

    /// The resolved video id, once [`Session::decode_url`] has succeeded.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// The raw, still-encoded info response body, kept for diagnostics.
    pub fn raw_info(&self) -> Option<&str> {
        self.raw_info.as_deref()
    }

    /// Parsed stream variants, in manifest order.
    pub fn streams(&self) -> &[StreamRecord] {
        &self.streams
    }

    /// Takes the receiving end of the progress channel. Levels 1–100 are
    /// published through it while a download runs. Returns `None` on every
    /// call after the first.
    pub fn progress_receiver(&mut self) -> Option<mpsc::Receiver<u32>> {
        self.progress_rx.take()
    }

    /// A handle that aborts an in-flight download when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Resolves `input` to a video id, fetches the info endpoint and parses
    /// the stream manifest, populating the session's stream list.
    pub async fn decode_url(&mut self, input: &str) -> Result<()> {
        let video_id = extract::find_video_id(input)?;

        let raw_info = self.fetch_video_info(&video_id).await?;

        let streams = manifest::parse(&raw_info)?;
        tracing::debug!(count = streams.len(), "parsed stream manifest");

        self.video_id = Some(video_id);
        self.raw_info = Some(raw_info);
        self.streams = streams;
        Ok(())
    }

    async fn fetch_video_info(&self, video_id: &str) -> Result<String> {
        let url = format!(
            "http://{}/get_video_info?video_id={video_id}",
            self.info_host
        );
        tracing::debug!(%url, "requesting video info");

        let response = self.http.get(&url).send().await.map_err(Error::InfoRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::InfoStatus(status));
        }

        response.text().await.map_err(Error::InfoRequest)
    }

    /// Downloads the first stream variant that succeeds to `dest`, in
    /// manifest order. An empty stream list fails immediately; otherwise
    /// the last attempt's error surfaces once every variant has failed.
    /// Cancellation stops the walk instead of moving to the next variant.
    pub async fn start_download(&mut self, dest: impl AsRef<Path>) -> Result<()> {
        let dest = dest.as_ref();
        let streams = self.streams.clone();

        let mut last_err = Error::EmptyStreamList;
        for (position, stream) in streams.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            tracing::debug!(position, quality = %stream.quality, url = %stream.url, "attempting stream download");

            // Fresh byte accounting per attempt so a failed variant's
            // counters never skew the next one.
            let meter = ProgressMeter::new(self.progress_tx.clone());
            let attempt =
                download::fetch_to_file(&self.http, dest, &stream.url, meter, &self.cancel).await;
            match attempt {
                Ok(()) => {
                    tracing::info!(path = %dest.display(), "download complete");
                    return Ok(());
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(err) => {
                    tracing::warn!(position, error = %err, "stream download failed");
                    last_err = err;
                }
            }
        }
        Err(last_err)
    }
}
