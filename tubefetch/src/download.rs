use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::types::ProgressMeter;

/// Streams one stream variant's body into `dest`, feeding the progress
/// meter chunk by chunk. Every chunk read races the cancellation token.
///
/// A failure mid-copy leaves whatever was already written in place.
pub(crate) async fn fetch_to_file(
    http: &reqwest::Client,
    dest: &Path,
    url: &str,
    mut meter: ProgressMeter,
    cancel: &CancellationToken
) -> Result<()> {
    let response = http.get(url).send().await.map_err(Error::DownloadRequest)?;
    meter.set_content_length(response.content_length());

    let status = response.status();
    if !status.is_success() {
        return Err(Error::DownloadStatus(status));
    }

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }
    let mut file = fs::File::create(dest).await?;

    let mut body = response.bytes_stream();
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            chunk = body.next() => match chunk {
                Some(Ok(chunk)) => {
                    file.write_all(&chunk).await?;
                    meter.record(chunk.len());
                }
                Some(Err(err)) => return Err(Error::DownloadRequest(err)),
                None => break
            }
        }
    }
    file.flush().await?;

    Ok(())
}
