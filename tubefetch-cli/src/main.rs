use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tubefetch::Session;

#[derive(Parser)]
#[command(name = "tubefetch")]
#[command(version, about = "Resolve a video URL and download it via the get_video_info endpoint")]
struct Cli {
    /// Video URL, short URL or bare video id
    input: String,

    /// Destination file path
    #[arg(short, long, default_value = "video.mp4")]
    output: PathBuf,

    /// Override the host queried for video info
    #[arg(long)]
    info_host: Option<String>,

    /// Print the parsed stream variants as JSON instead of downloading
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubefetch=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut session = match cli.info_host {
        Some(host) => Session::with_info_host(host),
        None => Session::new(),
    };

    session
        .decode_url(&cli.input)
        .await
        .context("failed to resolve video info")?;

    if cli.list {
        println!("{}", serde_json::to_string_pretty(session.streams())?);
        return Ok(());
    }

    tracing::info!(
        video_id = session.video_id().unwrap_or_default(),
        streams = session.streams().len(),
        "resolved video"
    );

    // Ctrl-C aborts the transfer through the session's cancel token.
    let cancel = session.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling download");
            cancel.cancel();
        }
    });

    let mut progress = session
        .progress_receiver()
        .context("progress receiver already taken")?;
    let printer = tokio::spawn(async move {
        while let Some(level) = progress.recv().await {
            print!("\r{level:>3}%");
            let _ = std::io::stdout().flush();
        }
        println!();
    });

    let outcome = session.start_download(&cli.output).await;
    drop(session);
    let _ = printer.await;
    outcome.context("download failed")?;

    tracing::info!(path = %cli.output.display(), "saved");
    Ok(())
}
