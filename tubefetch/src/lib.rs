//! Resolve, inspect and download videos through a host's `get_video_info`
//! endpoint.
//!
//! The crate is a linear pipeline: normalize the user's input into a video
//! id, fetch the query-string-encoded info document, parse it into a list
//! of stream variants, then stream the chosen variant to disk while
//! publishing whole-percent progress ticks through a bounded channel.
//!
//! # Example
//!
//! ```no_run
//! use tubefetch::Session;
//!
//! #[tokio::main]
//! async fn main() -> tubefetch::Result<()> {
//!     let mut session = Session::new();
//!
//!     // Resolve the id, fetch the info endpoint, parse the manifest.
//!     session.decode_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!
//!     // Watch progress from a separate task.
//!     let mut progress = session.progress_receiver().expect("first take");
//!     tokio::spawn(async move {
//!         while let Some(level) = progress.recv().await {
//!             println!("{level}%");
//!         }
//!     });
//!
//!     // Download the first variant that works.
//!     session.start_download("video.mp4").await?;
//!     Ok(())
//! }
//! ```

mod client;
mod download;
mod extract;
mod manifest;

pub mod error;
pub mod types;

pub use client::Session;
pub use error::{Error, Result};
pub use types::{PROGRESS_CAPACITY, StreamRecord};
