mod progress;
mod stream;

pub use progress::PROGRESS_CAPACITY;
pub(crate) use progress::ProgressMeter;
pub use stream::StreamRecord;
