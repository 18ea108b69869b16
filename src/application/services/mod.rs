//! Application services shared by the use cases.

mod emoji_fetch_service;
mod progress_tracker;

pub use emoji_fetch_service::EmojiFetchService;
pub use progress_tracker::ProgressTracker;
