//! Domain error types.

mod auth_error;
mod download_error;
mod fetch_error;
mod pipeline_error;
mod resize_error;
mod validation_error;

pub use auth_error::AuthError;
pub use download_error::DownloadError;
pub use fetch_error::FetchError;
pub use pipeline_error::PipelineError;
pub use resize_error::ResizeError;
pub use validation_error::ValidationError;
