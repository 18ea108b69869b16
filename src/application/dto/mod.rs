//! Data transfer objects for the application layer.

mod auth_dto;
mod sync_dto;

pub use auth_dto::LoginRequest;
pub use sync_dto::{
    DownloadFailure, FetchOutcome, ManualEmojiRequest, ManualEmojiResult, SyncReport,
};
