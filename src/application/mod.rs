//! Application layer with use cases, services and the pipeline orchestrator.

/// Data transfer objects.
pub mod dto;
/// Pipeline orchestrator.
pub mod pipeline;
/// Shared services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, ManualEmojiRequest, ManualEmojiResult, SyncReport};
pub use pipeline::EmojiPipeline;
pub use use_cases::{AddManualEmojiUseCase, LoadSessionUseCase, LoginUseCase};
