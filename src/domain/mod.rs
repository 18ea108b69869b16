//! Domain layer with core entities, pipeline states and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Pipeline progress states.
pub mod pipeline;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{Community, CommunityId, Credential, Emoji, EmojiFormat, EmojiId, SessionState};
pub use errors::{AuthError, DownloadError, FetchError, PipelineError, ResizeError, ValidationError};
pub use pipeline::{PipelineState, Stage};
pub use ports::{AnimatedResizerPort, AuthPort, EmojiCachePort, EmojiSourcePort, ImageNormalizerPort};
