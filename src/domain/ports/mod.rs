mod animated_resizer_port;
mod auth_port;
mod emoji_cache_port;
mod emoji_source_port;
mod image_normalizer_port;

pub use animated_resizer_port::AnimatedResizerPort;
pub use auth_port::AuthPort;
pub use emoji_cache_port::{CacheEntry, CacheError, CacheResult, CacheWrite, EmojiCachePort};
pub use emoji_source_port::EmojiSourcePort;
pub use image_normalizer_port::{
    AnimatedBatchReport, ImageNormalizerPort, NormalizeOutcome, NormalizeReport, StaticBatchReport,
};
