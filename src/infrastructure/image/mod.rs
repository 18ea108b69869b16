//! Image handling infrastructure.
//!
//! This module provides:
//! - Disk caching of raw emoji files
//! - In-process resizing of static images
//! - Animated resizing through `gifsicle`

pub mod disk_cache;
pub mod gifsicle;
pub mod normalizer;

pub use disk_cache::{DiskEmojiCache, default_cache_dir};
pub use gifsicle::{DEFAULT_GIFSICLE_PROGRAM, DEFAULT_RESIZE_TIMEOUT, GifsicleResizer};
pub use normalizer::{DEFAULT_MAX_DIMENSION, ImageNormalizer, fit_within};
