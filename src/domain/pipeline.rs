//! Pipeline progress states and the transitions allowed between them.

use std::fmt;

/// A working stage of the pipeline, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Stage {
    Authenticating,
    ListingCommunities,
    ListingEmoji,
    Downloading,
    Normalizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Authenticating => "authenticating",
            Self::ListingCommunities => "listing communities",
            Self::ListingEmoji => "listing emoji",
            Self::Downloading => "downloading",
            Self::Normalizing => "normalizing",
        };
        f.write_str(label)
    }
}

/// Coarse progress reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Nothing has run yet, or the pipeline was reset.
    #[default]
    Idle,
    /// Logging in. Stays here after a standalone successful login.
    Authenticating,
    /// Fetching the community list.
    ListingCommunities,
    /// Fetching emoji for each community.
    ListingEmoji,
    /// Filling the cache.
    Downloading,
    /// Shrinking cached images.
    Normalizing,
    /// Last run completed.
    Ready,
    /// Last run stopped at `stage`.
    Failed {
        /// Stage that failed.
        stage: Stage,
        /// Error description for logs.
        reason: String,
    },
}

impl PipelineState {
    /// Returns the working stage this state represents, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Authenticating => Some(Stage::Authenticating),
            Self::ListingCommunities => Some(Stage::ListingCommunities),
            Self::ListingEmoji => Some(Stage::ListingEmoji),
            Self::Downloading => Some(Stage::Downloading),
            Self::Normalizing => Some(Stage::Normalizing),
            Self::Idle | Self::Ready | Self::Failed { .. } => None,
        }
    }

    /// Returns true for `Ready` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed { .. })
    }

    /// Returns true if loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns whether `next` may follow this state.
    ///
    /// `Failed` is not checked here; any non-terminal state may fail.
    #[must_use]
    pub const fn can_transition_to(&self, next: &Self) -> bool {
        match next {
            Self::Idle => matches!(self, Self::Authenticating | Self::Ready | Self::Failed { .. }),
            Self::Authenticating => matches!(self, Self::Idle | Self::Failed { .. }),
            Self::ListingCommunities => matches!(
                self,
                Self::Idle | Self::Authenticating | Self::Ready | Self::Failed { .. }
            ),
            Self::ListingEmoji => matches!(self, Self::ListingCommunities),
            Self::Downloading => matches!(
                self,
                Self::ListingEmoji
                    | Self::Idle
                    | Self::Authenticating
                    | Self::Ready
                    | Self::Failed { .. }
            ),
            Self::Normalizing => matches!(self, Self::Downloading),
            Self::Ready => matches!(self, Self::Normalizing),
            Self::Failed { .. } => !self.is_terminal(),
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Ready => f.write_str("ready"),
            Self::Failed { stage, reason } => write!(f, "failed while {stage}: {reason}"),
            other => match other.stage() {
                Some(stage) => write!(f, "{stage}"),
                None => Ok(()),
            },
        }
    }
}
