//! Domain entity definitions.

mod community;
mod credential;
mod emoji;
mod session;

pub use community::{Community, CommunityId, EXTRA_COMMUNITY_ID, EXTRA_COMMUNITY_NAME};
pub use credential::Credential;
pub use emoji::{Emoji, EmojiFormat, EmojiId, is_valid_id};
pub use session::SessionState;
