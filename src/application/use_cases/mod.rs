//! Use case implementations.

mod add_manual_emoji_use_case;
mod load_session_use_case;
mod login_use_case;

pub use add_manual_emoji_use_case::AddManualEmojiUseCase;
pub use load_session_use_case::LoadSessionUseCase;
pub use login_use_case::LoginUseCase;
