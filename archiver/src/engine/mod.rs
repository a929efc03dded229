pub mod crawler;
pub mod roster_binder;

pub use crawler::{Crawler, MINIMUM_THREAD_MESSAGE_COUNT};
pub use roster_binder::{OUTLINE_EMOJI, bind_roster};
