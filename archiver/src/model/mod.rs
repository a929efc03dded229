//! Typed records for an archived guild tree.
//!
//! Children at every level are indexed by a composite `name:<name>,id:<id>`
//! key: names can collide upstream, so the id is what makes the key unique
//! within its mapping.

pub mod message;
pub mod roster;
pub mod server;

pub use message::{ArchivedMessage, MessageAuthor, Reaction};
pub use roster::{ClassRoster, OutlineMessage, Student};
pub use server::{CategoryData, ChannelData, ChatThread, ServerData};

/// Build the composite key used to index a child record within its parent
/// mapping.
pub fn composite_key(name: &str, id: u64) -> String {
    format!("name:{name},id:{id}")
}
