//! Binds a class roster to a completed server tree.
//!
//! Each student's hex identifier must select exactly one category by name
//! substring; anything else is a data-integrity error, not a warning.

use tracing::info;

use crate::error::ArchiveError;
use crate::model::roster::{ClassRoster, OutlineMessage};
use crate::model::server::ServerData;

/// Reaction marking a student's project-outline message.
pub const OUTLINE_EMOJI: &str = "🌱";

/// Associate every student with their category and outline message.
///
/// Read-only over the tree; mutates only the roster's per-student fields.
pub fn bind_roster(server: &ServerData, roster: &mut ClassRoster) -> Result<(), ArchiveError> {
    for (hex_id, student) in &mut roster.students {
        let matches: Vec<_> = server
            .categories
            .values()
            .filter(|category| category.name.contains(hex_id.as_str()))
            .collect();

        let category = match matches.as_slice() {
            [] => {
                return Err(ArchiveError::Integrity {
                    student: hex_id.clone(),
                    reason: "no category matches the student's hex id".to_string(),
                });
            }
            [one] => *one,
            _ => {
                return Err(ArchiveError::Integrity {
                    student: hex_id.clone(),
                    reason: format!("{} categories match the student's hex id", matches.len()),
                });
            }
        };

        student.outline_message = OutlineMessage::Missing;
        for channel in category.channels.values() {
            for message in &channel.messages {
                if message.has_reaction(OUTLINE_EMOJI) {
                    if let OutlineMessage::Found(_) = student.outline_message {
                        return Err(ArchiveError::Integrity {
                            student: hex_id.clone(),
                            reason: "multiple outline messages found".to_string(),
                        });
                    }
                    student.outline_message = OutlineMessage::Found(message.clone());
                }
            }
        }

        info!(
            student = %hex_id,
            category = %category.name,
            outline = matches!(student.outline_message, OutlineMessage::Found(_)),
            "bound student to category"
        );
        student.category_data = Some(category.clone());
    }
    Ok(())
}
