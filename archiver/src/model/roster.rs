use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::message::ArchivedMessage;
use super::server::CategoryData;

/// A student's designated outline message, after the roster pass.
///
/// `Missing` records that the category was scanned and no tagged message was
/// found, distinct from `Unchecked`, which means the scan never ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message")]
pub enum OutlineMessage {
    #[default]
    Unchecked,
    Missing,
    Found(ArchivedMessage),
}

/// A known member of the community. The hex identifier lives in the roster
/// map key; binding fills `category_data` and `outline_message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// The one category matched to this student, owned by the roster once
    /// bound.
    #[serde(default)]
    pub category_data: Option<CategoryData>,
    #[serde(default)]
    pub outline_message: OutlineMessage,
}

/// The externally supplied roster, keyed by each student's hex identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRoster {
    pub students: BTreeMap<String, Student>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_defaults_to_unchecked() {
        let roster_json = r#"{"students":{"a1b2c3":{"name":"Ada"}}}"#;
        let roster: ClassRoster = serde_json::from_str(roster_json).unwrap();
        let student = &roster.students["a1b2c3"];
        assert_eq!(student.outline_message, OutlineMessage::Unchecked);
        assert!(student.category_data.is_none());
    }

    #[test]
    fn missing_and_unchecked_serialize_distinctly() {
        let missing = serde_json::to_string(&OutlineMessage::Missing).unwrap();
        let unchecked = serde_json::to_string(&OutlineMessage::Unchecked).unwrap();
        assert_ne!(missing, unchecked);
    }
}
