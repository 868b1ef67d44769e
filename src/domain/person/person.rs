//! The directory's person record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Directory-assigned person identifier. Opaque to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person as the directory returns it. Only the fields the engine reads
/// back are modeled; everything else stays on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let person: Person = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(person.id, PersonId::new(42));
        assert_eq!(person.email, None);
        assert!(person.tags.is_empty());
    }

    #[test]
    fn deserializes_full_record() {
        let person: Person = serde_json::from_str(
            r#"{"id": 7, "email": "jo@example.com", "first_name": "Jo",
                "last_name": "Citizen", "tags": ["member"], "note": "ignored"}"#,
        )
        .unwrap();
        assert_eq!(person.email.as_deref(), Some("jo@example.com"));
        assert_eq!(person.tags, vec!["member".to_string()]);
    }
}
