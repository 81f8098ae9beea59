//! Core data models for the people & notes service.
//!
//! Each entity has two output shapes. The "full" shape carries its related
//! entity, and the flattened shape carries scalars only, so serializing a
//! person with its notes (or a note with its owner) can never recurse.
//!
//! ```text
//! Person ──owns──> Vec<PersonNote>      (flattened note, no `person`)
//! Note   ──refs──> NotePerson           (flattened person, no `notes`)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of `fname` and `lname`, in characters.
pub const NAME_MAX_LEN: usize = 32;

// =============================================================================
// PERSON TYPES
// =============================================================================

/// A person together with the notes it owns, newest note first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Person {
    pub person_id: i64,
    pub fname: String,
    pub lname: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub notes: Vec<PersonNote>,
}

/// A note as it appears inside its owner's `notes` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonNote {
    pub note_id: i64,
    pub person_id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Person {
    /// Scalar-only view of this person, as embedded in a [`Note`].
    pub fn flatten(&self) -> NotePerson {
        NotePerson {
            person_id: self.person_id,
            fname: self.fname.clone(),
            lname: self.lname.clone(),
            timestamp: self.timestamp,
        }
    }
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note together with a flattened copy of the person that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    pub note_id: i64,
    pub person_id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub person: NotePerson,
}

/// A person as it appears inside a [`Note`]; never carries notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotePerson {
    pub person_id: i64,
    pub fname: String,
    pub lname: String,
    pub timestamp: DateTime<Utc>,
}

impl Note {
    /// Scalar-only view of this note, as embedded in a [`Person`].
    pub fn flatten(&self) -> PersonNote {
        PersonNote {
            note_id: self.note_id,
            person_id: self.person_id,
            content: self.content.clone(),
            timestamp: self.timestamp,
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating or replacing a person.
///
/// Identifiers and timestamps are server-assigned; any such fields sent by the
/// client are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonInput {
    /// First name, 1-32 characters.
    #[schema(max_length = 32, example = "Doug")]
    pub fname: String,
    /// Last name, 1-32 characters.
    #[schema(max_length = 32, example = "Farrell")]
    pub lname: String,
}

impl PersonInput {
    pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
        Self {
            fname: fname.into(),
            lname: lname.into(),
        }
    }

    /// Validate both name fields.
    ///
    /// Returns Ok(()) if valid, Err with message if invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_name("fname", &self.fname)?;
        validate_name("lname", &self.lname)
    }
}

/// Request body for creating or replacing a note's content.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteInput {
    /// Note text; may be empty.
    #[schema(example = "Cool, a mini-blogging application!")]
    pub content: String,
}

impl NoteInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Validate a person name field.
///
/// Rules:
/// - Not empty or whitespace-only
/// - At most [`NAME_MAX_LEN`] characters
pub fn validate_name(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(format!(
            "{} must be {} characters or less",
            field, NAME_MAX_LEN
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 6, 22, 17, 54).unwrap()
    }

    fn sample_person() -> Person {
        Person {
            person_id: 1,
            fname: "Doug".to_string(),
            lname: "Farrell".to_string(),
            timestamp: ts(),
            notes: vec![PersonNote {
                note_id: 3,
                person_id: 1,
                content: "Cool, a mini-blogging application!".to_string(),
                timestamp: ts(),
            }],
        }
    }

    #[test]
    fn test_person_serializes_flattened_notes() {
        let json = serde_json::to_value(sample_person()).unwrap();
        assert_eq!(json["person_id"], 1);
        assert_eq!(json["notes"][0]["note_id"], 3);
        assert_eq!(json["notes"][0]["person_id"], 1);
        assert!(json["notes"][0].get("person").is_none());
    }

    #[test]
    fn test_note_person_has_no_notes() {
        let person = sample_person();
        let note = Note {
            note_id: 3,
            person_id: 1,
            content: "hello".to_string(),
            timestamp: ts(),
            person: person.flatten(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["person"]["fname"], "Doug");
        assert!(json["person"].get("notes").is_none());
    }

    #[test]
    fn test_timestamp_serializes_as_string() {
        let json = serde_json::to_value(sample_person()).unwrap();
        assert_eq!(json["timestamp"], "2019-01-06T22:17:54Z");
    }

    #[test]
    fn test_note_flatten_keeps_scalars() {
        let note = Note {
            note_id: 9,
            person_id: 2,
            content: "".to_string(),
            timestamp: ts(),
            person: sample_person().flatten(),
        };
        let flat = note.flatten();
        assert_eq!(flat.note_id, 9);
        assert_eq!(flat.person_id, 2);
        assert_eq!(flat.content, "");
    }

    #[test]
    fn test_person_input_ignores_server_fields() {
        let input: PersonInput = serde_json::from_str(
            r#"{"fname":"Kent","lname":"Brockman","person_id":99,"timestamp":"x"}"#,
        )
        .unwrap();
        assert_eq!(input.fname, "Kent");
        assert_eq!(input.lname, "Brockman");
    }

    #[test]
    fn test_person_input_requires_both_names() {
        let result = serde_json::from_str::<PersonInput>(r#"{"fname":"Kent"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_note_input_allows_empty_content_but_not_null() {
        let input: NoteInput = serde_json::from_str(r#"{"content":""}"#).unwrap();
        assert_eq!(input.content, "");
        assert!(serde_json::from_str::<NoteInput>(r#"{"content":null}"#).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("fname", "Bunny").is_ok());
        assert_eq!(
            validate_name("fname", "   ").unwrap_err(),
            "fname is required"
        );
        assert!(validate_name("lname", &"x".repeat(NAME_MAX_LEN)).is_ok());
        assert_eq!(
            validate_name("lname", &"x".repeat(NAME_MAX_LEN + 1)).unwrap_err(),
            "lname must be 32 characters or less"
        );
    }

    #[test]
    fn test_validate_name_counts_characters_not_bytes() {
        // 32 two-byte characters
        assert!(validate_name("fname", &"é".repeat(NAME_MAX_LEN)).is_ok());
    }

    #[test]
    fn test_person_input_validate() {
        assert!(PersonInput::new("Doug", "Farrell").validate().is_ok());
        assert!(PersonInput::new("", "Farrell").validate().is_err());
        assert!(PersonInput::new("Doug", "").validate().is_err());
    }
}
