//! Repository traits for the people & notes service.
//!
//! These traits define the storage interface the HTTP handlers call into,
//! keeping handlers independent of the concrete database backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// PERSON REPOSITORY
// =============================================================================

/// Repository for person CRUD operations.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All people ordered by last name, each with its notes.
    async fn read_all(&self) -> Result<Vec<Person>>;

    /// One person with its notes (possibly none).
    ///
    /// Fails with `Error::PersonNotFound` if the id does not exist.
    async fn read_one(&self, person_id: i64) -> Result<Person>;

    /// Insert a new person.
    ///
    /// Fails with `Error::PersonExists` if the name pair is taken.
    async fn create(&self, person: PersonInput) -> Result<Person>;

    /// Replace a person's names and refresh its timestamp.
    ///
    /// Notes owned by the person are left untouched.
    async fn update(&self, person_id: i64, person: PersonInput) -> Result<Person>;

    /// Delete a person and, by cascade, every note it owns.
    async fn delete(&self, person_id: i64) -> Result<()>;
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD operations, scoped under an owning person.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Every note of every person, newest first.
    async fn read_all(&self) -> Result<Vec<Note>>;

    /// One note, which must belong to `person_id`.
    async fn read_one(&self, person_id: i64, note_id: i64) -> Result<Note>;

    /// Create a note owned by `person_id`.
    ///
    /// Fails with `Error::PersonNotFound` if the owner does not exist.
    async fn create(&self, person_id: i64, note: NoteInput) -> Result<Note>;

    /// Replace a note's content and refresh its timestamp.
    async fn update(&self, person_id: i64, note_id: i64, note: NoteInput) -> Result<Note>;

    /// Delete a note.
    async fn delete(&self, person_id: i64, note_id: i64) -> Result<()>;
}
