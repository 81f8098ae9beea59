//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, Transaction};
use tracing::{debug, info};

use people_core::{Error, Note, NoteInput, NotePerson, NoteRepository, Result};

use crate::pool::begin_write;

/// Note columns inner-joined with the owning person's scalar columns.
const NOTE_WITH_PERSON: &str = r#"
    SELECT
        n.note_id,
        n.person_id,
        n.content,
        n.timestamp,
        p.fname,
        p.lname,
        p.timestamp AS person_timestamp
    FROM note n
    INNER JOIN person p ON p.person_id = n.person_id
"#;

/// SQLite implementation of NoteRepository.
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Fetch one note of one person inside an open transaction.
    pub(crate) async fn read_one_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        person_id: i64,
        note_id: i64,
    ) -> Result<Note> {
        let query = format!(
            "{} WHERE n.person_id = ?1 AND n.note_id = ?2",
            NOTE_WITH_PERSON
        );
        let row = sqlx::query(&query)
            .bind(person_id)
            .bind(note_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?;

        row.map(note_from_row)
            .ok_or(Error::NoteNotFound { person_id, note_id })
    }
}

fn note_from_row(row: SqliteRow) -> Note {
    let person_id: i64 = row.get("person_id");
    Note {
        note_id: row.get("note_id"),
        person_id,
        content: row.get("content"),
        timestamp: row.get("timestamp"),
        person: NotePerson {
            person_id,
            fname: row.get("fname"),
            lname: row.get("lname"),
            timestamp: row.get("person_timestamp"),
        },
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn read_all(&self) -> Result<Vec<Note>> {
        let query = format!(
            "{} ORDER BY n.timestamp DESC, n.note_id DESC",
            NOTE_WITH_PERSON
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let notes: Vec<Note> = rows.into_iter().map(note_from_row).collect();
        debug!(
            subsystem = "database",
            component = "notes",
            op = "read_all",
            result_count = notes.len(),
            "Listed notes"
        );
        Ok(notes)
    }

    async fn read_one(&self, person_id: i64, note_id: i64) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = self.read_one_tx(&mut tx, person_id, note_id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(result)
    }

    async fn create(&self, person_id: i64, note: NoteInput) -> Result<Note> {
        let mut tx = begin_write(&self.pool).await?;

        let owner_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM person WHERE person_id = ?1)")
                .bind(person_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?;
        if !owner_exists {
            return Err(Error::PersonNotFound(person_id));
        }

        let note_id = sqlx::query("INSERT INTO note (person_id, content, timestamp) VALUES (?1, ?2, ?3)")
            .bind(person_id)
            .bind(&note.content)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?
            .last_insert_rowid();

        let created = self.read_one_tx(&mut tx, person_id, note_id).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "create",
            person_id,
            note_id,
            "Note created"
        );
        Ok(created)
    }

    async fn update(&self, person_id: i64, note_id: i64, note: NoteInput) -> Result<Note> {
        let mut tx = begin_write(&self.pool).await?;

        let result = sqlx::query(
            "UPDATE note SET content = ?1, timestamp = ?2 WHERE person_id = ?3 AND note_id = ?4",
        )
        .bind(&note.content)
        .bind(Utc::now())
        .bind(person_id)
        .bind(note_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound { person_id, note_id });
        }

        let updated = self.read_one_tx(&mut tx, person_id, note_id).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "notes",
            op = "update",
            person_id,
            note_id,
            "Note updated"
        );
        Ok(updated)
    }

    async fn delete(&self, person_id: i64, note_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE person_id = ?1 AND note_id = ?2")
            .bind(person_id)
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound { person_id, note_id });
        }

        info!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            person_id,
            note_id,
            "Note deleted"
        );
        Ok(())
    }
}
