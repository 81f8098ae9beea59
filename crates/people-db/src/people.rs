//! Person repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, Transaction};
use tracing::{debug, info};

use people_core::{Error, Person, PersonInput, PersonNote, PersonRepository, Result};

use crate::pool::begin_write;

/// Person columns left-outer-joined with the notes each person owns.
///
/// A person without notes yields a single row with NULL note columns.
const PERSON_WITH_NOTES: &str = r#"
    SELECT
        p.person_id,
        p.fname,
        p.lname,
        p.timestamp,
        n.note_id,
        n.content,
        n.timestamp AS note_timestamp
    FROM person p
    LEFT OUTER JOIN note n ON n.person_id = p.person_id
"#;

/// SQLite implementation of PersonRepository.
#[derive(Clone)]
pub struct SqlitePersonRepository {
    pool: Pool<Sqlite>,
}

impl SqlitePersonRepository {
    /// Create a new SqlitePersonRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Fetch one person with its notes inside an open transaction.
    pub(crate) async fn read_one_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        person_id: i64,
    ) -> Result<Person> {
        let query = format!(
            "{} WHERE p.person_id = ?1 ORDER BY n.timestamp DESC, n.note_id DESC",
            PERSON_WITH_NOTES
        );
        let rows = sqlx::query(&query)
            .bind(person_id)
            .fetch_all(&mut **tx)
            .await
            .map_err(Error::Database)?;

        fold_people(rows)
            .into_iter()
            .next()
            .ok_or(Error::PersonNotFound(person_id))
    }

    /// Id of the person holding this name pair, if any.
    async fn find_by_name_tx(
        tx: &mut Transaction<'_, Sqlite>,
        fname: &str,
        lname: &str,
    ) -> Result<Option<i64>> {
        sqlx::query_scalar("SELECT person_id FROM person WHERE fname = ?1 AND lname = ?2")
            .bind(fname)
            .bind(lname)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)
    }
}

/// Group joined person/note rows into people.
///
/// Rows must arrive grouped by person (any ORDER BY that keeps a person's rows
/// adjacent); note order within a person is preserved.
fn fold_people(rows: Vec<SqliteRow>) -> Vec<Person> {
    let mut people: Vec<Person> = Vec::new();

    for row in rows {
        let person_id: i64 = row.get("person_id");

        let same_person = people
            .last()
            .map(|p| p.person_id == person_id)
            .unwrap_or(false);
        if !same_person {
            people.push(Person {
                person_id,
                fname: row.get("fname"),
                lname: row.get("lname"),
                timestamp: row.get("timestamp"),
                notes: Vec::new(),
            });
        }

        let note_id: Option<i64> = row.get("note_id");
        if let (Some(note_id), Some(person)) = (note_id, people.last_mut()) {
            person.notes.push(PersonNote {
                note_id,
                person_id,
                content: row.get("content"),
                timestamp: row.get("note_timestamp"),
            });
        }
    }

    people
}

/// Map a unique-index violation on (fname, lname) to `PersonExists`.
fn map_name_conflict(err: sqlx::Error, input: &PersonInput) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return Error::PersonExists {
                fname: input.fname.clone(),
                lname: input.lname.clone(),
            };
        }
    }
    Error::Database(err)
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn read_all(&self) -> Result<Vec<Person>> {
        let query = format!(
            "{} ORDER BY p.lname, p.person_id, n.timestamp DESC, n.note_id DESC",
            PERSON_WITH_NOTES
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let people = fold_people(rows);
        debug!(
            subsystem = "database",
            component = "people",
            op = "read_all",
            result_count = people.len(),
            "Listed people"
        );
        Ok(people)
    }

    async fn read_one(&self, person_id: i64) -> Result<Person> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = self.read_one_tx(&mut tx, person_id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(result)
    }

    async fn create(&self, person: PersonInput) -> Result<Person> {
        person.validate().map_err(Error::InvalidInput)?;

        let mut tx = begin_write(&self.pool).await?;

        if Self::find_by_name_tx(&mut tx, &person.fname, &person.lname)
            .await?
            .is_some()
        {
            return Err(Error::PersonExists {
                fname: person.fname,
                lname: person.lname,
            });
        }

        let now = Utc::now();
        let person_id = sqlx::query("INSERT INTO person (fname, lname, timestamp) VALUES (?1, ?2, ?3)")
            .bind(&person.fname)
            .bind(&person.lname)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_name_conflict(e, &person))?
            .last_insert_rowid();

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "people",
            op = "create",
            person_id,
            "Person created"
        );

        Ok(Person {
            person_id,
            fname: person.fname,
            lname: person.lname,
            timestamp: now,
            notes: Vec::new(),
        })
    }

    async fn update(&self, person_id: i64, person: PersonInput) -> Result<Person> {
        let mut tx = begin_write(&self.pool).await?;

        // Check if person exists first so a missing id is a 404 even when the
        // body is also invalid
        let previous: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT timestamp FROM person WHERE person_id = ?1")
                .bind(person_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(Error::Database)?;
        let Some(previous) = previous else {
            return Err(Error::PersonNotFound(person_id));
        };

        person.validate().map_err(Error::InvalidInput)?;

        if let Some(holder) = Self::find_by_name_tx(&mut tx, &person.fname, &person.lname).await? {
            if holder != person_id {
                return Err(Error::PersonExists {
                    fname: person.fname,
                    lname: person.lname,
                });
            }
        }

        // Timestamps never move backwards, even if the wall clock does
        let now = Utc::now().max(previous);
        sqlx::query("UPDATE person SET fname = ?1, lname = ?2, timestamp = ?3 WHERE person_id = ?4")
            .bind(&person.fname)
            .bind(&person.lname)
            .bind(now)
            .bind(person_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_name_conflict(e, &person))?;

        let updated = self.read_one_tx(&mut tx, person_id).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "people",
            op = "update",
            person_id,
            "Person updated"
        );
        Ok(updated)
    }

    async fn delete(&self, person_id: i64) -> Result<()> {
        // Notes go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM person WHERE person_id = ?1")
            .bind(person_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::PersonNotFound(person_id));
        }

        info!(
            subsystem = "database",
            component = "people",
            op = "delete",
            person_id,
            "Person deleted"
        );
        Ok(())
    }
}
