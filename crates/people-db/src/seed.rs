//! Sample data loader.
//!
//! Populates an empty database with three people and their notes. Note
//! timestamps are fixed historical values so the notes feed has a stable
//! newest-first order that differs from insertion order.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{Pool, Sqlite};
use tracing::info;

use people_core::{Error, Result};

use crate::pool::begin_write;

/// Timestamp format used by [`SAMPLE_PEOPLE`] note entries (UTC).
const SEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A sample person and its `(content, timestamp)` notes.
#[derive(Debug, Clone, Copy)]
pub struct SeedPerson {
    pub fname: &'static str,
    pub lname: &'static str,
    pub notes: &'static [(&'static str, &'static str)],
}

/// The bundled sample data set.
pub const SAMPLE_PEOPLE: &[SeedPerson] = &[
    SeedPerson {
        fname: "Doug",
        lname: "Farrell",
        notes: &[
            ("Cool, a mini-blogging application!", "2019-01-06 22:17:54"),
            ("This could be useful", "2019-01-08 22:17:54"),
            ("Well, sort of useful", "2019-03-06 22:17:54"),
        ],
    },
    SeedPerson {
        fname: "Kent",
        lname: "Brockman",
        notes: &[
            (
                "I'm going to make really profound observations",
                "2019-01-07 22:17:54",
            ),
            (
                "Maybe they'll be more obvious than I thought",
                "2019-02-06 22:17:54",
            ),
        ],
    },
    SeedPerson {
        fname: "Bunny",
        lname: "Easter",
        notes: &[
            ("Has anyone seen my Easter eggs?", "2019-01-07 22:47:54"),
            ("I'm really late delivering these!", "2019-04-06 22:17:54"),
        ],
    },
];

/// Counts of rows written by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub people: usize,
    pub notes: usize,
}

/// Parse a seed timestamp as UTC.
pub fn parse_seed_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, SEED_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidInput(format!("Invalid seed timestamp '{}': {}", value, e)))
}

/// Insert `people` (and, when `with_notes` is set, their notes) in one transaction.
pub async fn seed(pool: &Pool<Sqlite>, people: &[SeedPerson], with_notes: bool) -> Result<SeedSummary> {
    let mut tx = begin_write(pool).await?;
    let mut summary = SeedSummary::default();
    let now = Utc::now();

    for person in people {
        let person_id = sqlx::query("INSERT INTO person (fname, lname, timestamp) VALUES (?1, ?2, ?3)")
            .bind(person.fname)
            .bind(person.lname)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?
            .last_insert_rowid();
        summary.people += 1;

        if !with_notes {
            continue;
        }

        for (content, timestamp) in person.notes {
            sqlx::query("INSERT INTO note (person_id, content, timestamp) VALUES (?1, ?2, ?3)")
                .bind(person_id)
                .bind(*content)
                .bind(parse_seed_timestamp(timestamp)?)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
            summary.notes += 1;
        }
    }

    tx.commit().await.map_err(Error::Database)?;

    info!(
        subsystem = "seed",
        component = "seed",
        op = "seed",
        people = summary.people,
        notes = summary.notes,
        "Sample data loaded"
    );
    Ok(summary)
}
