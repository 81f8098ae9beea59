//! Note HTTP handlers.
//!
//! Notes are addressed through their owner: `/api/people/{person_id}/notes/{note_id}`
//! only resolves when the note belongs to that person.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use people_core::{Note, NoteInput, NoteRepository};

use crate::extract::{AppJson, AppPath};
use crate::{ApiError, AppState};

/// List every note across all people, newest first.
#[utoipa::path(get, path = "/api/people/notes", tag = "Notes",
    responses((status = 200, description = "All notes, newest first", body = Vec<Note>)))]
pub async fn read_all(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.db.notes.read_all().await?;
    Ok(Json(notes))
}

#[utoipa::path(get, path = "/api/people/{person_id}/notes/{note_id}", tag = "Notes",
    params(
        ("person_id" = i64, Path, description = "Id of the owning person"),
        ("note_id" = i64, Path, description = "Id of the note")
    ),
    responses(
        (status = 200, description = "The note", body = Note),
        (status = 404, description = "Note not found for this person")
    ))]
pub async fn read_one(
    State(state): State<AppState>,
    AppPath((person_id, note_id)): AppPath<(i64, i64)>,
) -> Result<Json<Note>, ApiError> {
    let note = state.db.notes.read_one(person_id, note_id).await?;
    Ok(Json(note))
}

/// Attach a new note to a person.
///
/// # Returns
/// - 201 Created with the new note
/// - 404 Not Found if the person does not exist
#[utoipa::path(post, path = "/api/people/{person_id}/notes", tag = "Notes",
    params(("person_id" = i64, Path, description = "Id of the owning person")),
    request_body = NoteInput,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Person not found")
    ))]
pub async fn create(
    State(state): State<AppState>,
    AppPath(person_id): AppPath<i64>,
    AppJson(input): AppJson<NoteInput>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.db.notes.create(person_id, input).await?;
    info!(
        subsystem = "api",
        component = "notes",
        op = "create",
        person_id,
        note_id = note.note_id,
        "Note created"
    );
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(put, path = "/api/people/{person_id}/notes/{note_id}", tag = "Notes",
    params(
        ("person_id" = i64, Path, description = "Id of the owning person"),
        ("note_id" = i64, Path, description = "Id of the note")
    ),
    request_body = NoteInput,
    responses(
        (status = 200, description = "Note updated", body = Note),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Note not found for this person")
    ))]
pub async fn update(
    State(state): State<AppState>,
    AppPath((person_id, note_id)): AppPath<(i64, i64)>,
    AppJson(input): AppJson<NoteInput>,
) -> Result<Json<Note>, ApiError> {
    let note = state.db.notes.update(person_id, note_id, input).await?;
    Ok(Json(note))
}

#[utoipa::path(delete, path = "/api/people/{person_id}/notes/{note_id}", tag = "Notes",
    params(
        ("person_id" = i64, Path, description = "Id of the owning person"),
        ("note_id" = i64, Path, description = "Id of the note")
    ),
    responses(
        (status = 200, description = "Confirmation message", body = String, content_type = "text/plain"),
        (status = 404, description = "Note not found for this person")
    ))]
pub async fn delete(
    State(state): State<AppState>,
    AppPath((person_id, note_id)): AppPath<(i64, i64)>,
) -> Result<(StatusCode, String), ApiError> {
    state.db.notes.delete(person_id, note_id).await?;
    Ok((StatusCode::OK, format!("Note {} successfully deleted", note_id)))
}
