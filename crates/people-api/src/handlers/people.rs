//! Person HTTP handlers.
//!
//! Every person is returned in full form: its own fields plus the flattened
//! notes it owns, newest first.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use people_core::{Person, PersonInput, PersonRepository};

use crate::extract::{AppJson, AppPath};
use crate::{ApiError, AppState};

/// List every person, sorted by last name.
#[utoipa::path(get, path = "/api/people", tag = "People",
    responses((status = 200, description = "People sorted by last name", body = Vec<Person>)))]
pub async fn read_all(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    let people = state.db.people.read_all().await?;
    Ok(Json(people))
}

/// Get one person with their notes.
///
/// # Returns
/// - 200 OK with the person
/// - 404 Not Found if no person has this id
#[utoipa::path(get, path = "/api/people/{person_id}", tag = "People",
    params(("person_id" = i64, Path, description = "Id of the person")),
    responses(
        (status = 200, description = "The person", body = Person),
        (status = 404, description = "Person not found")
    ))]
pub async fn read_one(
    State(state): State<AppState>,
    AppPath(person_id): AppPath<i64>,
) -> Result<Json<Person>, ApiError> {
    let person = state.db.people.read_one(person_id).await?;
    Ok(Json(person))
}

/// Create a person.
///
/// # Returns
/// - 201 Created with the new person
/// - 400 Bad Request if a name is blank, too long, or the body is malformed
/// - 409 Conflict if the first/last name pair is taken
#[utoipa::path(post, path = "/api/people", tag = "People",
    request_body = PersonInput,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Person already exists")
    ))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<PersonInput>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let person = state.db.people.create(input).await?;
    info!(
        subsystem = "api",
        component = "people",
        op = "create",
        person_id = person.person_id,
        "Person created"
    );
    Ok((StatusCode::CREATED, Json(person)))
}

/// Replace a person's names.
///
/// # Returns
/// - 200 OK with the updated person, notes included
/// - 400 Bad Request on invalid input
/// - 404 Not Found if no person has this id
/// - 409 Conflict if another person already holds the new name pair
#[utoipa::path(put, path = "/api/people/{person_id}", tag = "People",
    params(("person_id" = i64, Path, description = "Id of the person")),
    request_body = PersonInput,
    responses(
        (status = 200, description = "Person updated", body = Person),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Name pair taken by another person")
    ))]
pub async fn update(
    State(state): State<AppState>,
    AppPath(person_id): AppPath<i64>,
    AppJson(input): AppJson<PersonInput>,
) -> Result<Json<Person>, ApiError> {
    let person = state.db.people.update(person_id, input).await?;
    Ok(Json(person))
}

/// Delete a person and all of their notes.
#[utoipa::path(delete, path = "/api/people/{person_id}", tag = "People",
    params(("person_id" = i64, Path, description = "Id of the person")),
    responses(
        (status = 200, description = "Confirmation message", body = String, content_type = "text/plain"),
        (status = 404, description = "Person not found")
    ))]
pub async fn delete(
    State(state): State<AppState>,
    AppPath(person_id): AppPath<i64>,
) -> Result<(StatusCode, String), ApiError> {
    state.db.people.delete(person_id).await?;
    Ok((
        StatusCode::OK,
        format!("Person {} successfully deleted", person_id),
    ))
}
