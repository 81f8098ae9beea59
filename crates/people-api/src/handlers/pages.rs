//! Browser pages.
//!
//! The pages are static shells compiled into the binary; their scripts call
//! the JSON API. Only the ids from the URL are substituted server-side, and
//! they are parsed as integers first so nothing else reaches the markup.

use axum::response::Html;

use crate::extract::AppPath;
use crate::ApiError;

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const PERSON_TEMPLATE: &str = include_str!("../../templates/people.html");
const NOTE_TEMPLATE: &str = include_str!("../../templates/notes.html");

fn render(template: &str, person_id: Option<i64>, note_id: Option<i64>) -> Html<String> {
    let id = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
    Html(
        template
            .replace("{{person_id}}", &id(person_id))
            .replace("{{note_id}}", &id(note_id)),
    )
}

/// `GET /` and `GET /people`: the people list.
pub async fn home() -> Html<String> {
    render(HOME_TEMPLATE, None, None)
}

/// `GET /people/{person_id}` and `GET /people/{person_id}/notes`.
pub async fn person(AppPath(person_id): AppPath<i64>) -> Result<Html<String>, ApiError> {
    Ok(render(PERSON_TEMPLATE, Some(person_id), None))
}

/// `GET /people/{person_id}/notes/{note_id}`.
pub async fn note(
    AppPath((person_id, note_id)): AppPath<(i64, i64)>,
) -> Result<Html<String>, ApiError> {
    Ok(render(NOTE_TEMPLATE, Some(person_id), Some(note_id)))
}
