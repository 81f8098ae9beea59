//! Request extractors whose rejections render as [`ApiError`] bodies.
//!
//! axum's stock `Json` and `Path` reject with plain-text 415/422 responses;
//! these wrappers turn every malformed body or id into a 400 with the usual
//! `{"error": ...}` JSON.

use axum::extract::{FromRequest, FromRequestParts};

use crate::ApiError;

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
