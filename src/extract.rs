use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` whose rejections render as a 400 `{"message"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with the same error body as the rest of the API.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
