//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Failures never leak detail to the caller: the response carries a fixed
//! message and the cause is logged server-side.

use std::any::Any;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Failure;

pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("no route matched")]
  NotFound,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("handler panicked: {0}")]
  Panic(String),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound => {
        (StatusCode::NOT_FOUND, Failure::new(NOT_FOUND_MESSAGE)).into_response()
      }
      e => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Failure::new(SERVER_ERROR_MESSAGE))
          .into_response()
      }
    }
  }
}

/// Fallback for unmatched paths and methods.
pub async fn not_found() -> ApiError { ApiError::NotFound }

/// Turns a caught handler panic into the generic 500 envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
  let message = if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_owned()
  } else {
    "unknown panic payload".to_owned()
  };
  ApiError::Panic(message).into_response()
}
