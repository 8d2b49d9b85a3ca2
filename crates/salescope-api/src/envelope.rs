//! The uniform `{ "success": ... }` response shapes.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{ success: true, meta?, data }`
#[derive(Debug, Serialize)]
pub struct Envelope<T, M = ()> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub meta:    Option<M>,
  pub data:    T,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      success: true,
      meta: None,
      data,
    }
  }
}

impl<T, M> Envelope<T, M> {
  pub fn with_meta(data: T, meta: M) -> Self {
    Self {
      success: true,
      meta: Some(meta),
      data,
    }
  }
}

impl<T: Serialize, M: Serialize> IntoResponse for Envelope<T, M> {
  fn into_response(self) -> Response { Json(self).into_response() }
}

/// `{ success: true, message, total? }`
#[derive(Debug, Serialize)]
pub struct Notice {
  pub success: bool,
  pub message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total:   Option<usize>,
}

impl Notice {
  pub fn new(message: &'static str) -> Self {
    Self {
      success: true,
      message,
      total: None,
    }
  }

  pub fn with_total(message: &'static str, total: usize) -> Self {
    Self {
      total: Some(total),
      ..Self::new(message)
    }
  }
}

impl IntoResponse for Notice {
  fn into_response(self) -> Response { Json(self).into_response() }
}

/// `{ success: false, message }`
#[derive(Debug, Serialize)]
pub struct Failure {
  pub success: bool,
  pub message: &'static str,
}

impl Failure {
  pub fn new(message: &'static str) -> Self {
    Self {
      success: false,
      message,
    }
  }
}

impl IntoResponse for Failure {
  fn into_response(self) -> Response { Json(self).into_response() }
}
