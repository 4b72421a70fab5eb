//! Passdrop HTTP surface
//!
//! The mirrored create/list API over an endpoint-owned entry store, plus
//! the health route and OpenAPI documentation.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{HttpError, Result};
pub use state::AppState;
