// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between presentation (CLI) and services
// - Translates service results into DTOs
// - Maps errors into ErrorResponse

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use state::AppState;
