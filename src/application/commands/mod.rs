// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between presentation and services
// - Commands return DTOs
// - Commands handle error conversion
// - Commands NEVER contain business logic

pub mod collection_commands;
pub mod exhibition_commands;

pub use collection_commands::*;
pub use exhibition_commands::*;
