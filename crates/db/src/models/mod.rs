//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod entity;
pub mod game;
pub mod person;
pub mod progress;
pub mod project;
pub mod validation_record;
