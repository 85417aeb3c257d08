//! Shotboard domain logic.
//!
//! Pure functions and types shared by the database and API crates. Nothing
//! in here performs I/O.

pub mod entity;
pub mod error;
pub mod frame_set;
pub mod gaming;
pub mod pagination;
pub mod progress;
pub mod types;
pub mod validation_record;
