//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` structs matching database rows
//! - `Deserialize` DTOs for inserts and request bodies

pub mod deadline;
pub mod task;
