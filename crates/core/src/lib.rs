//! Domain types and validation rules shared by the database and API layers.

pub mod deadline;
pub mod error;
pub mod roles;
pub mod types;
