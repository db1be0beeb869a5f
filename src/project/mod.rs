//! Project file I/O.
//!
//! A project file is the project's JSON form as accepted by the schema layer.
//! [`serialization`] provides atomic save and validated load.

pub mod serialization;

pub use serialization::{load, save, to_json_string};
