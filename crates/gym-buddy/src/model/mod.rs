//! # Domain Model
//!
//! Pure data: the records the backend stores and the payloads the pages send. The field
//! names serialize exactly as the REST API spells them (camelCase).

pub mod user;
pub mod workout;

pub use user::*;
pub use workout::*;
