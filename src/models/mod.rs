//! Domain models.
//!
//! - [`Rocket`]: the only stored entity. Created with a caller-supplied id,
//!   read by id, and deleted by id. There is no update.

mod rocket;

pub use rocket::*;
