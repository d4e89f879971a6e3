//! Entity to model mappers
//!
//! Conversions between domain entities (social-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Write` structs: Prepare entity data for database writes

mod comment;
mod follower;
mod invitation;
mod post;
mod role;
mod user;

pub use post::PostWrite;
