//! Database query operations, one module per entity.

pub mod movies;
pub mod users;
