//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. The HTTP layer defines its own response types, so
//! models stay plain data.

use uuid::Uuid;

use moviweb_core::{MovieId, UserId};

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(T::from(uuid))
}

/// A person who keeps a list of favorite movies.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub created_at: String,
}

impl User {
    /// Build from a row selected as: id, name, created_at
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
        })
    }
}

/// A movie on a user's list, optionally enriched with looked-up metadata.
#[derive(Debug, Clone)]
pub struct Movie {
    pub id: MovieId,
    pub user_id: UserId,
    pub name: String,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub created_at: String,
}

impl Movie {
    /// Build from a row selected as:
    /// id, user_id, name, director, year, poster_url, created_at
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            user_id: parse_id(row, 1)?,
            name: row.get(2)?,
            director: row.get(3)?,
            year: row.get(4)?,
            poster_url: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}
