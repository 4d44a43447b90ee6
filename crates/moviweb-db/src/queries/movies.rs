//! Movie CRUD operations.
//!
//! The update and delete operations use soft-fail contracts so callers can
//! branch on existence without error handling: `update_movie` returns
//! `Ok(None)` and `delete_movie` returns `Ok(false)` for a missing row.

use chrono::Utc;
use rusqlite::Connection;

use moviweb_core::{Error, MovieId, Result, UserId};

use crate::models::Movie;

const COLS: &str = "id, user_id, name, director, year, poster_url, created_at";

/// Insert a new movie linked to `user_id` and return it.
///
/// Does not check that the user exists; a dangling reference fails the
/// foreign-key constraint and surfaces as a database error. Handlers
/// resolve the user first when they want a not-found response instead.
pub fn add_movie(
    conn: &Connection,
    user_id: UserId,
    name: &str,
    director: Option<&str>,
    year: Option<i32>,
    poster_url: Option<&str>,
) -> Result<Movie> {
    let id = MovieId::new();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO movies (id, user_id, name, director, year, poster_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            id.to_string(),
            user_id.to_string(),
            name,
            director,
            year,
            poster_url,
            created_at
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Movie {
        id,
        user_id,
        name: name.to_string(),
        director: director.map(str::to_string),
        year,
        poster_url: poster_url.map(str::to_string),
        created_at,
    })
}

/// Get a movie by primary key.
pub fn get_movie(conn: &Connection, id: MovieId) -> Result<Option<Movie>> {
    let q = format!("SELECT {COLS} FROM movies WHERE id = ?1");
    let result = conn.query_row(&q, [id.to_string()], Movie::from_row);
    match result {
        Ok(m) => Ok(Some(m)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all movies belonging to `user_id`.
///
/// Returns an empty vec when the user has no movies or does not exist;
/// existence checks are the caller's responsibility.
pub fn list_movies_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Movie>> {
    let q = format!("SELECT {COLS} FROM movies WHERE user_id = ?1");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([user_id.to_string()], Movie::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Replace a movie's title. Returns the updated movie, or `None` if no
/// movie with that ID exists.
pub fn update_movie(conn: &Connection, id: MovieId, new_title: &str) -> Result<Option<Movie>> {
    let n = conn
        .execute(
            "UPDATE movies SET name = ?1 WHERE id = ?2",
            rusqlite::params![new_title, id.to_string()],
        )
        .map_err(|e| Error::database(e.to_string()))?;

    if n == 0 {
        return Ok(None);
    }
    get_movie(conn, id)
}

/// Delete a movie by ID. Returns true if a row was deleted.
pub fn delete_movie(conn: &Connection, id: MovieId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM movies WHERE id = ?1", [id.to_string()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use crate::queries::users;

    fn setup() -> (crate::pool::PooledConnection, UserId) {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let user = users::create_user(&conn, "collector").unwrap();
        (conn, user.id)
    }

    #[test]
    fn add_and_get() {
        let (conn, uid) = setup();
        let m = add_movie(
            &conn,
            uid,
            "Inception",
            Some("Christopher Nolan"),
            Some(2010),
            Some("https://example.com/inception.jpg"),
        )
        .unwrap();
        assert_eq!(m.name, "Inception");
        assert_eq!(m.year, Some(2010));

        let found = get_movie(&conn, m.id).unwrap().unwrap();
        assert_eq!(found.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(found.user_id, uid);
    }

    #[test]
    fn add_without_metadata() {
        let (conn, uid) = setup();
        let m = add_movie(&conn, uid, "Obscure Film", None, None, None).unwrap();
        let found = get_movie(&conn, m.id).unwrap().unwrap();
        assert!(found.director.is_none());
        assert!(found.year.is_none());
        assert!(found.poster_url.is_none());
    }

    #[test]
    fn add_with_dangling_user_is_a_store_fault() {
        let (conn, _uid) = setup();
        let result = add_movie(&conn, UserId::new(), "Ghost", None, None, None);
        assert!(matches!(result, Err(Error::Database { .. })));
    }

    #[test]
    fn list_tracks_adds_and_deletes() {
        let (conn, uid) = setup();
        assert!(list_movies_for_user(&conn, uid).unwrap().is_empty());

        let a = add_movie(&conn, uid, "A", None, None, None).unwrap();
        let b = add_movie(&conn, uid, "B", None, None, None).unwrap();
        assert_eq!(list_movies_for_user(&conn, uid).unwrap().len(), 2);

        delete_movie(&conn, a.id).unwrap();
        let remaining = list_movies_for_user(&conn, uid).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn list_for_unknown_user_is_empty() {
        let (conn, _uid) = setup();
        assert!(list_movies_for_user(&conn, UserId::new()).unwrap().is_empty());
    }

    #[test]
    fn update_replaces_title_only() {
        let (conn, uid) = setup();
        let m = add_movie(&conn, uid, "Inception", Some("Nolan"), Some(2010), None).unwrap();

        let updated = update_movie(&conn, m.id, "Inception (2010)").unwrap().unwrap();
        assert_eq!(updated.name, "Inception (2010)");
        // Other fields untouched.
        assert_eq!(updated.director.as_deref(), Some("Nolan"));
        assert_eq!(updated.year, Some(2010));
    }

    #[test]
    fn update_missing_is_none_and_leaves_store_unchanged() {
        let (conn, uid) = setup();
        let m = add_movie(&conn, uid, "Keep", None, None, None).unwrap();

        assert!(update_movie(&conn, MovieId::new(), "nope").unwrap().is_none());

        let unchanged = get_movie(&conn, m.id).unwrap().unwrap();
        assert_eq!(unchanged.name, "Keep");
    }

    #[test]
    fn delete_is_idempotent_in_effect() {
        let (conn, uid) = setup();
        let m = add_movie(&conn, uid, "Gone", None, None, None).unwrap();
        assert!(delete_movie(&conn, m.id).unwrap());
        assert!(!delete_movie(&conn, m.id).unwrap());
        assert!(get_movie(&conn, m.id).unwrap().is_none());
    }

    #[test]
    fn deleting_user_cascades_to_movies() {
        let (conn, uid) = setup();
        let a = add_movie(&conn, uid, "First", None, None, None).unwrap();
        let b = add_movie(&conn, uid, "Second", None, None, None).unwrap();

        assert!(users::delete_user(&conn, uid).unwrap());

        assert!(list_movies_for_user(&conn, uid).unwrap().is_empty());
        assert!(get_movie(&conn, a.id).unwrap().is_none());
        assert!(get_movie(&conn, b.id).unwrap().is_none());
    }
}
