//! Read-only query helpers.
//!
//! Each helper filters a join of two or three tables by a single string
//! parameter. Results come back in the insertion order of the relation that
//! drives the join. Entity listings hold each entity once, at its first
//! match. Unknown names give an empty result rather than an error.

use rusqlite::{Connection, Params, Row};

use crate::error::BlogError;
use crate::model::{
    map_row_to_category, map_row_to_post, map_row_to_user, Category, Post, User,
    CATEGORY_COLUMNS, POST_COLUMNS, USER_COLUMNS,
};

/// Posts written by the user with the given username, oldest first.
pub fn all_posts_by_author(conn: &Connection, username: &str) -> Result<Vec<Post>, BlogError> {
    collect(
        conn,
        &format!(
            "SELECT {POST_COLUMNS}
             FROM post p
             JOIN \"user\" u ON u.id = p.author_id
             WHERE u.username = ?1
             ORDER BY p.id ASC"
        ),
        [username],
        map_row_to_post,
    )
}

/// Users who commented on posts with the given title, ordered by their first
/// comment there. A user who commented several times is listed once.
pub fn post_commentators(conn: &Connection, title: &str) -> Result<Vec<User>, BlogError> {
    collect(
        conn,
        &format!(
            "SELECT {USER_COLUMNS}
             FROM \"user\" u
             JOIN comment cm ON cm.user_id = u.id
             JOIN post p ON p.id = cm.post_id
             WHERE p.title = ?1
             GROUP BY u.id
             ORDER BY MIN(cm.id) ASC"
        ),
        [title],
        map_row_to_user,
    )
}

/// Number of posts written by the user with the given username.
pub fn number_of_posts_by_author(conn: &Connection, username: &str) -> Result<i64, BlogError> {
    let count = conn.query_row(
        "SELECT COUNT(*)
         FROM post p
         JOIN \"user\" u ON u.id = p.author_id
         WHERE u.username = ?1",
        [username],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Categories of the posts written by the given user, ordered by the first
/// post in each. A category shared by several posts is listed once.
pub fn categories_of_posts_by_author(
    conn: &Connection,
    username: &str,
) -> Result<Vec<Category>, BlogError> {
    collect(
        conn,
        &format!(
            "SELECT {CATEGORY_COLUMNS}
             FROM category c
             JOIN post p ON p.category_id = c.id
             JOIN \"user\" u ON u.id = p.author_id
             WHERE u.username = ?1
             GROUP BY c.id
             ORDER BY MIN(p.id) ASC"
        ),
        [username],
        map_row_to_category,
    )
}

/// Posts carrying the tag with the given name, oldest first.
pub fn tag_posts(conn: &Connection, name: &str) -> Result<Vec<Post>, BlogError> {
    collect(
        conn,
        &format!(
            "SELECT {POST_COLUMNS}
             FROM post p
             JOIN association_post_tag a ON a.post_id = p.id
             JOIN tag t ON t.id = a.tag_id
             WHERE t.name = ?1
             ORDER BY p.id ASC"
        ),
        [name],
        map_row_to_post,
    )
}

fn collect<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>, BlogError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map)?;
    let mut items = Vec::new();
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}
