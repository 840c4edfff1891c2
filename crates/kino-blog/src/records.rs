//! Record creation and single-row lookups.
//!
//! Every `create_*` function inserts exactly one row and returns it as the
//! database stored it, so defaults such as `post.created_at` are populated.
//! Constraint violations (duplicate names, dangling foreign keys, oversized
//! fields) surface as [`BlogError::Database`].

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::BlogError;
use crate::model::{
    map_row_to_category, map_row_to_comment, map_row_to_post, map_row_to_tag, map_row_to_user,
    Category, Comment, NewCategory, NewComment, NewPost, NewTag, NewUser, Post, Tag, User,
};

/// Creates a new user.
pub fn create_user(conn: &Connection, params: &NewUser) -> Result<User, BlogError> {
    let user = conn.query_row(
        "INSERT INTO \"user\" (username, email) VALUES (?1, ?2)
         RETURNING id, username, email",
        params![params.username, params.email],
        map_row_to_user,
    )?;
    tracing::debug!(user_id = user.id, username = %user.username, "created user");
    Ok(user)
}

/// Creates a new category.
pub fn create_category(conn: &Connection, params: &NewCategory) -> Result<Category, BlogError> {
    let category = conn.query_row(
        "INSERT INTO category (name) VALUES (?1) RETURNING id, name",
        [&params.name],
        map_row_to_category,
    )?;
    tracing::debug!(category_id = category.id, name = %category.name, "created category");
    Ok(category)
}

/// Creates a new post. The author and category must already exist.
pub fn create_post(conn: &Connection, params: &NewPost) -> Result<Post, BlogError> {
    let post = conn.query_row(
        "INSERT INTO post (title, body, author_id, category_id) VALUES (?1, ?2, ?3, ?4)
         RETURNING id, title, body, created_at, author_id, category_id",
        params![
            params.title,
            params.body,
            params.author_id,
            params.category_id,
        ],
        map_row_to_post,
    )?;
    tracing::debug!(post_id = post.id, title = %post.title, "created post");
    Ok(post)
}

/// Creates a new comment on an existing post.
pub fn create_comment(conn: &Connection, params: &NewComment) -> Result<Comment, BlogError> {
    let comment = conn.query_row(
        "INSERT INTO comment (body, post_id, user_id) VALUES (?1, ?2, ?3)
         RETURNING id, body, post_id, user_id",
        params![params.body, params.post_id, params.user_id],
        map_row_to_comment,
    )?;
    tracing::debug!(
        comment_id = comment.id,
        post_id = comment.post_id,
        "created comment"
    );
    Ok(comment)
}

/// Creates a new tag.
pub fn create_tag(conn: &Connection, params: &NewTag) -> Result<Tag, BlogError> {
    let tag = conn.query_row(
        "INSERT INTO tag (name) VALUES (?1) RETURNING id, name",
        [&params.name],
        map_row_to_tag,
    )?;
    tracing::debug!(tag_id = tag.id, name = %tag.name, "created tag");
    Ok(tag)
}

/// Looks up a tag by its exact name. Returns `None` when it does not exist.
pub fn get_tag_by_name(conn: &Connection, name: &str) -> Result<Option<Tag>, BlogError> {
    let tag = conn
        .query_row("SELECT id, name FROM tag WHERE name = ?1", [name], map_row_to_tag)
        .optional()?;
    Ok(tag)
}

/// Lists the tags attached to a post, in the order they were attached.
pub fn post_tags(conn: &Connection, post_id: i64) -> Result<Vec<Tag>, BlogError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name
         FROM tag t
         JOIN association_post_tag a ON a.tag_id = t.id
         WHERE a.post_id = ?1
         ORDER BY a.rowid ASC",
    )?;

    let rows = stmt.query_map([post_id], map_row_to_tag)?;
    let mut tags = Vec::new();
    for row in rows {
        tags.push(row?);
    }
    Ok(tags)
}

/// Returns `true` when no user, category or post has been created yet.
pub fn is_empty(conn: &Connection) -> Result<bool, BlogError> {
    let empty = conn.query_row(
        "SELECT NOT EXISTS(SELECT 1 FROM \"user\")
            AND NOT EXISTS(SELECT 1 FROM category)
            AND NOT EXISTS(SELECT 1 FROM post)",
        [],
        |row| row.get(0),
    )?;
    Ok(empty)
}
