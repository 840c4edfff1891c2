//! Row types for the blog schema and the parameters used to create them.
//!
//! Each entity displays as its human-facing label (username, title, name or
//! comment body), which is what listings and assertions compare against.

use std::fmt;

use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A registered user. Authors posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal database ID.
    pub id: i64,
    /// Unique display name.
    pub username: String,
    /// Optional contact address.
    pub email: Option<String>,
}

/// A blog post. Always belongs to one author and one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Internal database ID.
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Insertion timestamp assigned by the database (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub created_at: String,
    pub author_id: i64,
    pub category_id: i64,
}

/// A post category such as "Fantasy". Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A comment left by a user on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub post_id: i64,
    pub user_id: i64,
}

/// A free-form label attached to posts through `association_post_tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A post together with its eagerly loaded category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithCategory {
    pub post: Post,
    pub category: Category,
}

/// Parameters for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
}

/// Parameters for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// Parameters for creating a post. `created_at` is filled in by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub category_id: i64,
}

/// Parameters for creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
    pub post_id: i64,
    pub user_id: i64,
}

/// Parameters for creating a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Column list matching [`map_row_to_user`], qualified for use in joins.
pub(crate) const USER_COLUMNS: &str = "u.id, u.username, u.email";
/// Column list matching [`map_row_to_post`].
pub(crate) const POST_COLUMNS: &str =
    "p.id, p.title, p.body, p.created_at, p.author_id, p.category_id";
/// Column list matching [`map_row_to_category`].
pub(crate) const CATEGORY_COLUMNS: &str = "c.id, c.name";

pub(crate) fn map_row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
    })
}

pub(crate) fn map_row_to_post(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
        author_id: row.get(4)?,
        category_id: row.get(5)?,
    })
}

pub(crate) fn map_row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn map_row_to_comment(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        body: row.get(1)?,
        post_id: row.get(2)?,
        user_id: row.get(3)?,
    })
}

pub(crate) fn map_row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Maps `POST_COLUMNS` followed by `CATEGORY_COLUMNS`.
pub(crate) fn map_row_to_post_with_category(row: &Row) -> rusqlite::Result<PostWithCategory> {
    Ok(PostWithCategory {
        post: map_row_to_post(row)?,
        category: Category {
            id: row.get(6)?,
            name: row.get(7)?,
        },
    })
}
