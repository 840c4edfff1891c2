//! Batch job that attaches genre tags to every post.
//!
//! Each post receives the `movie` tag plus either `fantasy` or `thriller`,
//! chosen by whether its category name contains "fantasy" (case-insensitive).
//! The job writes all links atomically and can be re-run safely:
//! links that already exist are left alone.

use rusqlite::{params, Connection};

use crate::error::BlogError;
use crate::model::{
    map_row_to_post_with_category, PostWithCategory, Tag, CATEGORY_COLUMNS, POST_COLUMNS,
};
use crate::records::get_tag_by_name;
use crate::savepoint::with_savepoint;

/// Tag attached to every post.
pub const MOVIE_TAG: &str = "movie";
/// Tag for posts in a fantasy category.
pub const FANTASY_TAG: &str = "fantasy";
/// Tag for every other post.
pub const THRILLER_TAG: &str = "thriller";

/// Outcome of a tag-assignment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaggingReport {
    /// Posts visited.
    pub posts: usize,
    /// Association rows inserted by this run.
    pub links_added: usize,
}

/// Attaches the genre tags to every post.
///
/// Tags and posts are read and the links written inside one savepoint, so
/// the job sees a single snapshot and commits once. Called inside a caller's
/// transaction it joins that transaction instead.
///
/// # Errors
///
/// Returns [`BlogError::TagNotFound`] before touching any row if one of the
/// three tags has not been created, and [`BlogError::Database`] on SQL
/// failure. No links are kept in either case.
pub fn assign_tags(conn: &Connection) -> Result<TaggingReport, BlogError> {
    let report = with_savepoint(conn, "kino_assign_tags", link_genre_tags)?;

    tracing::info!(
        posts = report.posts,
        links_added = report.links_added,
        "tag assignment finished"
    );

    Ok(report)
}

fn link_genre_tags(conn: &Connection) -> Result<TaggingReport, BlogError> {
    let movie = require_tag(conn, MOVIE_TAG)?;
    let fantasy = require_tag(conn, FANTASY_TAG)?;
    let thriller = require_tag(conn, THRILLER_TAG)?;

    let posts = posts_with_category(conn)?;
    let mut report = TaggingReport {
        posts: posts.len(),
        links_added: 0,
    };

    let mut link = conn.prepare(
        "INSERT OR IGNORE INTO association_post_tag (post_id, tag_id) VALUES (?1, ?2)",
    )?;

    for entry in &posts {
        let genre = if is_fantasy(&entry.category.name, &fantasy.name) {
            &fantasy
        } else {
            &thriller
        };

        for tag in [&movie, genre] {
            report.links_added += link.execute(params![entry.post.id, tag.id])?;
        }

        tracing::debug!(
            post_id = entry.post.id,
            category = %entry.category.name,
            genre = %genre.name,
            "tagged post"
        );
    }

    Ok(report)
}

fn require_tag(conn: &Connection, name: &str) -> Result<Tag, BlogError> {
    get_tag_by_name(conn, name)?.ok_or_else(|| BlogError::TagNotFound(name.to_string()))
}

/// Loads every post with its category in a single joined query.
fn posts_with_category(conn: &Connection) -> Result<Vec<PostWithCategory>, BlogError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS}, {CATEGORY_COLUMNS}
         FROM post p
         JOIN category c ON c.id = p.category_id
         ORDER BY p.id ASC"
    ))?;

    let rows = stmt.query_map([], map_row_to_post_with_category)?;
    let mut posts = Vec::new();
    for row in rows {
        posts.push(row?);
    }
    Ok(posts)
}

fn is_fantasy(category_name: &str, fantasy_tag: &str) -> bool {
    category_name.to_lowercase().contains(fantasy_tag)
}
