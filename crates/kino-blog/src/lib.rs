//! A small movie blog on top of one embedded SQLite file.
//!
//! The schema (users, posts, categories, comments, tags) lives in
//! `kino-db`; this crate maps its rows to Rust types and provides:
//!
//! - record creation ([`create_user`], [`create_post`], ...),
//! - read-only query helpers such as [`all_posts_by_author`] and [`tag_posts`],
//! - the [`assign_tags`] batch job that links every post to its genre tags,
//! - the [`seed`] demo dataset,
//! - [`Blog`], which scopes one pooled connection per call.
//!
//! The free functions take a `&rusqlite::Connection` so they compose inside a
//! caller's transaction. [`seed`] and [`assign_tags`] use savepoints, which
//! commit on their own on an idle connection and nest inside an open one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kino_blog::Blog;
//! use kino_db::DbRuntimeSettings;
//!
//! let blog = Blog::open("kino-blog.db", DbRuntimeSettings::default())?;
//! if blog.is_empty()? {
//!     blog.seed()?;
//!     blog.assign_tags()?;
//! }
//! for post in blog.tag_posts("thriller")? {
//!     println!("{post}");
//! }
//! ```

mod blog;
mod error;
mod model;
mod queries;
mod records;
mod savepoint;
mod seed;
mod tagging;

pub use blog::Blog;
pub use error::BlogError;
pub use model::{
    Category, Comment, NewCategory, NewComment, NewPost, NewTag, NewUser, Post, PostWithCategory,
    Tag, User,
};
pub use queries::{
    all_posts_by_author, categories_of_posts_by_author, number_of_posts_by_author,
    post_commentators, tag_posts,
};
pub use records::{
    create_category, create_comment, create_post, create_tag, create_user, get_tag_by_name,
    is_empty, post_tags,
};
pub use seed::{seed, SeedReport};
pub use tagging::{assign_tags, TaggingReport, FANTASY_TAG, MOVIE_TAG, THRILLER_TAG};

#[cfg(test)]
mod tests;
