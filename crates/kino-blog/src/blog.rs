//! Pool-backed entry point.
//!
//! [`Blog`] owns the connection pool. Every method checks out one connection,
//! runs a single operation on it and hands the connection back when it
//! returns, so callers never manage connection lifetimes themselves.

use kino_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings};
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::BlogError;
use crate::model::{
    Category, Comment, NewCategory, NewComment, NewPost, NewTag, NewUser, Post, Tag, User,
};
use crate::seed::SeedReport;
use crate::tagging::TaggingReport;
use crate::{queries, records, seed, tagging};

/// Handle to a blog database file.
#[derive(Clone)]
pub struct Blog {
    pool: DbPool,
}

impl Blog {
    /// Opens (creating if needed) the database at `db_path` and applies any
    /// pending schema migrations.
    pub fn open(db_path: &str, settings: DbRuntimeSettings) -> Result<Self, BlogError> {
        let pool = create_pool(db_path, settings)?;
        let blog = Self::from_pool(pool)?;
        Ok(blog)
    }

    /// Wraps an existing pool, applying pending migrations through it.
    pub fn from_pool(pool: DbPool) -> Result<Self, BlogError> {
        {
            let conn = pool.get()?;
            let applied = run_migrations(&conn)?;
            if applied > 0 {
                tracing::info!(count = applied, "applied database migrations");
            }
        }
        Ok(Self { pool })
    }

    /// The underlying pool, for callers that need raw connections.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, BlogError> {
        Ok(self.pool.get()?)
    }

    pub fn create_user(&self, params: &NewUser) -> Result<User, BlogError> {
        let conn = self.conn()?;
        records::create_user(&conn, params)
    }

    pub fn create_category(&self, params: &NewCategory) -> Result<Category, BlogError> {
        let conn = self.conn()?;
        records::create_category(&conn, params)
    }

    pub fn create_post(&self, params: &NewPost) -> Result<Post, BlogError> {
        let conn = self.conn()?;
        records::create_post(&conn, params)
    }

    pub fn create_comment(&self, params: &NewComment) -> Result<Comment, BlogError> {
        let conn = self.conn()?;
        records::create_comment(&conn, params)
    }

    pub fn create_tag(&self, params: &NewTag) -> Result<Tag, BlogError> {
        let conn = self.conn()?;
        records::create_tag(&conn, params)
    }

    pub fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, BlogError> {
        let conn = self.conn()?;
        records::get_tag_by_name(&conn, name)
    }

    pub fn post_tags(&self, post_id: i64) -> Result<Vec<Tag>, BlogError> {
        let conn = self.conn()?;
        records::post_tags(&conn, post_id)
    }

    pub fn is_empty(&self) -> Result<bool, BlogError> {
        let conn = self.conn()?;
        records::is_empty(&conn)
    }

    /// See [`seed::seed`].
    pub fn seed(&self) -> Result<SeedReport, BlogError> {
        let conn = self.conn()?;
        seed::seed(&conn)
    }

    /// See [`tagging::assign_tags`].
    pub fn assign_tags(&self) -> Result<TaggingReport, BlogError> {
        let conn = self.conn()?;
        tagging::assign_tags(&conn)
    }

    pub fn all_posts_by_author(&self, username: &str) -> Result<Vec<Post>, BlogError> {
        let conn = self.conn()?;
        queries::all_posts_by_author(&conn, username)
    }

    pub fn post_commentators(&self, title: &str) -> Result<Vec<User>, BlogError> {
        let conn = self.conn()?;
        queries::post_commentators(&conn, title)
    }

    pub fn number_of_posts_by_author(&self, username: &str) -> Result<i64, BlogError> {
        let conn = self.conn()?;
        queries::number_of_posts_by_author(&conn, username)
    }

    pub fn categories_of_posts_by_author(
        &self,
        username: &str,
    ) -> Result<Vec<Category>, BlogError> {
        let conn = self.conn()?;
        queries::categories_of_posts_by_author(&conn, username)
    }

    pub fn tag_posts(&self, name: &str) -> Result<Vec<Post>, BlogError> {
        let conn = self.conn()?;
        queries::tag_posts(&conn, name)
    }
}
