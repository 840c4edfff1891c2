//! The fixed demo dataset: two users, two categories, three posts, three
//! comments and the three genre tags.

use rusqlite::Connection;

use crate::error::BlogError;
use crate::model::{NewCategory, NewComment, NewPost, NewTag, NewUser};
use crate::records::{create_category, create_comment, create_post, create_tag, create_user};
use crate::savepoint::with_savepoint;
use crate::tagging::{FANTASY_TAG, MOVIE_TAG, THRILLER_TAG};

/// Row counts inserted by [`seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub categories: usize,
    pub posts: usize,
    pub comments: usize,
    pub tags: usize,
}

const USERS: &[(&str, &str)] = &[
    ("James Smith", "james.smith@gmail.com"),
    ("John Johnson", "john.johnson@gmail.com"),
];

const CATEGORIES: &[&str] = &["Fantasy", "Thriller"];

// (title, body, author index, category index)
const POSTS: &[(&str, &str, usize, usize)] = &[
    (
        "November",
        "Sophie Jacobs is going through the most difficult time of her life. Depression consumes \
         her to the very bones. Her unhealthy mind begins to hear the voice of a deceased person \
         during a recent shootout from an answering machine.",
        0,
        1,
    ),
    (
        "Edge of Tomorrow 2 gets a new script?",
        "It looks like Future's Edge moves like this: one step forward and two steps back. Back \
         in October, it was said that the script for the continuation of fantasy with Tom Cruise \
         was completed. Now Emily Blunt says an entirely new script is being written. This means \
         more delays.",
        0,
        0,
    ),
    (
        "88 minutes",
        "A forensic psychologist receives an unusual message. An unknown psychopath said that the \
         main character has only 88 minutes to live, and he is not bluffing.",
        1,
        1,
    ),
];

// (body, post index, user index)
const COMMENTS: &[(&str, usize, usize)] = &[
    ("Great movie", 2, 0),
    ("Very interesting film", 0, 1),
    ("This is one of my favorite movies", 2, 1),
];

const TAGS: &[&str] = &[MOVIE_TAG, FANTASY_TAG, THRILLER_TAG];

/// Inserts the demo dataset atomically.
///
/// Runs inside a savepoint, so it commits on its own when called on an idle
/// connection and joins the caller's transaction otherwise.
///
/// The tags are created but not attached; run
/// [`assign_tags`](crate::tagging::assign_tags) afterwards to link them.
///
/// # Errors
///
/// Returns [`BlogError::Database`] if any row already exists (unique
/// constraints on usernames, category and tag names). None of the dataset is
/// kept in that case.
pub fn seed(conn: &Connection) -> Result<SeedReport, BlogError> {
    with_savepoint(conn, "kino_seed", insert_dataset)?;

    let report = SeedReport {
        users: USERS.len(),
        categories: CATEGORIES.len(),
        posts: POSTS.len(),
        comments: COMMENTS.len(),
        tags: TAGS.len(),
    };
    tracing::info!(?report, "seeded demo dataset");
    Ok(report)
}

fn insert_dataset(conn: &Connection) -> Result<(), BlogError> {
    let mut user_ids = Vec::with_capacity(USERS.len());
    for (username, email) in USERS {
        let user = create_user(
            conn,
            &NewUser {
                username: (*username).to_string(),
                email: Some((*email).to_string()),
            },
        )?;
        user_ids.push(user.id);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = create_category(
            conn,
            &NewCategory {
                name: (*name).to_string(),
            },
        )?;
        category_ids.push(category.id);
    }

    let mut post_ids = Vec::with_capacity(POSTS.len());
    for (title, body, author, category) in POSTS {
        let post = create_post(
            conn,
            &NewPost {
                title: (*title).to_string(),
                body: (*body).to_string(),
                author_id: user_ids[*author],
                category_id: category_ids[*category],
            },
        )?;
        post_ids.push(post.id);
    }

    for (body, post, user) in COMMENTS {
        create_comment(
            conn,
            &NewComment {
                body: (*body).to_string(),
                post_id: post_ids[*post],
                user_id: user_ids[*user],
            },
        )?;
    }

    for name in TAGS {
        create_tag(
            conn,
            &NewTag {
                name: (*name).to_string(),
            },
        )?;
    }

    Ok(())
}
