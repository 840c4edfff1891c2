//! Unit tests for records, queries and the tag-assignment job.

use rusqlite::Connection;

use crate::error::BlogError;
use crate::model::{NewCategory, NewComment, NewPost, NewTag, NewUser};
use crate::queries::{
    all_posts_by_author, categories_of_posts_by_author, number_of_posts_by_author,
    post_commentators, tag_posts,
};
use crate::records::{
    create_category, create_comment, create_post, create_tag, create_user, get_tag_by_name,
    is_empty, post_tags,
};
use crate::seed::seed;
use crate::tagging::assign_tags;

/// Creates an in-memory SQLite database with migrations applied.
fn test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("should open in-memory db");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("should enable foreign keys");
    kino_db::run_migrations(&conn).expect("migrations should succeed");
    conn
}

/// Seeded database with tags assigned.
fn seeded_db() -> Connection {
    let conn = test_db();
    seed(&conn).expect("seed should succeed");
    assign_tags(&conn).expect("tag assignment should succeed");
    conn
}

fn labels<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.to_string(),
        email: None,
    }
}

// ── Record creation ──────────────────────────────────────────────────

#[test]
fn create_post_fills_defaults() {
    let conn = test_db();
    let author = create_user(&conn, &new_user("author")).expect("user");
    let category = create_category(
        &conn,
        &NewCategory {
            name: "Drama".to_string(),
        },
    )
    .expect("category");

    let post = create_post(
        &conn,
        &NewPost {
            title: "Title".to_string(),
            body: "Body".to_string(),
            author_id: author.id,
            category_id: category.id,
        },
    )
    .expect("post");

    assert!(post.id > 0);
    assert_eq!(post.author_id, author.id);
    assert_eq!(post.category_id, category.id);
    assert!(!post.created_at.is_empty(), "created_at is set by the database");
    assert_eq!(post.to_string(), "Title");
}

#[test]
fn duplicate_username_is_rejected() {
    let conn = test_db();
    create_user(&conn, &new_user("dup")).expect("first insert");

    let err = create_user(&conn, &new_user("dup")).expect_err("second insert should fail");
    assert!(matches!(err, BlogError::Database(_)), "got {err:?}");
}

#[test]
fn duplicate_tag_and_category_names_are_rejected() {
    let conn = test_db();
    let tag = NewTag {
        name: "movie".to_string(),
    };
    create_tag(&conn, &tag).expect("first tag");
    assert!(create_tag(&conn, &tag).is_err());

    let category = NewCategory {
        name: "Fantasy".to_string(),
    };
    create_category(&conn, &category).expect("first category");
    assert!(create_category(&conn, &category).is_err());
}

#[test]
fn post_requires_existing_author_and_category() {
    let conn = test_db();
    let result = create_post(
        &conn,
        &NewPost {
            title: "Orphan".to_string(),
            body: "No author".to_string(),
            author_id: 7,
            category_id: 7,
        },
    );
    assert!(matches!(result, Err(BlogError::Database(_))));
}

#[test]
fn comment_requires_existing_post() {
    let conn = test_db();
    let user = create_user(&conn, &new_user("reader")).expect("user");
    let result = create_comment(
        &conn,
        &NewComment {
            body: "Hello".to_string(),
            post_id: 99,
            user_id: user.id,
        },
    );
    assert!(result.is_err());
}

#[test]
fn get_tag_by_name_returns_none_when_missing() {
    let conn = test_db();
    assert_eq!(get_tag_by_name(&conn, "movie").expect("lookup"), None);

    let created = create_tag(
        &conn,
        &NewTag {
            name: "movie".to_string(),
        },
    )
    .expect("tag");
    assert_eq!(get_tag_by_name(&conn, "movie").expect("lookup"), Some(created));
}

#[test]
fn is_empty_tracks_seed() {
    let conn = test_db();
    assert!(is_empty(&conn).expect("is_empty"));
    seed(&conn).expect("seed");
    assert!(!is_empty(&conn).expect("is_empty"));
}

#[test]
fn seeding_twice_fails_without_partial_rows() {
    let conn = test_db();
    seed(&conn).expect("first seed");

    let err = seed(&conn).expect_err("second seed should hit unique constraints");
    assert!(matches!(err, BlogError::Database(_)));

    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"user\"", [], |row| row.get(0))
        .expect("count users");
    assert_eq!(users, 2);
}

// ── Query helpers ────────────────────────────────────────────────────

#[test]
fn all_posts_by_author_lists_posts_in_order() {
    let conn = seeded_db();
    let posts = all_posts_by_author(&conn, "James Smith").expect("query");
    assert_eq!(
        labels(&posts),
        vec!["November", "Edge of Tomorrow 2 gets a new script?"]
    );
}

#[test]
fn post_commentators_lists_users_in_comment_order() {
    let conn = seeded_db();
    let users = post_commentators(&conn, "88 minutes").expect("query");
    assert_eq!(labels(&users), vec!["James Smith", "John Johnson"]);
}

#[test]
fn post_commentators_lists_each_user_once() {
    let conn = seeded_db();
    let james = get_user_id(&conn, "James Smith");
    let john = get_user_id(&conn, "John Johnson");
    let post_id = get_post_id(&conn, "88 minutes");
    for (body, user_id) in [("Watched it again", john), ("Still great", james)] {
        create_comment(
            &conn,
            &NewComment {
                body: body.to_string(),
                post_id,
                user_id,
            },
        )
        .expect("comment");
    }

    let users = post_commentators(&conn, "88 minutes").expect("query");
    assert_eq!(labels(&users), vec!["James Smith", "John Johnson"]);
}

#[test]
fn number_of_posts_by_author_counts_posts() {
    let conn = seeded_db();
    assert_eq!(
        number_of_posts_by_author(&conn, "James Smith").expect("query"),
        2
    );
    assert_eq!(
        number_of_posts_by_author(&conn, "John Johnson").expect("query"),
        1
    );
}

#[test]
fn categories_of_posts_by_author_follows_post_order() {
    let conn = seeded_db();
    let categories = categories_of_posts_by_author(&conn, "James Smith").expect("query");
    assert_eq!(labels(&categories), vec!["Thriller", "Fantasy"]);
}

#[test]
fn categories_of_posts_by_author_lists_each_category_once() {
    let conn = seeded_db();
    let james = get_user_id(&conn, "James Smith");
    let thriller: i64 = conn
        .query_row("SELECT id FROM category WHERE name = 'Thriller'", [], |row| {
            row.get(0)
        })
        .expect("thriller category");
    create_post(
        &conn,
        &NewPost {
            title: "Se7en".to_string(),
            body: "Two detectives hunt a killer.".to_string(),
            author_id: james,
            category_id: thriller,
        },
    )
    .expect("post");

    let categories = categories_of_posts_by_author(&conn, "James Smith").expect("query");
    assert_eq!(labels(&categories), vec!["Thriller", "Fantasy"]);
    assert_eq!(
        number_of_posts_by_author(&conn, "James Smith").expect("query"),
        3,
        "the count still covers every post"
    );
}

#[test]
fn tag_posts_lists_tagged_posts() {
    let conn = seeded_db();
    assert_eq!(
        labels(&tag_posts(&conn, "thriller").expect("query")),
        vec!["November", "88 minutes"]
    );
    assert_eq!(
        labels(&tag_posts(&conn, "fantasy").expect("query")),
        vec!["Edge of Tomorrow 2 gets a new script?"]
    );
    assert_eq!(tag_posts(&conn, "movie").expect("query").len(), 3);
}

#[test]
fn unknown_names_give_empty_results() {
    let conn = seeded_db();
    assert!(all_posts_by_author(&conn, "Nobody").expect("query").is_empty());
    assert!(post_commentators(&conn, "No such post").expect("query").is_empty());
    assert_eq!(number_of_posts_by_author(&conn, "Nobody").expect("query"), 0);
    assert!(categories_of_posts_by_author(&conn, "Nobody")
        .expect("query")
        .is_empty());
    assert!(tag_posts(&conn, "comedy").expect("query").is_empty());
}

// ── Tag assignment ───────────────────────────────────────────────────

#[test]
fn assign_tags_links_movie_and_genre() {
    let conn = test_db();
    seed(&conn).expect("seed");

    let report = assign_tags(&conn).expect("assign");
    assert_eq!(report.posts, 3);
    assert_eq!(report.links_added, 6);

    let edge = get_post_id(&conn, "Edge of Tomorrow 2 gets a new script?");
    assert_eq!(
        labels(&post_tags(&conn, edge).expect("tags")),
        vec!["movie", "fantasy"]
    );

    let november = get_post_id(&conn, "November");
    assert_eq!(
        labels(&post_tags(&conn, november).expect("tags")),
        vec!["movie", "thriller"]
    );
}

#[test]
fn assign_tags_is_idempotent() {
    let conn = seeded_db();

    let report = assign_tags(&conn).expect("second run");
    assert_eq!(report.posts, 3);
    assert_eq!(report.links_added, 0);

    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM association_post_tag", [], |row| {
            row.get(0)
        })
        .expect("count links");
    assert_eq!(links, 6);
}

#[test]
fn assign_tags_fails_when_tag_missing() {
    let conn = test_db();
    let author = create_user(&conn, &new_user("author")).expect("user");
    let category = create_category(
        &conn,
        &NewCategory {
            name: "Horror".to_string(),
        },
    )
    .expect("category");
    create_post(
        &conn,
        &NewPost {
            title: "Untagged".to_string(),
            body: "Body".to_string(),
            author_id: author.id,
            category_id: category.id,
        },
    )
    .expect("post");
    create_tag(
        &conn,
        &NewTag {
            name: "movie".to_string(),
        },
    )
    .expect("tag");

    let err = assign_tags(&conn).expect_err("fantasy tag is missing");
    match err {
        BlogError::TagNotFound(name) => assert_eq!(name, "fantasy"),
        other => panic!("unexpected error: {other:?}"),
    }

    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM association_post_tag", [], |row| {
            row.get(0)
        })
        .expect("count links");
    assert_eq!(links, 0, "no links are written when a tag is missing");
}

#[test]
fn assign_tags_on_empty_blog_does_nothing() {
    let conn = test_db();
    for name in ["movie", "fantasy", "thriller"] {
        create_tag(
            &conn,
            &NewTag {
                name: name.to_string(),
            },
        )
        .expect("tag");
    }

    let report = assign_tags(&conn).expect("assign");
    assert_eq!(report.posts, 0);
    assert_eq!(report.links_added, 0);
}

// ── Transaction composition ──────────────────────────────────────────

#[test]
fn seed_joins_caller_transaction() {
    let conn = test_db();
    let tx = conn.unchecked_transaction().expect("begin");
    seed(&tx).expect("seed inside an open transaction");
    assert_eq!(
        number_of_posts_by_author(&tx, "James Smith").expect("query"),
        2
    );
    tx.rollback().expect("rollback");

    assert!(
        is_empty(&conn).expect("is_empty"),
        "caller rollback discards the seed"
    );
}

#[test]
fn failed_seed_keeps_caller_transaction_usable() {
    let conn = test_db();
    let tx = conn.unchecked_transaction().expect("begin");
    seed(&tx).expect("first seed");
    assert!(seed(&tx).is_err(), "second seed hits unique constraints");

    create_tag(
        &tx,
        &NewTag {
            name: "drama".to_string(),
        },
    )
    .expect("transaction still accepts writes");
    tx.commit().expect("commit");

    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM \"user\"", [], |row| row.get(0))
        .expect("count users");
    assert_eq!(users, 2);
    assert!(get_tag_by_name(&conn, "drama").expect("lookup").is_some());
}

#[test]
fn assign_tags_sees_uncommitted_posts_of_caller() {
    let conn = test_db();
    seed(&conn).expect("seed");

    let tx = conn.unchecked_transaction().expect("begin");
    let james = get_user_id(&tx, "James Smith");
    let post = create_post(
        &tx,
        &NewPost {
            title: "The Hobbit".to_string(),
            body: "An unexpected journey.".to_string(),
            author_id: james,
            category_id: 1,
        },
    )
    .expect("post");

    let report = assign_tags(&tx).expect("assign inside transaction");
    assert_eq!(report.posts, 4);
    assert_eq!(report.links_added, 8);
    tx.commit().expect("commit");

    assert_eq!(
        labels(&post_tags(&conn, post.id).expect("tags")),
        vec!["movie", "fantasy"]
    );
    assert!(conn.is_autocommit());
}

fn get_user_id(conn: &Connection, username: &str) -> i64 {
    conn.query_row(
        "SELECT id FROM \"user\" WHERE username = ?1",
        [username],
        |row| row.get(0),
    )
    .expect("user should exist")
}

fn get_post_id(conn: &Connection, title: &str) -> i64 {
    conn.query_row("SELECT id FROM post WHERE title = ?1", [title], |row| {
        row.get(0)
    })
    .expect("post should exist")
}
