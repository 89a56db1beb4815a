use newsportal_core::db::{open_db, open_db_in_memory};
use newsportal_core::{
    ContentRepository, ContentService, EntityKind, Post, PostKind, PublishPostRequest, Rating,
    RatingService, RatingServiceError, SqliteContentRepository,
};
use rusqlite::Connection;
use std::thread;
use uuid::Uuid;

fn seed_post(conn: &Connection) -> Post {
    let content = ContentService::new(SqliteContentRepository::try_new(conn).unwrap());
    let (_, author) = content.register_author("writer").unwrap();
    content
        .publish_post(&PublishPostRequest {
            author_id: author.id,
            kind: PostKind::News,
            title: "Headline".to_string(),
            body: "Body".to_string(),
            categories: Vec::new(),
        })
        .unwrap()
}

#[test]
fn like_then_dislike_restores_post_rating() {
    let conn = open_db_in_memory().unwrap();
    let post = seed_post(&conn);
    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    let service = RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());

    let before = repo.get_post(post.id).unwrap().unwrap().rating;
    assert_eq!(service.like_post(post.id).unwrap(), 1);
    assert_eq!(service.dislike_post(post.id).unwrap(), 0);
    assert_eq!(repo.get_post(post.id).unwrap().unwrap().rating, before);
}

#[test]
fn repeated_likes_keep_increasing_and_dislikes_go_negative() {
    let conn = open_db_in_memory().unwrap();
    let post = seed_post(&conn);
    let service = RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());

    for expected in 1..=3 {
        assert_eq!(service.like_post(post.id).unwrap(), expected);
    }
    for expected in [2, 1, 0, -1] {
        assert_eq!(service.dislike_post(post.id).unwrap(), expected);
    }
}

#[test]
fn comment_counters_are_independent_of_post_counters() {
    let conn = open_db_in_memory().unwrap();
    let post = seed_post(&conn);
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let reader = content.create_account("reader").unwrap();
    let comment = content.add_comment(post.id, reader.id, "nice").unwrap();

    let service = RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());
    assert_eq!(service.like_comment(comment.id).unwrap(), 1);
    assert_eq!(service.like_comment(comment.id).unwrap(), 2);
    assert_eq!(service.dislike_comment(comment.id).unwrap(), 1);

    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_comment(comment.id).unwrap().unwrap().rating.value(), 1);
    assert_eq!(repo.get_post(post.id).unwrap().unwrap().rating.value(), 0);
}

#[test]
fn liking_missing_units_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    let err = service.like_post(missing).unwrap_err();
    assert!(matches!(
        err,
        RatingServiceError::NotFound { kind: EntityKind::Post, id } if id == missing
    ));
    let err = service.dislike_comment(missing).unwrap_err();
    assert!(matches!(
        err,
        RatingServiceError::NotFound {
            kind: EntityKind::Comment,
            ..
        }
    ));
}

#[test]
fn rating_at_upper_bound_fails_and_keeps_stored_value() {
    let conn = open_db_in_memory().unwrap();
    let mut post = seed_post(&conn);
    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    post.rating = Rating::new(i16::MAX);
    repo.save_post(&post).unwrap();

    let service = RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let err = service.like_post(post.id).unwrap_err();
    assert!(matches!(err, RatingServiceError::OutOfRange(_)));
    assert_eq!(
        repo.get_post(post.id).unwrap().unwrap().rating.value(),
        i16::MAX
    );
    assert_eq!(service.dislike_post(post.id).unwrap(), i16::MAX - 1);
}

#[test]
fn concurrent_likes_do_not_lose_updates() {
    const THREADS: usize = 8;
    const LIKES_PER_THREAD: usize = 10;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.db");
    let post_id = {
        let conn = open_db(&path).unwrap();
        seed_post(&conn).id
    };

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let service =
                    RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());
                for _ in 0..LIKES_PER_THREAD {
                    service.like_post(post_id).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    let rating = repo.get_post(post_id).unwrap().unwrap().rating.value();
    assert_eq!(rating as usize, THREADS * LIKES_PER_THREAD);
}

#[test]
fn rejected_save_surfaces_repo_error_and_rolls_back() {
    let conn = open_db_in_memory().unwrap();
    let post = seed_post(&conn);
    conn.execute_batch(
        "CREATE TRIGGER freeze_posts BEFORE UPDATE ON posts
         BEGIN SELECT RAISE(ABORT, 'posts are frozen'); END;",
    )
    .unwrap();

    let service = RatingService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let err = service.like_post(post.id).unwrap_err();
    assert!(matches!(err, RatingServiceError::Repo(_)));
    assert!(err.to_string().contains("posts are frozen"));
    assert!(conn.is_autocommit());

    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_post(post.id).unwrap().unwrap().rating.value(), 0);
}
