use newsportal_core::db::migrations::latest_version;
use newsportal_core::db::open_db_in_memory;
use newsportal_core::{
    Account, Author, Category, Comment, ContentRepository, ContentService, EntityKind, Post,
    PostKind, PublishPostRequest, Rating, RepoError, SqliteContentRepository, ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::try_new(&conn).unwrap();

    let account = Account::new("writer");
    repo.create_account(&account).unwrap();
    let author = Author::new(account.id);
    repo.create_author(&author).unwrap();
    let post = Post::new(author.id, "Title", "Body").with_kind(PostKind::News);
    repo.create_post(&post).unwrap();
    let comment = Comment::new(post.id, account.id, "first!");
    repo.create_comment(&comment).unwrap();

    assert_eq!(repo.get_account(account.id).unwrap(), Some(account.clone()));
    assert_eq!(repo.get_author(author.id).unwrap(), Some(author.clone()));
    assert_eq!(
        repo.find_author_by_account(account.id).unwrap(),
        Some(author.clone())
    );
    assert_eq!(repo.get_post(post.id).unwrap(), Some(post.clone()));
    assert_eq!(repo.get_comment(comment.id).unwrap(), Some(comment.clone()));
    assert_eq!(repo.find_posts_by_author(author.id).unwrap(), vec![post]);
    assert_eq!(
        repo.find_comments_by_account(account.id).unwrap(),
        vec![comment]
    );
}

#[test]
fn empty_lookups_return_empty_collections() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::try_new(&conn).unwrap();

    assert!(repo.find_posts_by_author(Uuid::new_v4()).unwrap().is_empty());
    assert!(repo
        .find_comments_by_account(Uuid::new_v4())
        .unwrap()
        .is_empty());
    assert!(repo.list_authors().unwrap().is_empty());
    assert!(repo.get_post(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn save_overwrites_full_state() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let (_, mut author) = content.register_author("writer").unwrap();
    let mut post = content
        .publish_post(&PublishPostRequest {
            author_id: author.id,
            kind: PostKind::Article,
            title: "Draft".to_string(),
            body: "Body".to_string(),
            categories: Vec::new(),
        })
        .unwrap();

    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    post.title = "Final".to_string();
    post.kind = PostKind::News;
    post.rating = Rating::new(-4);
    repo.save_post(&post).unwrap();
    assert_eq!(repo.get_post(post.id).unwrap(), Some(post));

    author.reputation_score = 42;
    repo.save_author(&author).unwrap();
    assert_eq!(repo.get_author(author.id).unwrap().unwrap().reputation_score, 42);
}

#[test]
fn save_of_missing_rows_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::try_new(&conn).unwrap();

    let post = Post::new(Uuid::new_v4(), "t", "b");
    assert!(matches!(
        repo.save_post(&post).unwrap_err(),
        RepoError::NotFound { kind: EntityKind::Post, id } if id == post.id
    ));
    let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "c");
    assert!(matches!(
        repo.save_comment(&comment).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Comment,
            ..
        }
    ));
    let author = Author::new(Uuid::new_v4());
    assert!(matches!(
        repo.save_author(&author).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Author,
            ..
        }
    ));
}

#[test]
fn create_requires_existing_parents() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::try_new(&conn).unwrap();

    let orphan_author = Author::new(Uuid::new_v4());
    assert!(matches!(
        repo.create_author(&orphan_author).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Account,
            ..
        }
    ));
    let orphan_post = Post::new(Uuid::new_v4(), "t", "b");
    assert!(matches!(
        repo.create_post(&orphan_post).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Author,
            ..
        }
    ));
    let orphan_comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "c");
    assert!(matches!(
        repo.create_comment(&orphan_comment).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Post,
            ..
        }
    ));
}

#[test]
fn unique_keys_surface_as_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let (account, author) = content.register_author("writer").unwrap();

    assert!(matches!(
        content.create_account("WRITER").unwrap_err(),
        RepoError::Conflict(_)
    ));
    assert!(matches!(
        content.create_author(account.id).unwrap_err(),
        RepoError::Conflict(_)
    ));

    let category = content.create_category("Culture").unwrap();
    assert!(matches!(
        content.create_category("culture").unwrap_err(),
        RepoError::Conflict(_)
    ));

    let post = content
        .publish_post(&PublishPostRequest {
            author_id: author.id,
            kind: PostKind::Article,
            title: "t".to_string(),
            body: "b".to_string(),
            categories: vec!["Culture".to_string()],
        })
        .unwrap();
    assert!(matches!(
        content.link_category(post.id, category.id).unwrap_err(),
        RepoError::Conflict(_)
    ));
}

#[test]
fn register_author_rolls_back_account_on_conflict() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    content.register_author("taken").unwrap();

    assert!(content.register_author("taken").is_err());
    let accounts: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(accounts, 1);
}

#[test]
fn validation_blocks_writes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContentRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.create_account(&Account::new("  ")).unwrap_err(),
        RepoError::Validation(ValidationError::BlankField("username"))
    ));
    assert!(matches!(
        repo.create_category(&Category::new("x".repeat(65))).unwrap_err(),
        RepoError::Validation(ValidationError::TooLong { max_chars: 64, .. })
    ));
    let long_title = Post::new(Uuid::new_v4(), "t".repeat(129), "b");
    assert!(matches!(
        repo.create_post(&long_title).unwrap_err(),
        RepoError::Validation(ValidationError::TooLong { max_chars: 128, .. })
    ));
}

#[test]
fn publish_reuses_categories_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let (_, author) = content.register_author("writer").unwrap();
    content.create_category("Economy").unwrap();

    let post = content
        .publish_post(&PublishPostRequest {
            author_id: author.id,
            kind: PostKind::News,
            title: "Markets".to_string(),
            body: "Body".to_string(),
            categories: vec![
                "economy".to_string(),
                "ECONOMY".to_string(),
                " ".to_string(),
                "World".to_string(),
            ],
        })
        .unwrap();

    let names: Vec<String> = content
        .categories_for_post(post.id)
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["Economy".to_string(), "World".to_string()]);

    let economy = SqliteContentRepository::try_new(&conn)
        .unwrap()
        .find_category_by_name("Economy")
        .unwrap()
        .unwrap();
    assert!(content.unlink_category(post.id, economy.id).unwrap());
    assert!(!content.unlink_category(post.id, economy.id).unwrap());
}

#[test]
fn non_ascii_category_names_compare_exactly() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    content.create_category("Спорт").unwrap();
    content.create_category("спорт").unwrap();

    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    assert_eq!(
        repo.find_category_by_name("Спорт").unwrap().unwrap().name,
        "Спорт"
    );
    assert_eq!(
        repo.find_category_by_name("спорт").unwrap().unwrap().name,
        "спорт"
    );
}

#[test]
fn account_username_is_trimmed_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let account = content.create_account("  bob ").unwrap();
    assert_eq!(account.username, "bob");

    let repo = SqliteContentRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_account(account.id).unwrap(), Some(account));
    assert!(matches!(
        content.create_account("bob").unwrap_err(),
        RepoError::Conflict(_)
    ));
}

#[test]
fn comments_on_post_lists_only_that_post() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let (account, author) = content.register_author("writer").unwrap();
    let publish = |title: &str| {
        content
            .publish_post(&PublishPostRequest {
                author_id: author.id,
                kind: PostKind::Article,
                title: title.to_string(),
                body: "Body".to_string(),
                categories: Vec::new(),
            })
            .unwrap()
    };
    let first = publish("First");
    let second = publish("Second");
    let reader = content.create_account("reader").unwrap();
    let on_first = content.add_comment(first.id, reader.id, "agree").unwrap();
    content.add_comment(second.id, account.id, "update").unwrap();

    let comments = content.comments_on_post(first.id).unwrap();
    assert_eq!(comments, vec![on_first]);
    assert!(content.comments_on_post(Uuid::new_v4()).unwrap().is_empty());
}

#[test]
fn post_preview_truncates_body() {
    let conn = open_db_in_memory().unwrap();
    let content = ContentService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let (_, author) = content.register_author("writer").unwrap();
    let post = content
        .publish_post(&PublishPostRequest {
            author_id: author.id,
            kind: PostKind::Article,
            title: "Long read".to_string(),
            body: "a".repeat(500),
            categories: Vec::new(),
        })
        .unwrap();

    let preview = content.post_preview(post.id).unwrap();
    assert_eq!(preview, format!("{}...", "a".repeat(123)));
    assert!(matches!(
        content.post_preview(Uuid::new_v4()).unwrap_err(),
        RepoError::NotFound {
            kind: EntityKind::Post,
            ..
        }
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteContentRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tables() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteContentRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("accounts"))
    ));
}
