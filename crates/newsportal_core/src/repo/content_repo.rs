//! Content repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Create, read and save accounts, authors, posts, comments and categories.
//! - Answer the two aggregate reads reputation needs: posts by author and
//!   comments by account.
//! - Run delete cascades explicitly inside one transaction.
//!
//! # Invariants
//! - `save_*` overwrites the full stored state of one existing row and fails
//!   with `NotFound` when the row is gone.
//! - `in_write_transaction` holds the SQLite write lock for the whole unit of
//!   work, so read-modify-save sequences cannot interleave across
//!   connections.
//! - Cascade order: post -> links, comments, post; author -> every post,
//!   author; account -> own comments, author, account.

use crate::db::DbError;
use crate::model::author::{Account, AccountId, Author, AuthorId};
use crate::model::category::{Category, CategoryId};
use crate::model::comment::{Comment, CommentId};
use crate::model::post::{Post, PostId, PostKind};
use crate::model::rating::Rating;
use crate::model::validation::ValidationError;
use crate::repo::schema::ensure_connection_ready;
use log::{debug, info};
use rusqlite::{ffi, params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ACCOUNT_SELECT_SQL: &str = "SELECT id, username FROM accounts";
const AUTHOR_SELECT_SQL: &str = "SELECT id, account_id, reputation_score FROM authors";
const CATEGORY_SELECT_SQL: &str = "SELECT id, name FROM categories";
const POST_SELECT_SQL: &str = "SELECT
    id,
    author_id,
    kind,
    title,
    body,
    rating,
    created_at
FROM posts";
const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    post_id,
    account_id,
    body,
    rating,
    created_at
FROM comments";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record families stored by the content repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Account,
    Author,
    Category,
    Post,
    Comment,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Author => "author",
            Self::Category => "category",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    fn table(self) -> &'static str {
        match self {
            Self::Account => "accounts",
            Self::Author => "authors",
            Self::Category => "categories",
            Self::Post => "posts",
            Self::Comment => "comments",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error for portal persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed field validation before any SQL ran.
    Validation(ValidationError),
    /// SQLite rejected the operation (connectivity, constraint, I/O).
    Db(DbError),
    /// Referenced row does not exist.
    NotFound { kind: EntityKind, id: Uuid },
    /// Insert collides with a unique key (username, category name, author
    /// per account, link pair).
    Conflict(String),
    /// Connection schema is not at the migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be mapped onto a record.
    InvalidData(String),
}

impl RepoError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rows removed by one cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub accounts: usize,
    pub authors: usize,
    pub categories: usize,
    pub posts: usize,
    pub comments: usize,
    pub post_categories: usize,
}

/// Data access contract for portal content.
pub trait ContentRepository {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId>;
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId>;
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    fn create_post(&self, post: &Post) -> RepoResult<PostId>;
    fn create_comment(&self, comment: &Comment) -> RepoResult<CommentId>;

    /// Links a post to a category. Linking twice is a `Conflict`.
    fn link_post_category(&self, post_id: PostId, category_id: CategoryId) -> RepoResult<()>;
    /// Removes one link; returns whether it existed.
    fn unlink_post_category(&self, post_id: PostId, category_id: CategoryId)
        -> RepoResult<bool>;
    fn categories_for_post(&self, post_id: PostId) -> RepoResult<Vec<Category>>;
    fn find_category_by_name(&self, name: &str) -> RepoResult<Option<Category>>;

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_author_by_account(&self, account_id: AccountId) -> RepoResult<Option<Author>>;
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// Posts written by `author_id`, oldest first.
    fn find_posts_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Post>>;
    /// Comments written by `account_id` on any post, oldest first.
    fn find_comments_by_account(&self, account_id: AccountId) -> RepoResult<Vec<Comment>>;
    /// Comments attached to `post_id`, oldest first.
    fn find_comments_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;

    fn save_post(&self, post: &Post) -> RepoResult<()>;
    fn save_comment(&self, comment: &Comment) -> RepoResult<()>;
    fn save_author(&self, author: &Author) -> RepoResult<()>;

    fn delete_post(&self, id: PostId) -> RepoResult<CascadeReport>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<CascadeReport>;
    fn delete_account(&self, id: AccountId) -> RepoResult<CascadeReport>;
    fn delete_category(&self, id: CategoryId) -> RepoResult<CascadeReport>;

    /// Runs `work` as one atomic unit holding the write lock.
    ///
    /// Any `Err` from `work` rolls back everything it wrote. Calls nested
    /// inside an open unit join it instead of starting a new one.
    fn in_write_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        Self: Sized,
        E: From<RepoError>,
        F: FnOnce(&Self) -> Result<T, E>;
}

/// SQLite-backed content repository over a migrated connection.
pub struct SqliteContentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentRepository<'conn> {
    /// Wraps a connection after checking it carries the current schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn ensure_exists(&self, kind: EntityKind, id: Uuid) -> RepoResult<()> {
        let exists: i64 = self.conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);",
                kind.table()
            ),
            [id.to_string()],
            |row| row.get(0),
        )?;
        if exists == 1 {
            Ok(())
        } else {
            Err(RepoError::not_found(kind, id))
        }
    }

    fn query_one<T>(
        &self,
        sql: &str,
        key: &str,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Option<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse(row)?)),
            None => Ok(None),
        }
    }

    fn query_list<T>(
        &self,
        sql: &str,
        key: Option<&str>,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match key {
            Some(key) => stmt.query([key])?,
            None => stmt.query([])?,
        };
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }

    /// Removes every post of `author_id` with its links and comments.
    fn purge_author_posts(&self, author_id: &str, report: &mut CascadeReport) -> RepoResult<()> {
        report.post_categories += self.conn.execute(
            "DELETE FROM post_categories
             WHERE post_id IN (SELECT id FROM posts WHERE author_id = ?1);",
            [author_id],
        )?;
        report.comments += self.conn.execute(
            "DELETE FROM comments
             WHERE post_id IN (SELECT id FROM posts WHERE author_id = ?1);",
            [author_id],
        )?;
        report.posts += self
            .conn
            .execute("DELETE FROM posts WHERE author_id = ?1;", [author_id])?;
        Ok(())
    }

    fn delete_author_row(&self, id: AuthorId, report: &mut CascadeReport) -> RepoResult<()> {
        let id_text = id.to_string();
        self.purge_author_posts(&id_text, report)?;
        let removed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [&id_text])?;
        if removed == 0 {
            return Err(RepoError::not_found(EntityKind::Author, id));
        }
        report.authors += removed;
        Ok(())
    }
}

impl ContentRepository for SqliteContentRepository<'_> {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        account.validate()?;
        self.conn
            .execute(
                "INSERT INTO accounts (id, username) VALUES (?1, ?2);",
                params![account.id.to_string(), account.username.as_str()],
            )
            .map_err(|err| {
                conflict_or_db(err, || {
                    format!("username `{}` is already taken", account.username)
                })
            })?;
        Ok(account.id)
    }

    fn create_author(&self, author: &Author) -> RepoResult<AuthorId> {
        self.ensure_exists(EntityKind::Account, author.account_id)?;
        self.conn
            .execute(
                "INSERT INTO authors (id, account_id, reputation_score) VALUES (?1, ?2, ?3);",
                params![
                    author.id.to_string(),
                    author.account_id.to_string(),
                    author.reputation_score
                ],
            )
            .map_err(|err| {
                conflict_or_db(err, || {
                    format!("account {} already has an author", author.account_id)
                })
            })?;
        Ok(author.id)
    }

    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        category.validate()?;
        self.conn
            .execute(
                "INSERT INTO categories (id, name) VALUES (?1, ?2);",
                params![category.id.to_string(), category.name.as_str()],
            )
            .map_err(|err| {
                conflict_or_db(err, || format!("category `{}` already exists", category.name))
            })?;
        Ok(category.id)
    }

    fn create_post(&self, post: &Post) -> RepoResult<PostId> {
        post.validate()?;
        self.ensure_exists(EntityKind::Author, post.author_id)?;
        self.conn.execute(
            "INSERT INTO posts (
                id,
                author_id,
                kind,
                title,
                body,
                rating,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                post.id.to_string(),
                post.author_id.to_string(),
                post.kind.code(),
                post.title.as_str(),
                post.body.as_str(),
                post.rating.value(),
                post.created_at,
            ],
        )?;
        Ok(post.id)
    }

    fn create_comment(&self, comment: &Comment) -> RepoResult<CommentId> {
        self.ensure_exists(EntityKind::Post, comment.post_id)?;
        self.ensure_exists(EntityKind::Account, comment.account_id)?;
        self.conn.execute(
            "INSERT INTO comments (
                id,
                post_id,
                account_id,
                body,
                rating,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                comment.id.to_string(),
                comment.post_id.to_string(),
                comment.account_id.to_string(),
                comment.body.as_str(),
                comment.rating.value(),
                comment.created_at,
            ],
        )?;
        Ok(comment.id)
    }

    fn link_post_category(&self, post_id: PostId, category_id: CategoryId) -> RepoResult<()> {
        self.ensure_exists(EntityKind::Post, post_id)?;
        self.ensure_exists(EntityKind::Category, category_id)?;
        self.conn
            .execute(
                "INSERT INTO post_categories (post_id, category_id) VALUES (?1, ?2);",
                params![post_id.to_string(), category_id.to_string()],
            )
            .map_err(|err| {
                conflict_or_db(err, || {
                    format!("post {post_id} is already in category {category_id}")
                })
            })?;
        Ok(())
    }

    fn unlink_post_category(
        &self,
        post_id: PostId,
        category_id: CategoryId,
    ) -> RepoResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM post_categories WHERE post_id = ?1 AND category_id = ?2;",
            params![post_id.to_string(), category_id.to_string()],
        )?;
        Ok(removed > 0)
    }

    fn categories_for_post(&self, post_id: PostId) -> RepoResult<Vec<Category>> {
        self.query_list(
            "SELECT c.id, c.name
             FROM post_categories pc
             INNER JOIN categories c ON c.id = pc.category_id
             WHERE pc.post_id = ?1
             ORDER BY c.name COLLATE NOCASE ASC;",
            Some(&post_id.to_string()),
            parse_category_row,
        )
    }

    fn find_category_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        // `name` is declared NOCASE, which folds ASCII letters only: "Sport"
        // matches "sport" but "Спорт" and "спорт" stay distinct.
        self.query_one(
            &format!("{CATEGORY_SELECT_SQL} WHERE name = ?1;"),
            name.trim(),
            parse_category_row,
        )
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        self.query_one(
            &format!("{ACCOUNT_SELECT_SQL} WHERE id = ?1;"),
            &id.to_string(),
            parse_account_row,
        )
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.query_one(
            &format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"),
            &id.to_string(),
            parse_author_row,
        )
    }

    fn find_author_by_account(&self, account_id: AccountId) -> RepoResult<Option<Author>> {
        self.query_one(
            &format!("{AUTHOR_SELECT_SQL} WHERE account_id = ?1;"),
            &account_id.to_string(),
            parse_author_row,
        )
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        self.query_list(
            &format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"),
            None,
            parse_author_row,
        )
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.query_one(
            &format!("{POST_SELECT_SQL} WHERE id = ?1;"),
            &id.to_string(),
            parse_post_row,
        )
    }

    fn get_comment(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        self.query_one(
            &format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"),
            &id.to_string(),
            parse_comment_row,
        )
    }

    fn find_posts_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Post>> {
        self.query_list(
            &format!("{POST_SELECT_SQL} WHERE author_id = ?1 ORDER BY created_at ASC, id ASC;"),
            Some(&author_id.to_string()),
            parse_post_row,
        )
    }

    fn find_comments_by_account(&self, account_id: AccountId) -> RepoResult<Vec<Comment>> {
        self.query_list(
            &format!(
                "{COMMENT_SELECT_SQL} WHERE account_id = ?1 ORDER BY created_at ASC, id ASC;"
            ),
            Some(&account_id.to_string()),
            parse_comment_row,
        )
    }

    fn find_comments_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.query_list(
            &format!("{COMMENT_SELECT_SQL} WHERE post_id = ?1 ORDER BY created_at ASC, id ASC;"),
            Some(&post_id.to_string()),
            parse_comment_row,
        )
    }

    fn save_post(&self, post: &Post) -> RepoResult<()> {
        post.validate()?;
        let changed = self.conn.execute(
            "UPDATE posts
             SET
                author_id = ?2,
                kind = ?3,
                title = ?4,
                body = ?5,
                rating = ?6,
                created_at = ?7
             WHERE id = ?1;",
            params![
                post.id.to_string(),
                post.author_id.to_string(),
                post.kind.code(),
                post.title.as_str(),
                post.body.as_str(),
                post.rating.value(),
                post.created_at,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Post, post.id));
        }
        Ok(())
    }

    fn save_comment(&self, comment: &Comment) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments
             SET
                post_id = ?2,
                account_id = ?3,
                body = ?4,
                rating = ?5,
                created_at = ?6
             WHERE id = ?1;",
            params![
                comment.id.to_string(),
                comment.post_id.to_string(),
                comment.account_id.to_string(),
                comment.body.as_str(),
                comment.rating.value(),
                comment.created_at,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Comment, comment.id));
        }
        Ok(())
    }

    fn save_author(&self, author: &Author) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE authors SET account_id = ?2, reputation_score = ?3 WHERE id = ?1;",
            params![
                author.id.to_string(),
                author.account_id.to_string(),
                author.reputation_score
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Author, author.id));
        }
        Ok(())
    }

    fn delete_post(&self, id: PostId) -> RepoResult<CascadeReport> {
        let report = self.in_write_transaction(|repo| -> RepoResult<CascadeReport> {
            let id_text = id.to_string();
            let mut report = CascadeReport {
                post_categories: repo
                    .conn
                    .execute("DELETE FROM post_categories WHERE post_id = ?1;", [&id_text])?,
                comments: repo
                    .conn
                    .execute("DELETE FROM comments WHERE post_id = ?1;", [&id_text])?,
                ..CascadeReport::default()
            };
            report.posts = repo
                .conn
                .execute("DELETE FROM posts WHERE id = ?1;", [&id_text])?;
            if report.posts == 0 {
                return Err(RepoError::not_found(EntityKind::Post, id));
            }
            Ok(report)
        })?;
        log_cascade(EntityKind::Post, id, &report);
        Ok(report)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<CascadeReport> {
        let report = self.in_write_transaction(|repo| -> RepoResult<CascadeReport> {
            let mut report = CascadeReport::default();
            repo.delete_author_row(id, &mut report)?;
            Ok(report)
        })?;
        log_cascade(EntityKind::Author, id, &report);
        Ok(report)
    }

    fn delete_account(&self, id: AccountId) -> RepoResult<CascadeReport> {
        let report = self.in_write_transaction(|repo| -> RepoResult<CascadeReport> {
            let id_text = id.to_string();
            let mut report = CascadeReport {
                comments: repo
                    .conn
                    .execute("DELETE FROM comments WHERE account_id = ?1;", [&id_text])?,
                ..CascadeReport::default()
            };
            if let Some(author) = repo.find_author_by_account(id)? {
                repo.delete_author_row(author.id, &mut report)?;
            }
            report.accounts = repo
                .conn
                .execute("DELETE FROM accounts WHERE id = ?1;", [&id_text])?;
            if report.accounts == 0 {
                return Err(RepoError::not_found(EntityKind::Account, id));
            }
            Ok(report)
        })?;
        log_cascade(EntityKind::Account, id, &report);
        Ok(report)
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<CascadeReport> {
        let report = self.in_write_transaction(|repo| -> RepoResult<CascadeReport> {
            let id_text = id.to_string();
            let mut report = CascadeReport {
                post_categories: repo.conn.execute(
                    "DELETE FROM post_categories WHERE category_id = ?1;",
                    [&id_text],
                )?,
                ..CascadeReport::default()
            };
            report.categories = repo
                .conn
                .execute("DELETE FROM categories WHERE id = ?1;", [&id_text])?;
            if report.categories == 0 {
                return Err(RepoError::not_found(EntityKind::Category, id));
            }
            Ok(report)
        })?;
        log_cascade(EntityKind::Category, id, &report);
        Ok(report)
    }

    fn in_write_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        Self: Sized,
        E: From<RepoError>,
        F: FnOnce(&Self) -> Result<T, E>,
    {
        if !self.conn.is_autocommit() {
            return work(self);
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        let value = work(self)?;
        tx.commit().map_err(RepoError::from)?;
        debug!("event=write_tx module=repo status=ok");
        Ok(value)
    }
}

fn log_cascade(kind: EntityKind, id: Uuid, report: &CascadeReport) {
    info!(
        "event=cascade_delete module=repo status=ok root={} id={} accounts={} authors={} posts={} comments={} post_categories={} categories={}",
        kind,
        id,
        report.accounts,
        report.authors,
        report.posts,
        report.comments,
        report.post_categories,
        report.categories
    );
}

fn conflict_or_db(err: rusqlite::Error, describe: impl FnOnce() -> String) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
            || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        {
            return RepoError::Conflict(describe());
        }
    }
    RepoError::from(err)
}

fn parse_uuid(row: &Row<'_>, column: &str, table: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    Ok(Account {
        id: parse_uuid(row, "id", "accounts")?,
        username: row.get("username")?,
    })
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    Ok(Author {
        id: parse_uuid(row, "id", "authors")?,
        account_id: parse_uuid(row, "account_id", "authors")?,
        reputation_score: row.get("reputation_score")?,
    })
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        id: parse_uuid(row, "id", "categories")?,
        name: row.get("name")?,
    })
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let kind_code: String = row.get("kind")?;
    let kind = PostKind::from_code(&kind_code).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid post kind `{kind_code}` in posts.kind"))
    })?;

    Ok(Post {
        id: parse_uuid(row, "id", "posts")?,
        author_id: parse_uuid(row, "author_id", "posts")?,
        kind,
        title: row.get("title")?,
        body: row.get("body")?,
        rating: Rating::new(row.get("rating")?),
        created_at: row.get("created_at")?,
    })
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    Ok(Comment {
        id: parse_uuid(row, "id", "comments")?,
        post_id: parse_uuid(row, "post_id", "comments")?,
        account_id: parse_uuid(row, "account_id", "comments")?,
        body: row.get("body")?,
        rating: Rating::new(row.get("rating")?),
        created_at: row.get("created_at")?,
    })
}
