//! Content management use-cases: registration, publishing, commenting,
//! categorisation and cascade deletes.
//!
//! # Invariants
//! - Every author is registered together with its backing account.
//! - Category names given when publishing are matched case-insensitively;
//!   unknown names are created on the fly.
//! - Multi-step writes run in one transaction.

use crate::model::author::{Account, AccountId, Author, AuthorId};
use crate::model::category::{Category, CategoryId};
use crate::model::comment::Comment;
use crate::model::post::{Post, PostId, PostKind};
use crate::repo::content_repo::{
    CascadeReport, ContentRepository, EntityKind, RepoError, RepoResult,
};
use log::info;

/// Input for publishing one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPostRequest {
    pub author_id: AuthorId,
    pub kind: PostKind,
    pub title: String,
    pub body: String,
    /// Category names; blank entries are skipped, duplicates collapse.
    pub categories: Vec<String>,
}

/// Content management facade over a repository.
pub struct ContentService<R: ContentRepository> {
    repo: R,
}

impl<R: ContentRepository> ContentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a plain account (a reader that may comment).
    pub fn create_account(&self, username: impl Into<String>) -> RepoResult<Account> {
        let username: String = username.into();
        let account = Account::new(username);
        self.repo.create_account(&account)?;
        Ok(account)
    }

    /// Promotes an existing account to author.
    pub fn create_author(&self, account_id: AccountId) -> RepoResult<Author> {
        let author = Author::new(account_id);
        self.repo.create_author(&author)?;
        info!(
            "event=author_create module=service status=ok author_id={} account_id={account_id}",
            author.id
        );
        Ok(author)
    }

    /// Creates an account and its author record together.
    pub fn register_author(&self, username: impl Into<String>) -> RepoResult<(Account, Author)> {
        let username: String = username.into();
        self.repo.in_write_transaction(|repo| -> RepoResult<(Account, Author)> {
            let account = Account::new(username);
            repo.create_account(&account)?;
            let author = Author::new(account.id);
            repo.create_author(&author)?;
            Ok((account, author))
        })
    }

    pub fn create_category(&self, name: &str) -> RepoResult<Category> {
        let category = Category::new(name);
        self.repo.create_category(&category)?;
        Ok(category)
    }

    /// Publishes a post and links it to the requested categories.
    pub fn publish_post(&self, request: &PublishPostRequest) -> RepoResult<Post> {
        self.repo.in_write_transaction(|repo| -> RepoResult<Post> {
            let post = Post::new(
                request.author_id,
                request.title.clone(),
                request.body.clone(),
            )
            .with_kind(request.kind);
            repo.create_post(&post)?;

            let mut linked: Vec<CategoryId> = Vec::new();
            for name in &request.categories {
                if name.trim().is_empty() {
                    continue;
                }
                let category = match repo.find_category_by_name(name)? {
                    Some(existing) => existing,
                    None => {
                        let created = Category::new(name);
                        repo.create_category(&created)?;
                        created
                    }
                };
                if linked.contains(&category.id) {
                    continue;
                }
                repo.link_post_category(post.id, category.id)?;
                linked.push(category.id);
            }

            info!(
                "event=post_publish module=service status=ok post_id={} author_id={} kind={} categories={}",
                post.id,
                post.author_id,
                post.kind.code(),
                linked.len()
            );
            Ok(post)
        })
    }

    /// Adds a comment from `account_id` to `post_id`.
    pub fn add_comment(
        &self,
        post_id: PostId,
        account_id: AccountId,
        body: impl Into<String>,
    ) -> RepoResult<Comment> {
        let comment = Comment::new(post_id, account_id, body);
        self.repo.create_comment(&comment)?;
        Ok(comment)
    }

    pub fn link_category(&self, post_id: PostId, category_id: CategoryId) -> RepoResult<()> {
        self.repo.link_post_category(post_id, category_id)
    }

    pub fn unlink_category(&self, post_id: PostId, category_id: CategoryId) -> RepoResult<bool> {
        self.repo.unlink_post_category(post_id, category_id)
    }

    pub fn categories_for_post(&self, post_id: PostId) -> RepoResult<Vec<Category>> {
        self.repo.categories_for_post(post_id)
    }

    pub fn get_author(&self, author_id: AuthorId) -> RepoResult<Author> {
        self.repo
            .get_author(author_id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Author, author_id))
    }

    pub fn posts_by_author(&self, author_id: AuthorId) -> RepoResult<Vec<Post>> {
        self.repo.find_posts_by_author(author_id)
    }

    pub fn comments_on_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        self.repo.find_comments_by_post(post_id)
    }

    /// Returns the preview text of one post.
    pub fn post_preview(&self, post_id: PostId) -> RepoResult<String> {
        self.repo
            .get_post(post_id)?
            .map(|post| post.preview())
            .ok_or_else(|| RepoError::not_found(EntityKind::Post, post_id))
    }

    pub fn delete_post(&self, post_id: PostId) -> RepoResult<CascadeReport> {
        self.repo.delete_post(post_id)
    }

    pub fn delete_author(&self, author_id: AuthorId) -> RepoResult<CascadeReport> {
        self.repo.delete_author(author_id)
    }

    pub fn delete_account(&self, account_id: AccountId) -> RepoResult<CascadeReport> {
        self.repo.delete_account(account_id)
    }

    pub fn delete_category(&self, category_id: CategoryId) -> RepoResult<CascadeReport> {
        self.repo.delete_category(category_id)
    }
}
