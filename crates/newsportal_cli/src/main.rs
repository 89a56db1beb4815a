//! Operator CLI for the news portal core.
//!
//! # Responsibility
//! - Resolve configuration (environment, then flags) and open the database.
//! - Map subcommands onto core services and print plain-text results.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use newsportal_core::db::open_db;
use newsportal_core::{
    init_logging_from_config, ContentService, PortalConfig, PostKind, PublishPostRequest,
    RatingService, ReputationService, SqliteContentRepository,
};
use rusqlite::Connection;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "newsportal", version, about = "News portal ratings and reputation")]
struct Cli {
    /// Database file (overrides NEWSPORTAL_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (overrides NEWSPORTAL_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute log directory (overrides NEWSPORTAL_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database and apply migrations.
    Init,
    /// Create a reader account.
    AddAccount { username: String },
    /// Promote an existing account to author.
    AddAuthor { account_id: Uuid },
    /// Create an account together with its author record.
    RegisterAuthor { username: String },
    AddCategory { name: String },
    /// Publish a post, creating unknown categories on the fly.
    AddPost {
        author_id: Uuid,
        title: String,
        body: String,
        /// Publish as news instead of an article.
        #[arg(long)]
        news: bool,
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    AddComment {
        post_id: Uuid,
        account_id: Uuid,
        body: String,
    },
    LikePost { id: Uuid },
    DislikePost { id: Uuid },
    LikeComment { id: Uuid },
    DislikeComment { id: Uuid },
    /// Recompute one author's reputation.
    Recompute { author_id: Uuid },
    /// Recompute every author's reputation.
    RecomputeAll,
    /// Show an author's cached reputation and posts.
    ShowAuthor { author_id: Uuid },
    /// Show a post preview with its categories and comments.
    ShowPost { post_id: Uuid },
    DeleteAuthor { id: Uuid },
    DeleteAccount { id: Uuid },
    DeletePost { id: Uuid },
    DeleteCategory { id: Uuid },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging_from_config(&config).map_err(|err| anyhow!(err))?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    info!(
        "event=cli_command module=cli status=start db_path={}",
        config.db_path.display()
    );
    run(&conn, cli.command)
}

fn resolve_config(cli: &Cli) -> Result<PortalConfig> {
    let mut config = PortalConfig::from_env().context("invalid environment configuration")?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level)?;
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir)?;
    }
    Ok(config)
}

fn repo(conn: &Connection) -> Result<SqliteContentRepository<'_>> {
    SqliteContentRepository::try_new(conn).context("database is not ready")
}

fn run(conn: &Connection, command: Command) -> Result<()> {
    match command {
        Command::Init => println!("database ready"),
        Command::AddAccount { username } => {
            let account = ContentService::new(repo(conn)?).create_account(username)?;
            println!("account {}", account.id);
        }
        Command::AddAuthor { account_id } => {
            let author = ContentService::new(repo(conn)?).create_author(account_id)?;
            println!("author {}", author.id);
        }
        Command::RegisterAuthor { username } => {
            let (account, author) = ContentService::new(repo(conn)?).register_author(username)?;
            println!("account {}", account.id);
            println!("author {}", author.id);
        }
        Command::AddCategory { name } => {
            let category = ContentService::new(repo(conn)?).create_category(&name)?;
            println!("category {}", category.id);
        }
        Command::AddPost {
            author_id,
            title,
            body,
            news,
            categories,
        } => {
            let kind = if news {
                PostKind::News
            } else {
                PostKind::Article
            };
            let post = ContentService::new(repo(conn)?).publish_post(&PublishPostRequest {
                author_id,
                kind,
                title,
                body,
                categories,
            })?;
            println!("post {}", post.id);
        }
        Command::AddComment {
            post_id,
            account_id,
            body,
        } => {
            let comment =
                ContentService::new(repo(conn)?).add_comment(post_id, account_id, body)?;
            println!("comment {}", comment.id);
        }
        Command::LikePost { id } => {
            println!("rating {}", RatingService::new(repo(conn)?).like_post(id)?);
        }
        Command::DislikePost { id } => {
            println!("rating {}", RatingService::new(repo(conn)?).dislike_post(id)?);
        }
        Command::LikeComment { id } => {
            println!("rating {}", RatingService::new(repo(conn)?).like_comment(id)?);
        }
        Command::DislikeComment { id } => {
            println!(
                "rating {}",
                RatingService::new(repo(conn)?).dislike_comment(id)?
            );
        }
        Command::Recompute { author_id } => {
            let breakdown = ReputationService::new(repo(conn)?).recompute_breakdown(author_id)?;
            println!(
                "reputation {} (posts={} post_sum={} comments={} comment_sum={})",
                breakdown.score,
                breakdown.post_count,
                breakdown.post_rating_sum,
                breakdown.comment_count,
                breakdown.comment_rating_sum
            );
        }
        Command::RecomputeAll => {
            for (author_id, score) in ReputationService::new(repo(conn)?).recompute_all()? {
                println!("{author_id} {score}");
            }
        }
        Command::ShowAuthor { author_id } => {
            let content = ContentService::new(repo(conn)?);
            let author = content.get_author(author_id)?;
            println!("author {} account {}", author.id, author.account_id);
            println!("reputation {} (cached)", author.reputation_score);
            for post in content.posts_by_author(author_id)? {
                println!(
                    "{} [{}] rating={} {}",
                    post.id,
                    post.kind.code(),
                    post.rating,
                    post.title
                );
            }
        }
        Command::ShowPost { post_id } => {
            let content = ContentService::new(repo(conn)?);
            println!("{}", content.post_preview(post_id)?);
            let categories: Vec<String> = content
                .categories_for_post(post_id)?
                .into_iter()
                .map(|category| category.name)
                .collect();
            println!("categories: {}", categories.join(", "));
            for comment in content.comments_on_post(post_id)? {
                println!(
                    "{} by {} rating={} {}",
                    comment.id, comment.account_id, comment.rating, comment.body
                );
            }
        }
        Command::DeleteAuthor { id } => {
            print_report(ContentService::new(repo(conn)?).delete_author(id)?);
        }
        Command::DeleteAccount { id } => {
            print_report(ContentService::new(repo(conn)?).delete_account(id)?);
        }
        Command::DeletePost { id } => {
            print_report(ContentService::new(repo(conn)?).delete_post(id)?);
        }
        Command::DeleteCategory { id } => {
            print_report(ContentService::new(repo(conn)?).delete_category(id)?);
        }
    }
    Ok(())
}

fn print_report(report: newsportal_core::CascadeReport) {
    println!(
        "deleted accounts={} authors={} posts={} comments={} post_categories={} categories={}",
        report.accounts,
        report.authors,
        report.posts,
        report.comments,
        report.post_categories,
        report.categories
    );
}
