//! Development database seeder
//!
//! Run with:
//! ```bash
//! cargo run -p social-seed
//! ```
//!
//! Applies migrations, then fills the database with active users, tagged
//! posts, comments and follower edges. Safe to re-run: existing accounts are
//! reused and duplicate follows are skipped.

mod data;

use anyhow::Context;
use tracing::{error, info, warn};

use social_common::{try_init_tracing_with_config, AppConfig, PasswordService, TracingConfig};
use social_core::{DomainError, Id, InvitationToken, NewUser, Storage};
use social_db::{create_pool, run_migrations, storage, RepositoryConfig};

use data::SeedPlan;

/// Password shared by every seeded account
const SEED_PASSWORD: &str = "Password123";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Seeding failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    let store = storage(pool, RepositoryConfig::from(&config.store));
    let plan = SeedPlan::default();
    info!(?plan, "Seeding database");

    seed(&store, plan, config.store.invitation_ttl()).await?;

    info!("Seed complete");
    Ok(())
}

async fn seed(store: &Storage, plan: SeedPlan, ttl: std::time::Duration) -> anyhow::Result<()> {
    let password_hash = PasswordService::new().hash(SEED_PASSWORD)?;

    let mut user_ids = Vec::with_capacity(plan.users);
    for new_user in data::users(plan.users, &password_hash) {
        user_ids.push(register(store, &new_user, ttl).await?);
    }
    info!(count = user_ids.len(), "Users ready");

    // The thread-local RNG is not Send, so generation happens before any await
    let drafts = data::posts(&mut rand::thread_rng(), plan.posts, &user_ids);
    let mut post_ids = Vec::with_capacity(drafts.len());
    for draft in &drafts {
        post_ids.push(store.posts.create(draft).await?.id);
    }
    info!(count = post_ids.len(), "Posts created");

    let comments = data::comments(&mut rand::thread_rng(), plan.comments, &post_ids, &user_ids);
    for comment in &comments {
        store.comments.create(comment).await?;
    }
    info!(count = comments.len(), "Comments created");

    let pairs = data::follows(&mut rand::thread_rng(), plan.follows, &user_ids);
    let mut follows = 0;
    for (follower, followed) in pairs {
        match store.followers.follow(follower, followed).await {
            Ok(_) => follows += 1,
            Err(DomainError::AlreadyFollowing) => {}
            Err(e) => return Err(e.into()),
        }
    }
    info!(count = follows, "Follower edges created");

    Ok(())
}

/// Invite and activate `new_user`, or reuse the account from an earlier run
async fn register(store: &Storage, new_user: &NewUser, ttl: std::time::Duration) -> anyhow::Result<Id> {
    let token = InvitationToken::generate();

    match store.users.create_and_invite(new_user, &token, ttl).await {
        Ok(_) => Ok(store.users.activate(&token).await?.id),
        Err(DomainError::DuplicateEmail | DomainError::DuplicateUsername) => {
            warn!(username = %new_user.username, "User already exists, reusing");
            let existing = store
                .users
                .get_by_email(&new_user.email)
                .await
                .with_context(|| format!("existing user {} is not active", new_user.username))?;
            Ok(existing.id)
        }
        Err(e) => Err(e.into()),
    }
}
