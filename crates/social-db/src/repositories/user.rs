//! PostgreSQL implementation of UserRepository
//!
//! Registration, invitation and account removal. The multi-step workflows
//! each run in one scoped transaction; the statement helpers below take a
//! bare connection so they can be reused inside or outside a transaction.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, instrument};

use social_core::traits::{RepoResult, UserRepository};
use social_core::{DomainError, Id, Invitation, InvitationToken, NewUser, TokenHash, User};

use crate::config::RepositoryConfig;
use crate::deadline::with_deadline;
use crate::models::{InvitationModel, UserModel};
use crate::transaction::with_transaction;

use super::error::{
    map_db_error, map_invitation_insert_error, map_user_insert_error, role_not_found,
    user_not_found,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    config: RepositoryConfig,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool, config: RepositoryConfig) -> Self {
        Self { pool, config }
    }
}

/// Insert a user with its role resolved by name, returning the joined row
async fn insert_user(conn: &mut PgConnection, user: &NewUser) -> RepoResult<User> {
    let role = user.role_name();

    let result = sqlx::query_as::<_, UserModel>(
        r"
        WITH selected_role AS (
            SELECT id, name, level, description FROM roles WHERE name = $4
        ), inserted AS (
            INSERT INTO users (username, email, password_hash, role_id)
            SELECT $1, $2, $3, selected_role.id FROM selected_role
            RETURNING id, username, email, password_hash, created_at, is_active, role_id
        )
        SELECT i.id, i.username, i.email, i.password_hash, i.created_at, i.is_active,
               r.id AS role_id, r.name AS role_name, r.level AS role_level,
               r.description AS role_description
        FROM inserted i
        JOIN selected_role r ON r.id = i.role_id
        ",
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(role)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_user_insert_error)?;

    result.map(User::from).ok_or_else(|| role_not_found(role))
}

async fn insert_invitation(
    conn: &mut PgConnection,
    token_hash: &TokenHash,
    user_id: Id,
    expiry: DateTime<Utc>,
) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO user_invitations (token_hash, user_id, expiry)
        VALUES ($1, $2, $3)
        ",
    )
    .bind(token_hash.as_str())
    .bind(user_id.into_inner())
    .bind(expiry)
    .execute(&mut *conn)
    .await
    .map_err(map_invitation_insert_error)?;

    Ok(())
}

/// Look up an invitation and lock it together with its user
async fn find_invitation_for_update(
    conn: &mut PgConnection,
    token_hash: &TokenHash,
) -> RepoResult<Option<Invitation>> {
    let result = sqlx::query_as::<_, InvitationModel>(
        r"
        SELECT i.token_hash, i.user_id, i.expiry
        FROM user_invitations i
        JOIN users u ON u.id = i.user_id
        WHERE i.token_hash = $1
        FOR UPDATE
        ",
    )
    .bind(token_hash.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(Invitation::from))
}

async fn mark_active(conn: &mut PgConnection, user_id: Id) -> RepoResult<User> {
    let result = sqlx::query_as::<_, UserModel>(
        r"
        WITH updated AS (
            UPDATE users SET is_active = TRUE
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, is_active, role_id
        )
        SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.is_active,
               r.id AS role_id, r.name AS role_name, r.level AS role_level,
               r.description AS role_description
        FROM updated u
        JOIN roles r ON r.id = u.role_id
        ",
    )
    .bind(user_id.into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    result.map(User::from).ok_or_else(|| user_not_found(user_id))
}

async fn delete_invitations(conn: &mut PgConnection, user_id: Id) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM user_invitations WHERE user_id = $1")
        .bind(user_id.into_inner())
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    Ok(result.rows_affected())
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> RepoResult<DateTime<Utc>> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| DomainError::ValidationError("Invitation lifetime is out of range".into()))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Id) -> RepoResult<User> {
        with_deadline(self.config.query_timeout, "users.get_by_id", async {
            let result = sqlx::query_as::<_, UserModel>(
                r"
                SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.is_active,
                       r.id AS role_id, r.name AS role_name, r.level AS role_level,
                       r.description AS role_description
                FROM users u
                JOIN roles r ON r.id = u.role_id
                WHERE u.id = $1 AND u.is_active = TRUE
                ",
            )
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            result.map(User::from).ok_or_else(|| user_not_found(id))
        })
        .await
    }

    #[instrument(skip(self, email))]
    async fn get_by_email(&self, email: &str) -> RepoResult<User> {
        with_deadline(self.config.query_timeout, "users.get_by_email", async {
            let result = sqlx::query_as::<_, UserModel>(
                r"
                SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.is_active,
                       r.id AS role_id, r.name AS role_name, r.level AS role_level,
                       r.description AS role_description
                FROM users u
                JOIN roles r ON r.id = u.role_id
                WHERE u.email = $1 AND u.is_active = TRUE
                ",
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

            result.map(User::from).ok_or(DomainError::UserEmailNotFound)
        })
        .await
    }

    #[instrument(skip(self, user), fields(username = %user.username, role = %user.role_name()))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        with_deadline(self.config.query_timeout, "users.create", async {
            let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
            insert_user(&mut conn, user).await
        })
        .await
    }

    #[instrument(skip(self, user, token), fields(username = %user.username))]
    async fn create_and_invite(
        &self,
        user: &NewUser,
        token: &InvitationToken,
        ttl: Duration,
    ) -> RepoResult<User> {
        let expiry = expiry_after(Utc::now(), ttl)?;
        let token_hash = token.hash();
        let user = user.clone();

        let created = with_deadline(
            self.config.query_timeout,
            "users.create_and_invite",
            with_transaction(&self.pool, self.config.isolation_level, move |tx| {
                Box::pin(async move {
                    let created = insert_user(&mut **tx, &user).await?;
                    insert_invitation(&mut **tx, &token_hash, created.id, expiry).await?;
                    Ok(created)
                })
            }),
        )
        .await?;

        info!(user_id = %created.id, %expiry, "user invited");
        Ok(created)
    }

    #[instrument(skip(self, token))]
    async fn activate(&self, token: &InvitationToken) -> RepoResult<User> {
        let token_hash = token.hash();

        let user = with_deadline(
            self.config.query_timeout,
            "users.activate",
            with_transaction(&self.pool, self.config.isolation_level, move |tx| {
                Box::pin(async move {
                    let invitation = find_invitation_for_update(&mut **tx, &token_hash)
                        .await?
                        .ok_or(DomainError::InvitationNotFound)?;

                    if invitation.is_expired_at(Utc::now()) {
                        debug!(user_id = %invitation.user_id, "invitation expired");
                        return Err(DomainError::InvitationExpired);
                    }

                    let user = mark_active(&mut **tx, invitation.user_id).await?;
                    delete_invitations(&mut **tx, user.id).await?;
                    Ok(user)
                })
            }),
        )
        .await?;

        info!(user_id = %user.id, "user activated");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        with_deadline(
            self.config.query_timeout,
            "users.delete",
            with_transaction(&self.pool, self.config.isolation_level, move |tx| {
                Box::pin(async move {
                    let invitations = delete_invitations(&mut **tx, id).await?;

                    let result = sqlx::query("DELETE FROM users WHERE id = $1")
                        .bind(id.into_inner())
                        .execute(&mut **tx)
                        .await
                        .map_err(map_db_error)?;

                    if result.rows_affected() == 0 {
                        return Err(user_not_found(id));
                    }

                    debug!(user_id = %id, invitations, "user removed");
                    Ok(())
                })
            }),
        )
        .await
    }
}
