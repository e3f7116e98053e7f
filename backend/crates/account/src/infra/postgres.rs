//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::field_errors::FieldErrors;
use kernel::id::AccountId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{account::Account, revoked_token::RevokedToken};
use crate::domain::repository::{AccountRepository, RevokedTokenRepository};
use crate::domain::value_object::{
    account_password::AccountPassword,
    email::{EMAIL_TAKEN_MESSAGE, Email},
    person_name::PersonName,
};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                firstname,
                lastname,
                email,
                password_hash,
                is_staff,
                is_superuser,
                is_active,
                last_login,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.firstname.as_str())
        .bind(account.lastname.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.is_active)
        .bind(account.last_login)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // Lost a registration race on the unique email index
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AccountError::Validation(FieldErrors::single("email", EMAIL_TAKEN_MESSAGE))
            }
            other => AccountError::Database(other),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                firstname,
                lastname,
                email,
                password_hash,
                is_staff,
                is_superuser,
                is_active,
                last_login,
                created_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                firstname,
                lastname,
                email,
                password_hash,
                is_staff,
                is_superuser,
                is_active,
                last_login,
                created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                firstname = $2,
                lastname = $3,
                password_hash = $4,
                is_staff = $5,
                is_superuser = $6,
                is_active = $7,
                last_login = $8
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.firstname.as_str())
        .bind(account.lastname.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.is_staff)
        .bind(account.is_superuser)
        .bind(account.is_active)
        .bind(account.last_login)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Revoked Token Repository Implementation
// ============================================================================

impl RevokedTokenRepository for PgAccountRepository {
    async fn revoke(&self, token: &RevokedToken) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, account_id, expires_at, revoked_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(token.jti)
        .bind(token.account_id.as_uuid())
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> AccountResult<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)",
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }

    async fn cleanup_expired(&self) -> AccountResult<u64> {
        let deleted = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired revoked tokens");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    firstname: String,
    lastname: String,
    email: String,
    password_hash: String,
    is_staff: bool,
    is_superuser: bool,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let password_hash = AccountPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            firstname: PersonName::from_db(self.firstname),
            lastname: PersonName::from_db(self.lastname),
            email: Email::from_db(self.email),
            password_hash,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
        })
    }
}
