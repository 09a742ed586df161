use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Username;

/// PostgreSQL implementation of the account repository
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    username: String,
    birthday: Option<NaiveDate>,
    password_hash: String,
    confirmed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            email: EmailAddress::new(row.email)?,
            username: Username::new(row.username)?,
            birthday: row.birthday,
            password_hash: row.password_hash,
            confirmed: row.confirmed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, username, birthday, password_hash, confirmed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(account.username.as_str())
        .bind(account.birthday)
        .bind(&account.password_hash)
        .bind(account.confirmed)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    // Which constraint fired decides which identity collided
                    if db_err.constraint() == Some("accounts_email_key") {
                        return AccountError::EmailAlreadyExists(
                            account.email.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("accounts_username_key") {
                        return AccountError::UsernameAlreadyExists(
                            account.username.as_str().to_string(),
                        );
                    }
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, birthday, password_hash, confirmed, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, birthday, password_hash, confirmed, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, birthday, password_hash, confirmed, created_at, updated_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn set_confirmed(&self, id: &AccountId) -> Result<(), AccountError> {
        // No confirmed filter in the WHERE clause, so confirming twice is a
        // plain no-op update rather than a failure
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET confirmed = TRUE, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
