use super::*;
use crate::account::schema::*;
use acct_core::ID;
use acct_core::Unique;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Creates the accounts table and its indices if absent.
pub async fn migrate(client: &Client) -> Result<(), AuthError> {
    client.batch_execute(creates()).await?;
    client.batch_execute(indices()).await?;
    Ok(())
}

fn hydrate(row: &Row) -> Account {
    Account::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, String>(3),
        row.get::<_, bool>(4),
        row.get::<_, std::time::SystemTime>(5),
        row.get::<_, std::time::SystemTime>(6),
    )
}

impl Directory for Arc<Client> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", ACCOUNTS, " WHERE email = $1"),
            &[&normalize(email)],
        )
        .await
        .map(|opt| opt.as_ref().map(hydrate))
        .map_err(AuthError::from)
    }

    async fn find_by_id(&self, id: ID<Account>) -> Result<Option<Account>, AuthError> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", ACCOUNTS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.as_ref().map(hydrate))
        .map_err(AuthError::from)
    }

    async fn insert(&self, account: Account) -> Result<Account, AuthError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                ACCOUNTS,
                " (",
                COLUMNS,
                ") VALUES ($1, $2, $3, $4, $5, $6, $7)"
            ),
            &[
                &account.id().inner(),
                &account.name(),
                &account.email(),
                &account.hashword(),
                &account.is_admin(),
                &account.created(),
                &account.updated(),
            ],
        )
        .await?;
        Ok(account)
    }

    async fn update(&self, id: ID<Account>, patch: &Patch) -> Result<Option<Account>, AuthError> {
        self.query_opt(
            const_format::concatcp!(
                "UPDATE ",
                ACCOUNTS,
                " SET name     = COALESCE($2, name),
                      email    = COALESCE($3, email),
                      hashword = COALESCE($4, hashword),
                      admin    = COALESCE($5, admin),
                      updated  = $6
                  WHERE id = $1
                  RETURNING ",
                COLUMNS
            ),
            &[
                &id.inner(),
                &patch.name,
                &patch.email.as_deref().map(normalize),
                &patch.hashword,
                &patch.admin,
                &std::time::SystemTime::now(),
            ],
        )
        .await
        .map(|opt| opt.as_ref().map(hydrate))
        .map_err(AuthError::from)
    }

    async fn remove(&self, id: ID<Account>) -> Result<bool, AuthError> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", ACCOUNTS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|n| n > 0)
        .map_err(AuthError::from)
    }

    async fn list(&self) -> Result<Vec<Account>, AuthError> {
        self.query(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", ACCOUNTS, " ORDER BY created"),
            &[],
        )
        .await
        .map(|rows| rows.iter().map(hydrate).collect())
        .map_err(AuthError::from)
    }
}
