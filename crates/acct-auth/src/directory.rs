use super::*;
use acct_core::ID;
use acct_core::Unique;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Account store consulted by the authentication core and mutated by the
/// account handlers. Implementations synchronize independently; concurrent
/// writes to one account resolve last-write-wins.
#[allow(async_fn_in_trait)]
pub trait Directory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;
    async fn find_by_id(&self, id: ID<Account>) -> Result<Option<Account>, AuthError>;
    /// Fails with `Conflict` when the email is already present.
    async fn insert(&self, account: Account) -> Result<Account, AuthError>;
    /// `None` when no account has this id. Fails with `Conflict` when the
    /// patch moves the email onto another account's.
    async fn update(&self, id: ID<Account>, patch: &Patch) -> Result<Option<Account>, AuthError>;
    /// `false` when no account has this id.
    async fn remove(&self, id: ID<Account>) -> Result<bool, AuthError>;
    async fn list(&self) -> Result<Vec<Account>, AuthError>;
}

/// In-process directory keyed by identity.
#[derive(Debug, Default)]
pub struct Memory {
    accounts: RwLock<HashMap<ID<Account>, Account>>,
}

impl Directory for Memory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let ref email = normalize(email);
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: ID<Account>) -> Result<Option<Account>, AuthError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email() == account.email()) {
            return Err(AuthError::Conflict);
        }
        accounts.insert(account.id(), account.clone());
        Ok(account)
    }

    async fn update(&self, id: ID<Account>, patch: &Patch) -> Result<Option<Account>, AuthError> {
        let mut accounts = self.accounts.write().await;
        if let Some(ref email) = patch.email.as_deref().map(normalize) {
            if accounts.values().any(|a| a.id() != id && a.email() == email) {
                return Err(AuthError::Conflict);
            }
        }
        Ok(accounts.get_mut(&id).map(|account| {
            account.apply(patch);
            account.clone()
        }))
    }

    async fn remove(&self, id: ID<Account>) -> Result<bool, AuthError> {
        Ok(self.accounts.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Account>, AuthError> {
        let mut accounts = self
            .accounts
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        accounts.sort_by_key(|a| a.created());
        Ok(accounts)
    }
}
