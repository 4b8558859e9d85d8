use super::*;
use acct_core::Unique;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::Invalid("name must not be empty".into()));
        }
        if !self.email.contains('@') {
            return Err(AuthError::Invalid("email must be an address".into()));
        }
        if self.password.is_empty() {
            return Err(AuthError::Invalid("password must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub admin: Option<bool>,
}

impl UpdateRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AuthError::Invalid("name must not be empty".into()));
        }
        if self.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(AuthError::Invalid("email must be an address".into()));
        }
        if self.password.as_deref().is_some_and(str::is_empty) {
            return Err(AuthError::Invalid("password must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Account as exposed over the wire. Never carries the digest.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub admin: bool,
    pub created: i64,
    pub updated: i64,
}

impl From<&Account> for Profile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            admin: account.is_admin(),
            created: acct_core::epoch(account.created()),
            updated: acct_core::epoch(account.updated()),
        }
    }
}
