use super::*;
use acct_core::Unique;

/// Exchanges credentials for a signed session token.
///
/// Read-only against the directory. Unknown email and wrong password fail
/// with the same `InvalidCredentials` so callers cannot enumerate accounts.
pub async fn issue<D>(
    directory: &D,
    crypto: &Crypto,
    email: &str,
    password: &str,
) -> Result<String, AuthError>
where
    D: Directory,
{
    let account = directory
        .find_by_email(email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    if !password::verify(password, account.hashword()) {
        return Err(AuthError::InvalidCredentials);
    }
    let token = crypto.mint(&account)?;
    log::info!("issued session for account {}", account.id());
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn registered(directory: &Memory, email: &str, password: &str) -> Account {
        let hashword = password::hash(password).unwrap();
        directory
            .insert(Account::new("someone".into(), email.into(), hashword))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn token_subject_is_account() {
        let directory = Memory::default();
        let crypto = Crypto::new(b"secret");
        let account = registered(&directory, "a@x.com", "pw1").await;
        let token = issue(&directory, &crypto, "a@x.com", "pw1").await.unwrap();
        assert_eq!(crypto.verify(Some(&token)).unwrap().id(), account.id());
    }

    #[tokio::test]
    async fn failures_are_indistinguishable() {
        let directory = Memory::default();
        let crypto = Crypto::new(b"secret");
        registered(&directory, "a@x.com", "pw1").await;
        let wrong = issue(&directory, &crypto, "a@x.com", "pw2").await.unwrap_err();
        let unknown = issue(&directory, &crypto, "b@x.com", "pw1").await.unwrap_err();
        assert_eq!(wrong, AuthError::InvalidCredentials);
        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn token_survives_account_removal() {
        let directory = Memory::default();
        let crypto = Crypto::new(b"secret");
        let account = registered(&directory, "a@x.com", "pw1").await;
        let token = issue(&directory, &crypto, "a@x.com", "pw1").await.unwrap();
        directory.remove(account.id()).await.unwrap();
        let caller = crypto.verify(Some(&token)).unwrap();
        assert!(caller.resolve(&directory).await.unwrap().is_none());
    }
}
