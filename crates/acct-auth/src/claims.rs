use super::*;
use acct_core::ID;

/// Signed payload of a session token. Nothing else is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for `user` issued at `now` (Unix seconds), valid for the fixed window.
    pub fn new(user: ID<Account>, now: i64) -> Self {
        Self {
            sub: user.inner(),
            iat: now,
            exp: now + acct_core::TOKEN_DURATION.as_secs() as i64,
        }
    }
    /// Expired from the `exp` instant onward.
    pub fn expired(&self, now: i64) -> bool {
        now >= self.exp
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_one_day() {
        let claims = Claims::new(ID::default(), 1_000);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn expiry_boundary() {
        let claims = Claims::new(ID::default(), 1_000);
        assert!(!claims.expired(claims.iat));
        assert!(!claims.expired(claims.exp - 1));
        assert!(claims.expired(claims.exp));
        assert!(claims.expired(claims.exp + 1));
    }
}
