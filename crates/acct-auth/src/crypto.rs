use super::*;

/// Process-wide HMAC signing key for session tokens.
/// Built once at startup and shared read-only.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        // expiry is judged by Claims against the caller-supplied clock
        let mut validation = jsonwebtoken::Validation::default();
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            validation,
        }
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }
    /// Signature and shape check only.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
    }
    /// Signs a fresh token for `account`, valid from now.
    pub fn mint(&self, account: &Account) -> Result<String, AuthError> {
        use acct_core::Unique;
        self.encode(&Claims::new(account.id(), acct_core::now()))
            .map_err(|e| AuthError::Storage(format!("token signing: {}", e)))
    }
    /// Verifies a presented token against the current wall clock.
    pub fn verify(&self, token: Option<&str>) -> Result<Caller, AuthError> {
        self.verify_at(token, acct_core::now())
    }
    /// Verifies a presented token as of `now` (Unix seconds).
    /// Does not consult the directory: a token outlives its account.
    pub fn verify_at(&self, token: Option<&str>, now: i64) -> Result<Caller, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        let claims = self.decode(token).map_err(|_| AuthError::InvalidToken)?;
        if claims.expired(now) {
            return Err(AuthError::InvalidToken);
        }
        Ok(Caller::from(claims.user()))
    }
}
