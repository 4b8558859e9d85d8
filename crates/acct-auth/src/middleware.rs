use super::*;
use acct_core::ID;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Ready;
use std::future::ready;

/// Extractor for authenticated requests.
/// Verifies the bearer token's signature and expiry; never touches the directory.
pub struct Auth(pub Caller);

impl Auth {
    pub fn caller(&self) -> &Caller {
        &self.0
    }
    pub fn user(&self) -> ID<Account> {
        self.0.id()
    }
}

/// Token from an `Authorization: Bearer <token>` header, if one was presented.
fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

impl FromRequest for Auth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(crypto) = req.app_data::<web::Data<Crypto>>() else {
            return ready(Err(AuthError::Storage("token service not configured".into())));
        };
        ready(crypto.verify(bearer(req)).map(Auth))
    }
}
