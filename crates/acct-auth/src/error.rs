use super::*;

/// Failures surfaced by the authentication core and the account handlers.
/// Every variant is recovered at the request boundary; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password collapse into this one message.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("{0} required")]
    Forbidden(Entitlement),
    #[error("email already registered")]
    Conflict,
    #[error("account not found")]
    NotFound,
    #[error("{0}")]
    Invalid(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::Storage(format!("password hashing: {}", e))
    }
}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for AuthError {
    fn from(e: tokio_postgres::Error) -> Self {
        match e.code() {
            Some(code) if *code == tokio_postgres::error::SqlState::UNIQUE_VIOLATION => {
                Self::Conflict
            }
            _ => Self::Storage(e.to_string()),
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for AuthError {
        fn status_code(&self) -> StatusCode {
            match self {
                Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                Self::Forbidden(_) => StatusCode::FORBIDDEN,
                Self::Conflict => StatusCode::CONFLICT,
                Self::NotFound => StatusCode::NOT_FOUND,
                Self::Invalid(_) => StatusCode::BAD_REQUEST,
                Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            let message = match self {
                Self::Storage(e) => {
                    log::error!("{}", e);
                    String::from("internal server error")
                }
                other => other.to_string(),
            };
            HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "message": message }))
        }
    }
}
