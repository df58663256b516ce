/// Failures surfaced by credential verification and the token lifecycle.
///
/// Login failures carry the user-facing message and semantic code of the
/// `{message, code}` response body. Storage failures are fatal during lookup
/// but only logged during revocation, which is best effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    UserNotFound,
    InvalidCredentials,
    MalformedRequest,
    MissingToken,
    InvalidToken,
    RevokedToken,
    Signing(String),
    Hashing(String),
    StorageWrite(String),
    StorageRead(String),
}

impl AuthError {
    /// Semantic status code, mirrored into both the body and the status line.
    pub fn code(&self) -> u16 {
        match self {
            Self::UserNotFound => 404,
            Self::InvalidCredentials => 403,
            Self::MalformedRequest => 400,
            Self::MissingToken | Self::InvalidToken | Self::RevokedToken => 401,
            Self::Signing(_) | Self::Hashing(_) => 500,
            Self::StorageWrite(_) | Self::StorageRead(_) => 500,
        }
    }
    /// Message safe to show to a client. Internal details stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UserNotFound => "User Not Found",
            Self::InvalidCredentials => "Your login / Password is wrong",
            Self::MalformedRequest => "malformed request body",
            Self::MissingToken => "missing bearer token",
            Self::InvalidToken => "invalid or expired token",
            Self::RevokedToken => "token revoked",
            Self::Signing(_) => "token signing failed",
            Self::Hashing(_) => "password hashing failed",
            Self::StorageWrite(_) | Self::StorageRead(_) => "storage unavailable",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signing(e) => write!(f, "signing failure: {}", e),
            Self::Hashing(e) => write!(f, "hashing failure: {}", e),
            Self::StorageWrite(e) => write!(f, "storage write failure: {}", e),
            Self::StorageRead(e) => write!(f, "storage read failure: {}", e),
            other => f.write_str(other.message()),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for AuthError {
        fn status_code(&self) -> StatusCode {
            StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code()).json(crate::ErrorBody::from(self))
        }
    }
}
