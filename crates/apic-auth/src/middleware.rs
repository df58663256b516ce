use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;

/// Extractor for authenticated requests.
/// Verifies the bearer token, rejects revoked ones, and decodes its claims.
pub struct Auth {
    claims: Claims,
    token: String,
}

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
    pub fn token(&self) -> &str {
        &self.token
    }
}

fn bearer(header: Option<String>) -> Result<String, AuthError> {
    header
        .as_deref()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .ok_or(AuthError::MissingToken)
}

impl FromRequest for Auth {
    type Error = AuthError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let crypto = req.app_data::<web::Data<Crypto>>().cloned();
        let registry = req.app_data::<web::Data<dyn Registry>>().cloned();
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_owned());
        Box::pin(async move {
            let token = bearer(header)?;
            let crypto =
                crypto.ok_or_else(|| AuthError::Signing("token manager not configured".into()))?;
            let registry = registry
                .ok_or_else(|| AuthError::StorageRead("registry not configured".into()))?;
            let raw = crypto.verify(&token)?;
            if crypto.revoked(&token, registry.get_ref()).await {
                return Err(AuthError::RevokedToken);
            }
            Ok(Auth {
                claims: Crypto::decode(&raw),
                token,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_requires_scheme_and_value() {
        assert_eq!(bearer(Some("Bearer abc".into())), Ok("abc".into()));
        assert_eq!(bearer(Some("Basic abc".into())), Err(AuthError::MissingToken));
        assert_eq!(bearer(Some("Bearer ".into())), Err(AuthError::MissingToken));
        assert_eq!(bearer(None), Err(AuthError::MissingToken));
    }
}
