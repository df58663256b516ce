use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;

/// `POST /token`: exchange credentials for a signed token.
pub async fn token(
    directory: web::Data<dyn Directory>,
    crypto: web::Data<Crypto>,
    req: web::Json<Credentials>,
) -> Result<HttpResponse, AuthError> {
    let member = req.verify(directory.get_ref()).await?;
    let token = crypto.issue(&member, std::time::SystemTime::now())?;
    log::info!("issued token for {}", member.username());
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// `POST /token/revoke`: mark the presented token as invalid.
pub async fn revoke(
    crypto: web::Data<Crypto>,
    registry: web::Data<dyn Registry>,
    auth: Auth,
) -> impl Responder {
    crypto.revoke(auth.token(), registry.get_ref()).await;
    log::info!("revoked token for {}", auth.claims().username());
    HttpResponse::Ok().json(StatusResponse {
        status: "revoked".to_string(),
    })
}

/// `GET /me`: the decoded claims of the presented token.
pub async fn me(auth: Auth) -> impl Responder {
    HttpResponse::Ok().json(auth.claims())
}

/// Mount the authentication routes.
/// Unparseable JSON bodies answer with the same `{message, code}` shape.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        log::debug!("rejected request body: {}", err);
        AuthError::MalformedRequest.into()
    }))
    .route("/token", web::post().to(token))
    .route("/token/revoke", web::post().to(revoke))
    .route("/me", web::get().to(me));
}
