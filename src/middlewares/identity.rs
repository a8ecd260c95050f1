use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    auth::{CurrentIdentity, Identity, decode_jwt},
    config::Jwt,
    state::SharedAppState,
};

/// Resolves the caller's identity from the bearer token and stores it as a
/// [`CurrentIdentity`] extension. Never rejects: a missing, malformed or
/// invalid token yields an anonymous request.
#[tracing::instrument(
    name = "[MIDDLEWARE] identity",
    skip_all,
    fields(subject = tracing::field::Empty)
)]
pub async fn identity_middleware(
    State(app_state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Response<Body> {
    let current = resolve_identity(req.headers(), &app_state.config.jwt);

    if let Some(identity) = current.get() {
        tracing::Span::current().record("subject", tracing::field::display(identity));
    }

    req.extensions_mut().insert(current);

    next.run(req).await
}

pub fn resolve_identity(headers: &HeaderMap, jwt: &Jwt) -> CurrentIdentity {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        return CurrentIdentity::anonymous();
    };
    let Ok(auth_header) = auth_header.to_str() else {
        return CurrentIdentity::anonymous();
    };

    let mut header = auth_header.split_whitespace();
    let (bearer, token) = match (header.next(), header.next()) {
        (Some(bearer), Some(token)) => (bearer, token),
        _ => return CurrentIdentity::anonymous(),
    };

    if !bearer.eq_ignore_ascii_case("bearer") {
        return CurrentIdentity::anonymous();
    }

    match decode_jwt(token, jwt) {
        Ok(token_data) if !token_data.claims.sub.is_empty() => {
            CurrentIdentity::authenticated(Identity::new(token_data.claims.sub))
        }
        Ok(_) => CurrentIdentity::anonymous(),
        Err(error) => {
            tracing::debug!(err.msg = %error, "Rejected bearer token");
            CurrentIdentity::anonymous()
        }
    }
}
