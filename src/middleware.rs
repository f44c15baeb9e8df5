//! Route gate guarding the dashboard behind the session token cookie.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures::future::{LocalBoxFuture, Ready, ready};

use crate::token::{SessionClaims, TokenExpiryGate};

/// Where the browser is sent when it has no session at all.
pub const LOGIN_PATH: &str = "/";
/// Where the browser is sent when its session token is no longer usable.
pub const SESSION_EXPIRED_PATH: &str = "/?session=expired";

/// Outcome of checking one request against the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// The path is not protected.
    PassThrough,
    /// The token is usable; its claims travel with the request.
    Proceed(SessionClaims),
    /// No token cookie was sent.
    RedirectLogin,
    /// The token is malformed or expired and must be cleared.
    RedirectExpired,
}

/// Settings shared by every worker's copy of the middleware.
#[derive(Debug, Clone)]
pub struct SessionGate {
    protected_prefix: String,
    cookie_name: String,
    tokens: TokenExpiryGate,
}

impl SessionGate {
    pub fn new(
        protected_prefix: impl Into<String>,
        cookie_name: impl Into<String>,
        tokens: TokenExpiryGate,
    ) -> Self {
        Self {
            protected_prefix: protected_prefix.into(),
            cookie_name: cookie_name.into(),
            tokens,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// `true` for the prefix itself and anything below it.
    pub fn protects(&self, path: &str) -> bool {
        let prefix = self.protected_prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Decides what happens to a request for `path` carrying `token`.
    pub fn decide(&self, path: &str, token: Option<&str>) -> GateDecision {
        if !self.protects(path) {
            return GateDecision::PassThrough;
        }

        let Some(token) = token.filter(|token| !token.is_empty()) else {
            log::info!("Redirecting {path} to login: no session cookie");
            return GateDecision::RedirectLogin;
        };

        match self.tokens.validate(token) {
            Some(claims) => GateDecision::Proceed(claims),
            None => {
                log::info!("Redirecting {path} to login: session token invalid or expired");
                GateDecision::RedirectExpired
            }
        }
    }

    /// Cookie instructing the browser to drop the session token.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Middleware enforcing [`SessionGate`] on every request.
pub struct RequireSessionToken {
    gate: Rc<SessionGate>,
}

impl RequireSessionToken {
    pub fn new(gate: SessionGate) -> Self {
        Self { gate: Rc::new(gate) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSessionToken
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireSessionTokenService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionTokenService {
            service: Rc::new(service),
            gate: Rc::clone(&self.gate),
        }))
    }
}

pub struct RequireSessionTokenService<S> {
    service: Rc<S>,
    gate: Rc<SessionGate>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionTokenService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Rc::clone(&self.gate);

        Box::pin(async move {
            let token = req
                .cookie(gate.cookie_name())
                .map(|cookie| cookie.value().to_string());

            match gate.decide(req.path(), token.as_deref()) {
                GateDecision::PassThrough => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                GateDecision::Proceed(claims) => {
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                GateDecision::RedirectLogin => {
                    let response = HttpResponse::SeeOther()
                        .insert_header((header::LOCATION, LOGIN_PATH))
                        .finish();
                    Ok(req.into_response(response).map_into_right_body())
                }
                GateDecision::RedirectExpired => {
                    let response = HttpResponse::SeeOther()
                        .insert_header((header::LOCATION, SESSION_EXPIRED_PATH))
                        .cookie(gate.removal_cookie())
                        .finish();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Claims of the signed-in user, available to handlers behind the gate.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<SessionClaims>().cloned();
        ready(claims.map(SessionUser).ok_or_else(|| {
            log::error!("Session claims missing for {}", req.path());
            ErrorUnauthorized("session required")
        }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::token::MissingExpiry;
    use crate::token::tests::token_with;

    fn gate() -> SessionGate {
        SessionGate::new("/dashboard", "token", TokenExpiryGate::default())
    }

    #[test]
    fn unprotected_paths_pass_through() {
        assert_eq!(gate().decide("/", None), GateDecision::PassThrough);
        assert_eq!(gate().decide("/assets/app.css", Some("junk")), GateDecision::PassThrough);
    }

    #[test]
    fn sibling_paths_sharing_the_prefix_are_not_protected() {
        assert_eq!(gate().decide("/dashboardx", None), GateDecision::PassThrough);
        assert_eq!(gate().decide("/dashboard-old/a", None), GateDecision::PassThrough);
        assert_eq!(gate().decide("/dashboard/", None), GateDecision::RedirectLogin);
    }

    #[test]
    fn trailing_slash_in_prefix_is_ignored() {
        let gate = SessionGate::new("/dashboard/", "token", TokenExpiryGate::default());
        assert!(gate.protects("/dashboard"));
        assert!(gate.protects("/dashboard/eventos"));
        assert!(!gate.protects("/dashboards"));
    }

    #[test]
    fn missing_cookie_redirects_to_login() {
        assert_eq!(gate().decide("/dashboard", None), GateDecision::RedirectLogin);
        assert_eq!(
            gate().decide("/dashboard/empresas", Some("")),
            GateDecision::RedirectLogin
        );
    }

    #[test]
    fn broken_or_expired_token_redirects_as_expired() {
        let expired = token_with(&json!({ "exp": 1 }));

        assert_eq!(
            gate().decide("/dashboard", Some("not-a-token")),
            GateDecision::RedirectExpired
        );
        assert_eq!(
            gate().decide("/dashboard/eventos", Some(&expired)),
            GateDecision::RedirectExpired
        );
    }

    #[test]
    fn valid_token_proceeds_with_claims() {
        let token = token_with(&json!({ "email": "ops@empresa.cl" }));

        match gate().decide("/dashboard/pasajeros", Some(&token)) {
            GateDecision::Proceed(claims) => {
                assert_eq!(claims.email.as_deref(), Some("ops@empresa.cl"));
            }
            other => panic!("unexpected decision: {other:?}"),
        }
    }

    #[test]
    fn strict_policy_rejects_tokens_without_expiry() {
        let strict = SessionGate::new(
            "/dashboard",
            "token",
            TokenExpiryGate::new(MissingExpiry::Reject),
        );
        let token = token_with(&json!({ "sub": "1" }));

        assert_eq!(
            strict.decide("/dashboard", Some(&token)),
            GateDecision::RedirectExpired
        );
    }

    #[test]
    fn removal_cookie_clears_token_at_root() {
        let cookie = gate().removal_cookie();
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}
