//! Session cookie handling and the current-user extractor.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use blog_core::domain::CurrentUser;
use blog_core::ports::Session;

use super::error::AppError;
use crate::state::AppState;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "blog_session";

/// Cookie that establishes `session` in the browser.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(session.expires_in))
        .finish()
}

/// Cookie that makes the browser forget its session.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish();
    cookie.make_removal();
    cookie
}

/// The session token presented with a request, if any.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolved identity of the caller, anonymous when there is no valid session.
///
/// Extracting it never fails for a bad session; handlers decide what
/// anonymity means for them:
/// ```ignore
/// async fn page(identity: Identity) -> impl Responder {
///     policy::require_admin(&identity)?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub CurrentUser);

impl Deref for Identity {
    type Target = CurrentUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()).into());
            };

            let current = state
                .auth
                .current_user(token.as_deref())
                .await
                .map_err(AppError::from)?;

            if token.is_some() && !current.is_authenticated() {
                tracing::debug!("Ignoring stale or invalid session cookie");
            }

            Ok(Identity(current))
        })
    }
}
