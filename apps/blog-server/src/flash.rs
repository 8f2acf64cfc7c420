//! One-shot notices carried across a redirect in a short-lived cookie.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

pub const FLASH_COOKIE: &str = "blog_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    LoginRequired,
    LoggedOut,
}

impl Flash {
    fn code(self) -> &'static str {
        match self {
            Flash::LoginRequired => "login-required",
            Flash::LoggedOut => "logged-out",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "login-required" => Some(Flash::LoginRequired),
            "logged-out" => Some(Flash::LoggedOut),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::LoginRequired => "You need to login or register to comment.",
            Flash::LoggedOut => "You have been logged out.",
        }
    }

    /// Cookie that carries this notice to the next page.
    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.code())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::minutes(5))
            .finish()
    }

    /// Read the pending notice, if any. Pair with [`consumed`] on the response.
    pub fn take(req: &HttpRequest) -> Option<Self> {
        req.cookie(FLASH_COOKIE)
            .and_then(|cookie| Flash::from_code(cookie.value()))
    }
}

/// Cookie that clears a shown notice.
pub fn consumed() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
