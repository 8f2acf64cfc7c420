//! Registration, login and logout.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

use blog_core::domain::{NewAccount, mask_email};
use blog_core::error::{ConstraintViolation, DomainError};
use blog_core::ports::AuthError;
use blog_shared::SubmittedForm;
use blog_shared::forms::{LoginEcho, LoginForm, RegisterEcho, RegisterForm};
use blog_shared::views::FormPage;

use super::{page, see_other};
use crate::flash::{self, Flash};
use crate::middleware::auth::{Identity, clear_session_cookie, session_cookie, session_token};
use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;

const EMAIL_TAKEN: &str = "You've already signed up with that email, log in instead!";

/// GET /register
pub async fn register_page(identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(FormPage::new(
        render::viewer(&identity),
        "Register",
        RegisterEcho::default(),
    ))
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner().normalized();
    let view = FormPage::new(
        render::viewer(&identity),
        "Register",
        RegisterEcho::from(&form),
    );

    if let Err(errors) = form.check() {
        return Ok(page(
            StatusCode::UNPROCESSABLE_ENTITY,
            &view.with_errors(errors),
        ));
    }

    let account = NewAccount {
        email: form.email,
        password: form.password,
        name: form.name,
    };

    match state.auth.register(account).await {
        Ok((user, session)) => {
            tracing::info!(
                user_id = user.id,
                email = %mask_email(&user.email),
                role = %user.role,
                "Registered new account"
            );
            Ok(see_other("/posts")
                .cookie(session_cookie(&session, state.cookie_secure))
                .finish())
        }
        Err(DomainError::Constraint(ConstraintViolation::EmailTaken)) => {
            tracing::debug!(email = %mask_email(&view.form.email), "Registration with a taken email");
            Ok(page(StatusCode::CONFLICT, &view.with_message(EMAIL_TAKEN)))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET / and GET /login
pub async fn login_page(req: HttpRequest, identity: Identity) -> HttpResponse {
    let mut view = FormPage::new(render::viewer(&identity), "Log In", LoginEcho::default());
    let mut response = HttpResponse::Ok();

    if let Some(notice) = Flash::take(&req) {
        view = view.with_message(notice.message());
        response.cookie(flash::consumed());
    }

    response.json(view)
}

/// POST / and POST /login
pub async fn login(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner().normalized();
    let view = FormPage::new(render::viewer(&identity), "Log In", LoginEcho::from(&form));

    if let Err(errors) = form.check() {
        return Ok(page(
            StatusCode::UNPROCESSABLE_ENTITY,
            &view.with_errors(errors),
        ));
    }

    match state.auth.login(&form.email, &form.password).await {
        Ok((user, session)) => {
            tracing::info!(user_id = user.id, "User logged in");
            Ok(see_other("/posts")
                .cookie(session_cookie(&session, state.cookie_secure))
                .finish())
        }
        Err(DomainError::Auth(
            reason @ (AuthError::UserNotFound | AuthError::WrongPassword),
        )) => {
            tracing::warn!(email = %mask_email(&form.email), %reason, "Login rejected");
            Ok(page(
                StatusCode::UNAUTHORIZED,
                &view.with_message(reason.to_string()),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let token = session_token(&req);
    let mut response = see_other("/login");
    response.cookie(clear_session_cookie(state.cookie_secure));

    // Only a session that actually ended earns the notice.
    if let Some(user_id) = state.auth.logout(token.as_deref()) {
        tracing::info!(user_id, "User logged out");
        response.cookie(Flash::LoggedOut.cookie());
    }

    response.finish()
}
