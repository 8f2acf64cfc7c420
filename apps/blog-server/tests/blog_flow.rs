//! End-to-end tests over the full actix app and an in-memory database.

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;

use blog_server::flash::FLASH_COOKIE;
use blog_server::middleware::auth::SESSION_COOKIE;
use blog_server::observability::{REQUEST_ID_HEADER, RequestIdMiddleware};
use blog_server::{AppState, configure_routes};
use blog_shared::forms::{CommentForm, LoginForm, PostForm, RegisterForm};

macro_rules! blog_app {
    () => {{
        let state = AppState::in_memory().await.expect("in-memory database");
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await
    }};
}

/// Register an account and return its session cookie.
macro_rules! register {
    ($app:expr, $email:expr, $name:expr) => {{
        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(register_form($email, $name))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), Some("/posts"));
        cookie_named(&resp, SESSION_COOKIE).expect("session cookie")
    }};
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body
    }};
    ($app:expr, $uri:expr, $session:expr) => {{
        let req = test::TestRequest::get()
            .uri($uri)
            .cookie($session.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body
    }};
}

/// Create a post as `$session` and return its id from the listing.
macro_rules! publish {
    ($app:expr, $session:expr, $title:expr) => {{
        let req = test::TestRequest::post()
            .uri("/new-post")
            .cookie($session.clone())
            .set_form(post_form($title))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let listing = get_json!($app, "/posts");
        listing["posts"]
            .as_array()
            .and_then(|posts| posts.iter().find(|p| p["title"] == $title))
            .and_then(|p| p["id"].as_i64())
            .expect("published post in listing")
    }};
}

fn register_form(email: &str, name: &str) -> RegisterForm {
    RegisterForm {
        email: email.to_string(),
        password: "hunter22".to_string(),
        name: name.to_string(),
    }
}

fn post_form(title: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        subtitle: "Notes from the week".to_string(),
        img_url: "https://images.example.com/cover.jpg".to_string(),
        body: "<p>Hello there.</p>".to_string(),
    }
}

fn comment_form(text: &str) -> CommentForm {
    CommentForm {
        comment_text: text.to_string(),
    }
}

fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

fn location<B>(resp: &ServiceResponse<B>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

#[actix_web::test]
async fn test_register_publish_and_comment() {
    let app = blog_app!();

    let alice = register!(app, "alice@example.com", "Alice");

    let listing = get_json!(app, "/posts", alice);
    assert_eq!(listing["viewer"]["logged_in"], true);
    assert_eq!(listing["viewer"]["is_admin"], true);
    assert_eq!(listing["viewer"]["user"]["name"], "Alice");
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(0));

    let post_id = publish!(app, alice, "First");

    let listing = get_json!(app, "/posts");
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(1));
    assert_eq!(listing["posts"][0]["author"]["name"], "Alice");
    assert_eq!(listing["viewer"]["logged_in"], false);

    let req = test::TestRequest::post()
        .uri(&format!("/post/{post_id}"))
        .cookie(alice.clone())
        .set_form(comment_form("nice!"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some(format!("/post/{post_id}").as_str()));

    let page = get_json!(app, &format!("/post/{post_id}"));
    assert_eq!(page["post"]["title"], "First");
    assert_eq!(page["comments"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["comments"][0]["text"], "nice!");
    assert_eq!(page["comments"][0]["author"]["name"], "Alice");
}

#[actix_web::test]
async fn test_duplicate_email_rerenders_register_form() {
    let app = blog_app!();
    register!(app, "alice@example.com", "Alice");

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(register_form("alice@example.com", "Alice Again"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "You've already signed up with that email, log in instead!"
    );
    assert_eq!(body["form"]["name"], "Alice Again");
    assert!(body["form"].get("password").is_none());
}

#[actix_web::test]
async fn test_login_failures_and_success() {
    let app = blog_app!();
    register!(app, "alice@example.com", "Alice");

    let attempts = [
        (
            "ghost@example.com",
            "hunter22",
            "That email doesn't exist, please try again",
        ),
        (
            "alice@example.com",
            "wrong-password",
            "Password incorrect, please try again",
        ),
    ];
    for (email, password, message) in attempts {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form(LoginForm {
                email: email.to_string(),
                password: password.to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], message);
    }

    // The index page doubles as the login form.
    let req = test::TestRequest::post()
        .uri("/")
        .set_form(LoginForm {
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/posts"));
    let session = cookie_named(&resp, SESSION_COOKIE).expect("session cookie");

    let listing = get_json!(app, "/posts", session);
    assert_eq!(listing["viewer"]["user"]["name"], "Alice");
}

#[actix_web::test]
async fn test_invalid_login_form_is_unprocessable() {
    let app = blog_app!();

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(LoginForm {
            email: "not-an-email".to_string(),
            password: String::new(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[actix_web::test]
async fn test_readers_cannot_manage_posts() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");
    let bob = register!(app, "bob@example.com", "Bob");
    let post_id = publish!(app, alice, "First");

    let listing = get_json!(app, "/posts", bob);
    assert_eq!(listing["viewer"]["is_admin"], false);

    let attempts = vec![
        test::TestRequest::get().uri("/new-post"),
        test::TestRequest::post()
            .uri("/new-post")
            .set_form(post_form("Bob's post")),
        test::TestRequest::get().uri(&format!("/edit-post/{post_id}")),
        test::TestRequest::post()
            .uri(&format!("/edit-post/{post_id}"))
            .set_form(post_form("Hijacked")),
        test::TestRequest::get().uri(&format!("/delete/{post_id}")),
    ];
    for attempt in attempts {
        let resp = test::call_service(&app, attempt.cookie(bob.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    // Anonymous visitors are turned away the same way.
    let req = test::TestRequest::get()
        .uri(&format!("/delete/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let listing = get_json!(app, "/posts");
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(1));
    assert_eq!(listing["posts"][0]["title"], "First");
}

#[actix_web::test]
async fn test_duplicate_title_is_conflict() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");
    publish!(app, alice, "First");

    let mut second = post_form("First");
    second.subtitle = "Impostor".to_string();
    let req = test::TestRequest::post()
        .uri("/new-post")
        .cookie(alice.clone())
        .set_form(second)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "A post with that title already exists.");
    assert_eq!(body["form"]["subtitle"], "Impostor");

    let listing = get_json!(app, "/posts");
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(1));
    assert_eq!(listing["posts"][0]["subtitle"], "Notes from the week");
}

#[actix_web::test]
async fn test_invalid_post_form_is_unprocessable() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");

    let mut form = post_form("Broken");
    form.img_url = "not a url".to_string();
    let req = test::TestRequest::post()
        .uri("/new-post")
        .cookie(alice.clone())
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["img_url"][0], "Enter a valid URL.");

    let listing = get_json!(app, "/posts");
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_edit_post_prefills_and_updates() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");
    let post_id = publish!(app, alice, "First");

    let page = get_json!(app, &format!("/edit-post/{post_id}"), alice);
    assert_eq!(page["heading"], "Edit Post");
    assert_eq!(page["form"]["title"], "First");

    let mut edit = post_form("First, revised");
    edit.body = "<p>Rewritten.</p>".to_string();
    let req = test::TestRequest::post()
        .uri(&format!("/edit-post/{post_id}"))
        .cookie(alice.clone())
        .set_form(edit)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some(format!("/post/{post_id}").as_str()));

    let page = get_json!(app, &format!("/post/{post_id}"));
    assert_eq!(page["post"]["title"], "First, revised");
    assert_eq!(page["post"]["body"], "<p>Rewritten.</p>");
    assert_eq!(page["post"]["author"]["name"], "Alice");
}

#[actix_web::test]
async fn test_delete_removes_post_and_comments() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");
    let post_id = publish!(app, alice, "First");

    let req = test::TestRequest::post()
        .uri(&format!("/post/{post_id}"))
        .cookie(alice.clone())
        .set_form(comment_form("first!"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::SEE_OTHER
    );

    let req = test::TestRequest::get()
        .uri(&format!("/delete/{post_id}"))
        .cookie(alice.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/posts"));

    let listing = get_json!(app, "/posts");
    assert_eq!(listing["posts"].as_array().map(Vec::len), Some(0));

    let req = test::TestRequest::get()
        .uri(&format!("/post/{post_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri(&format!("/delete/{post_id}"))
        .cookie(alice.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_missing_posts_are_not_found() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");

    let requests = vec![
        test::TestRequest::get().uri("/post/42"),
        test::TestRequest::post()
            .uri("/post/42")
            .set_form(comment_form("hello?")),
        test::TestRequest::get().uri("/edit-post/42"),
        test::TestRequest::post()
            .uri("/edit-post/42")
            .set_form(post_form("Ghost")),
    ];
    for req in requests {
        let resp = test::call_service(&app, req.cookie(alice.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "Not Found");
    }
}

#[actix_web::test]
async fn test_anonymous_comment_redirects_to_login() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");
    let post_id = publish!(app, alice, "First");

    let req = test::TestRequest::post()
        .uri(&format!("/post/{post_id}"))
        .set_form(comment_form("drive-by"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));
    let flash = cookie_named(&resp, FLASH_COOKIE).expect("flash cookie");

    let req = test::TestRequest::get()
        .uri("/login")
        .cookie(flash)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = cookie_named(&resp, FLASH_COOKIE).expect("flash removal");
    assert_eq!(cleared.value(), "");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "You need to login or register to comment.");

    let page = get_json!(app, &format!("/post/{post_id}"));
    assert_eq!(page["comments"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_empty_comment_rerenders_post() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");
    let post_id = publish!(app, alice, "First");

    let req = test::TestRequest::post()
        .uri(&format!("/post/{post_id}"))
        .cookie(alice.clone())
        .set_form(comment_form("   "))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["title"], "First");
    assert!(body["errors"]["comment_text"].is_array());
    assert_eq!(body["comments"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_logout_is_idempotent() {
    let app = blog_app!();
    let alice = register!(app, "alice@example.com", "Alice");

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(alice.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));
    let cleared = cookie_named(&resp, SESSION_COOKIE).expect("session removal");
    assert_eq!(cleared.value(), "");
    assert!(cookie_named(&resp, FLASH_COOKIE).is_some());

    let req = test::TestRequest::get().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));
    assert!(cookie_named(&resp, FLASH_COOKIE).is_none());
}

#[actix_web::test]
async fn test_garbage_session_is_anonymous() {
    let app = blog_app!();

    let listing = get_json!(app, "/posts", Cookie::new(SESSION_COOKIE, "forged"));

    assert_eq!(listing["viewer"]["logged_in"], false);
}

#[actix_web::test]
async fn test_static_pages_and_request_id() {
    let app = blog_app!();

    let req = test::TestRequest::get().uri("/about").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let req = test::TestRequest::get()
        .uri("/contact")
        .insert_header((REQUEST_ID_HEADER, "trace-me-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("trace-me-123")
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Contact Me");
}
