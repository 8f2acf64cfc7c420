//! HTTP handlers and route configuration.

mod auth;
mod pages;
mod posts;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, HttpResponseBuilder, web};
use serde::Serialize;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Session
        .service(
            web::resource("/")
                .route(web::get().to(auth::login_page))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_page))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_page))
                .route(web::post().to(auth::register)),
        )
        .route("/logout", web::get().to(auth::logout))
        // Static pages
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        // Posts and comments
        .route("/posts", web::get().to(posts::list_posts))
        .service(
            web::resource("/post/{id}")
                .route(web::get().to(posts::show_post))
                .route(web::post().to(posts::add_comment)),
        )
        .service(
            web::resource("/new-post")
                .route(web::get().to(posts::new_post_page))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .route(web::get().to(posts::edit_post_page))
                .route(web::post().to(posts::update_post)),
        )
        .route("/delete/{id}", web::get().to(posts::delete_post));
}

/// `303 See Other` to `location`; cookies can still be attached.
fn see_other(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location));
    builder
}

/// A page view model with an explicit status (form re-renders).
fn page<T: Serialize>(status: StatusCode, view: &T) -> HttpResponse {
    HttpResponse::build(status).json(view)
}
