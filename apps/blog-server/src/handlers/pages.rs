//! Static pages.

use actix_web::HttpResponse;

use blog_shared::views::StaticPage;

use crate::middleware::auth::Identity;
use crate::render;

/// GET /about
pub async fn about(identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(StaticPage {
        viewer: render::viewer(&identity),
        title: "About Me".to_string(),
        body: "A small blog about whatever is on my mind this week.".to_string(),
    })
}

/// GET /contact
pub async fn contact(identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(StaticPage {
        viewer: render::viewer(&identity),
        title: "Contact Me".to_string(),
        body: "Have questions? I have answers.".to_string(),
    })
}
