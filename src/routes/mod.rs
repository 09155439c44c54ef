use actix_web::{
    HttpRequest, HttpResponse,
    http::header::ContentType,
    web::ServiceConfig,
};
use log::error;

use crate::{
    error::Error,
    notice::{self, Notice},
    types::AppData,
    views,
};

pub mod gets;
pub mod posts;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(gets::index)
        .service(gets::get_urls)
        .service(gets::get_url)
        .service(posts::add_url)
        .service(posts::add_check);
}

/// Renders `body` inside the layout, consuming any pending notice.
pub fn render_page(req: &HttpRequest, data: &AppData, title: &str, body: &str) -> HttpResponse {
    let pending = notice::take(req, &data.config.secret_key);

    let mut res = HttpResponse::Ok();
    res.content_type(ContentType::html());
    if req.cookie(notice::NOTICE_COOKIE).is_some() {
        res.cookie(notice::removal_cookie());
    }
    res.body(views::layout(title, pending, body))
}

pub fn redirect_with(data: &AppData, location: &str, notice: Notice) -> HttpResponse {
    notice::redirect(location, notice, &data.config.secret_key)
}

pub fn server_error(context: &str, err: Error) -> HttpResponse {
    error!("[{context}] Failed with err: {err}");
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body("Internal Server Error")
}

pub fn url_location(id: i64) -> String {
    format!("/urls/{id}")
}
