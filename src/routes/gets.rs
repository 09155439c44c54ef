use actix_web::{HttpRequest, Responder, get, web};
use log::{info, warn};

use crate::{
    db,
    error::Error,
    notice::Notice,
    queries::urls::{get_url_detail, list_urls},
    routes::{redirect_with, render_page, server_error},
    types::AppData,
    views,
};

#[get("/")]
pub async fn index(data: AppData, req: HttpRequest) -> impl Responder {
    render_page(&req, &data, "Home", &views::index())
}

#[get("/urls")]
pub async fn get_urls(data: AppData, req: HttpRequest) -> impl Responder {
    let db = match db::connect(&data.db) {
        Ok(db) => db,
        Err(err) => return server_error("Get Urls", err.into()),
    };

    match list_urls(&db).await {
        Ok(urls) => {
            info!("[Get Urls] Listing {} urls", urls.len());
            render_page(&req, &data, "Sites", &views::url_list(&urls))
        }
        Err(err) => server_error("Get Urls", err),
    }
}

#[get("/urls/{id}")]
pub async fn get_url(path: web::Path<i64>, data: AppData, req: HttpRequest) -> impl Responder {
    let id = path.into_inner();
    let db = match db::connect(&data.db) {
        Ok(db) => db,
        Err(err) => return server_error("Get Url", err.into()),
    };

    match get_url_detail(&db, id).await {
        Ok(detail) => {
            let title = format!("Site: {}", detail.url.name);
            render_page(&req, &data, &title, &views::url_detail(&detail))
        }
        Err(Error::NotFound(id)) => {
            warn!("[Get Url] No url with id {id}");
            redirect_with(&data, "/", Notice::PageNotFound)
        }
        Err(err) => server_error("Get Url", err),
    }
}
