use actix_web::{Responder, post, web};
use log::{info, warn};

use crate::{
    db,
    error::Error,
    normalize::normalize_url,
    notice::Notice,
    queries::{checks::record_check, urls::register_or_find},
    routes::{redirect_with, server_error, url_location},
    types::{AddUrl, AppData},
};

#[post("/urls")]
pub async fn add_url(form: web::Form<AddUrl>, data: AppData) -> impl Responder {
    let canonical = match normalize_url(&form.url) {
        Ok(canonical) => canonical,
        Err(err) => {
            warn!("[Add Url] Rejected submission: {err}");
            return redirect_with(&data, "/", Notice::InvalidUrl);
        }
    };

    let db = match db::connect(&data.db) {
        Ok(db) => db,
        Err(err) => return server_error("Add Url", err.into()),
    };

    match register_or_find(&db, &canonical).await {
        Ok(registration) if registration.is_new => {
            info!("[Add Url] Added {canonical} as {}", registration.id);
            redirect_with(&data, &url_location(registration.id), Notice::PageAdded)
        }
        Ok(registration) => {
            info!("[Add Url] {canonical} already exists as {}", registration.id);
            redirect_with(&data, &url_location(registration.id), Notice::PageExists)
        }
        Err(err) => server_error("Add Url", err),
    }
}

#[post("/urls/{id}/checks")]
pub async fn add_check(path: web::Path<i64>, data: AppData) -> impl Responder {
    let id = path.into_inner();
    let db = match db::connect(&data.db) {
        Ok(db) => db,
        Err(err) => return server_error("Add Check", err.into()),
    };

    match record_check(&db, id).await {
        Ok(check) => {
            info!("[Add Check] Recorded check {} for url {id}", check.id);
            redirect_with(&data, &url_location(id), Notice::CheckStarted)
        }
        Err(Error::NotFound(id)) => {
            warn!("[Add Check] No url with id {id}");
            redirect_with(&data, "/", Notice::PageNotFound)
        }
        Err(err) => server_error("Add Check", err),
    }
}
