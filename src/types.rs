use std::fmt::Display;

use actix_web::web;
use libsql::Database;
use serde::Deserialize;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::config::Config;

/// Fixed width, so text order in SQLite matches time order and `MAX()` works.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

time::serde::format_description!(stored_timestamp, OffsetDateTime, TIMESTAMP_FORMAT);

/// Current UTC time in the stored column format.
pub fn now_timestamp() -> Result<String, time::error::Format> {
    OffsetDateTime::now_utc().format(TIMESTAMP_FORMAT)
}

// DB Types

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Url {
    pub id: i64,
    pub name: String,
    #[serde(with = "stored_timestamp")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlCheck {
    pub id: i64,
    pub url_id: i64,
    #[serde(with = "stored_timestamp")]
    pub created_at: OffsetDateTime,
}

/// One row of the `/urls` table: a url and the time of its latest check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlListing {
    pub id: i64,
    pub name: String,
    #[serde(with = "stored_timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(with = "stored_timestamp::option")]
    pub last_check_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDetail {
    pub url: Url,
    /// Newest first.
    pub checks: Vec<UrlCheck>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id: i64,
    pub is_new: bool,
}

// Form Types

#[derive(Deserialize)]
pub struct AddUrl {
    #[serde(default)]
    pub url: String,
}

// Server Types

pub struct AppState {
    pub db: Database,
    pub config: Config,
}

pub type AppData = web::Data<AppState>;

#[derive(Debug)]
pub struct StringError(pub String);

impl Display for StringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StringError {}
