//! One-shot notices carried across a redirect in a signed cookie.
//!
//! The cookie holds only the notice code; the text lives here. A cookie that
//! fails verification or carries an unknown code is treated as absent.

use actix_web::{
    HttpRequest, HttpResponse,
    cookie::{Cookie, CookieJar, Key},
    http::header,
};
use log::warn;

pub const NOTICE_COOKIE: &str = "notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Danger,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidUrl,
    PageExists,
    PageAdded,
    PageNotFound,
    CheckStarted,
}

impl Notice {
    const ALL: [Notice; 5] = [
        Notice::InvalidUrl,
        Notice::PageExists,
        Notice::PageAdded,
        Notice::PageNotFound,
        Notice::CheckStarted,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Notice::InvalidUrl => "invalid_url",
            Notice::PageExists => "page_exists",
            Notice::PageAdded => "page_added",
            Notice::PageNotFound => "page_not_found",
            Notice::CheckStarted => "check_started",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.code() == code)
    }

    pub fn level(self) -> Level {
        match self {
            Notice::PageAdded | Notice::CheckStarted => Level::Success,
            Notice::PageExists => Level::Info,
            Notice::InvalidUrl | Notice::PageNotFound => Level::Danger,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::InvalidUrl => "Invalid URL",
            Notice::PageExists => "Page already exists",
            Notice::PageAdded => "Page successfully added",
            Notice::PageNotFound => "Page not found",
            Notice::CheckStarted => "Check started successfully",
        }
    }
}

/// `302 Found` to `location`, leaving `notice` for the next page view.
pub fn redirect(location: &str, notice: Notice, key: &Key) -> HttpResponse {
    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(
        Cookie::build(NOTICE_COOKIE, notice.code())
            .path("/")
            .http_only(true)
            .finish(),
    );

    let mut res = HttpResponse::Found();
    res.insert_header((header::LOCATION, location));
    for c in jar.delta() {
        res.cookie(c.clone());
    }
    res.finish()
}

pub fn take(req: &HttpRequest, key: &Key) -> Option<Notice> {
    let cookie = req.cookie(NOTICE_COOKIE)?;

    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    let Some(verified) = jar.signed(key).get(NOTICE_COOKIE) else {
        warn!("[Notice] Dropping notice cookie with a bad signature");
        return None;
    };

    let notice = Notice::from_code(verified.value());
    if notice.is_none() {
        warn!("[Notice] Unknown notice code {}", verified.value());
    }
    notice
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut c = Cookie::build(NOTICE_COOKIE, "").path("/").finish();
    c.make_removal();
    c
}
