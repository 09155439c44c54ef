use itertools::Itertools;
use log::warn;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    notice::Notice,
    types::{UrlDetail, UrlListing},
};

const DISPLAY_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn display_time(t: &OffsetDateTime) -> String {
    match t.format(DISPLAY_FORMAT) {
        Ok(s) => s,
        Err(err) => {
            warn!("[View] Couldn't format timestamp {t}: {err}");
            String::new()
        }
    }
}

fn render_notice(notice: Option<Notice>) -> String {
    match notice {
        Some(n) => format!(
            r#"<div class="alert alert-{}" role="alert">{}</div>"#,
            n.level().as_str(),
            escape(n.message())
        ),
        None => String::new(),
    }
}

pub fn layout(title: &str, notice: Option<Notice>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Page Analyzer</title>
</head>
<body>
  <header>
    <nav>
      <a href="/">Page Analyzer</a>
      <a href="/urls">Sites</a>
    </nav>
  </header>
  <main>
    {notice}
    {body}
  </main>
</body>
</html>
"#,
        title = escape(title),
        notice = render_notice(notice),
    )
}

pub fn index() -> String {
    r#"<h1>Page Analyzer</h1>
    <p>Check web pages for SEO suitability for free</p>
    <form action="/urls" method="post">
      <input type="text" name="url" placeholder="https://www.example.com" required>
      <button type="submit">Check</button>
    </form>"#
        .to_owned()
}

pub fn url_list(urls: &[UrlListing]) -> String {
    let rows = urls
        .iter()
        .map(|u| {
            format!(
                r#"<tr><td>{id}</td><td><a href="/urls/{id}">{name}</a></td><td>{last_check}</td></tr>"#,
                id = u.id,
                name = escape(&u.name),
                last_check = u.last_check_at.as_ref().map(display_time).unwrap_or_default(),
            )
        })
        .join("\n      ");

    format!(
        r#"<h1>Sites</h1>
    <table>
      <tr><th>ID</th><th>Name</th><th>Last check</th></tr>
      {rows}
    </table>"#
    )
}

pub fn url_detail(detail: &UrlDetail) -> String {
    let url = &detail.url;
    let checks = detail
        .checks
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                c.id,
                display_time(&c.created_at)
            )
        })
        .join("\n      ");

    format!(
        r#"<h1>Site: {name}</h1>
    <table>
      <tr><td>ID</td><td>{id}</td></tr>
      <tr><td>Name</td><td>{name}</td></tr>
      <tr><td>Created</td><td>{created}</td></tr>
    </table>
    <h2>Checks</h2>
    <form action="/urls/{id}/checks" method="post">
      <button type="submit">Run check</button>
    </form>
    <table>
      <tr><th>ID</th><th>Created</th></tr>
      {checks}
    </table>"#,
        id = url.id,
        name = escape(&url.name),
        created = display_time(&url.created_at),
    )
}
