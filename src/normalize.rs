//! Canonical form of a submitted url.
//!
//! Only `scheme://host[:port]` survives. User-info, path, query and fragment
//! are dropped, so every page of a site maps to the same registry key.

use url::{Host, Url};

use crate::error::{Error, Result};

pub const MAX_URL_LEN: usize = 255;

pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidInput("url is empty".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_URL_LEN {
        return Err(Error::InvalidInput(format!(
            "url is {len} characters, limit is {MAX_URL_LEN}"
        )));
    }

    let parsed = Url::parse(trimmed).map_err(|e| Error::InvalidInput(format!("{trimmed}: {e}")))?;

    match parsed.host() {
        Some(Host::Domain(domain)) if is_plausible_domain(domain) => {}
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
        _ => return Err(Error::InvalidInput(format!("{trimmed} has no valid host"))),
    }

    // host_str keeps the brackets around ipv6 addresses
    let Some(host) = parsed.host_str() else {
        return Err(Error::InvalidInput(format!("{trimmed} has no host")));
    };

    // `url` reports no port when it equals the scheme default, e.g. :443 on https
    Ok(match parsed.port() {
        Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
        None => format!("{}://{host}", parsed.scheme()),
    })
}

fn is_plausible_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
