//! API route shapes.

use regex::Regex;
use std::sync::OnceLock;

static INSTANCE_ROUTE: OnceLock<Regex> = OnceLock::new();
static COLLECTION_ROUTE: OnceLock<Regex> = OnceLock::new();

fn instance_route() -> &'static Regex {
    INSTANCE_ROUTE.get_or_init(|| {
        Regex::new(r"^/api/v1/([a-z]+)/(\d+)$").expect("Invalid instance route pattern")
    })
}

fn collection_route() -> &'static Regex {
    COLLECTION_ROUTE.get_or_init(|| {
        Regex::new(r"^/api/v1/([a-z]+)$").expect("Invalid collection route pattern")
    })
}

/// Match `/api/v1/<resource>/<id>`, returning the resource and the id's
/// digits. The digits may exceed the range of any stored id.
pub fn instance(path: &str) -> Option<(&str, &str)> {
    let caps = instance_route().captures(path)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Match `/api/v1/<resource>` exactly
pub fn collection(path: &str) -> Option<&str> {
    let caps = collection_route().captures(path)?;
    Some(caps.get(1)?.as_str())
}
