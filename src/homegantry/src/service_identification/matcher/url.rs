use crate::constants::{COMPAT_LABEL_HREF, LABEL_URL, NO_URL};
use crate::service_identification::matcher::MatchOptions;
use crate::types::ContainerSnapshot;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static ROUTER_RULE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^traefik\.http\.routers\..+\.rule$").expect("valid router key regex")
});
// Host(`a`) or Host(`a`, `b`, ...); the first host is captured
static HOST_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Host\(\s*`([^`]+)`(?:\s*,\s*`[^`]*`)*\s*\)").expect("valid host rule regex")
});

type UrlResolver = fn(&ContainerSnapshot, &MatchOptions) -> Option<String>;

/// URL sources in priority order.
const URL_CASCADE: &[(&str, UrlResolver)] = &[
    ("label", from_label),
    ("compat_label", from_compat_label),
    ("router_rule", from_router_rule),
    ("published_port", from_published_port),
];

/// First URL produced by the cascade, or the "no URL" sentinel.
pub fn resolve_url(snapshot: &ContainerSnapshot, options: &MatchOptions) -> String {
    URL_CASCADE
        .iter()
        .find_map(|(step, resolver)| {
            resolver(snapshot, options)
                .inspect(|url| trace!("[{}] url {} resolved by {}", snapshot.name, url, step))
        })
        .unwrap_or_else(|| NO_URL.to_string())
}

fn from_label(snapshot: &ContainerSnapshot, _options: &MatchOptions) -> Option<String> {
    snapshot.non_empty_label(LABEL_URL).map(str::to_string)
}

fn from_compat_label(snapshot: &ContainerSnapshot, options: &MatchOptions) -> Option<String> {
    if !options.homepage_compat {
        return None;
    }
    snapshot.non_empty_label(COMPAT_LABEL_HREF).map(str::to_string)
}

/// `https://<host>` from the first router rule (by label key order) that names a host.
fn from_router_rule(snapshot: &ContainerSnapshot, _options: &MatchOptions) -> Option<String> {
    snapshot
        .labels
        .iter()
        .filter(|(key, _)| ROUTER_RULE_KEY.is_match(key))
        .find_map(|(_, rule)| HOST_MATCHER.captures(rule))
        .and_then(|captures| captures.get(1))
        .map(|host| format!("https://{}", host.as_str()))
}

fn from_published_port(snapshot: &ContainerSnapshot, options: &MatchOptions) -> Option<String> {
    snapshot
        .ports
        .first()
        .filter(|pair| pair.public != 0)
        .map(|pair| format!("http://{}:{}", options.url_host(), pair.public))
}
