use regex::Regex;
use std::sync::LazyLock;

static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(docker[-_]|compose[-_])").expect("valid prefix regex"));
static INDEX_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]\d+$").expect("valid index regex"));
static ROLE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[-_](app|service|container|srv|svc|web|server)$").expect("valid suffix regex")
});

/// Lowercases and drops `-`, `_`, `.` and whitespace.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | '.') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Removes the decorations commonly added to container names:
/// `docker-`/`compose-` prefixes, a trailing replica index (`-1`, `_1`) and a
/// trailing role suffix (`-app`, `-server`, ...). The index is removed first so
/// that `plex-server-1` reduces to `plex`.
pub fn strip_affixes(name: &str) -> String {
    let name = PREFIX.replace(name, "");
    let name = INDEX_SUFFIX.replace(&name, "");
    ROLE_SUFFIX.replace(&name, "").into_owned()
}

/// The image reference without its tag and digest.
///
/// A `:` only starts a tag when it comes after the last `/`, so registry ports
/// (`registry:5000/app`) are preserved.
pub fn image_repository(image: &str) -> &str {
    let without_digest = image.split('@').next().unwrap_or(image);
    match without_digest.rfind(':') {
        Some(colon) if !without_digest[colon..].contains('/') => &without_digest[..colon],
        _ => without_digest,
    }
}
