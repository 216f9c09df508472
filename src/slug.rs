//! URL slug generation for catalog entries

use std::sync::OnceLock;

use regex::Regex;

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_\s-]").expect("static regex"))
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s_-]+").expect("static regex"))
}

/// Turn a display name into a slug: `"Card Header"` -> `"card-header"`
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = invalid_chars().replace_all(lowered.trim(), "");
    let joined = separators().replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

/// True when `slug` is already in the form `slugify` produces
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
