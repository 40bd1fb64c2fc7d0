//! Dictionary lookup links for review rows.

/// Substitute a percent-encoded slug into a `{slug}` URL template.
///
/// Returns `None` for an empty slug, which has nothing to look up.
pub fn dictionary_link(template: &str, slug: &str) -> Option<String> {
    if slug.is_empty() {
        return None;
    }
    let encoded = urlencoding::encode(slug);
    if template.contains("{slug}") {
        Some(template.replace("{slug}", &encoded))
    } else {
        Some(format!("{template}{encoded}"))
    }
}
