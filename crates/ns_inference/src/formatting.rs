use ns_core::{BulletStyle, SummaryResult};

/// Turns free-form summary text into at most `style.max_bullets` bullets.
///
/// Sentences are found by splitting on the literal `". "`, so abbreviations
/// such as "U.S. officials" split early and only the final fragment keeps
/// its trailing period.
pub fn format_bullets(summary: &str, style: &BulletStyle) -> SummaryResult {
    let bullets = summary
        .split(". ")
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .take(style.max_bullets)
        .map(|fragment| format!("{}{}", style.marker, fragment))
        .collect();

    SummaryResult { bullets }
}

/// Whether a summary must be translated before it is returned.
pub fn needs_translation(language: Option<&str>, default_language: &str) -> bool {
    match language.map(str::trim) {
        None => false,
        Some("") => false,
        Some(lang) => !lang.eq_ignore_ascii_case(default_language),
    }
}
