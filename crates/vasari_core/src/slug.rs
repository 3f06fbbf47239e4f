//! Canonical slug derivation.
//!
//! Slugs are routing-significant, so they are always recomputed
//! server-side from trusted inputs instead of taken from generator
//! output.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace"));
static REPEATED_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphens"));

/// Derive the canonical slug for a title.
///
/// Lower-cases the input, strips ampersands and every character outside
/// `[a-z0-9\s-]`, turns whitespace runs into single hyphens, collapses
/// repeated hyphens, and trims leading/trailing hyphens. Total and
/// idempotent; an input with no usable characters degrades to an empty
/// slug rather than failing.
///
/// # Examples
///
/// ```
/// use vasari_core::canonical_slug;
///
/// assert_eq!(canonical_slug("What's New? Auto & Home!"), "whats-new-auto-home");
/// ```
pub fn canonical_slug(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();
    let hyphenated = WHITESPACE.replace_all(&kept, "-");
    let collapsed = REPEATED_HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_hyphenates() {
        assert_eq!(
            canonical_slug("What's New? Auto & Home!"),
            "whats-new-auto-home"
        );
    }

    #[test]
    fn idempotent() {
        for raw in [
            "What's New? Auto & Home!",
            "  spaced   out  ",
            "already-canonical-slug",
            "--- edge --- hyphens ---",
            "",
        ] {
            let once = canonical_slug(raw);
            assert_eq!(canonical_slug(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn collapses_hyphen_runs_and_trims_edges() {
        assert_eq!(canonical_slug("- a -- b -"), "a-b");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(canonical_slug("Top 10 Tips for 2026"), "top-10-tips-for-2026");
    }

    #[test]
    fn degrades_to_empty_on_unusable_input() {
        assert_eq!(canonical_slug("!!! ??? &&&"), "");
    }
}
