//! Text clean-up used before comparing titles and years.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // An unterminated tag swallows the rest of the text.
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]*(?:>|$)").unwrap();
    static ref YEAR: Regex = Regex::new(r"[0-9]{4}").unwrap();
}

/// Strip markup tags, trim surrounding whitespace and lowercase `text`.
///
/// Never fails; empty input gives empty output. Applying it twice gives the same result as
/// applying it once.
pub fn normalize(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").trim().to_lowercase()
}

/// The first run of four consecutive ASCII digits in `text`, if any.
pub fn extract_year(text: &str) -> Option<&str> {
    YEAR.find(text).map(|m| m.as_str())
}
