//! hola-accept: Zero-dependency Accept-Language tokenizer
//!
//! Turns a raw `Accept-Language` header value into ordered
//! (language code, quality) tokens for the greeting negotiator in hola-core.
//!
//! ## Accepted grammar
//! - Segments separated by any run of commas and/or spaces
//! - An optional `;q=0.<digit>` qualifier per segment
//! - At most [`MAX_SEGMENTS`] segments are examined per header
//!
//! Quality is quantized to an integer 0..=10. Parsing is maximally
//! permissive: a qualifier that does not match the single-digit pattern
//! (`q=1` and `q=1.0` included) falls back to [`DEFAULT_QUALITY`], and
//! unknown codes are the caller's concern.
//!
//! ## Example
//! ```
//! use hola_accept::{parse, DEFAULT_QUALITY};
//!
//! let tokens = parse("es, en;q=0.5");
//! assert_eq!(tokens[0].code, "es");
//! assert_eq!(tokens[0].quality, DEFAULT_QUALITY);
//! assert_eq!(tokens[1].code, "en");
//! assert_eq!(tokens[1].quality, 5);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

/// Quality assigned when a segment carries no (or an unparseable)
/// qualifier. Integer-quantized equivalent of `q=1.0`.
pub const DEFAULT_QUALITY: u8 = 10;

/// Maximum number of header segments examined. Segments past the cap are
/// ignored, bounding per-request work on pathological headers.
pub const MAX_SEGMENTS: usize = 50;

/// One parsed Accept-Language segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedLanguage {
    /// Language code, normalized to ASCII lowercase.
    pub code: String,
    /// Client preference weight, quantized to 0..=10.
    pub quality: u8,
}

/// Parse a raw Accept-Language header value into ordered tokens.
///
/// Output order equals header order; callers that stable-sort by quality
/// rely on this for tie-breaking. Never fails: malformed qualifiers get
/// [`DEFAULT_QUALITY`] and empty segments produce nothing.
///
/// # Example
/// ```
/// use hola_accept::parse;
///
/// let tokens = parse("fr;q=0.9,de;q=0.9");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].code, "fr");
/// assert_eq!(tokens[1].code, "de");
/// ```
pub fn parse(header: &str) -> Vec<AcceptedLanguage> {
    header
        .split(|c| c == ',' || c == ' ')
        .filter(|segment| !segment.is_empty())
        .take(MAX_SEGMENTS)
        .map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> AcceptedLanguage {
    let (code, quality) = match segment.split_once(';') {
        Some((code, qualifier)) => (code, parse_quality(qualifier)),
        None => (segment, DEFAULT_QUALITY),
    };

    AcceptedLanguage {
        code: code.to_ascii_lowercase(),
        quality,
    }
}

/// Accepts exactly `q=0.<digit>`; everything else is the default.
fn parse_quality(qualifier: &str) -> u8 {
    let Some(digits) = qualifier.strip_prefix("q=0.") else {
        return DEFAULT_QUALITY;
    };

    let mut chars = digits.chars();
    match (chars.next(), chars.next()) {
        (Some(d), None) => d.to_digit(10).map_or(DEFAULT_QUALITY, |q| q as u8),
        _ => DEFAULT_QUALITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_code() {
        let tokens = parse("en");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].code, "en");
        assert_eq!(tokens[0].quality, DEFAULT_QUALITY);
    }

    #[test]
    fn test_qualified_segments() {
        let tokens = parse("es,en;q=0.5,fr;q=0.0");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].quality, 10);
        assert_eq!(tokens[1].quality, 5);
        assert_eq!(tokens[2].quality, 0);
    }

    #[test]
    fn test_order_preserved() {
        let tokens = parse("fr, de, es");
        let codes: Vec<&str> = tokens.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, ["fr", "de", "es"]);
    }

    #[test]
    fn test_code_lowercased() {
        let tokens = parse("EN,Fr;q=0.3");
        assert_eq!(tokens[0].code, "en");
        assert_eq!(tokens[1].code, "fr");
    }

    #[test]
    fn test_separator_runs() {
        let tokens = parse("es,,  en ,fr");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].code, "es");
        assert_eq!(tokens[1].code, "en");
        assert_eq!(tokens[2].code, "fr");
    }

    #[test]
    fn test_malformed_qualifier_defaults() {
        for header in ["en;q=", "en;q=banana", "en;q=0.55", "en;q=.5", "en;"] {
            let tokens = parse(header);
            assert_eq!(tokens[0].quality, DEFAULT_QUALITY, "header: {header}");
        }
    }

    // q=1 and q=1.0 fall outside the q=0.<digit> pattern and default to 10,
    // which converges with the no-qualifier case.
    #[test]
    fn test_q_one_is_default_quality() {
        assert_eq!(parse("en;q=1")[0].quality, DEFAULT_QUALITY);
        assert_eq!(parse("en;q=1.0")[0].quality, DEFAULT_QUALITY);
    }

    #[test]
    fn test_segment_cap() {
        let header = vec!["xx"; MAX_SEGMENTS + 10].join(",");
        assert_eq!(parse(&header).len(), MAX_SEGMENTS);

        // A capped header and its truncation parse identically.
        let mut long: Vec<&str> = vec!["xx"; MAX_SEGMENTS - 1];
        long.push("en");
        long.push("es");
        let truncated = long[..MAX_SEGMENTS].join(",");
        assert_eq!(parse(&long.join(",")), parse(&truncated));
    }

    #[test]
    fn test_empty_header() {
        assert!(parse("").is_empty());
        assert!(parse(", ,,").is_empty());
    }

    #[test]
    fn test_empty_code_with_qualifier() {
        let tokens = parse(";q=0.5");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].code, "");
        assert_eq!(tokens[0].quality, 5);
    }
}
