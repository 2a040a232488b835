//! Parser/renderer for the delimited product description format.
//!
//! Product long-descriptions are stored as a single text blob of the form
//! `Farbe: Rot | Größe: M | Material: Baumwolle` and rendered as a
//! key/value table on the product detail and admin edit views. Parsing is
//! pure and total: any input, including the empty string, yields a result.
//!
//! There is no escaping mechanism - a literal `|` or `:` inside a value
//! collides with the format and values are expected to be pre-sanitized.

/// One row of the rendered description table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPair {
    pub key: String,
    pub value: String,
}

/// Parse a raw description blob into ordered key/value pairs.
///
/// Segments are split on `|` and trimmed; segments that trim to empty are
/// dropped (so the empty string yields no pairs). Each segment splits on the
/// FIRST `:`; a segment without one becomes a pair with an empty value.
#[must_use]
pub fn parse(raw: &str) -> Vec<DetailPair> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once(':') {
            Some((key, value)) => DetailPair {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => DetailPair {
                key: segment.to_string(),
                value: String::new(),
            },
        })
        .collect()
}

/// Compose a description blob from key/value pairs.
///
/// Used by the admin edit form when submitting a product. Not a strict
/// inverse of [`parse`]: surrounding whitespace dropped during parsing is
/// not restored.
#[must_use]
pub fn render(pairs: &[DetailPair]) -> String {
    pairs
        .iter()
        .map(|pair| format!("{}: {}", pair.key, pair.value))
        .collect::<Vec<_>>()
        .join(" | ")
}
