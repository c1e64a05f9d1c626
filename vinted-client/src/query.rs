//! Catalog URL translation
//!
//! Turns a browser-facing catalog search URL into the query string expected
//! by the internal search API. Browser URLs encode multi-valued filters with
//! bracketed singular keys (`brand[]=nike&brand[]=adidas`) while the API
//! wants plural, comma-joined fields (`brands=nike,adidas`), with two filter
//! families additionally carrying an `_id` suffix. The API is sensitive to
//! field naming and value encoding, so the produced query string must be
//! byte-stable for a given input.

use indexmap::map::Entry;
use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

/// Host shape a catalog URL must match; the capture is the top-level domain.
const HOST_PATTERN: &str = r"^https://www\.vinted\.([a-z]+)";

/// Token grammar for `key=value` and `key[]=value` query segments.
/// Segments that do not match are skipped, not rejected: browser URLs carry
/// tracking junk the API never sees.
const PARAM_PATTERN: &str = r"([a-z_]+)(\[\])?=([a-zA-Z 0-9._À-ú+%]*)&?";

/// Array keys that take an `_id` suffix before pluralization
/// (`catalog[]` accumulates under `catalog_ids`).
const ID_SUFFIXED_KEYS: [&str; 2] = ["catalog", "status"];

/// Percent-sequences for these bytes survive decoding, so an encoded
/// separator inside a value cannot change segment structure.
const RESERVED: &[u8] = b"#$&+,/:;=?@";

/// A value bound in the accumulator: a single value or an ordered list.
///
/// Within one translation a name classified as array-typed stays `List`;
/// the two shapes never coexist for the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Caller-supplied parameters applied after URL extraction. Overrides always
/// take the literal shape given here, scalar or list.
pub type Overrides = IndexMap<String, ParamValue>;

/// Ordered `name -> value` mapping for the produced query string.
///
/// Insertion order is preserved through serialization: re-setting an
/// existing scalar keeps its position, and an override for a new name
/// appends at the end.
#[derive(Debug, Default)]
pub struct ParamAccumulator {
    params: IndexMap<String, ParamValue>,
}

impl ParamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` as a scalar under `name`, overwriting any previous
    /// scalar for that name (last occurrence wins).
    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params
            .insert(name.into(), ParamValue::Scalar(value.into()));
    }

    /// Append `value` to the list bound to `name`, creating the list on
    /// first occurrence. Append order is preserved in the output.
    pub fn append_to_list(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match self.params.entry(name.into()) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                ParamValue::List(values) => values.push(value.into()),
                // A scalar slot reclassifies to a list holding the new value.
                slot @ ParamValue::Scalar(_) => *slot = ParamValue::List(vec![value.into()]),
            },
            Entry::Vacant(entry) => {
                entry.insert(ParamValue::List(vec![value.into()]));
            }
        }
    }

    /// Unconditionally bind `value` under `name` in the shape supplied,
    /// regardless of any prior classification. A new name appends at the end.
    pub fn apply_override(&mut self, name: impl Into<String>, value: ParamValue) {
        self.params.insert(name.into(), value);
    }

    /// Bindings in first-insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Serialize to the final query string: `name=value` for scalars,
    /// `name=v1,v2,...,vn` for lists, pairs joined with `&`.
    pub fn to_querystring(&self) -> String {
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| match value {
                ParamValue::Scalar(v) => format!("{}={}", name, v),
                ParamValue::List(values) => format!("{}={}", name, values.join(",")),
            })
            .collect();
        pairs.join("&")
    }
}

/// A successfully translated catalog URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedQuery {
    /// Top-level domain captured from the host (`fr` in `www.vinted.fr`).
    pub domain: String,

    /// Query string in the form the search API expects.
    pub querystring: String,
}

/// Percent-decode `input`, keeping the reserved set encoded. Returns `None`
/// on a truncated or non-hex sequence, or when the decoded bytes are not
/// valid UTF-8.
fn decode_uri(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let byte = u8::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?;
            if RESERVED.contains(&byte) {
                out.extend_from_slice(&bytes[i..i + 3]);
            } else {
                out.push(byte);
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Translate a browser catalog URL into the `(domain, querystring)` pair the
/// search API expects, folding in `overrides` after extraction.
///
/// Returns `None` when the URL cannot be percent-decoded or the host does
/// not match [`HOST_PATTERN`]. Query segments outside the token grammar are
/// silently skipped; a matching host with no extractable segments yields a
/// valid empty query string. Failures never escape as panics or errors.
pub fn translate(url: &str, overrides: &Overrides) -> Option<TranslatedQuery> {
    let decoded = decode_uri(url)?;

    let host = Regex::new(HOST_PATTERN).ok()?;
    let domain = host.captures(&decoded)?.get(1)?.as_str().to_string();

    let grammar = Regex::new(PARAM_PATTERN).ok()?;
    let mut accumulator = ParamAccumulator::new();
    for segment in grammar.captures_iter(&decoded) {
        let Some(name) = segment.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let is_array = segment.get(2).is_some();
        let value = segment
            .get(3)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .replace(' ', "+");

        if is_array {
            let plural = if ID_SUFFIXED_KEYS.contains(&name) {
                format!("{}_ids", name)
            } else {
                format!("{}s", name)
            };
            accumulator.append_to_list(plural, value);
        } else {
            accumulator.set_scalar(name, value);
        }
    }

    for (name, value) in overrides {
        accumulator.apply_override(name.clone(), value.clone());
    }

    let querystring = accumulator.to_querystring();
    debug!(%domain, %querystring, "translated catalog URL");

    Some(TranslatedQuery {
        domain,
        querystring,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> Overrides {
        Overrides::new()
    }

    #[test]
    fn test_rejects_non_matching_host() {
        assert!(translate("https://www.ebay.fr/catalog?brand[]=nike", &no_overrides()).is_none());
        assert!(translate("http://www.vinted.fr/catalog", &no_overrides()).is_none());
        assert!(translate("https://vinted.fr/catalog", &no_overrides()).is_none());
        assert!(translate("https://www.vinted.F2/catalog", &no_overrides()).is_none());
    }

    #[test]
    fn test_valid_url_without_params_is_empty_query() {
        let query = translate("https://www.vinted.fr/catalog", &no_overrides()).unwrap();
        assert_eq!(query.domain, "fr");
        assert_eq!(query.querystring, "");
    }

    #[test]
    fn test_captures_domain_from_host() {
        let query = translate("https://www.vinted.be/catalog?order=newest_first", &no_overrides())
            .unwrap();
        assert_eq!(query.domain, "be");
    }

    #[test]
    fn test_id_suffix_and_pluralization_for_catalog() {
        let query = translate(
            "https://www.vinted.fr/catalog?catalog[]=1&catalog[]=2",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "catalog_ids=1,2");
    }

    #[test]
    fn test_id_suffix_and_pluralization_for_status() {
        let query = translate(
            "https://www.vinted.fr/catalog?status[]=2&status[]=3",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "status_ids=2,3");
    }

    #[test]
    fn test_generic_pluralization_without_id_suffix() {
        let query =
            translate("https://www.vinted.fr/catalog?brand[]=nike", &no_overrides()).unwrap();
        assert_eq!(query.querystring, "brands=nike");
    }

    #[test]
    fn test_list_order_follows_first_appearance() {
        let query = translate(
            "https://www.vinted.fr/catalog?size[]=38&brand[]=nike&size[]=40",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "sizes=38,40&brands=nike");
    }

    #[test]
    fn test_repeated_scalar_last_occurrence_wins() {
        let query = translate(
            "https://www.vinted.fr/catalog?order=a&per_page=20&order=b",
            &no_overrides(),
        )
        .unwrap();
        // Last value wins but the key keeps its first position.
        assert_eq!(query.querystring, "order=b&per_page=20");
    }

    #[test]
    fn test_spaces_in_values_become_plus() {
        let query = translate(
            "https://www.vinted.fr/catalog?search_text=blue jeans",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "search_text=blue+jeans");
    }

    #[test]
    fn test_percent_decoding_of_unreserved_sequences() {
        let query = translate(
            "https://www.vinted.fr/catalog?search_text=robe%20d%C3%A9t%C3%A9",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "search_text=robe+dété");
    }

    #[test]
    fn test_reserved_sequences_stay_encoded() {
        // %2C is a comma; decoding it would corrupt list serialization.
        let query = translate(
            "https://www.vinted.fr/catalog?price_to=10%2C50",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "price_to=10%2C50");
    }

    #[test]
    fn test_malformed_percent_sequence_rejected() {
        assert!(translate("https://www.vinted.fr/catalog?brand[]=%GG", &no_overrides()).is_none());
        assert!(translate("https://www.vinted.fr/catalog?brand[]=%2", &no_overrides()).is_none());
    }

    #[test]
    fn test_segments_outside_grammar_are_skipped() {
        let query = translate(
            "https://www.vinted.fr/catalog?price2=10&brand[]=nike",
            &no_overrides(),
        )
        .unwrap();
        assert_eq!(query.querystring, "brands=nike");
    }

    #[test]
    fn test_override_beats_extracted_scalar() {
        let mut overrides = Overrides::new();
        overrides.insert("per_page".to_string(), ParamValue::from("96"));
        let query = translate(
            "https://www.vinted.fr/catalog?per_page=20&order=newest_first",
            &overrides,
        )
        .unwrap();
        assert_eq!(query.querystring, "per_page=96&order=newest_first");
    }

    #[test]
    fn test_override_with_new_name_appends_at_end() {
        let mut overrides = Overrides::new();
        overrides.insert("order".to_string(), ParamValue::from("price_low_to_high"));
        let query =
            translate("https://www.vinted.fr/catalog?brand[]=nike", &overrides).unwrap();
        assert_eq!(query.querystring, "brands=nike&order=price_low_to_high");
    }

    #[test]
    fn test_override_takes_the_literal_shape_supplied() {
        let mut overrides = Overrides::new();
        overrides.insert("brands".to_string(), ParamValue::from(vec!["adidas", "puma"]));
        overrides.insert("per_page".to_string(), ParamValue::from("96"));
        let query =
            translate("https://www.vinted.fr/catalog?brand[]=nike", &overrides).unwrap();
        assert_eq!(query.querystring, "brands=adidas,puma&per_page=96");
    }

    #[test]
    fn test_round_trip_reproduces_classification() {
        let query = translate(
            "https://www.vinted.fr/catalog?catalog[]=5&catalog[]=6&order=newest_first&brand[]=nike&per_page=20",
            &no_overrides(),
        )
        .unwrap();

        let reparsed: Vec<(&str, Vec<&str>)> = query
            .querystring
            .split('&')
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap();
                (name, value.split(',').collect())
            })
            .collect();

        assert_eq!(
            reparsed,
            vec![
                ("catalog_ids", vec!["5", "6"]),
                ("order", vec!["newest_first"]),
                ("brands", vec!["nike"]),
                ("per_page", vec!["20"]),
            ]
        );
    }

    #[test]
    fn test_accumulator_entries_preserve_insertion_order() {
        let mut accumulator = ParamAccumulator::new();
        accumulator.set_scalar("order", "a");
        accumulator.append_to_list("brands", "nike");
        accumulator.set_scalar("order", "b");
        accumulator.append_to_list("brands", "adidas");

        let entries: Vec<(&str, &ParamValue)> = accumulator.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "order");
        assert_eq!(entries[0].1, &ParamValue::Scalar("b".to_string()));
        assert_eq!(entries[1].0, "brands");
        assert_eq!(
            entries[1].1,
            &ParamValue::List(vec!["nike".to_string(), "adidas".to_string()])
        );
    }

    #[test]
    fn test_accumulator_override_appends_new_names() {
        let mut accumulator = ParamAccumulator::new();
        accumulator.set_scalar("order", "a");
        accumulator.apply_override("per_page", ParamValue::from("96"));
        accumulator.apply_override("order", ParamValue::from(vec!["x", "y"]));

        assert_eq!(accumulator.to_querystring(), "order=x,y&per_page=96");
    }

    #[test]
    fn test_decode_uri_passthrough_without_escapes() {
        assert_eq!(
            decode_uri("https://www.vinted.fr/catalog").as_deref(),
            Some("https://www.vinted.fr/catalog")
        );
    }
}
