//! # Raw instrument-header documents
//!
//! One [`RawHeaderDocument`] is the ingestible unit produced by the header
//! store: the raw filename, UT date and observation number of a single UKIRT
//! exposure, plus the ordered list of FITS header mappings found in the raw
//! file (the first one is the primary header).
//!
//! This module also carries the two pure, total cleanup passes applied to
//! every document before translation:
//!
//! - [`document_to_ascii`] — replace any non-ASCII text with an ASCII-safe
//!   representation,
//! - [`fixup_headers`] — corrective rewrites for known legacy header
//!   irregularities from the early instrument data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single raw header value. FITS headers are not uniformly typed, so the
/// store may yield strings, integers, floats or booleans for any keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// One FITS header mapping, keyword to value.
pub type HeaderMap = BTreeMap<String, HeaderValue>;

/// Typed accessors over a [`HeaderMap`].
pub trait HeaderMapExt {
    /// String value of a keyword, if present and a string.
    fn get_str(&self, keyword: &str) -> Option<&str>;

    /// Numeric value of a keyword, if present and an integer or a float.
    fn get_f64(&self, keyword: &str) -> Option<f64>;
}

impl HeaderMapExt for HeaderMap {
    fn get_str(&self, keyword: &str) -> Option<&str> {
        match self.get(keyword) {
            Some(HeaderValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn get_f64(&self, keyword: &str) -> Option<f64> {
        match self.get(keyword) {
            Some(HeaderValue::Int(v)) => Some(*v as f64),
            Some(HeaderValue::Float(v)) => Some(*v),
            _ => None,
        }
    }
}

/// One ingestible unit: the raw headers of a single observation.
///
/// # Fields
///
/// * `filename` - raw data filename, used to derive the record identity and
///   the archive URI
/// * `utdate` - UT date of the observation in `YYYYMMDD` form
/// * `obs` - observation sequence number within the night
/// * `headers` - ordered header mappings; the first entry is the primary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHeaderDocument {
    pub filename: String,
    pub utdate: String,
    pub obs: i64,
    pub headers: Vec<HeaderMap>,
}

impl RawHeaderDocument {
    /// The primary header mapping, when the document has any headers at all.
    pub fn primary(&self) -> Option<&HeaderMap> {
        self.headers.first()
    }

    /// Record identity: the filename without its extension.
    pub fn id(&self) -> &str {
        match self.filename.rfind('.') {
            Some(pos) => &self.filename[..pos],
            None => &self.filename,
        }
    }

    /// Whether the raw file is in FITS format, detected from the suffix.
    pub fn is_fits(&self) -> bool {
        self.filename.ends_with(".fits")
    }
}

/// Replace any non-ASCII text in the document's header mappings with an
/// ASCII-safe representation. Operates in place and always succeeds.
pub fn document_to_ascii(doc: &mut RawHeaderDocument) {
    for header in &mut doc.headers {
        let cleaned: HeaderMap = std::mem::take(header)
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    HeaderValue::String(s) => HeaderValue::String(to_ascii(&s)),
                    other => other,
                };
                (to_ascii(&key), value)
            })
            .collect();
        *header = cleaned;
    }
}

fn to_ascii(text: &str) -> String {
    if text.is_ascii() {
        return text.to_owned();
    }
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// Apply corrective rewrites for known legacy header irregularities.
///
/// Operates in place and always succeeds. Current fixups:
///
/// - string values are stripped of the trailing blank padding some archaic
///   header writers emitted,
/// - a project code stored under the old `PROJID` keyword is moved to
///   `PROJECT` when the latter is absent,
/// - the legacy `OBJCLASS` spelling of the observation type is renamed to
///   `OBSTYPE` when the latter is absent.
pub fn fixup_headers(doc: &mut RawHeaderDocument) {
    for header in &mut doc.headers {
        for value in header.values_mut() {
            if let HeaderValue::String(s) = value {
                let trimmed = s.trim_end();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_owned();
                }
            }
        }

        if !header.contains_key("PROJECT") {
            if let Some(value) = header.remove("PROJID") {
                header.insert("PROJECT".to_owned(), value);
            }
        }

        if !header.contains_key("OBSTYPE") {
            if let Some(value) = header.remove("OBJCLASS") {
                header.insert("OBSTYPE".to_owned(), value);
            }
        }
    }
}

#[cfg(test)]
mod headers_test {
    use super::*;

    fn doc_with(header: HeaderMap) -> RawHeaderDocument {
        RawHeaderDocument {
            filename: "a20230101_00042.fits".to_owned(),
            utdate: "20230101".to_owned(),
            obs: 42,
            headers: vec![header],
        }
    }

    #[test]
    fn test_id_and_fits_flag() {
        let doc = doc_with(HeaderMap::new());
        assert_eq!(doc.id(), "a20230101_00042");
        assert!(doc.is_fits());

        let mut sdf = doc.clone();
        sdf.filename = "u20040915_00012.sdf".to_owned();
        assert_eq!(sdf.id(), "u20040915_00012");
        assert!(!sdf.is_fits());
    }

    #[test]
    fn test_document_to_ascii() {
        let mut header = HeaderMap::new();
        header.insert(
            "OBSERVER".to_owned(),
            HeaderValue::String("Écarté".to_owned()),
        );
        header.insert("NEXP".to_owned(), HeaderValue::Int(4));
        let mut doc = doc_with(header);

        document_to_ascii(&mut doc);

        assert_eq!(doc.headers[0].get_str("OBSERVER"), Some("?cart?"));
        assert_eq!(doc.headers[0].get_f64("NEXP"), Some(4.0));
    }

    #[test]
    fn test_fixup_projid_moved_to_project() {
        let mut header = HeaderMap::new();
        header.insert(
            "PROJID".to_owned(),
            HeaderValue::String("U/23A/1".to_owned()),
        );
        let mut doc = doc_with(header);

        fixup_headers(&mut doc);

        assert_eq!(doc.headers[0].get_str("PROJECT"), Some("U/23A/1"));
        assert!(!doc.headers[0].contains_key("PROJID"));
    }

    #[test]
    fn test_fixup_does_not_clobber_existing_project() {
        let mut header = HeaderMap::new();
        header.insert(
            "PROJECT".to_owned(),
            HeaderValue::String("U/23A/1".to_owned()),
        );
        header.insert(
            "PROJID".to_owned(),
            HeaderValue::String("U/99Z/9".to_owned()),
        );
        let mut doc = doc_with(header);

        fixup_headers(&mut doc);

        assert_eq!(doc.headers[0].get_str("PROJECT"), Some("U/23A/1"));
    }

    #[test]
    fn test_fixup_trims_padding_and_renames_objclass() {
        let mut header = HeaderMap::new();
        header.insert(
            "OBJCLASS".to_owned(),
            HeaderValue::String("OBJECT      ".to_owned()),
        );
        let mut doc = doc_with(header);

        fixup_headers(&mut doc);

        assert_eq!(doc.headers[0].get_str("OBSTYPE"), Some("OBJECT"));
    }
}
