//! Content-type values and the media-range patterns used to match them.
//!
//! A [`ContentType`] is what a message leaf declares (`text/html; charset=UTF-8`).
//! A [`MediaRange`] is what a caller asks for (`text/html`, `text/*`, `text`).
//! Matching compares type and subtype case-insensitively and ignores any
//! parameter segment, so `text/html` never matches `text/html-fragment`.

use std::fmt;
use std::str::FromStr;

use mime::Mime;
use serde::{Serialize, Serializer};

/// Errors from parsing a content type or media range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentTypeError {
    #[error("invalid content type: {value:?}")]
    Invalid { value: String },
    #[error("content type is empty")]
    Empty,
}

/// A parsed `type/subtype[; params]` value declared by a message leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType(Mime);

impl ContentType {
    /// Parses a full content-type header value.
    ///
    /// # Errors
    ///
    /// Returns [`ContentTypeError`] if the value is empty or not a valid
    /// `type/subtype` pair.
    pub fn parse(value: &str) -> Result<Self, ContentTypeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContentTypeError::Empty);
        }
        trimmed
            .parse::<Mime>()
            .map(Self)
            .map_err(|_| ContentTypeError::Invalid {
                value: value.to_string(),
            })
    }

    /// `text/html` content type.
    #[must_use]
    pub fn html() -> Self {
        Self(mime::TEXT_HTML)
    }

    /// `text/plain` content type.
    #[must_use]
    pub fn plain() -> Self {
        Self(mime::TEXT_PLAIN)
    }

    #[must_use]
    pub fn main_type(&self) -> &str {
        self.0.type_().as_str()
    }

    #[must_use]
    pub fn sub_type(&self) -> &str {
        self.0.subtype().as_str()
    }

    /// The `type/subtype` pair without parameters.
    #[must_use]
    pub fn essence(&self) -> &str {
        self.0.essence_str()
    }

    /// The full value including parameters, suitable for a `Content-Type` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.0.get_param(mime::CHARSET).map(|name| name.as_str())
    }

    /// Returns `true` if this content type falls within `range`.
    #[must_use]
    pub fn matches(&self, range: &MediaRange) -> bool {
        if !self.main_type().eq_ignore_ascii_case(&range.main) {
            return false;
        }
        match &range.sub {
            Some(sub) => self.sub_type().eq_ignore_ascii_case(sub),
            None => true,
        }
    }

    #[must_use]
    pub fn as_mime(&self) -> &Mime {
        &self.0
    }
}

impl From<Mime> for ContentType {
    fn from(mime: Mime) -> Self {
        Self(mime)
    }
}

impl FromStr for ContentType {
    type Err = ContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A requested content-type pattern.
///
/// `sub == None` matches every subtype of `main` and comes from `text/*`
/// or a bare `text`. Parameters in the requested value are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRange {
    main: String,
    sub: Option<String>,
}

impl MediaRange {
    /// Parses a requested type such as `text/html`, `text/*` or `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentTypeError`] if the value is empty or contains
    /// characters outside the RFC 2045 token set.
    pub fn parse(value: &str) -> Result<Self, ContentTypeError> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        if essence.is_empty() {
            return Err(ContentTypeError::Empty);
        }

        let invalid = || ContentTypeError::Invalid {
            value: value.to_string(),
        };

        let (main, sub) = match essence.split_once('/') {
            Some((main, sub)) => (main.trim(), Some(sub.trim())),
            None => (essence, None),
        };
        if !is_token(main) || main == "*" {
            return Err(invalid());
        }
        let sub = match sub {
            Some("*") | None => None,
            Some(sub) if is_token(sub) => Some(sub.to_ascii_lowercase()),
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            main: main.to_ascii_lowercase(),
            sub,
        })
    }

    #[must_use]
    pub fn main_type(&self) -> &str {
        &self.main
    }

    #[must_use]
    pub fn sub_type(&self) -> Option<&str> {
        self.sub.as_deref()
    }
}

impl From<&ContentType> for MediaRange {
    fn from(content_type: &ContentType) -> Self {
        Self {
            main: content_type.main_type().to_ascii_lowercase(),
            sub: Some(content_type.sub_type().to_ascii_lowercase()),
        }
    }
}

impl FromStr for MediaRange {
    type Err = ContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub.as_deref().unwrap_or("*"))
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$&-^_.+*'`|~".contains(&b)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> MediaRange {
        MediaRange::parse(s).unwrap()
    }

    #[test]
    fn parse_keeps_parameters() {
        let ct = ContentType::parse("text/html; charset=UTF-8").unwrap();
        assert_eq!(ct.essence(), "text/html");
        assert_eq!(ct.main_type(), "text");
        assert_eq!(ct.sub_type(), "html");
        assert!(ct.charset().is_some_and(|c| c.eq_ignore_ascii_case("utf-8")));
        assert!(ct.as_str().contains("charset"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(ContentType::parse("  "), Err(ContentTypeError::Empty));
        assert!(matches!(
            ContentType::parse("not a type"),
            Err(ContentTypeError::Invalid { .. })
        ));
    }

    #[test]
    fn matches_ignores_parameters() {
        let ct = ContentType::parse("text/html; charset=UTF-8").unwrap();
        assert!(ct.matches(&range("text/html")));
        assert!(ct.matches(&range("text/html; charset=iso-8859-1")));
    }

    #[test]
    fn matches_is_case_insensitive() {
        let ct = ContentType::parse("Text/HTML").unwrap();
        assert!(ct.matches(&range("text/html")));
        assert!(ContentType::html().matches(&range("TEXT/Html")));
    }

    #[test]
    fn matches_does_not_accept_longer_subtype() {
        let ct = ContentType::parse("text/html-fragment").unwrap();
        assert!(!ct.matches(&range("text/html")));
        assert!(!ContentType::html().matches(&range("text/htm")));
    }

    #[test]
    fn wildcard_and_bare_main_type_match_any_subtype() {
        assert!(ContentType::plain().matches(&range("text/*")));
        assert!(ContentType::plain().matches(&range("text")));
        assert!(!ContentType::plain().matches(&range("image/*")));
    }

    #[test]
    fn media_range_rejects_invalid_values() {
        assert_eq!(MediaRange::parse(""), Err(ContentTypeError::Empty));
        assert_eq!(MediaRange::parse("; charset=utf-8"), Err(ContentTypeError::Empty));
        assert!(MediaRange::parse("*/*").is_err());
        assert!(MediaRange::parse("text/h tml").is_err());
        assert!(MediaRange::parse("<script>").is_err());
    }

    #[test]
    fn media_range_from_content_type_is_exact() {
        let ct = ContentType::parse("image/png").unwrap();
        let r = MediaRange::from(&ct);
        assert_eq!(r.to_string(), "image/png");
        assert!(ct.matches(&r));
    }

    #[test]
    fn display_and_serialize_use_full_value() {
        let ct = ContentType::html();
        assert_eq!(ct.to_string(), "text/html");
        assert_eq!(range("text").to_string(), "text/*");
    }
}
