//! Request path decomposition.
//!
//! The path-info left after stripping the mount prefix is either the index
//! (`""` or `"/"`), an action reference (`name` or `name.ext` as the final
//! segment), or something this handler does not recognize.

use std::sync::LazyLock;

use regex::Regex;

use crate::content_type::ContentType;
use crate::error::PreviewError;

static ACTION_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)(\.[A-Za-z0-9_]+)?$").expect("static pattern is valid")
});

/// Extensions offered for the alternate-format links of the preview page.
const FORMAT_EXTENSIONS: &[(&str, &str)] = &[("text/html", "html"), ("text/plain", "txt")];

/// Result of parsing a request's path-info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPath {
    Index,
    Action(ActionPath),
}

/// An action reference with its optional dot-prefixed extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPath {
    pub name: String,
    /// Extension including the leading dot, e.g. `.html`.
    pub extension: Option<String>,
}

impl ActionPath {
    /// Content type mapped from the extension, `None` when no extension was given.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::FormatUnrecognized`] for an extension the
    /// MIME registry does not know.
    pub fn format(&self) -> Result<Option<ContentType>, PreviewError> {
        match &self.extension {
            None => Ok(None),
            Some(ext) => format_for_extension(ext)
                .map(Some)
                .ok_or_else(|| PreviewError::FormatUnrecognized {
                    extension: ext.clone(),
                }),
        }
    }
}

/// Parses `path_info` into an index marker or an action reference.
///
/// # Errors
///
/// Returns [`PreviewError::RouteNotRecognized`] when the final segment is
/// not `identifier[.ext]`.
pub fn parse_path(path_info: &str) -> Result<ParsedPath, PreviewError> {
    if path_info.is_empty() || path_info == "/" {
        return Ok(ParsedPath::Index);
    }

    let segment = path_info.rsplit('/').next().unwrap_or(path_info);
    let captures = ACTION_SEGMENT
        .captures(segment)
        .ok_or_else(|| PreviewError::RouteNotRecognized {
            path: path_info.to_string(),
        })?;

    Ok(ParsedPath::Action(ActionPath {
        name: captures[1].to_string(),
        extension: captures.get(2).map(|m| m.as_str().to_string()),
    }))
}

/// Looks up the content type registered for a file extension.
///
/// Accepts the extension with or without its leading dot.
#[must_use]
pub fn format_for_extension(extension: &str) -> Option<ContentType> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    if ext.is_empty() {
        return None;
    }
    mime_guess::from_ext(ext).first().map(ContentType::from)
}

/// Preferred extension for a displayable content type (`html` or `txt`).
#[must_use]
pub fn extension_for(content_type: &ContentType) -> Option<&'static str> {
    FORMAT_EXTENSIONS
        .iter()
        .find(|(essence, _)| content_type.essence().eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str, extension: Option<&str>) -> ParsedPath {
        ParsedPath::Action(ActionPath {
            name: name.to_string(),
            extension: extension.map(ToString::to_string),
        })
    }

    #[test]
    fn empty_and_slash_are_index() {
        assert_eq!(parse_path(""), Ok(ParsedPath::Index));
        assert_eq!(parse_path("/"), Ok(ParsedPath::Index));
    }

    #[test]
    fn bare_action_name() {
        assert_eq!(
            parse_path("/plain_text_message"),
            Ok(action("plain_text_message", None))
        );
    }

    #[test]
    fn action_with_extension() {
        assert_eq!(
            parse_path("/multipart_alternative.txt"),
            Ok(action("multipart_alternative", Some(".txt")))
        );
    }

    #[test]
    fn only_the_trailing_segment_is_considered() {
        assert_eq!(parse_path("/nested/dir/welcome"), Ok(action("welcome", None)));
    }

    #[test]
    fn punctuation_is_not_recognized() {
        for path in ["/with-dash", "/trailing/", "/two.dots.html", "/.html", "/sp ace"] {
            assert!(
                matches!(parse_path(path), Err(PreviewError::RouteNotRecognized { .. })),
                "{path} should not parse"
            );
        }
    }

    #[test]
    fn known_extensions_map_to_content_types() {
        assert_eq!(format_for_extension(".html").unwrap().essence(), "text/html");
        assert_eq!(format_for_extension("txt").unwrap().essence(), "text/plain");
        assert!(format_for_extension(".zzqq").is_none());
        assert!(format_for_extension(".").is_none());
    }

    #[test]
    fn action_format_distinguishes_missing_from_unknown() {
        let ParsedPath::Action(plain) = parse_path("/welcome").unwrap() else {
            panic!("expected action");
        };
        assert_eq!(plain.format(), Ok(None));

        let ParsedPath::Action(unknown) = parse_path("/welcome.zzqq").unwrap() else {
            panic!("expected action");
        };
        assert_eq!(
            unknown.format(),
            Err(PreviewError::FormatUnrecognized {
                extension: ".zzqq".to_string()
            })
        );
    }

    #[test]
    fn extension_for_displayable_types() {
        assert_eq!(extension_for(&ContentType::html()), Some("html"));
        assert_eq!(
            extension_for(&ContentType::parse("text/plain; charset=UTF-8").unwrap()),
            Some("txt")
        );
        assert_eq!(extension_for(&ContentType::parse("image/png").unwrap()), None);
    }
}
