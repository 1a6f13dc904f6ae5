//! Part resolution: picks the single leaf of a message tree to display.
//!
//! Two contracts live here and must stay separate:
//!
//! - **Named** resolution ([`resolve`] with a media range) is strict. It
//!   returns the first leaf in document order whose content type matches,
//!   or [`PreviewError::PartNotFound`]. It never substitutes another part.
//! - **Default** resolution ([`resolve`] with `None`, or [`resolve_default`])
//!   encodes the display preference: the last alternative, else HTML, else
//!   plain text, else the first leaf.

use tracing::trace;

use crate::content_type::{ContentType, MediaRange};
use crate::error::PreviewError;
use crate::message::{Leaf, MultipartKind, Node};

/// A leaf selected for display together with the range used to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPart<'a> {
    pub leaf: &'a Leaf,
    pub requested: Option<&'a MediaRange>,
}

impl<'a> ResolvedPart<'a> {
    #[must_use]
    pub fn content_type(&self) -> Option<&'a ContentType> {
        self.leaf.content_type()
    }

    /// `type/subtype` of the resolved leaf, or an empty string when the
    /// leaf declares no content type.
    #[must_use]
    pub fn essence(&self) -> &'a str {
        self.leaf.content_type().map_or("", ContentType::essence)
    }
}

/// Resolves `requested` against `node`.
///
/// # Errors
///
/// Returns [`PreviewError::PartNotFound`] when a named range matches no
/// leaf, or when the tree holds no leaves at all.
pub fn resolve<'a>(
    node: &'a Node,
    requested: Option<&'a MediaRange>,
) -> Result<ResolvedPart<'a>, PreviewError> {
    let leaf = match requested {
        Some(range) => first_match(node, range),
        None => preferred(node),
    };

    trace!(
        requested = ?requested,
        found = leaf.is_some(),
        "resolve part"
    );

    leaf.map(|leaf| ResolvedPart { leaf, requested })
        .ok_or_else(|| PreviewError::PartNotFound {
            content_type: requested.map(ToString::to_string).unwrap_or_default(),
        })
}

/// Resolves the part shown by default, biased toward `format` if given.
///
/// A leaf matching `format` wins outright; otherwise resolution falls back
/// to the no-preference rules of [`resolve`].
///
/// # Errors
///
/// Returns [`PreviewError::PartNotFound`] only when the tree has no leaves.
pub fn resolve_default<'a>(
    node: &'a Node,
    format: Option<&'a MediaRange>,
) -> Result<ResolvedPart<'a>, PreviewError> {
    if let Some(range) = format {
        if let Some(leaf) = first_match(node, range) {
            return Ok(ResolvedPart {
                leaf,
                requested: Some(range),
            });
        }
    }
    resolve(node, None)
}

/// Default display preference for non-alternative containers.
fn default_ranges() -> [MediaRange; 2] {
    [
        MediaRange::from(&ContentType::html()),
        MediaRange::from(&ContentType::plain()),
    ]
}

fn preferred(node: &Node) -> Option<&Leaf> {
    match node {
        Node::Leaf(leaf) => Some(leaf),
        Node::Container(container) if *container.kind() == MultipartKind::Alternative => {
            container.parts().last().and_then(preferred)
        }
        Node::Container(_) => default_ranges()
            .iter()
            .find_map(|range| first_match(node, range))
            .or_else(|| node.leaves().into_iter().next()),
    }
}

fn first_match<'a>(node: &'a Node, range: &MediaRange) -> Option<&'a Leaf> {
    match node {
        Node::Leaf(leaf) => leaf
            .content_type()
            .filter(|ct| ct.matches(range))
            .map(|_| leaf),
        Node::Container(container) => container
            .parts()
            .iter()
            .find_map(|part| first_match(part, range)),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn range(s: &str) -> MediaRange {
        MediaRange::parse(s).unwrap()
    }

    fn body_of(part: &ResolvedPart<'_>) -> String {
        part.leaf.body_text().into_owned()
    }

    fn alternative() -> Node {
        Node::alternative(vec![
            Node::text("This is plain text"),
            Node::html("<h1>This is HTML</h1>"),
        ])
    }

    #[test]
    fn leaf_without_request_is_itself() {
        let node = Node::untyped("Hello");
        let part = resolve(&node, None).unwrap();
        assert_eq!(body_of(&part), "Hello");
        assert_eq!(part.essence(), "");
    }

    #[test]
    fn untyped_leaf_never_matches_named_request() {
        let node = Node::untyped("Hello");
        assert!(resolve(&node, Some(&range("text/plain"))).is_err());
    }

    #[test]
    fn leaf_matches_with_charset_parameter() {
        let node = Node::html("<h1>Hello</h1>");
        let html = range("text/html");
        let part = resolve(&node, Some(&html)).unwrap();
        assert_eq!(body_of(&part), "<h1>Hello</h1>");
        assert_eq!(part.essence(), "text/html");
    }

    #[test]
    fn named_request_missing_is_not_found() {
        let node = Node::html("<h1>Hello</h1>");
        let plain = range("text/plain");
        assert_eq!(
            resolve(&node, Some(&plain)),
            Err(PreviewError::PartNotFound {
                content_type: "text/plain".to_string()
            })
        );
    }

    #[test]
    fn alternative_default_is_last_child() {
        let node = alternative();
        assert_eq!(body_of(&resolve(&node, None).unwrap()), "<h1>This is HTML</h1>");

        let reversed = Node::alternative(vec![
            Node::html("<h1>This is HTML</h1>"),
            Node::text("This is plain text"),
        ]);
        assert_eq!(body_of(&resolve(&reversed, None).unwrap()), "This is plain text");
    }

    #[test]
    fn alternative_last_child_container_resolves_to_leaf() {
        let node = Node::alternative(vec![
            Node::text("plain"),
            Node::mixed(vec![Node::text("inner plain"), Node::html("<p>inner</p>")]),
        ]);
        let part = resolve(&node, None).unwrap();
        assert_eq!(body_of(&part), "<p>inner</p>");
    }

    #[test]
    fn empty_container_is_not_found() {
        assert!(resolve(&Node::alternative(vec![]), None).is_err());
        assert!(resolve(&Node::mixed(vec![]), None).is_err());
        assert!(resolve_default(&Node::mixed(vec![]), Some(&range("text/html"))).is_err());
    }

    #[test]
    fn named_request_searches_nested_parts_in_document_order() {
        let node = Node::mixed(vec![
            Node::alternative(vec![Node::text("omg"), Node::html("<h1>Hello</h1>")]),
            Node::text("second plain"),
        ]);
        let plain = range("text/plain");
        assert_eq!(body_of(&resolve(&node, Some(&plain)).unwrap()), "omg");
        let html = range("text/html");
        assert_eq!(body_of(&resolve(&node, Some(&html)).unwrap()), "<h1>Hello</h1>");
    }

    #[test]
    fn mixed_default_prefers_html_then_plain_then_first() {
        let png = ContentType::parse("image/png").unwrap();

        let with_html = Node::mixed(vec![Node::text("t"), Node::html("<p>h</p>")]);
        assert_eq!(body_of(&resolve(&with_html, None).unwrap()), "<p>h</p>");

        let with_plain = Node::mixed(vec![Node::typed(png.clone(), "img"), Node::text("t")]);
        assert_eq!(body_of(&resolve(&with_plain, None).unwrap()), "t");

        let neither = Node::mixed(vec![
            Node::typed(png, "img"),
            Node::typed(ContentType::parse("application/pdf").unwrap(), "pdf"),
        ]);
        assert_eq!(body_of(&resolve(&neither, None).unwrap()), "img");
    }

    #[test]
    fn format_bias_wins_over_default_preference() {
        let node = alternative();
        let plain = range("text/plain");
        let part = resolve_default(&node, Some(&plain)).unwrap();
        assert_eq!(body_of(&part), "This is plain text");
        assert_eq!(part.essence(), "text/plain");
    }

    #[test]
    fn mixed_format_bias_falls_back_to_html_then_first() {
        let plain = range("text/plain");
        let html_only = Node::mixed(vec![
            Node::typed(ContentType::parse("image/png").unwrap(), "img"),
            Node::html("<p>h</p>"),
        ]);
        assert_eq!(body_of(&resolve_default(&html_only, Some(&plain)).unwrap()), "<p>h</p>");

        let neither = Node::mixed(vec![Node::typed(
            ContentType::parse("image/png").unwrap(),
            "img",
        )]);
        assert_eq!(body_of(&resolve_default(&neither, Some(&plain)).unwrap()), "img");
    }

    #[test]
    fn unmatched_format_bias_on_leaf_returns_leaf() {
        let node = Node::html("<h1>Hello</h1>");
        let plain = range("text/plain");
        let part = resolve_default(&node, Some(&plain)).unwrap();
        assert_eq!(body_of(&part), "<h1>Hello</h1>");
        assert!(part.requested.is_none());
    }

    fn leaf_strategy() -> impl Strategy<Value = Node> {
        prop_oneof![
            "[a-z]{0,8}".prop_map(|s| Node::text(s)),
            "[a-z]{0,8}".prop_map(|s| Node::html(format!("<p>{s}</p>"))),
            "[a-z]{0,8}".prop_map(|s| Node::typed(ContentType::parse("image/png").unwrap(), s)),
            "[a-z]{0,8}".prop_map(|s| Node::untyped(s)),
        ]
    }

    fn tree_strategy() -> impl Strategy<Value = Node> {
        leaf_strategy().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 1..4).prop_map(Node::alternative),
                prop::collection::vec(inner, 1..4).prop_map(Node::mixed),
            ]
        })
    }

    proptest! {
        #[test]
        fn alternative_default_picks_last_leaf(first in leaf_strategy(), last in leaf_strategy()) {
            let node = Node::alternative(vec![first, last.clone()]);
            let Node::Leaf(expected) = &last else { unreachable!() };
            let part = resolve(&node, None).unwrap();
            prop_assert_eq!(part.leaf, expected);
        }

        #[test]
        fn named_request_returns_matching_leaf_or_not_found(node in tree_strategy()) {
            for wanted in ["text/plain", "text/html", "image/png", "application/pdf"] {
                let wanted = range(wanted);
                let present = node
                    .leaves()
                    .into_iter()
                    .find(|leaf| leaf.content_type().is_some_and(|ct| ct.matches(&wanted)));
                match (resolve(&node, Some(&wanted)), present) {
                    (Ok(part), Some(expected)) => prop_assert!(std::ptr::eq(part.leaf, expected)),
                    (Err(err), None) => prop_assert!(
                        matches!(err, PreviewError::PartNotFound { .. }),
                        "unexpected error"
                    ),
                    (Ok(_), None) => prop_assert!(false, "substituted a part for {}", wanted),
                    (Err(_), Some(_)) => prop_assert!(false, "missed a present {}", wanted),
                }
            }
        }

        #[test]
        fn resolution_is_idempotent(node in tree_strategy()) {
            let first = resolve(&node, None).map(|p| p.leaf as *const Leaf);
            let second = resolve(&node, None).map(|p| p.leaf as *const Leaf);
            prop_assert_eq!(first, second);
        }
    }
}
