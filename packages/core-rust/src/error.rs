//! Error taxonomy for preview routing and registry construction.

/// Terminal outcomes of a preview request that are not a successful render.
///
/// Every variant maps to a 404. Only [`PreviewError::RouteNotRecognized`]
/// carries pass-through semantics, telling an enclosing router that this
/// handler declines the path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    #[error("request path is not a preview route: {path}")]
    RouteNotRecognized { path: String },
    #[error("no preview action named {name:?}")]
    ActionNotFound { name: String },
    #[error("unrecognized format extension {extension:?}")]
    FormatUnrecognized { extension: String },
    #[error("no part matching {content_type:?}")]
    PartNotFound { content_type: String },
}

impl PreviewError {
    /// Whether an enclosing router should try other handlers for this path.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::RouteNotRecognized { .. })
    }
}

/// Errors raised while building an [`crate::ActionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid action name {name:?}: only [A-Za-z0-9_] is allowed")]
    InvalidName { name: String },
    #[error("action {name:?} is already registered")]
    Duplicate { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unrecognized_route_passes() {
        assert!(PreviewError::RouteNotRecognized { path: "/a/".into() }.is_pass());
        assert!(!PreviewError::ActionNotFound { name: "x".into() }.is_pass());
        assert!(!PreviewError::FormatUnrecognized { extension: ".zz".into() }.is_pass());
        assert!(!PreviewError::PartNotFound { content_type: "text/plain".into() }.is_pass());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = PreviewError::ActionNotFound { name: "missing".into() };
        assert_eq!(err.to_string(), "no preview action named \"missing\"");
    }
}
