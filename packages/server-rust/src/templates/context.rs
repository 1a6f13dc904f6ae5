//! Serializable view models handed to the templates.

use mailview_core::Headers;
use serde::Serialize;

/// One entry of the action index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexLink {
    pub name: String,
    pub url: String,
}

/// Link to the same action rendered with a different default part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub label: &'static str,
    pub url: String,
}

/// Link to the raw body of an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentLink {
    pub filename: String,
    pub content_type: String,
    pub url: String,
}

/// Everything the framed preview page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FramedPage {
    pub name: String,
    pub headers: Headers,
    /// Essence of the displayed part, empty when it declares none.
    pub content_type: String,
    /// Frame source: this action's path with `?part=` appended.
    pub part_url: String,
    pub alternates: Vec<AlternateLink>,
    pub attachments: Vec<AttachmentLink>,
}
