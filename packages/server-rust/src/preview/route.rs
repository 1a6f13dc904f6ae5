//! Request routing: decides which of the preview responses a path gets.
//!
//! Evaluation order for every request:
//! 1. path outside the mount or not `identifier[.ext]` -> pass-through 404
//! 2. empty path-info or `/` -> index
//! 3. unknown action or unknown extension -> 404
//! 4. `part` query present -> raw body of the resolved part
//! 5. otherwise -> framed preview of the default part

use std::sync::Arc;

use bytes::Bytes;
use mailview_core::{
    extension_for, parse_path, resolve, resolve_default, ActionPath, ActionRegistry, ContentType,
    Interceptors, MediaRange, Message, ParsedPath, PreviewError, ResolvedPart,
};
use tracing::debug;

use crate::templates::{AlternateLink, AttachmentLink, FramedPage, IndexLink};

/// Formats offered as alternate links, with their labels.
const ALTERNATE_FORMATS: [(&str, &str); 2] = [
    ("text/html", "View HTML version"),
    ("text/plain", "View plain text version"),
];

/// A parsed inbound request.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    /// Full request path, including any mount prefix.
    pub path: &'a str,
    /// Raw `part` query value; `Some("")` selects raw mode with no preference.
    pub part: Option<&'a str>,
}

/// A successful routing outcome, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Index(Vec<IndexLink>),
    Framed(FramedPage),
    Raw {
        content_type: Option<ContentType>,
        body: Bytes,
    },
}

/// Maps request paths to preview outcomes for one set of actions.
#[derive(Debug)]
pub struct PreviewRouter {
    registry: Arc<ActionRegistry>,
    interceptors: Interceptors,
    mount: String,
}

impl PreviewRouter {
    /// `mount` must already be normalized (leading slash, no trailing slash).
    #[must_use]
    pub fn new(registry: Arc<ActionRegistry>, interceptors: Interceptors, mount: String) -> Self {
        Self {
            registry,
            interceptors,
            mount,
        }
    }

    #[must_use]
    pub fn mount(&self) -> &str {
        &self.mount
    }

    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Routes one request.
    ///
    /// # Errors
    ///
    /// Returns the [`PreviewError`] describing why no preview applies.
    pub fn route(&self, request: &RouteRequest<'_>) -> Result<Preview, PreviewError> {
        let path_info = self.path_info(request.path)?;

        let action = match parse_path(path_info)? {
            ParsedPath::Index => {
                debug!(mount = %self.mount, "render index");
                return Ok(Preview::Index(self.index_links()));
            }
            ParsedPath::Action(action) => action,
        };

        if !self.registry.contains(&action.name) {
            return Err(PreviewError::ActionNotFound { name: action.name });
        }
        let format = action.format()?;

        let message = self
            .registry
            .build_message(&action.name, &self.interceptors)
            .ok_or_else(|| PreviewError::ActionNotFound {
                name: action.name.clone(),
            })?;

        match request.part {
            Some(part) => Self::raw_part(&action, &message, part),
            None => self.framed(&action, &message, format.as_ref()),
        }
    }

    /// Strips the mount prefix, declining paths that live outside it.
    fn path_info<'p>(&self, path: &'p str) -> Result<&'p str, PreviewError> {
        if self.mount.is_empty() {
            return Ok(path);
        }
        match path.strip_prefix(self.mount.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Ok(rest),
            _ => Err(PreviewError::RouteNotRecognized {
                path: path.to_string(),
            }),
        }
    }

    fn index_links(&self) -> Vec<IndexLink> {
        self.registry
            .names()
            .map(|name| IndexLink {
                name: name.to_string(),
                url: format!("{}/{name}", self.mount),
            })
            .collect()
    }

    fn raw_part(action: &ActionPath, message: &Message, part: &str) -> Result<Preview, PreviewError> {
        let requested = if part.trim().is_empty() {
            None
        } else {
            Some(
                MediaRange::parse(part).map_err(|_| PreviewError::PartNotFound {
                    content_type: part.to_string(),
                })?,
            )
        };

        let resolved = resolve(&message.root, requested.as_ref())?;
        debug!(
            action = %action.name,
            requested = part,
            content_type = resolved.essence(),
            "render raw part"
        );

        Ok(Preview::Raw {
            content_type: resolved.content_type().cloned(),
            body: resolved.leaf.body().clone(),
        })
    }

    fn framed(
        &self,
        action: &ActionPath,
        message: &Message,
        format: Option<&ContentType>,
    ) -> Result<Preview, PreviewError> {
        let bias = format.map(MediaRange::from);
        let resolved = resolve_default(&message.root, bias.as_ref())?;
        debug!(
            action = %action.name,
            format = ?format.map(ContentType::essence),
            content_type = resolved.essence(),
            "render framed preview"
        );

        let base = format!(
            "{}/{}{}",
            self.mount,
            action.name,
            action.extension.as_deref().unwrap_or_default()
        );

        Ok(Preview::Framed(FramedPage {
            name: action.name.clone(),
            headers: message.headers.clone(),
            content_type: resolved.essence().to_string(),
            part_url: part_url(&base, resolved.essence()),
            alternates: self.alternates(action, message, &resolved),
            attachments: message
                .attachments()
                .into_iter()
                .map(|leaf| {
                    let essence = leaf.content_type().map_or("", ContentType::essence);
                    AttachmentLink {
                        filename: leaf.filename().unwrap_or_default().to_string(),
                        content_type: essence.to_string(),
                        url: part_url(&base, essence),
                    }
                })
                .collect(),
        }))
    }

    /// Links to the other displayable representations present in `message`.
    fn alternates(
        &self,
        action: &ActionPath,
        message: &Message,
        shown: &ResolvedPart<'_>,
    ) -> Vec<AlternateLink> {
        let leaves = message.root.leaves();
        ALTERNATE_FORMATS
            .iter()
            .filter_map(|(essence, label)| {
                let content_type = ContentType::parse(essence).ok()?;
                if shown.essence().eq_ignore_ascii_case(essence) {
                    return None;
                }
                let range = MediaRange::from(&content_type);
                leaves
                    .iter()
                    .any(|leaf| {
                        !leaf.is_attachment()
                            && leaf.content_type().is_some_and(|ct| ct.matches(&range))
                    })
                    .then(|| AlternateLink {
                        label: *label,
                        url: format!(
                            "{}/{}.{}",
                            self.mount,
                            action.name,
                            extension_for(&content_type).unwrap_or_default()
                        ),
                    })
            })
            .collect()
    }
}

/// Builds `<base>?part=<escaped essence>`.
fn part_url(base: &str, essence: &str) -> String {
    format!("{base}?part={}", urlencoding::encode(essence))
}
