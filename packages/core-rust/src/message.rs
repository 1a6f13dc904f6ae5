//! Email message tree.
//!
//! A [`Message`] pairs the envelope [`Headers`] with a MIME body [`Node`].
//! A node is either a [`Leaf`] (content type plus raw body) or a
//! [`Container`] (multipart subtype plus ordered children). Messages are
//! built fresh for every request and never shared between requests.

use bytes::Bytes;
use serde::Serialize;

use crate::content_type::ContentType;

/// Envelope headers shown in the preview summary.
///
/// Addresses are stored verbatim so display names such as
/// `Josh Peek <josh@37signals.com>` survive untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headers {
    pub from: Vec<String>,
    pub reply_to: Vec<String>,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
}

/// Multipart subtype of a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartKind {
    Alternative,
    Mixed,
    Related,
    Other(String),
}

impl MultipartKind {
    /// Maps a `multipart/<subtype>` subtype string to a kind.
    #[must_use]
    pub fn from_subtype(subtype: &str) -> Self {
        match subtype.to_ascii_lowercase().as_str() {
            "alternative" => Self::Alternative,
            "mixed" => Self::Mixed,
            "related" => Self::Related,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alternative => "alternative",
            Self::Mixed => "mixed",
            Self::Related => "related",
            Self::Other(subtype) => subtype,
        }
    }
}

/// A single, non-multipart body part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    content_type: Option<ContentType>,
    body: Bytes,
    filename: Option<String>,
}

impl Leaf {
    #[must_use]
    pub fn new(content_type: Option<ContentType>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            body: body.into(),
            filename: None,
        }
    }

    /// Content type declared by this part, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Attachment file name, if this part is an attachment.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.filename.is_some()
    }
}

/// A multipart node with an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    kind: MultipartKind,
    parts: Vec<Node>,
}

impl Container {
    #[must_use]
    pub fn new(kind: MultipartKind, parts: Vec<Node>) -> Self {
        Self { kind, parts }
    }

    #[must_use]
    pub fn kind(&self) -> &MultipartKind {
        &self.kind
    }

    #[must_use]
    pub fn parts(&self) -> &[Node] {
        &self.parts
    }

    pub fn push(&mut self, part: Node) {
        self.parts.push(part);
    }
}

/// One node of a MIME body tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Container(Container),
}

impl Node {
    /// A leaf with no declared content type.
    #[must_use]
    pub fn untyped(body: impl Into<Bytes>) -> Self {
        Self::Leaf(Leaf::new(None, body))
    }

    /// A `text/plain; charset=UTF-8` leaf.
    #[must_use]
    pub fn text(body: impl Into<Bytes>) -> Self {
        Self::Leaf(Leaf::new(Some(utf8(ContentType::plain())), body))
    }

    /// A `text/html; charset=UTF-8` leaf.
    #[must_use]
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::Leaf(Leaf::new(Some(utf8(ContentType::html())), body))
    }

    #[must_use]
    pub fn typed(content_type: ContentType, body: impl Into<Bytes>) -> Self {
        Self::Leaf(Leaf::new(Some(content_type), body))
    }

    /// An attachment leaf carrying a file name.
    #[must_use]
    pub fn attachment(
        filename: impl Into<String>,
        content_type: ContentType,
        body: impl Into<Bytes>,
    ) -> Self {
        Self::Leaf(Leaf {
            content_type: Some(content_type),
            body: body.into(),
            filename: Some(filename.into()),
        })
    }

    #[must_use]
    pub fn alternative(parts: Vec<Node>) -> Self {
        Self::Container(Container::new(MultipartKind::Alternative, parts))
    }

    #[must_use]
    pub fn mixed(parts: Vec<Node>) -> Self {
        Self::Container(Container::new(MultipartKind::Mixed, parts))
    }

    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Leaves in document (pre-order) order, flattening nested containers.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// Mutable leaves in document order.
    pub fn leaves_mut(&mut self) -> Vec<&mut Leaf> {
        let mut out = Vec::new();
        collect_leaves_mut(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(node: &'a Node, out: &mut Vec<&'a Leaf>) {
    match node {
        Node::Leaf(leaf) => out.push(leaf),
        Node::Container(container) => {
            for part in &container.parts {
                collect_leaves(part, out);
            }
        }
    }
}

fn collect_leaves_mut<'a>(node: &'a mut Node, out: &mut Vec<&'a mut Leaf>) {
    match node {
        Node::Leaf(leaf) => out.push(leaf),
        Node::Container(container) => {
            for part in &mut container.parts {
                collect_leaves_mut(part, out);
            }
        }
    }
}

fn utf8(content_type: ContentType) -> ContentType {
    ContentType::parse(&format!("{}; charset=UTF-8", content_type.essence()))
        .unwrap_or(content_type)
}

/// A composed email: envelope headers plus a MIME body tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub headers: Headers,
    pub root: Node,
}

impl Message {
    #[must_use]
    pub fn new(root: Node) -> Self {
        Self {
            headers: Headers::default(),
            root,
        }
    }

    #[must_use]
    pub fn from_addr(mut self, address: impl Into<String>) -> Self {
        self.headers.from.push(address.into());
        self
    }

    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.headers.reply_to.push(address.into());
        self
    }

    #[must_use]
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.headers.to.push(address.into());
        self
    }

    #[must_use]
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.headers.cc.push(address.into());
        self
    }

    #[must_use]
    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.headers.bcc.push(address.into());
        self
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.headers.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.headers.date = Some(date.into());
        self
    }

    /// Applies `f` to every leaf body in document order.
    pub fn for_each_leaf_mut(&mut self, mut f: impl FnMut(&mut Leaf)) {
        for leaf in self.root.leaves_mut() {
            f(leaf);
        }
    }

    /// Attachment leaves in document order.
    #[must_use]
    pub fn attachments(&self) -> Vec<&Leaf> {
        self.root
            .leaves()
            .into_iter()
            .filter(|leaf| leaf.is_attachment())
            .collect()
    }
}
