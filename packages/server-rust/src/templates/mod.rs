//! HTML templates for the index and framed preview pages.

mod context;
mod engine;

pub use context::{AlternateLink, AttachmentLink, FramedPage, IndexLink};
pub use engine::{MiniJinjaEngine, TemplateEngine};

/// Template listing every registered action.
pub const INDEX_TEMPLATE: &str = "index.html";
/// Template framing a single message.
pub const EMAIL_TEMPLATE: &str = "email.html";
