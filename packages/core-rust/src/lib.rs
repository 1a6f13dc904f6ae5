//! Mailview core: message trees, content-type matching, part resolution,
//! request path parsing, and the preview action registry.

pub mod action;
pub mod content_type;
pub mod error;
pub mod intercept;
pub mod message;
pub mod path;
pub mod resolve;

pub use action::{Action, ActionRegistry, ActionRegistryBuilder};
pub use content_type::{ContentType, ContentTypeError, MediaRange};
pub use error::{PreviewError, RegistryError};
pub use intercept::{Interceptor, Interceptors};
pub use message::{Container, Headers, Leaf, Message, MultipartKind, Node};
pub use path::{extension_for, format_for_extension, parse_path, ActionPath, ParsedPath};
pub use resolve::{resolve, resolve_default, ResolvedPart};
