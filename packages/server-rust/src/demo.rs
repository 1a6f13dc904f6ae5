//! Sample preview actions served by the `preview-server` binary.

use mailview_core::{ActionRegistry, ContentType, Message, Node, RegistryError};

/// Builds the registry of sample actions.
///
/// # Errors
///
/// Returns [`RegistryError`] if an action name is invalid or repeated.
pub fn registry() -> Result<ActionRegistry, RegistryError> {
    Ok(ActionRegistry::builder()
        .register("plain_text_message", plain_text_message)?
        .register(
            "plain_text_message_with_display_names",
            plain_text_message_with_display_names,
        )?
        .register("html_message", html_message)?
        .register("multipart_alternative", multipart_alternative)?
        .register(
            "multipart_alternative_text_default",
            multipart_alternative_text_default,
        )?
        .register("nested_multipart_message", nested_multipart_message)?
        .register("message_with_attachment", message_with_attachment)?
        .build())
}

fn plain_text_message() -> Message {
    Message::new(Node::untyped("Hello")).to("josh@37signals.com")
}

fn plain_text_message_with_display_names() -> Message {
    Message::new(Node::untyped("Hello"))
        .to("Josh Peek <josh@37signals.com>")
        .from_addr("Test Peek <test@foo.com>")
        .reply_to("Another Peek <another@foo.com>")
}

fn html_message() -> Message {
    Message::new(Node::html("<h1>Hello</h1>")).to("josh@37signals.com")
}

fn multipart_alternative() -> Message {
    Message::new(Node::alternative(vec![
        Node::text("This is plain text"),
        Node::html("<h1>This is HTML</h1>"),
    ]))
    .to("josh@37signals.com")
}

fn multipart_alternative_text_default() -> Message {
    Message::new(Node::alternative(vec![
        Node::html("<h1>This is HTML</h1>"),
        Node::text("This is plain text"),
    ]))
    .to("josh@37signals.com")
}

fn nested_multipart_message() -> Message {
    Message::new(Node::mixed(vec![Node::alternative(vec![
        Node::text("omg"),
        Node::html("<h1>Hello</h1>"),
    ])]))
}

fn message_with_attachment() -> Message {
    Message::new(Node::mixed(vec![
        Node::alternative(vec![
            Node::text("Your report is attached."),
            Node::html("<p>Your report is attached.</p>"),
        ]),
        Node::attachment(
            "report.pdf",
            ContentType::from(mime::APPLICATION_PDF),
            &b"%PDF-1.4\n%%EOF\n"[..],
        ),
    ]))
    .to("josh@37signals.com")
    .subject("Monthly report")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 7);
        assert!(registry.contains("multipart_alternative"));
    }
}
