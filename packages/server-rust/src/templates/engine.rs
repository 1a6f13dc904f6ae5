use minijinja::{default_auto_escape_callback, Environment, Value};

/// Renders a named template against a context value.
pub trait TemplateEngine: Send + Sync {
    /// # Errors
    ///
    /// Returns the engine's error if the template is missing or fails to render.
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

/// Template engine backed by minijinja with templates embedded at build time.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

#[allow(clippy::unnecessary_wraps)]
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        super::INDEX_TEMPLATE => Some(include_str!("index.html")),
        super::EMAIL_TEMPLATE => Some(include_str!("email.html")),
        _ => None,
    };

    Ok(template_content.map(ToString::to_string))
}
