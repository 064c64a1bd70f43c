//! HTML views.
//!
//! Handlers never build HTML themselves: they pick a [`View`] and hand over a
//! JSON data map, and a [`ViewRenderer`] turns that into markup.

use std::path::Path;

use minijinja::{path_loader, Environment, Value};
use tracing::debug;

use crate::error::Result;

/// The pages this service renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// The contact preference form. Data: `errors`, `values`.
    Form,
    /// The confirmation page. Data: `record`.
    Success,
}

impl View {
    /// Template name backing this view.
    #[must_use]
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Form => "index.html",
            Self::Success => "success.html",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_name())
    }
}

/// Renders a view with a data map.
pub trait ViewRenderer: Send + Sync + std::fmt::Debug {
    /// Render `view` with `data` into an HTML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing or fails to render.
    fn render(&self, view: View, data: &serde_json::Value) -> Result<String>;
}

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const SUCCESS_TEMPLATE: &str = include_str!("../templates/success.html");

/// Template-backed renderer.
///
/// `.html` templates are autoescaped, so echoed user input is safe to embed.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer using the templates compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT_TEMPLATE)?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("success.html", SUCCESS_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Create a renderer that loads templates from a directory.
    ///
    /// Templates are loaded lazily, so a missing file surfaces on first render.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        debug!("Loading templates from {}", dir.display());
        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        Self { env }
    }

    /// Create a renderer from an optional override directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn with_template_dir(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self::from_dir(dir)),
            None => Self::new(),
        }
    }
}

impl ViewRenderer for TemplateRenderer {
    fn render(&self, view: View, data: &serde_json::Value) -> Result<String> {
        let template = self.env.get_template(view.template_name())?;
        let html = template.render(Value::from_serialize(data))?;
        Ok(html)
    }
}
