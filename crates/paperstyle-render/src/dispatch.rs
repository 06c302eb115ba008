use std::collections::HashMap;

use paperstyle_core::{FormatRequest, FormatStyle, PaperType};
use paperstyle_parsing::ParsingConfig;

use crate::context::RenderContext;
use crate::styles::{
    Apa7, Basic, BasicApa, BasicMla, Chicago, Fpi, FpiProjectWriteup, Ieee, Mla9, Springer,
    StyleRenderer,
};

/// Returned in place of a paper when no renderer exists for the style.
pub const UNSUPPORTED_MARKER: &str = r#"<p style="color: red;">Unsupported format selected.</p>"#;

/// Institution block printed on FPI title pages.
pub const DEFAULT_INSTITUTION_LINES: &[&str] = &[
    "Department of Computer Engineering",
    "The Federal Polytechnic, Ilaro",
    "Ogun State, Nigeria",
];

/// Settings shared by every style.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Lines under the author on institution title pages.
    pub institution_lines: Vec<String>,
    /// Affiliation on APA title pages and Springer headers; each style
    /// has its own fallback text.
    pub affiliation: Option<String>,
    /// Heading vocabulary and limits used to find subheadings in body text.
    pub parsing: ParsingConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            institution_lines: DEFAULT_INSTITUTION_LINES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            affiliation: None,
            parsing: ParsingConfig::default(),
        }
    }
}

/// Strategy table from style (optionally narrowed to a paper type) to renderer.
///
/// Lookup tries the `(style, paper_type)` entry first, then the entry
/// registered for the style alone.
pub struct StyleRegistry {
    renderers: HashMap<(FormatStyle, Option<PaperType>), Box<dyn StyleRenderer>>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_builtin_styles()
    }
}

impl StyleRegistry {
    /// An empty registry. Every lookup misses.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn with_builtin_styles() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Basic));
        registry.register(Box::new(BasicApa));
        registry.register(Box::new(BasicMla));
        registry.register(Box::new(Apa7));
        registry.register(Box::new(Mla9));
        registry.register(Box::new(Ieee));
        registry.register(Box::new(Springer));
        registry.register(Box::new(Chicago));
        registry.register(Box::new(Fpi));
        registry.register_for_paper_type(PaperType::ProjectWriteup, Box::new(FpiProjectWriteup));
        registry
    }

    /// Register `renderer` for its style, replacing any previous entry.
    pub fn register(&mut self, renderer: Box<dyn StyleRenderer>) {
        self.renderers.insert((renderer.style(), None), renderer);
    }

    /// Register a layout used only when rendering `paper_type` in the
    /// renderer's style.
    pub fn register_for_paper_type(&mut self, paper_type: PaperType, renderer: Box<dyn StyleRenderer>) {
        self.renderers
            .insert((renderer.style(), Some(paper_type)), renderer);
    }

    pub fn get(&self, style: FormatStyle, paper_type: PaperType) -> Option<&dyn StyleRenderer> {
        self.renderers
            .get(&(style, Some(paper_type)))
            .or_else(|| self.renderers.get(&(style, None)))
            .map(|r| &**r)
    }

    /// Styles with a general renderer, in [`FormatStyle::ALL`] order.
    pub fn styles(&self) -> Vec<FormatStyle> {
        FormatStyle::ALL
            .into_iter()
            .filter(|s| self.renderers.contains_key(&(*s, None)))
            .collect()
    }
}

/// Selects a style renderer and runs it. Immutable after construction.
#[derive(Default)]
pub struct Renderer {
    registry: StyleRegistry,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(registry: StyleRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self::new(StyleRegistry::default(), options)
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render in the request's own style.
    pub fn render(&self, request: &FormatRequest) -> String {
        self.format_preview(request, request.format_style)
    }

    /// Render `request` in `style`, overriding the request's style.
    pub fn format_preview(&self, request: &FormatRequest, style: FormatStyle) -> String {
        let Some(renderer) = self.registry.get(style, request.paper_type) else {
            tracing::warn!(style = %style, "no renderer registered for style");
            return UNSUPPORTED_MARKER.to_string();
        };
        tracing::debug!(
            style = %style,
            paper_type = %request.paper_type,
            "rendering paper"
        );
        let ctx = RenderContext::new(request, &self.options);
        renderer.render(&ctx)
    }

    /// Markup handed to exporters; identical to the preview.
    pub fn format_for_export(&self, request: &FormatRequest, style: FormatStyle) -> String {
        self.format_preview(request, style)
    }

    /// Render with a style given by name, e.g. "APA 7th Edition" or "ieee".
    pub fn render_named(&self, request: &FormatRequest, style_name: &str) -> String {
        match style_name.parse::<FormatStyle>() {
            Ok(style) => self.format_preview(request, style),
            Err(e) => {
                tracing::debug!(error = %e, "unrecognised style name");
                UNSUPPORTED_MARKER.to_string()
            }
        }
    }
}
