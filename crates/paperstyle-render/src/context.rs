use std::borrow::Cow;

use paperstyle_core::{FormatRequest, PaperBody, PaperTypeProfile, StructuredSections};
use paperstyle_parsing::Classifier;

use crate::dispatch::RenderOptions;
use crate::styles::{ABSTRACT_PLACEHOLDER, KEYWORDS_PLACEHOLDER};

/// Everything a [`StyleRenderer`](crate::StyleRenderer) reads during one render.
///
/// Built by the dispatcher. The body is checked against the paper type's
/// profile here, so renderers never see a body variant the profile rules out.
#[derive(Debug)]
pub struct RenderContext<'a> {
    request: &'a FormatRequest,
    options: &'a RenderOptions,
    profile: PaperTypeProfile,
    classifier: Classifier,
    body: Cow<'a, PaperBody>,
}

impl<'a> RenderContext<'a> {
    pub fn new(request: &'a FormatRequest, options: &'a RenderOptions) -> Self {
        let profile = request.profile();
        let body = match (&request.body, profile.has_structured_body) {
            (PaperBody::Structured(_), true) | (PaperBody::Main(_), false) => {
                Cow::Borrowed(&request.body)
            }
            (PaperBody::Main(_), true) => {
                tracing::warn!(
                    paper_type = %request.paper_type,
                    "free-form body given for a structured paper type; rendering no sections"
                );
                Cow::Owned(PaperBody::Structured(StructuredSections::default()))
            }
            (PaperBody::Structured(_), false) => {
                tracing::warn!(
                    paper_type = %request.paper_type,
                    "structured body given for an unstructured paper type; rendering no body"
                );
                Cow::Owned(PaperBody::Main(String::new()))
            }
        };

        Self {
            request,
            options,
            profile,
            classifier: Classifier::for_paper_type_with_config(request.paper_type, &options.parsing),
            body,
        }
    }

    pub fn request(&self) -> &'a FormatRequest {
        self.request
    }

    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    pub fn profile(&self) -> PaperTypeProfile {
        self.profile
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The body to render, consistent with the profile.
    pub fn body(&self) -> &PaperBody {
        &self.body
    }

    /// Abstract text to print: `None` when the paper type has no abstract,
    /// the placeholder when it has one but the content is blank.
    pub fn abstract_text(&self) -> Option<&'a str> {
        declared_text(
            self.profile.has_abstract,
            &self.request.r#abstract,
            ABSTRACT_PLACEHOLDER,
        )
    }

    /// Same policy as [`abstract_text`](Self::abstract_text) for keywords.
    pub fn keywords_text(&self) -> Option<&'a str> {
        declared_text(
            self.profile.has_keywords,
            &self.request.keywords,
            KEYWORDS_PLACEHOLDER,
        )
    }

    /// "October 19, 2026"
    pub fn long_date(&self) -> Option<String> {
        self.request
            .date
            .map(|d| d.format("%B %-d, %Y").to_string())
    }

    /// "19 October 2026"
    pub fn day_first_date(&self) -> Option<String> {
        self.request
            .date
            .map(|d| d.format("%-d %B %Y").to_string())
    }
}

fn declared_text<'a>(declared: bool, content: &'a str, placeholder: &'static str) -> Option<&'a str> {
    if !declared {
        return None;
    }
    let content = content.trim();
    Some(if content.is_empty() { placeholder } else { content })
}
