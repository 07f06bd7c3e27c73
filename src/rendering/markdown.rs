use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use super::capabilities::Capabilities;
use super::escape_html;
use super::links::{rewrite_document_link, LinkContext};
use super::text::TextTree;
use crate::config::RenderConfig;

/// Markdown extensions enabled for every document.
///
/// GitHub Flavored Markdown (tables, footnotes, strikethrough, task lists)
/// plus `$`/`$$` math. Smart punctuation stays off so search matches the
/// characters the author typed.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH
}

/// Markdown to HTML conversion with code, heading, math and link hooks.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    capabilities: Capabilities,
    sanitize: bool,
}

struct CodeBuffer {
    language: Option<String>,
    source: String,
}

struct HeadingBuffer<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    text: String,
    events: Vec<Event<'a>>,
}

impl Renderer {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            sanitize: false,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(Capabilities::from_config(config)).with_sanitize(config.sanitize)
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Render `markdown` to HTML.
    ///
    /// - soft line breaks become `<br />`
    /// - headings get an `id` derived from their text (see [`anchor_id`])
    /// - code blocks go through the diagram renderer or the highlighter
    /// - links to other markdown documents become view URLs
    ///
    /// The output is the serialization of [`Renderer::render_tree`], so
    /// parsing it back with [`TextTree::from_html`] reproduces it exactly.
    pub fn render(&self, markdown: &str, links: &LinkContext) -> String {
        self.render_tree(markdown, links).to_html()
    }

    /// Render `markdown` and parse the result into a [`TextTree`].
    pub fn render_tree(&self, markdown: &str, links: &LinkContext) -> TextTree {
        TextTree::from_html(&self.render_raw(markdown, links))
    }

    fn render_raw(&self, markdown: &str, links: &LinkContext) -> String {
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut code: Option<CodeBuffer> = None;
        let mut heading: Option<HeadingBuffer<'_>> = None;

        for event in Parser::new_ext(markdown, parser_options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code = Some(CodeBuffer {
                        language: code_language(&kind),
                        source: String::new(),
                    });
                }
                Event::Text(text) if code.is_some() => {
                    if let Some(block) = code.as_mut() {
                        block.source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code.take() {
                        let html = self.code_block(block.language.as_deref(), &block.source);
                        events.push(Event::Html(html.into()));
                    }
                }
                Event::Start(Tag::Heading {
                    level,
                    classes,
                    attrs,
                    ..
                }) => {
                    heading = Some(HeadingBuffer {
                        level,
                        classes,
                        attrs,
                        text: String::new(),
                        events: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(level)) => {
                    if let Some(buffer) = heading.take() {
                        let anchor = anchor_id(buffer.text.trim());
                        events.push(Event::Start(Tag::Heading {
                            level: buffer.level,
                            id: (!anchor.is_empty()).then(|| anchor.into()),
                            classes: buffer.classes,
                            attrs: buffer.attrs,
                        }));
                        events.extend(buffer.events);
                    }
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                other => {
                    let mapped = self.map_event(other, links);
                    match heading.as_mut() {
                        Some(buffer) => {
                            if let Event::Text(text) | Event::Code(text) = &mapped {
                                buffer.text.push_str(text);
                            }
                            buffer.events.push(mapped);
                        }
                        None => events.push(mapped),
                    }
                }
            }
        }

        let mut output = String::new();
        html::push_html(&mut output, events.into_iter());

        if self.sanitize {
            output = ammonia::Builder::default()
                .add_generic_attributes(&["class", "id"])
                .clean(&output)
                .to_string();
        }
        output
    }

    fn map_event<'a>(&self, event: Event<'a>, links: &LinkContext) -> Event<'a> {
        match event {
            Event::SoftBreak => Event::HardBreak,
            Event::InlineMath(tex) => match &self.capabilities.math {
                Some(math) => Event::InlineHtml(math.inline(&tex).into()),
                None => Event::Text(format!("${tex}$").into()),
            },
            Event::DisplayMath(tex) => match &self.capabilities.math {
                Some(math) => Event::InlineHtml(math.display(&tex).into()),
                None => Event::Text(format!("$${tex}$$").into()),
            },
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = match rewrite_document_link(&dest_url, links) {
                    Some(rewritten) => rewritten.into(),
                    None => dest_url,
                };
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
            }
            other => other,
        }
    }

    fn code_block(&self, language: Option<&str>, source: &str) -> String {
        if let (Some(language), Some(diagrams)) = (language, &self.capabilities.diagrams) {
            if language == diagrams.language() {
                return diagrams.render(source);
            }
        }
        if language == Some("mermaid") {
            tracing::debug!("no diagram renderer, mermaid block rendered as code");
        }

        let body = match &self.capabilities.highlighter {
            Some(highlighter) => highlighter
                .highlight(source, language)
                .unwrap_or_else(|| escape_html(source)),
            None => escape_html(source),
        };
        format!(
            "<pre><code class=\"hljs {}\">{}</code></pre>\n",
            escape_html(language.unwrap_or_default()),
            body
        )
    }
}

fn code_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

/// URL-safe anchor for a heading: lowercase, ASCII word characters,
/// whitespace and hyphens kept, each whitespace run replaced by `-`.
pub fn anchor_id(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut anchor = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                anchor.push('-');
            }
            in_whitespace = true;
        } else {
            anchor.push(c);
            in_whitespace = false;
        }
    }
    anchor
}

/// Render a raw Markdown string with no optional capabilities and no link
/// context.
pub fn render_markdown(raw: &str) -> String {
    Renderer::default().render(raw, &LinkContext::default())
}
