//! A flat view of rendered HTML as tags, opaque markup and text leaves.
//!
//! Search highlighting operates on this structure rather than on HTML
//! strings: every text leaf is an ordered list of runs, each optionally
//! marked, and the concatenated run text always equals the leaf's original
//! text. Offsets are counted in `char`s.

use std::fmt::Write as _;

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Highlight kind attached to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Bulk search highlight.
    Search,
    /// The result the reader jumped to.
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub mark: Option<Mark>,
}

impl Run {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mark: None,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One contiguous piece of visible text between two markup tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLeaf {
    runs: Vec<Run>,
}

impl TextLeaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.runs.iter().any(|r| r.mark == Some(mark))
    }

    /// Mark the characters in `start..end` (leaf-relative), overriding any
    /// mark they already carry. Out-of-range bounds are clamped.
    pub fn mark_range(&mut self, start: usize, end: usize, mark: Mark) {
        let end = end.min(self.char_len());
        if start >= end {
            return;
        }

        let mut runs = Vec::with_capacity(self.runs.len() + 2);
        let mut offset = 0;
        for run in self.runs.drain(..) {
            let len = run.char_len();
            let (run_start, run_end) = (offset, offset + len);
            offset = run_end;

            if run_end <= start || run_start >= end {
                runs.push(run);
                continue;
            }

            let local_start = start.saturating_sub(run_start);
            let local_end = end.min(run_end) - run_start;
            let (head, rest) = split_at_char(&run.text, local_start);
            let (middle, tail) = split_at_char(rest, local_end - local_start);

            if !head.is_empty() {
                runs.push(Run {
                    text: head.to_string(),
                    mark: run.mark,
                });
            }
            runs.push(Run {
                text: middle.to_string(),
                mark: Some(mark),
            });
            if !tail.is_empty() {
                runs.push(Run {
                    text: tail.to_string(),
                    mark: run.mark,
                });
            }
        }
        self.runs = runs;
    }

    /// Remove `mark` (or every mark when `None`) and merge the plain runs
    /// that become adjacent.
    pub fn clear(&mut self, mark: Option<Mark>) {
        let mut runs: Vec<Run> = Vec::with_capacity(self.runs.len());
        for mut run in self.runs.drain(..) {
            if mark.is_none() || run.mark == mark {
                run.mark = None;
            }
            match runs.last_mut() {
                Some(prev) if prev.mark.is_none() && run.mark.is_none() => {
                    prev.text.push_str(&run.text);
                }
                _ => runs.push(run),
            }
        }
        if runs.is_empty() {
            runs.push(Run::plain(String::new()));
        }
        self.runs = runs;
    }

    fn write_html(&self, out: &mut String) {
        for run in &self.runs {
            let text = escape_text(&run.text);
            match run.mark {
                None => out.push_str(&text),
                Some(Mark::Search) => {
                    let _ = write!(out, "<span class=\"search-highlight\">{text}</span>");
                }
                Some(Mark::Current) => {
                    let _ = write!(
                        out,
                        "<span class=\"highlight\" id=\"current-match\">{text}</span>"
                    );
                }
            }
        }
    }
}

/// An opening tag with its attributes, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    name: String,
    attrs: Vec<(String, String)>,
}

impl StartTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the value of `name`, or add it as the first attribute.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.insert(0, (name.to_string(), value)),
        }
    }

    /// Void elements have no content and no closing tag.
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, " {key}=\"{}\"", escape_attr(value));
        }
        out.push_str(if self.is_void() { " />" } else { ">" });
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is not reader-visible text, or is owned by a
/// client-side library, and must never be split by highlight spans.
const OPAQUE_ELEMENTS: &[&str] = &[
    "script", "style", "template", "textarea", "title", "iframe", "noscript", "xmp",
    "noembed", "noframes", "plaintext", "svg", "math",
];

/// Class names marking diagram placeholders and typeset math.
const OPAQUE_CLASSES: &[&str] = &["mermaid", "math"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Open(StartTag),
    /// Closing tag of the named element.
    Close(String),
    /// A comment or an opaque element, emitted verbatim.
    Markup(String),
    Text(TextLeaf),
}

/// Ordered markup tokens and text leaves of a rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTree {
    nodes: Vec<Node>,
}

impl TextTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse rendered HTML with html5ever and flatten it into tags and
    /// decoded text leaves.
    ///
    /// Diagram placeholders, typeset math and raw-text elements such as
    /// `<script>` and `<style>` are kept whole as [`Node::Markup`], so
    /// highlighting never rewrites their source. The document wrappers the
    /// parser implies (`html`, `head`, `body`) are dropped.
    pub fn from_html(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        let mut nodes = Vec::new();
        flatten(&dom.document, &mut nodes);
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn leaves(&self) -> impl Iterator<Item = &TextLeaf> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Text(leaf) => Some(leaf),
            _ => None,
        })
    }

    pub fn leaves_mut(&mut self) -> impl Iterator<Item = &mut TextLeaf> {
        self.nodes.iter_mut().filter_map(|n| match n {
            Node::Text(leaf) => Some(leaf),
            _ => None,
        })
    }

    /// Visible text: every leaf concatenated in document order.
    pub fn text_content(&self) -> String {
        self.leaves().map(TextLeaf::text).collect()
    }

    /// Number of runs carrying `mark`.
    pub fn count_marked(&self, mark: Mark) -> usize {
        self.leaves()
            .flat_map(|leaf| leaf.runs.iter())
            .filter(|run| run.mark == Some(mark))
            .count()
    }

    /// Serialize the tree. For a tree built by [`TextTree::from_html`] with
    /// no marks, parsing the result again yields an equal tree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Open(tag) => tag.write_html(&mut out),
                Node::Close(name) => {
                    let _ = write!(out, "</{name}>");
                }
                Node::Markup(markup) => out.push_str(markup),
                Node::Text(leaf) => leaf.write_html(&mut out),
            }
        }
        out
    }
}

fn flatten(handle: &Handle, nodes: &mut Vec<Node>) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => push_text(nodes, &contents.borrow()),
            NodeData::Comment { contents } => nodes.push(Node::Markup(format!("<!--{contents}-->"))),
            NodeData::Element { name, attrs, .. } => {
                let local: &str = &name.local;
                if matches!(local, "html" | "head" | "body") {
                    flatten(child, nodes);
                    continue;
                }

                let tag = StartTag {
                    name: local.to_string(),
                    attrs: attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect(),
                };
                if is_opaque(&tag) {
                    nodes.push(Node::Markup(serialize_element(child)));
                    continue;
                }

                let void = tag.is_void();
                nodes.push(Node::Open(tag));
                if !void {
                    flatten(child, nodes);
                    nodes.push(Node::Close(local.to_string()));
                }
            }
            NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {}
        }
    }
}

/// Append text, merging with a preceding leaf.
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(leaf)) = nodes.last_mut() {
        if let Some(run) = leaf.runs.last_mut() {
            run.text.push_str(text);
            return;
        }
    }
    nodes.push(Node::Text(TextLeaf::new(text)));
}

fn is_opaque(tag: &StartTag) -> bool {
    OPAQUE_ELEMENTS.contains(&tag.name.as_str())
        || tag
            .attr("class")
            .is_some_and(|class| class.split_whitespace().any(|c| OPAQUE_CLASSES.contains(&c)))
}

fn serialize_element(handle: &Handle) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(handle.clone());
    if let Err(e) = serialize(&mut output, &serializable, opts) {
        tracing::warn!(error = %e, "failed to serialize opaque element");
    }
    String::from_utf8_lossy(&output).into_owned()
}

fn split_at_char(text: &str, chars: usize) -> (&str, &str) {
    let idx = text
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(idx)
}

/// Escaping for element content: quotes stay literal.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
