//! Arena nodes → Markdown rendering.
//!
//! The writer accumulates into a single string the way a pretty-printer
//! does: block elements request a blank-line separator that is only written
//! once real content follows, and whitespace between inline runs collapses
//! to one space. Consumed nodes are skipped entirely, so rendering a
//! container after some of its children became components never repeats
//! them.

use crate::dom::{ArenaDom, ConsumedSet, ListKind, NodeData, NodeId, Tag, UnsupportedTag};

use super::escape::{calculate_fence_length, calculate_inline_code_ticks, escape_markdown};
use super::options::{HeadingStyle, MarkdownOptions};

/// Inline content rendered on the side, with its flanking whitespace split off
/// so delimiters hug the text (`_word_ `, never `_word _`).
struct Captured {
    content: String,
    leading_space: bool,
    trailing_space: bool,
}

/// Markdown writer over a (partially consumed) arena.
pub struct MarkdownWriter<'a> {
    dom: &'a ArenaDom,
    consumed: &'a ConsumedSet,
    options: &'a MarkdownOptions,
    output: String,
    line_prefix: String,
    at_line_start: bool,
    pending_space: bool,
    pending_block: bool,
}

impl<'a> MarkdownWriter<'a> {
    pub fn new(dom: &'a ArenaDom, consumed: &'a ConsumedSet, options: &'a MarkdownOptions) -> Self {
        Self {
            dom,
            consumed,
            options,
            output: String::new(),
            line_prefix: String::new(),
            at_line_start: true,
            pending_space: false,
            pending_block: false,
        }
    }

    /// Finish rendering and return the trimmed markdown.
    pub fn finish(self) -> String {
        self.output.trim().to_string()
    }

    /// Render a node (and its live descendants).
    pub fn write_node(&mut self, id: NodeId) {
        if self.consumed.is_consumed(id) {
            return;
        }
        let dom = self.dom;
        let Some(node) = dom.get(id) else {
            return;
        };

        match &node.data {
            NodeData::Text(text) => self.write_text(text),
            NodeData::Element { name, .. } => self.write_element(id, Tag::from_local_name(&name.local)),
            NodeData::Document => self.write_children(id),
            NodeData::Comment(_) | NodeData::Doctype => {}
        }
    }

    fn write_children(&mut self, id: NodeId) {
        let dom = self.dom;
        for child in dom.children(id) {
            self.write_node(child);
        }
    }

    fn write_element(&mut self, id: NodeId, tag: Tag) {
        if self.options.suppresses(tag) {
            return;
        }
        let options = self.options;

        match tag {
            Tag::Heading(level) => self.write_heading(id, level),
            Tag::Blockquote => self.write_blockquote(id),
            Tag::List(kind) => self.write_list(id, kind),
            Tag::Pre => self.write_code_block(id),
            Tag::Code => self.write_inline_code(id),
            Tag::Rule => {
                self.pending_block = true;
                self.write_inline("---");
                self.pending_block = true;
            }
            Tag::Table => self.write_table(id),
            Tag::Image => self.write_image(id),
            Tag::Anchor => self.write_link(id),
            Tag::Break => self.write_hard_break(),
            Tag::Emphasis => {
                let captured = self.capture(|w| w.write_children(id));
                self.write_captured(captured, &options.em_delimiter, &options.em_delimiter);
            }
            Tag::Strong => {
                let captured = self.capture(|w| w.write_children(id));
                self.write_captured(captured, &options.strong_delimiter, &options.strong_delimiter);
            }
            Tag::Strikethrough if options.strikethrough => {
                let captured = self.capture(|w| w.write_children(id));
                self.write_captured(captured, "~", "~");
            }
            Tag::Unsupported(UnsupportedTag::Script) | Tag::Hidden => {}
            _ if tag.is_block() => {
                self.pending_block = true;
                self.write_children(id);
                self.pending_block = true;
            }
            _ => self.write_children(id),
        }
    }

    // ------------------------------------------------------------------
    // Output primitives
    // ------------------------------------------------------------------

    /// Write already-escaped inline content, settling any pending separator first.
    fn write_inline(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }

        if self.pending_block {
            self.pending_block = false;
            self.pending_space = false;
            if !self.output.is_empty() {
                self.break_paragraph();
            }
        }

        if self.at_line_start {
            self.output.push_str(&self.line_prefix);
            self.at_line_start = false;
            self.pending_space = false;
        } else if self.pending_space {
            self.output.push(' ');
            self.pending_space = false;
        }

        for (i, line) in s.split('\n').enumerate() {
            if i > 0 {
                self.output.push('\n');
                self.output.push_str(&self.line_prefix);
            }
            self.output.push_str(line);
        }
    }

    fn break_paragraph(&mut self) {
        let kept = self.output.trim_end().len();
        self.output.truncate(kept);
        self.output.push('\n');
        self.output.push_str(self.line_prefix.trim_end());
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn new_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
        self.pending_space = false;
    }

    fn write_hard_break(&mut self) {
        self.pending_space = false;
        if self.at_line_start || self.pending_block {
            return;
        }
        self.output.push_str("  \n");
        self.at_line_start = true;
    }

    fn write_text(&mut self, text: &str) {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            if !text.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }

        let at_line_start = self.pending_block || self.at_line_start;
        let escaped = escape_markdown(&words.join(" "), at_line_start);
        self.write_inline(&escaped);

        if text.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    /// Render into a side buffer and return what was written.
    fn capture(&mut self, render: impl FnOnce(&mut Self)) -> Captured {
        let saved_output = std::mem::take(&mut self.output);
        let saved_prefix = std::mem::take(&mut self.line_prefix);
        let saved_line_start = std::mem::replace(&mut self.at_line_start, false);
        let saved_space = std::mem::replace(&mut self.pending_space, false);
        let saved_block = std::mem::replace(&mut self.pending_block, false);

        render(self);

        let raw = std::mem::replace(&mut self.output, saved_output);
        let trailing_space = self.pending_space || raw.ends_with(char::is_whitespace);
        self.line_prefix = saved_prefix;
        self.at_line_start = saved_line_start;
        self.pending_space = saved_space;
        self.pending_block = saved_block;

        Captured {
            leading_space: raw.starts_with(char::is_whitespace),
            content: raw.trim().to_string(),
            trailing_space,
        }
    }

    fn write_captured(&mut self, captured: Captured, open: &str, close: &str) {
        if captured.leading_space {
            self.pending_space = true;
        }
        if !captured.content.is_empty() {
            self.write_inline(&format!("{open}{}{close}", captured.content));
        }
        if captured.trailing_space {
            self.pending_space = true;
        }
    }

    // ------------------------------------------------------------------
    // Element rules
    // ------------------------------------------------------------------

    fn write_heading(&mut self, id: NodeId, level: u8) {
        let content = self.capture(|w| w.write_children(id)).content;
        self.pending_block = true;

        match self.options.heading_style {
            HeadingStyle::Setext if level <= 2 && !content.is_empty() => {
                let underline = if level == 1 { "=" } else { "-" };
                let width = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
                self.write_inline(&content);
                self.new_line();
                self.write_inline(&underline.repeat(width));
            }
            _ => {
                let hashes = "#".repeat(level as usize);
                if content.is_empty() {
                    self.write_inline(&hashes);
                } else {
                    self.write_inline(&format!("{hashes} {content}"));
                }
            }
        }

        self.pending_block = true;
    }

    fn write_blockquote(&mut self, id: NodeId) {
        // The separator before the quote belongs to the outer prefix.
        self.pending_block = true;
        if !self.output.is_empty() {
            self.pending_block = false;
            self.break_paragraph();
        }

        let old_prefix = self.line_prefix.clone();
        self.line_prefix.push_str("> ");
        self.write_children(id);
        self.line_prefix = old_prefix;
        self.pending_block = true;
    }

    fn write_list(&mut self, id: NodeId, kind: ListKind) {
        let dom = self.dom;
        let items: Vec<_> = self
            .consumed
            .live_children(dom, id)
            .filter(|&c| dom.is_tag(c, "li"))
            .collect();
        let start = dom
            .get_attr(id, "start")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);

        self.pending_block = true;
        for (i, item) in items.into_iter().enumerate() {
            let marker = match kind {
                ListKind::Ordered => format!("{}. ", start + i),
                ListKind::Unordered => "- ".to_string(),
            };
            let content = self.capture(|w| w.write_children(item)).content;
            let indent = format!("\n{}", " ".repeat(marker.len()));

            if i > 0 {
                self.new_line();
            }
            self.write_inline(&format!("{marker}{}", content.replace('\n', &indent)));
        }
        self.pending_block = true;
    }

    fn write_code_block(&mut self, id: NodeId) {
        let dom = self.dom;
        let text = self.consumed.live_text(dom, id);
        let text = text.trim_end_matches('\n');
        let language = dom
            .children(id)
            .find(|&c| dom.is_tag(c, "code"))
            .and_then(|code| dom.get_attr(code, "class"))
            .and_then(|class| {
                class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-"))
            })
            .unwrap_or("");
        let fence = "`".repeat(calculate_fence_length(text, '`'));

        self.pending_block = true;
        self.write_inline(&format!("{fence}{language}\n{text}\n{fence}"));
        self.pending_block = true;
    }

    fn write_inline_code(&mut self, id: NodeId) {
        let text = self
            .consumed
            .live_text(self.dom, id)
            .replace(['\r', '\n'], " ");
        if text.trim().is_empty() {
            if !text.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        let ticks = "`".repeat(calculate_inline_code_ticks(&text));
        let spacer = if text.starts_with('`') || text.ends_with('`') {
            " "
        } else {
            ""
        };
        self.write_inline(&format!("{ticks}{spacer}{text}{spacer}{ticks}"));
    }

    fn write_table(&mut self, id: NodeId) {
        let mut rows = Vec::new();
        self.collect_rows(id, &mut rows);

        let rendered: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| {
                let dom = self.dom;
                let cells: Vec<_> = self
                    .consumed
                    .live_children(dom, row)
                    .filter(|&c| dom.is_tag(c, "td") || dom.is_tag(c, "th"))
                    .collect();
                cells
                    .into_iter()
                    .map(|cell| {
                        self.capture(|w| w.write_children(cell))
                            .content
                            .replace('\n', " ")
                    })
                    .collect()
            })
            .collect();

        self.pending_block = true;
        for (i, cells) in rendered.iter().enumerate() {
            if i > 0 {
                self.new_line();
            }
            self.write_inline(&format!("| {} |", cells.join(" | ")));
            if i == 0 {
                self.new_line();
                let separator = vec!["---"; cells.len().max(1)].join(" | ");
                self.write_inline(&format!("| {separator} |"));
            }
        }
        self.pending_block = true;
    }

    fn collect_rows(&self, id: NodeId, rows: &mut Vec<NodeId>) {
        for child in self.consumed.live_children(self.dom, id) {
            match self.dom.element_name(child).map(|n| &**n) {
                Some("tr") => rows.push(child),
                Some("thead" | "tbody" | "tfoot") => self.collect_rows(child, rows),
                _ => {}
            }
        }
    }

    fn write_image(&mut self, id: NodeId) {
        let dom = self.dom;
        let Some(src) = dom.get_attr(id, "src").filter(|s| !s.trim().is_empty()) else {
            return;
        };
        let alt = escape_markdown(dom.get_attr(id, "alt").unwrap_or(""), false);
        let title = link_title(dom.get_attr(id, "title"));
        self.write_inline(&format!("![{alt}]({}{title})", escape_destination(src)));
    }

    fn write_link(&mut self, id: NodeId) {
        let dom = self.dom;
        let text = self.consumed.live_text(dom, id);
        if text.trim().is_empty() {
            // Nothing left to click once media placeholders were lifted out.
            if !text.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        let captured = self.capture(|w| w.write_children(id));
        match dom.get_attr(id, "href").filter(|h| !h.trim().is_empty()) {
            Some(href) => {
                let title = link_title(dom.get_attr(id, "title"));
                let close = format!("]({}{title})", escape_destination(href));
                self.write_captured(captured, "[", &close);
            }
            None => self.write_captured(captured, "", ""),
        }
    }
}

fn escape_destination(url: &str) -> String {
    url.trim().replace('(', "\\(").replace(')', "\\)")
}

fn link_title(title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => format!(" \"{}\"", t.replace('"', "\\\"")),
        None => String::new(),
    }
}

/// Render a list of sibling nodes as if they were the children of a neutral
/// root element.
pub fn render_nodes(
    dom: &ArenaDom,
    consumed: &ConsumedSet,
    nodes: &[NodeId],
    options: &MarkdownOptions,
) -> String {
    let mut writer = MarkdownWriter::new(dom, consumed, options);
    for &id in nodes {
        writer.write_node(id);
    }
    writer.finish()
}

/// Render a single element including its own markup (a heading keeps its `#`).
pub fn render_element(
    dom: &ArenaDom,
    consumed: &ConsumedSet,
    id: NodeId,
    options: &MarkdownOptions,
) -> String {
    render_nodes(dom, consumed, &[id], options)
}
