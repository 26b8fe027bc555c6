//! Directive scanner.
//!
//! Walks the text from one `{{` to the next and recognises the two surface
//! forms of the control syntax: flat directives (`{{kind:name[:rest]}}`) and
//! toggle blocks (`{{toggle:name}}...{{/toggle:name}}`). Everything else is
//! literal text. When a candidate at some `{{` does not match, scanning resumes
//! one byte later, so `{{{text:a}}` still yields the directive at offset 1.

use super::{ControlKind, Span};

pub(crate) const OPEN: &str = "{{";
pub(crate) const CLOSE: &str = "}}";
pub(crate) const TOGGLE_OPEN: &str = "{{toggle:";
pub(crate) const TOGGLE_CLOSE: &str = "{{/toggle:";

/// A `{{keyword:name[:rest]}}` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive<'a> {
    /// Keyword with surrounding whitespace trimmed.
    pub keyword: &'a str,
    /// Name with surrounding whitespace trimmed.
    pub name: &'a str,
    /// Everything after the second colon, untrimmed.
    pub rest: Option<&'a str>,
    pub span: Span,
}

impl Directive<'_> {
    pub fn kind(&self) -> Option<ControlKind> {
        ControlKind::from_keyword(self.keyword)
    }
}

/// A matched `{{toggle:name}}...{{/toggle:name}}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ToggleBlock<'a> {
    /// Name with surrounding whitespace trimmed.
    pub name: &'a str,
    pub body: &'a str,
    pub span: Span,
    pub body_span: Span,
}

/// A bare toggle tag, opening or closing, whether or not it is paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ToggleTag<'a> {
    pub name: &'a str,
    pub span: Span,
}

fn is_name_terminator(c: char) -> bool {
    c == ':' || c == '}'
}

/// Directives whose keyword is one of the control kinds.
pub(crate) fn directives(text: &str) -> Vec<Directive<'_>> {
    scan_directives(text, |d| d.kind().is_some())
}

/// Directives of the `{{keyword:name…}}` shape with a word-like keyword,
/// including keywords that are not control kinds.
pub(crate) fn keyword_directives(text: &str) -> Vec<Directive<'_>> {
    scan_directives(text, |d| {
        d.keyword.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    })
}

fn scan_directives<'a>(text: &'a str, accept: impl Fn(&Directive<'a>) -> bool) -> Vec<Directive<'a>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(OPEN) {
        let start = pos + offset;
        match read_directive(text, start) {
            Some(directive) if accept(&directive) => {
                pos = directive.span.end;
                found.push(directive);
            }
            // '{' is one byte, so start + 1 is a char boundary
            _ => pos = start + 1,
        }
    }

    found
}

/// Read a directive whose `{{` begins at `start`.
fn read_directive(text: &str, start: usize) -> Option<Directive<'_>> {
    let inner_start = start + OPEN.len();
    let inner = text.get(inner_start..)?;

    let keyword_len = inner.find(is_name_terminator)?;
    if !inner[keyword_len..].starts_with(':') {
        return None;
    }
    let keyword = inner[..keyword_len].trim();
    if keyword.is_empty() {
        return None;
    }

    let after_keyword = &inner[keyword_len + 1..];
    let name_len = after_keyword.find(is_name_terminator)?;
    let raw_name = &after_keyword[..name_len];
    let name = raw_name.trim();
    if name.is_empty() {
        return None;
    }

    let tail = &after_keyword[name_len..];
    let (rest, close_at) = match tail.strip_prefix(':') {
        Some(rest_and_close) => {
            let rest_len = rest_and_close.find('}')?;
            (Some(&rest_and_close[..rest_len]), name_len + 1 + rest_len)
        }
        None => (None, name_len),
    };

    if !after_keyword[close_at..].starts_with(CLOSE) {
        return None;
    }

    let end = inner_start + keyword_len + 1 + close_at + CLOSE.len();
    Some(Directive {
        keyword,
        name,
        rest,
        span: Span::new(start, end),
    })
}

/// Every matched toggle block, left to right.
///
/// The closing tag must repeat the opening name byte for byte; the first such
/// closer ends the block. Blocks are not searched for further blocks, so a
/// toggle written inside another one stays literal text.
pub(crate) fn toggle_blocks(text: &str) -> Vec<ToggleBlock<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(TOGGLE_OPEN) {
        let start = pos + offset;
        match read_toggle_block(text, start) {
            Some(block) => {
                pos = block.span.end;
                blocks.push(block);
            }
            None => pos = start + 1,
        }
    }

    blocks
}

/// Parse a `{{toggle:name}}` opener at `start`, returning the raw name and
/// the offset just past the opener.
fn read_toggle_opener(text: &str, start: usize) -> Option<(&str, usize)> {
    read_toggle_tag(text, start, TOGGLE_OPEN)
}

fn read_toggle_tag<'a>(text: &'a str, start: usize, prefix: &str) -> Option<(&'a str, usize)> {
    if !text.get(start..)?.starts_with(prefix) {
        return None;
    }
    let name_start = start + prefix.len();
    let after = &text[name_start..];
    let name_len = after.find(is_name_terminator)?;
    let raw_name = &after[..name_len];
    if raw_name.trim().is_empty() || !after[name_len..].starts_with(CLOSE) {
        return None;
    }
    Some((raw_name, name_start + name_len + CLOSE.len()))
}

fn closing_tag(raw_name: &str) -> String {
    format!("{TOGGLE_CLOSE}{raw_name}{CLOSE}")
}

fn read_toggle_block(text: &str, start: usize) -> Option<ToggleBlock<'_>> {
    let (raw_name, body_start) = read_toggle_opener(text, start)?;
    let closer = closing_tag(raw_name);
    let body_len = text[body_start..].find(&closer)?;
    let body_end = body_start + body_len;

    Some(ToggleBlock {
        name: raw_name.trim(),
        body: &text[body_start..body_end],
        span: Span::new(start, body_end + closer.len()),
        body_span: Span::new(body_start, body_end),
    })
}

/// Locate the body of the toggle block occupying `span`.
///
/// Returns `None` unless `span` is exactly one well-formed block.
pub(crate) fn toggle_body(text: &str, span: Span) -> Option<Span> {
    let block = text.get(span.range())?;
    let (raw_name, body_start) = read_toggle_opener(text, span.start)?;
    let closer = closing_tag(raw_name);
    if !block.ends_with(&closer) {
        return None;
    }
    let body_end = span.end - closer.len();
    (body_start <= body_end).then(|| Span::new(body_start, body_end))
}

/// Every `{{toggle:name}}` opener, paired or not.
pub(crate) fn toggle_openers(text: &str) -> Vec<ToggleTag<'_>> {
    toggle_tags(text, TOGGLE_OPEN)
}

/// Every `{{/toggle:name}}` closer, paired or not.
pub(crate) fn toggle_closers(text: &str) -> Vec<ToggleTag<'_>> {
    toggle_tags(text, TOGGLE_CLOSE)
}

fn toggle_tags<'a>(text: &'a str, prefix: &str) -> Vec<ToggleTag<'a>> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(prefix) {
        let start = pos + offset;
        match read_toggle_tag(text, start, prefix) {
            Some((raw_name, end)) => {
                tags.push(ToggleTag {
                    name: raw_name.trim(),
                    span: Span::new(start, end),
                });
                pos = end;
            }
            None => pos = start + 1,
        }
    }

    tags
}
