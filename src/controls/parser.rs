//! Control declaration parser.
//!
//! Parsing runs in three passes over the scanner output:
//!
//! 1. toggle blocks are matched first;
//! 2. flat directives over the whole text become top-level declarations,
//!    except those lying inside a toggle block;
//! 3. each toggle body is scanned again on its own and the directives found
//!    there become the toggle's `nested` declarations.
//!
//! Declarations sharing `(kind, name)` collapse into the first one, which
//! records every later occurrence in `occurrences`.

use std::collections::HashMap;

use super::scanner::{self, Directive, ToggleBlock};
use super::{ControlDeclaration, ControlKind, SliderRange, Span};

/// Default slider position when none is written.
pub const DEFAULT_SLIDER_VALUE: &str = "50";

/// Parse every control declared in `text`.
///
/// Accepts `&str` or `Option<&str>`; `None` parses to an empty list, as does
/// text without any directive. Top-level declarations are returned in order of
/// their first occurrence. Controls written inside a toggle block are only
/// reachable through that toggle's [`nested`](ControlDeclaration::nested) list.
///
/// # Examples
///
/// ```rust,no_run
/// use promptctl_cli::controls::{parse, ControlKind};
///
/// let declarations = parse("Choose {{select:Genre:Fantasy|Sci-Fi|Mystery}}");
/// assert_eq!(declarations.len(), 1);
/// assert_eq!(declarations[0].kind, ControlKind::Select);
/// assert_eq!(declarations[0].options, ["Fantasy", "Sci-Fi", "Mystery"]);
/// assert_eq!(declarations[0].default_value, "Fantasy");
///
/// assert!(parse(None).is_empty());
/// ```
pub fn parse<'a>(text: impl Into<Option<&'a str>>) -> Vec<ControlDeclaration> {
    let Some(text) = text.into() else {
        return Vec::new();
    };
    if text.is_empty() {
        return Vec::new();
    }

    let scan = Scan::new(text);

    let mut toggles = Collector::default();
    let mut bodies: HashMap<&str, Collector> = HashMap::new();
    for (block, nested) in scan.blocks.iter().zip(&scan.nested) {
        toggles.push(toggle_declaration(block));
        let body = bodies.entry(block.name).or_default();
        for declaration in nested {
            body.push(declaration.clone());
        }
    }

    let mut declarations = toggles.into_vec();
    for toggle in &mut declarations {
        if let Some(body) = bodies.remove(toggle.name.as_str()) {
            toggle.nested = body.into_vec();
        }
    }

    let mut flats = Collector::default();
    for declaration in scan.top_level {
        flats.push(declaration);
    }
    declarations.extend(flats.into_vec());
    declarations.sort_by_key(|d| d.span.start);

    tracing::debug!(
        "Parsed {} control declaration(s) from {} byte(s) of text",
        declarations.len(),
        text.len()
    );
    declarations
}

/// Distinct controls across a whole document.
///
/// Flattens top-level declarations and the declarations nested inside toggles,
/// then collapses them by `(kind, name)`: the earliest occurrence supplies the
/// default and all occurrences are merged. This is the set of inputs a caller
/// needs to offer for the document.
pub fn controls(declarations: &[ControlDeclaration]) -> Vec<ControlDeclaration> {
    let mut all: Vec<&ControlDeclaration> = Vec::new();
    for declaration in declarations {
        all.push(declaration);
        all.extend(declaration.nested.iter());
    }
    all.sort_by_key(|d| d.span.start);

    let mut collector = Collector::default();
    for declaration in all {
        collector.merge(declaration);
    }

    let mut distinct = collector.into_vec();
    for control in &mut distinct {
        control.occurrences.sort_unstable();
        control.occurrences.dedup();
    }
    distinct
}

/// Raw scan of a text before de-duplication.
pub(crate) struct Scan<'a> {
    pub blocks: Vec<ToggleBlock<'a>>,
    /// Flat declarations outside every toggle block.
    pub top_level: Vec<ControlDeclaration>,
    /// Flat declarations of each block body, parallel to `blocks`.
    pub nested: Vec<Vec<ControlDeclaration>>,
}

impl<'a> Scan<'a> {
    pub fn new(text: &'a str) -> Self {
        let blocks = scanner::toggle_blocks(text);

        // A directive whose rest runs into a toggle block loses to the block.
        let top_level = scanner::directives(text)
            .iter()
            .filter(|d| !blocks.iter().any(|b| b.span.overlaps(&d.span)))
            .filter_map(|d| flat_declaration(d, 0))
            .collect();

        let nested = blocks
            .iter()
            .map(|block| {
                scanner::directives(block.body)
                    .iter()
                    .filter_map(|d| flat_declaration(d, block.body_span.start))
                    .collect()
            })
            .collect();

        Self {
            blocks,
            top_level,
            nested,
        }
    }
}

fn toggle_declaration(block: &ToggleBlock<'_>) -> ControlDeclaration {
    let mut declaration = ControlDeclaration::new(ControlKind::Toggle, block.name, block.span);
    declaration.inner_text = Some(block.body.to_string());
    declaration
}

/// Build a declaration for a non-toggle directive, shifting its span by `base`.
fn flat_declaration(directive: &Directive<'_>, base: usize) -> Option<ControlDeclaration> {
    let kind = directive.kind()?;
    let mut declaration = ControlDeclaration::new(kind, directive.name, directive.span.offset(base));

    match kind {
        ControlKind::Text => {
            declaration.default_value =
                directive.rest.map(str::trim).unwrap_or_default().to_string();
        }
        ControlKind::Select => {
            declaration.options = select_options(directive.rest);
            declaration.default_value = declaration.options.first().cloned().unwrap_or_default();
        }
        ControlKind::Slider => {
            let (default_value, range) = slider_parameters(directive.rest);
            declaration.default_value = default_value;
            declaration.range = Some(range);
        }
        // Openers are matched as blocks, never as flat controls.
        ControlKind::Toggle => return None,
    }

    Some(declaration)
}

fn select_options(rest: Option<&str>) -> Vec<String> {
    rest.map(|rest| {
        rest.split('|')
            .map(str::trim)
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Split `default[:min:max]`; bounds that fail to parse fall back to 0 and 100.
fn slider_parameters(rest: Option<&str>) -> (String, SliderRange) {
    let segments: Vec<&str> =
        rest.map(|rest| rest.split(':').map(str::trim).collect()).unwrap_or_default();

    let default_value = segments
        .first()
        .copied()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_SLIDER_VALUE)
        .to_string();

    let mut range = SliderRange::default();
    if segments.len() >= 3 {
        range.min = segments[1].parse().unwrap_or(range.min);
        range.max = segments[2].parse().unwrap_or(range.max);
    }

    (default_value, range)
}

/// Insertion-ordered collapse of declarations keyed by `(kind, name)`.
#[derive(Default)]
struct Collector {
    declarations: Vec<ControlDeclaration>,
    index: HashMap<(ControlKind, String), usize>,
}

impl Collector {
    /// Keep the first declaration per key; later ones only add their span.
    fn push(&mut self, declaration: ControlDeclaration) {
        let key = (declaration.kind, declaration.name.clone());
        match self.index.get(&key) {
            Some(&slot) => {
                tracing::trace!(
                    "Collapsing duplicate {} control '{}' at {}",
                    declaration.kind,
                    declaration.name,
                    declaration.span
                );
                self.declarations[slot].occurrences.push(declaration.span);
            }
            None => {
                self.index.insert(key, self.declarations.len());
                self.declarations.push(declaration);
            }
        }
    }

    /// Like [`push`](Self::push), but carries over every occurrence of an
    /// already collapsed declaration.
    fn merge(&mut self, declaration: &ControlDeclaration) {
        let key = (declaration.kind, declaration.name.clone());
        match self.index.get(&key) {
            Some(&slot) => {
                self.declarations[slot].occurrences.extend_from_slice(declaration.spans());
            }
            None => {
                let mut representative = declaration.clone();
                representative.occurrences = declaration.spans().to_vec();
                self.index.insert(key, self.declarations.len());
                self.declarations.push(representative);
            }
        }
    }

    fn into_vec(self) -> Vec<ControlDeclaration> {
        self.declarations
    }
}
