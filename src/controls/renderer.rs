//! Control renderer.
//!
//! Rendering turns the declarations of a text into a splice plan: every
//! occurrence span is paired with its replacement and the plan is applied from
//! right to left, so offsets to the left of an edit stay valid.
//!
//! Toggle blocks resolve first. A truthy toggle is replaced by its body with
//! the controls inside it filled in; a falsy or missing one is removed with
//! everything it contains. Remaining controls outside toggle blocks are then
//! replaced by their value, or by their default when no value is given.

use super::parser::controls;
use super::scanner;
use super::{ControlDeclaration, ControlValue, Span, ValueMap};

/// Render `text` with `values` applied to `declarations`.
///
/// `declarations` are normally the output of [`parse`](super::parse) for the
/// same text. Values for names no declaration uses are ignored; missing values
/// fall back to each control's default. Spans that do not fit `text` are left
/// alone rather than causing a panic.
///
/// # Examples
///
/// ```rust,no_run
/// use promptctl_cli::controls::{parse, render, ValueMap};
///
/// let text = "Hi{{toggle:Formal}}, esteemed{{/toggle:Formal}} {{text:Name:John}}.";
/// let declarations = parse(text);
///
/// assert_eq!(render(text, &declarations, &ValueMap::new()), "Hi John.");
///
/// let values: ValueMap = [("Formal", true)].into_iter().collect();
/// assert_eq!(render(text, &declarations, &values), "Hi, esteemed John.");
/// ```
pub fn render(text: &str, declarations: &[ControlDeclaration], values: &ValueMap) -> String {
    let mut replacements: Vec<String> = Vec::new();
    let mut fills: Vec<(Span, usize)> = Vec::new();
    let mut toggles: Vec<(Span, bool)> = Vec::new();

    for control in controls(declarations) {
        let value = values.get(&control.name);
        if control.is_toggle() {
            let keep = value.is_some_and(ControlValue::is_truthy);
            toggles.extend(control.spans().iter().map(|span| (*span, keep)));
        } else {
            let slot = replacements.len();
            replacements.push(match value {
                Some(value) => value.to_string(),
                None => control.default_value.clone(),
            });
            fills.extend(control.spans().iter().map(|span| (*span, slot)));
        }
    }

    toggles.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    fills.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut edits: Vec<(Span, String)> = Vec::with_capacity(toggles.len() + fills.len());

    for &(span, keep) in &toggles {
        let Some(body) = scanner::toggle_body(text, span) else {
            tracing::debug!("Skipping toggle span {} that is not a toggle block", span);
            continue;
        };
        let replacement = if keep {
            let inner: Vec<(Span, &str)> = fills
                .iter()
                .filter(|(fill, _)| body.contains(fill))
                .map(|(fill, slot)| {
                    (Span::new(fill.start - body.start, fill.end - body.start), replacements[*slot].as_str())
                })
                .collect();
            splice(&text[body.range()], inner)
        } else {
            String::new()
        };
        edits.push((span, replacement));
    }

    for &(span, slot) in &fills {
        if edits.iter().any(|(block, _)| block.overlaps(&span)) {
            continue;
        }
        edits.push((span, replacements[slot].clone()));
    }

    tracing::debug!(
        "Rendering {} edit(s) ({} toggle block(s)) into {} byte(s) of text",
        edits.len(),
        toggles.len(),
        text.len()
    );
    splice(text, edits)
}

/// Apply non-overlapping span replacements from right to left.
///
/// Edits that are empty, out of range, off a char boundary, or overlapping an
/// edit further right are dropped.
fn splice<S: AsRef<str>>(source: &str, edits: impl IntoIterator<Item = (Span, S)>) -> String {
    let mut edits: Vec<(Span, S)> = edits.into_iter().collect();
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut output = source.to_string();
    let mut limit = source.len();

    for (span, replacement) in edits {
        if span.is_empty() || span.end > limit || source.get(span.range()).is_none() {
            tracing::trace!("Dropping edit at {} (limit {})", span, limit);
            continue;
        }
        output.replace_range(span.range(), replacement.as_ref());
        limit = span.start;
    }

    output
}
