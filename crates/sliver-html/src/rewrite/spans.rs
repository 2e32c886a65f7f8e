use core::ops::Range;

use super::within::{Placement, within_element};
use crate::parser::parse;
use crate::tokenizer::Fragment;

/// Byte ranges of one matched element in its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpan {
    /// From the first byte of the open tag to the last byte of the element.
    pub outer: Range<usize>,
    /// Between the open tag and the closing tag. `None` for fragments that
    /// open no element and so have no content.
    pub inner: Option<Range<usize>>,
}

/// Locate every top-level element selected by `predicate`.
///
/// An element whose closing tag was missing from the source ends where the
/// last fragment inside it ends, so the span never swallows markup that
/// follows it.
pub fn element_spans<P>(source: &str, predicate: P) -> Vec<ElementSpan>
where
    P: FnMut(&Fragment) -> bool,
{
    let mut spans = Vec::new();
    // (outer start, inner start) of the element being walked
    let mut open: Option<(usize, usize)> = None;
    let mut last_end = 0;

    for placed in within_element(parse(source), predicate) {
        match placed.placement {
            Placement::Outside => {}
            Placement::Whole => {
                if let Some(fragment) = placed.event.fragment() {
                    spans.push(ElementSpan {
                        outer: fragment.trivia().range(),
                        inner: None,
                    });
                }
            }
            Placement::Enter => {
                if let Some(fragment) = placed.event.fragment() {
                    let trivia = fragment.trivia();
                    open = Some((trivia.start, trivia.end));
                    last_end = trivia.end;
                }
            }
            Placement::Inside => {
                if let Some(fragment) = placed.event.fragment() {
                    last_end = last_end.max(fragment.trivia().end);
                }
            }
            Placement::Exit => {
                let Some((outer_start, inner_start)) = open.take() else {
                    continue;
                };
                let (inner_end, outer_end) = match placed.event.fragment() {
                    Some(close) if !placed.event.is_implicit_pop() => {
                        (close.trivia().start, close.trivia().end)
                    }
                    _ => (last_end, last_end),
                };
                spans.push(ElementSpan {
                    outer: outer_start..outer_end,
                    inner: Some(inner_start..inner_end),
                });
            }
        }
    }
    spans
}
