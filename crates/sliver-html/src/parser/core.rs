use std::collections::VecDeque;

use sliver_common::warning::Warnings;

use super::elements::{is_paragraph_closing_tag, is_void_element};
use super::event::DomEvent;
use crate::tokenizer::helpers::names_match;
use crate::tokenizer::{Fragment, FragmentKind, Lexer, Trivia, read};

/// Turns a fragment stream into balanced [`DomEvent`]s.
///
/// The parser holds a single stack with the names of the elements that are
/// currently open. Each input fragment produces one event, except that
/// implied closes fan out into extra `Pop`s ahead of the fragment that
/// caused them, and a closing tag for a void element produces nothing.
/// When the input runs out, every element still open gets a `Pop`, so the
/// stream is always balanced.
///
/// Work happens only as events are pulled; a consumer can stop at any time.
#[derive(Debug, Clone)]
pub struct LexedDomParser<I> {
    fragments: I,
    /// Names of open elements, innermost last.
    open_elements: Vec<String>,
    /// Events produced but not yet handed out.
    pending: VecDeque<DomEvent>,
    finished: bool,
    warnings: Warnings,
}

impl<I> LexedDomParser<I>
where
    I: Iterator<Item = Fragment>,
{
    /// Create a parser over any fragment source.
    pub fn new(fragments: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            fragments: fragments.into_iter(),
            open_elements: Vec::new(),
            pending: VecDeque::new(),
            finished: false,
            warnings: Warnings::new("Parser"),
        }
    }

    /// How many elements are open right now.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    /// Names of the open elements, outermost first.
    pub fn open_elements(&self) -> impl Iterator<Item = &str> {
        self.open_elements.iter().map(String::as_str)
    }

    /// Recoveries reported while parsing so far.
    ///
    /// Each category appears once per run, however many times it occurred.
    #[must_use]
    pub const fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    fn emit(&mut self, event: DomEvent) {
        self.pending.push_back(event);
    }

    fn process_fragment(&mut self, fragment: Fragment) {
        match fragment.kind() {
            FragmentKind::Comment | FragmentKind::Doctype | FragmentKind::Text => {
                self.emit(DomEvent::Child(fragment));
            }
            FragmentKind::Close => self.handle_close_tag(fragment),
            FragmentKind::Open => self.handle_open_tag(fragment),
        }
    }

    fn handle_close_tag(&mut self, fragment: Fragment) {
        if is_void_element(fragment.value()) {
            let _ = self.warnings.warn_once(
                "discarded closing tag for void element",
                format_args!("</{}>", fragment.value()),
            );
            return;
        }

        match self.find_open_element(fragment.value()) {
            Some(index) => self.pop_until(index, Some(fragment)),
            None => {
                // Nothing to close: keep the tag as a leaf, leave the stack alone.
                let _ = self.warnings.warn_once(
                    "closing tag matches no open element",
                    format_args!("</{}>", fragment.value()),
                );
                self.emit(DomEvent::Child(fragment));
            }
        }
    }

    fn handle_open_tag(&mut self, fragment: Fragment) {
        if is_paragraph_closing_tag(fragment.value()) {
            self.close_until_match("p", None);
        } else if fragment.is_named("li") {
            self.close_sibling_list_item(fragment.trivia().start);
        }

        let pushes = !fragment.is_self_closing() && !is_void_element(fragment.value());
        if pushes {
            self.open_elements.push(fragment.value().to_owned());
            self.emit(DomEvent::Push(fragment));
        } else {
            self.emit(DomEvent::Child(fragment));
        }
    }

    /// A new `<li>` closes the nearest open `<li>`, unless a `<ul>` sits
    /// between them (then the open `<li>` belongs to an outer list).
    fn close_sibling_list_item(&mut self, at: usize) {
        let nearest = self
            .open_elements
            .iter()
            .rposition(|name| names_match(name, "li") || names_match(name, "ul"));

        if let Some(index) = nearest
            && names_match(&self.open_elements[index], "li")
        {
            let close = Fragment::close_tag(self.open_elements[index].clone())
                .with_trivia(Trivia::at(at));
            self.pop_until(index, Some(close));
        }
    }

    /// Stack index of the innermost open element called `name`.
    fn find_open_element(&self, name: &str) -> Option<usize> {
        self.open_elements
            .iter()
            .rposition(|open| names_match(open, name))
    }

    /// Close the innermost element called `name` and everything opened
    /// inside it. Does nothing if no such element is open.
    fn close_until_match(&mut self, name: &str, closing: Option<Fragment>) {
        if let Some(index) = self.find_open_element(name) {
            self.pop_until(index, closing);
        }
    }

    /// Pop the stack down to and including `index`. Elements above it get
    /// an implicit `Pop`; the element at `index` gets `closing`.
    fn pop_until(&mut self, index: usize, closing: Option<Fragment>) {
        while self.open_elements.len() > index + 1 {
            let _ = self.open_elements.pop();
            self.emit(DomEvent::Pop(None));
        }
        let _ = self.open_elements.pop();
        self.emit(DomEvent::Pop(closing));
    }

    /// End of input: close whatever is left, innermost first.
    fn close_remaining(&mut self) {
        while let Some(name) = self.open_elements.pop() {
            let _ = self
                .warnings
                .warn_once("element still open at end of input", format_args!("<{name}>"));
            self.emit(DomEvent::Pop(None));
        }
    }
}

impl<I> Iterator for LexedDomParser<I>
where
    I: Iterator<Item = Fragment>,
{
    type Item = DomEvent;

    fn next(&mut self) -> Option<DomEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.finished {
                return None;
            }
            match self.fragments.next() {
                Some(fragment) => self.process_fragment(fragment),
                None => {
                    self.close_remaining();
                    self.finished = true;
                }
            }
        }
    }
}

impl<I> core::iter::FusedIterator for LexedDomParser<I> where I: Iterator<Item = Fragment> {}

/// Lex and parse `input` in one go.
///
/// # Example
/// ```
/// use sliver_html::parser::{parse, DomEventKind};
///
/// let kinds: Vec<DomEventKind> = parse("<p>a<p>b").map(|e| e.kind()).collect();
/// assert_eq!(
///     kinds,
///     [
///         DomEventKind::Push,
///         DomEventKind::Child,
///         DomEventKind::Pop,
///         DomEventKind::Push,
///         DomEventKind::Child,
///         DomEventKind::Pop,
///     ]
/// );
/// ```
#[must_use]
pub fn parse(input: &str) -> LexedDomParser<Lexer<'_>> {
    LexedDomParser::new(read(input))
}

/// Parse an existing fragment sequence, such as one a caller has filtered
/// or rewritten.
#[must_use]
pub fn parse_fragments<F>(fragments: F) -> LexedDomParser<F::IntoIter>
where
    F: IntoIterator<Item = Fragment>,
{
    LexedDomParser::new(fragments)
}
