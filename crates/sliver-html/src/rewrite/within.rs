use strum_macros::Display;

use crate::parser::DomEvent;
use crate::tokenizer::Fragment;

/// Where an event sits relative to the elements a predicate selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Placement {
    /// Not part of any matched element.
    Outside,
    /// The open tag of a matched element.
    Enter,
    /// Anything nested inside a matched element.
    Inside,
    /// The `Pop` that closes a matched element.
    Exit,
    /// A matched fragment that opens no element (void tag, self-closing
    /// tag, text, comment): it is the whole region by itself.
    Whole,
}

impl Placement {
    /// True for every placement that belongs to a matched region.
    #[must_use]
    pub const fn is_within(self) -> bool {
        !matches!(self, Self::Outside)
    }
}

/// A parser event tagged with its [`Placement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEvent {
    /// The underlying parser event.
    pub event: DomEvent,
    /// Where it sits relative to matched elements.
    pub placement: Placement,
}

/// Iterator returned by [`within_element`].
#[derive(Debug, Clone)]
pub struct WithinElement<I, P> {
    events: I,
    predicate: P,
    /// Open elements inside the current match, the match itself included.
    /// Zero while outside.
    depth: usize,
}

impl<I, P> Iterator for WithinElement<I, P>
where
    I: Iterator<Item = DomEvent>,
    P: FnMut(&Fragment) -> bool,
{
    type Item = PlacedEvent;

    fn next(&mut self) -> Option<PlacedEvent> {
        let event = self.events.next()?;

        let placement = if self.depth > 0 {
            match &event {
                DomEvent::Push(_) => {
                    self.depth += 1;
                    Placement::Inside
                }
                DomEvent::Child(_) => Placement::Inside,
                DomEvent::Pop(_) => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        Placement::Exit
                    } else {
                        Placement::Inside
                    }
                }
            }
        } else {
            match &event {
                DomEvent::Push(fragment) if (self.predicate)(fragment) => {
                    self.depth = 1;
                    Placement::Enter
                }
                DomEvent::Child(fragment) if (self.predicate)(fragment) => Placement::Whole,
                _ => Placement::Outside,
            }
        };

        Some(PlacedEvent { event, placement })
    }
}

/// Tag each event with whether it lies within an element selected by
/// `predicate`.
///
/// The predicate sees Push and Child fragments outside any match. Once an
/// element matches, everything up to its closing `Pop` belongs to it, so
/// nested elements that would also match are reported as `Inside`.
///
/// # Example
/// ```
/// use sliver_html::parser::parse;
/// use sliver_html::rewrite::{within_element, Placement};
///
/// let placements: Vec<Placement> = within_element(parse("<b><i>x</i></b>y"), |f| f.is_named("i"))
///     .map(|placed| placed.placement)
///     .collect();
/// assert_eq!(
///     placements,
///     [
///         Placement::Outside,
///         Placement::Enter,
///         Placement::Inside,
///         Placement::Exit,
///         Placement::Outside,
///         Placement::Outside,
///     ]
/// );
/// ```
pub fn within_element<E, P>(events: E, predicate: P) -> WithinElement<E::IntoIter, P>
where
    E: IntoIterator<Item = DomEvent>,
    P: FnMut(&Fragment) -> bool,
{
    WithinElement {
        events: events.into_iter(),
        predicate,
        depth: 0,
    }
}
