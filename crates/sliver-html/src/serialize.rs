//! Turning fragments and events back into HTML text.
//!
//! There are two flavours. [`write_html`] renders every fragment in its
//! canonical form (`Display`), which normalises attribute quoting and
//! doctype spelling. [`write_source`] copies each fragment's original bytes
//! and only renders what the source never contained: closing tags the
//! parser had to invent.

use crate::parser::DomEvent;
use crate::tokenizer::Fragment;

/// Concatenate the source text of each fragment.
///
/// For the full output of the lexer this is the identity on `source`.
#[must_use]
pub fn reconstruct<'f>(source: &str, fragments: impl IntoIterator<Item = &'f Fragment>) -> String {
    let mut out = String::with_capacity(source.len());
    for fragment in fragments {
        out.push_str(fragment.source_text(source));
    }
    out
}

/// Render an event stream in canonical form.
///
/// Child and Push events render their fragment; a Pop renders the closing
/// tag it carries, or `</name>` for the element being closed.
#[must_use]
pub fn write_html(events: impl IntoIterator<Item = DomEvent>) -> String {
    write_events(events, |fragment| fragment.to_string())
}

/// Render an event stream by copying source bytes wherever they exist.
///
/// Well-formed input comes back byte-for-byte. Invented closing tags are
/// rendered canonically; closing tags for void elements, which the parser
/// drops, do not appear.
#[must_use]
pub fn write_source(source: &str, events: impl IntoIterator<Item = DomEvent>) -> String {
    write_events(events, |fragment| {
        if fragment.trivia().is_empty() {
            fragment.to_string()
        } else {
            fragment.source_text(source).to_owned()
        }
    })
}

fn write_events(
    events: impl IntoIterator<Item = DomEvent>,
    mut render: impl FnMut(&Fragment) -> String,
) -> String {
    let mut out = String::new();
    let mut open: Vec<String> = Vec::new();

    for event in events {
        match event {
            DomEvent::Child(fragment) => out.push_str(&render(&fragment)),
            DomEvent::Push(fragment) => {
                out.push_str(&render(&fragment));
                open.push(fragment.value().to_owned());
            }
            DomEvent::Pop(close) => {
                let name = open.pop();
                match (close, name) {
                    (Some(close), _) => out.push_str(&render(&close)),
                    (None, Some(name)) => {
                        out.push_str("</");
                        out.push_str(&name);
                        out.push('>');
                    }
                    (None, None) => {}
                }
            }
        }
    }
    out
}
