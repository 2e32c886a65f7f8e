//! Optional tree materialization of the event stream.

use serde::Serialize;

use crate::parser::DomEvent;
use crate::tokenizer::{Fragment, FragmentKind};

/// A node of the implied DOM.
///
/// The root has no fragment. Elements hold their open tag; leaves hold
/// whatever fragment the parser emitted as a child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// The open tag or leaf fragment, `None` for the root.
    pub fragment: Option<Fragment>,
    /// Nested nodes in document order.
    pub children: Vec<Node>,
}

impl Node {
    fn new(fragment: Fragment) -> Self {
        Self {
            fragment: Some(fragment),
            children: Vec::new(),
        }
    }

    /// True for the synthetic document root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.fragment.is_none()
    }

    /// Tag name for element nodes.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fragment
            .as_ref()
            .filter(|fragment| fragment.kind() == FragmentKind::Open)
            .map(Fragment::value)
    }

    /// Concatenated text of every text leaf below this node.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(fragment) = &self.fragment
            && fragment.kind() == FragmentKind::Text
        {
            out.push_str(fragment.value());
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// First element named `name` in depth-first order, including `self`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.fragment.as_ref().is_some_and(|f| f.is_open(Some(name))) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// Build a tree from parser events.
///
/// Pops beyond the root are ignored and elements still open when the events
/// run out are attached where they stand, so any event sequence yields a
/// tree. Parser output never needs either repair.
#[must_use]
pub fn build_tree(events: impl IntoIterator<Item = DomEvent>) -> Node {
    let mut stack = vec![Node::default()];

    for event in events {
        match event {
            DomEvent::Push(fragment) => stack.push(Node::new(fragment)),
            DomEvent::Child(fragment) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::new(fragment));
                }
            }
            DomEvent::Pop(_) => attach_top(&mut stack),
        }
    }

    while stack.len() > 1 {
        attach_top(&mut stack);
    }
    stack.pop().unwrap_or_default()
}

/// Move the innermost open node into its parent. The root stays put.
fn attach_top(stack: &mut Vec<Node>) {
    if stack.len() > 1
        && let Some(node) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.children.push(node);
    }
}

/// Print an indented outline of a tree to stdout.
pub fn print_tree(node: &Node, indent: usize) {
    let prefix = "  ".repeat(indent);
    match &node.fragment {
        None => println!("{prefix}#root"),
        Some(fragment) => match fragment.kind() {
            FragmentKind::Open => println!("{prefix}{fragment}"),
            FragmentKind::Text => println!("{prefix}{:?}", fragment.value()),
            FragmentKind::Close => println!("{prefix}(stray) {fragment}"),
            FragmentKind::Comment | FragmentKind::Doctype => println!("{prefix}{fragment}"),
        },
    }
    for child in &node.children {
        print_tree(child, indent + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_build_tree_from_list() {
        let root = build_tree(parse("<ul><li>first</li><li>second</li></ul>"));
        assert!(root.is_root());
        assert_eq!(root.children.len(), 1);

        let ul = &root.children[0];
        assert_eq!(ul.name(), Some("ul"));
        assert_eq!(ul.children.len(), 2);
        assert_eq!(ul.children[0].text_content(), "first");
        assert_eq!(ul.children[1].text_content(), "second");
    }

    #[test]
    fn test_unbalanced_events_still_build() {
        let events = vec![
            DomEvent::Pop(None),
            DomEvent::Push(Fragment::open_tag("div", false, Vec::new())),
            DomEvent::Child(Fragment::text("x")),
        ];
        let root = build_tree(events);
        assert_eq!(root.find("div").map(Node::text_content).as_deref(), Some("x"));
    }
}
