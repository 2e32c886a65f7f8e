//! Integration tests for the structural parser.

use sliver_html::parser::{DomEvent, DomEventKind, parse, parse_fragments};
use sliver_html::serialize::{write_html, write_source};
use sliver_html::tokenizer::{Fragment, Trivia, read};
use sliver_html::tree::build_tree;

/// Helper to parse and render canonically
fn roundtrip(html: &str) -> String {
    write_html(parse(html))
}

/// Helper to list the kinds of events produced for `html`
fn kinds(html: &str) -> Vec<DomEventKind> {
    parse(html).map(|event| event.kind()).collect()
}

#[test]
fn test_well_formed_roundtrip() {
    assert_eq!(
        roundtrip("<p>This is <b>a test</b>!</p>"),
        "<p>This is <b>a test</b>!</p>"
    );
}

#[test]
fn test_stray_brackets_survive() {
    assert_eq!(
        roundtrip("<p>10 is < 15 and that's true.</p>"),
        "<p>10 is < 15 and that's true.</p>"
    );
    assert_eq!(
        roundtrip("<p>10 is <15 and that's true.</p>"),
        "<p>10 is <15 and that's true.</p>"
    );
}

#[test]
fn test_closing_paragraph_is_optional() {
    assert_eq!(
        roundtrip("<p>closing<p>is optional"),
        "<p>closing</p><p>is optional</p>"
    );
}

#[test]
fn test_paragraph_close_closes_nested_elements() {
    assert_eq!(
        roundtrip("<p><b>closing<p>is optional"),
        "<p><b>closing</b></p><p>is optional</p>"
    );
}

#[test]
fn test_block_element_closes_paragraph() {
    assert_eq!(
        roundtrip("<p>intro<div>block</div>"),
        "<p>intro</p><div>block</div>"
    );
    assert_eq!(roundtrip("<p>a<P>b"), "<p>a</p><P>b</P>");
}

#[test]
fn test_void_close_tags_are_ignored() {
    assert_eq!(roundtrip("<p>bad<br></br>HTML</p>"), "<p>bad<br>HTML</p>");
    assert_eq!(roundtrip("<p>bad<br>HTML</p>"), "<p>bad<br>HTML</p>");
}

#[test]
fn test_void_close_tag_produces_no_event() {
    let with_closer: Vec<DomEvent> = parse("<br></br>").collect();
    let without: Vec<DomEvent> = parse("<br>").collect();
    assert_eq!(with_closer, without);

    let with_closer: Vec<DomEvent> = parse("<p>bad<BR></br>HTML</p>").collect();
    let without: Vec<DomEvent> = parse("<p>bad<BR>HTML</p>").collect();
    assert_eq!(with_closer, without);
}

#[test]
fn test_closing_li_is_optional() {
    assert_eq!(
        roundtrip("<ul><li>test<li>test2</ul><b>test</b>"),
        "<ul><li>test</li><li>test2</li></ul><b>test</b>"
    );
}

#[test]
fn test_nested_lists_keep_their_items() {
    assert_eq!(
        roundtrip("<ul><li><ul><li>child</li></ul></li></ul>"),
        "<ul><li><ul><li>child</li></ul></li></ul>"
    );
    assert_eq!(
        roundtrip("<ul><li>outer<ul><li>inner</ul></ul>"),
        "<ul><li>outer<ul><li>inner</li></ul></li></ul>"
    );
}

#[test]
fn test_implied_li_close_is_synthesized_at_next_item() {
    let source = "<ul><li>a<li>b</ul>";
    let implied = parse(source)
        .find_map(|event| match event {
            DomEvent::Pop(Some(close)) if close.trivia().is_empty() => Some(close),
            _ => None,
        })
        .expect("an invented </li>");

    assert!(implied.is_close(Some("li")));
    assert_eq!(implied.trivia(), Trivia::at(9));
}

#[test]
fn test_unmatched_close_stays_a_child() {
    assert_eq!(roundtrip("<a>Link</b>"), "<a>Link</b></a>");
    assert_eq!(
        kinds("<a>Link</b>"),
        [
            DomEventKind::Push,
            DomEventKind::Child,
            DomEventKind::Child,
            DomEventKind::Pop,
        ]
    );
}

#[test]
fn test_close_pops_every_intervening_element() {
    assert_eq!(
        roundtrip("<div><span><i>x</div>after"),
        "<div><span><i>x</i></span></div>after"
    );
}

#[test]
fn test_end_of_input_closes_everything() {
    assert_eq!(roundtrip("<html><body><div>x"), "<html><body><div>x</div></body></html>");
}

#[test]
fn test_self_closing_and_void_tags_never_push() {
    assert_eq!(
        kinds("<div/><img src=x><input>"),
        [DomEventKind::Child, DomEventKind::Child, DomEventKind::Child]
    );
}

#[test]
fn test_stream_is_balanced() {
    let sources = [
        "</a></b><c><d></c>",
        "<ul><li><li><p><p><div></ul>",
        "<<<>>></p><!-- x",
    ];
    for source in sources {
        let mut depth: i64 = 0;
        for event in parse(source) {
            match event.kind() {
                DomEventKind::Push => depth += 1,
                DomEventKind::Pop => depth -= 1,
                DomEventKind::Child => {}
            }
            assert!(depth >= 0, "unbalanced pop in {source:?}");
        }
        assert_eq!(depth, 0, "unclosed element in {source:?}");
    }
}

#[test]
fn test_parse_fragments_accepts_edited_stream() {
    let fragments = read("<p>one<p>two")
        .filter(|fragment| fragment.value() != "one")
        .collect::<Vec<_>>();
    assert_eq!(write_html(parse_fragments(fragments)), "<p></p><p>two</p>");
}

#[test]
fn test_parse_fragments_without_trivia() {
    let fragments = vec![
        Fragment::open_tag("ul", false, Vec::new()),
        Fragment::open_tag("li", false, Vec::new()),
        Fragment::text("x"),
        Fragment::open_tag("li", false, Vec::new()),
    ];
    assert_eq!(
        write_html(parse_fragments(fragments)),
        "<ul><li>x</li><li></li></ul>"
    );
}

#[test]
fn test_write_source_preserves_formatting() {
    let source = "<DIV Class='a'>x<br/>y</DIV >";
    // `</DIV >` is not a closing tag, so the div stays open to the end.
    assert_eq!(write_source(source, parse(source)), "<DIV Class='a'>x<br/>y</DIV ></DIV>");
}

#[test]
fn test_tree_shape_from_events() {
    let root = build_tree(parse("<div><p>one<p>two</div>"));
    let div = root.find("div").expect("div");
    assert_eq!(div.children.len(), 2);
    assert_eq!(div.children[0].text_content(), "one");
    assert_eq!(div.children[1].text_content(), "two");
}
