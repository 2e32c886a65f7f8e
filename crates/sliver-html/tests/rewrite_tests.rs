//! Integration tests for matching and rewriting elements by source offset.

use sliver_html::parser::{DomEvent, DomEventKind, parse};
use sliver_html::rewrite::{
    Placement, Scope, WrapMode, element_spans, extract_elements, extract_text, replace_elements,
    within_element, wrap_elements,
};

const WRAP_SOURCE: &str = "<body><div class=\"wrap-me\"><p>This should be wrapped</p></div></body>";

#[test]
fn test_no_match_reproduces_source() {
    let original = "<!doctype html><html><body><p>This is a test<p>Bad paragraph</p>\
                    <!--Comment--><script>alert('<ok   >');</script></body></html>";
    let result = replace_elements(
        original,
        |f| f.is_named("no-such-element"),
        "<!-- nothing is replaced -->",
        Scope::Outer,
    );
    assert_eq!(result, original);
}

#[test]
fn test_invalid_html_is_reproduced() {
    for html in [
        "<a id=\"space here is invalid\" Link</a>",
        "<a id=\"forgot to close this>Link</a>",
        "<p>bad<br></br>HTML</p>",
        "<ul><li>one<li>two</ul></p >",
    ] {
        assert_eq!(replace_elements(html, |_| false, "Replaced!", Scope::Outer), html);
    }
}

#[test]
fn test_replace_matching_element() {
    let html = "<html><nav id=\"replacement\"><b>Replace <i>me</i></b></nav><footer>Leave me</footer></html>";
    let result = replace_elements(
        html,
        |f| f.is_open(Some("nav")) && f.has_attribute_value("id", "replacement"),
        "<nav>Replaced</nav>",
        Scope::Outer,
    );
    assert_eq!(result, "<html><nav>Replaced</nav><footer>Leave me</footer></html>");
}

#[test]
fn test_replace_outer_and_inner() {
    let html = "<html><body><header>Head!</header><nav class=\"primary\">TO REPLACE</nav></body></html>";

    let outer = replace_elements(html, |f| f.is_open(Some("nav")), "<nav>Replaced!</nav>", Scope::Outer);
    assert_eq!(
        outer,
        "<html><body><header>Head!</header><nav>Replaced!</nav></body></html>"
    );

    let inner = replace_elements(html, |f| f.is_open(Some("nav")), "<p>Replaced!</p>", Scope::Inner);
    assert_eq!(
        inner,
        "<html><body><header>Head!</header><nav class=\"primary\"><p>Replaced!</p></nav></body></html>"
    );
}

#[test]
fn test_replace_keeps_discarded_void_close_outside_match() {
    let html = "<p>a<br></br></p><span>x</span>";
    let result = replace_elements(html, |f| f.is_named("span"), "", Scope::Outer);
    assert_eq!(result, "<p>a<br></br></p>");
}

#[test]
fn test_replace_implicitly_closed_items() {
    let html = "<ul><li>one<li>two</ul>";
    let result = replace_elements(html, |f| f.is_named("li"), "<li>x</li>", Scope::Outer);
    assert_eq!(result, "<ul><li>x</li><li>x</li></ul>");
}

#[test]
fn test_within_element_marks_region() {
    let html = "<body><div id=\"extract\">Extract Me</div></body>";
    let region: Vec<DomEvent> = within_element(parse(html), |f| {
        f.is_named("div") && f.attribute_is("id", "extract")
    })
    .filter(|placed| placed.placement.is_within())
    .map(|placed| placed.event)
    .collect();

    assert_eq!(region.len(), 3);
    assert!(region[0].fragment().is_some_and(|f| f.is_named("div")));
    assert_eq!(region[1].fragment().map(|f| f.value()), Some("Extract Me"));
    assert_eq!(region[2].kind(), DomEventKind::Pop);
}

#[test]
fn test_nested_matches_belong_to_outer_match() {
    let html = "<div>a<div>b</div></div><div>c</div>";
    let outer = extract_elements(html, |f| f.is_named("div"), Scope::Outer);
    assert_eq!(outer, ["<div>a<div>b</div></div>", "<div>c</div>"]);
}

#[test]
fn test_extract_single_element() {
    let html = "<body><div id=\"extract\">Extract Me</div></body>";
    let predicate = |f: &sliver_html::Fragment| f.is_named("div") && f.attribute_is("id", "extract");

    assert_eq!(
        extract_elements(html, predicate, Scope::Outer),
        ["<div id=\"extract\">Extract Me</div>"]
    );
    assert_eq!(extract_elements(html, predicate, Scope::Inner), ["Extract Me"]);
}

#[test]
fn test_extract_element_list() {
    let html = "<body><section>One</section><section>Two</section></body>";
    assert_eq!(
        extract_elements(html, |f| f.is_named("section"), Scope::Inner),
        ["One", "Two"]
    );
    assert_eq!(
        extract_elements(html, |f| f.is_named("section"), Scope::Outer),
        ["<section>One</section>", "<section>Two</section>"]
    );
}

#[test]
fn test_extract_nothing() {
    assert!(extract_elements("<p>x</p>", |f| f.is_named("table"), Scope::Outer).is_empty());
    assert!(extract_text("<p>x</p>", |f| f.is_named("table")).is_empty());
}

#[test]
fn test_extract_text_of_nested_markup() {
    let html = "<body><div id=\"extract\"><span>Extract</span> <em>Me</em></div></body>";
    assert_eq!(
        extract_text(html, |f| f.is_named("div") && f.attribute_is("id", "extract")),
        ["Extract Me"]
    );
}

#[test]
fn test_extract_text_list() {
    let html = "<body><p>First</p><p><bold>Second</bold> example</p></body>";
    assert_eq!(
        extract_text(html, |f| f.is_named("p")),
        ["First", "Second example"]
    );
}

#[test]
fn test_wrap_inner() {
    let result = wrap_elements(
        WRAP_SOURCE,
        |f| f.is_named("div") && f.attribute_is("class", "wrap-me"),
        || "<span class=\"wrapped\">".to_owned(),
        || "</span>".to_owned(),
        WrapMode::Inner,
    );
    assert_eq!(
        result,
        "<body><div class=\"wrap-me\"><span class=\"wrapped\"><p>This should be wrapped</p></span></div></body>"
    );
}

#[test]
fn test_wrap_outer() {
    let result = wrap_elements(
        WRAP_SOURCE,
        |f| f.is_named("div") && f.attribute_is("class", "wrap-me"),
        || "<span class=\"wrapped\">".to_owned(),
        || "</span>".to_owned(),
        WrapMode::Outer,
    );
    assert_eq!(
        result,
        "<body><span class=\"wrapped\"><div class=\"wrap-me\"><p>This should be wrapped</p></div></span></body>"
    );
}

#[test]
fn test_wrap_replace() {
    let result = wrap_elements(
        WRAP_SOURCE,
        |f| f.is_named("div") && f.attribute_is("class", "wrap-me"),
        || "<span class=\"wrapped\">".to_owned(),
        || "</span>".to_owned(),
        WrapMode::Replace,
    );
    assert_eq!(
        result,
        "<body><span class=\"wrapped\"><p>This should be wrapped</p></span></body>"
    );
}

#[test]
fn test_wrap_numbers_each_match() {
    let mut count = 0;
    let result = wrap_elements(
        "<ul><li>One</li><li>Two</li></ul>",
        |f| f.is_named("li"),
        || {
            let open = format!("<span id=\"t{count}\">");
            count += 1;
            open
        },
        || "</span>".to_owned(),
        WrapMode::Inner,
    );
    assert_eq!(
        result,
        "<ul><li><span id=\"t0\">One</span></li><li><span id=\"t1\">Two</span></li></ul>"
    );
}

#[test]
fn test_process_regions_with_placements() {
    let html = "<ul><li>One</li><li>Two</li></ul>";
    let mut out = String::new();
    let mut count = 0;

    for placed in within_element(parse(html), |f| f.is_named("li")) {
        match placed.placement {
            Placement::Enter => {
                out.push_str(&format!("<li id=\"t{count}\"><b>"));
                count += 1;
            }
            Placement::Exit => out.push_str(&format!("</b><!-- {count} --></li>")),
            Placement::Outside | Placement::Inside | Placement::Whole => {
                if let Some(fragment) = placed.event.fragment() {
                    out.push_str(fragment.source_text(html));
                }
            }
        }
    }

    assert_eq!(
        out,
        "<ul><li id=\"t0\"><b>One</b><!-- 1 --></li><li id=\"t1\"><b>Two</b><!-- 2 --></li></ul>"
    );
}

#[test]
fn test_spans_of_whole_matches() {
    let spans = element_spans("x<!--c-->y", |f| f.value() == "c");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].outer, 1..9);
    assert_eq!(spans[0].inner, None);
}
