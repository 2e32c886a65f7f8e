use std::collections::VecDeque;

use sliver_common::warning::Warnings;

use super::fragment::{Fragment, Trivia};

/// Closing tag that ends raw-text mode for `<script>`.
const SCRIPT_END: &str = "</script>";

/// Lazy, forward-only fragment lexer.
///
/// Each call to `next` scans exactly one fragment starting where the
/// previous one ended, so the trivia of consecutive fragments tile the
/// input with no gaps and no overlap. The only lookahead is for
/// `<script>`, whose raw body and closing tag are queued behind the open
/// tag.
///
/// Lexing never fails. Anything the grammar cannot place (a lone `<`, an
/// unterminated tag or comment) comes out as a one-character text fragment
/// and scanning resumes after it.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    pub(super) input: &'a str,
    pub(super) pos: usize,
    pub(super) pending: VecDeque<Fragment>,
    warnings: Warnings,
}

impl<'a> Lexer<'a> {
    /// Start lexing `input` from its first byte.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: VecDeque::new(),
            warnings: Warnings::new("Lexer"),
        }
    }

    /// Recoveries reported while lexing so far.
    #[must_use]
    pub const fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// Scan the fragment at the current position.
    fn next_fragment(&mut self) -> Fragment {
        let start = self.pos;
        let scanned = self
            .scan_doctype(start)
            .or_else(|| self.scan_comment(start))
            .or_else(|| self.scan_close_tag(start))
            .or_else(|| self.scan_open_tag(start))
            .or_else(|| self.scan_text(start));
        let fragment = match scanned {
            Some(fragment) => fragment,
            None => self.scan_stray_bracket(start),
        };

        if fragment.is_open(Some("script")) {
            self.queue_script_body(&fragment);
        }

        let end = self
            .pending
            .back()
            .map_or(fragment.trivia().end, |last| last.trivia().end);
        assert!(end > start, "lexer made no progress at byte {start}");
        self.pos = end;
        fragment
    }

    // =========================================================================
    // Markup Rules
    // =========================================================================

    /// `<!doctype` + at least one whitespace + text up to `>`.
    fn scan_doctype(&self, start: usize) -> Option<Fragment> {
        let keyword_end = self.literal_ignore_case(start, "<!doctype")?;
        let value_start = self.skip_whitespace(keyword_end);
        if value_start == keyword_end {
            return None;
        }
        let value_end = self.take_while(value_start, |c| c != '>');
        if !self.byte_is(value_end, b'>') {
            return None;
        }
        let fragment = Fragment::doctype(&self.input[value_start..value_end]);
        Some(fragment.with_trivia(Trivia::new(start, value_end + 1)))
    }

    /// `<!--` + anything + the first `-->`.
    fn scan_comment(&self, start: usize) -> Option<Fragment> {
        let body_start = self.literal_ignore_case(start, "<!--")?;
        let body_len = self.input[body_start..].find("-->")?;
        let body_end = body_start + body_len;
        let fragment = Fragment::comment(&self.input[body_start..body_end]);
        Some(fragment.with_trivia(Trivia::new(start, body_end + "-->".len())))
    }

    /// `</name>`, with no whitespace allowed anywhere.
    fn scan_close_tag(&self, start: usize) -> Option<Fragment> {
        let name_start = self.literal_ignore_case(start, "</")?;
        let name_end = self.scan_name(name_start)?;
        if !self.byte_is(name_end, b'>') {
            return None;
        }
        let fragment = Fragment::close_tag(&self.input[name_start..name_end]);
        Some(fragment.with_trivia(Trivia::new(start, name_end + 1)))
    }

    /// `<name attr... /?>`.
    fn scan_open_tag(&self, start: usize) -> Option<Fragment> {
        if !self.byte_is(start, b'<') {
            return None;
        }
        let name_start = start + 1;
        let name_end = self.scan_name(name_start)?;

        let mut attributes = Vec::new();
        let mut pos = self.skip_whitespace(name_end);
        while let Some((attribute, next)) = self.scan_attribute(pos) {
            attributes.push(attribute);
            pos = self.skip_whitespace(next);
        }

        let self_closing = self.byte_is(pos, b'/');
        if self_closing {
            pos += 1;
        }
        if !self.byte_is(pos, b'>') {
            return None;
        }

        let fragment = Fragment::open_tag(
            &self.input[name_start..name_end],
            self_closing,
            attributes,
        );
        Some(fragment.with_trivia(Trivia::new(start, pos + 1)))
    }

    /// Queue the raw body and closing tag of a script element.
    ///
    /// If no `</script>` follows, nothing is queued and the open tag is
    /// treated like any other.
    fn queue_script_body(&mut self, open: &Fragment) {
        let body_start = open.trivia().end;
        let Some(close_start) = self.find_ignore_case(body_start, SCRIPT_END) else {
            let _ = self.warnings.warn_once(
                "script has no closing tag; lexing its body as markup",
                format_args!("<{}> at byte {}", open.value(), open.trivia().start),
            );
            return;
        };
        let close_end = close_start + SCRIPT_END.len();

        let body = Fragment::text(&self.input[body_start..close_start])
            .with_trivia(Trivia::new(body_start, close_start));
        let close = Fragment::close_tag(&self.input[close_start + 2..close_end - 1])
            .with_trivia(Trivia::new(close_start, close_end));
        self.pending.push_back(body);
        self.pending.push_back(close);
    }

    // =========================================================================
    // Character Data Rules
    // =========================================================================

    /// One or more characters up to the next `<` or end of input.
    fn scan_text(&self, start: usize) -> Option<Fragment> {
        let end = self.take_while(start, |c| c != '<');
        (end > start).then(|| {
            Fragment::text(&self.input[start..end]).with_trivia(Trivia::new(start, end))
        })
    }

    /// A `<` no other rule could use, kept as a one-character text fragment.
    fn scan_stray_bracket(&mut self, start: usize) -> Fragment {
        debug_assert!(self.byte_is(start, b'<'), "only '<' can defeat the text rule");
        let _ = self
            .warnings
            .warn_once("stray '<' kept as text", format_args!("byte {start}"));
        Fragment::text("<").with_trivia(Trivia::new(start, start + 1))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        if let Some(fragment) = self.pending.pop_front() {
            return Some(fragment);
        }
        if self.pos >= self.input.len() {
            return None;
        }
        Some(self.next_fragment())
    }
}

impl core::iter::FusedIterator for Lexer<'_> {}

/// Lex `input` into fragments.
///
/// The result is lazy: nothing is scanned until the iterator is pulled, and
/// dropping it early leaves the rest of the input untouched.
///
/// # Example
/// ```
/// use sliver_html::tokenizer::{read, FragmentKind};
///
/// let kinds: Vec<FragmentKind> = read("<p>hi</p>").map(|f| f.kind()).collect();
/// assert_eq!(kinds, [FragmentKind::Open, FragmentKind::Text, FragmentKind::Close]);
/// ```
#[must_use]
pub const fn read(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}
