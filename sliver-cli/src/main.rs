//! Sliver CLI
//!
//! Inspect how HTML lexes and nests, and rewrite matched elements while
//! every other byte of the document stays exactly as it was.

mod matcher;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use sliver_common::warning::set_quiet;
use sliver_html::rewrite::{
    Scope, WrapMode, extract_elements, extract_text, replace_elements, wrap_elements,
};
use sliver_html::serialize::{write_html, write_source};
use sliver_html::{DomEvent, Fragment, FragmentKind, build_tree, parse, print_tree, read};

use matcher::ElementMatcher;

/// Lossless HTML lexing, structural parsing and rewriting
#[derive(Parser, Debug)]
#[command(name = "sliver")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # List fragments with their byte spans
    sliver tokens page.html

    # Show the implied element structure
    sliver events --html '<ul><li>one<li>two</ul>'

    # Pull out the main navigation
    sliver extract 'nav#main' page.html

    # Swap the content of every .ad container, keep everything else intact
    sliver replace 'div.ad' '' --scope inner page.html

    # Wrap each list item's content
    sliver wrap li '<span>' '</span>' --mode inner page.html
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Parse this HTML string instead of reading a file
    #[arg(long, global = true, value_name = "HTML")]
    html: Option<String>,

    /// Suppress recovery warnings on stderr
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Where the document comes from when `--html` is not given.
#[derive(Args, Debug)]
struct Source {
    /// HTML file to read (stdin if omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List lexed fragments with their byte spans
    Tokens {
        /// Only show fragments of this kind
        #[arg(long, value_name = "KIND")]
        kind: Option<FragmentKind>,

        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: Source,
    },

    /// List structural events (push, child, pop)
    Events {
        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: Source,
    },

    /// Print the implied element tree
    Tree {
        /// Emit JSON instead of an outline
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: Source,
    },

    /// Re-serialize the document through the parser
    Roundtrip {
        /// Render canonical markup instead of copying source bytes
        #[arg(long)]
        canonical: bool,

        #[command(flatten)]
        source: Source,
    },

    /// Print the source text of matching elements
    Extract {
        /// Element selector, e.g. `nav`, `div#main`, `p.note`, `a[href]`
        selector: ElementMatcher,

        /// Whole element (outer) or only its content (inner)
        #[arg(long, default_value_t = Scope::Outer)]
        scope: Scope,

        /// Emit a JSON array
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: Source,
    },

    /// Print the text content of matching elements
    Text {
        /// Element selector
        selector: ElementMatcher,

        /// Emit a JSON array
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: Source,
    },

    /// Replace matching elements with fixed markup
    Replace {
        /// Element selector
        selector: ElementMatcher,

        /// Markup to insert in place of each match
        replacement: String,

        /// Replace the whole element (outer) or only its content (inner)
        #[arg(long, default_value_t = Scope::Outer)]
        scope: Scope,

        #[command(flatten)]
        source: Source,
    },

    /// Surround matching elements with markup
    Wrap {
        /// Element selector
        selector: ElementMatcher,

        /// Markup inserted before each match
        open: String,

        /// Markup inserted after each match
        close: String,

        /// inner, outer, or replace (swap the element's own tags)
        #[arg(long, default_value_t = WrapMode::Outer)]
        mode: WrapMode,

        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    match cli.command {
        Command::Tokens { kind, json, source } => {
            let html = load(cli.html, source)?;
            let fragments: Vec<Fragment> = read(&html)
                .filter(|fragment| kind.is_none_or(|kind| fragment.kind() == kind))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&fragments)?);
            } else {
                print_fragments(&html, &fragments);
            }
        }
        Command::Events { json, source } => {
            let html = load(cli.html, source)?;
            let events: Vec<DomEvent> = parse(&html).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                print_events(&events);
            }
        }
        Command::Tree { json, source } => {
            let html = load(cli.html, source)?;
            let root = build_tree(parse(&html));
            if json {
                println!("{}", serde_json::to_string_pretty(&root)?);
            } else {
                print_tree(&root, 0);
            }
        }
        Command::Roundtrip { canonical, source } => {
            let html = load(cli.html, source)?;
            let output = if canonical {
                write_html(parse(&html))
            } else {
                write_source(&html, parse(&html))
            };
            print!("{output}");
            if output != html && !cli.quiet {
                eprintln!(
                    "{}",
                    "note: output differs from input (implied or discarded tags)".yellow()
                );
            }
        }
        Command::Extract {
            selector,
            scope,
            json,
            source,
        } => {
            let html = load(cli.html, source)?;
            let found = extract_elements(&html, |f| selector.matches(f), scope);
            print_list(&found, json)?;
        }
        Command::Text {
            selector,
            json,
            source,
        } => {
            let html = load(cli.html, source)?;
            let found = extract_text(&html, |f| selector.matches(f));
            print_list(&found, json)?;
        }
        Command::Replace {
            selector,
            replacement,
            scope,
            source,
        } => {
            let html = load(cli.html, source)?;
            print!(
                "{}",
                replace_elements(&html, |f| selector.matches(f), &replacement, scope)
            );
        }
        Command::Wrap {
            selector,
            open,
            close,
            mode,
            source,
        } => {
            let html = load(cli.html, source)?;
            print!(
                "{}",
                wrap_elements(
                    &html,
                    |f| selector.matches(f),
                    || open.clone(),
                    || close.clone(),
                    mode,
                )
            );
        }
    }

    Ok(())
}

/// Read the document from `--html`, a file, or stdin.
fn load(inline: Option<String>, source: Source) -> Result<String> {
    if let Some(html) = inline {
        return Ok(html);
    }
    match source.file {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => io::read_to_string(io::stdin()).context("failed to read stdin"),
    }
}

/// One line per fragment: span, kind, canonical rendering.
fn print_fragments(html: &str, fragments: &[Fragment]) {
    let width = html.len().to_string().len();
    for fragment in fragments {
        let trivia = fragment.trivia();
        let kind = format!("{:<7}", fragment.kind());
        let span = format!("{:>width$}..{:<width$}", trivia.start, trivia.end);
        println!("{} {} {:?}", span.dimmed(), kind.cyan(), fragment.to_string());
    }
}

/// Events indented by nesting depth.
fn print_events(events: &[DomEvent]) {
    let mut depth: usize = 0;
    for event in events {
        match event {
            DomEvent::Push(fragment) => {
                println!("{}{} {fragment}", "  ".repeat(depth), "push".green());
                depth += 1;
            }
            DomEvent::Child(fragment) => {
                println!("{}{} {:?}", "  ".repeat(depth), "child".blue(), fragment.to_string());
            }
            DomEvent::Pop(close) => {
                depth = depth.saturating_sub(1);
                let indent = "  ".repeat(depth);
                let closer = close.as_ref().map(ToString::to_string).unwrap_or_default();
                if event.is_implicit_pop() {
                    println!("{indent}{} {closer} {}", "pop".red(), "(implied)".dimmed());
                } else {
                    println!("{indent}{} {closer}", "pop".red());
                }
            }
        }
    }
}

/// Matches as a JSON array, or separated by blank lines.
fn print_list<T>(items: &[T], json: bool) -> Result<()>
where
    T: AsRef<str> + serde::Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", item.as_ref());
    }
    Ok(())
}
