//! Converts post bodies from Markdown to HTML.
//!
//! On top of CommonMark (which already covers fenced code blocks) the
//! renderer enables tables, treats every newline inside a paragraph as a line
//! break, gives every heading an `id` anchor, and expands a `[TOC]` paragraph
//! into a table of contents linking to those anchors.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;
use std::fmt::Write;

/// The paragraph text that is replaced by the table of contents.
const TOC_MARKER: &str = "[TOC]";

/// Converts `markdown` to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let mut events: Vec<Event> = Parser::new_ext(markdown, options)
        .map(convert)
        .collect();
    let headings = anchor_headings(&mut events);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, expand_toc(events, &headings).into_iter());
    out
}

fn convert(ev: Event) -> Event {
    match ev {
        // nl2br: a line break in the source is a line break on the page.
        Event::SoftBreak => Event::HardBreak,
        _ => ev,
    }
}

/// A heading as it appears in the table of contents.
#[derive(Debug, PartialEq)]
struct Heading {
    level: usize,
    anchor: String,
    text: String,
}

/// Assigns an `id` to every heading that doesn't already have one and returns
/// the headings in document order. Anchors are slugified heading text made
/// unique with `_1`, `_2`, ... suffixes.
fn anchor_headings(events: &mut [Event]) -> Vec<Heading> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headings = Vec::new();

    for i in 0..events.len() {
        let level = match &events[i] {
            Event::Start(Tag::Heading { level, .. }) => heading_level(*level),
            _ => continue,
        };
        let text = heading_text(&events[i + 1..]);

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            let anchor = match id.as_deref() {
                Some(existing) => existing.to_owned(),
                None => unique_anchor(&text, &seen),
            };
            if id.is_none() {
                *id = Some(CowStr::from(anchor.clone()));
            }
            seen.insert(anchor.clone());
            headings.push(Heading {
                level,
                anchor,
                text,
            });
        }
    }

    headings
}

fn heading_level(level: HeadingLevel) -> usize {
    level as usize
}

/// Collects the plain text of a heading from the events that follow its
/// start tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for ev in events {
        match ev {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

fn unique_anchor(text: &str, seen: &HashSet<String>) -> String {
    let mut base = slug::slugify(text);
    if base.is_empty() {
        base = String::from("section");
    }
    if !seen.contains(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !seen.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Replaces every paragraph whose whole text is [`TOC_MARKER`] with the
/// rendered table of contents.
fn expand_toc<'a>(events: Vec<Event<'a>>, headings: &[Heading]) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Paragraph) = events[i] {
            if let Some(end) = toc_paragraph_end(&events[i + 1..]) {
                out.push(Event::Html(CowStr::from(toc_html(headings))));
                i += end + 2;
                continue;
            }
        }
        out.push(events[i].clone());
        i += 1;
    }
    out
}

/// If the paragraph starting right before `events` contains only the TOC
/// marker, returns the index of its end tag within `events`.
fn toc_paragraph_end(events: &[Event]) -> Option<usize> {
    let mut text = String::new();
    for (i, ev) in events.iter().enumerate() {
        match ev {
            Event::End(TagEnd::Paragraph) => {
                return if text.trim() == TOC_MARKER { Some(i) } else { None };
            }
            Event::Text(t) => text.push_str(t),
            _ => return None,
        }
    }
    None
}

/// Renders nested `<ul>` lists that mirror the heading levels.
fn toc_html(headings: &[Heading]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    let mut open: Vec<usize> = Vec::new();

    for heading in headings {
        while matches!(open.last(), Some(&level) if level > heading.level) {
            out.push_str("</li>\n</ul>\n");
            open.pop();
        }
        match open.last() {
            Some(&level) if level == heading.level => out.push_str("</li>\n"),
            _ => {
                out.push_str("<ul>\n");
                open.push(heading.level);
            }
        }
        // Writing into a String can't fail.
        let _ = write!(
            out,
            "<li><a href=\"#{}\">{}</a>",
            heading.anchor,
            htmlescape::encode_minimal(&heading.text)
        );
    }
    for _ in open {
        out.push_str("</li>\n</ul>\n");
    }

    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_gets_anchor() {
        assert_eq!("<h1 id=\"hi\">Hi</h1>\n", to_html("# Hi"));
    }

    #[test]
    fn test_duplicate_headings_get_unique_anchors() {
        let html = to_html("## Setup\n\n## Setup\n\n## Setup");
        assert!(html.contains("<h2 id=\"setup\">"));
        assert!(html.contains("<h2 id=\"setup_1\">"));
        assert!(html.contains("<h2 id=\"setup_2\">"));
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        assert_eq!("<p>one<br />\ntwo</p>\n", to_html("one\ntwo"));
    }

    #[test]
    fn test_fenced_code() {
        let html = to_html("```rust\nfn main() {}\n```");
        assert_eq!(
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n",
            html
        );
    }

    #[test]
    fn test_tables() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_toc_marker() {
        let html = to_html("[TOC]\n\n# Intro\n\n## Details\n\n# Outro");
        assert!(!html.contains("[TOC]"));
        assert!(html.starts_with("<div class=\"toc\">"));
        assert!(html.contains("<a href=\"#intro\">Intro</a>"));
        assert!(html.contains("<a href=\"#details\">Details</a>"));
        assert!(html.contains("<a href=\"#outro\">Outro</a>"));
    }

    #[test]
    fn test_toc_marker_inside_text_is_kept() {
        let html = to_html("See [TOC] below\n\n# Intro");
        assert!(html.contains("[TOC]"));
        assert!(!html.contains("class=\"toc\""));
    }

    #[test]
    fn test_toc_nesting() {
        let headings = vec![
            Heading {
                level: 1,
                anchor: "a".to_owned(),
                text: "A".to_owned(),
            },
            Heading {
                level: 2,
                anchor: "b".to_owned(),
                text: "B & C".to_owned(),
            },
            Heading {
                level: 1,
                anchor: "d".to_owned(),
                text: "D".to_owned(),
            },
        ];
        assert_eq!(
            "<div class=\"toc\">\n<ul>\n<li><a href=\"#a\">A</a><ul>\n\
             <li><a href=\"#b\">B &amp; C</a></li>\n</ul>\n</li>\n\
             <li><a href=\"#d\">D</a></li>\n</ul>\n</div>\n",
            toc_html(&headings)
        );
    }
}
