//! Markdown inspection helpers.
//!
//! Only the pieces of markdown the build cares about are parsed here: the
//! first H1 heading (title fallback) and nothing else. Rendering is out of
//! scope for the engine.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Extract the text of the first H1 heading.
///
/// Inline formatting is flattened to plain text; inline code spans keep their
/// content. Returns `None` when the document has no H1.
#[must_use]
pub fn extract_first_heading(markdown: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    return None;
                }
                return Some(trimmed.to_owned());
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(&text),
            _ => {}
        }
    }

    None
}

/// Derive a display title from a file stem.
///
/// Dashes and underscores become spaces and each word is capitalized:
/// `"getting-started"` -> `"Getting Started"`.
#[must_use]
pub fn title_from_stem(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
