//! Markdown to prose.
//!
//! Readability statistics only make sense over running text, so markdown
//! inputs are reduced to their paragraphs before scoring. Parsing goes
//! through pulldown-cmark rather than regexes so fenced code, HTML blocks
//! and tables are recognised reliably.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Reduce markdown to the prose a reader would read aloud.
///
/// Dropped: YAML front matter, headings, code (fenced, indented, inline),
/// HTML, tables, image alt text. Kept: paragraph, list item, blockquote and
/// link text. Block ends become newlines so sentence splitting still sees
/// the boundaries between paragraphs.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn to_prose(text: &str) -> String {
    let body = without_front_matter(text);
    let parser = Parser::new_ext(body, Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES);

    let mut prose = String::with_capacity(body.len());
    let mut hidden = 0usize;

    for event in parser {
        match event {
            Event::Start(
                Tag::CodeBlock(_)
                | Tag::Heading { .. }
                | Tag::Table(_)
                | Tag::Image { .. }
                | Tag::HtmlBlock,
            ) => hidden += 1,
            Event::End(
                TagEnd::CodeBlock
                | TagEnd::Heading(_)
                | TagEnd::Table
                | TagEnd::Image
                | TagEnd::HtmlBlock,
            ) => hidden = hidden.saturating_sub(1),
            Event::Text(t) if hidden == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if hidden == 0 => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if hidden == 0 => {
                if !prose.ends_with('\n') {
                    prose.push('\n');
                }
            }
            _ => {}
        }
    }

    prose.trim_end().to_string()
}

/// Slice off a leading `---` ... `---` block.
fn without_front_matter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(rest) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close) = rest.find("\n---") else {
        return text;
    };
    let after = &rest[close + 4..];
    after.strip_prefix('\n').unwrap_or(after)
}
