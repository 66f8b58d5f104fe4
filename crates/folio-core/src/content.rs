//! Card content: an ordered, fixed list of pages.
//!
//! Cards are TOML files:
//!
//! ```toml
//! title = "Happy Birthday"
//! recipient = "Sam"
//!
//! [[pages]]
//! heading = "Dear Sam"
//! body = "..."
//! ```

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub heading: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Page {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
            footer: None,
        }
    }

    /// Body text word-wrapped to `width` columns. Blank lines separate
    /// paragraphs and are kept.
    pub fn wrap_body(&self, width: usize) -> Vec<String> {
        wrap(&self.body, width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub pages: Vec<Page>,
}

impl Card {
    /// Loads and validates a card file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read card from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid card {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let card: Card = toml::from_str(contents).context("Failed to parse card")?;
        if card.pages.is_empty() {
            anyhow::bail!("A card needs at least one page");
        }
        Ok(card)
    }

    /// Number of pages; validated cards always have at least one.
    pub fn page_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.pages.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// The card shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            title: "Happy Birthday".to_string(),
            recipient: None,
            pages: vec![
                Page {
                    heading: "Happy Birthday!".to_string(),
                    body: "Another trip around the sun, and what a trip it has been.\n\n\
                           Turn the pages when you are ready."
                        .to_string(),
                    footer: Some("a little book, just for you".to_string()),
                },
                Page::new(
                    "A year of stories",
                    "Every page of the past year had something worth keeping: \
                     the quiet mornings, the loud dinners, the long walks that \
                     went nowhere in particular.",
                ),
                Page::new(
                    "Things we are grateful for",
                    "Your patience. Your terrible puns. The way you remember \
                     everyone's favourite snack.\n\nMostly, you.",
                ),
                Page::new(
                    "Wishes",
                    "May the coming year be generous with sunlight, good books \
                     and people who make you laugh until it hurts.",
                ),
                Page {
                    heading: "With love".to_string(),
                    body: "Happy birthday. Here is to the next chapter.".to_string(),
                    footer: Some("the end (for now)".to_string()),
                },
            ],
        }
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line_width > 0 && line_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_card_has_pages() {
        let card = Card::builtin();
        assert_eq!(card.page_count().get(), 5);
        assert!(card.page(0).is_some());
        assert!(card.page(5).is_none());
    }

    #[test]
    fn test_parse_card() {
        let card = Card::parse(
            r#"
title = "Thanks"
recipient = "Ada"

[[pages]]
heading = "One"
body = "First"

[[pages]]
heading = "Two"
footer = "bye"
"#,
        )
        .unwrap();
        assert_eq!(card.recipient.as_deref(), Some("Ada"));
        assert_eq!(card.pages.len(), 2);
        assert_eq!(card.pages[1].body, "");
        assert_eq!(card.pages[1].footer.as_deref(), Some("bye"));
    }

    #[test]
    fn test_empty_card_is_rejected() {
        let err = Card::parse("title = \"x\"\npages = []\n").unwrap_err();
        assert!(format!("{err:#}").contains("at least one page"));
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = Card::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read card"));
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        let page = Page::new("h", "one two three four\n\nfive");
        assert_eq!(
            page.wrap_body(9),
            vec!["one two", "three", "four", "", "five"]
        );
    }

    #[test]
    fn test_wrap_long_word_gets_own_line() {
        assert_eq!(wrap("a supercalifragilistic b", 5), vec![
            "a",
            "supercalifragilistic",
            "b"
        ]);
    }
}
