//! `folio pages`: the card as plain text.

use std::fmt::Write as _;

use anyhow::Result;
use folio_core::content::Card;

const TEXT_WIDTH: usize = 72;

pub fn run(card: &Card) -> Result<()> {
    print!("{}", format_pages(card, TEXT_WIDTH));
    Ok(())
}

fn format_pages(card: &Card, width: usize) -> String {
    let mut out = String::new();
    let total = card.pages.len();

    let _ = match &card.recipient {
        Some(recipient) => writeln!(out, "{} (for {recipient})", card.title),
        None => writeln!(out, "{}", card.title),
    };

    for (i, page) in card.pages.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{} / {total}] {}", i + 1, page.heading);
        for line in page.wrap_body(width) {
            if line.is_empty() {
                let _ = writeln!(out);
            } else {
                let _ = writeln!(out, "  {line}");
            }
        }
        if let Some(footer) = &page.footer {
            let _ = writeln!(out, "  ~ {footer}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use folio_core::content::Page;

    use super::*;

    #[test]
    fn test_format_numbers_every_page() {
        let card = Card {
            title: "Thanks".to_string(),
            recipient: Some("Ana".to_string()),
            pages: vec![
                Page::new("One", "first body"),
                Page {
                    footer: Some("bye".to_string()),
                    ..Page::new("Two", "second body")
                },
            ],
        };

        let text = format_pages(&card, 40);
        assert!(text.starts_with("Thanks (for Ana)\n"));
        assert!(text.contains("[1 / 2] One\n  first body\n"));
        assert!(text.contains("[2 / 2] Two\n  second body\n  ~ bye\n"));
    }

    #[test]
    fn test_format_wraps_body() {
        let card = Card {
            title: "T".to_string(),
            recipient: None,
            pages: vec![Page::new("H", "aaa bbb ccc")],
        };
        let text = format_pages(&card, 7);
        assert!(text.contains("  aaa bbb\n  ccc\n"));
    }
}
