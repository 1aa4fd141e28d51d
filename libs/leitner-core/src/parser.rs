//! Markdown parser for deck files.
//!
//! # Format
//! ```markdown
//! Q: What is Rust?
//! A: A systems programming language.
//! H: Think of memory safety without a GC.
//! T: rust, basics
//!
//! Q: Explain borrowing
//! A: Borrowing allows references without ownership.
//! Multiple lines are supported.
//! ```
//!
//! `Q:` starts a card. `H:` (hint) and `T:` (comma-separated tags) are optional.

use crate::error::ParseError;
use crate::types::Card;
use std::collections::{BTreeSet, HashSet};

type Result<T> = std::result::Result<T, ParseError>;

/// Parse markdown content into cards, in file order.
pub fn parse(content: &str) -> Result<Vec<Card>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::default();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Front,
    Back,
    Hint,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Self::Front => "Q:",
            Self::Back => "A:",
            Self::Hint => "H:",
        }
    }
}

struct CardBuilder {
    front: Option<String>,
    back: Option<String>,
    hint: Option<String>,
    tags: Option<BTreeSet<String>>,
    start_line: usize,
}

impl CardBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            front: None,
            back: None,
            hint: None,
            tags: None,
            start_line,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Front => &mut self.front,
            Field::Back => &mut self.back,
            Field::Hint => &mut self.hint,
        }
    }

    fn build(self) -> Result<Card> {
        let front = self.front.ok_or(ParseError::MissingFront {
            line: self.start_line,
        })?;
        let back = self.back.ok_or(ParseError::MissingBack {
            line: self.start_line,
        })?;

        Ok(Card {
            front: front.trim().to_string(),
            back: back.trim().to_string(),
            hint: self.hint.map(|h| h.trim().to_string()).unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        })
    }
}

#[derive(Default)]
struct Parser {
    current: Option<CardBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
    cards: Vec<Card>,
    seen_fronts: HashSet<String>,
}

impl Parser {
    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Field(Field::Front, text) => {
                self.finish_card()?;
                self.current = Some(CardBuilder::new(line_num));
                self.start_field(Field::Front, text, line_num)?;
            }
            LineType::Field(field, text) => self.start_field(field, text, line_num)?,
            LineType::Tags(text) => self.handle_tags(text, line_num)?,
            LineType::Text(text) => self.buffer.push(text.to_string()),
            LineType::Empty => self.buffer.push(String::new()),
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Field(Field::Front, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Field(Field::Back, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("H:") {
            LineType::Field(Field::Hint, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("T:") {
            LineType::Tags(rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(line)
        }
    }

    fn start_field(&mut self, field: Field, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();

        // A field outside any card opens one, so a stray A: reports a missing front.
        let card = self.current.get_or_insert_with(|| CardBuilder::new(line_num));
        if card.slot(field).is_some() {
            return Err(ParseError::RepeatedField {
                field: field.label(),
                line: line_num,
            });
        }

        self.current_field = Some(field);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_tags(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;

        let card = self.current.get_or_insert_with(|| CardBuilder::new(line_num));
        if card.tags.is_some() {
            return Err(ParseError::RepeatedField {
                field: "T:",
                line: line_num,
            });
        }
        card.tags = Some(
            text.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        );
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let (Some(card), Some(field)) = (self.current.as_mut(), self.current_field) {
            *card.slot(field) = Some(content);
        }
    }

    fn finish_card(&mut self) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;

        if let Some(builder) = self.current.take() {
            let line = builder.start_line;
            let card = builder.build()?;
            if !self.seen_fronts.insert(card.front.clone()) {
                return Err(ParseError::DuplicateCard {
                    front: card.front,
                    line,
                });
            }
            self.cards.push(card);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Card>> {
        self.finish_card()?;
        Ok(self.cards)
    }
}

enum LineType<'a> {
    Field(Field, &'a str),
    Tags(&'a str),
    Text(&'a str),
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_single_card() {
        let input = "Q: What is Rust?\nA: A systems programming language.";
        let cards = parse(input).unwrap();
        assert_eq!(cards, vec![Card::new("What is Rust?", "A systems programming language.")]);
    }

    #[test]
    fn parse_hint_and_tags() {
        let input = "Q: 2 + 2\nA: 4\nH: count on fingers\nT: math, , basics ";
        let cards = parse(input).unwrap();
        assert_eq!(
            cards,
            vec![Card::new("2 + 2", "4")
                .with_hint("count on fingers")
                .with_tag("math")
                .with_tag("basics")]
        );
    }

    #[test]
    fn parse_multiline_answer() {
        let input = "Q: Explain\nA: Line 1\nLine 2\n\nLine 4";
        let cards = parse(input).unwrap();
        assert_eq!(cards[0].back, "Line 1\nLine 2\n\nLine 4");
    }

    #[test]
    fn parse_multiple_cards() {
        let input = "Q: Q1\nA: A1\n\nQ: Q2\nA: A2\nH: second";
        let cards = parse(input).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0], Card::new("Q1", "A1"));
        assert_eq!(cards[1], Card::new("Q2", "A2").with_hint("second"));
    }

    #[test]
    fn reject_duplicate_fronts() {
        let input = "Q: Q1\nA: A1\n\nQ: Q1\nA: A2";
        let result = parse(input);
        assert_eq!(
            result,
            Err(ParseError::DuplicateCard {
                front: "Q1".into(),
                line: 4,
            })
        );
    }

    #[test]
    fn reject_missing_front() {
        let result = parse("A: Answer only");
        assert!(matches!(result, Err(ParseError::MissingFront { line: 1 })));
    }

    #[test]
    fn reject_missing_back() {
        let result = parse("Q: Question only");
        assert!(matches!(result, Err(ParseError::MissingBack { line: 1 })));
    }

    #[test]
    fn reject_repeated_field() {
        let result = parse("Q: Q\nA: one\nA: two");
        assert_eq!(
            result,
            Err(ParseError::RepeatedField {
                field: "A:",
                line: 3,
            })
        );
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n\n").unwrap().is_empty());
    }
}
