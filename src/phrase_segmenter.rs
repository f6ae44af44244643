use serde::{Deserialize, Serialize};

/// Literal join token between foods in a compound phrase.
pub const ITEM_SEPARATOR: &str = " and ";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParsedItem {
    pub quantity: i64,
    pub raw_token: String,
}

impl ParsedItem {
    pub fn new(quantity: i64, raw_token: impl Into<String>) -> Self {
        Self {
            quantity,
            raw_token: raw_token.into(),
        }
    }
}

/// Splits free text such as `"2 Chapati and Dal"` into `(quantity, food)` items.
///
/// Only the exact separator `" and "` is recognised. A leading run of ASCII
/// digits is read as the quantity; everything else defaults to one serving.
/// Blank clauses are skipped, and so are clauses whose quantity is zero: every
/// emitted item has a quantity of at least one. A clause made of a number alone
/// yields an empty food token, which the resolver will never match.
pub fn segment(text: &str) -> Vec<ParsedItem> {
    text.split(ITEM_SEPARATOR)
        .filter_map(parse_clause)
        .collect()
}

fn parse_clause(clause: &str) -> Option<ParsedItem> {
    let trimmed = clause.trim();
    let mut words = trimmed.split_whitespace();
    let first = words.next()?;

    if first.chars().all(|c| c.is_ascii_digit()) {
        // A digit run too large for i64 is left in the token rather than guessed at.
        if let Ok(quantity) = first.parse::<i64>() {
            let food = words.collect::<Vec<_>>().join(" ");
            if quantity == 0 {
                tracing::warn!(clause = trimmed, "zero quantity; clause skipped");
                return None;
            }
            return Some(ParsedItem::new(quantity, food));
        }
    }
    Some(ParsedItem::new(1, trimmed))
}
