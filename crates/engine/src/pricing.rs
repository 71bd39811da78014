//! The pricing engine: turns tokens + selected types + amount lines into
//! priced valid plays.
//!
//! Everything here is a pure projection of the draft state. Nothing is
//! cached; callers recompute on every state change that affects rendering,
//! so a stale projection can never survive an edit.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    money::Amount,
    play_type::PlayType,
    token::Token,
};

/// One priced number, or a number pair for Parlet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combination {
    Single(Token),
    Pair(Token, Token),
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(token) => f.write_str(&token.display()),
            Self::Pair(first, second) => {
                write!(f, "{}X{}", first.display(), second.display())
            }
        }
    }
}

/// Per-type amount lines, positionally aligned to tokens.
///
/// Lines are typed [`Amount`]s; a blank or malformed keypad line becomes
/// [`Amount::ZERO`] at the UI edge and zero stands for "blank" from there
/// on. Parlet only ever reads its first line (the shared per-combination
/// base).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmountInputs {
    lines: BTreeMap<PlayType, Vec<Amount>>,
}

impl AmountInputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the lines for one type from the raw newline-delimited text
    /// of its amount field.
    pub fn set_from_text(&mut self, play_type: PlayType, text: &str) {
        let parsed = text.lines().map(Amount::parse_lenient).collect();
        self.lines.insert(play_type, parsed);
    }

    pub fn set_lines(&mut self, play_type: PlayType, amounts: Vec<Amount>) {
        self.lines.insert(play_type, amounts);
    }

    #[must_use]
    pub fn lines(&self, play_type: PlayType) -> &[Amount] {
        self.lines.get(&play_type).map_or(&[], Vec::as_slice)
    }

    /// First non-blank line for a type, if any.
    #[must_use]
    pub fn first_positive(&self, play_type: PlayType) -> Option<Amount> {
        self.lines(play_type).iter().copied().find(|a| a.is_positive())
    }

    /// Sum of all non-blank lines for a type.
    #[must_use]
    pub fn line_total(&self, play_type: PlayType) -> Amount {
        self.lines(play_type).iter().copied().sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// A computed, priced projection for one selected type.
///
/// Only ever built with a strictly positive total; zero-cost selections are
/// silently dropped by [`compute_valid_plays`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidPlay {
    pub play_type: PlayType,
    pub combinations: Vec<Combination>,
    pub total: Amount,
    /// Human-readable cost breakdown for the review list.
    pub breakdown: String,
}

/// Computes the priced valid plays for the current draft. Pure; call on
/// every state change instead of caching the result.
#[must_use]
pub fn compute_valid_plays(
    tokens: &[Token],
    selected: &[PlayType],
    inputs: &AmountInputs,
) -> Vec<ValidPlay> {
    selected
        .iter()
        .filter_map(|&play_type| match play_type {
            PlayType::Parlet => parlet_play(tokens, inputs),
            other => straight_play(tokens, other, inputs),
        })
        .collect()
}

/// Fijo/Corrido/Centena: one combination per eligible token, total is the
/// sum of all non-blank amount lines.
fn straight_play(
    tokens: &[Token],
    play_type: PlayType,
    inputs: &AmountInputs,
) -> Option<ValidPlay> {
    let combinations: Vec<Combination> = tokens
        .iter()
        .filter(|&t| play_type.accepts(t))
        .cloned()
        .map(Combination::Single)
        .collect();
    let total = inputs.line_total(play_type);
    if combinations.is_empty() || !total.is_positive() {
        return None;
    }

    let breakdown = inputs
        .lines(play_type)
        .iter()
        .filter(|a| a.is_positive())
        .map(Amount::to_string)
        .collect::<Vec<_>>()
        .join(" + ");
    Some(ValidPlay {
        play_type,
        combinations,
        total,
        breakdown: format!("{breakdown} = {total}"),
    })
}

/// Parlet: every unordered pair over the eligible tokens, priced at the
/// shared base amount per pair.
fn parlet_play(tokens: &[Token], inputs: &AmountInputs) -> Option<ValidPlay> {
    let eligible: Vec<&Token> = tokens.iter().filter(|t| t.is_short()).collect();
    let mut combinations = Vec::new();
    for i in 0..eligible.len() {
        for j in (i + 1)..eligible.len() {
            combinations.push(Combination::Pair(eligible[i].clone(), eligible[j].clone()));
        }
    }

    let base = inputs.first_positive(PlayType::Parlet)?;
    if combinations.is_empty() {
        return None;
    }
    let count = combinations.len();
    let total = base.times(count);
    Some(ValidPlay {
        play_type: PlayType::Parlet,
        combinations,
        total,
        breakdown: format!("{count} x {base} = {total}"),
    })
}

/// Total cost of the draft: the sum over its computed valid plays.
#[must_use]
pub fn current_amount(plays: &[ValidPlay]) -> Amount {
    plays.iter().map(|p| p.total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<Token> {
        raw.iter().map(|r| Token::parse(r).unwrap()).collect()
    }

    #[test]
    fn fijo_and_centena_price_independently() {
        let tokens = tokens(&["5", "12", "123"]);
        let mut inputs = AmountInputs::new();
        inputs.set_from_text(PlayType::Fijo, "10\n20");
        inputs.set_from_text(PlayType::Centena, "5");

        let plays = compute_valid_plays(
            &tokens,
            &[PlayType::Fijo, PlayType::Centena],
            &inputs,
        );
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[0].play_type, PlayType::Fijo);
        assert_eq!(plays[0].total, Amount::new(30_00));
        assert_eq!(plays[0].combinations.len(), 2);
        assert_eq!(plays[1].play_type, PlayType::Centena);
        assert_eq!(plays[1].total, Amount::new(5_00));
        assert_eq!(current_amount(&plays), Amount::new(35_00));
    }

    #[test]
    fn zero_total_type_is_dropped() {
        let tokens = tokens(&["5"]);
        let mut inputs = AmountInputs::new();
        inputs.set_from_text(PlayType::Fijo, "\n");
        let plays = compute_valid_plays(&tokens, &[PlayType::Fijo], &inputs);
        assert!(plays.is_empty());
    }

    #[test]
    fn blank_and_garbled_lines_count_as_zero() {
        let tokens = tokens(&["5", "7"]);
        let mut inputs = AmountInputs::new();
        inputs.set_from_text(PlayType::Fijo, "10\nxyz\n20");
        let plays = compute_valid_plays(&tokens, &[PlayType::Fijo], &inputs);
        assert_eq!(plays[0].total, Amount::new(30_00));
    }

    #[test]
    fn parlet_prices_every_pair() {
        let tokens = tokens(&["07", "15", "22"]);
        let mut inputs = AmountInputs::new();
        inputs.set_from_text(PlayType::Parlet, "10");
        let plays = compute_valid_plays(&tokens, &[PlayType::Parlet], &inputs);
        assert_eq!(plays.len(), 1);
        let parlet = &plays[0];
        // 3 tokens -> 3 * 2 / 2 pairs.
        assert_eq!(parlet.combinations.len(), 3);
        assert_eq!(parlet.total, Amount::new(30_00));
        assert_eq!(parlet.combinations[0].to_string(), "07X15");
        assert_eq!(parlet.combinations[1].to_string(), "07X22");
        assert_eq!(parlet.combinations[2].to_string(), "15X22");
    }

    #[test]
    fn parlet_single_pair_scenario() {
        let tokens = tokens(&["07", "15"]);
        let mut inputs = AmountInputs::new();
        inputs.set_from_text(PlayType::Parlet, "10");
        let plays = compute_valid_plays(&tokens, &[PlayType::Parlet], &inputs);
        assert_eq!(plays[0].combinations.len(), 1);
        assert_eq!(plays[0].combinations[0].to_string(), "07X15");
        assert_eq!(plays[0].total, Amount::new(10_00));
    }

    #[test]
    fn parlet_ignores_centena_tokens() {
        let tokens = tokens(&["07", "15", "123"]);
        let mut inputs = AmountInputs::new();
        inputs.set_from_text(PlayType::Parlet, "10");
        let plays = compute_valid_plays(&tokens, &[PlayType::Parlet], &inputs);
        assert_eq!(plays[0].combinations.len(), 1);
    }

    #[test]
    fn single_digit_combination_displays_padded() {
        let token = Token::parse("5").unwrap();
        assert_eq!(Combination::Single(token).to_string(), "05");
    }
}
