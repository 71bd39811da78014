//! Normalizes staged plays into the wire shape the betting backend expects.
//!
//! The assembler only shapes the payload; the network call, retries, and
//! the post-success session reset belong to the caller.

use chrono::{DateTime, Utc};

use api_types::submission::{BetPlay, Move, MoveDetail, SubmissionRequest};

use crate::{
    EngineError, ResultEngine,
    money::Amount,
    play_type::{PlayType, PlayTypeCatalog},
    pricing::{AmountInputs, Combination, ValidPlay},
    staging::BetSession,
    token::{Token, TokenBuffer},
};

/// Builds the submission payload for the whole session: every separated
/// play, plus the current draft when it is non-empty and priced above zero.
///
/// Fails with [`EngineError::NoThrowSelected`] when no draw is chosen and
/// with [`EngineError::NoPlaysToSubmit`] when nothing priced remains after
/// assembly.
pub fn build_request(
    session: &BetSession,
    user_id: &str,
    throw_id: Option<&str>,
    catalog: &PlayTypeCatalog,
    now: DateTime<Utc>,
) -> ResultEngine<SubmissionRequest> {
    let throw_id = throw_id.ok_or(EngineError::NoThrowSelected)?;

    let mut bet_plays = Vec::new();
    for play in session.separated() {
        let tokens = TokenBuffer::from_raw(play.numbers.as_str()).tokens();
        if let Some(bet_play) = assemble(&tokens, &play.valid_plays, &play.amounts, catalog)? {
            bet_plays.push(bet_play);
        }
    }

    let draft = session.draft();
    if !draft.is_empty() && draft.current_amount().is_positive() {
        let plays = draft.valid_plays();
        if let Some(bet_play) = assemble(&draft.tokens(), &plays, draft.amounts(), catalog)? {
            bet_plays.push(bet_play);
        }
    }

    if bet_plays.is_empty() {
        return Err(EngineError::NoPlaysToSubmit);
    }

    tracing::debug!(plays = bet_plays.len(), throw_id, "submission assembled");
    Ok(SubmissionRequest {
        user_id: user_id.to_string(),
        throw_id: throw_id.to_string(),
        date: now,
        bet_plays,
    })
}

fn assemble(
    tokens: &[Token],
    valid_plays: &[ValidPlay],
    amounts: &AmountInputs,
    catalog: &PlayTypeCatalog,
) -> ResultEngine<Option<BetPlay>> {
    let mut moves = Vec::new();
    for play in valid_plays {
        let play_type_id = catalog.resolve_id(play.play_type)?.to_string();
        moves.push(Move {
            play_type_id,
            move_details: move_details(play, tokens, amounts),
        });
    }
    if moves.is_empty() {
        return Ok(None);
    }
    Ok(Some(BetPlay { moves }))
}

fn move_details(play: &ValidPlay, tokens: &[Token], amounts: &AmountInputs) -> Vec<MoveDetail> {
    if play.play_type == PlayType::Parlet {
        let base = amounts
            .first_positive(PlayType::Parlet)
            .unwrap_or(Amount::ZERO);
        return play
            .combinations
            .iter()
            .map(|combination| {
                let (number, second_number) = match combination {
                    Combination::Pair(first, second) => {
                        (first.display(), Some(second.display()))
                    }
                    Combination::Single(token) => (token.display(), None),
                };
                MoveDetail {
                    number,
                    second_number,
                    amount: base.as_major_f64(),
                }
            })
            .collect();
    }

    // Amount lines align to the full token list, so each combination is
    // priced by the position of its source token, not by its own position
    // among the eligible tokens.
    let source_indices: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| play.play_type.accepts(t))
        .map(|(index, _)| index)
        .collect();

    let lines = amounts.lines(play.play_type);
    play.combinations
        .iter()
        .enumerate()
        .map(|(nth, combination)| {
            // A single line prices every number; otherwise lines match by
            // token position and a missing line prices its number at zero.
            let amount = if lines.len() == 1 {
                lines[0]
            } else {
                source_indices
                    .get(nth)
                    .and_then(|&index| lines.get(index))
                    .copied()
                    .unwrap_or(Amount::ZERO)
            };
            MoveDetail {
                number: combination.to_string(),
                second_number: None,
                amount: amount.as_major_f64(),
            }
        })
        .collect()
}
