//! Draft and separated-play lifecycle for one betting session.
//!
//! A wager moves Draft → Separated → edited back to Draft, removed, or
//! submitted. The [`BetSession`] struct is the single owned state object:
//! the screen controller keeps it across input events and every engine
//! operation works through it, so nothing lives in ambient UI state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    money::Amount,
    play_type::PlayType,
    pricing::{AmountInputs, ValidPlay, compute_valid_plays, current_amount},
    range::AlSession,
    token::{DigitPress, Token, TokenBuffer},
};

/// The in-progress, uncommitted wager.
///
/// Exists only while the agent is actively entering numbers; cleared on
/// commit, cancel, or successful submission of the whole session.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    buffer: TokenBuffer,
    selected: Vec<PlayType>,
    amounts: AmountInputs,
    al: Option<AlSession>,
    editing: Option<Uuid>,
}

impl Draft {
    #[must_use]
    pub fn buffer(&self) -> &TokenBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.buffer.tokens()
    }

    #[must_use]
    pub fn selected_types(&self) -> &[PlayType] {
        &self.selected
    }

    #[must_use]
    pub fn amounts(&self) -> &AmountInputs {
        &self.amounts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn range_active(&self) -> bool {
        self.al.is_some()
    }

    /// `true` while the draft holds a play pulled back for editing.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn press_digit(&mut self, digit: char) -> DigitPress {
        self.buffer.append_digit(digit)
    }

    /// Handles a delimiter press.
    ///
    /// With an AL session open and a second number entered, the press
    /// confirms the range: the last token becomes the second endpoint and
    /// the whole buffer is replaced by the expansion. Otherwise the press
    /// just closes the open token (silently ignored when misplaced).
    pub fn press_delimiter(&mut self) -> ResultEngine<()> {
        let tokens = self.buffer.tokens();
        if let [.., second] = tokens.as_slice()
            && tokens.len() >= 2
            && let Some(session) = self.al.take()
        {
            // One attempt per session, success or not.
            let expanded = session.expand(second)?;
            self.buffer.replace_with_tokens(&expanded);
            tracing::debug!(
                anchor = session.anchor().as_str(),
                second = second.as_str(),
                count = expanded.len(),
                "range expanded"
            );
            return Ok(());
        }
        self.buffer.append_delimiter();
        Ok(())
    }

    pub fn press_backspace(&mut self) {
        self.buffer.backspace();
    }

    /// Clears the entered numbers, any open AL session, and the type
    /// selection. Amount fields are left as typed.
    pub fn clear_entry(&mut self) {
        self.buffer.clear();
        self.al = None;
        self.selected.clear();
    }

    /// Flips a type toggle. Eligibility gating belongs to the caller, which
    /// should only enable toggles reported by `available_types`.
    pub fn toggle_type(&mut self, play_type: PlayType) {
        if let Some(pos) = self.selected.iter().position(|t| *t == play_type) {
            self.selected.remove(pos);
        } else {
            self.selected.push(play_type);
            self.selected.sort();
        }
    }

    /// Replaces one type's amount field from its raw newline-delimited text.
    pub fn set_amount_text(&mut self, play_type: PlayType, text: &str) {
        self.amounts.set_from_text(play_type, text);
    }

    /// Invokes the AL range shortcut: captures the single entered number as
    /// anchor and closes it so the agent can type the second endpoint.
    pub fn begin_range(&mut self) -> ResultEngine<()> {
        let session = AlSession::begin(&self.buffer.tokens())?;
        self.al = Some(session);
        self.buffer.append_delimiter();
        Ok(())
    }

    /// For each selected type with at least one non-blank line, broadcasts
    /// that line to one line per token. Parlet keeps its single shared base.
    pub fn copy_amount_to_all_numbers(&mut self) {
        let count = self.buffer.tokens().len();
        for &play_type in &self.selected {
            if play_type == PlayType::Parlet {
                continue;
            }
            if let Some(amount) = self.amounts.first_positive(play_type) {
                self.amounts.set_lines(play_type, vec![amount; count]);
            }
        }
    }

    /// Current priced projection of the draft.
    #[must_use]
    pub fn valid_plays(&self) -> Vec<ValidPlay> {
        compute_valid_plays(&self.buffer.tokens(), &self.selected, &self.amounts)
    }

    /// Total cost of the draft as currently priced.
    #[must_use]
    pub fn current_amount(&self) -> Amount {
        current_amount(&self.valid_plays())
    }
}

/// A committed wager, snapshotted from the draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatedPlay {
    pub id: Uuid,
    /// The raw token string as it was typed, kept verbatim so editing
    /// restores exactly what the agent saw.
    pub numbers: String,
    pub selected: Vec<PlayType>,
    pub valid_plays: Vec<ValidPlay>,
    pub total: Amount,
    pub captured_at: DateTime<Utc>,
    /// Deep copy of the amount fields, needed to rebuild the draft on edit.
    pub amounts: AmountInputs,
}

/// One betting session: the draft plus the ordered committed plays.
#[derive(Clone, Debug, Default)]
pub struct BetSession {
    draft: Draft,
    separated: Vec<SeparatedPlay>,
}

impl BetSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Committed plays, in commission order.
    #[must_use]
    pub fn separated(&self) -> &[SeparatedPlay] {
        &self.separated
    }

    /// Commits the draft as a separated play and resets the draft.
    ///
    /// Repeated numbers within one wager are only allowed when Parlet is
    /// among the selected types; otherwise the commit is rejected and the
    /// draft is left intact. An empty draft is a silent no-op (`Ok(None)`).
    pub fn separate(&mut self) -> ResultEngine<Option<Uuid>> {
        let tokens = self.draft.tokens();
        if tokens.is_empty() {
            return Ok(None);
        }
        if !self.draft.selected.contains(&PlayType::Parlet)
            && let Some(duplicate) = first_duplicate(&tokens)
        {
            return Err(EngineError::DuplicateNumberNotAllowed(duplicate.display()));
        }

        let valid_plays = self.draft.valid_plays();
        let total = current_amount(&valid_plays);
        let id = self.draft.editing.take().unwrap_or_else(Uuid::new_v4);
        let play = SeparatedPlay {
            id,
            numbers: self.draft.buffer.raw().to_string(),
            selected: self.draft.selected.clone(),
            valid_plays,
            total,
            captured_at: Utc::now(),
            amounts: self.draft.amounts.clone(),
        };
        tracing::debug!(%id, total = %total, "play separated");
        self.separated.push(play);
        self.draft = Draft::default();
        Ok(Some(id))
    }

    /// Pulls a committed play back into the draft for editing.
    ///
    /// The play leaves the committed list; a later `separate` reuses its
    /// original identifier instead of minting a new one. Returns `false`
    /// for an unknown id.
    pub fn edit(&mut self, id: Uuid) -> bool {
        let Some(pos) = self.separated.iter().position(|p| p.id == id) else {
            return false;
        };
        let play = self.separated.remove(pos);
        self.draft = Draft {
            buffer: TokenBuffer::from_raw(play.numbers),
            selected: play.selected,
            amounts: play.amounts,
            al: None,
            editing: Some(play.id),
        };
        true
    }

    /// Deletes a committed play unconditionally. Returns `false` for an
    /// unknown id. Asking the agent to confirm first is the caller's job.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.separated.len();
        self.separated.retain(|p| p.id != id);
        self.separated.len() < before
    }

    /// Session total: every committed play plus the draft as priced now.
    #[must_use]
    pub fn total_amount(&self) -> Amount {
        self.separated.iter().map(|p| p.total).sum::<Amount>() + self.draft.current_amount()
    }

    /// `true` only when there is something to submit and every valid play,
    /// committed or drafted, has a strictly positive cost.
    #[must_use]
    pub fn has_valid_amounts(&self) -> bool {
        let draft_plays = self.draft.valid_plays();
        if draft_plays.is_empty() && self.separated.is_empty() {
            return false;
        }
        draft_plays.iter().all(|p| p.total.is_positive())
            && self
                .separated
                .iter()
                .flat_map(|p| &p.valid_plays)
                .all(|p| p.total.is_positive())
    }

    /// Clears the whole session after a confirmed successful submission.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.separated.clear();
    }
}

/// First number appearing more than once, compared in display form so `5`
/// and `05` count as the same number.
fn first_duplicate(tokens: &[Token]) -> Option<&Token> {
    tokens.iter().find(|token| {
        tokens
            .iter()
            .filter(|other| other.display() == token.display())
            .count()
            > 1
    })
}
