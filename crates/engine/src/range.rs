//! The AL range shortcut: expands two entered numbers into an interpolated
//! run of numbers sharing a numeric pattern.
//!
//! Pattern families are tried in a fixed priority order and the first match
//! wins; two endpoints that fit no family fail with
//! [`EngineError::RangeExpansionFailed`] and leave the buffer untouched.
//! Expansion always enumerates low→high, so `(a,b)` and `(b,a)` yield the
//! same token set.

use crate::{EngineError, ResultEngine, token::Token};

/// Transient marker for an open AL session: the anchor is captured when the
/// agent invokes the shortcut, and the session is consumed on the next
/// delimiter press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlSession {
    anchor: Token,
}

impl AlSession {
    /// Opens a session. The shortcut needs exactly one entered number to
    /// anchor on; anything else is rejected with a user-visible message.
    pub fn begin(tokens: &[Token]) -> ResultEngine<AlSession> {
        match tokens {
            [anchor] => Ok(AlSession {
                anchor: anchor.clone(),
            }),
            other => Err(EngineError::InvalidRangeInput(other.len())),
        }
    }

    #[must_use]
    pub fn anchor(&self) -> &Token {
        &self.anchor
    }

    /// Expands the anchor with the second endpoint into the full token run.
    pub fn expand(&self, second: &Token) -> ResultEngine<Vec<Token>> {
        let fail = || {
            tracing::debug!(
                anchor = self.anchor.as_str(),
                second = second.as_str(),
                "no range pattern matched"
            );
            EngineError::RangeExpansionFailed(
                self.anchor.as_str().to_string(),
                second.as_str().to_string(),
            )
        };

        let expanded = if self.anchor.is_centena() && second.is_centena() {
            expand_three_digit(&self.anchor, second)
        } else if self.anchor.is_short() && second.is_short() {
            expand_two_digit(&self.anchor, second)
        } else {
            None
        };

        let tokens: Vec<Token> = expanded
            .ok_or_else(fail)?
            .iter()
            .filter_map(|raw| Token::parse(raw))
            .collect();
        if tokens.is_empty() {
            return Err(fail());
        }
        Ok(tokens)
    }
}

fn digits(token: &Token) -> Vec<u8> {
    token.as_str().bytes().map(|b| b - b'0').collect()
}

/// 3-digit/3-digit anchors: vary the one digit position the endpoints
/// disagree on, or the 2-digit remainder under a shared hundreds digit.
fn expand_three_digit(anchor: &Token, second: &Token) -> Option<Vec<String>> {
    let a = digits(anchor);
    let b = digits(second);

    if a[1] == b[1] && a[2] == b[2] {
        // Tens and units fixed, hundreds varies.
        let (lo, hi) = ordered(a[0], b[0]);
        return Some(
            (lo..=hi)
                .map(|h| format!("{h}{}{}", a[1], a[2]))
                .collect(),
        );
    }
    if a[0] == b[0] && a[2] == b[2] {
        // Hundreds and units fixed, tens varies.
        let (lo, hi) = ordered(a[1], b[1]);
        return Some(
            (lo..=hi)
                .map(|t| format!("{}{t}{}", a[0], a[2]))
                .collect(),
        );
    }
    if a[0] == b[0] {
        // Shared hundreds digit: vary the 2-digit remainder, but only for
        // close endpoints. Distant remainders fail outright here while the
        // 2-digit family below steps by 10 instead; the mismatch is
        // longstanding observed behavior and priced bets depend on it, so
        // it stays.
        let ra = u16::from(a[1]) * 10 + u16::from(a[2]);
        let rb = u16::from(b[1]) * 10 + u16::from(b[2]);
        let (lo, hi) = ordered(ra, rb);
        if hi - lo >= 10 {
            return None;
        }
        return Some((lo..=hi).map(|r| format!("{}{r:02}", a[0])).collect());
    }
    None
}

/// Both endpoints in 0..=99: doubled-digit runs, close-interval enumeration,
/// or step-by-10 for distant endpoints.
fn expand_two_digit(anchor: &Token, second: &Token) -> Option<Vec<String>> {
    if let Some(run) = doubled_digit_run(anchor, second) {
        return Some(run);
    }

    let (lo, hi) = ordered(anchor.value(), second.value());
    let pad = anchor.has_leading_zero() || second.has_leading_zero();
    let render = |n: u16| if pad { format!("{n:02}") } else { n.to_string() };

    if hi - lo <= 10 {
        return Some((lo..=hi).map(render).collect());
    }

    // Distant endpoints: decades from the lower bound, upper bound appended
    // if the stepping missed it.
    let mut run: Vec<String> = (lo..=hi).step_by(10).map(render).collect();
    if run.last() != Some(&render(hi)) {
        run.push(render(hi));
    }
    Some(run)
}

/// "33","66" → 33,44,55,66: both endpoints must be a doubled digit.
fn doubled_digit_run(anchor: &Token, second: &Token) -> Option<Vec<String>> {
    let doubled = |t: &Token| {
        let d = digits(t);
        (d.len() == 2 && d[0] == d[1]).then_some(d[0])
    };
    let da = doubled(anchor)?;
    let db = doubled(second)?;
    let (lo, hi) = ordered(da, db);
    Some((lo..=hi).map(|d| format!("{d}{d}")).collect())
}

fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}
