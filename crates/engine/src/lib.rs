//! Bet-construction engine for a numbers-lottery betting client.
//!
//! Turns a sequence of keypad keystrokes into fully-priced, type-classified
//! wagers ready for submission. The crate owns no I/O and no persistence:
//! the screen controller keeps one [`BetSession`] alive across input events
//! and every operation here is a synchronous transformation of it. Auth,
//! transport, navigation, and rendering are the caller's collaborators.
//!
//! Flow per keystroke: token buffer → play-type classifier → (optionally)
//! the AL range expander → pricing engine → staging manager → submission
//! assembler.

pub use error::EngineError;
pub use money::Amount;
pub use play_type::{ALL_PLAY_TYPES, PlayType, PlayTypeCatalog, available_types};
pub use pricing::{AmountInputs, Combination, ValidPlay, compute_valid_plays, current_amount};
pub use range::AlSession;
pub use staging::{BetSession, Draft, SeparatedPlay};
pub use submit::build_request;
pub use token::{DigitPress, MAX_TOKENS, TOKEN_DIGITS, Token, TokenBuffer};

mod error;
mod money;
mod play_type;
mod pricing;
mod range;
mod staging;
mod submit;
mod token;

type ResultEngine<T> = Result<T, EngineError>;
