//! Play types and the structural eligibility classifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use api_types::catalog::PlayTypeInfo;

use crate::{EngineError, ResultEngine, token::Token};

/// The four wager types of the supported game.
///
/// Eligibility is structural, never configured: it depends only on the
/// lengths of the tokens currently in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayType {
    Fijo,
    Corrido,
    Centena,
    Parlet,
}

/// All play types, in display order.
pub const ALL_PLAY_TYPES: [PlayType; 4] = [
    PlayType::Fijo,
    PlayType::Corrido,
    PlayType::Centena,
    PlayType::Parlet,
];

impl PlayType {
    /// Canonical display name, matching the backend catalog.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fijo => "Fijo",
            Self::Corrido => "Corrido",
            Self::Centena => "Centena",
            Self::Parlet => "Parlet",
        }
    }

    /// `true` when one token can carry this type (Parlet's pairing
    /// requirement aside).
    #[must_use]
    pub fn accepts(self, token: &Token) -> bool {
        match self {
            Self::Centena => token.is_centena(),
            _ => token.is_short(),
        }
    }

    /// `true` when the current tokens make this type selectable.
    #[must_use]
    pub fn is_eligible(self, tokens: &[Token]) -> bool {
        match self {
            Self::Parlet => tokens.iter().filter(|t| t.is_short()).count() >= 2,
            other => tokens.iter().any(|t| other.accepts(t)),
        }
    }
}

impl std::fmt::Display for PlayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PlayType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fijo" => Ok(Self::Fijo),
            "corrido" => Ok(Self::Corrido),
            "centena" => Ok(Self::Centena),
            "parlet" => Ok(Self::Parlet),
            other => Err(EngineError::UnknownPlayType(other.to_string())),
        }
    }
}

/// Name → stable-id lookup built from the backend catalog.
///
/// The engine never hard-codes backend identifiers; the screen controller
/// fetches the catalog and injects it here. Matching is by trimmed,
/// case-insensitive name.
#[derive(Clone, Debug, Default)]
pub struct PlayTypeCatalog {
    ids: HashMap<PlayType, String>,
}

impl PlayTypeCatalog {
    /// Builds the lookup from catalog entries; entries whose name is not a
    /// known play type are skipped.
    #[must_use]
    pub fn from_entries(entries: &[PlayTypeInfo]) -> Self {
        let mut ids = HashMap::new();
        for entry in entries {
            if let Ok(play_type) = PlayType::try_from(entry.name.as_str()) {
                ids.insert(play_type, entry.id.clone());
            }
        }
        Self { ids }
    }

    #[must_use]
    pub fn contains(&self, play_type: PlayType) -> bool {
        self.ids.contains_key(&play_type)
    }

    /// Stable backend identifier for a play type.
    pub fn resolve_id(&self, play_type: PlayType) -> ResultEngine<&str> {
        self.ids
            .get(&play_type)
            .map(String::as_str)
            .ok_or_else(|| EngineError::UnknownPlayType(play_type.as_str().to_string()))
    }
}

/// Returns the catalog types currently selectable for `tokens`, in display
/// order. The caller disables every toggle not present in the result.
#[must_use]
pub fn available_types(tokens: &[Token], catalog: &PlayTypeCatalog) -> Vec<PlayType> {
    ALL_PLAY_TYPES
        .into_iter()
        .filter(|t| catalog.contains(*t) && t.is_eligible(tokens))
        .collect()
}
