//! Wire shapes shared between the betting client and the backend.
//!
//! The engine never talks to the network itself; it only produces and
//! consumes these types. Field names follow the backend's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod catalog {
    use super::*;

    /// One play type as published by the backend catalog endpoint.
    ///
    /// The engine matches entries by trimmed, case-insensitive `name`; `id`
    /// is the stable identifier echoed back in submissions.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PlayTypeInfo {
        pub id: String,
        pub name: String,
        pub code: String,
    }
}

pub mod submission {
    use super::*;

    /// Full submission payload for one betting session.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SubmissionRequest {
        pub user_id: String,
        pub throw_id: String,
        /// Submission timestamp, ISO-8601 UTC.
        pub date: DateTime<Utc>,
        pub bet_plays: Vec<BetPlay>,
    }

    /// One wager (a separated play, or the in-progress draft).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BetPlay {
        pub moves: Vec<Move>,
    }

    /// All move details of one wager under a single play type.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Move {
        pub play_type_id: String,
        pub move_details: Vec<MoveDetail>,
    }

    /// One priced number (or number pair, for pair-combination types).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoveDetail {
        pub number: String,
        pub second_number: Option<String>,
        /// Amount in major units (e.g. pesos), two-decimal precision.
        pub amount: f64,
    }
}
