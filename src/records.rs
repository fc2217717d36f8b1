// 📄 Records - JSON input shapes and CSV output rows
//
// Inputs are whatever the season files hold; unknown keys (player_name,
// player_url, continent) are ignored. Outputs map 1:1 onto CSV columns,
// field order = column order.

use serde::{Deserialize, Serialize, Serializer};

pub type PlayerId = u64;
pub type ClubId = u64;

// ============================================================================
// INPUT (season JSON files)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub nationality: String,

    /// Absent key means no transfers
    #[serde(default)]
    pub transfers: Vec<TransferLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferLeg {
    pub from: ClubRef,
    pub to: ClubRef,

    /// Kept as a JSON number so integers are written back without a
    /// trailing `.0`
    pub fee_eur: Option<serde_json::Number>,

    pub is_loan: bool,
    pub season: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubRef {
    pub club_id: ClubId,
    pub club_name: String,
    pub country: String,
}

// ============================================================================
// OUTPUT (CSV rows)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    pub id: PlayerId,
    pub country_id: String,
}

impl PlayerRow {
    pub const HEADER: [&'static str; 2] = ["id", "country_id"];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRow {
    pub id: u64,
    pub player_id: PlayerId,
    pub club_from: ClubId,
    pub club_to: ClubId,
    pub fee_eur: Option<serde_json::Number>,
    #[serde(serialize_with = "capitalized_bool")]
    pub is_loan: bool,
    pub season: String,
}

/// Booleans are written `True` / `False`, matching the tables already
/// produced by earlier runs of the converter
fn capitalized_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

impl TransferRow {
    pub const HEADER: [&'static str; 7] = [
        "id",
        "player_id",
        "club_from",
        "club_to",
        "fee_eur",
        "is_loan",
        "season",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubRow {
    pub id: ClubId,
    pub name: String,
    pub country_id: String,
}

impl ClubRow {
    pub const HEADER: [&'static str; 3] = ["id", "name", "country_id"];
}
