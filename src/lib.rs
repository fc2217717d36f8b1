// Transfer Tables - Core Library
// Season transfer JSON → players / transfers / clubs CSV tables

pub mod error;
pub mod layout;
pub mod records;
pub mod country;
pub mod clubs;
pub mod extractor;
pub mod writer;
pub mod convert;
pub mod logging;

// Re-export commonly used types
pub use error::{ConvertError, Result};
pub use layout::{Layout, SeasonRange};
pub use records::{
    ClubId, ClubRef, ClubRow, PlayerId, PlayerRecord, PlayerRow, TransferLeg, TransferRow,
};
pub use country::{Country, CountryResolver};
pub use clubs::ClubTable;
pub use extractor::{extract, season_files, Tables, TransferExtractor};
pub use writer::{write_clubs, write_players, write_transfers, TableWriter};
pub use convert::{convert, ConversionSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
