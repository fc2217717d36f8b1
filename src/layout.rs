// 📁 File layout - where inputs live and where tables go

use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_ROOT: &str = "unified_transfers";
pub const DEFAULT_CSV_DIR: &str = "docs/csv";

pub const COUNTRIES_FILE: &str = "countries.csv";
pub const PLAYERS_FILE: &str = "players.csv";
pub const TRANSFERS_FILE: &str = "transfers.csv";
pub const CLUBS_FILE: &str = "clubs.csv";

// ============================================================================
// SEASON RANGE
// ============================================================================

/// The pair of years a run is invoked for.
///
/// Both values are free-form; they are only used to build the season
/// directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRange {
    pub from_year: String,
    pub to_year: String,
}

impl SeasonRange {
    pub fn new(from_year: impl Into<String>, to_year: impl Into<String>) -> Self {
        SeasonRange {
            from_year: from_year.into(),
            to_year: to_year.into(),
        }
    }

    /// Directory name by convention: `<from>_<to>`
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.from_year, self.to_year)
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Parent of the per-season input directories
    pub input_root: PathBuf,

    /// Holds the reference table and the three output tables
    pub csv_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
        }
    }
}

impl Layout {
    pub fn new(input_root: impl Into<PathBuf>, csv_dir: impl Into<PathBuf>) -> Self {
        Layout {
            input_root: input_root.into(),
            csv_dir: csv_dir.into(),
        }
    }

    pub fn season_dir(&self, range: &SeasonRange) -> PathBuf {
        self.input_root.join(range.dir_name())
    }

    pub fn countries_path(&self) -> PathBuf {
        self.csv_dir.join(COUNTRIES_FILE)
    }

    pub fn csv_dir(&self) -> &Path {
        &self.csv_dir
    }
}
