// 💾 Table Writer - three fixed-path CSV files
//
// All three tables are staged next to their targets first; targets are
// only replaced once every table has been written out completely.

use crate::error::{ConvertError, Result};
use crate::extractor::Tables;
use crate::layout::{CLUBS_FILE, PLAYERS_FILE, TRANSFERS_FILE};
use crate::records::{ClubRow, PlayerRow, TransferRow};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Serialize `rows` under a fixed header.
///
/// The header is always written, even with zero rows.
fn write_table<'r, W, T>(w: W, header: &[&str], rows: impl IntoIterator<Item = &'r T>) -> csv::Result<()>
where
    W: Write,
    T: Serialize + 'r,
{
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(w);

    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn write_players<W: Write>(w: W, rows: &[PlayerRow]) -> csv::Result<()> {
    write_table(w, &PlayerRow::HEADER, rows)
}

pub fn write_transfers<W: Write>(w: W, rows: &[TransferRow]) -> csv::Result<()> {
    write_table(w, &TransferRow::HEADER, rows)
}

pub fn write_clubs<'r, W: Write>(w: W, rows: impl IntoIterator<Item = &'r ClubRow>) -> csv::Result<()> {
    write_table(w, &ClubRow::HEADER, rows)
}

// ============================================================================
// TABLE WRITER
// ============================================================================

pub struct TableWriter {
    dir: PathBuf,
}

impl TableWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TableWriter { dir: dir.into() }
    }

    pub fn players_path(&self) -> PathBuf {
        self.dir.join(PLAYERS_FILE)
    }

    pub fn transfers_path(&self) -> PathBuf {
        self.dir.join(TRANSFERS_FILE)
    }

    pub fn clubs_path(&self) -> PathBuf {
        self.dir.join(CLUBS_FILE)
    }

    /// Write all three tables, replacing any previous outputs.
    ///
    /// Existing targets are backed up before the first rename. If a later
    /// rename fails, the targets already replaced are put back (or removed
    /// when there was nothing before), so the directory never mixes tables
    /// from two runs.
    pub fn write_all(&self, tables: &Tables) -> Result<()> {
        let staged = [
            (
                self.stage(&self.players_path(), |w| write_players(w, &tables.players))?,
                self.players_path(),
            ),
            (
                self.stage(&self.transfers_path(), |w| write_transfers(w, &tables.transfers))?,
                self.transfers_path(),
            ),
            (
                self.stage(&self.clubs_path(), |w| write_clubs(w, tables.clubs.iter()))?,
                self.clubs_path(),
            ),
        ];

        let mut backups = Vec::with_capacity(staged.len());
        for (_, target) in &staged {
            backups.push(self.backup(target)?);
        }

        let mut replaced: Vec<(PathBuf, Option<NamedTempFile>)> = Vec::new();
        for ((tmp, target), backup) in staged.into_iter().zip(backups) {
            if let Err(e) = tmp.persist(&target) {
                rollback(replaced);
                return Err(ConvertError::output(&target, e.error));
            }
            debug!(file = %target.display(), "table written");
            replaced.push((target, backup));
        }

        Ok(())
    }

    /// Copy an existing regular file aside; `None` when there is nothing to keep
    fn backup(&self, target: &Path) -> Result<Option<NamedTempFile>> {
        if !target.is_file() {
            return Ok(None);
        }

        let tmp = NamedTempFile::new_in(&self.dir).map_err(|e| ConvertError::output(target, e))?;
        fs::copy(target, tmp.path()).map_err(|e| ConvertError::output(target, e))?;
        Ok(Some(tmp))
    }

    fn stage<F>(&self, target: &Path, write: F) -> Result<NamedTempFile>
    where
        F: FnOnce(&mut NamedTempFile) -> csv::Result<()>,
    {
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| ConvertError::output(target, e))?;
        write(&mut tmp).map_err(|e| ConvertError::output(target, e))?;
        Ok(tmp)
    }
}

/// Put back the targets replaced so far, most recent first
fn rollback(replaced: Vec<(PathBuf, Option<NamedTempFile>)>) {
    for (target, backup) in replaced.into_iter().rev() {
        let restored = match backup {
            Some(tmp) => tmp.persist(&target).map(drop).map_err(|e| e.error),
            None => fs::remove_file(&target),
        };
        if let Err(e) = restored {
            warn!(file = %target.display(), error = %e, "failed to restore previous table");
        }
    }
}
