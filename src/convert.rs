// 🚚 Pipeline - reference table → extractor → writer
//
// Nothing touches the output directory until the whole extraction pass
// has succeeded.

use crate::country::CountryResolver;
use crate::error::Result;
use crate::extractor::{extract, season_files};
use crate::layout::{Layout, SeasonRange};
use crate::writer::TableWriter;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub files: usize,
    pub players: usize,
    pub transfers: usize,
    pub clubs: usize,
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed! {} players, {} transfers, {} clubs.",
            self.players, self.transfers, self.clubs
        )
    }
}

pub fn convert(layout: &Layout, range: &SeasonRange) -> Result<ConversionSummary> {
    let resolver = CountryResolver::load(&layout.countries_path())?;
    info!(countries = resolver.len(), "reference table loaded");

    let season_dir = layout.season_dir(range);
    let files = season_files(&season_dir)?;
    info!(dir = %season_dir.display(), files = files.len(), "extracting season");

    let tables = extract(&resolver, &files)?;

    TableWriter::new(layout.csv_dir()).write_all(&tables)?;

    let summary = ConversionSummary {
        files: files.len(),
        players: tables.players.len(),
        transfers: tables.transfers.len(),
        clubs: tables.clubs.len(),
    };
    info!(
        players = summary.players,
        transfers = summary.transfers,
        clubs = summary.clubs,
        "tables written"
    );

    Ok(summary)
}
