// 🔄 Transfer Extractor - season JSON files → player / transfer / club rows
//
// One pass, in order: files (sorted by name), players within a file,
// legs within a player. Transfer ids follow that order starting at 1.

use crate::clubs::ClubTable;
use crate::country::CountryResolver;
use crate::error::{ConvertError, Result};
use crate::records::{ClubRef, ClubRow, PlayerRecord, PlayerRow, TransferRow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ============================================================================
// SEASON FILES
// ============================================================================

/// List the `*.json` files of a season directory, sorted by file name.
///
/// Sorting makes transfer ids reproducible regardless of the order the
/// filesystem hands entries back in.
pub fn season_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_error = |source| ConvertError::InputDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_error)? {
        let path = entry.map_err(dir_error)?.path();
        if !path.is_file() {
            continue;
        }

        let is_json = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".json"));
        if is_json {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        warn!(dir = %dir.display(), "no JSON files in season directory");
    }
    Ok(files)
}

// ============================================================================
// TABLES
// ============================================================================

/// The three accumulated outputs of a pass
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub players: Vec<PlayerRow>,
    pub transfers: Vec<TransferRow>,
    pub clubs: ClubTable,
}

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct TransferExtractor<'a> {
    resolver: &'a CountryResolver,

    /// Id handed to the next transfer row
    next_transfer_id: u64,

    tables: Tables,
}

impl<'a> TransferExtractor<'a> {
    pub fn new(resolver: &'a CountryResolver) -> Self {
        TransferExtractor {
            resolver,
            next_transfer_id: 1,
            tables: Tables::default(),
        }
    }

    /// Parse one season file (a JSON array of players) and ingest it
    pub fn ingest_file(&mut self, path: &Path) -> Result<()> {
        let malformed = |message: String| ConvertError::MalformedInput {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        let records: Vec<PlayerRecord> =
            serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?;

        debug!(file = %path.display(), players = records.len(), "ingesting season file");
        self.ingest_players(records)
    }

    pub fn ingest_players(&mut self, records: impl IntoIterator<Item = PlayerRecord>) -> Result<()> {
        for record in records {
            self.ingest_player(record)?;
        }
        Ok(())
    }

    fn ingest_player(&mut self, record: PlayerRecord) -> Result<()> {
        let resolver = self.resolver;
        let player_id = record.player_id;

        // Resolve every name before emitting anything for this player
        let country_id = resolver
            .resolve(&record.nationality, || {
                format!("nationality of player {player_id}")
            })?
            .to_string();

        let club_rows = record
            .transfers
            .iter()
            .map(|leg| Ok((club_row(resolver, &leg.from)?, club_row(resolver, &leg.to)?)))
            .collect::<Result<Vec<_>>>()?;

        self.tables.players.push(PlayerRow {
            id: player_id,
            country_id,
        });

        for (leg, (from, to)) in record.transfers.into_iter().zip(club_rows) {
            let id = self.next_transfer_id;
            self.next_transfer_id += 1;

            self.tables.transfers.push(TransferRow {
                id,
                player_id,
                club_from: leg.from.club_id,
                club_to: leg.to.club_id,
                fee_eur: leg.fee_eur,
                is_loan: leg.is_loan,
                season: leg.season,
            });

            self.tables.clubs.upsert(from);
            self.tables.clubs.upsert(to);
        }

        Ok(())
    }

    pub fn finish(self) -> Tables {
        self.tables
    }
}

fn club_row(resolver: &CountryResolver, club: &ClubRef) -> Result<ClubRow> {
    let country_id = resolver.resolve(&club.country, || {
        format!("club {} '{}'", club.club_id, club.club_name)
    })?;

    Ok(ClubRow {
        id: club.club_id,
        name: club.club_name.clone(),
        country_id: country_id.to_string(),
    })
}

/// Run the whole pass over an ordered list of files
pub fn extract(resolver: &CountryResolver, files: &[PathBuf]) -> Result<Tables> {
    let mut extractor = TransferExtractor::new(resolver);
    for file in files {
        extractor.ingest_file(file)?;
    }
    Ok(extractor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn resolver() -> CountryResolver {
        CountryResolver::from_reader("name,id\nBrazil,1\nSpain,2\nPortugal,3\n".as_bytes()).unwrap()
    }

    fn players(json: &str) -> Vec<PlayerRecord> {
        serde_json::from_str(json).unwrap()
    }

    const BRAZIL_TO_SPAIN: &str = r#"[{
        "player_id": 100,
        "nationality": "Brazil",
        "transfers": [{
            "from": {"club_id": 10, "club_name": "Real Betis", "country": "Spain"},
            "to": {"club_id": 20, "club_name": "Benfica", "country": "Portugal"},
            "fee_eur": 5000000,
            "is_loan": false,
            "season": "22/23"
        }]
    }]"#;

    #[test]
    fn test_single_player_single_transfer() {
        let resolver = resolver();
        let mut extractor = TransferExtractor::new(&resolver);
        extractor.ingest_players(players(BRAZIL_TO_SPAIN)).unwrap();
        let tables = extractor.finish();

        assert_eq!(
            tables.players,
            vec![PlayerRow { id: 100, country_id: "1".to_string() }]
        );

        assert_eq!(tables.transfers.len(), 1);
        let t = &tables.transfers[0];
        assert_eq!(t.id, 1);
        assert_eq!(t.player_id, 100);
        assert_eq!(t.club_from, 10);
        assert_eq!(t.club_to, 20);
        assert!(!t.is_loan);
        assert_eq!(t.season, "22/23");

        assert_eq!(tables.clubs.get(10).unwrap().country_id, "2");
        assert_eq!(tables.clubs.get(20).unwrap().country_id, "3");
    }

    #[test]
    fn test_player_without_transfers() {
        let resolver = resolver();
        let mut extractor = TransferExtractor::new(&resolver);
        extractor
            .ingest_players(players(r#"[{"player_id": 5, "nationality": "Spain", "transfers": []},
                                        {"player_id": 6, "nationality": "Spain"}]"#))
            .unwrap();
        let tables = extractor.finish();

        assert_eq!(tables.players.len(), 2);
        assert!(tables.transfers.is_empty());
        assert!(tables.clubs.is_empty());
    }

    #[test]
    fn test_transfer_ids_are_contiguous_across_players() {
        let resolver = resolver();
        let json = r#"[
            {"player_id": 1, "nationality": "Brazil", "transfers": [
                {"from": {"club_id": 1, "club_name": "A", "country": "Brazil"},
                 "to": {"club_id": 2, "club_name": "B", "country": "Spain"},
                 "fee_eur": null, "is_loan": true, "season": "22/23"},
                {"from": {"club_id": 2, "club_name": "B", "country": "Spain"},
                 "to": {"club_id": 1, "club_name": "A", "country": "Brazil"},
                 "fee_eur": 0, "is_loan": false, "season": "22/23"}
            ]},
            {"player_id": 2, "nationality": "Spain", "transfers": [
                {"from": {"club_id": 3, "club_name": "C", "country": "Portugal"},
                 "to": {"club_id": 2, "club_name": "B", "country": "Spain"},
                 "fee_eur": 250000.5, "is_loan": false, "season": "22/23"}
            ]}
        ]"#;

        let mut extractor = TransferExtractor::new(&resolver);
        extractor.ingest_players(players(json)).unwrap();
        let tables = extractor.finish();

        let ids: Vec<u64> = tables.transfers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(tables.transfers[2].player_id, 2);

        // Clubs are unique, in first-seen order
        let club_ids: Vec<u64> = tables.clubs.iter().map(|c| c.id).collect();
        assert_eq!(club_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_nationality_reports_player_nationality() {
        let resolver = resolver();
        let mut extractor = TransferExtractor::new(&resolver);

        let err = extractor
            .ingest_players(players(r#"[{"player_id": 77, "nationality": "Atlantis"}]"#))
            .unwrap_err();

        match err {
            ConvertError::UnknownCountry { name, context } => {
                assert_eq!(name, "Atlantis");
                assert!(context.contains("77"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_club_country_leaves_no_partial_player() {
        let resolver = resolver();
        let json = r#"[{"player_id": 1, "nationality": "Brazil", "transfers": [
            {"from": {"club_id": 1, "club_name": "A", "country": "Brazil"},
             "to": {"club_id": 9, "club_name": "Lost City FC", "country": "Atlantis"},
             "fee_eur": null, "is_loan": false, "season": "22/23"}
        ]}]"#;

        let mut extractor = TransferExtractor::new(&resolver);
        let err = extractor.ingest_players(players(json)).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownCountry { ref name, .. } if name == "Atlantis"));

        let tables = extractor.finish();
        assert!(tables.players.is_empty());
        assert!(tables.transfers.is_empty());
        assert!(tables.clubs.is_empty());
    }

    #[test]
    fn test_later_club_name_wins() {
        let resolver = resolver();
        let json = r#"[
            {"player_id": 1, "nationality": "Brazil", "transfers": [
                {"from": {"club_id": 10, "club_name": "Old Name", "country": "Spain"},
                 "to": {"club_id": 20, "club_name": "Other", "country": "Spain"},
                 "fee_eur": null, "is_loan": false, "season": "21/22"}
            ]},
            {"player_id": 2, "nationality": "Brazil", "transfers": [
                {"from": {"club_id": 30, "club_name": "Third", "country": "Brazil"},
                 "to": {"club_id": 10, "club_name": "New Name", "country": "Portugal"},
                 "fee_eur": null, "is_loan": false, "season": "22/23"}
            ]}
        ]"#;

        let mut extractor = TransferExtractor::new(&resolver);
        extractor.ingest_players(players(json)).unwrap();
        let tables = extractor.finish();

        assert_eq!(tables.clubs.len(), 3);
        let club = tables.clubs.get(10).unwrap();
        assert_eq!(club.name, "New Name");
        assert_eq!(club.country_id, "3");
        assert_eq!(tables.clubs.iter().next().unwrap().id, 10);
    }

    #[test]
    fn test_season_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = season_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_season_files_missing_dir() {
        let dir = tempdir().unwrap();
        let result = season_files(&dir.path().join("1999_2000"));

        assert!(matches!(result, Err(ConvertError::InputDirectory { .. })));
    }

    #[test]
    fn test_extract_numbers_transfers_across_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("01.json"), BRAZIL_TO_SPAIN).unwrap();
        fs::write(
            dir.path().join("02.json"),
            r#"[{"player_id": 200, "nationality": "Portugal", "transfers": [
                {"from": {"club_id": 20, "club_name": "Benfica", "country": "Portugal"},
                 "to": {"club_id": 10, "club_name": "Real Betis", "country": "Spain"},
                 "fee_eur": null, "is_loan": true, "season": "22/23"}
            ]}]"#,
        )
        .unwrap();

        let resolver = resolver();
        let files = season_files(dir.path()).unwrap();
        let tables = extract(&resolver, &files).unwrap();

        assert_eq!(tables.players.len(), 2);
        assert_eq!(tables.transfers[0].player_id, 100);
        assert_eq!(tables.transfers[1].id, 2);
        assert_eq!(tables.transfers[1].player_id, 200);

        let unique: HashSet<u64> = tables.clubs.iter().map(|c| c.id).collect();
        assert_eq!(unique.len(), tables.clubs.len());
        assert!(tables.clubs.iter().all(|c| resolver.contains_id(&c.country_id)));
    }

    #[test]
    fn test_malformed_file_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"[{"player_id": 1}]"#).unwrap();

        let resolver = resolver();
        let err = extract(&resolver, &[path.clone()]).unwrap_err();

        match err {
            ConvertError::MalformedInput { path: p, message } => {
                assert_eq!(p, path);
                assert!(message.contains("nationality"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
