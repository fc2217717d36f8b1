// 🏟️ Club table - ordered upsert keyed by club id
//
// Position is fixed by the first occurrence; later upserts overwrite the
// row in place.

use crate::records::{ClubId, ClubRow};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ClubTable {
    rows: Vec<ClubRow>,
    index: HashMap<ClubId, usize>,
}

impl ClubTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by `row.id`
    pub fn upsert(&mut self, row: ClubRow) {
        match self.index.get(&row.id) {
            Some(&pos) => self.rows[pos] = row,
            None => {
                self.index.insert(row.id, self.rows.len());
                self.rows.push(row);
            }
        }
    }

    pub fn get(&self, id: ClubId) -> Option<&ClubRow> {
        self.index.get(&id).map(|&pos| &self.rows[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClubRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<ClubRow> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: ClubId, name: &str, country_id: &str) -> ClubRow {
        ClubRow {
            id,
            name: name.to_string(),
            country_id: country_id.to_string(),
        }
    }

    #[test]
    fn test_upsert_new_keys_append() {
        let mut table = ClubTable::new();
        table.upsert(club(10, "Santos", "1"));
        table.upsert(club(20, "Sevilla", "2"));

        let ids: Vec<ClubId> = table.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut table = ClubTable::new();
        table.upsert(club(10, "Santos", "1"));
        table.upsert(club(20, "Sevilla", "2"));
        table.upsert(club(10, "Santos FC", "3"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(10).unwrap().name, "Santos FC");
        assert_eq!(table.get(10).unwrap().country_id, "3");

        // First-insertion order survives the overwrite
        let rows = table.into_rows();
        assert_eq!(rows[0].id, 10);
        assert_eq!(rows[1].id, 20);
    }

    #[test]
    fn test_empty_table() {
        let table = ClubTable::new();
        assert!(table.is_empty());
        assert!(table.get(1).is_none());
    }
}
