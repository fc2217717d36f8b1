// 🌍 Country Resolver - name → id lookup from the reference table
//
// Exact string match only: no case folding, trimming or accent stripping.
// "brazil" and "Brazil " are both unknown if the table says "Brazil".

use crate::error::{ConvertError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One row of `countries.csv`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct CountryResolver {
    by_name: HashMap<String, String>,
}

impl CountryResolver {
    /// Load the reference table. A missing file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConvertError::MissingReferenceData {
                path: path.to_path_buf(),
            });
        }

        let reader = csv::Reader::from_path(path).map_err(|source| ConvertError::ReferenceTable {
            path: path.to_path_buf(),
            source,
        })?;

        let resolver = Self::from_csv(reader, path)?;
        debug!(countries = resolver.len(), path = %path.display(), "loaded reference table");
        Ok(resolver)
    }

    /// Parse a `name,id` table from any reader
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(rdr), Path::new("<reader>"))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Self> {
        let countries = reader
            .deserialize()
            .collect::<std::result::Result<Vec<Country>, _>>()
            .map_err(|source| ConvertError::ReferenceTable {
                path: origin.to_path_buf(),
                source,
            })?;

        Self::from_countries(countries)
    }

    /// Build from already-parsed rows; names must be unique
    pub fn from_countries(countries: impl IntoIterator<Item = Country>) -> Result<Self> {
        let mut by_name = HashMap::new();

        for country in countries {
            if by_name.contains_key(&country.name) {
                return Err(ConvertError::DuplicateCountry { name: country.name });
            }
            by_name.insert(country.name, country.id);
        }

        Ok(CountryResolver { by_name })
    }

    /// Resolve a country name to its id.
    ///
    /// `context` ends up in the `UnknownCountry` error, e.g.
    /// "nationality of player 42". A row with an empty id counts as absent.
    pub fn resolve(&self, name: &str, context: impl FnOnce() -> String) -> Result<&str> {
        self.by_name
            .get(name)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConvertError::unknown_country(name, context()))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        !id.is_empty() && self.by_name.values().any(|v| v == id)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
