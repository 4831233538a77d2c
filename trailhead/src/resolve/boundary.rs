use crate::domain::{Coordinate, RegionBounds};
use shared::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Static region reference data, keyed by upper-case region code.
#[derive(Clone, Debug, Default)]
pub struct RegionTable {
    regions: BTreeMap<String, RegionBounds>,
}

impl RegionTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RegionBounds> = serde_json::from_str(json)
            .map_err(|e| Error::RegionData(format!("Failed to parse region data: {}", e)))?;
        Ok(raw.into_iter().collect())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::RegionData(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Case-insensitive lookup. Unknown codes are an error; there is no
    /// fallback region.
    pub fn get(&self, code: &str) -> Result<&RegionBounds> {
        self.regions
            .get(&code.trim().to_ascii_uppercase())
            .ok_or_else(|| Error::UnknownRegion(code.to_string()))
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.get(code).is_ok()
    }

    pub fn in_region(&self, coordinate: Coordinate, code: &str) -> Result<bool> {
        Ok(self.get(code)?.contains(coordinate))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<(String, RegionBounds)> for RegionTable {
    fn from_iter<I: IntoIterator<Item = (String, RegionBounds)>>(iter: I) -> Self {
        Self {
            regions: iter
                .into_iter()
                .map(|(code, bounds)| (code.to_ascii_uppercase(), bounds))
                .collect(),
        }
    }
}
