use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Region label for names missing from the table
pub const UNKNOWN_REGION: &str = "Unknown";

/// Read-only display-name to region map
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RegionTable {
    regions: BTreeMap<String, String>,
}

impl RegionTable {
    pub fn new(regions: BTreeMap<String, String>) -> Self {
        Self { regions }
    }

    /// Region of `name`, if mapped
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.regions.get(name).map(String::as_str)
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.regions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// California counties grouped into display regions
    pub fn california() -> Self {
        CALIFORNIA_COUNTIES.iter().copied().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RegionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            regions: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

const CALIFORNIA_COUNTIES: &[(&str, &str)] = &[
    ("Alameda", "Bay Area"),
    ("Alpine", "Sierra Nevada"),
    ("Amador", "Sierra Nevada"),
    ("Butte", "Central Valley"),
    ("Calaveras", "Sierra Nevada"),
    ("Colusa", "Central Valley"),
    ("Contra Costa", "Bay Area"),
    ("Del Norte", "North Coast"),
    ("El Dorado", "Sierra Nevada"),
    ("Fresno", "Central Valley"),
    ("Glenn", "Central Valley"),
    ("Humboldt", "North Coast"),
    ("Imperial", "Southern California"),
    ("Inyo", "Sierra Nevada"),
    ("Kern", "Central Valley"),
    ("Kings", "Central Valley"),
    ("Lake", "North Coast"),
    ("Lassen", "Northern California"),
    ("Los Angeles", "Southern California"),
    ("Madera", "Central Valley"),
    ("Marin", "Bay Area"),
    ("Mariposa", "Sierra Nevada"),
    ("Mendocino", "North Coast"),
    ("Merced", "Central Valley"),
    ("Modoc", "Northern California"),
    ("Mono", "Sierra Nevada"),
    ("Monterey", "Central Coast"),
    ("Napa", "Bay Area"),
    ("Nevada", "Sierra Nevada"),
    ("Orange", "Southern California"),
    ("Placer", "Sierra Nevada"),
    ("Plumas", "Sierra Nevada"),
    ("Riverside", "Southern California"),
    ("Sacramento", "Central Valley"),
    ("San Benito", "Central Coast"),
    ("San Bernardino", "Southern California"),
    ("San Diego", "Southern California"),
    ("San Francisco", "Bay Area"),
    ("San Joaquin", "Central Valley"),
    ("San Luis Obispo", "Central Coast"),
    ("San Mateo", "Bay Area"),
    ("Santa Barbara", "Central Coast"),
    ("Santa Clara", "Bay Area"),
    ("Santa Cruz", "Central Coast"),
    ("Shasta", "Northern California"),
    ("Sierra", "Sierra Nevada"),
    ("Siskiyou", "Northern California"),
    ("Solano", "Bay Area"),
    ("Sonoma", "Bay Area"),
    ("Stanislaus", "Central Valley"),
    ("Sutter", "Central Valley"),
    ("Tehama", "Northern California"),
    ("Trinity", "Northern California"),
    ("Tulare", "Central Valley"),
    ("Tuolumne", "Sierra Nevada"),
    ("Ventura", "Southern California"),
    ("Yolo", "Central Valley"),
    ("Yuba", "Central Valley"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_california_table() {
        let table = RegionTable::california();
        assert_eq!(table.len(), 58);
        assert_eq!(table.lookup("Los Angeles"), Some("Southern California"));
        assert_eq!(table.lookup("San Benito"), Some("Central Coast"));
    }

    #[test]
    fn test_unknown_name_is_unmapped() {
        let table = RegionTable::california();
        assert_eq!(table.lookup("Atlantis"), None);
        // Lookup is exact, not case-folded
        assert_eq!(table.lookup("los angeles"), None);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let table: RegionTable = [("b", "2"), ("a", "1")].into_iter().collect();
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
