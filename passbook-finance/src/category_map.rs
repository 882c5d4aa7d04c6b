//! Payee -> category lookup applied at export time.
//!
//! Loaded from a two-column CSV (`payee,category`). A header row is allowed,
//! short or blank rows are ignored, and later rows override earlier ones.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: HashMap<String, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, payee: impl Into<String>, category: impl Into<String>) {
        self.entries.insert(payee.into(), category.into());
    }

    /// Exact payee match.
    pub fn get(&self, payee: &str) -> Option<&str> {
        self.entries.get(payee).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("opening {}", path.as_ref().display()))?;
        Self::from_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut map = Self::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let (Some(payee), Some(category)) = (record.get(0), record.get(1)) else {
                continue;
            };
            if payee.is_empty() {
                continue;
            }
            if i == 0 && payee.eq_ignore_ascii_case("payee") && category.eq_ignore_ascii_case("category") {
                continue;
            }
            map.insert(payee, category);
        }

        Ok(map)
    }
}

impl From<HashMap<String, String>> for CategoryMap {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (payee, category) in iter {
            map.insert(payee, category);
        }
        map
    }
}
