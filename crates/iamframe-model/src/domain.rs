//! Temporal domain marker and the auxiliary key column set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Name of the datetime key column.
pub const TIME_COL: &str = "time";
/// Name of the integer year key column.
pub const YEAR_COL: &str = "year";
/// Name of the derived sub-year key column.
pub const SUBANNUAL_COL: &str = "subannual";

/// Which temporal axis the key currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeDomain {
    /// Full-resolution datetime values in a `time` column.
    Time,
    /// Integer years in a `year` column.
    Year,
}

impl TimeDomain {
    /// The key column name carrying this domain's temporal values.
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Time => TIME_COL,
            Self::Year => YEAR_COL,
        }
    }

    /// Detect the domain from an ordered list of key columns.
    pub fn from_index(index: &[String]) -> Result<Self> {
        let has_time = index.iter().any(|name| name == TIME_COL);
        let has_year = index.iter().any(|name| name == YEAR_COL);
        match (has_time, has_year) {
            (true, true) => Err(FrameError::AmbiguousTimeDomain),
            (true, false) => Ok(Self::Time),
            (false, true) => Ok(Self::Year),
            (false, false) => Err(FrameError::MissingTimeColumn {
                index: index.to_vec(),
            }),
        }
    }
}

impl fmt::Display for TimeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Key columns that are derived rather than primary.
///
/// At most one auxiliary column can be registered at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraColumns(BTreeSet<String>);

impl ExtraColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an auxiliary column.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ExtraColumnConflict`] if any column is already
    /// registered, including `name` itself.
    pub fn insert(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if let Some(existing) = self.0.iter().next() {
            return Err(FrameError::ExtraColumnConflict {
                column: name,
                existing: existing.clone(),
            });
        }
        self.0.insert(name);
        Ok(())
    }

    /// Unregister a column, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn detects_domain_from_index() {
        assert_eq!(
            TimeDomain::from_index(&names(&["model", "time"])).unwrap(),
            TimeDomain::Time
        );
        assert_eq!(
            TimeDomain::from_index(&names(&["year", "model"])).unwrap(),
            TimeDomain::Year
        );
    }

    #[test]
    fn rejects_ambiguous_or_missing_domain() {
        assert!(matches!(
            TimeDomain::from_index(&names(&["time", "year"])),
            Err(FrameError::AmbiguousTimeDomain)
        ));
        assert!(matches!(
            TimeDomain::from_index(&names(&["model"])),
            Err(FrameError::MissingTimeColumn { .. })
        ));
    }

    #[test]
    fn domain_serializes_lowercase() {
        let json = serde_json::to_string(&TimeDomain::Year).unwrap();
        assert_eq!(json, "\"year\"");
        assert_eq!(TimeDomain::Time.to_string(), "time");
    }

    #[test]
    fn extra_columns_hold_a_single_entry() {
        let mut extra = ExtraColumns::new();
        extra.insert(SUBANNUAL_COL).unwrap();
        assert!(extra.contains(SUBANNUAL_COL));

        let err = extra.insert("climate_model").unwrap_err();
        assert!(matches!(err, FrameError::ExtraColumnConflict { .. }));
        assert_eq!(extra.len(), 1);

        assert!(extra.remove(SUBANNUAL_COL));
        assert!(!extra.remove(SUBANNUAL_COL));
        assert!(extra.is_empty());
    }
}
