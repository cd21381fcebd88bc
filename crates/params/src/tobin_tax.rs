//! Per-denomination tobin tax overrides.
//!
//! Kept as an ordered list rather than a map so that every node serializes the
//! entries in the same, insertion-stable order. Lookups scan linearly; the
//! list is short and only changes through governance.

use market_types::{Dec, Denom};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TobinTax {
    pub denom: Denom,
    pub tax_rate: Dec,
}

impl TobinTax {
    pub fn new(denom: Denom, tax_rate: Dec) -> Self {
        Self { denom, tax_rate }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.tax_rate.is_unit_interval() {
            return Err(ValidationError::IlliquidTobinTaxOutOfRange {
                denom: self.denom.clone(),
                rate: self.tax_rate,
            });
        }
        Ok(())
    }
}

impl fmt::Display for TobinTax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.denom, self.tax_rate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TobinTaxList(Vec<TobinTax>);

impl TobinTaxList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TobinTax) {
        self.0.push(entry);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TobinTax> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rate of the first entry for `denom`, if any.
    pub fn tax_rate(&self, denom: &Denom) -> Option<Dec> {
        self.0
            .iter()
            .find(|entry| &entry.denom == denom)
            .map(|entry| entry.tax_rate)
    }

    /// Validate entries in order, reporting the first out-of-range rate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.0.iter().try_for_each(TobinTax::validate)
    }

    /// Denominations appearing more than once, in first-repeat order.
    pub fn duplicate_denoms(&self) -> Vec<Denom> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut duplicates = Vec::new();
        for entry in &self.0 {
            if !seen.insert(&entry.denom) && reported.insert(&entry.denom) {
                duplicates.push(entry.denom.clone());
            }
        }
        duplicates
    }
}

impl From<Vec<TobinTax>> for TobinTaxList {
    fn from(entries: Vec<TobinTax>) -> Self {
        Self(entries)
    }
}

impl FromIterator<TobinTax> for TobinTaxList {
    fn from_iter<I: IntoIterator<Item = TobinTax>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TobinTaxList {
    type Item = &'a TobinTax;
    type IntoIter = std::slice::Iter<'a, TobinTax>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TobinTaxList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("]")
    }
}
