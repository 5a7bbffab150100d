//! Division and taxonomy filtering over the record set.
//!
//! The division filter is mandatory and always applied first. The three
//! taxonomy filters are optional equality constraints combined with AND, so
//! their order never affects the result. Filtering borrows from the input
//! and never mutates it; an empty subset is a valid result.

use crate::dataset::{Division, ProductRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Selector value meaning "no constraint on this dimension".
pub const ALL_SENTINEL: &str = "Todas";

/// Whether a selector value means "no constraint".
pub fn is_all_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) || value.eq_ignore_ascii_case("all")
}

/// A borrowed view over the records that passed the filters.
pub type Subset<'a> = Vec<&'a ProductRecord>;

/// Taxonomy dimension an optional filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Subcategory,
    Brand,
}

impl Dimension {
    pub fn value_of<'r>(&self, record: &'r ProductRecord) -> &'r str {
        match self {
            Dimension::Category => &record.category,
            Dimension::Subcategory => &record.subcategory,
            Dimension::Brand => &record.brand,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Category => "category",
            Dimension::Subcategory => "subcategory",
            Dimension::Brand => "brand",
        })
    }
}

/// One equality constraint on a taxonomy dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub dimension: Dimension,
    pub value: String,
}

impl DimensionFilter {
    #[inline]
    pub fn matches(&self, record: &ProductRecord) -> bool {
        self.dimension.value_of(record) == self.value
    }
}

/// Optional category/subcategory/brand constraints chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw selector values; sentinels become `None`.
    pub fn from_values(
        category: Option<String>,
        subcategory: Option<String>,
        brand: Option<String>,
    ) -> Self {
        Self {
            category: normalize(category),
            subcategory: normalize(subcategory),
            brand: normalize(brand),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize(Some(category.into()));
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = normalize(Some(subcategory.into()));
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = normalize(Some(brand.into()));
        self
    }

    /// Active constraints, in dimension order.
    pub fn filters(&self) -> Vec<DimensionFilter> {
        [
            (Dimension::Category, &self.category),
            (Dimension::Subcategory, &self.subcategory),
            (Dimension::Brand, &self.brand),
        ]
        .into_iter()
        .filter_map(|(dimension, value)| {
            value.as_ref().map(|v| DimensionFilter {
                dimension,
                value: v.clone(),
            })
        })
        .collect()
    }

    /// Human-readable summary used in notices and logs.
    pub fn describe(&self, division: Division) -> String {
        let mut parts = vec![format!("division={division}")];
        parts.extend(
            self.filters()
                .into_iter()
                .map(|f| format!("{}={}", f.dimension, f.value)),
        );
        parts.join(", ")
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_all_sentinel(v))
}

#[inline]
pub fn in_division(record: &ProductRecord, division: Division) -> bool {
    record.division == division
}

/// Keep the records of one division.
pub fn by_division(records: &[ProductRecord], division: Division) -> Subset<'_> {
    records.iter().filter(|r| in_division(r, division)).collect()
}

/// Narrow an existing subset by a single dimension constraint.
pub fn apply_filter<'a>(subset: &[&'a ProductRecord], filter: &DimensionFilter) -> Subset<'a> {
    subset.iter().copied().filter(|r| filter.matches(r)).collect()
}

/// Apply the division selector, then every active taxonomy constraint.
pub fn apply<'a>(
    records: &'a [ProductRecord],
    division: Division,
    selection: &FilterSelection,
) -> Subset<'a> {
    let filters = selection.filters();
    let subset: Subset<'a> = records
        .iter()
        .filter(|r| in_division(r, division))
        .filter(|r| filters.iter().all(|f| f.matches(r)))
        .collect();

    log::debug!(
        "Filter [{}] kept {} of {} records",
        selection.describe(division),
        subset.len(),
        records.len()
    );
    subset
}

/// Distinct selector values available within a division.
///
/// Each list starts with the [`ALL_SENTINEL`] entry followed by the sorted
/// distinct values, matching the options of a dashboard select box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub brands: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(subset: &[&ProductRecord]) -> Self {
        Self {
            categories: options_for(subset, Dimension::Category),
            subcategories: options_for(subset, Dimension::Subcategory),
            brands: options_for(subset, Dimension::Brand),
        }
    }
}

fn options_for(subset: &[&ProductRecord], dimension: Dimension) -> Vec<String> {
    let distinct: BTreeSet<&str> = subset.iter().map(|r| dimension.value_of(r)).collect();
    std::iter::once(ALL_SENTINEL.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}
