use contracts::dashboards::d402_sales_insights::FilterDataRequest;
use contracts::projections::p910_sales_transactions::SalesTransaction;

use crate::shared::data::dataset::Dataset;

/// Optional region/category equality predicates, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFilter {
    pub region: Option<String>,
    pub category: Option<String>,
}

impl SalesFilter {
    pub fn from_request(request: &FilterDataRequest) -> Self {
        Self {
            region: request.region().map(str::to_string),
            category: request.category().map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.category.is_none()
    }

    /// Exact, case-sensitive match on every present field
    pub fn matches(&self, row: &SalesTransaction) -> bool {
        self.region.as_deref().map_or(true, |r| row.region == r)
            && self.category.as_deref().map_or(true, |c| row.category == c)
    }

    /// Project the dataset onto matching rows; the source is left untouched.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        if self.is_empty() {
            return dataset.clone();
        }
        Dataset::from_rows(
            dataset
                .rows()
                .iter()
                .filter(|row| self.matches(row))
                .cloned()
                .collect(),
        )
    }
}
