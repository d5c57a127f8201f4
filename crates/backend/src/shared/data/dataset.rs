use contracts::projections::p910_sales_transactions::SalesTransaction;
use std::collections::BTreeSet;

/// Sales table loaded for one request.
///
/// Rows are only reachable through shared borrows; filtering produces a new
/// `Dataset` and never touches the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<SalesTransaction>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<SalesTransaction>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SalesTransaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct regions, sorted ascending
    pub fn regions(&self) -> Vec<String> {
        self.distinct(|row| &row.region)
    }

    /// Distinct categories, sorted ascending
    pub fn categories(&self) -> Vec<String> {
        self.distinct(|row| &row.category)
    }

    fn distinct(&self, field: impl Fn(&SalesTransaction) -> &String) -> Vec<String> {
        self.rows
            .iter()
            .map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use contracts::projections::p910_sales_transactions::SalesTransaction;

    /// Transaction with the fields most aggregations look at; the rest are neutral.
    pub fn transaction(
        date: &str,
        product_name: &str,
        category: &str,
        region: &str,
        revenue: f64,
        cost: f64,
    ) -> SalesTransaction {
        SalesTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            product_name: product_name.to_string(),
            category: category.to_string(),
            region: region.to_string(),
            units_sold: 1,
            revenue,
            cost,
            profit: revenue - cost,
            customer_segment: "Consumer".to_string(),
            discount: 0.0,
        }
    }
}
