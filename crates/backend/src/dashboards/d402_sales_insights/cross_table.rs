use contracts::dashboards::d402_sales_insights::CrossTableRow;
use contracts::projections::p910_sales_transactions::SalesTransaction;
use std::collections::BTreeMap;

/// Count rows per (region, category), ordered by region then category.
///
/// Only combinations that occur are listed.
pub fn build_cross_table(rows: &[SalesTransaction]) -> Vec<CrossTableRow> {
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for row in rows {
        *counts
            .entry((row.region.as_str(), row.category.as_str()))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((region, category), count)| CrossTableRow {
            region: region.to_string(),
            category: category.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::dataset::fixtures::transaction;

    #[test]
    fn test_counts_are_sorted_and_sparse() {
        let rows = vec![
            transaction("2024-01-01", "Tablet", "Electronics", "South", 1.0, 1.0),
            transaction("2024-01-01", "Fiction", "Books", "North", 1.0, 1.0),
            transaction("2024-01-02", "Laptop", "Electronics", "North", 1.0, 1.0),
            transaction("2024-01-03", "Cookbook", "Books", "North", 1.0, 1.0),
        ];

        let table = build_cross_table(&rows);
        let keys: Vec<(&str, &str, u64)> = table
            .iter()
            .map(|r| (r.region.as_str(), r.category.as_str(), r.count))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("North", "Books", 2),
                ("North", "Electronics", 1),
                ("South", "Electronics", 1),
            ]
        );

        assert!(table.iter().all(|r| r.count > 0));
        assert_eq!(table.iter().map(|r| r.count).sum::<u64>(), rows.len() as u64);
    }

    #[test]
    fn test_empty_rows() {
        assert!(build_cross_table(&[]).is_empty());
    }
}
