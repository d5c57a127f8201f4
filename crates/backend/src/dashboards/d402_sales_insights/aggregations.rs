//! The ten dashboard views, each a pure function over the filtered rows.
//!
//! Undefined ratios (zero denominators) are reported as `None` in every view.

use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d402_sales_insights::{
    CategoryMarginRow, ChartKind, ChartView, CostOutlierPoint, CumulativeProfitPoint,
    DiscountUnitsPoint, HeatmapCell, HeatmapRow, MonthlyAovRow, MonthlyGrowthRow,
    MonthlyRevenueRow, ProductRevenueRow, SegmentRevenueRow,
};
use contracts::projections::p910_sales_transactions::SalesTransaction;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

use crate::shared::format::month_key;

pub const TOP_PRODUCTS_LIMIT: usize = 5;
pub const YOY_LAG_MONTHS: usize = 12;
pub const OUTLIER_Z_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("{view}: non-finite {field} in input rows")]
    NonFiniteMeasure {
        view: &'static str,
        field: &'static str,
    },
}

pub type ViewResult<R> = Result<Vec<R>, AggregationError>;

// ---------------------------------------------------------------------------
// Rendering metadata
// ---------------------------------------------------------------------------

/// Static description of a view: JSON field name, title and axes.
#[derive(Debug, Clone, Copy)]
pub struct ChartMeta {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl ChartMeta {
    pub fn view<R>(&self, rows: Vec<R>) -> ChartView<R> {
        ChartView {
            title: self.title.to_string(),
            kind: self.kind,
            x_label: self.x_label.to_string(),
            y_label: self.y_label.to_string(),
            rows,
        }
    }

    /// Wrap a view result; a failed view becomes an empty chart.
    pub fn view_or_empty<R>(&self, result: ViewResult<R>) -> ChartView<R> {
        match result {
            Ok(rows) => self.view(rows),
            Err(e) => {
                tracing::warn!("Sales insights: {} rendered empty: {}", self.name, e);
                self.view(Vec::new())
            }
        }
    }
}

pub const REVENUE_TREND: ChartMeta = ChartMeta {
    name: "revenue_trend",
    title: "Monthly Revenue Trend",
    kind: ChartKind::Line,
    x_label: "Month",
    y_label: "Revenue",
};

pub const TOP_PRODUCTS: ChartMeta = ChartMeta {
    name: "top_products",
    title: "Top 5 Products by Revenue",
    kind: ChartKind::Bar,
    x_label: "Product",
    y_label: "Revenue",
};

pub const HEATMAP: ChartMeta = ChartMeta {
    name: "heatmap",
    title: "Region-wise Performance Heatmap",
    kind: ChartKind::Heatmap,
    x_label: "Category",
    y_label: "Region",
};

pub const MARGINS: ChartMeta = ChartMeta {
    name: "margins",
    title: "Profit Margins by Category (%)",
    kind: ChartKind::Bar,
    x_label: "Category",
    y_label: "Margin (%)",
};

pub const SEGMENT_PIE: ChartMeta = ChartMeta {
    name: "segment_pie",
    title: "Sales Distribution by Customer Segment",
    kind: ChartKind::Pie,
    x_label: "Customer Segment",
    y_label: "Revenue",
};

pub const DISCOUNT_CORR: ChartMeta = ChartMeta {
    name: "discount_corr",
    title: "Correlation: Discount vs Units Sold",
    kind: ChartKind::Scatter,
    x_label: "Discount Rate",
    y_label: "Units Sold",
};

pub const AOV_TREND: ChartMeta = ChartMeta {
    name: "aov_trend",
    title: "Average Order Value Trend",
    kind: ChartKind::Line,
    x_label: "Month",
    y_label: "Average Order Value ($)",
};

pub const YOY_GROWTH: ChartMeta = ChartMeta {
    name: "yoy_growth",
    title: "Year-over-Year Growth (%)",
    kind: ChartKind::Line,
    x_label: "Month",
    y_label: "Growth Rate (%)",
};

pub const OUTLIERS: ChartMeta = ChartMeta {
    name: "outliers",
    title: "Cost Outliers by Product",
    kind: ChartKind::Scatter,
    x_label: "Product",
    y_label: "Cost ($)",
};

pub const CUM_PROFIT: ChartMeta = ChartMeta {
    name: "cum_profit",
    title: "Cumulative Profit Timeline",
    kind: ChartKind::Line,
    x_label: "Date",
    y_label: "Cumulative Profit ($)",
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `numerator / denominator`, or `None` when the quotient is undefined.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

fn finite(view: &'static str, field: &'static str, value: f64) -> Result<f64, AggregationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AggregationError::NonFiniteMeasure { view, field })
    }
}

/// Fold rows into groups keyed by `key`, keeping first-appearance order.
fn group_first_seen<'a, V: Default>(
    rows: &'a [SalesTransaction],
    key: impl Fn(&'a SalesTransaction) -> &'a str,
    mut fold: impl FnMut(&mut V, &'a SalesTransaction) -> Result<(), AggregationError>,
) -> Result<Vec<(&'a str, V)>, AggregationError> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, V)> = Vec::new();

    for row in rows {
        let k = key(row);
        let idx = *positions.entry(k).or_insert_with(|| {
            groups.push((k, V::default()));
            groups.len() - 1
        });
        fold(&mut groups[idx].1, row)?;
    }

    Ok(groups)
}

/// One calendar month of the filtered data.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: String,
    pub revenue: f64,
    pub units_sold: u64,
}

/// Monthly revenue and units, in chronological order.
///
/// Shared by the revenue trend, AOV trend and YoY growth so all three use
/// identical buckets.
pub fn monthly_buckets(
    view: &'static str,
    rows: &[SalesTransaction],
) -> Result<Vec<MonthlyBucket>, AggregationError> {
    let mut months: BTreeMap<(i32, u32), (f64, u64)> = BTreeMap::new();
    for row in rows {
        let revenue = finite(view, "revenue", row.revenue)?;
        let entry = months.entry((row.date.year(), row.date.month())).or_default();
        entry.0 += revenue;
        entry.1 += u64::from(row.units_sold);
    }

    Ok(months
        .into_iter()
        .map(|((year, month), (revenue, units_sold))| MonthlyBucket {
            month: NaiveDate::from_ymd_opt(year, month, 1)
                .map(month_key)
                .unwrap_or_else(|| format!("{year:04}-{month:02}")),
            revenue,
            units_sold,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

pub fn revenue_trend(buckets: &[MonthlyBucket]) -> Vec<MonthlyRevenueRow> {
    buckets
        .iter()
        .map(|b| MonthlyRevenueRow {
            month: b.month.clone(),
            revenue: b.revenue,
        })
        .collect()
}

pub fn top_products(rows: &[SalesTransaction]) -> ViewResult<ProductRevenueRow> {
    let mut groups = group_first_seen(rows, |r| r.product_name.as_str(), |sum: &mut f64, r| {
        *sum += finite(TOP_PRODUCTS.name, "revenue", r.revenue)?;
        Ok(())
    })?;

    // stable: equal sums keep first-appearance order
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups.truncate(TOP_PRODUCTS_LIMIT);

    Ok(groups
        .into_iter()
        .map(|(product_name, revenue)| ProductRevenueRow {
            product_name: product_name.to_string(),
            revenue,
        })
        .collect())
}

pub fn heatmap(rows: &[SalesTransaction]) -> ViewResult<HeatmapRow> {
    let mut sums: HashMap<(&str, &str), f64> = HashMap::new();
    let mut regions = BTreeSet::new();
    let mut categories = BTreeSet::new();

    for row in rows {
        let revenue = finite(HEATMAP.name, "revenue", row.revenue)?;
        regions.insert(row.region.as_str());
        categories.insert(row.category.as_str());
        *sums.entry((row.region.as_str(), row.category.as_str())).or_default() += revenue;
    }

    Ok(regions
        .into_iter()
        .map(|region| HeatmapRow {
            region: region.to_string(),
            cells: categories
                .iter()
                .map(|category| HeatmapCell {
                    category: category.to_string(),
                    revenue: sums.get(&(region, *category)).copied(),
                })
                .collect(),
        })
        .collect())
}

pub fn margins(rows: &[SalesTransaction]) -> ViewResult<CategoryMarginRow> {
    let groups = group_first_seen(rows, |r| r.category.as_str(), |acc: &mut (f64, f64), r| {
        acc.0 += finite(MARGINS.name, "revenue", r.revenue)?;
        acc.1 += finite(MARGINS.name, "cost", r.cost)?;
        Ok(())
    })?;

    Ok(groups
        .into_iter()
        .map(|(category, (revenue, cost))| CategoryMarginRow {
            category: category.to_string(),
            revenue,
            cost,
            margin_percent: safe_ratio(revenue - cost, revenue).map(|m| m * 100.0),
        })
        .collect())
}

pub fn segment_pie(rows: &[SalesTransaction]) -> ViewResult<SegmentRevenueRow> {
    let groups = group_first_seen(rows, |r| r.customer_segment.as_str(), |sum: &mut f64, r| {
        *sum += finite(SEGMENT_PIE.name, "revenue", r.revenue)?;
        Ok(())
    })?;

    Ok(groups
        .into_iter()
        .map(|(segment, revenue)| SegmentRevenueRow {
            customer_segment: segment.to_string(),
            revenue,
        })
        .collect())
}

pub fn discount_corr(rows: &[SalesTransaction]) -> ViewResult<DiscountUnitsPoint> {
    rows.iter()
        .map(|r| {
            Ok(DiscountUnitsPoint {
                discount: finite(DISCOUNT_CORR.name, "discount", r.discount)?,
                units_sold: r.units_sold,
            })
        })
        .collect()
}

pub fn aov_trend(buckets: &[MonthlyBucket]) -> Vec<MonthlyAovRow> {
    buckets
        .iter()
        .map(|b| MonthlyAovRow {
            month: b.month.clone(),
            revenue: b.revenue,
            units_sold: b.units_sold,
            average_order_value: safe_ratio(b.revenue, b.units_sold as f64),
        })
        .collect()
}

/// Percent change against the bucket `YOY_LAG_MONTHS` positions earlier.
pub fn yoy_growth(buckets: &[MonthlyBucket]) -> Vec<MonthlyGrowthRow> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let growth_percent = i
                .checked_sub(YOY_LAG_MONTHS)
                .and_then(|j| {
                    let prior = buckets[j].revenue;
                    safe_ratio(b.revenue - prior, prior)
                })
                .map(|g| g * 100.0);
            MonthlyGrowthRow {
                month: b.month.clone(),
                revenue: b.revenue,
                growth_percent,
            }
        })
        .collect()
}

/// Cost z-scores against the mean and sample standard deviation of all rows.
pub fn outliers(rows: &[SalesTransaction]) -> ViewResult<CostOutlierPoint> {
    let costs = rows
        .iter()
        .map(|r| finite(OUTLIERS.name, "cost", r.cost))
        .collect::<Result<Vec<f64>, _>>()?;

    let n = costs.len() as f64;
    let mean = costs.iter().sum::<f64>() / n;
    // identical costs have no spread even when `mean` picks up rounding error
    let std_dev = if costs.len() < 2 || costs.iter().all(|c| *c == costs[0]) {
        None
    } else {
        let variance = costs.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(variance.sqrt())
    };

    Ok(rows
        .iter()
        .zip(costs)
        .map(|(row, cost)| {
            let z_score = std_dev.and_then(|s| safe_ratio(cost - mean, s));
            CostOutlierPoint {
                product_name: row.product_name.clone(),
                cost,
                z_score,
                is_outlier: z_score.map_or(false, |z| z.abs() > OUTLIER_Z_THRESHOLD),
            }
        })
        .collect())
}

/// Running profit total by ascending date; same-day rows keep input order.
pub fn cum_profit(rows: &[SalesTransaction]) -> ViewResult<CumulativeProfitPoint> {
    let mut ordered: Vec<&SalesTransaction> = rows.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let mut running = 0.0;
    ordered
        .into_iter()
        .map(|r| {
            let profit = finite(CUM_PROFIT.name, "profit", r.profit)?;
            running += profit;
            Ok(CumulativeProfitPoint {
                date: r.date,
                profit,
                cumulative_profit: running,
            })
        })
        .collect()
}
