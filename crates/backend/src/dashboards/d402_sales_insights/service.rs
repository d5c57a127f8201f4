use contracts::dashboards::d402_sales_insights::{
    DashboardPage, DashboardSummary, FilterDataRequest, FilterDataResponse, FilterOptions,
};
use contracts::projections::p910_sales_transactions::SalesTransaction;
use std::path::Path;

use super::aggregations::{
    self as agg, AggregationError, MonthlyBucket, ViewResult, AOV_TREND, CUM_PROFIT,
    DISCOUNT_CORR, HEATMAP, MARGINS, OUTLIERS, REVENUE_TREND, SEGMENT_PIE, TOP_PRODUCTS,
    YOY_GROWTH,
};
use super::cross_table::build_cross_table;
use super::filter::SalesFilter;
use super::insights::static_insights;
use crate::shared::data::dataset::Dataset;
use crate::shared::data::sales_csv::{self, DataError};

type Monthly = Result<Vec<MonthlyBucket>, AggregationError>;

fn from_buckets<R>(monthly: &Monthly, view: fn(&[MonthlyBucket]) -> Vec<R>) -> ViewResult<R> {
    monthly.as_deref().map(view).map_err(Clone::clone)
}

/// Compute all ten views and the cross table from one filtered dataset.
pub fn build_charts(dataset: &Dataset) -> FilterDataResponse {
    let rows = dataset.rows();
    let monthly = agg::monthly_buckets(REVENUE_TREND.name, rows);

    FilterDataResponse {
        revenue_trend: REVENUE_TREND.view_or_empty(from_buckets(&monthly, agg::revenue_trend)),
        top_products: TOP_PRODUCTS.view_or_empty(agg::top_products(rows)),
        heatmap: HEATMAP.view_or_empty(agg::heatmap(rows)),
        margins: MARGINS.view_or_empty(agg::margins(rows)),
        segment_pie: SEGMENT_PIE.view_or_empty(agg::segment_pie(rows)),
        discount_corr: DISCOUNT_CORR.view_or_empty(agg::discount_corr(rows)),
        aov_trend: AOV_TREND.view_or_empty(from_buckets(&monthly, agg::aov_trend)),
        yoy_growth: YOY_GROWTH.view_or_empty(from_buckets(&monthly, agg::yoy_growth)),
        outliers: OUTLIERS.view_or_empty(agg::outliers(rows)),
        cum_profit: CUM_PROFIT.view_or_empty(agg::cum_profit(rows)),
        cross_table: build_cross_table(rows),
        summary: summarize(dataset),
    }
}

/// Row count and totals; non-finite amounts are left out of the sums.
pub fn summarize(dataset: &Dataset) -> DashboardSummary {
    DashboardSummary {
        row_count: dataset.len(),
        total_revenue: finite_sum(dataset, |r| r.revenue),
        total_profit: finite_sum(dataset, |r| r.profit),
    }
}

fn finite_sum(dataset: &Dataset, value: impl Fn(&SalesTransaction) -> f64) -> f64 {
    dataset
        .rows()
        .iter()
        .map(value)
        .filter(|v| v.is_finite())
        .sum()
}

/// Load, filter and aggregate for `GET /api/filter-data`
pub fn filter_data(
    data_path: &Path,
    request: &FilterDataRequest,
) -> Result<FilterDataResponse, DataError> {
    let dataset = sales_csv::load(data_path)?;
    let filter = SalesFilter::from_request(request);
    let filtered = filter.apply(&dataset);

    tracing::info!(
        "Sales insights: {} of {} rows match region={:?} category={:?}",
        filtered.len(),
        dataset.len(),
        filter.region,
        filter.category
    );

    Ok(build_charts(&filtered))
}

/// Load and aggregate the unfiltered dataset for the HTML page
pub fn dashboard_page(data_path: &Path) -> Result<DashboardPage, DataError> {
    let dataset = sales_csv::load(data_path)?;

    tracing::info!("Sales insights: building dashboard over {} rows", dataset.len());

    Ok(DashboardPage {
        charts: build_charts(&dataset),
        insights: static_insights(),
        filter_options: FilterOptions {
            regions: dataset.regions(),
            categories: dataset.categories(),
        },
    })
}
