use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query for `GET /api/filter-data?region=..&category=..`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDataRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl FilterDataRequest {
    /// Region constraint; an empty value means "any region".
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|s| !s.is_empty())
    }

    /// Category constraint; an empty value means "any category".
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Chart envelope
// ---------------------------------------------------------------------------

/// Suggested visual encoding for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Heatmap,
}

/// One aggregation result: rendering metadata plus a plain table of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView<R> {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub rows: Vec<R>,
}

impl<R> ChartView<R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Row types, one per view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueRow {
    /// Month in format "YYYY-MM"
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenueRow {
    pub product_name: String,
    pub revenue: f64,
}

/// Heatmap matrix row: one region, one cell per category (same order in every row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub region: String,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub category: String,
    /// `None` when the region has no sales in this category
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMarginRow {
    pub category: String,
    pub revenue: f64,
    pub cost: f64,
    /// `None` when the category has zero revenue
    pub margin_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRevenueRow {
    pub customer_segment: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountUnitsPoint {
    pub discount: f64,
    pub units_sold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAovRow {
    pub month: String,
    pub revenue: f64,
    pub units_sold: u64,
    /// `None` when no units were sold in the month
    pub average_order_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGrowthRow {
    pub month: String,
    pub revenue: f64,
    /// `None` for the first twelve months and when the prior value is zero
    pub growth_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOutlierPoint {
    pub product_name: String,
    pub cost: f64,
    /// `None` when the cost standard deviation is zero or undefined
    pub z_score: Option<f64>,
    pub is_outlier: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeProfitPoint {
    pub date: NaiveDate,
    pub profit: f64,
    pub cumulative_profit: f64,
}

/// Cross-tabulation entry; keys keep the column names of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossTableRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Headline totals of the filtered dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub row_count: usize,
    pub total_revenue: f64,
    pub total_profit: f64,
}

/// Response for `GET /api/filter-data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDataResponse {
    pub revenue_trend: ChartView<MonthlyRevenueRow>,
    pub top_products: ChartView<ProductRevenueRow>,
    pub heatmap: ChartView<HeatmapRow>,
    pub margins: ChartView<CategoryMarginRow>,
    pub segment_pie: ChartView<SegmentRevenueRow>,
    pub discount_corr: ChartView<DiscountUnitsPoint>,
    pub aov_trend: ChartView<MonthlyAovRow>,
    pub yoy_growth: ChartView<MonthlyGrowthRow>,
    pub outliers: ChartView<CostOutlierPoint>,
    pub cum_profit: ChartView<CumulativeProfitPoint>,
    pub cross_table: Vec<CrossTableRow>,
    pub summary: DashboardSummary,
}

/// Fixed commentary shown under the first five charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub revenue_trend: String,
    pub top_products: String,
    pub region_performance: String,
    pub profit_margins: String,
    pub customer_segments: String,
}

/// Values offered in the filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub categories: Vec<String>,
}

/// Everything embedded into the dashboard HTML page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPage {
    pub charts: FilterDataResponse,
    pub insights: Insights,
    pub filter_options: FilterOptions,
}
