use contracts::dashboards::d402_sales_insights::Insights;

/// Placeholder commentary; no analysis is derived from the data.
pub const STATIC_INSIGHT: &str = "Statistical summary based on the data visualization above.";

pub fn static_insights() -> Insights {
    Insights {
        revenue_trend: STATIC_INSIGHT.to_string(),
        top_products: STATIC_INSIGHT.to_string(),
        region_performance: STATIC_INSIGHT.to_string(),
        profit_margins: STATIC_INSIGHT.to_string(),
        customer_segments: STATIC_INSIGHT.to_string(),
    }
}
