use contracts::dashboards::d402_sales_insights::DashboardPage;

const TEMPLATE: &str = include_str!("../../../assets/dashboard.html");
const DATA_PLACEHOLDER: &str = "__DASHBOARD_DATA__";

/// Render the dashboard HTML with the page payload embedded as JSON.
pub fn render_page(page: &DashboardPage) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(page)?;
    // no raw `<` may reach the inline script, or "</script>" and "<!--" in data
    // would change how the HTML parser reads it
    let json = json.replace('<', "\\u003c");
    Ok(TEMPLATE.replace(DATA_PLACEHOLDER, &json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_sales_insights::insights::{static_insights, STATIC_INSIGHT};
    use crate::dashboards::d402_sales_insights::service::build_charts;
    use crate::shared::data::dataset::{fixtures::transaction, Dataset};
    use contracts::dashboards::d402_sales_insights::FilterOptions;

    fn page_for(dataset: &Dataset) -> DashboardPage {
        DashboardPage {
            charts: build_charts(dataset),
            insights: static_insights(),
            filter_options: FilterOptions {
                regions: dataset.regions(),
                categories: dataset.categories(),
            },
        }
    }

    #[test]
    fn test_payload_is_embedded() {
        let dataset = Dataset::from_rows(vec![transaction(
            "2024-01-01",
            "Laptop",
            "Electronics",
            "North",
            100.0,
            60.0,
        )]);
        let html = render_page(&page_for(&dataset)).unwrap();

        assert!(!html.contains(DATA_PLACEHOLDER));
        assert!(html.contains("\"revenue_trend\""));
        assert!(html.contains("\"cross_table\""));
        assert!(html.contains(STATIC_INSIGHT));
        assert!(html.contains("/api/filter-data"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let dataset = Dataset::from_rows(vec![transaction(
            "2024-01-01",
            "</script><b>",
            "Electronics",
            "North",
            100.0,
            60.0,
        )]);
        let html = render_page(&page_for(&dataset)).unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("\\u003c/script>\\u003cb>"));
    }

    #[test]
    fn test_comment_open_is_escaped() {
        let dataset = Dataset::from_rows(vec![transaction(
            "2024-01-01",
            "<!--<script>",
            "Electronics",
            "North",
            100.0,
            60.0,
        )]);
        let html = render_page(&page_for(&dataset)).unwrap();
        assert!(!html.contains("<!--<script>"));
        assert!(html.contains("\\u003c!--\\u003cscript>"));

        let start = html.find("const PAGE = ").unwrap() + "const PAGE = ".len();
        let end = start + html[start..].find(";\n").unwrap();
        let page: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(page["filter_options"]["regions"][0], "North");
        assert_eq!(page["charts"]["top_products"]["rows"][0]["product_name"], "<!--<script>");
    }
}
