use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the sales dataset (P910).
///
/// Field names follow the column headers of `sales_data.csv`, so the same
/// struct is used by the loader and by the offline generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTransaction {
    #[serde(rename = "Date", deserialize_with = "deserialize_sales_date")]
    pub date: NaiveDate,
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Units_Sold")]
    pub units_sold: u32,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Cost")]
    pub cost: f64,
    /// Revenue minus cost as stored in the file; not re-validated.
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "Customer_Segment")]
    pub customer_segment: String,
    /// Discount rate in `[0, 1]`.
    #[serde(rename = "Discount")]
    pub discount: f64,
}

/// Parse a sales date written either as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_sales_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.date())
    })
}

fn deserialize_sales_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_sales_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid sales date: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sales_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 14).unwrap();
        assert_eq!(parse_sales_date("2023-03-14"), Some(expected));
        assert_eq!(parse_sales_date("2023-03-14 00:00:00"), Some(expected));
        assert_eq!(parse_sales_date(" 2023-03-14 "), Some(expected));
        assert_eq!(parse_sales_date("14.03.2023"), None);
        assert_eq!(parse_sales_date(""), None);
    }

    #[test]
    fn test_json_uses_file_column_names() {
        let tx = SalesTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            product_name: "Laptop".to_string(),
            category: "Electronics".to_string(),
            region: "North".to_string(),
            units_sold: 2,
            revenue: 1800.0,
            cost: 1200.0,
            profit: 600.0,
            customer_segment: "Business".to_string(),
            discount: 0.1,
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["Date"], "2024-01-02");
        assert_eq!(json["Product_Name"], "Laptop");
        assert_eq!(json["Units_Sold"], 2);

        let back: SalesTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }
}
