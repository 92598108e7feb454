//! Report Charts
//!
//! Shapes the server-injected report aggregates into chart configurations for the
//! external chart library. No drawing happens here.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub mod palette {
    pub const PRIMARY: &str = "#34588f";
    pub const PRIMARY_DARK: &str = "#1a3e75";
    pub const SUCCESS: &str = "#28a745";
    pub const WARNING: &str = "#ffc107";
    pub const DANGER: &str = "#dc3545";
    pub const INFO: &str = "#17a2b8";
    pub const PRIMARY_FILL: &str = "rgba(52, 88, 143, 0.2)";
    pub const SUCCESS_FILL: &str = "rgba(40, 167, 69, 0.1)";
}

pub const REVENUE_CANVAS: &str = "revenueChart";
pub const REVENUE_STATUS_CANVAS: &str = "revenueStatusChart";
pub const RATING_CANVAS: &str = "ratingDistChart";
pub const PAYMENT_CANVAS: &str = "paymentStatusChart";
pub const CATEGORY_CANVAS: &str = "categoryChart";
pub const REGISTRATION_CANVAS: &str = "registrationChart";
pub const USER_TYPE_CANVAS: &str = "userTypeChart";
pub const REVIEW_TREND_CANVAS: &str = "reviewTrendChart";

/// Aggregates rendered into the reports page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    pub daily_revenue: Vec<DailyRevenue>,
    pub revenue_by_status: Vec<StatusRevenue>,
    pub rating_distribution: Vec<RatingCount>,
    pub payment_stats: Option<PaymentStats>,
    pub category_performance: Vec<CategoryRevenue>,
    pub user_registrations: Vec<DailyCount>,
    pub user_types: Vec<TypeCount>,
    pub review_trend: Vec<ReviewDay>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRevenue {
    pub day: String,
    #[serde(deserialize_with = "amount")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "count")]
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusRevenue {
    pub status: String,
    #[serde(deserialize_with = "amount")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingCount {
    pub rating: u8,
    #[serde(deserialize_with = "count")]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentStats {
    #[serde(deserialize_with = "count")]
    pub pending: u64,
    #[serde(deserialize_with = "count")]
    pub verified: u64,
    #[serde(deserialize_with = "count")]
    pub rejected: u64,
}

/// Revenue per product category, keyed the way the ORM aggregate names it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryRevenue {
    #[serde(rename = "product__category__name", default)]
    pub name: String,
    #[serde(rename = "total_revenue", deserialize_with = "amount")]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyCount {
    pub day: String,
    #[serde(default, deserialize_with = "count")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeCount {
    pub user_type: String,
    #[serde(default, deserialize_with = "count")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewDay {
    pub day: String,
    #[serde(default, deserialize_with = "count")]
    pub count: u64,
    #[serde(default, deserialize_with = "amount")]
    pub avg_rating: f64,
}

/// Decimal strings, numbers or null; anything unparsable counts as zero
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Whole counts from numbers or numeric strings; null, negatives and junk count as zero
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// One color, or one per data point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
    /// Per-dataset type in a mixed chart
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    /// Draw order; lower draws on top
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl Dataset {
    fn new(data: Vec<f64>) -> Self {
        Self {
            label: None,
            data,
            border_color: None,
            background_color: None,
            tension: None,
            fill: None,
            y_axis_id: None,
            kind: None,
            order: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Configuration object handed to `new Chart(canvas, config)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

/// `2024-03-05` -> `Mar 5`. Unparsable days are shown as given.
pub fn short_day(day: &str) -> String {
    day.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format("%b %-d").to_string())
        .unwrap_or_else(|| day.to_string())
}

/// `partially_refunded` -> `PARTIALLY REFUNDED`. Also used for user types.
pub fn status_label(status: &str) -> String {
    status.replace('_', " ").to_uppercase()
}

fn base_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": { "legend": { "display": true, "position": "top" } }
    })
}

fn doughnut_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": { "legend": { "position": "bottom" } }
    })
}

impl ReportData {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Every chart with data to show, keyed by canvas id
    pub fn charts(&self) -> Vec<(&'static str, ChartSpec)> {
        [
            (REVENUE_CANVAS, self.revenue_trend()),
            (REVENUE_STATUS_CANVAS, self.revenue_by_status_chart()),
            (RATING_CANVAS, self.rating_chart()),
            (PAYMENT_CANVAS, self.payment_chart()),
            (CATEGORY_CANVAS, self.category_chart()),
            (REGISTRATION_CANVAS, self.registration_chart()),
            (USER_TYPE_CANVAS, self.user_type_chart()),
            (REVIEW_TREND_CANVAS, self.review_trend_chart()),
        ]
        .into_iter()
        .filter_map(|(canvas, spec)| spec.map(|spec| (canvas, spec)))
        .collect()
    }

    /// Revenue line on the left axis, order count dashed on the right
    pub fn revenue_trend(&self) -> Option<ChartSpec> {
        if self.daily_revenue.is_empty() {
            return None;
        }
        let labels = self.daily_revenue.iter().map(|d| short_day(&d.day)).collect();
        let revenue = Dataset {
            label: Some("Revenue (DZD)".to_string()),
            border_color: Some(palette::PRIMARY.to_string()),
            background_color: Some(json!(palette::PRIMARY_FILL)),
            tension: Some(0.4),
            fill: Some(true),
            y_axis_id: Some("y".to_string()),
            ..Dataset::new(self.daily_revenue.iter().map(|d| d.revenue).collect())
        };
        let orders = Dataset {
            label: Some("Orders".to_string()),
            border_color: Some(palette::SUCCESS.to_string()),
            background_color: Some(json!(palette::SUCCESS_FILL)),
            tension: Some(0.4),
            fill: Some(false),
            y_axis_id: Some("y1".to_string()),
            ..Dataset::new(self.daily_revenue.iter().map(|d| d.orders as f64).collect())
        };
        let mut options = base_options();
        options["interaction"] = json!({ "mode": "index", "intersect": false });
        options["scales"] = json!({
            "y": { "type": "linear", "position": "left", "beginAtZero": true },
            "y1": { "type": "linear", "position": "right", "beginAtZero": true, "grid": { "drawOnChartArea": false } }
        });
        Some(ChartSpec {
            kind: ChartKind::Line,
            data: ChartData {
                labels,
                datasets: vec![revenue, orders],
            },
            options,
        })
    }

    pub fn revenue_by_status_chart(&self) -> Option<ChartSpec> {
        if self.revenue_by_status.is_empty() {
            return None;
        }
        let colors = [
            palette::WARNING,
            palette::INFO,
            palette::PRIMARY,
            palette::SUCCESS,
            palette::DANGER,
            palette::PRIMARY_DARK,
        ];
        let points = self.revenue_by_status.len();
        Some(ChartSpec {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: self.revenue_by_status.iter().map(|s| status_label(&s.status)).collect(),
                datasets: vec![Dataset {
                    background_color: Some(json!(colors.iter().cycle().take(points).collect::<Vec<_>>())),
                    ..Dataset::new(self.revenue_by_status.iter().map(|s| s.total).collect())
                }],
            },
            options: doughnut_options(),
        })
    }

    pub fn rating_chart(&self) -> Option<ChartSpec> {
        if self.rating_distribution.is_empty() {
            return None;
        }
        let mut options = base_options();
        options["plugins"]["legend"]["display"] = json!(false);
        options["scales"] = json!({ "y": { "beginAtZero": true, "ticks": { "precision": 0 } } });
        Some(ChartSpec {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: self
                    .rating_distribution
                    .iter()
                    .map(|r| format!("{} Stars", r.rating))
                    .collect(),
                datasets: vec![Dataset {
                    label: Some("Reviews".to_string()),
                    background_color: Some(json!(palette::WARNING)),
                    ..Dataset::new(self.rating_distribution.iter().map(|r| r.count as f64).collect())
                }],
            },
            options,
        })
    }

    pub fn payment_chart(&self) -> Option<ChartSpec> {
        let stats = self.payment_stats?;
        Some(ChartSpec {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: vec!["Pending".to_string(), "Verified".to_string(), "Rejected".to_string()],
                datasets: vec![Dataset {
                    background_color: Some(json!([palette::WARNING, palette::SUCCESS, palette::DANGER])),
                    ..Dataset::new(vec![stats.pending as f64, stats.verified as f64, stats.rejected as f64])
                }],
            },
            options: doughnut_options(),
        })
    }

    /// Horizontal bars, one per category
    pub fn category_chart(&self) -> Option<ChartSpec> {
        if self.category_performance.is_empty() {
            return None;
        }
        let mut options = base_options();
        options["indexAxis"] = json!("y");
        options["plugins"]["legend"]["display"] = json!(false);
        options["scales"] = json!({ "x": { "beginAtZero": true } });
        Some(ChartSpec {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: self.category_performance.iter().map(|c| c.name.clone()).collect(),
                datasets: vec![Dataset {
                    label: Some("Revenue (DZD)".to_string()),
                    border_color: Some(palette::PRIMARY_DARK.to_string()),
                    background_color: Some(json!(palette::PRIMARY)),
                    ..Dataset::new(self.category_performance.iter().map(|c| c.revenue).collect())
                }],
            },
            options,
        })
    }

    pub fn registration_chart(&self) -> Option<ChartSpec> {
        if self.user_registrations.is_empty() {
            return None;
        }
        let mut options = base_options();
        options["scales"] = json!({ "y": { "beginAtZero": true, "ticks": { "stepSize": 1 } } });
        Some(ChartSpec {
            kind: ChartKind::Line,
            data: ChartData {
                labels: self.user_registrations.iter().map(|d| short_day(&d.day)).collect(),
                datasets: vec![Dataset {
                    label: Some("New Registrations".to_string()),
                    border_color: Some(palette::SUCCESS.to_string()),
                    background_color: Some(json!(palette::SUCCESS_FILL)),
                    tension: Some(0.4),
                    fill: Some(true),
                    ..Dataset::new(self.user_registrations.iter().map(|d| d.count as f64).collect())
                }],
            },
            options,
        })
    }

    pub fn user_type_chart(&self) -> Option<ChartSpec> {
        if self.user_types.is_empty() {
            return None;
        }
        let colors = [palette::PRIMARY, palette::SUCCESS, palette::INFO, palette::WARNING];
        let points = self.user_types.len();
        Some(ChartSpec {
            kind: ChartKind::Doughnut,
            data: ChartData {
                labels: self.user_types.iter().map(|t| status_label(&t.user_type)).collect(),
                datasets: vec![Dataset {
                    background_color: Some(json!(colors.iter().cycle().take(points).collect::<Vec<_>>())),
                    ..Dataset::new(self.user_types.iter().map(|t| t.count as f64).collect())
                }],
            },
            options: doughnut_options(),
        })
    }

    /// Review count bars on the left axis, average rating line on a 0..5 right axis
    pub fn review_trend_chart(&self) -> Option<ChartSpec> {
        if self.review_trend.is_empty() {
            return None;
        }
        let reviews = Dataset {
            label: Some("Review Count".to_string()),
            background_color: Some(json!(palette::PRIMARY)),
            y_axis_id: Some("y".to_string()),
            order: Some(2),
            ..Dataset::new(self.review_trend.iter().map(|r| r.count as f64).collect())
        };
        let rating = Dataset {
            label: Some("Avg Rating".to_string()),
            kind: Some(ChartKind::Line),
            border_color: Some(palette::WARNING.to_string()),
            background_color: Some(json!(palette::WARNING)),
            tension: Some(0.4),
            fill: Some(false),
            y_axis_id: Some("y1".to_string()),
            order: Some(1),
            ..Dataset::new(self.review_trend.iter().map(|r| r.avg_rating).collect())
        };
        let mut options = base_options();
        options["scales"] = json!({
            "y": { "type": "linear", "position": "left", "beginAtZero": true, "ticks": { "stepSize": 1 } },
            "y1": { "type": "linear", "position": "right", "min": 0, "max": 5, "grid": { "drawOnChartArea": false } }
        });
        Some(ChartSpec {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: self.review_trend.iter().map(|r| short_day(&r.day)).collect(),
                datasets: vec![reviews, rating],
            },
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "dailyRevenue": [
            {"day": "2024-03-05", "revenue": "1500.50", "orders": 3},
            {"day": "2024-03-06T00:00:00", "revenue": null, "orders": 0}
        ],
        "revenueByStatus": [{"status": "partially_refunded", "total": "20"}],
        "ratingDistribution": [],
        "paymentStats": {"pending": 2, "verified": 5, "rejected": 1}
    }"#;

    #[test]
    fn test_amounts_parse_leniently() {
        let data = ReportData::from_json(SAMPLE).unwrap();
        assert_eq!(data.daily_revenue[0].revenue, 1500.5);
        assert_eq!(data.daily_revenue[1].revenue, 0.0);
        assert_eq!(data.revenue_by_status[0].total, 20.0);
    }

    #[test]
    fn test_empty_series_are_skipped() {
        let data = ReportData::from_json(SAMPLE).unwrap();
        let canvases: Vec<_> = data.charts().into_iter().map(|(canvas, _)| canvas).collect();
        assert_eq!(canvases, vec![REVENUE_CANVAS, REVENUE_STATUS_CANVAS, PAYMENT_CANVAS]);

        assert!(ReportData::default().charts().is_empty());
    }

    #[test]
    fn test_revenue_trend_config() {
        let spec = ReportData::from_json(SAMPLE).unwrap().revenue_trend().unwrap();
        assert_eq!(spec.data.labels, vec!["Mar 5", "Mar 6"]);
        assert_eq!(spec.data.datasets[0].data, vec![1500.5, 0.0]);
        assert_eq!(spec.data.datasets[1].data, vec![3.0, 0.0]);

        let config = serde_json::to_value(&spec).unwrap();
        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["datasets"][1]["yAxisID"], "y1");
        assert_eq!(config["data"]["datasets"][0]["borderColor"], palette::PRIMARY);
        assert!(config["data"]["datasets"][0].get("y_axis_id").is_none());
    }

    #[test]
    fn test_status_and_rating_labels() {
        assert_eq!(status_label("partially_refunded"), "PARTIALLY REFUNDED");

        let data = ReportData {
            rating_distribution: vec![RatingCount { rating: 5, count: 12 }, RatingCount { rating: 4, count: 3 }],
            ..Default::default()
        };
        let spec = data.rating_chart().unwrap();
        assert_eq!(spec.data.labels, vec!["5 Stars", "4 Stars"]);
        assert_eq!(spec.data.datasets[0].data, vec![12.0, 3.0]);
    }

    #[test]
    fn test_null_counts_do_not_sink_other_charts() {
        let data = ReportData::from_json(
            r#"{
                "dailyRevenue": [{"day": "2024-03-05", "revenue": "10", "orders": null}],
                "ratingDistribution": [{"rating": 5, "count": "4"}],
                "paymentStats": {"pending": null, "verified": 2.0, "rejected": -1}
            }"#,
        )
        .unwrap();

        assert_eq!(data.daily_revenue[0].orders, 0);
        assert_eq!(data.rating_distribution[0].count, 4);
        assert_eq!(
            data.payment_stats,
            Some(PaymentStats { pending: 0, verified: 2, rejected: 0 })
        );
        let canvases: Vec<_> = data.charts().into_iter().map(|(canvas, _)| canvas).collect();
        assert_eq!(canvases, vec![REVENUE_CANVAS, RATING_CANVAS, PAYMENT_CANVAS]);
    }

    const USERS_AND_REVIEWS: &str = r#"{
        "categoryPerformance": [
            {"product__category__name": "Phones", "total_revenue": "9000.00"},
            {"product__category__name": "Cables", "total_revenue": null}
        ],
        "userRegistrations": [{"day": "2024-03-05", "count": 2}],
        "userTypes": [{"user_type": "store_owner", "count": 3}, {"user_type": "customer", "count": 40}],
        "reviewTrend": [{"day": "2024-03-05", "count": 4, "avg_rating": "4.25"}]
    }"#;

    #[test]
    fn test_catalog_and_user_charts_are_drawn() {
        let data = ReportData::from_json(USERS_AND_REVIEWS).unwrap();
        let canvases: Vec<_> = data.charts().into_iter().map(|(canvas, _)| canvas).collect();
        assert_eq!(
            canvases,
            vec![CATEGORY_CANVAS, REGISTRATION_CANVAS, USER_TYPE_CANVAS, REVIEW_TREND_CANVAS]
        );

        let category = serde_json::to_value(data.category_chart().unwrap()).unwrap();
        assert_eq!(category["type"], "bar");
        assert_eq!(category["options"]["indexAxis"], "y");
        assert_eq!(category["data"]["labels"], json!(["Phones", "Cables"]));
        assert_eq!(category["data"]["datasets"][0]["data"], json!([9000.0, 0.0]));

        let registrations = data.registration_chart().unwrap();
        assert_eq!(registrations.kind, ChartKind::Line);
        assert_eq!(registrations.data.labels, vec!["Mar 5"]);
        assert_eq!(registrations.data.datasets[0].data, vec![2.0]);

        let types = data.user_type_chart().unwrap();
        assert_eq!(types.data.labels, vec!["STORE OWNER", "CUSTOMER"]);
        assert_eq!(types.data.datasets[0].data, vec![3.0, 40.0]);
    }

    #[test]
    fn test_review_trend_mixes_bar_and_line_on_two_axes() {
        let spec = ReportData::from_json(USERS_AND_REVIEWS).unwrap().review_trend_chart().unwrap();
        let config = serde_json::to_value(&spec).unwrap();

        assert_eq!(config["type"], "bar");
        let datasets = &config["data"]["datasets"];
        assert!(datasets[0].get("type").is_none());
        assert_eq!(datasets[0]["data"], json!([4.0]));
        assert_eq!(datasets[0]["yAxisID"], "y");
        assert_eq!(datasets[1]["type"], "line");
        assert_eq!(datasets[1]["data"], json!([4.25]));
        assert_eq!(datasets[1]["yAxisID"], "y1");
        assert_eq!(datasets[1]["order"], 1);
        assert_eq!(config["options"]["scales"]["y1"]["max"], 5);
    }

    #[test]
    fn test_short_day_passes_through_unknown_formats() {
        assert_eq!(short_day("2024-12-25"), "Dec 25");
        assert_eq!(short_day("yesterday"), "yesterday");
    }
}
