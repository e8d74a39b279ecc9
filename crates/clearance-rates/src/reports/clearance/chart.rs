use super::domain::RecordType;
use super::views::ClearanceRow;
use serde::Serialize;

pub const TOTAL_COLOR: &str = "#f39c12";
pub const COMPLETED_COLOR: &str = "#00a65a";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub name: String,
    #[serde(rename = "backgroundColor")]
    pub background_color: &'static str,
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScales {
    pub x: AxisScale,
    pub y: AxisScale,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
}

/// Stacked bar chart of total vs. completed per period.
pub fn build_chart(record_type: RecordType, rows: &[ClearanceRow]) -> ChartSpec {
    let labels = rows.iter().map(|row| row.period.clone()).collect();

    let mut datasets = Vec::new();
    if !rows.is_empty() {
        datasets.push(ChartDataset {
            name: format!("Total {}", record_type.plural()),
            background_color: TOTAL_COLOR,
            values: rows.iter().map(|row| row.total).collect(),
        });
        datasets.push(ChartDataset {
            name: format!("Completed {}", record_type.plural()),
            background_color: COMPLETED_COLOR,
            values: rows.iter().map(|row| row.completed).collect(),
        });
    }

    ChartSpec {
        kind: "bar",
        data: ChartData { labels, datasets },
        options: ChartOptions {
            responsive: true,
            scales: ChartScales {
                x: AxisScale {
                    stacked: Some(true),
                    ..AxisScale::default()
                },
                y: AxisScale {
                    begin_at_zero: Some(true),
                    ..AxisScale::default()
                },
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(period: &str, total: u64, completed: u64) -> ClearanceRow {
        ClearanceRow {
            period: period.to_string(),
            total,
            completed,
            clearance_rate: 0.0,
        }
    }

    #[test]
    fn chart_serializes_to_bar_description() {
        let chart = build_chart(
            RecordType::Matter,
            &[row("Jan 2024", 4, 1), row("Feb 2024", 6, 3)],
        );

        let value = serde_json::to_value(&chart).expect("chart serializes");
        assert_eq!(
            value,
            json!({
                "type": "bar",
                "data": {
                    "labels": ["Jan 2024", "Feb 2024"],
                    "datasets": [
                        { "name": "Total Matters", "backgroundColor": "#f39c12", "values": [4, 6] },
                        { "name": "Completed Matters", "backgroundColor": "#00a65a", "values": [1, 3] }
                    ]
                },
                "options": {
                    "responsive": true,
                    "scales": {
                        "x": { "stacked": true },
                        "y": { "beginAtZero": true }
                    }
                }
            })
        );
    }

    #[test]
    fn empty_rows_produce_no_datasets() {
        let chart = build_chart(RecordType::Task, &[]);
        assert!(chart.data.labels.is_empty());
        assert!(chart.data.datasets.is_empty());
    }
}
