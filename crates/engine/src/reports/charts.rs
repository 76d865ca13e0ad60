use chrono::NaiveDate;
use serde::Serialize;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

/// Chart description rendered by the client.
///
/// Serializes to `{ "chart", "title", "x_label", "y_label", "points" }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub chart: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    /// One point per day, amounts of the same day added together.
    ///
    /// `entries` must be sorted by date. Fails if a daily total does not
    /// fit in `Money`.
    pub fn amounts_over_time(
        chart: ChartKind,
        title: &str,
        entries: impl IntoIterator<Item = (NaiveDate, Money)>,
    ) -> ResultEngine<Self> {
        let mut days: Vec<(NaiveDate, Money)> = Vec::new();
        for (day, amount) in entries {
            match days.last_mut() {
                Some((last, total)) if *last == day => {
                    *total = total.checked_add(amount).ok_or_else(|| {
                        EngineError::Report(format!("daily total overflow on {day}"))
                    })?;
                }
                _ => days.push((day, amount)),
            }
        }

        Ok(Self {
            chart,
            title: title.to_string(),
            x_label: "date".to_string(),
            y_label: "amount".to_string(),
            points: days
                .into_iter()
                .map(|(day, amount)| ChartPoint {
                    x: day.to_string(),
                    y: to_units(amount),
                })
                .collect(),
        })
    }
}

fn to_units(amount: Money) -> f64 {
    amount.cents() as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn same_day_amounts_are_merged() {
        let chart = Chart::amounts_over_time(
            ChartKind::Bar,
            "Transactions Over Time",
            [
                (day(1), Money::new(1000)),
                (day(1), Money::new(250)),
                (day(4), Money::new(99)),
            ],
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            json!({
                "chart": "bar",
                "title": "Transactions Over Time",
                "x_label": "date",
                "y_label": "amount",
                "points": [
                    { "x": "2024-03-01", "y": 12.5 },
                    { "x": "2024-03-04", "y": 0.99 },
                ],
            })
        );
    }

    #[test]
    fn overflowing_daily_total_is_an_error() {
        let result = Chart::amounts_over_time(
            ChartKind::Line,
            "t",
            [(day(2), Money::new(i64::MAX)), (day(2), Money::new(1))],
        );
        assert!(matches!(result, Err(EngineError::Report(_))));
    }

    #[test]
    fn empty_input_gives_empty_points() {
        let chart = Chart::amounts_over_time(ChartKind::Line, "t", []).unwrap();
        assert!(chart.points.is_empty());
    }
}
