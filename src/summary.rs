//! Per-day and per-range summary records for a weather station.

use serde::Serialize;

/// Summary statistics extracted from one station's page for one calendar day.
///
/// Every field is optional: a page that lacks a value, or formats it in a way
/// the extractor cannot read, yields `None` rather than a sentinel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailySummary {
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_gust: Option<f64>,
    pub sum_prec: Option<f64>,
}

impl DailySummary {
    /// True when no field carried a value.
    pub fn is_empty(&self) -> bool {
        self.max_temp.is_none()
            && self.min_temp.is_none()
            && self.max_gust.is_none()
            && self.sum_prec.is_none()
    }
}

/// Summary statistics for one station across the whole configured date range.
///
/// Built by folding each day's [`DailySummary`] into the running record.
/// A field stays `None` only if no day contributed a value for it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AggregateSummary {
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_gust: Option<f64>,
    pub sum_prec: Option<f64>,
}

impl AggregateSummary {
    /// Folds one day's summary into the aggregate.
    ///
    /// `max_temp`, `max_gust` and `sum_prec` keep the larger value seen so
    /// far; `min_temp` keeps the smaller. `SumPrec` keeps the highest
    /// cumulative precipitation reading observed, it is not a sum of daily
    /// deltas. Absent daily fields leave the aggregate untouched, so the
    /// fold is idempotent and order-independent.
    pub fn fold(mut self, daily: &DailySummary) -> Self {
        self.max_temp = keep_max(self.max_temp, daily.max_temp);
        self.min_temp = keep_min(self.min_temp, daily.min_temp);
        self.max_gust = keep_max(self.max_gust, daily.max_gust);
        self.sum_prec = keep_max(self.sum_prec, daily.sum_prec);
        self
    }
}

fn keep_max(current: Option<f64>, incoming: Option<f64>) -> Option<f64> {
    match (current, incoming) {
        (Some(c), Some(i)) => Some(c.max(i)),
        (None, Some(i)) => Some(i),
        (c, None) => c,
    }
}

fn keep_min(current: Option<f64>, incoming: Option<f64>) -> Option<f64> {
    match (current, incoming) {
        (Some(c), Some(i)) => Some(c.min(i)),
        (None, Some(i)) => Some(i),
        (c, None) => c,
    }
}
