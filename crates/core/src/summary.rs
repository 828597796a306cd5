use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trend bucket granularity for summary cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Monthly,
    Annually,
}

/// One period bucket from a trend query: the bucket's start date and how
/// many records fell into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSample {
    pub period_start: NaiveDate,
    pub count: f64,
}

/// Summary card computed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub title: String,
    pub total_label: String,
    pub total: String,
    pub percentage: f64,
}
