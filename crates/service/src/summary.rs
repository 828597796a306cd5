//! Requests summary card: total-per-period plus a period-over-period trend.
//!
//! Both numbers come from ad-hoc queries registered against the engine's
//! persistence datasource. The trend signal is deliberately conservative: a
//! gap of exactly one full period after recorded activity is an explicit
//! "activity stopped" alarm (-100), two consecutive periods give a relative
//! delta, and anything else (longer gaps, no prior bucket) reads as no
//! signal rather than an error. The boundary checks are exact on purpose.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use pda_kie_client::{KieClient, QueryDefinition, RAW_LIST_MAPPER};
use pda_kie_core::{Connection, Frequency, Summary, TrendSample};
use serde_json::Value;

use crate::KIE_SERVER_PERSISTENCE_DS;
use crate::error::ServiceError;

pub const PDA_TOTAL_PREFIX: &str = "pda-total-";
pub const PDA_PERC_DAYS_PREFIX: &str = "pda-perc-days-";
pub const PDA_PERC_MONTHS_PREFIX: &str = "pda-perc-months-";
pub const PDA_PERC_YEARS_PREFIX: &str = "pda-perc-years-";

const SUMMARY_ID: &str = "requests";
const SUMMARY_TITLE: &str = "Requests";
const TOTAL_LABEL: &str = "Total requests";

const TOTAL_QUERY: &str =
    "SELECT min(startdate) as first_date, max(startdate) as end_date, count(*) as total\n\
     FROM processinstanceinfo\n";

const PERC_DAYS_QUERY: &str =
    "SELECT day(startdate) as day, month(startdate) as month, year(startdate) as year, count(*) as total\n\
     FROM processinstanceinfo\n\
     GROUP BY day, month, year\n\
     ORDER BY year DESC, month DESC, day DESC\n\
     LIMIT 2\n";

const PERC_MONTHS_QUERY: &str =
    "SELECT month(startdate) as month, year(startdate) as year, count(*) as total\n\
     FROM processinstanceinfo\n\
     GROUP BY month, year\n\
     ORDER BY year DESC, month DESC\n\
     LIMIT 2\n";

const PERC_YEARS_QUERY: &str =
    "SELECT year(startdate) as year, count(*) as total\n\
     FROM processinstanceinfo\n\
     GROUP BY year\n\
     ORDER BY year DESC\n\
     LIMIT 2\n";

/// Summary type for the dashboard's "Requests" card.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestsSummary;

impl RequestsSummary {
    #[must_use]
    pub fn id(&self) -> &'static str {
        SUMMARY_ID
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        SUMMARY_TITLE
    }

    /// Computes the card for the given bucket granularity.
    pub async fn calculate(
        &self,
        connection: &Connection,
        frequency: Frequency,
    ) -> Result<Summary, ServiceError> {
        self.calculate_at(connection, frequency, Local::now().date_naive()).await
    }

    /// Like [`calculate`](Self::calculate) with an explicit "today", so the
    /// exact-gap trend checks are reproducible.
    pub async fn calculate_at(
        &self,
        connection: &Connection,
        frequency: Frequency,
        today: NaiveDate,
    ) -> Result<Summary, ServiceError> {
        let client = KieClient::new(connection).map_err(ServiceError::Client)?;
        let total = self.total(&client, frequency).await?;
        let percentage = self.percentage(&client, frequency, today).await?;
        Ok(Summary {
            title: SUMMARY_TITLE.to_owned(),
            total_label: TOTAL_LABEL.to_owned(),
            total: total.to_string(),
            percentage,
        })
    }

    /// Total count averaged over the complete periods between first and last
    /// activity; the raw count when everything falls inside one period.
    async fn total(&self, client: &KieClient, frequency: Frequency) -> Result<f64, ServiceError> {
        let name = format!("{PDA_TOTAL_PREFIX}{SUMMARY_ID}");
        let rows = self.run(client, &name, TOTAL_QUERY).await?;
        let Some(row) = rows.first() else {
            return Ok(0.0);
        };
        let first = date_from_millis(col_millis(row, 0)?)?;
        let last = date_from_millis(col_millis(row, 1)?)?;
        let total = col_f64(row, 2)?;
        let span = match frequency {
            Frequency::Daily => (last - first).num_days(),
            Frequency::Monthly => months_between(first, last),
            Frequency::Annually => years_between(first, last),
        };
        Ok(if span > 0 { total / span as f64 } else { total })
    }

    async fn percentage(
        &self,
        client: &KieClient,
        frequency: Frequency,
        today: NaiveDate,
    ) -> Result<f64, ServiceError> {
        let (name, query) = match frequency {
            Frequency::Daily => (format!("{PDA_PERC_DAYS_PREFIX}{SUMMARY_ID}"), PERC_DAYS_QUERY),
            Frequency::Monthly => {
                (format!("{PDA_PERC_MONTHS_PREFIX}{SUMMARY_ID}"), PERC_MONTHS_QUERY)
            },
            Frequency::Annually => {
                (format!("{PDA_PERC_YEARS_PREFIX}{SUMMARY_ID}"), PERC_YEARS_QUERY)
            },
        };
        let rows = self.run(client, &name, query).await?;
        let Some(first_row) = rows.first() else {
            return Ok(0.0);
        };
        let latest = parse_bucket(frequency, first_row)?;
        let previous = rows.get(1).map(|row| parse_bucket(frequency, row)).transpose()?;
        Ok(match frequency {
            Frequency::Daily => percentage_daily(today, latest, previous),
            Frequency::Monthly => percentage_monthly(today, latest, previous),
            Frequency::Annually => percentage_annual(today, latest, previous),
        })
    }

    async fn run(
        &self,
        client: &KieClient,
        name: &str,
        query: &str,
    ) -> Result<Vec<Vec<Value>>, ServiceError> {
        let definition = QueryDefinition::custom(name, KIE_SERVER_PERSISTENCE_DS, query);
        client.replace_query(&definition).await.map_err(ServiceError::from_status)?;
        client.run_query(name, RAW_LIST_MAPPER, 0, -1).await.map_err(ServiceError::from_status)
    }
}

/// Daily trend. `-100` needs the latest bucket to be exactly yesterday; the
/// delta needs today's bucket with yesterday's right behind it.
pub(crate) fn percentage_daily(
    today: NaiveDate,
    latest: TrendSample,
    previous: Option<TrendSample>,
) -> f64 {
    let yesterday = today.checked_sub_days(Days::new(1));
    if today > latest.period_start {
        if yesterday == Some(latest.period_start) && latest.count > 0.0 {
            return -100.0;
        }
    } else if today == latest.period_start {
        if let Some(prev) = previous {
            if yesterday == Some(prev.period_start) && prev.count > 0.0 {
                return relative_delta(latest.count, prev.count);
            }
        }
    }
    0.0
}

/// Monthly trend; buckets compare by first-of-month.
pub(crate) fn percentage_monthly(
    today: NaiveDate,
    latest: TrendSample,
    previous: Option<TrendSample>,
) -> f64 {
    let this_month = first_of_month(today);
    let last_month = this_month.checked_sub_months(Months::new(1));
    let latest_month = first_of_month(latest.period_start);
    if this_month > latest_month {
        if last_month == Some(latest_month) && latest.count > 0.0 {
            return -100.0;
        }
    } else if this_month == latest_month {
        if let Some(prev) = previous {
            if last_month == Some(first_of_month(prev.period_start)) && prev.count > 0.0 {
                return relative_delta(latest.count, prev.count);
            }
        }
    }
    0.0
}

/// Annual trend; buckets compare by calendar year.
pub(crate) fn percentage_annual(
    today: NaiveDate,
    latest: TrendSample,
    previous: Option<TrendSample>,
) -> f64 {
    let this_year = today.year();
    let latest_year = latest.period_start.year();
    if this_year > latest_year {
        if this_year - 1 == latest_year && latest.count > 0.0 {
            return -100.0;
        }
    } else if this_year == latest_year {
        if let Some(prev) = previous {
            if this_year - 1 == prev.period_start.year() && prev.count > 0.0 {
                return relative_delta(latest.count, prev.count);
            }
        }
    }
    0.0
}

fn relative_delta(latest: f64, previous: f64) -> f64 {
    (latest - previous) / latest.min(previous) * 100.0
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Complete months between two dates, day-of-month aware.
fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12
        + i64::from(end.month() as i32 - start.month() as i32);
    if months > 0 && end.day() < start.day() {
        months -= 1;
    }
    months
}

/// Complete years between two dates.
fn years_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut years = i64::from(end.year() - start.year());
    if years > 0 && (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years
}

/// One trend row into a bucket. Column layout depends on frequency: daily
/// rows are `[day, month, year, count]`, monthly `[month, year, count]`,
/// annual `[year, count]`.
fn parse_bucket(frequency: Frequency, row: &[Value]) -> Result<TrendSample, ServiceError> {
    let (date, count) = match frequency {
        Frequency::Daily => {
            let day = col_u32(row, 0)?;
            let month = col_u32(row, 1)?;
            let year = col_i32(row, 2)?;
            (NaiveDate::from_ymd_opt(year, month, day), col_f64(row, 3)?)
        },
        Frequency::Monthly => {
            let month = col_u32(row, 0)?;
            let year = col_i32(row, 1)?;
            (NaiveDate::from_ymd_opt(year, month, 1), col_f64(row, 2)?)
        },
        Frequency::Annually => {
            let year = col_i32(row, 0)?;
            (NaiveDate::from_ymd_opt(year, 1, 1), col_f64(row, 1)?)
        },
    };
    let period_start = date.ok_or_else(|| {
        ServiceError::QueryResult(format!("row does not form a valid date: {row:?}"))
    })?;
    Ok(TrendSample { period_start, count })
}

fn col_f64(row: &[Value], idx: usize) -> Result<f64, ServiceError> {
    row.get(idx)
        .and_then(Value::as_f64)
        .ok_or_else(|| ServiceError::QueryResult(format!("missing numeric column {idx}: {row:?}")))
}

fn col_millis(row: &[Value], idx: usize) -> Result<i64, ServiceError> {
    let value = row
        .get(idx)
        .ok_or_else(|| ServiceError::QueryResult(format!("missing column {idx}: {row:?}")))?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .ok_or_else(|| ServiceError::QueryResult(format!("column {idx} is not a timestamp: {row:?}")))
}

fn col_u32(row: &[Value], idx: usize) -> Result<u32, ServiceError> {
    Ok(col_f64(row, idx)? as u32)
}

fn col_i32(row: &[Value], idx: usize) -> Result<i32, ServiceError> {
    Ok(col_f64(row, idx)? as i32)
}

fn date_from_millis(millis: i64) -> Result<NaiveDate, ServiceError> {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ServiceError::QueryResult(format!("timestamp out of range: {millis}")))
}
