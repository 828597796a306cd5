use chrono::NaiveDate;
use pda_kie_core::{Connection, Frequency, TrendSample};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::summary::{RequestsSummary, percentage_annual, percentage_daily, percentage_monthly};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample(y: i32, m: u32, d: u32, count: f64) -> TrendSample {
    TrendSample { period_start: date(y, m, d), count }
}

mod trend_math {
    use super::*;

    #[test]
    fn daily_full_day_of_silence_is_minus_100() {
        let today = date(2026, 8, 26);
        let pct = percentage_daily(today, sample(2026, 8, 25, 5.0), None);
        assert_eq!(pct, -100.0);
    }

    #[test]
    fn daily_silence_with_zero_count_is_no_signal() {
        let today = date(2026, 8, 26);
        assert_eq!(percentage_daily(today, sample(2026, 8, 25, 0.0), None), 0.0);
    }

    #[test]
    fn daily_gap_longer_than_one_day_is_no_signal() {
        let today = date(2026, 8, 26);
        assert_eq!(percentage_daily(today, sample(2026, 8, 20, 5.0), None), 0.0);
    }

    #[test]
    fn daily_consecutive_days_give_relative_delta() {
        let today = date(2026, 8, 26);
        let pct = percentage_daily(
            today,
            sample(2026, 8, 26, 20.0),
            Some(sample(2026, 8, 25, 10.0)),
        );
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn daily_delta_divides_by_the_smaller_count() {
        let today = date(2026, 8, 26);
        let pct = percentage_daily(
            today,
            sample(2026, 8, 26, 5.0),
            Some(sample(2026, 8, 25, 10.0)),
        );
        assert_eq!(pct, -100.0);
    }

    #[test]
    fn daily_non_adjacent_previous_bucket_is_no_signal() {
        let today = date(2026, 8, 26);
        let pct = percentage_daily(
            today,
            sample(2026, 8, 26, 20.0),
            Some(sample(2026, 8, 20, 10.0)),
        );
        assert_eq!(pct, 0.0);
    }

    #[test]
    fn daily_today_without_previous_bucket_is_no_signal() {
        let today = date(2026, 8, 26);
        assert_eq!(percentage_daily(today, sample(2026, 8, 26, 20.0), None), 0.0);
    }

    #[test]
    fn monthly_consecutive_months_give_relative_delta() {
        let today = date(2026, 8, 15);
        let pct = percentage_monthly(
            today,
            sample(2026, 8, 1, 20.0),
            Some(sample(2026, 7, 1, 10.0)),
        );
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn monthly_full_month_of_silence_is_minus_100() {
        let today = date(2026, 8, 15);
        assert_eq!(percentage_monthly(today, sample(2026, 7, 1, 12.0), None), -100.0);
    }

    #[test]
    fn monthly_two_month_gap_is_no_signal() {
        let today = date(2026, 8, 15);
        assert_eq!(percentage_monthly(today, sample(2026, 6, 1, 12.0), None), 0.0);
    }

    #[test]
    fn monthly_compares_buckets_by_month_not_by_day() {
        // Mid-month "today" still matches an August bucket.
        let today = date(2026, 8, 31);
        let pct = percentage_monthly(
            today,
            sample(2026, 8, 1, 10.0),
            Some(sample(2026, 7, 1, 20.0)),
        );
        assert_eq!(pct, -100.0);
    }

    #[test]
    fn annual_consecutive_years_give_relative_delta() {
        let today = date(2026, 8, 26);
        let pct = percentage_annual(
            today,
            sample(2026, 1, 1, 30.0),
            Some(sample(2025, 1, 1, 10.0)),
        );
        assert_eq!(pct, 200.0);
    }

    #[test]
    fn annual_full_year_of_silence_is_minus_100() {
        let today = date(2026, 8, 26);
        assert_eq!(percentage_annual(today, sample(2025, 1, 1, 10.0), None), -100.0);
    }

    #[test]
    fn annual_older_latest_bucket_is_no_signal() {
        let today = date(2026, 8, 26);
        assert_eq!(percentage_annual(today, sample(2023, 1, 1, 10.0), None), 0.0);
    }
}

mod summary_flow {
    use super::*;

    fn connection_to(server: &MockServer) -> Connection {
        Connection::new(server.uri(), "kie-admin", "secret")
    }

    async fn mount_query(server: &MockServer, name: &str, rows: serde_json::Value) {
        Mock::given(method("PUT"))
            .and(path(format!("/queries/definitions/{name}")))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/queries/definitions/{name}/data")))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn averages_total_over_the_active_day_span() {
        let server = MockServer::start().await;
        // 2026-01-01T12:00Z to 2026-01-04T12:00Z: three complete days.
        mount_query(
            &server,
            "pda-total-requests",
            serde_json::json!([[1_767_268_800_000_i64, 1_767_528_000_000_i64, 30.0]]),
        )
        .await;
        mount_query(&server, "pda-perc-days-requests", serde_json::json!([])).await;

        let summary = RequestsSummary
            .calculate_at(&connection_to(&server), Frequency::Daily, date(2026, 8, 26))
            .await
            .unwrap();

        assert_eq!(summary.title, "Requests");
        assert_eq!(summary.total_label, "Total requests");
        assert_eq!(summary.total, "10");
        assert_eq!(summary.percentage, 0.0);
    }

    #[tokio::test]
    async fn reports_raw_total_when_activity_fits_one_period() {
        let server = MockServer::start().await;
        mount_query(
            &server,
            "pda-total-requests",
            serde_json::json!([[1_767_268_800_000_i64, 1_767_268_800_000_i64, 7.0]]),
        )
        .await;
        mount_query(&server, "pda-perc-days-requests", serde_json::json!([])).await;

        let summary = RequestsSummary
            .calculate_at(&connection_to(&server), Frequency::Daily, date(2026, 8, 26))
            .await
            .unwrap();

        assert_eq!(summary.total, "7");
    }

    #[tokio::test]
    async fn empty_total_rows_produce_a_zero_card() {
        let server = MockServer::start().await;
        mount_query(&server, "pda-total-requests", serde_json::json!([])).await;
        mount_query(&server, "pda-perc-months-requests", serde_json::json!([])).await;

        let summary = RequestsSummary
            .calculate_at(&connection_to(&server), Frequency::Monthly, date(2026, 8, 26))
            .await
            .unwrap();

        assert_eq!(summary.total, "0");
        assert_eq!(summary.percentage, 0.0);
    }

    #[tokio::test]
    async fn monthly_trend_compares_the_two_most_recent_buckets() {
        let server = MockServer::start().await;
        mount_query(&server, "pda-total-requests", serde_json::json!([])).await;
        // Rows ordered most-recent-first: [month, year, count].
        mount_query(
            &server,
            "pda-perc-months-requests",
            serde_json::json!([[8.0, 2026.0, 20.0], [7.0, 2026.0, 10.0]]),
        )
        .await;

        let summary = RequestsSummary
            .calculate_at(&connection_to(&server), Frequency::Monthly, date(2026, 8, 15))
            .await
            .unwrap();

        assert_eq!(summary.percentage, 100.0);
    }

    #[tokio::test]
    async fn daily_trend_flags_a_stopped_day() {
        let server = MockServer::start().await;
        mount_query(&server, "pda-total-requests", serde_json::json!([])).await;
        // [day, month, year, count]: all activity was yesterday.
        mount_query(
            &server,
            "pda-perc-days-requests",
            serde_json::json!([[25.0, 8.0, 2026.0, 5.0]]),
        )
        .await;

        let summary = RequestsSummary
            .calculate_at(&connection_to(&server), Frequency::Daily, date(2026, 8, 26))
            .await
            .unwrap();

        assert_eq!(summary.percentage, -100.0);
    }

    #[tokio::test]
    async fn annual_trend_uses_year_buckets() {
        let server = MockServer::start().await;
        mount_query(&server, "pda-total-requests", serde_json::json!([])).await;
        mount_query(
            &server,
            "pda-perc-years-requests",
            serde_json::json!([[2026.0, 30.0], [2025.0, 10.0]]),
        )
        .await;

        let summary = RequestsSummary
            .calculate_at(&connection_to(&server), Frequency::Annually, date(2026, 8, 26))
            .await
            .unwrap();

        assert_eq!(summary.percentage, 200.0);
    }
}
