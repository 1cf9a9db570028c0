// src/common/params.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: i64 = 50;

// Parâmetros comuns de listagem: limite + intervalo de datas inclusivo.
// `limit=0` significa literalmente zero linhas, não "sem limite".
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(0)
    }

    // Limite inferior: meia-noite do dia inicial, em UTC.
    pub fn start_bound(&self) -> Option<DateTime<Utc>> {
        self.start_date.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    // Limite superior EXCLUSIVO: meia-noite do dia seguinte ao final.
    // Assim o dia final inteiro fica dentro do intervalo.
    pub fn end_bound(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .map(|d| (d + Duration::days(1)).and_time(NaiveTime::MIN).and_utc())
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self { limit: None, start_date: None, end_date: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn omitted_limit_defaults_to_fifty() {
        let params = ListParams::default();
        assert_eq!(params.limit(), 50);
    }

    #[test]
    fn zero_limit_means_zero_rows() {
        let params = ListParams { limit: Some(0), ..Default::default() };
        assert_eq!(params.limit(), 0);
    }

    #[test]
    fn bounds_cover_the_whole_end_day() {
        let params = ListParams {
            limit: None,
            start_date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()),
        };
        assert_eq!(
            params.start_bound().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        // Exclusivo na meia-noite do dia 11: 10/03 23:59:59 ainda entra.
        assert_eq!(
            params.end_bound().unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn open_ranges_have_no_bounds() {
        let params = ListParams::default();
        assert!(params.start_bound().is_none());
        assert!(params.end_bound().is_none());
    }
}
