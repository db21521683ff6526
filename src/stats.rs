use chrono::{DateTime, Datelike, Local, NaiveDate};

use crate::models::{Rounded, Stat, Summary, SurveyRecord, SurveyReport};

/// Parses a stored date of birth. Accepts plain calendar dates as sent by the
/// form and full RFC 3339 timestamps.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Whole years between `birth` and `today`, one less when this year's
/// birthday is still ahead.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn age_of(record: &SurveyRecord, today: NaiveDate) -> Option<i64> {
    parse_birth_date(&record.date_of_birth).map(|birth| age_on(birth, today))
}

pub fn summarize_now(records: &[SurveyRecord]) -> Summary {
    summarize(records, Local::now().date_naive())
}

pub fn summarize(records: &[SurveyRecord], today: NaiveDate) -> Summary {
    if records.is_empty() {
        return Summary::NoData;
    }

    let total = records.len();
    let ages: Vec<i64> = records
        .iter()
        .filter_map(|record| age_of(record, today))
        .collect();

    let (average_age, oldest, youngest) = match (ages.iter().max(), ages.iter().min()) {
        (Some(&max), Some(&min)) => {
            let sum: f64 = ages.iter().map(|&age| age as f64).sum();
            (
                Stat::Value(Rounded::new(sum / ages.len() as f64)),
                Stat::Value(max),
                Stat::Value(min),
            )
        }
        _ => (Stat::NotApplicable, Stat::NotApplicable, Stat::NotApplicable),
    };

    let percent = |likes: fn(&SurveyRecord) -> bool| {
        let fans = records.iter().filter(|record| likes(record)).count();
        Rounded::new(fans as f64 / total as f64 * 100.0)
    };

    let mean = |rating: fn(&SurveyRecord) -> i64| {
        let sum: f64 = records.iter().map(|record| rating(record) as f64).sum();
        Rounded::new(sum / total as f64)
    };

    Summary::Report(SurveyReport {
        total_surveys: total,
        average_age,
        oldest,
        youngest,
        pizza_percent: percent(SurveyRecord::likes_pizza),
        pasta_percent: percent(SurveyRecord::likes_pasta),
        pap_wors_percent: percent(SurveyRecord::likes_pap_wors),
        movies_rating: mean(|r| r.movies_rating),
        radio_rating: mean(|r| r.radio_rating),
        eat_out_rating: mean(|r| r.eat_out_rating),
        tv_rating: mean(|r| r.tv_rating),
    })
}
