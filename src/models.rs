use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One persisted survey row, as read back from the `surveys` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub contact_number: String,
    pub fav_food_pizza: i64,
    pub fav_food_pasta: i64,
    pub fav_food_pap_wors: i64,
    pub fav_food_other: i64,
    pub movies_rating: i64,
    pub radio_rating: i64,
    pub eat_out_rating: i64,
    pub tv_rating: i64,
}

impl SurveyRecord {
    pub fn likes_pizza(&self) -> bool {
        self.fav_food_pizza == 1
    }

    pub fn likes_pasta(&self) -> bool {
        self.fav_food_pasta == 1
    }

    pub fn likes_pap_wors(&self) -> bool {
        self.fav_food_pap_wors == 1
    }
}

/// A decoded submission waiting to be appended. Text fields stay optional so
/// that a missing value reaches the table as NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSurvey {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
    pub fav_food_pizza: bool,
    pub fav_food_pasta: bool,
    pub fav_food_pap_wors: bool,
    pub fav_food_other: bool,
    pub movies_rating: i64,
    pub radio_rating: i64,
    pub eat_out_rating: i64,
    pub tv_rating: i64,
}

/// Raw body of `POST /api/survey`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveySubmission {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
    #[serde(default)]
    pub fav_food_pizza: Value,
    #[serde(default)]
    pub fav_food_pasta: Value,
    #[serde(default)]
    pub fav_food_pap_wors: Value,
    #[serde(default)]
    pub fav_food_other: Value,
    #[serde(default)]
    pub movies_rating: Value,
    #[serde(default)]
    pub radio_rating: Value,
    #[serde(default)]
    pub eat_out_rating: Value,
    #[serde(default)]
    pub tv_rating: Value,
}

/// A value rounded to one decimal place, serialized as text (`"30.0"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounded(f64);

impl Rounded {
    /// Rounds half away from zero, like `toFixed(1)` in the survey front end.
    pub fn new(value: f64) -> Self {
        // Only multiples of a quarter can sit exactly on a tie; `{:.1}` rounds
        // every other double from its exact decimal expansion.
        let quarters = value * 4.0;
        if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
            return Self((value * 10.0).round() / 10.0);
        }
        Self(format!("{value:.1}").parse().unwrap_or(value))
    }
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Rounded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A statistic that may have no inputs to be computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stat<T> {
    Value(T),
    NotApplicable,
}

impl<T: fmt::Display> fmt::Display for Stat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Value(value) => fmt::Display::fmt(value, f),
            Stat::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl<T: Serialize> Serialize for Stat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stat::Value(value) => value.serialize(serializer),
            Stat::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyReport {
    #[serde(rename = "totalSurveys number of surveys")]
    pub total_surveys: usize,
    #[serde(rename = "Average Age")]
    pub average_age: Stat<Rounded>,
    #[serde(rename = "Oldest person who participated in survey")]
    pub oldest: Stat<i64>,
    #[serde(rename = "Youngest person who participated in survey")]
    pub youngest: Stat<i64>,
    #[serde(rename = "Percentage of people who like Pizza")]
    pub pizza_percent: Rounded,
    #[serde(rename = "Percentage of people who like Pasta")]
    pub pasta_percent: Rounded,
    #[serde(rename = "Percentage of people who like Pap and Wors")]
    pub pap_wors_percent: Rounded,
    #[serde(rename = "People who like to watch movies")]
    pub movies_rating: Rounded,
    #[serde(rename = "People like to listen to radio")]
    pub radio_rating: Rounded,
    #[serde(rename = "People like to eat out")]
    pub eat_out_rating: Rounded,
    #[serde(rename = "People like to watch TV")]
    pub tv_rating: Rounded,
}

/// Outcome of aggregating the stored surveys.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    NoData,
    Report(SurveyReport),
}

pub const NO_DATA_MESSAGE: &str = "No Surveys completed yet.";
