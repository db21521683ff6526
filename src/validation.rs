//! Turns a raw submission into a [`NewSurvey`].
//!
//! Food flags follow JSON truthiness, ratings must be whole numbers. The
//! strict checks mirror what the survey form enforces in the browser and
//! only run when the server is started with `--strict`.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::{NewSurvey, SurveySubmission};
use crate::stats;

pub const MIN_AGE: i64 = 5;
pub const MAX_AGE: i64 = 120;

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn rating(value: &Value, field: &'static str) -> Result<i64, ValidationError> {
    value.as_i64().ok_or(ValidationError::Rating { field })
}

pub fn decode(submission: SurveySubmission) -> Result<NewSurvey, ValidationError> {
    Ok(NewSurvey {
        movies_rating: rating(&submission.movies_rating, "movies_rating")?,
        radio_rating: rating(&submission.radio_rating, "radio_rating")?,
        eat_out_rating: rating(&submission.eat_out_rating, "eat_out_rating")?,
        tv_rating: rating(&submission.tv_rating, "tv_rating")?,
        fav_food_pizza: is_truthy(&submission.fav_food_pizza),
        fav_food_pasta: is_truthy(&submission.fav_food_pasta),
        fav_food_pap_wors: is_truthy(&submission.fav_food_pap_wors),
        fav_food_other: is_truthy(&submission.fav_food_other),
        full_name: submission.full_name,
        email: submission.email,
        date_of_birth: submission.date_of_birth,
        contact_number: submission.contact_number,
    })
}

/// Form-level checks: required text present, plausible age, every rating
/// picked.
pub fn check_form(survey: &NewSurvey, today: NaiveDate) -> Result<(), ValidationError> {
    let required = [
        &survey.full_name,
        &survey.email,
        &survey.date_of_birth,
        &survey.contact_number,
    ];
    if required
        .iter()
        .any(|field| field.as_deref().is_none_or(|text| text.trim().is_empty()))
    {
        return Err(ValidationError::MissingFields);
    }

    let age = survey
        .date_of_birth
        .as_deref()
        .and_then(stats::parse_birth_date)
        .map(|birth| stats::age_on(birth, today));
    match age {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => {}
        _ => return Err(ValidationError::AgeOutOfRange),
    }

    let ratings = [
        survey.movies_rating,
        survey.radio_rating,
        survey.eat_out_rating,
        survey.tv_rating,
    ];
    if ratings.contains(&0) {
        return Err(ValidationError::UnsetRating);
    }

    Ok(())
}
