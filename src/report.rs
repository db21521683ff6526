use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Summary, NO_DATA_MESSAGE};

pub fn build_report(summary: &Summary, generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Lifestyle Survey Results");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);

    let report = match summary {
        Summary::NoData => {
            let _ = writeln!(output, "{NO_DATA_MESSAGE}");
            return output;
        }
        Summary::Report(report) => report,
    };

    let _ = writeln!(output, "## Respondents");
    let _ = writeln!(output, "- Total number of surveys: {}", report.total_surveys);
    let _ = writeln!(output, "- Average age: {}", report.average_age);
    let _ = writeln!(
        output,
        "- Oldest person who participated in survey: {}",
        report.oldest
    );
    let _ = writeln!(
        output,
        "- Youngest person who participated in survey: {}",
        report.youngest
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Food Preferences");
    let _ = writeln!(output, "- Pizza: {}%", report.pizza_percent);
    let _ = writeln!(output, "- Pasta: {}%", report.pasta_percent);
    let _ = writeln!(output, "- Pap and Wors: {}%", report.pap_wors_percent);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Ratings");
    let _ = writeln!(output, "1 = strongly agree, 5 = strongly disagree");
    let _ = writeln!(output);
    let _ = writeln!(output, "- I like to watch movies: {}", report.movies_rating);
    let _ = writeln!(output, "- I like to listen to radio: {}", report.radio_rating);
    let _ = writeln!(output, "- I like to eat out: {}", report.eat_out_rating);
    let _ = writeln!(output, "- I like to watch TV: {}", report.tv_rating);

    output
}
