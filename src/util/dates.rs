//! Project date display.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::macros::format_description;
use time::{Date, Month};

use crate::error::FolioError;

/// Rewrite a project date as `Mon YYYY`.
///
/// Accepts ISO `YYYY-MM-DD` and `YYYY-MM`, a month name with a year
/// (`March 2024`, `Mar 2024`), and a bare year, which reads as January.
///
/// # Errors
///
/// Returns [`FolioError::Date`] when `raw` is none of those forms.
pub fn format_project_date(raw: &str) -> Result<String, FolioError> {
    let raw = raw.trim();
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| parse_year_month(raw))
        .or_else(|| parse_month_name_year(raw))
        .or_else(|| Date::from_calendar_date(parse_year(raw)?, Month::January, 1).ok())
        .ok_or_else(|| FolioError::Date(raw.to_owned()))?;
    date.format(format_description!("[month repr:short] [year]"))
        .map_err(|err| FolioError::Date(err.to_string()))
}

fn parse_year(raw: &str) -> Option<i32> {
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_year_month(raw: &str) -> Option<Date> {
    let (year, month) = raw.split_once('-')?;
    if month.len() != 2 {
        return None;
    }
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    Date::from_calendar_date(parse_year(year)?, month, 1).ok()
}

fn parse_month_name_year(raw: &str) -> Option<Date> {
    let (name, year) = raw.split_once(char::is_whitespace)?;
    let month = month_named(name.trim_end_matches(['.', ',']))?;
    Date::from_calendar_date(parse_year(year.trim())?, month, 1).ok()
}

/// Full or three-letter English month name, any case.
fn month_named(name: &str) -> Option<Month> {
    let mut month = Month::January;
    for _ in 0..12 {
        let full = month.to_string();
        if name.eq_ignore_ascii_case(&full) || (name.len() == 3 && full[..3].eq_ignore_ascii_case(name)) {
            return Some(month);
        }
        month = month.next();
    }
    None
}
