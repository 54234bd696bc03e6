//! Moon age from a calendar date.
//!
//! A closed-form day-count approximation, not an ephemeris. The result is an
//! integer in `0..=29` that drives the tide-strength model; it is not meant to
//! agree with astronomical new/full moon times to better than a day or two.

use chrono::{Datelike, NaiveDate};

/// Compute the moon age for `date`.
///
/// January and February are treated as months 13 and 14 of the previous
/// year. Every intermediate term is non-negative for dates after year 0, so
/// integer division truncates exactly like a float `floor`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tairaba_forecast_lib::lunar::moon_age;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
/// assert_eq!(moon_age(date), 4);
/// ```
pub fn moon_age(date: NaiveDate) -> u8 {
    let (mut year, mut month) = (date.year(), date.month() as i32);
    if month < 3 {
        year -= 1;
        month += 12;
    }
    let p = year.div_euclid(4);
    let age = (year + p + month * 9 / 25 + date.day() as i32 + 11).rem_euclid(30);
    age as u8
}
