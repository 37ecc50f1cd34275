use chrono::NaiveTime;

/// Hours between two times of the same day, rounded to the nearest whole hour.
///
/// Halves round up. The result is zero or negative when `end <= start`; callers
/// validate the range first.
pub fn work_hours(start: NaiveTime, end: NaiveTime) -> i64 {
    let minutes = (end - start).num_minutes();
    (minutes + 30).div_euclid(60)
}

/// Earnings for a number of hours at an hourly rate
pub fn earnings(hours: u32, hourly_rate: f64) -> f64 {
    f64::from(hours) * hourly_rate
}
