//! US grade level to reader age.
//!
//! Age relates linearly to US school grade: first graders are six.

/// Years between a US grade number and the typical age of its pupils.
const GRADE_TO_AGE_OFFSET: f64 = 5.0;

/// Minimum reader age for a US grade level, rounded half up.
///
/// `6.5 -> 12`, `7 -> 12`, `7.5 -> 13`. Negative or absurd grades are not
/// validated.
pub fn minimum_age_from_us_grade(grade: f64) -> i64 {
    // saturating float->int cast; NaN maps to 0
    (grade + GRADE_TO_AGE_OFFSET + 0.5).floor() as i64
}
