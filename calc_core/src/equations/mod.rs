//! # Equations
//!
//! The formulas behind every calculator, kept as plain functions over `f64`
//! and `NaiveDate` so they can be checked against their references in
//! isolation. Nothing here validates input or rounds output; the
//! [`calculations`](crate::calculations) layer does both.
//!
//! ## Modules
//!
//! - [`descriptive`] - Means, median, mode, variance, quantiles, paired sums
//! - [`distribution`] - erf, normal CDF, Student's t p-values
//! - [`finance`] - Compound growth, annuities, ROI, CAGR
//! - [`calendar`] - Leap years, ISO weeks, anniversaries, clock spans
//!
//! ## References
//!
//! - Abramowitz & Stegun, Handbook of Mathematical Functions (1964)
//! - ISO 8601-1:2019 Date and time representations
//! - Hyndman & Fan, "Sample Quantiles in Statistical Packages" (1996)

pub mod calendar;
pub mod descriptive;
pub mod distribution;
pub mod finance;

// Re-export commonly used items
pub use calendar::{
    anniversary_in_year,
    clock_span_minutes,
    completed_years,
    days_in_month,
    days_in_year,
    is_leap_year,
    iso_week,
    iso_weeks_in_year,
    next_anniversary,
    week_bounds,
    weekdays_between,
    years_months_days,
};

pub use descriptive::{
    geometric_mean,
    harmonic_mean,
    mean,
    median_of_sorted,
    modes,
    paired_sums,
    population_variance,
    quantile_of_sorted,
    sample_variance,
    sorted,
    weighted_mean,
    PairedSums,
};

pub use distribution::{
    erf,
    normal_cdf,
    student_t_two_tailed,
    tail_probabilities,
    TailProbabilities,
};

pub use finance::{
    annuity_future_value,
    cagr_percent,
    effective_annual_rate,
    future_value,
    growth_factor,
    rate_per_contribution,
    roi_percent,
};
