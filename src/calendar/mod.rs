pub mod calculator;
pub mod metrics;

pub use calculator::{
    compute_period, compute_period_bounds, compute_period_for_month, is_within, period_name,
    PeriodSelector,
};
pub use metrics::{count_saturdays, count_weekday, days_inclusive, days_remaining};
