use chrono::{DateTime, Datelike, Utc};

use crate::core::layout::{SMALL_BREAK_PX, WIDE_BREAK_PX};
use crate::core::types::{ChartMode, Interval};

/// Daily series this long get one tick per month.
pub const DAY_TICKS_THRESHOLD: usize = 63;
/// Weekly series this long get one tick per month.
pub const WEEK_TICKS_THRESHOLD: usize = 9;
/// Hourly time comparisons keep every tick up to this many points.
pub const MOST_HOURLY_POINTS: usize = 31;

/// Upper bound on x-axis ticks for a plot width.
#[must_use]
pub fn max_x_ticks(width: f64, mode: ChartMode) -> usize {
    if width <= SMALL_BREAK_PX {
        7
    } else if width <= WIDE_BREAK_PX || mode == ChartMode::ItemComparison {
        12
    } else {
        16
    }
}

/// Picks the dates that receive an x-axis tick.
///
/// Long daily and weekly ranges switch to month starts. Everything else is
/// thinned by the smallest constant stride that keeps both the first and the
/// last date within `max_x_ticks`.
#[must_use]
pub fn x_ticks(
    unique_dates: &[DateTime<Utc>],
    width: f64,
    mode: ChartMode,
    interval: Option<Interval>,
) -> Vec<DateTime<Utc>> {
    let max_ticks = max_x_ticks(width, mode);
    let count = unique_dates.len();

    let monthly = match interval {
        Some(Interval::Day) => count >= DAY_TICKS_THRESHOLD,
        Some(Interval::Week) => count >= WEEK_TICKS_THRESHOLD,
        _ => false,
    };
    if monthly {
        return thin(&first_date_per_month(unique_dates), max_ticks);
    }

    let hourly_comparison = interval == Some(Interval::Hour)
        && mode == ChartMode::TimeComparison
        && count <= MOST_HOURLY_POINTS;
    if hourly_comparison {
        return unique_dates.to_vec();
    }

    thin(unique_dates, max_ticks)
}

fn first_date_per_month(dates: &[DateTime<Utc>]) -> Vec<DateTime<Utc>> {
    let mut months = Vec::new();
    let mut last = None;
    for date in dates {
        let month = (date.year(), date.month());
        if last != Some(month) {
            months.push(*date);
            last = Some(month);
        }
    }
    months
}

fn thin(dates: &[DateTime<Utc>], max_ticks: usize) -> Vec<DateTime<Utc>> {
    if dates.len() <= max_ticks || max_ticks < 2 {
        return dates.to_vec();
    }
    let stride = tick_stride(dates.len(), max_ticks);
    dates.iter().step_by(stride).copied().collect()
}

/// Smallest stride that fits `max_ticks` and divides the gap count, so the
/// last date lands on a tick. The gap count divides itself, which bounds the
/// search.
fn tick_stride(count: usize, max_ticks: usize) -> usize {
    let gaps = count - 1;
    let minimum = gaps.div_ceil(max_ticks - 1);
    (minimum..=gaps)
        .find(|stride| gaps % stride == 0)
        .unwrap_or(gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_prefers_divisors_of_the_gap_count() {
        // 30 dates, 29 gaps (prime): only the full span keeps both ends.
        assert_eq!(tick_stride(30, 7), 29);
        // 31 dates, 30 gaps: stride 5 yields 7 ticks, first and last included.
        assert_eq!(tick_stride(31, 7), 5);
        assert_eq!(tick_stride(13, 12), 2);
    }
}
