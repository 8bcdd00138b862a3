use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::series::LineDatum;
use crate::error::{ChartError, ChartResult};

/// Vertical distance between a y grid line and its label baseline.
pub const Y_TICK_LABEL_OFFSET_PX: f64 = 12.0;

/// Continuous linear mapping from a value domain to a pixel range.
///
/// A degenerate domain (`start == end`) maps every input to the range start
/// instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        for value in [domain.0, domain.1, range.0, range.1] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "scale domain and range must be finite".to_owned(),
                ));
            }
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            round: false,
        })
    }

    /// Rounds every mapped output to whole pixels.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 || !value.is_finite() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / span;
        let mapped = self.range_start + normalized * (self.range_end - self.range_start);
        if self.round { mapped.round() } else { mapped }
    }
}

/// Continuous time scale spanning the first and last date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(time.timestamp_millis() as f64)
    }

    /// Domain bounds in unix milliseconds.
    #[must_use]
    pub fn domain_millis(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }
}

/// Builds the line-chart x scale over `[min date, max date] -> [0, width]`.
///
/// With zero or one date the domain collapses and every date maps to `0`;
/// callers center lone points with [`crate::core::x_offset`].
pub fn x_line_scale(dates: &[DateTime<Utc>], width: f64) -> ChartResult<TimeScale> {
    let millis = dates.iter().map(|date| date.timestamp_millis());
    let (min, max) = match (millis.clone().min(), millis.max()) {
        (Some(min), Some(max)) => (min as f64, max as f64),
        _ => (0.0, 0.0),
    };
    let linear = LinearScale::new((min, max), (0.0, width))?.rounded();
    Ok(TimeScale { linear })
}

/// Builds the inverted value scale `[0, y_max] -> [height, 0]`.
pub fn y_scale(height: f64, y_max: f64) -> ChartResult<LinearScale> {
    Ok(LinearScale::new((0.0, y_max), (height, 0.0))?.rounded())
}

/// Same mapping as [`y_scale`], shifted down to the tick label baseline.
pub fn y_tick_offset(height: f64, y_max: f64) -> ChartResult<LinearScale> {
    Ok(LinearScale::new(
        (0.0, y_max),
        (height + Y_TICK_LABEL_OFFSET_PX, Y_TICK_LABEL_OFFSET_PX),
    )?
    .rounded())
}

/// Largest single value across every series and date, never below zero.
#[must_use]
pub fn y_max(line_data: &[LineDatum]) -> f64 {
    line_data
        .iter()
        .flat_map(|datum| datum.values.iter().map(|value| value.value))
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |max| max.0.max(0.0))
}

/// Horizontal grid values: `0`, a third, two thirds and `y_max`, rounded.
#[must_use]
pub fn y_ticks(y_max: f64) -> SmallVec<[f64; 4]> {
    let mut ticks = SmallVec::new();
    for step in 0..4 {
        let tick = (f64::from(step) / 3.0 * y_max).round();
        if ticks.last() != Some(&tick) {
            ticks.push(tick);
        }
    }
    ticks
}
