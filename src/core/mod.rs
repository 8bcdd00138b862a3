//! Pure data normalization, scales and layout decisions.
//!
//! Nothing here holds state between calls; every function is a deterministic
//! mapping from rows and pixel sizes to geometry inputs.

pub mod band_scale;
pub mod date_space;
pub mod layout;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod types;

pub use band_scale::{BandScale, x_group_scale, x_scale};
pub use date_space::{DateSpace, DateSpaceValue, date_spaces};
pub use layout::{
    ChartLayout, columns_per_date, computed_width, dot_radius, should_be_compact,
    show_point_markers, stroke_width, x_offset,
};
pub use scale::{LinearScale, TimeScale, x_line_scale, y_max, y_scale, y_tick_offset, y_ticks};
pub use series::{
    DateParser, LineDatum, LineValue, OrderedKey, SeriesRow, SeriesValue, line_data,
    ordered_keys, unique_dates, unique_keys,
};
pub use ticks::{max_x_ticks, x_ticks};
pub use types::{ChartMode, ChartType, Interval, Margin, TooltipPlacement};
