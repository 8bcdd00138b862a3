use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Chart flavour: grouped bars per date, or one line per series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartType {
    Bar,
    Line,
}

/// Comparison mode; drives labelling and tick density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartMode {
    ItemComparison,
    TimeComparison,
}

/// Reporting interval of the series rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// Where the tooltip opens relative to the hovered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TooltipPlacement {
    /// Beside the element, inside the plot.
    #[default]
    Over,
    /// Under the chart, horizontally centered on the element.
    Below,
}

macro_rules! string_enum {
    ($ty:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ChartError;

            fn from_str(value: &str) -> ChartResult<Self> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ChartError::Configuration(format!(
                        concat!("unknown ", $what, " `{}`"),
                        other
                    ))),
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ChartError;

            fn try_from(value: String) -> ChartResult<Self> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_owned()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(ChartType, "chart type", { Bar => "bar", Line => "line" });
string_enum!(ChartMode, "chart mode", {
    ItemComparison => "item-comparison",
    TimeComparison => "time-comparison",
});
string_enum!(TooltipPlacement, "tooltip position", { Over => "over", Below => "below" });
string_enum!(Interval, "interval", {
    Hour => "hour",
    Day => "day",
    Week => "week",
    Month => "month",
    Quarter => "quarter",
    Year => "year",
});

/// Outer padding around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 0.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Configuration(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}
