use std::fmt;
use std::sync::Arc;

use crate::core::OrderedKey;
use crate::render::Color;

const VIRIDIS: [u32; 5] = [0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725];

/// Continuous color ramp sampled over `[0, 1]`.
#[derive(Clone)]
pub struct ColorScheme {
    sample: Arc<dyn Fn(f64) -> Color + Send + Sync>,
}

impl ColorScheme {
    #[must_use]
    pub fn new(sample: impl Fn(f64) -> Color + Send + Sync + 'static) -> Self {
        Self {
            sample: Arc::new(sample),
        }
    }

    /// Piecewise-linear ramp through evenly spaced stops.
    ///
    /// An empty stop list samples as opaque black.
    #[must_use]
    pub fn from_stops(stops: Vec<Color>) -> Self {
        Self::new(move |t| match stops.len() {
            0 => Color::rgb(0.0, 0.0, 0.0),
            1 => stops[0],
            len => {
                let scaled = t * (len - 1) as f64;
                let index = (scaled.floor() as usize).min(len - 2);
                stops[index].lerp(stops[index + 1], scaled - index as f64)
            }
        })
    }

    #[must_use]
    pub fn viridis() -> Self {
        Self::from_stops(VIRIDIS.iter().map(|rgb| Color::from_hex(*rgb)).collect())
    }

    /// Samples the ramp; `t` is clamped to `[0, 1]`, NaN reads as `0`.
    #[must_use]
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        (self.sample)(t)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::viridis()
    }
}

impl fmt::Debug for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorScheme(..)")
    }
}

impl PartialEq for ColorScheme {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sample, &other.sample)
    }
}

/// Color for `key` by its position in the ordered key list.
///
/// Keys spread evenly over the ramp; unknown keys take the first color.
#[must_use]
pub fn series_color(key: &str, ordered_keys: &[OrderedKey], scheme: &ColorScheme) -> Color {
    let span = ordered_keys.len().saturating_sub(1).max(1) as f64;
    let index = ordered_keys
        .iter()
        .position(|ordered| ordered.key == key)
        .unwrap_or(0);
    scheme.sample(index as f64 / span)
}

/// Opacity for a series under the current focus set.
///
/// Hidden series vanish. When any key is focused the others fade out.
#[must_use]
pub fn series_opacity(visible: bool, focus: bool, any_focused: bool) -> f64 {
    if !visible {
        0.0
    } else if focus || !any_focused {
        1.0
    } else {
        0.1
    }
}
