use std::hash::Hash;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::series::OrderedKey;

/// Inner padding between date bands in wide layouts, in step units.
pub const DATE_BAND_PADDING: f64 = 0.1;
/// Inner and outer padding between grouped bars in wide layouts.
pub const GROUP_BAND_PADDING: f64 = 0.07;

/// Discrete band scale with whole-pixel rounding.
///
/// Bands are evenly spaced over the range; `padding_inner` is the gap
/// between bands and `padding_outer` the gap before the first and after the
/// last band, both as fractions of one step. Leftover pixels from rounding
/// are split evenly on both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Hash + Eq",
    deserialize = "K: Deserialize<'de> + Hash + Eq"
))]
pub struct BandScale<K> {
    domain: IndexSet<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: Hash + Eq> BandScale<K> {
    #[must_use]
    pub fn new(
        domain: impl IntoIterator<Item = K>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let mut scale = Self {
            domain: domain.into_iter().collect(),
            range,
            padding_inner: padding_inner.clamp(0.0, 1.0),
            padding_outer: padding_outer.max(0.0),
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (lo, hi) = if self.range.0 <= self.range.1 {
            self.range
        } else {
            (self.range.1, self.range.0)
        };
        let span = hi - lo;
        let slots = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        let step = (span / slots).floor().max(0.0);
        let start = lo + (span - step * (n - self.padding_inner)) * 0.5;

        self.step = step;
        self.start = start.round();
        self.bandwidth = (step * (1.0 - self.padding_inner)).round();
    }

    /// Left edge of the band for `key`, `None` when the key is not in the domain.
    #[must_use]
    pub fn position(&self, key: &K) -> Option<f64> {
        self.domain
            .get_index_of(key)
            .map(|index| self.start + self.step * index as f64)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn domain(&self) -> &IndexSet<K> {
        &self.domain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

impl<K: Hash + Eq> PartialEq for BandScale<K> {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.range == other.range
            && self.padding_inner == other.padding_inner
            && self.padding_outer == other.padding_outer
            && self.start == other.start
            && self.step == other.step
            && self.bandwidth == other.bandwidth
    }
}

/// Band scale over sorted unique dates for bar charts.
///
/// Compact layouts drop the inner gap between dates so the per-date band is
/// not squeezed further.
#[must_use]
pub fn x_scale(dates: &[DateTime<Utc>], width: f64, compact: bool) -> BandScale<DateTime<Utc>> {
    let padding = if compact { 0.0 } else { DATE_BAND_PADDING };
    BandScale::new(dates.iter().copied(), (0.0, width), padding, 0.0)
}

/// Subdivides one date band into a slot per visible series key.
#[must_use]
pub fn x_group_scale(
    ordered_keys: &[OrderedKey],
    x_scale: &BandScale<DateTime<Utc>>,
    compact: bool,
) -> BandScale<String> {
    let padding = if compact { 0.0 } else { GROUP_BAND_PADDING };
    BandScale::new(
        ordered_keys
            .iter()
            .filter(|ordered| ordered.visible)
            .map(|ordered| ordered.key.clone()),
        (0.0, x_scale.bandwidth()),
        padding,
        padding,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_without_padding_tile_the_range() {
        let scale = BandScale::new(["a", "b", "c", "d"], (0.0, 400.0), 0.0, 0.0);
        assert_eq!(scale.bandwidth(), 100.0);
        assert_eq!(scale.position(&"a"), Some(0.0));
        assert_eq!(scale.position(&"d"), Some(300.0));
        assert_eq!(scale.position(&"z"), None);
    }

    #[test]
    fn inner_padding_shrinks_bands() {
        let scale = BandScale::new(["a", "b"], (0.0, 560.0), 0.1, 0.0);
        assert_eq!(scale.step(), 294.0);
        assert_eq!(scale.bandwidth(), 265.0);
        assert!(scale.position(&"b").expect("b") + scale.bandwidth() <= 560.0);
    }

    #[test]
    fn empty_domain_stays_finite() {
        let scale = BandScale::<&str>::new([], (0.0, 200.0), 0.1, 0.0);
        assert!(scale.bandwidth().is_finite());
        assert!(scale.is_empty());
    }
}
