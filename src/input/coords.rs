//! Coordinate conversion between device space and data space.
//!
//! The host's scales change on every zoom or pan, so conversions take the
//! current [`ChartScales`] per call instead of caching anything.

use crate::error::{ShapeError, ShapeResult};
use crate::geometry::HitTolerance;
use crate::types::{DataPoint, ScreenPoint};
use serde::{Deserialize, Serialize};

/// Linear map from a data domain onto a pixel range.
///
/// The range may be reversed (a y axis usually maps the top of the plot to
/// the largest value).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaleSpec")]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

#[derive(Deserialize)]
struct ScaleSpec {
    domain: (f64, f64),
    range: (f64, f64),
}

impl TryFrom<ScaleSpec> for LinearScale {
    type Error = ShapeError;

    fn try_from(spec: ScaleSpec) -> Result<Self, Self::Error> {
        LinearScale::new(spec.domain, spec.range)
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ShapeResult<Self> {
        let values = [domain.0, domain.1, range.0, range.1];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::InvalidScale(format!(
                "non-finite bounds: domain {domain:?}, range {range:?}"
            )));
        }
        if domain.0 == domain.1 || range.0 == range.1 {
            return Err(ShapeError::InvalidScale(format!(
                "zero-width span: domain {domain:?}, range {range:?}"
            )));
        }
        Ok(Self { domain, range })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Data value to pixel.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        self.range.0
            + (value - self.domain.0) * (self.range.1 - self.range.0) / (self.domain.1 - self.domain.0)
    }

    /// Pixel to data value.
    #[inline]
    pub fn invert(&self, pixel: f64) -> f64 {
        self.domain.0
            + (pixel - self.range.0) * (self.domain.1 - self.domain.0) / (self.range.1 - self.range.0)
    }

    /// Data units covered by `pixels` pixels.
    #[inline]
    pub fn span_of(&self, pixels: f64) -> f64 {
        (pixels * (self.domain.1 - self.domain.0) / (self.range.1 - self.range.0)).abs()
    }
}

/// The host chart's current x and y scales.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl ChartScales {
    pub fn new(x: LinearScale, y: LinearScale) -> Self {
        Self { x, y }
    }

    /// Express a pixel radius as a per-axis data tolerance.
    pub fn tolerance(&self, pixels: f64) -> HitTolerance {
        HitTolerance::new(self.x.span_of(pixels), self.y.span_of(pixels))
    }
}

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub scales: &'a ChartScales,
    /// Discrete x positions of the plotted data, ascending
    pub x_samples: &'a [f64],
    pub snap: bool,
}

impl<'a> CoordinateContext<'a> {
    /// Create a new coordinate context
    #[inline]
    pub fn new(scales: &'a ChartScales, x_samples: &'a [f64], snap: bool) -> Self {
        Self {
            scales,
            x_samples,
            snap,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a device position to data coordinates, snapping x if enabled
    pub fn screen_to_data(pos: ScreenPoint, ctx: &CoordinateContext<'_>) -> DataPoint {
        let mut x = ctx.scales.x.invert(pos.x);
        let y = ctx.scales.y.invert(pos.y);

        if ctx.snap {
            if let Some(snapped) = Self::nearest_sample(x, ctx.x_samples) {
                x = snapped;
            }
        }

        DataPoint::new(x, y)
    }

    /// Convert data coordinates to a device position
    #[inline]
    pub fn data_to_screen(point: DataPoint, scales: &ChartScales) -> ScreenPoint {
        ScreenPoint::new(scales.x.apply(point.x), scales.y.apply(point.y))
    }

    /// Nearest entry of a sorted sample list, or `None` if it is empty or
    /// `x` is NaN
    pub fn nearest_sample(x: f64, samples: &[f64]) -> Option<f64> {
        if samples.is_empty() || x.is_nan() {
            return None;
        }
        let idx = samples.partition_point(|&s| s < x);
        let after = samples.get(idx).copied();
        let before = idx.checked_sub(1).map(|i| samples[i]);

        match (before, after) {
            (Some(b), Some(a)) => Some(if (x - b) <= (a - x) { b } else { a }),
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }
}
