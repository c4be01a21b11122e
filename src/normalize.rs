use anyhow::{Result, bail};

use crate::record::MergedRecord;

/// Projects one metric onto a 0..=100 display scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricCalibration {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    /// Lower raw values score higher (e.g. goals conceded per 90).
    pub invert: bool,
}

impl MetricCalibration {
    pub const fn range(field: &'static str, min: f64, max: f64) -> Self {
        Self {
            field,
            min,
            max,
            invert: false,
        }
    }

    pub const fn inverted(field: &'static str, min: f64, max: f64) -> Self {
        Self {
            field,
            min,
            max,
            invert: true,
        }
    }

    pub fn new(field: &'static str, min: f64, max: f64, invert: bool) -> Result<Self> {
        let calib = Self {
            field,
            min,
            max,
            invert,
        };
        calib.validate()?;
        Ok(calib)
    }

    /// Bounds must be finite with `min < max`; "lower is better" goes through `invert`.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            bail!("calibration for {} has non-finite bounds", self.field);
        }
        if self.min >= self.max {
            bail!(
                "calibration for {} needs min < max (got {}..{})",
                self.field,
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

pub fn normalize(value: f64, calib: &MetricCalibration) -> f64 {
    let span = calib.max - calib.min;
    debug_assert!(span > 0.0, "empty or reversed calibration for {}", calib.field);
    let mut pct = (value - calib.min) / span * 100.0;
    if calib.invert {
        pct = 100.0 - pct;
    }
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(0.0, 100.0)
}

/// Range of `field` across the given records, for scaling relative to the current selection.
/// `None` when there is nothing to spread (no records or all values equal).
pub fn calibration_from_records(
    field: &'static str,
    records: &[&MergedRecord],
    invert: bool,
) -> Option<MetricCalibration> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in records {
        let v = r.number(field);
        min = min.min(v);
        max = max.max(v);
    }
    MetricCalibration::new(field, min, max, invert).ok()
}
