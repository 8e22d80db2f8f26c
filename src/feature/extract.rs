//! Threshold-crossing features for one outbreak curve.
//!
//! For a region whose latest cumulative count is `n`:
//!
//! - `x`: days between the latest date and the last date on which the count
//!   was still below `n / 10`;
//! - `y`: the same for `n / 100`.
//!
//! Both thresholds use integer division. The crossing date is the date just
//! before the first date whose count reaches the threshold. If that first date
//! is the first column of the table, the crossing is not observed and the
//! region has no feature. A latest count of zero also has no feature.

use chrono::NaiveDate;

use super::table::CaseTable;
use crate::cluster::Point;
use crate::error::{Error, Result};

/// Turns case-count series into 2-D feature points.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    /// Divisor of the latest count for the `x` threshold.
    x_divisor: u64,
    /// Divisor of the latest count for the `y` threshold.
    y_divisor: u64,
}

impl FeatureExtractor {
    /// Create an extractor with divisors 10 and 100.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the divisor for the `x` threshold.
    pub fn with_x_divisor(mut self, x_divisor: u64) -> Self {
        self.x_divisor = x_divisor;
        self
    }

    /// Set the divisor for the `y` threshold.
    pub fn with_y_divisor(mut self, y_divisor: u64) -> Self {
        self.y_divisor = y_divisor;
        self
    }

    /// One feature per region, in table order. `None` marks an undefined feature.
    pub fn extract(&self, table: &CaseTable) -> Result<Vec<Option<Point>>> {
        self.validate()?;

        let mut features = Vec::with_capacity(table.regions().len());
        for region in table.regions() {
            let feature = self.extract_region(table.dates(), &region.counts)?;
            if feature.is_none() {
                log::debug!("no feature for {} (latest count {})", region.label(), region.latest());
            }
            features.push(feature);
        }

        let undefined = features.iter().filter(|f| f.is_none()).count();
        if undefined > 0 {
            log::warn!(
                "{undefined} of {} regions have no defined feature and will not be clustered",
                features.len()
            );
        }
        Ok(features)
    }

    /// Feature for one series of cumulative counts aligned with `dates`.
    pub fn extract_region(&self, dates: &[NaiveDate], counts: &[u64]) -> Result<Option<Point>> {
        self.validate()?;
        if dates.is_empty() || counts.len() != dates.len() {
            return Err(Error::InvalidParameter {
                name: "counts",
                message: "must have exactly one count per date",
            });
        }

        let last = dates.len() - 1;
        let (latest_date, latest) = (dates[last], counts[last]);
        if latest == 0 {
            return Ok(None);
        }

        let x_date = crossing_date(dates, counts, latest / self.x_divisor);
        let y_date = crossing_date(dates, counts, latest / self.y_divisor);
        Ok(match (x_date, y_date) {
            (Some(x_date), Some(y_date)) => Some(Point::new(
                days_between(x_date, latest_date),
                days_between(y_date, latest_date),
            )),
            _ => None,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.x_divisor == 0 {
            return Err(Error::InvalidParameter {
                name: "x_divisor",
                message: "must be at least 1",
            });
        }
        if self.y_divisor == 0 {
            return Err(Error::InvalidParameter {
                name: "y_divisor",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            x_divisor: 10,
            y_divisor: 100,
        }
    }
}

/// Date just before the count first reaches `threshold`.
fn crossing_date(dates: &[NaiveDate], counts: &[u64], threshold: u64) -> Option<NaiveDate> {
    let reached = counts.iter().position(|&c| c >= threshold)?;
    reached.checked_sub(1).map(|i| dates[i])
}

fn days_between(earlier: NaiveDate, later: NaiveDate) -> f64 {
    later.signed_duration_since(earlier).num_days() as f64
}
