//! Outbreak-curve features.
//!
//! A [`CaseTable`] holds cumulative confirmed-case counts per region. A
//! [`FeatureExtractor`] reduces each region's curve to a [`Point`](crate::Point)
//! measuring how recently the count was a tenth and a hundredth of its latest
//! value:
//!
//! - a region whose count is still growing fast has small coordinates;
//! - a region whose curve has flattened has large ones.
//!
//! Regions for which a crossing cannot be observed get `None`, which the
//! clustering step skips.
//!
//! ```rust
//! use outbreak::feature::{CaseTable, FeatureExtractor};
//!
//! let csv = "\
//! Province/State,Country/Region,Lat,Long,3/1/20,3/2/20,3/3/20,3/4/20
//! ,Alpha,0,0,0,3,40,300
//! ,Beta,0,0,0,0,0,0
//! ";
//! let table = CaseTable::from_reader(csv.as_bytes()).unwrap();
//! let features = FeatureExtractor::new().extract(&table).unwrap();
//!
//! assert_eq!(features.len(), 2);
//! assert!(features[0].is_some());
//! assert!(features[1].is_none());
//! ```

mod extract;
mod table;

pub use extract::FeatureExtractor;
pub use table::{CaseTable, Region, DATE_FORMAT};
