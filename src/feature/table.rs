//! Cumulative case-count tables in the Johns Hopkins CSSE layout.
//!
//! ```text
//! Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,...
//! ,Afghanistan,33.93911,67.709953,0,0,...
//! "Bonaire, Sint Eustatius and Saba",Netherlands,12.1784,-68.2385,0,0,...
//! ```
//!
//! The first four columns describe the region; every remaining column header
//! is a date in `m/d/yy` form and every cell under it a cumulative count.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// `strftime` pattern of the date column headers.
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Columns before the first date column (province, country, lat, long).
const FIRST_DATE_COLUMN: usize = 4;

/// One row of the table: a country or a province/state within one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Province or state, if the row is below country level.
    pub province: Option<String>,
    /// Country or region name.
    pub country: String,
    /// Cumulative counts, one per table date.
    pub counts: Vec<u64>,
}

impl Region {
    /// `"Province, Country"`, or just the country.
    pub fn label(&self) -> String {
        match &self.province {
            Some(province) => format!("{province}, {}", self.country),
            None => self.country.clone(),
        }
    }

    /// Count on the most recent date.
    pub fn latest(&self) -> u64 {
        self.counts.last().copied().unwrap_or(0)
    }
}

/// Dates plus per-region cumulative counts.
///
/// Invariants: at least one date, dates strictly increasing, and every region
/// has exactly one count per date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    dates: Vec<NaiveDate>,
    regions: Vec<Region>,
}

impl CaseTable {
    /// Build a table from parts, checking the invariants.
    pub fn new(dates: Vec<NaiveDate>, regions: Vec<Region>) -> Result<Self> {
        check_dates(&dates)?;
        for (row, region) in regions.iter().enumerate() {
            if region.counts.len() != dates.len() {
                return Err(Error::MalformedRow {
                    row,
                    expected: dates.len(),
                    found: region.counts.len(),
                });
            }
        }
        Ok(Self { dates, regions })
    }

    /// Read a table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        log::info!(
            "loaded {} regions over {} dates from {}",
            table.regions.len(),
            table.dates.len(),
            path.display()
        );
        Ok(table)
    }

    /// Read a table from any CSV source.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut dates = Vec::with_capacity(headers.len().saturating_sub(FIRST_DATE_COLUMN));
        for (column, value) in headers.iter().enumerate().skip(FIRST_DATE_COLUMN) {
            let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
                Error::InvalidDate {
                    column,
                    value: value.to_string(),
                }
            })?;
            dates.push(date);
        }
        check_dates(&dates)?;

        let mut regions = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() != headers.len() {
                return Err(Error::MalformedRow {
                    row,
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            let province = record
                .get(0)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string);
            let country = record.get(1).map(str::trim).unwrap_or_default().to_string();

            let mut counts = Vec::with_capacity(dates.len());
            for (column, cell) in record.iter().enumerate().skip(FIRST_DATE_COLUMN) {
                let count = cell.trim().parse::<u64>().map_err(|_| Error::InvalidCount {
                    row,
                    column,
                    value: cell.to_string(),
                })?;
                counts.push(count);
            }

            regions.push(Region {
                province,
                country,
                counts,
            });
        }

        Ok(Self { dates, regions })
    }

    /// Column dates, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The most recent date in the table.
    pub fn latest_date(&self) -> NaiveDate {
        // `check_dates` guarantees at least one date.
        self.dates[self.dates.len() - 1]
    }

    /// Regions in file order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

fn check_dates(dates: &[NaiveDate]) -> Result<()> {
    if dates.is_empty() {
        return Err(Error::InvalidParameter {
            name: "dates",
            message: "table has no date columns",
        });
    }
    if dates.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidParameter {
            name: "dates",
            message: "must be strictly increasing",
        });
    }
    Ok(())
}
