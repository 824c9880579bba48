//! Surplus time-series sources
//!
//! A source hands out the ordered points for each chart granularity. The
//! built-in sample data is compiled into the binary; files can be loaded
//! from TOML, JSON or CSV.
//!
//! TOML/JSON files hold one array per granularity:
//!
//! ```toml
//! week = [{ label = "Apr 1", amount = 2.3 }, { label = "Apr 2", amount = 3.1 }]
//! year = [{ label = "Jan", amount = 62.4 }]
//! ```
//!
//! CSV files have a header row and one point per line:
//!
//! ```text
//! granularity,label,amount
//! week,Apr 1,2.3
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Granularity, TimePoint};

/// Embedded sample series (compiled into binary)
const SAMPLE_SERIES: &str = include_str!("../../../data/sample_series.toml");

/// Supplies surplus series per granularity
pub trait SeriesSource: Send + Sync {
    /// Human-readable name for this source
    fn name(&self) -> &str;

    /// Ordered points for `granularity` (empty if the source has none)
    fn series(&self, granularity: Granularity) -> Result<Vec<TimePoint>>;
}

/// Points for every granularity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
    #[serde(default)]
    pub week: Vec<TimePoint>,
    #[serde(default)]
    pub month: Vec<TimePoint>,
    #[serde(default)]
    pub year: Vec<TimePoint>,
}

impl SeriesSet {
    pub fn get(&self, granularity: Granularity) -> &[TimePoint] {
        match granularity {
            Granularity::Week => &self.week,
            Granularity::Month => &self.month,
            Granularity::Year => &self.year,
        }
    }

    fn get_mut(&mut self, granularity: Granularity) -> &mut Vec<TimePoint> {
        match granularity {
            Granularity::Week => &mut self.week,
            Granularity::Month => &mut self.month,
            Granularity::Year => &mut self.year,
        }
    }

    /// Reject negative or non-finite amounts
    pub fn validate(&self) -> Result<()> {
        for granularity in Granularity::all() {
            for point in self.get(*granularity) {
                if !point.amount.is_finite() || point.amount < 0.0 {
                    return Err(Error::InvalidData(format!(
                        "{} point '{}' has invalid amount {}",
                        granularity, point.label, point.amount
                    )));
                }
            }
        }
        Ok(())
    }
}

/// An in-memory series source
#[derive(Debug, Clone)]
pub struct StaticSeries {
    name: String,
    set: SeriesSet,
}

impl StaticSeries {
    /// Wrap an already-built set
    pub fn from_set(name: impl Into<String>, set: SeriesSet) -> Result<Self> {
        set.validate()?;
        Ok(Self {
            name: name.into(),
            set,
        })
    }

    /// The built-in sample data
    pub fn sample() -> Result<Self> {
        let set = parse_toml(SAMPLE_SERIES)?;
        Self::from_set("sample", set)
    }

    /// Load a series file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let set = match extension.as_str() {
            "toml" => parse_toml(&fs::read_to_string(path)?)?,
            "json" => serde_json::from_str(&fs::read_to_string(path)?)?,
            "csv" => parse_csv(fs::File::open(path)?)?,
            _ => {
                return Err(Error::InvalidData(format!(
                    "Unsupported series file: {} (expected .toml, .json or .csv)",
                    path.display()
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            week = set.week.len(),
            month = set.month.len(),
            year = set.year.len(),
            "Loaded surplus series"
        );

        Self::from_set(path.display().to_string(), set)
    }

    pub fn set(&self) -> &SeriesSet {
        &self.set
    }
}

impl SeriesSource for StaticSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn series(&self, granularity: Granularity) -> Result<Vec<TimePoint>> {
        Ok(self.set.get(granularity).to_vec())
    }
}

fn parse_toml(content: &str) -> Result<SeriesSet> {
    toml::from_str(content).map_err(|e| Error::InvalidData(format!("Invalid series TOML: {}", e)))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    granularity: String,
    label: String,
    amount: f64,
}

/// Parse `granularity,label,amount` rows, keeping file order per granularity
pub fn parse_csv<R: Read>(reader: R) -> Result<SeriesSet> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut set = SeriesSet::default();

    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        match row.granularity.parse::<Granularity>() {
            Ok(granularity) => set
                .get_mut(granularity)
                .push(TimePoint::new(row.label, row.amount)),
            Err(e) => {
                // Header is line 1
                tracing::warn!(line = line + 2, error = %e, "Skipping CSV row");
            }
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_series() {
        let sample = StaticSeries::sample().unwrap();
        assert_eq!(sample.name(), "sample");

        let week = sample.series(Granularity::Week).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], TimePoint::new("Apr 1", 2.3));
        assert_eq!(week[5], TimePoint::new("Apr 6", 5.9));
        assert_eq!(week[6], TimePoint::new("Apr 7", 4.8));

        assert_eq!(sample.series(Granularity::Month).unwrap().len(), 24);
        assert_eq!(sample.series(Granularity::Year).unwrap().len(), 12);
    }

    #[test]
    fn test_parse_csv() {
        let data = "granularity,label,amount\nweek,Apr 1,2.5\nyear,Jan,40\nweek,Apr 2, 3.0\n";
        let set = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(
            set.week,
            vec![TimePoint::new("Apr 1", 2.5), TimePoint::new("Apr 2", 3.0)]
        );
        assert_eq!(set.year, vec![TimePoint::new("Jan", 40.0)]);
        assert!(set.month.is_empty());
    }

    #[test]
    fn test_parse_csv_skips_unknown_granularity() {
        let data = "granularity,label,amount\nhourly,9am,1.0\nmonth,Mar 1,2.0\n";
        let set = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(set.month.len(), 1);
        assert!(set.week.is_empty());
    }

    #[test]
    fn test_parse_csv_bad_amount() {
        let data = "granularity,label,amount\nweek,Apr 1,lots\n";
        assert!(matches!(parse_csv(data.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let set = SeriesSet {
            week: vec![TimePoint::new("Apr 1", -1.0)],
            ..Default::default()
        };
        let err = StaticSeries::from_set("test", set).unwrap_err();
        assert!(err.to_string().contains("Apr 1"));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"month": [{{"label": "May 1", "amount": 1.5}}, {{"label": "May 2", "amount": 2.5}}]}}"#
        )
        .unwrap();

        let source = StaticSeries::load(file.path()).unwrap();
        assert_eq!(source.series(Granularity::Month).unwrap().len(), 2);
        assert!(source.series(Granularity::Week).unwrap().is_empty());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "year = [{{ label = \"Nov\", amount = 3.0 }}]").unwrap();

        let source = StaticSeries::load(file.path()).unwrap();
        assert_eq!(
            source.series(Granularity::Year).unwrap(),
            vec![TimePoint::new("Nov", 3.0)]
        );
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = StaticSeries::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported series file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticSeries::load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
