//! Comparison table output.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::CompanyMetrics;

/// Sink for the finalized comparison table.
pub trait ComparisonWriter {
    /// Write one row per record and return the location of the artifact.
    fn write(&self, records: &[CompanyMetrics]) -> Result<PathBuf>;
}

impl<T: ComparisonWriter + ?Sized> ComparisonWriter for &T {
    fn write(&self, records: &[CompanyMetrics]) -> Result<PathBuf> {
        (**self).write(records)
    }
}

/// Writes `comparison_<YYYYMMDD>_<HHMMSS>.csv` files into a directory.
#[derive(Debug, Clone)]
pub struct CsvComparisonWriter {
    output_dir: PathBuf,
}

impl CsvComparisonWriter {
    /// Create a writer targeting `output_dir`, created on first write.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Full path of the table for a run started at `timestamp`.
    pub fn path_for(&self, timestamp: DateTime<Local>) -> PathBuf {
        self.output_dir.join(comparison_file_name(timestamp))
    }
}

impl ComparisonWriter for CsvComparisonWriter {
    fn write(&self, records: &[CompanyMetrics]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.path_for(Local::now());
        let file = fs::File::create(&path)?;
        write_csv(file, records)?;

        info!("Wrote {} rows to {}", records.len(), path.display());
        Ok(path)
    }
}

/// `comparison_20250131_142501.csv` for 2025-01-31 14:25:01.
pub fn comparison_file_name(timestamp: DateTime<Local>) -> String {
    timestamp.format("comparison_%Y%m%d_%H%M%S.csv").to_string()
}

/// Serialize records as CSV with a header row. Unknown values are empty cells.
pub fn write_csv<W: io::Write>(writer: W, records: &[CompanyMetrics]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    debug!("Serialized {} comparison rows", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn acme() -> CompanyMetrics {
        CompanyMetrics {
            company_name: "Acme".to_string(),
            revenue: Some(1000.0),
            net_income: Some(100.0),
            eps: Some(2.0),
            operating_margin: Some(15.0),
            profit_margin: Some(10.0),
            revenue_growth: Some(25.0),
        }
    }

    fn globex() -> CompanyMetrics {
        CompanyMetrics {
            company_name: "Globex".to_string(),
            revenue: Some(500.0),
            net_income: Some(0.0),
            eps: None,
            operating_margin: None,
            profit_margin: Some(0.0),
            revenue_growth: None,
        }
    }

    #[test]
    fn test_file_name_format() {
        let ts = Local.with_ymd_and_hms(2025, 1, 31, 14, 25, 1).unwrap();
        assert_eq!(comparison_file_name(ts), "comparison_20250131_142501.csv");
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[acme(), globex()]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "company_name,revenue,net_income,eps,operating_margin,profit_margin,revenue_growth",
                "Acme,1000.0,100.0,2.0,15.0,10.0,25.0",
                "Globex,500.0,0.0,,,0.0,",
            ]
        );
    }

    #[test]
    fn test_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data").join("outputs");
        let writer = CsvComparisonWriter::new(&out);

        let path = writer.write(&[acme()]).unwrap();

        assert_eq!(path.parent(), Some(out.as_path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("comparison_") && name.ends_with(".csv"));
        assert_eq!(name.len(), "comparison_YYYYMMDD_HHMMSS.csv".len());

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<CompanyMetrics> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![acme()]);
    }
}
