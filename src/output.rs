use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs;

use crate::record::Diamond;
use crate::Result;

/// `<dir>/<timestamp>.csv`, named after the moment the collection finished.
pub fn output_path(dir: &Path, finished_at: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}.csv", finished_at.format("%Y-%m-%d %H:%M:%S%.6f")))
}

/// Serializes the diamonds as CSV, header row first.
pub fn to_csv(diamonds: &[Diamond]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for diamond in diamonds {
        writer.serialize(diamond)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

pub async fn write_csv(path: &Path, diamonds: &[Diamond]) -> Result<()> {
    let bytes = to_csv(diamonds)?;
    fs::write(path, bytes).await?;
    Ok(())
}

/// Writes a finished run into `dir`. An empty run leaves no file behind and returns
/// `None`.
pub async fn write_results(
    dir: &Path,
    finished_at: DateTime<Local>,
    diamonds: &[Diamond],
) -> Result<Option<PathBuf>> {
    if diamonds.is_empty() {
        return Ok(None);
    }
    let path = output_path(dir, finished_at);
    write_csv(&path, diamonds).await?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::record::{normalize, tests::raw_diamond};

    #[test]
    fn file_is_named_by_timestamp() {
        let at = Local.with_ymd_and_hms(2026, 10, 18, 9, 5, 7).unwrap();

        let path = output_path(Path::new("out"), at);

        assert_eq!(path, Path::new("out").join("2026-10-18 09:05:07.000000.csv"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_diamond() {
        let diamonds = vec![
            normalize(&raw_diamond("A1", 1234)).unwrap(),
            normalize(&raw_diamond("A2", 1500)).unwrap(),
        ];

        let csv = String::from_utf8(to_csv(&diamonds).unwrap()).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "carat,clarity,color,culet,cut,date,depth,fluorescence,id,lxwRatio,polish,price,shapeName,symmetry,table"
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1.01,VS1,G,None,Ideal,Oct 18,61.9,Faint,A1,1.01,Excellent,1234,Round,Very Good,57.0"
        );
    }

    #[tokio::test]
    async fn writes_file_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");

        write_csv(&path, &[normalize(&raw_diamond("A1", 99)).unwrap()])
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("Very Good,57.0\n"));
    }

    #[tokio::test]
    async fn empty_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let written = write_results(dir.path(), Local::now(), &[]).await.unwrap();

        assert_eq!(written, None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn results_land_under_the_timestamp_name() {
        let dir = tempfile::tempdir().unwrap();
        let at = Local.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

        let written = write_results(dir.path(), at, &[normalize(&raw_diamond("A1", 99)).unwrap()])
            .await
            .unwrap();

        assert_eq!(written, Some(output_path(dir.path(), at)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
