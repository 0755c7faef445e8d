// src/io/reporting.rs

use std::error::Error;
use std::path::Path;

use crate::simulation::engine::TimeSeriesSample;

/// Writes the per-event inventory profile to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The time series produced by a simulation run.
pub fn write_time_series(file_path: &str, data: &[TimeSeriesSample]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);

    let mut wtr = csv::Writer::from_path(path)?;
    for sample in data {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        data.len(),
        file_path
    );
    Ok(())
}

/// Nearest-rank percentile over an unsorted sample set, `p` in `0..=100`.
/// Returns `None` for an empty set.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let index = ((p / 100.0) * (sorted.len() as f64 - 1.0)).round() as usize;
    Some(sorted[index.min(sorted.len() - 1)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_of_empty_set_is_none() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn percentile_picks_nearest_rank() {
        let values = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 50.0), Some(3.0));
        assert_eq!(percentile(&values, 100.0), Some(5.0));
    }

    #[test]
    fn writes_csv_with_one_row_per_sample() {
        let dir = std::env::temp_dir().join("reorder-sim-report-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.csv");
        let path = path.to_str().unwrap();

        let data = vec![
            TimeSeriesSample {
                time: 1.0,
                on_hand: 55.0,
                inventory_position: 55.0,
                backlog_quantity: 0.0,
            },
            TimeSeriesSample {
                time: 2.0,
                on_hand: 50.0,
                inventory_position: 50.0,
                backlog_quantity: 0.0,
            },
        ];
        write_time_series(path, &data).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        // Header plus one line per sample.
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.starts_with("time,on_hand,inventory_position,backlog_quantity"));
    }
}
