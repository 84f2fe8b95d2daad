//! Excel workbook sink.
//!
//! Writes one sheet with a bold `Timestamp | Hospital Name | Wait Time`
//! header followed by every row in collection order. Each column is sized
//! to its longest value plus a little padding.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};
use tracing::{debug, warn};

use waitwatch_types::{Dataset, HEADERS};

use super::{FlushOutcome, PersistError, Sink};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Wait Times";

/// Extra characters added to each column's widest value.
const COLUMN_PADDING: usize = 2;

/// Rows per worksheet, header included.
const MAX_SHEET_ROWS: usize = 1_048_576;

/// Characters Excel accepts in a single cell.
const MAX_CELL_CHARS: usize = 32_767;

/// Widest column Excel allows, in character units.
const MAX_COLUMN_WIDTH: usize = 255;

/// Sink that rewrites an `.xlsx` workbook on every flush.
///
/// The workbook's creation date is fixed when the sink is created, so
/// flushing the same dataset twice produces byte-identical files.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
    created: NaiveDate,
    description: String,
}

impl XlsxSink {
    /// Create a sink writing to `path`, stamped with today's date.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let description = format!("xlsx: {}", path.display());
        Self {
            path,
            created: Local::now().date_naive(),
            description,
        }
    }

    /// Override the creation date recorded in the workbook properties.
    pub fn with_creation_date(mut self, created: NaiveDate) -> Self {
        self.created = created;
        self
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the workbook for `dataset` in memory.
    pub fn render(&self, dataset: &Dataset) -> Result<Vec<u8>, PersistError> {
        if dataset.len() >= MAX_SHEET_ROWS {
            return Err(PersistError::TooManyRows {
                rows: dataset.len(),
            });
        }

        let mut workbook = Workbook::new();
        let created = ExcelDateTime::from_ymd(
            self.created.year() as u16,
            self.created.month() as u8,
            self.created.day() as u8,
        )?;
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

        let header = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (index, row) in dataset.iter().enumerate() {
            let sheet_row = index as u32 + 1;
            for (col, value) in row.fields().iter().enumerate() {
                let text = cell_text(sheet_row, value);
                worksheet.write_string(sheet_row, col as u16, text)?;
            }
        }

        for (col, width) in dataset.column_widths().iter().enumerate() {
            let width = (width + COLUMN_PADDING).min(MAX_COLUMN_WIDTH);
            worksheet.set_column_width(col as u16, width as f64)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Clip `value` to what a cell can hold.
fn cell_text(sheet_row: u32, value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                row = sheet_row,
                chars = value.chars().count(),
                "value exceeds the cell limit, truncating to {} characters",
                MAX_CELL_CHARS
            );
            &value[..cut]
        }
        None => value,
    }
}

impl Sink for XlsxSink {
    async fn flush(&mut self, dataset: &Dataset) -> Result<FlushOutcome, PersistError> {
        if dataset.is_empty() {
            return Ok(FlushOutcome::Empty);
        }

        let bytes = self.render(dataset)?;
        tokio::fs::write(&self.path, &bytes)
            .await
            .map_err(|source| PersistError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "workbook written");

        Ok(FlushOutcome::Written {
            rows: dataset.len(),
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use calamine::{open_workbook, Reader, Xlsx};
    use tempfile::TempDir;
    use waitwatch_types::{normalize, Row, Snapshot};

    fn sample_dataset() -> Dataset {
        let snapshot = Snapshot::builder()
            .entry("General Hospital", "2 hr 12 min")
            .missing("St. Mary's")
            .build();
        let mut dataset = Dataset::new();
        dataset.append(normalize(&snapshot, "2024-01-01 10:00:00"));
        dataset
    }

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn read_cells(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let cells = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        (workbook.sheet_names(), cells)
    }

    /// Whole-character widths of the `<col>` entries in the first sheet.
    fn read_column_widths(path: &Path) -> Vec<u32> {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut xml = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();

        xml.split(" width=\"")
            .skip(1)
            .map(|rest| {
                let value = &rest[..rest.find('"').unwrap()];
                value.parse::<f64>().unwrap().floor() as u32
            })
            .collect()
    }

    #[test]
    fn test_sink_new() {
        let sink = XlsxSink::new("/tmp/waits.xlsx");
        assert_eq!(sink.path(), Path::new("/tmp/waits.xlsx"));
        assert_eq!(sink.description(), "xlsx: /tmp/waits.xlsx");
    }

    #[tokio::test]
    async fn test_empty_dataset_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        let mut sink = XlsxSink::new(&path);

        let outcome = sink.flush(&Dataset::new()).await.unwrap();

        assert_eq!(outcome, FlushOutcome::Empty);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_empty_dataset_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        std::fs::write(&path, b"previous").unwrap();
        let mut sink = XlsxSink::new(&path);

        sink.flush(&Dataset::new()).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }

    #[tokio::test]
    async fn test_flush_writes_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        let mut sink = XlsxSink::new(&path);

        let outcome = sink.flush(&sample_dataset()).await.unwrap();

        assert_eq!(outcome, FlushOutcome::Written { rows: 2 });
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_workbook_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        let mut sink = XlsxSink::new(&path);

        sink.flush(&sample_dataset()).await.unwrap();

        let (sheets, cells) = read_cells(&path);
        assert_eq!(sheets, vec![SHEET_NAME.to_string()]);
        assert_eq!(
            cells,
            vec![
                vec!["Timestamp", "Hospital Name", "Wait Time"],
                vec!["2024-01-01 10:00:00", "General Hospital", "2 hr 12 min"],
                vec!["2024-01-01 10:00:00", "St. Mary's", "Not available"],
            ]
        );

        // longest value + 2: timestamp (19), "General Hospital" (16), "Not available" (13)
        assert_eq!(read_column_widths(&path), vec![21, 18, 15]);
    }

    #[tokio::test]
    async fn test_oversized_value_is_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        let mut sink = XlsxSink::new(&path);
        let mut dataset = Dataset::new();
        dataset.append(vec![Row::new(
            "2024-01-01 10:00:00",
            "General Hospital",
            "x".repeat(40_000),
        )]);

        let outcome = sink.flush(&dataset).await.unwrap();

        assert_eq!(outcome, FlushOutcome::Written { rows: 1 });
        let (_, cells) = read_cells(&path);
        assert_eq!(cells[1][2], "x".repeat(MAX_CELL_CHARS));
        assert_eq!(read_column_widths(&path)[2], MAX_COLUMN_WIDTH as u32);
        // the dataset itself keeps the full value
        assert_eq!(dataset.rows()[0].wait_time().len(), 40_000);
    }

    #[test]
    fn test_cell_text_respects_char_boundaries() {
        let value = "é".repeat(MAX_CELL_CHARS + 5);
        let clipped = cell_text(1, &value);
        assert_eq!(clipped.chars().count(), MAX_CELL_CHARS);
        assert_eq!(cell_text(1, "45 min"), "45 min");
    }

    #[tokio::test]
    async fn test_flush_twice_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        let mut sink = XlsxSink::new(&path).with_creation_date(fixed_date());
        let dataset = sample_dataset();

        sink.flush(&dataset).await.unwrap();
        let first = std::fs::read(&path).unwrap();
        sink.flush(&dataset).await.unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_flush_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("waits.xlsx");
        let mut sink = XlsxSink::new(&path).with_creation_date(fixed_date());
        let mut dataset = sample_dataset();

        sink.flush(&dataset).await.unwrap();
        let first = std::fs::read(&path).unwrap();

        dataset.append(vec![Row::new("2024-01-01 10:30:00", "General Hospital", "1 hr")]);
        sink.flush(&dataset).await.unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_ne!(first, second);
        assert_eq!(second, sink.render(&dataset).unwrap());
    }

    #[tokio::test]
    async fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("waits.xlsx");
        let mut sink = XlsxSink::new(&path);

        let err = sink.flush(&sample_dataset()).await.unwrap_err();

        assert!(matches!(err, PersistError::Io { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn test_render_same_dataset_same_bytes() {
        let sink = XlsxSink::new("unused.xlsx").with_creation_date(fixed_date());
        let dataset = sample_dataset();
        assert_eq!(sink.render(&dataset).unwrap(), sink.render(&dataset).unwrap());
    }
}
