//! CSV capture files
//!
//! One file per server run, named after the local start time:
//!
//! ```text
//! udp_data/data_20250114_093012.csv
//! ```
//!
//! ## Format
//!
//! ```csv
//! ServerTime,ESP_ms,AccelX,AccelY,AccelZ,GyroX,GyroY,GyroZ,IR
//! 2025-01-14 09:30:12.481223,123456,0.012,-0.981,0.104,0.51,-0.02,0.33,91234
//! ```
//!
//! Rows end in `\r\n`. Fields are written as received; a field containing a
//! comma, a double quote or a line break is wrapped in double quotes with
//! inner quotes doubled. Every row is flushed before `record` returns so a
//! killed server loses at most the datagram in flight.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use ppgscale_core::MotionSample;

use crate::{IngestError, SampleSink};

/// First column of every row
pub const SERVER_TIME_COLUMN: &str = "ServerTime";

/// `strftime` pattern of the `ServerTime` column
pub const SERVER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// `strftime` pattern of capture file names
pub const FILE_NAME_FORMAT: &str = "data_%Y%m%d_%H%M%S.csv";

const LINE_END: &str = "\r\n";

/// Appends received rows to a CSV file
pub struct CsvRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
    rows: u64,
}

impl CsvRecorder {
    /// Create a timestamped capture file inside `out_dir`
    ///
    /// The directory is created if missing.
    pub fn create(out_dir: impl AsRef<Path>) -> Result<Self, IngestError> {
        let out_dir = out_dir.as_ref();
        fs::create_dir_all(out_dir)?;
        let name = Local::now().format(FILE_NAME_FORMAT).to_string();
        Self::create_at(out_dir.join(name))
    }

    /// Create (or truncate) a capture file at an exact path
    pub fn create_at(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        let file = File::create(&path)?;
        let mut recorder = Self {
            writer: BufWriter::new(file),
            path,
            rows: 0,
        };
        recorder.write_header()?;
        info!("Recording to {}", recorder.path.display());
        Ok(recorder)
    }

    /// Path of the capture file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data rows written so far (header excluded)
    pub fn rows(&self) -> u64 {
        self.rows
    }

    fn write_header(&mut self) -> Result<(), IngestError> {
        let mut header = Vec::with_capacity(MotionSample::CSV_FIELDS.len() + 1);
        header.push(SERVER_TIME_COLUMN);
        header.extend_from_slice(&MotionSample::CSV_FIELDS);
        self.write_row(&header)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<(), IngestError> {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            write_field(&mut self.writer, field)?;
        }
        self.writer.write_all(LINE_END.as_bytes())?;
        Ok(())
    }
}

impl SampleSink for CsvRecorder {
    fn record(&mut self, server_time: &str, fields: &[&str]) -> Result<(), IngestError> {
        let mut row = Vec::with_capacity(fields.len() + 1);
        row.push(server_time);
        row.extend_from_slice(fields);
        self.write_row(&row)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IngestError> {
        self.writer.flush()?;
        Ok(())
    }
}

fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

fn write_field(out: &mut impl Write, field: &str) -> std::io::Result<()> {
    if !needs_quoting(field) {
        return out.write_all(field.as_bytes());
    }
    out.write_all(b"\"")?;
    out.write_all(field.replace('"', "\"\"").as_bytes())?;
    out.write_all(b"\"")
}
