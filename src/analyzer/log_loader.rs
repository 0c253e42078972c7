//! Line-oriented log file reading.
//!
//! Testbed logs are captured from serial consoles and occasionally contain
//! garbage bytes, so lines are decoded lossily instead of failing the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{AnalyzerError, Result};

/// Buffer size for reading log files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Sequential log reader yielding trimmed, non-empty lines.
pub struct LogLoader<R> {
    reader: R,
    line_buffer: Vec<u8>,
}

impl LogLoader<BufReader<File>> {
    /// Open a log file for a fresh pass from its first line.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| AnalyzerError::file_read(path, e))?;
        Ok(Self::from_reader(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}

impl<R: BufRead> LogLoader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_buffer: Vec::with_capacity(512),
        }
    }

    /// Read the next non-empty line.
    ///
    /// # Returns
    ///
    /// `Ok(Some(line))` with trailing whitespace removed, `Ok(None)` at EOF.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            self.line_buffer.clear();
            if self.reader.read_until(b'\n', &mut self.line_buffer)? == 0 {
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&self.line_buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
    }
}

impl<R: BufRead> Iterator for LogLoader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
