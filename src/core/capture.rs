//! In-memory sink for asserting on emitted records

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A clonable writer that keeps everything written to it
///
/// # Example
///
/// ```
/// use structured_logger::prelude::*;
///
/// let capture = CaptureWriter::new();
/// let logger = new_logger(LoggerType::ZeroLog, [with_output(capture.clone())]);
/// logger.info(&[with_message("ready")]);
///
/// assert_eq!(capture.last_json().unwrap()["message"], "ready");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    /// Every line parsed as JSON; lines that are not JSON are skipped
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn last_json(&self) -> Option<serde_json::Value> {
        self.records().pop()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
