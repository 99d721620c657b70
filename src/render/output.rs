use std::io::{self, Write};

use serde::Serialize;

use crate::config::{OutputConfig, OutputMode};
use crate::errors::AppResult;
use crate::inspect::PodReport;
use crate::render::format::HumanFormatter;

/// Writes finished reports, one after another, to `out`.
pub struct ReportWriter<W: Write> {
    out: W,
    mode: OutputMode,
    formatter: HumanFormatter,
    written: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, output: OutputConfig) -> Self {
        Self {
            out,
            mode: output.mode,
            formatter: HumanFormatter::new(output.color),
            written: 0,
        }
    }

    /// Returns `Ok(false)` once the reader has gone away (broken pipe).
    pub fn write(&mut self, report: &PodReport) -> AppResult<bool> {
        let bytes = match self.mode {
            OutputMode::Human => {
                let text = self.formatter.format(report);
                if self.written > 0 {
                    format!("\n{text}").into_bytes()
                } else {
                    text.into_bytes()
                }
            }
            OutputMode::Json => json_line(report)?,
        };

        match self.emit(&bytes) {
            Ok(()) => {
                self.written += 1;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn json_line<T: Serialize + ?Sized>(value: &T) -> AppResult<Vec<u8>> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    Ok(line)
}
