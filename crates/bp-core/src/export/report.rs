//! CSV report text.
//!
//! Fields are joined with `,` and lines with `\n`. Fields are never quoted or
//! escaped, so a value containing a comma shifts the columns after it. The
//! returned text has no trailing line terminator.

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::error::CoreResult;

/// Report text with a header written once, before the first data row.
pub struct CsvReport {
    header: &'static [&'static str],
    writer: Writer<Vec<u8>>,
    rows: usize,
}

impl CsvReport {
    pub fn new(header: &'static [&'static str]) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        Self {
            header,
            writer,
            rows: 0,
        }
    }

    /// Append a data row. Every row must have as many fields as the header.
    pub fn push_row<S: AsRef<str>>(&mut self, fields: &[S]) -> CoreResult<()> {
        if self.rows == 0 {
            self.writer.write_record(self.header)?;
        }
        self.writer.write_record(fields.iter().map(|f| f.as_ref()))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Finish the report. With no data rows the result is either empty or the
    /// header alone.
    pub fn finish(mut self, header_on_empty: bool) -> CoreResult<String> {
        if self.rows == 0 && header_on_empty {
            self.writer.write_record(self.header)?;
        }
        let bytes = self
            .writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;

        let mut text = String::from_utf8_lossy(&bytes).into_owned();
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }
}
