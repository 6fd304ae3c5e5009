use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use rxplore_dataset::{Dataset, DrugRecord};

/// Destination of a command's report: stdout or a file.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.finish()
    }

    /// Flushes buffered output, logging where a file was written.
    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        if let Output::File { path, .. } = self {
            tracing::info!("Wrote {}", path.display());
        }
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Widest cell printed in text tables.
const MAX_CELL_WIDTH: usize = 24;

/// Writes `rows` as a left-aligned text table under `headers`.
///
/// Cells wider than the column limit are truncated.
pub fn write_text_table<W>(out: &mut W, headers: &[String], rows: &[Vec<String>]) -> io::Result<()>
where
    W: io::Write + ?Sized,
{
    let widths = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .chain([header])
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect::<Vec<_>>();

    let write_row = |out: &mut W, cells: &[String]| -> io::Result<()> {
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = truncate(cells.get(i).map_or("", String::as_str), width);
                format!("{cell:<width$}")
            })
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "  {}", line.trim_end())
    };

    write_row(&mut *out, headers)?;
    let separator = widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>();
    write_row(&mut *out, &separator)?;
    for row in rows {
        write_row(&mut *out, row)?;
    }
    Ok(())
}

/// Formats every cell of `record` in the dataset's header order.
pub fn record_cells(dataset: &Dataset, record: &DrugRecord) -> Vec<String> {
    (0..dataset.headers().len())
        .map(|idx| dataset.cell(record, idx).into_owned())
        .collect()
}

/// Truncates `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = text.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_table() {
        let headers = vec!["drug".to_owned(), "rating".to_owned()];
        let rows = vec![
            vec!["doxycycline".to_owned(), "6.8".to_owned()],
            vec!["ibuprofen".to_owned(), "0".to_owned()],
        ];
        let mut out = vec![];
        write_text_table(&mut out, &headers, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "  drug         rating\n  -----------  ------\n  doxycycline  6.8\n  ibuprofen    0\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("nausea", 10), "nausea");
        assert_eq!(truncate("difficult breathing", 8), "difficu…");
        assert_eq!(truncate("abc", 0), "");
    }
}
