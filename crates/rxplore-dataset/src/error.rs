use std::{io, path::PathBuf};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadDatasetError {
    #[display("failed to open {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("malformed CSV input")]
    Csv(#[error(source)] csv::Error),
    #[display("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to write normalized CSV")]
pub struct WriteDatasetError {
    source: csv::Error,
}

impl From<csv::Error> for WriteDatasetError {
    fn from(source: csv::Error) -> Self {
        Self { source }
    }
}

impl From<io::Error> for WriteDatasetError {
    fn from(source: io::Error) -> Self {
        Self {
            source: source.into(),
        }
    }
}
