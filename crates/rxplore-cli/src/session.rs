use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use rxplore_dataset::{Dataset, LoadOptions, normalize::NormalizationReport};

/// The dataset loaded from one file, plus enough to load it again.
#[derive(Debug)]
pub(crate) struct Session {
    path: PathBuf,
    options: LoadOptions,
    dataset: Dataset,
    loaded_at: DateTime<Local>,
    generation: u64,
}

impl Session {
    /// Loads and normalizes `path`, logging progress.
    pub(crate) fn open(path: &Path, options: LoadOptions) -> anyhow::Result<Self> {
        tracing::info!("Loading records from {}...", path.display());
        let dataset = load(path, &options)?;
        tracing::info!("Loaded {} records", dataset.len());
        log_report(dataset.report());

        Ok(Self {
            path: path.to_owned(),
            options,
            dataset,
            loaded_at: Local::now(),
            generation: 0,
        })
    }

    /// Reads the file again and replaces the dataset.
    ///
    /// On failure the current dataset is kept. Nothing is logged, so this is
    /// safe to call while the terminal UI owns the screen.
    pub(crate) fn reload(&mut self) -> anyhow::Result<()> {
        self.dataset = load(&self.path, &self.options)?;
        self.loaded_at = Local::now();
        self.generation += 1;
        Ok(())
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub(crate) fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// Number of successful reloads so far.
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

fn load(path: &Path, options: &LoadOptions) -> anyhow::Result<Dataset> {
    Dataset::open(path, options)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))
}

fn log_report(report: &NormalizationReport) {
    for (column, count) in &report.defaulted {
        tracing::info!("Defaulted {count} of {} {column} values", report.rows);
    }
}
