use rxplore_analysis::{
    condition::ConditionFilter,
    overview::{Overview, OverviewOptions},
};
use rxplore_dataset::{Dataset, DrugRecord};

use crate::session::Session;

/// Outcome of the last reload, shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReloadStatus {
    Idle,
    Reloaded,
    Failed(String),
}

/// State shared by every explorer screen: the session and the views derived from it.
#[derive(Debug)]
pub(crate) struct Explorer {
    session: Session,
    options: OverviewOptions,
    preview_rows: usize,
    overview: Overview,
    conditions: ConditionFilter,
    status: ReloadStatus,
}

impl Explorer {
    pub(crate) fn new(session: Session, options: OverviewOptions, preview_rows: usize) -> Self {
        let overview = Overview::new(session.dataset(), &options);
        let conditions = ConditionFilter::new(session.dataset());
        Self {
            session,
            options,
            preview_rows,
            overview,
            conditions,
            status: ReloadStatus::Idle,
        }
    }

    /// Reads the file again and recomputes every view.
    ///
    /// A failed reload keeps the current dataset and records the error.
    pub(crate) fn reload(&mut self) {
        match self.session.reload() {
            Ok(()) => {
                self.overview = Overview::new(self.session.dataset(), &self.options);
                self.conditions = ConditionFilter::new(self.session.dataset());
                self.status = ReloadStatus::Reloaded;
            }
            Err(e) => self.status = ReloadStatus::Failed(format!("{e:#}")),
        }
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn dataset(&self) -> &Dataset {
        self.session.dataset()
    }

    pub(crate) fn overview(&self) -> &Overview {
        &self.overview
    }

    pub(crate) fn conditions(&self) -> &[String] {
        self.conditions.conditions()
    }

    pub(crate) fn status(&self) -> &ReloadStatus {
        &self.status
    }

    pub(crate) fn preview(&self) -> Vec<&DrugRecord> {
        self.dataset().head(self.preview_rows).iter().collect()
    }

    pub(crate) fn class_rows(&self) -> Vec<&DrugRecord> {
        self.overview
            .class_ratings
            .records(self.session.dataset())
            .collect()
    }

    pub(crate) fn condition_rows<'a>(&'a self, condition: &'a str) -> Vec<&'a DrugRecord> {
        ConditionFilter::select(self.session.dataset(), condition).collect()
    }
}
