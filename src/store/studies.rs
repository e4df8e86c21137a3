//! Study Store
//!
//! Owns the live `studies` and `applications` collections:
//! - Write path: create study (prepend), apply (append + bump counter),
//!   update application status
//! - Read path: id lookups and order-preserving equality filters
//!
//! Every operation is synchronous and visible to the next read. Callers that
//! share a store across tasks wrap it in a lock; the store itself never blocks.

use chrono::Utc;
use uuid::Uuid;

use crate::store::seed;
use crate::store::types::{
    ApplicationStatus, NewStudy, ScreeningResponse, Study, StudyApplication,
};

/// In-memory store of studies and applications
#[derive(Debug, Clone, Default)]
pub struct StudyStore {
    /// Newest first
    studies: Vec<Study>,
    /// Insertion order
    applications: Vec<StudyApplication>,
}

impl StudyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the seed studies and applications
    pub fn seeded() -> Self {
        let store = Self::from_parts(seed::studies(), seed::applications());
        tracing::debug!(
            studies = store.studies.len(),
            applications = store.applications.len(),
            "Study store seeded"
        );
        store
    }

    pub fn from_parts(studies: Vec<Study>, applications: Vec<StudyApplication>) -> Self {
        Self {
            studies,
            applications,
        }
    }

    /// Drop every change and go back to the seed data
    pub fn reset(&mut self) {
        *self = Self::seeded();
    }

    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    pub fn applications(&self) -> &[StudyApplication] {
        &self.applications
    }

    /// Look up a study by id
    pub fn study(&self, id: &str) -> Option<&Study> {
        self.studies.iter().find(|s| s.id == id)
    }

    /// Look up an application by id
    pub fn application(&self, id: &str) -> Option<&StudyApplication> {
        self.applications.iter().find(|a| a.id == id)
    }

    /// Post a new study.
    ///
    /// Assigns a fresh id and creation time, starts the application counter at
    /// zero and puts the study at the head of the list. Input is stored as-is.
    pub fn create_study(&mut self, data: NewStudy) -> &Study {
        let study = data.into_study(new_id(), Utc::now());

        tracing::info!(
            study_id = %study.id,
            researcher_id = %study.researcher_id,
            title = %study.title,
            "Created study"
        );

        self.studies.insert(0, study);
        &self.studies[0]
    }

    /// Record a participant's application to a study.
    ///
    /// The application starts `Pending` and is appended. The matching study's
    /// `current_applications` goes up by one. Neither the participant limit nor
    /// earlier applications by the same participant are checked. An unknown
    /// `study_id` still records the application but bumps no counter.
    pub fn apply_to_study(
        &mut self,
        study_id: &str,
        participant_id: &str,
        responses: Vec<ScreeningResponse>,
    ) -> &StudyApplication {
        let application = StudyApplication {
            id: new_id(),
            study_id: study_id.to_string(),
            participant_id: participant_id.to_string(),
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
            responses,
        };

        match self.studies.iter_mut().find(|s| s.id == study_id) {
            Some(study) => {
                study.current_applications += 1;
                if study.current_applications > study.participant_limit {
                    tracing::debug!(
                        study_id,
                        current = study.current_applications,
                        limit = study.participant_limit,
                        "Study is over its participant limit"
                    );
                }
            }
            None => tracing::warn!(study_id, "Application recorded for unknown study"),
        }

        tracing::info!(
            application_id = %application.id,
            study_id,
            participant_id,
            "Recorded application"
        );

        self.applications.push(application);
        let last = self.applications.len() - 1;
        &self.applications[last]
    }

    /// Set an application's status.
    ///
    /// Returns the updated application, or `None` when no application has that
    /// id (nothing changes). Study counters are never touched.
    pub fn update_application_status(
        &mut self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Option<&StudyApplication> {
        let application = self
            .applications
            .iter_mut()
            .find(|a| a.id == application_id)?;

        let previous = application.status;
        application.status = status;

        tracing::info!(
            application_id,
            from = %previous,
            to = %status,
            "Updated application status"
        );

        Some(&*application)
    }

    /// Studies owned by a researcher, in store order
    pub fn studies_by_researcher(&self, researcher_id: &str) -> Vec<&Study> {
        self.studies
            .iter()
            .filter(|s| s.researcher_id == researcher_id)
            .collect()
    }

    /// Applications submitted by a participant, in store order
    pub fn applications_by_participant(&self, participant_id: &str) -> Vec<&StudyApplication> {
        self.applications
            .iter()
            .filter(|a| a.participant_id == participant_id)
            .collect()
    }

    /// Applications submitted to a study, in store order
    pub fn applications_for_study(&self, study_id: &str) -> Vec<&StudyApplication> {
        self.applications
            .iter()
            .filter(|a| a.study_id == study_id)
            .collect()
    }

    /// Whether the participant already has an application for the study
    pub fn has_applied(&self, participant_id: &str, study_id: &str) -> bool {
        self.applications
            .iter()
            .any(|a| a.participant_id == participant_id && a.study_id == study_id)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
