//! Dashboard overviews
//!
//! Aggregates shown on the researcher and participant dashboards, derived from
//! the study store and the logged-in user's profile.

use serde::Serialize;

use crate::store::studies::StudyStore;
use crate::store::types::{ApplicationStatus, Study, StudyApplication, User};

/// Number of open studies suggested on the participant dashboard
pub const SUGGESTED_STUDIES: usize = 3;

/// An application together with the title of the study it targets
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedApplication {
    #[serde(flatten)]
    pub application: StudyApplication,
    pub study_title: String,
}

/// Researcher dashboard figures
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearcherOverview {
    pub researcher_id: String,
    pub first_name: String,
    pub company_name: String,
    pub active_studies: usize,
    /// Sum of `current_applications` over the researcher's studies
    pub total_applications: u32,
    pub budget_spent: f64,
    pub rating: f64,
    pub studies: Vec<Study>,
    /// Newest first
    pub applications: Vec<ReceivedApplication>,
}

impl ResearcherOverview {
    /// Build the overview for a researcher; `None` for participants
    pub fn build(store: &StudyStore, user: &User) -> Option<Self> {
        let profile = user.profile.as_researcher()?;
        let studies = store.studies_by_researcher(&user.id);

        let active_studies = studies.iter().filter(|s| s.is_active()).count();
        let total_applications = studies.iter().map(|s| s.current_applications).sum();

        let mut applications: Vec<ReceivedApplication> = studies
            .iter()
            .flat_map(|study| {
                store
                    .applications_for_study(&study.id)
                    .into_iter()
                    .map(move |application| ReceivedApplication {
                        application: application.clone(),
                        study_title: study.title.clone(),
                    })
            })
            .collect();
        applications.sort_by(|a, b| b.application.applied_at.cmp(&a.application.applied_at));

        Some(Self {
            researcher_id: user.id.clone(),
            first_name: profile.first_name.clone(),
            company_name: profile.company_name.clone(),
            active_studies,
            total_applications,
            budget_spent: profile.total_spent,
            rating: profile.rating,
            studies: studies.into_iter().cloned().collect(),
            applications,
        })
    }
}

/// An application with the study it was sent to, if that study still exists
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    #[serde(flatten)]
    pub application: StudyApplication,
    pub study: Option<Study>,
}

/// Participant dashboard figures
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantOverview {
    pub participant_id: String,
    pub first_name: String,
    pub occupation: String,
    pub location: String,
    pub total_earnings: f64,
    pub studies_completed: u32,
    pub rating: f64,
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,
    pub applications: Vec<SubmittedApplication>,
    pub available_studies: Vec<Study>,
}

impl ParticipantOverview {
    /// Build the overview for a participant; `None` for researchers
    pub fn build(store: &StudyStore, user: &User) -> Option<Self> {
        let profile = user.profile.as_participant()?;
        let own = store.applications_by_participant(&user.id);

        let count = |status: ApplicationStatus| own.iter().filter(|a| a.status == status).count();

        let applications = own
            .iter()
            .map(|application| SubmittedApplication {
                application: (*application).clone(),
                study: store.study(&application.study_id).cloned(),
            })
            .collect();

        let available_studies = store
            .studies()
            .iter()
            .filter(|s| s.is_active())
            .take(SUGGESTED_STUDIES)
            .cloned()
            .collect();

        Some(Self {
            participant_id: user.id.clone(),
            first_name: profile.first_name.clone(),
            occupation: profile.occupation.clone(),
            location: profile.location.clone(),
            total_earnings: profile.total_earnings,
            studies_completed: profile.studies_completed,
            rating: profile.rating,
            pending: count(ApplicationStatus::Pending),
            approved: count(ApplicationStatus::Approved),
            completed: count(ApplicationStatus::Completed),
            applications,
            available_studies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::demo_profile;
    use crate::store::types::{StudyStatus, UserType};
    use chrono::Utc;

    fn user(id: &str, user_type: UserType) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            profile: demo_profile(user_type),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_researcher_overview_over_seed() {
        let mut store = StudyStore::seeded();
        store.apply_to_study("3", "p4", Vec::new());

        let overview = ResearcherOverview::build(&store, &user("r1", UserType::Researcher)).unwrap();

        assert_eq!(overview.active_studies, 3);
        // 8 + 12 (study 3 now has one more) + 12
        assert_eq!(overview.total_applications, 8 + 12 + 12);
        assert_eq!(overview.budget_spent, 15600.0);
        assert_eq!(overview.first_name, "Sarah");

        let titles: Vec<&str> = overview
            .applications
            .iter()
            .map(|a| a.study_title.as_str())
            .collect();
        // the fresh application is newest, seed a1 follows
        assert_eq!(
            titles,
            vec![
                "Healthcare Portal Navigation Study",
                "E-commerce Mobile App Usability Study"
            ]
        );
    }

    #[test]
    fn test_researcher_overview_counts_only_active_studies() {
        let mut store = StudyStore::seeded();
        let mut studies = store.studies().to_vec();
        studies[0].status = StudyStatus::Closed;
        store = StudyStore::from_parts(studies, store.applications().to_vec());

        let overview = ResearcherOverview::build(&store, &user("r1", UserType::Researcher)).unwrap();
        assert_eq!(overview.active_studies, 2);
        assert_eq!(overview.studies.len(), 3);
    }

    #[test]
    fn test_participant_overview_over_seed() {
        let store = StudyStore::seeded();
        let overview =
            ParticipantOverview::build(&store, &user("p1", UserType::Participant)).unwrap();

        assert_eq!(overview.pending, 1);
        assert_eq!(overview.approved, 1);
        assert_eq!(overview.completed, 0);
        assert_eq!(overview.total_earnings, 2400.0);
        assert_eq!(overview.applications.len(), 2);
        assert_eq!(
            overview.applications[0].study.as_ref().map(|s| s.id.as_str()),
            Some("1")
        );

        let suggested: Vec<&str> = overview
            .available_studies
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(suggested, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_participant_overview_keeps_orphan_applications() {
        let mut store = StudyStore::seeded();
        store.apply_to_study("gone", "p1", Vec::new());

        let overview =
            ParticipantOverview::build(&store, &user("p1", UserType::Participant)).unwrap();
        assert_eq!(overview.applications.len(), 3);
        assert!(overview.applications[2].study.is_none());
        assert_eq!(overview.pending, 2);
    }

    #[test]
    fn test_overview_requires_matching_role() {
        let store = StudyStore::seeded();
        assert!(ResearcherOverview::build(&store, &user("p1", UserType::Participant)).is_none());
        assert!(ParticipantOverview::build(&store, &user("r1", UserType::Researcher)).is_none());
    }

    #[test]
    fn test_overview_serializes_flattened_application() {
        let store = StudyStore::seeded();
        let overview = ResearcherOverview::build(&store, &user("r2", UserType::Researcher)).unwrap();
        let json = serde_json::to_value(&overview).unwrap();

        assert_eq!(json["applications"][0]["id"], "a2");
        assert_eq!(
            json["applications"][0]["studyTitle"],
            "Financial Planning Tool User Interviews"
        );
        assert_eq!(json["activeStudies"], 3);
    }
}
