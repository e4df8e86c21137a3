//! Namika Study Store
//!
//! This module provides the study/application data layer:
//!
//! - **types**: Entities (User, Study, StudyApplication, ...)
//! - **seed**: Static data a fresh store starts from
//! - **studies**: The in-memory store and its operations
//! - **browse**: Filter/sort view for participants
//! - **overview**: Dashboard aggregates
//!
//! # Data flow
//!
//! ```text
//! Seed → StudyStore ──reads──▶ browse / overview / lookups
//!            ▲
//!            └── create_study / apply_to_study / update_application_status
//! ```
//!
//! # Example
//!
//! ```rust
//! use namika::store::{BrowseFilter, StudyCategory, StudyStore};
//!
//! let mut store = StudyStore::seeded();
//! store.apply_to_study("3", "p1", Vec::new());
//!
//! let filter = BrowseFilter::new().category(StudyCategory::UxResearch);
//! let ids: Vec<&str> = filter.apply(store.studies()).iter().map(|s| s.id.as_str()).collect();
//! assert_eq!(ids, vec!["8", "3", "1"]);
//! ```

pub mod browse;
pub mod overview;
pub mod seed;
pub mod studies;
pub mod types;

pub use browse::{browse, BrowseFilter};
pub use overview::{
    ParticipantOverview, ReceivedApplication, ResearcherOverview, SubmittedApplication,
};
pub use studies::StudyStore;
pub use types::{
    ApplicationStatus, InvalidProfile, NewStudy, ParseEnumError, ParticipantProfile, Profile, RequirementType,
    ResearcherProfile, ScreeningResponse, Study, StudyApplication, StudyCategory, StudyLocation,
    StudyMethodology, StudyRequirement, StudyStatus, User, UserType,
};
