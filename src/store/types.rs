//! Core data types for the Namika study marketplace
//!
//! This module defines the entities held by the study store and the session:
//! - `User` and its `Profile` (researcher or participant)
//! - `Study` with its `StudyRequirement`s
//! - `StudyApplication` with its `ScreeningResponse`s
//! - The closed vocabularies (`StudyCategory`, `StudyMethodology`, ...)
//!
//! All types serialize to the camelCase JSON shape used by the session storage
//! and the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error returned when a string does not name a known enum value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Which of the two mutually exclusive roles a user has
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Researcher,
    Participant,
}

impl UserType {
    pub fn all() -> &'static [UserType] {
        &[UserType::Researcher, UserType::Participant]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Researcher => "researcher",
            UserType::Participant => "participant",
        }
    }

    /// Path of the dashboard this role lands on
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserType::Researcher => "/researcher/dashboard",
            UserType::Participant => "/participant/dashboard",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "user type", s)
    }
}

/// Profile of a researcher posting studies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearcherProfile {
    pub company_name: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub description: String,
    pub verified: bool,
    pub studies_posted: u32,
    pub total_spent: f64,
    pub rating: f64,
}

/// Profile of a participant applying to studies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantProfile {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub location: String,
    pub occupation: String,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub total_earnings: f64,
    pub studies_completed: u32,
    pub rating: f64,
    pub verified: bool,
}

/// A user's profile; the variant decides the user's role
///
/// Serialized as the bare profile object. Which variant a stored object
/// belongs to is read from the user's `type`, see [`Profile::from_value`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Profile {
    Researcher(ResearcherProfile),
    Participant(ParticipantProfile),
}

impl Profile {
    /// Parse a profile object as the profile of `user_type`
    pub fn from_value(
        user_type: UserType,
        value: serde_json::Value,
    ) -> Result<Self, InvalidProfile> {
        let parsed = match user_type {
            UserType::Researcher => serde_json::from_value(value).map(Profile::Researcher),
            UserType::Participant => serde_json::from_value(value).map(Profile::Participant),
        };
        parsed.map_err(|e| InvalidProfile {
            user_type,
            error: e.to_string(),
        })
    }

    pub fn user_type(&self) -> UserType {
        match self {
            Profile::Researcher(_) => UserType::Researcher,
            Profile::Participant(_) => UserType::Participant,
        }
    }

    pub fn first_name(&self) -> &str {
        match self {
            Profile::Researcher(p) => &p.first_name,
            Profile::Participant(p) => &p.first_name,
        }
    }

    pub fn rating(&self) -> f64 {
        match self {
            Profile::Researcher(p) => p.rating,
            Profile::Participant(p) => p.rating,
        }
    }

    pub fn as_researcher(&self) -> Option<&ResearcherProfile> {
        match self {
            Profile::Researcher(p) => Some(p),
            Profile::Participant(_) => None,
        }
    }

    pub fn as_participant(&self) -> Option<&ParticipantProfile> {
        match self {
            Profile::Participant(p) => Some(p),
            Profile::Researcher(_) => None,
        }
    }
}

/// A logged-in user
///
/// The role is carried by the profile variant, so a researcher can never hold
/// a participant profile. On the wire the role is still written as a sibling
/// `type` key next to `profile`, and it decides how `profile` is read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredUser", into = "UserRecord")]
pub struct User {
    pub id: String,
    pub email: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn user_type(&self) -> UserType {
        self.profile.user_type()
    }

    pub fn is_researcher(&self) -> bool {
        self.user_type() == UserType::Researcher
    }

    pub fn is_participant(&self) -> bool {
        self.user_type() == UserType::Participant
    }
}

/// Wire shape of a `User`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: String,
    email: String,
    #[serde(rename = "type")]
    user_type: UserType,
    profile: Profile,
    created_at: DateTime<Utc>,
}

/// A `User` as read back, before `profile` is interpreted
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    id: String,
    email: String,
    #[serde(rename = "type")]
    user_type: UserType,
    profile: serde_json::Value,
    created_at: DateTime<Utc>,
}

/// A stored profile that is not a valid profile of the user's `type`
#[derive(Debug, thiserror::Error)]
#[error("invalid {user_type} profile: {error}")]
pub struct InvalidProfile {
    pub user_type: UserType,
    pub error: String,
}

impl TryFrom<StoredUser> for User {
    type Error = InvalidProfile;

    fn try_from(stored: StoredUser) -> Result<Self, Self::Error> {
        Ok(User {
            profile: Profile::from_value(stored.user_type, stored.profile)?,
            id: stored.id,
            email: stored.email,
            created_at: stored.created_at,
        })
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        UserRecord {
            user_type: user.user_type(),
            id: user.id,
            email: user.email,
            profile: user.profile,
            created_at: user.created_at,
        }
    }
}

/// Kind of research a study does
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StudyCategory {
    #[serde(rename = "UX Research")]
    UxResearch,
    #[serde(rename = "Market Research")]
    MarketResearch,
    #[serde(rename = "Product Testing")]
    ProductTesting,
    #[serde(rename = "User Interviews")]
    UserInterviews,
    #[serde(rename = "Survey")]
    Survey,
    #[serde(rename = "Focus Group")]
    FocusGroup,
}

impl StudyCategory {
    pub fn all() -> &'static [StudyCategory] {
        &[
            StudyCategory::UxResearch,
            StudyCategory::MarketResearch,
            StudyCategory::ProductTesting,
            StudyCategory::UserInterviews,
            StudyCategory::Survey,
            StudyCategory::FocusGroup,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyCategory::UxResearch => "UX Research",
            StudyCategory::MarketResearch => "Market Research",
            StudyCategory::ProductTesting => "Product Testing",
            StudyCategory::UserInterviews => "User Interviews",
            StudyCategory::Survey => "Survey",
            StudyCategory::FocusGroup => "Focus Group",
        }
    }
}

impl std::fmt::Display for StudyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "category", s)
    }
}

/// How a study collects its data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StudyMethodology {
    #[serde(rename = "Interview")]
    Interview,
    #[serde(rename = "Survey")]
    Survey,
    #[serde(rename = "Usability Test")]
    UsabilityTest,
    #[serde(rename = "Focus Group")]
    FocusGroup,
    #[serde(rename = "Diary Study")]
    DiaryStudy,
    #[serde(rename = "A/B Test")]
    AbTest,
}

impl StudyMethodology {
    pub fn all() -> &'static [StudyMethodology] {
        &[
            StudyMethodology::Interview,
            StudyMethodology::Survey,
            StudyMethodology::UsabilityTest,
            StudyMethodology::FocusGroup,
            StudyMethodology::DiaryStudy,
            StudyMethodology::AbTest,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyMethodology::Interview => "Interview",
            StudyMethodology::Survey => "Survey",
            StudyMethodology::UsabilityTest => "Usability Test",
            StudyMethodology::FocusGroup => "Focus Group",
            StudyMethodology::DiaryStudy => "Diary Study",
            StudyMethodology::AbTest => "A/B Test",
        }
    }
}

impl std::fmt::Display for StudyMethodology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyMethodology {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "methodology", s)
    }
}

/// Where a study takes place
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StudyLocation {
    Remote,
    InPerson,
    Hybrid,
}

impl StudyLocation {
    pub fn all() -> &'static [StudyLocation] {
        &[StudyLocation::Remote, StudyLocation::InPerson, StudyLocation::Hybrid]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyLocation::Remote => "remote",
            StudyLocation::InPerson => "in-person",
            StudyLocation::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for StudyLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyLocation {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "location", s)
    }
}

/// Lifecycle state of a study
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StudyStatus {
    Active,
    Closed,
    Completed,
}

impl StudyStatus {
    pub fn all() -> &'static [StudyStatus] {
        &[StudyStatus::Active, StudyStatus::Closed, StudyStatus::Completed]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyStatus::Active => "active",
            StudyStatus::Closed => "closed",
            StudyStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for StudyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "study status", s)
    }
}

/// Review state of an application
///
/// Applications start `Pending`; a researcher moves them to any other state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ApplicationStatus {
    pub fn all() -> &'static [ApplicationStatus] {
        &[
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Completed,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "application status", s)
    }
}

/// Kind of eligibility criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequirementType {
    Age,
    Location,
    Experience,
    Custom,
}

impl RequirementType {
    pub fn all() -> &'static [RequirementType] {
        &[
            RequirementType::Age,
            RequirementType::Location,
            RequirementType::Experience,
            RequirementType::Custom,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementType::Age => "age",
            RequirementType::Location => "location",
            RequirementType::Experience => "experience",
            RequirementType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for RequirementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequirementType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_by_name(Self::all(), Self::as_str, "requirement type", s)
    }
}

/// Eligibility criterion attached to a study
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyRequirement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub description: String,
    /// `false` means "preferred"
    pub required: bool,
}

impl StudyRequirement {
    pub fn new(
        id: impl Into<String>,
        kind: RequirementType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            required,
        }
    }
}

/// Answer to one screening question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResponse {
    pub question_id: String,
    pub question: String,
    pub answer: String,
}

impl ScreeningResponse {
    pub fn new(
        question_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A research engagement posted by a researcher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: StudyCategory,
    pub methodology: StudyMethodology,
    pub compensation: f64,
    /// Free text, e.g. "60 minutes"
    pub duration: String,
    pub participant_limit: u32,
    /// Intended to stay at or below `participant_limit`; not enforced
    pub current_applications: u32,
    #[serde(default)]
    pub requirements: Vec<StudyRequirement>,
    pub location: StudyLocation,
    pub status: StudyStatus,
    pub researcher_id: String,
    pub created_at: DateTime<Utc>,
    pub deadline: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Study {
    pub fn is_active(&self) -> bool {
        self.status == StudyStatus::Active
    }

    /// Places left before the participant limit is reached
    pub fn spots_remaining(&self) -> u32 {
        self.participant_limit
            .saturating_sub(self.current_applications)
    }

    pub fn is_full(&self) -> bool {
        self.current_applications >= self.participant_limit
    }

    /// Case-insensitive substring match against title, description and tags.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Everything needed to post a study; the store assigns the rest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudy {
    pub title: String,
    pub description: String,
    pub category: StudyCategory,
    pub methodology: StudyMethodology,
    pub compensation: f64,
    pub duration: String,
    pub participant_limit: u32,
    #[serde(default)]
    pub requirements: Vec<StudyRequirement>,
    pub location: StudyLocation,
    pub status: StudyStatus,
    pub researcher_id: String,
    pub deadline: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewStudy {
    pub(crate) fn into_study(self, id: String, created_at: DateTime<Utc>) -> Study {
        Study {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            methodology: self.methodology,
            compensation: self.compensation,
            duration: self.duration,
            participant_limit: self.participant_limit,
            current_applications: 0,
            requirements: self.requirements,
            location: self.location,
            status: self.status,
            researcher_id: self.researcher_id,
            created_at,
            deadline: self.deadline,
            tags: self.tags,
        }
    }
}

/// A participant's application to a study
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudyApplication {
    pub id: String,
    pub study_id: String,
    pub participant_id: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub responses: Vec<ScreeningResponse>,
}

fn parse_by_name<T: Copy>(
    values: &[T],
    name: fn(&T) -> &'static str,
    kind: &'static str,
    s: &str,
) -> Result<T, ParseEnumError> {
    let s = s.trim();
    values
        .iter()
        .copied()
        .find(|v| name(v).eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseEnumError {
            kind,
            value: s.to_string(),
        })
}
