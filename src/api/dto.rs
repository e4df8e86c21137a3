//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::navigation::Navigation;
use crate::session::SessionStatus;
use crate::store::{
    BrowseFilter, RequirementType, ScreeningResponse, Study, StudyApplication, StudyCategory,
    StudyLocation, StudyMethodology, User, UserType, ApplicationStatus,
};

// ============================================
// SESSION DTOs
// ============================================

/// Login request; the password is accepted but never checked
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// Current session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub status: SessionStatus,
    pub user: Option<User>,
}

/// Registration acknowledgement
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub status: String,
}

// ============================================
// STUDY DTOs
// ============================================

/// Browse query parameters; `all` or an empty value disables a filter
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_compensation: Option<f64>,
}

impl BrowseParams {
    pub fn into_filter(self) -> ApiResult<BrowseFilter> {
        Ok(BrowseFilter {
            search_term: self.search.unwrap_or_default(),
            category: parse_choice::<StudyCategory>(self.category)?,
            methodology: parse_choice::<StudyMethodology>(self.methodology)?,
            location: parse_choice::<StudyLocation>(self.location)?,
            min_compensation: self.min_compensation.unwrap_or(0.0),
        })
    }
}

fn parse_choice<T>(value: Option<String>) -> ApiResult<Option<T>>
where
    T: std::str::FromStr<Err = crate::store::ParseEnumError>,
{
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e: crate::store::ParseEnumError| ApiError::Validation(e.to_string())),
    }
}

/// Study list response
#[derive(Debug, Serialize)]
pub struct StudyListResponse {
    pub studies: Vec<Study>,
    pub total: usize,
}

impl StudyListResponse {
    pub fn new(studies: Vec<Study>) -> Self {
        Self {
            total: studies.len(),
            studies,
        }
    }
}

/// Requirement as entered on the creation form (ids are assigned on submit)
#[derive(Debug, Clone, Deserialize)]
pub struct RequirementInput {
    #[serde(rename = "type", default = "default_requirement_type")]
    pub kind: RequirementType,
    pub description: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_requirement_type() -> RequirementType {
    RequirementType::Custom
}

fn default_required() -> bool {
    true
}

/// Create study request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyRequest {
    pub title: String,
    pub description: String,
    pub category: StudyCategory,
    pub methodology: StudyMethodology,
    pub compensation: f64,
    pub duration: String,
    pub participant_limit: u32,
    pub location: StudyLocation,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<RequirementInput>,
}

// ============================================
// APPLICATION DTOs
// ============================================

/// Apply request.
///
/// Either explicit `responses`, or the three answers of the standard
/// application form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub responses: Vec<ScreeningResponse>,
    #[serde(default)]
    pub motivation: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

impl ApplyRequest {
    pub fn into_responses(self) -> Vec<ScreeningResponse> {
        if !self.responses.is_empty() {
            return self.responses;
        }
        if self.motivation.is_none() && self.experience.is_none() && self.availability.is_none() {
            return Vec::new();
        }

        vec![
            ScreeningResponse::new(
                "1",
                "Why are you interested in this study?",
                self.motivation.unwrap_or_default(),
            ),
            ScreeningResponse::new(
                "2",
                "Relevant experience",
                self.experience.unwrap_or_default(),
            ),
            ScreeningResponse::new("3", "Availability", self.availability.unwrap_or_default()),
        ]
    }
}

/// Update application status request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// Application list response
#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<StudyApplication>,
    pub total: usize,
}

impl ApplicationListResponse {
    pub fn new(applications: Vec<StudyApplication>) -> Self {
        Self {
            total: applications.len(),
            applications,
        }
    }
}

/// Study detail for the current visitor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDetailResponse {
    #[serde(flatten)]
    pub study: Study,
    /// Whether the logged-in participant already applied
    pub has_applied: bool,
    pub spots_remaining: u32,
}

// ============================================
// NAVIGATION / PREFERENCE DTOs
// ============================================

#[derive(Debug, Deserialize)]
pub struct NavigateParams {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub path: String,
    #[serde(flatten)]
    pub navigation: Navigation,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkModeDto {
    pub dark_mode: bool,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Study store status
    pub store: String,
    /// Session status: loading, ready
    pub session: String,
    /// Number of studies held
    pub studies: usize,
    /// Number of applications held
    pub applications: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_params_into_filter() {
        let params = BrowseParams {
            search: Some("usability".to_string()),
            category: Some("UX Research".to_string()),
            methodology: Some("all".to_string()),
            location: Some(String::new()),
            min_compensation: Some(100.0),
        };

        let filter = params.into_filter().unwrap();
        assert_eq!(filter.search_term, "usability");
        assert_eq!(filter.category, Some(StudyCategory::UxResearch));
        assert_eq!(filter.methodology, None);
        assert_eq!(filter.location, None);
        assert_eq!(filter.min_compensation, 100.0);
    }

    #[test]
    fn test_browse_params_reject_unknown_values() {
        let params = BrowseParams {
            location: Some("moon".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_filter(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_apply_request_from_form_answers() {
        let request = ApplyRequest {
            motivation: Some("I love fintech".to_string()),
            availability: Some("Weekday evenings".to_string()),
            ..Default::default()
        };

        let responses = request.into_responses();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].question, "Why are you interested in this study?");
        assert_eq!(responses[0].answer, "I love fintech");
        assert_eq!(responses[1].answer, "");
        assert_eq!(responses[2].question_id, "3");
    }

    #[test]
    fn test_apply_request_prefers_explicit_responses() {
        let request = ApplyRequest {
            responses: vec![ScreeningResponse::new("q", "Own a smart speaker?", "Yes")],
            motivation: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(request.into_responses().len(), 1);

        assert!(ApplyRequest::default().into_responses().is_empty());
    }

    #[test]
    fn test_login_request_reads_type() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email": "a@b.c", "type": "researcher"}"#).unwrap();
        assert_eq!(req.user_type, UserType::Researcher);
        assert_eq!(req.password, "");
    }
}
