//! Navigation
//!
//! The application's route table and its access guard. Given a path and the
//! session, [`navigate`] decides whether to render the page, redirect, or
//! wait for the session to finish loading.
//!
//! | Path | Access |
//! |------|--------|
//! | `/`, `/login`, `/register` | public |
//! | `/researcher/dashboard`, `/researcher/create-study` | researcher |
//! | `/participant/dashboard` | participant |
//! | `/participant/browse`, `/participant/study/:studyId` | public |
//! | anything else | redirect to `/` |

use serde::Serialize;

use crate::session::SessionStore;
use crate::store::types::{User, UserType};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// A page of the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "studyId", rename_all = "kebab-case")]
pub enum Route {
    Landing,
    Login,
    Register,
    ResearcherDashboard,
    CreateStudy,
    ParticipantDashboard,
    Browse,
    StudyDetail(String),
}

impl Route {
    /// Match a path against the route table; `None` for unknown paths.
    ///
    /// Query strings and a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        let route = match trimmed {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/researcher/dashboard" => Route::ResearcherDashboard,
            "/researcher/create-study" => Route::CreateStudy,
            "/participant/dashboard" => Route::ParticipantDashboard,
            "/participant/browse" => Route::Browse,
            other => {
                let id = other.strip_prefix("/participant/study/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::StudyDetail(id.to_string())
            }
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => HOME_PATH.to_string(),
            Route::Login => LOGIN_PATH.to_string(),
            Route::Register => "/register".to_string(),
            Route::ResearcherDashboard => UserType::Researcher.dashboard_path().to_string(),
            Route::CreateStudy => "/researcher/create-study".to_string(),
            Route::ParticipantDashboard => UserType::Participant.dashboard_path().to_string(),
            Route::Browse => "/participant/browse".to_string(),
            Route::StudyDetail(id) => format!("/participant/study/{id}"),
        }
    }

    /// Role a user must have to see this page; `None` for public pages
    pub fn required_role(&self) -> Option<UserType> {
        match self {
            Route::ResearcherDashboard | Route::CreateStudy => Some(UserType::Researcher),
            Route::ParticipantDashboard => Some(UserType::Participant),
            Route::Landing
            | Route::Login
            | Route::Register
            | Route::Browse
            | Route::StudyDetail(_) => None,
        }
    }
}

/// Outcome of navigating to a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Navigation {
    /// The session is still loading; show a spinner
    Loading,
    Render { route: Route },
    Redirect { to: String },
}

impl Navigation {
    fn redirect(to: impl Into<String>) -> Self {
        Navigation::Redirect { to: to.into() }
    }
}

/// Decide what happens when `user` opens `route`
pub fn guard(route: Route, user: Option<&User>) -> Navigation {
    let Some(role) = route.required_role() else {
        return Navigation::Render { route };
    };

    match user {
        None => Navigation::redirect(LOGIN_PATH),
        Some(user) if user.user_type() != role => {
            Navigation::redirect(user.user_type().dashboard_path())
        }
        Some(_) => Navigation::Render { route },
    }
}

/// Resolve a path against the route table and the session
pub fn navigate(path: &str, session: &SessionStore) -> Navigation {
    let Some(route) = Route::parse(path) else {
        tracing::debug!(path, "Unknown path, redirecting home");
        return Navigation::redirect(HOME_PATH);
    };

    if route.required_role().is_some() && session.is_loading() {
        return Navigation::Loading;
    }

    guard(route, session.current_user())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use std::sync::Arc;

    fn session(user_type: Option<UserType>) -> SessionStore {
        let mut session = SessionStore::new(Arc::new(MemoryStore::new()));
        session.restore().unwrap();
        if let Some(user_type) = user_type {
            session.login("user@example.com", "", user_type).unwrap();
        }
        session
    }

    fn render(route: Route) -> Navigation {
        Navigation::Render { route }
    }

    fn redirect(to: &str) -> Navigation {
        Navigation::Redirect { to: to.to_string() }
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Landing));
        assert_eq!(Route::parse("/login?type=participant"), Some(Route::Login));
        assert_eq!(Route::parse("/participant/browse/"), Some(Route::Browse));
        assert_eq!(
            Route::parse("/participant/study/8"),
            Some(Route::StudyDetail("8".to_string()))
        );
        assert_eq!(Route::parse("/participant/study/"), None);
        assert_eq!(Route::parse("/participant/study/8/extra"), None);
        assert_eq!(Route::parse("/dashboard"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn test_route_paths_parse_back() {
        let routes = [
            Route::Landing,
            Route::Login,
            Route::Register,
            Route::ResearcherDashboard,
            Route::CreateStudy,
            Route::ParticipantDashboard,
            Route::Browse,
            Route::StudyDetail("abc".to_string()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_unknown_paths_redirect_home() {
        let session = session(None);
        assert_eq!(navigate("/dashboard", &session), redirect("/"));
        assert_eq!(navigate("/admin", &session), redirect("/"));
    }

    #[test]
    fn test_public_pages_render_without_user() {
        let session = session(None);
        for path in ["/", "/login", "/register", "/participant/browse", "/participant/study/3"] {
            assert!(matches!(navigate(path, &session), Navigation::Render { .. }), "{path}");
        }
    }

    #[test]
    fn test_protected_pages_require_login() {
        let session = session(None);
        for path in [
            "/researcher/dashboard",
            "/researcher/create-study",
            "/participant/dashboard",
        ] {
            assert_eq!(navigate(path, &session), redirect("/login"), "{path}");
        }
    }

    #[test]
    fn test_wrong_role_goes_to_own_dashboard() {
        let participant = session(Some(UserType::Participant));
        assert_eq!(
            navigate("/researcher/create-study", &participant),
            redirect("/participant/dashboard")
        );

        let researcher = session(Some(UserType::Researcher));
        assert_eq!(
            navigate("/participant/dashboard", &researcher),
            redirect("/researcher/dashboard")
        );
    }

    #[test]
    fn test_matching_role_renders() {
        let researcher = session(Some(UserType::Researcher));
        assert_eq!(
            navigate("/researcher/create-study", &researcher),
            render(Route::CreateStudy)
        );

        let participant = session(Some(UserType::Participant));
        assert_eq!(
            navigate("/participant/dashboard", &participant),
            render(Route::ParticipantDashboard)
        );
    }

    #[test]
    fn test_protected_page_waits_for_session() {
        let loading = SessionStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(navigate("/researcher/dashboard", &loading), Navigation::Loading);
        assert_eq!(navigate("/participant/browse", &loading), render(Route::Browse));
    }

    #[test]
    fn test_navigation_serialization() {
        let json = serde_json::to_value(render(Route::StudyDetail("3".to_string()))).unwrap();
        assert_eq!(json["action"], "render");
        assert_eq!(json["route"]["page"], "study-detail");
        assert_eq!(json["route"]["studyId"], "3");

        let json = serde_json::to_value(redirect("/login")).unwrap();
        assert_eq!(json["action"], "redirect");
        assert_eq!(json["to"], "/login");
    }
}
