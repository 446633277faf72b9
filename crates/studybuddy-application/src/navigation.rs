//! Navigation shell: logical routes and the profile guard.

use std::fmt;
use std::sync::Arc;

use studybuddy_core::Result;
use studybuddy_core::profile::ProfileRepository;

/// A page of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Profile,
    Dashboard,
    Subjects,
    Progress,
    Settings,
    NotFound(String),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Welcome => f.write_str("/"),
            Route::Profile => f.write_str("/profile"),
            Route::Dashboard => f.write_str("/dashboard"),
            Route::Subjects => f.write_str("/subjects"),
            Route::Progress => f.write_str("/progress"),
            Route::Settings => f.write_str("/settings"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}

impl Route {
    /// Parses a path. Trailing slashes and case are ignored; anything
    /// unknown becomes [`Route::NotFound`] carrying the original path.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/').to_ascii_lowercase();
        match normalized.as_str() {
            "" => Route::Welcome,
            "/profile" => Route::Profile,
            "/dashboard" => Route::Dashboard,
            "/subjects" => Route::Subjects,
            "/progress" => Route::Progress,
            "/settings" => Route::Settings,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    /// Whether the page needs a stored profile.
    pub fn requires_profile(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Subjects | Route::Progress | Route::Settings
        )
    }
}

/// An entry of the dashboard side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        label: "Home",
        path: "/dashboard",
    },
    NavItem {
        label: "My Subjects",
        path: "/subjects",
    },
    NavItem {
        label: "Progress",
        path: "/progress",
    },
    NavItem {
        label: "Settings",
        path: "/settings",
    },
];

/// Decides which page actually renders for a requested route.
#[derive(Clone)]
pub struct Navigator {
    profiles: Arc<dyn ProfileRepository>,
}

impl Navigator {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Applies the profile guard to `requested`.
    ///
    /// Guarded pages redirect to [`Route::Profile`] while no profile is
    /// stored. Unknown paths are logged and rendered as not-found.
    pub async fn resolve(&self, requested: Route) -> Result<Route> {
        if let Route::NotFound(path) = &requested {
            tracing::warn!(
                "[Navigator] 404 Error: User attempted to access non-existent route: {}",
                path
            );
            return Ok(requested);
        }

        if requested.requires_profile() && self.profiles.load().await?.is_none() {
            tracing::info!("[Navigator] No profile stored, redirecting {} to /profile", requested);
            return Ok(Route::Profile);
        }

        Ok(requested)
    }

    /// Clears the stored profile and returns to the welcome page.
    pub async fn logout(&self) -> Result<Route> {
        self.profiles.clear().await?;
        tracing::info!("[Navigator] Logged out");
        Ok(Route::Welcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_core::profile::{Grade, InMemoryProfileRepository, StudentProfile};

    fn stored() -> Arc<dyn ProfileRepository> {
        let profile = StudentProfile::new("Ravi", Some(Grade::Middle), None, None).unwrap();
        Arc::new(InMemoryProfileRepository::with_profile(profile))
    }

    #[test]
    fn test_parse_known_and_unknown_paths() {
        assert_eq!(Route::parse("/"), Route::Welcome);
        assert_eq!(Route::parse(""), Route::Welcome);
        assert_eq!(Route::parse("/Dashboard/"), Route::Dashboard);
        assert_eq!(
            Route::parse("/homework"),
            Route::NotFound("/homework".to_string())
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for route in [
            Route::Welcome,
            Route::Profile,
            Route::Dashboard,
            Route::Subjects,
            Route::Progress,
            Route::Settings,
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }

    #[tokio::test]
    async fn test_guard_redirects_without_profile() {
        let navigator = Navigator::new(Arc::new(InMemoryProfileRepository::new()));
        for route in [Route::Dashboard, Route::Subjects, Route::Progress, Route::Settings] {
            assert_eq!(navigator.resolve(route).await.unwrap(), Route::Profile);
        }
        assert_eq!(
            navigator.resolve(Route::Welcome).await.unwrap(),
            Route::Welcome
        );
        assert_eq!(
            navigator.resolve(Route::Profile).await.unwrap(),
            Route::Profile
        );
    }

    #[tokio::test]
    async fn test_guard_passes_with_profile() {
        let navigator = Navigator::new(stored());
        assert_eq!(
            navigator.resolve(Route::Dashboard).await.unwrap(),
            Route::Dashboard
        );
    }

    #[tokio::test]
    async fn test_not_found_is_rendered_even_without_profile() {
        let navigator = Navigator::new(Arc::new(InMemoryProfileRepository::new()));
        let route = Route::parse("/nowhere");
        assert_eq!(navigator.resolve(route.clone()).await.unwrap(), route);
    }

    #[tokio::test]
    async fn test_logout_clears_profile_and_returns_home() {
        let profiles = stored();
        let navigator = Navigator::new(Arc::clone(&profiles));

        assert_eq!(navigator.logout().await.unwrap(), Route::Welcome);
        assert!(profiles.load().await.unwrap().is_none());
        assert_eq!(
            navigator.resolve(Route::Dashboard).await.unwrap(),
            Route::Profile
        );
    }
}
