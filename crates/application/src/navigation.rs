use std::collections::HashSet;
use std::sync::Arc;

use colend_core::{AppError, AppResult};
use colend_domain::{
    DEFAULT_SIBLING_COUNT, MenuSection, Pager, PermissionMap, RouteDescriptor, contains_root,
    filter_menu, is_route_allowed,
};
use serde::Serialize;
use tracing::{debug, info, warn};

const DEFAULT_FALLBACK_PATH: &str = "/overview";
const DEFAULT_PAGE_SIZE: usize = 10;

/// Tunables for navigation and table paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSettings {
    fallback_path: String,
    sibling_count: usize,
    default_page_size: usize,
}

impl NavigationSettings {
    /// Creates validated navigation settings.
    pub fn new(
        fallback_path: impl Into<String>,
        sibling_count: usize,
        default_page_size: usize,
    ) -> AppResult<Self> {
        let fallback_path = fallback_path.into().trim().to_owned();
        if !fallback_path.starts_with('/') {
            return Err(AppError::Validation(format!(
                "fallback path '{fallback_path}' must start with '/'"
            )));
        }

        if default_page_size == 0 {
            return Err(AppError::Validation(
                "default page size must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            fallback_path,
            sibling_count,
            default_page_size,
        })
    }

    /// Returns where users without a root route are sent.
    #[must_use]
    pub fn fallback_path(&self) -> &str {
        self.fallback_path.as_str()
    }

    /// Returns the pager sibling window width.
    #[must_use]
    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// Returns the initial rows per page.
    #[must_use]
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            fallback_path: DEFAULT_FALLBACK_PATH.to_owned(),
            sibling_count: DEFAULT_SIBLING_COUNT,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// How the router should perform a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Replace the current history entry instead of pushing a new one.
    Replace,
}

/// Redirect issued when the application root is not reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    target: String,
    mode: NavigationMode,
}

impl Redirect {
    /// Creates a replace-navigation redirect.
    #[must_use]
    pub fn replace(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Replace,
        }
    }

    /// Returns the redirect target path.
    #[must_use]
    pub fn target(&self) -> &str {
        self.target.as_str()
    }

    /// Returns the navigation mode.
    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }
}

/// Routes, menu and fallback decision for one permission map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationPlan<E> {
    routes: Vec<RouteDescriptor<E>>,
    menu: Vec<MenuSection>,
    redirect: Option<Redirect>,
}

impl<E> NavigationPlan<E> {
    /// Returns the routes the user may open, in registry order.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor<E>] {
        self.routes.as_slice()
    }

    /// Returns the visible sidebar sections.
    #[must_use]
    pub fn menu(&self) -> &[MenuSection] {
        self.menu.as_slice()
    }

    /// Returns the redirect to perform, if the root is not reachable.
    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    /// Returns whether a route with exactly this pattern is allowed.
    #[must_use]
    pub fn allows_path(&self, path: &str) -> bool {
        self.routes.iter().any(|route| route.path() == path)
    }
}

/// Resolves what a user may reach in the static dashboard registry.
#[derive(Debug, Clone)]
pub struct NavigationService<E> {
    routes: Arc<[RouteDescriptor<E>]>,
    menu: Arc<[MenuSection]>,
    settings: NavigationSettings,
}

impl<E: Clone> NavigationService<E> {
    /// Creates a navigation service over a static registry.
    ///
    /// Route paths must be unique.
    pub fn new(
        routes: Vec<RouteDescriptor<E>>,
        menu: Vec<MenuSection>,
        settings: NavigationSettings,
    ) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.path()) {
                return Err(AppError::Conflict(format!(
                    "route path '{}' is registered more than once",
                    route.path()
                )));
            }
        }

        Ok(Self {
            routes: routes.into(),
            menu: menu.into(),
            settings,
        })
    }

    /// Returns the settings in effect.
    #[must_use]
    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Returns the full static registry.
    #[must_use]
    pub fn registry(&self) -> &[RouteDescriptor<E>] {
        &self.routes
    }

    /// Filters the registry and menu for a permission map.
    ///
    /// A redirect to the fallback path is attached whenever the filtered
    /// routes do not include the application root.
    #[must_use]
    pub fn plan(&self, permissions: &PermissionMap, is_super_admin: bool) -> NavigationPlan<E> {
        let mut routes: Vec<RouteDescriptor<E>> = Vec::with_capacity(self.routes.len());
        for route in self.routes.iter() {
            if is_route_allowed(route, permissions, is_super_admin) {
                routes.push(route.clone());
            } else {
                debug!(path = route.path(), "route hidden by permissions");
            }
        }
        let menu = filter_menu(&self.menu, permissions, is_super_admin);

        let redirect = if contains_root(&routes) {
            None
        } else {
            let fallback_path = self.settings.fallback_path();
            info!(
                fallback_path,
                allowed_routes = routes.len(),
                "root route not permitted, redirecting"
            );
            if !routes.iter().any(|route| route.path() == fallback_path) {
                warn!(
                    fallback_path,
                    "fallback path is not among the permitted routes"
                );
            }
            Some(Redirect::replace(fallback_path))
        };

        NavigationPlan {
            routes,
            menu,
            redirect,
        }
    }

    /// Creates a pager for a table using the configured defaults.
    pub fn pager(&self, total_items: usize) -> AppResult<Pager> {
        Ok(Pager::new(total_items, self.settings.default_page_size)?
            .with_sibling_count(self.settings.sibling_count))
    }
}

#[cfg(test)]
mod tests {
    use colend_domain::{
        MenuItem, MenuSection, ModulePermissions, PermissionMap, PermissionRecord,
        RequiredAction, RouteDescriptor, build_permission_map, filter_routes,
    };

    use super::{NavigationMode, NavigationService, NavigationSettings};

    fn registry() -> Vec<RouteDescriptor<&'static str>> {
        vec![
            RouteDescriptor::guarded("/", "nbfc", RequiredAction::Any, "home"),
            RouteDescriptor::public("/overview", "overview"),
            RouteDescriptor::guarded("/bre", "bre", RequiredAction::View, "bre"),
        ]
    }

    fn menu() -> Vec<MenuSection> {
        vec![MenuSection::new(
            "Main",
            vec![
                MenuItem::public("Overview", "/overview"),
                MenuItem::guarded("BRE", "/bre", "bre", RequiredAction::View),
            ],
        )]
    }

    fn service() -> NavigationService<&'static str> {
        NavigationService::new(registry(), menu(), NavigationSettings::default())
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn settings_reject_relative_fallback() {
        assert!(NavigationSettings::new("overview", 1, 10).is_err());
        assert!(NavigationSettings::new("/overview", 1, 0).is_err());
        assert!(NavigationSettings::new(" /home ", 2, 25).is_ok());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let mut routes = registry();
        routes.push(RouteDescriptor::public("/bre", "shadow"));
        let service = NavigationService::new(routes, menu(), NavigationSettings::default());
        assert!(service.is_err());
    }

    #[test]
    fn empty_map_redirects_to_fallback_with_replace() {
        let plan = service().plan(&PermissionMap::default(), false);

        assert_eq!(plan.routes().len(), 1);
        assert!(plan.allows_path("/overview"));
        let redirect = plan.redirect().cloned();
        assert_eq!(redirect.as_ref().map(|r| r.target()), Some("/overview"));
        assert_eq!(redirect.map(|r| r.mode()), Some(NavigationMode::Replace));
    }

    #[test]
    fn reachable_root_needs_no_redirect() {
        let map = build_permission_map(&[PermissionRecord::new(
            "nbfc",
            ModulePermissions {
                approve: true,
                ..ModulePermissions::default()
            },
        )]);

        let plan = service().plan(&map, false);
        assert!(plan.redirect().is_none());
        assert!(plan.allows_path("/"));
        assert!(!plan.allows_path("/bre"));
        assert_eq!(plan.menu()[0].items().len(), 1);
    }

    #[test]
    fn plan_routes_match_domain_filter_in_registry_order() {
        let service = service();
        let map = build_permission_map(&[
            PermissionRecord::new(
                "bre",
                ModulePermissions {
                    view: true,
                    ..ModulePermissions::default()
                },
            ),
            PermissionRecord::new(
                "nbfc",
                ModulePermissions {
                    edit: true,
                    ..ModulePermissions::default()
                },
            ),
        ]);

        let plan = service.plan(&map, false);
        let expected: Vec<RouteDescriptor<&'static str>> =
            filter_routes(service.registry(), &map, false)
                .into_iter()
                .cloned()
                .collect();
        assert_eq!(plan.routes(), expected.as_slice());
        let paths: Vec<&str> = plan.routes().iter().map(|route| route.path()).collect();
        assert_eq!(paths, vec!["/", "/overview", "/bre"]);
    }

    #[test]
    fn super_admin_plan_matches_registry() {
        let service = service();
        let plan = service.plan(&PermissionMap::default(), true);
        assert_eq!(plan.routes(), service.registry());
        assert!(plan.redirect().is_none());
    }

    #[test]
    fn pager_uses_configured_defaults() {
        let settings = NavigationSettings::new("/overview", 2, 25).unwrap_or_default();
        let service = NavigationService::new(registry(), menu(), settings)
            .unwrap_or_else(|_| unreachable!());

        let pager = service.pager(260);
        let pager = pager.unwrap_or_else(|_| unreachable!());
        assert_eq!(pager.page_size(), 25);
        assert_eq!(pager.sibling_count(), 2);
        assert_eq!(pager.total_pages(), 11);
    }
}
