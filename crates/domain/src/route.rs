use serde::Serialize;

use crate::permission::{PermissionMap, RequiredAction};

/// Path of the application root.
pub const ROOT_PATH: &str = "/";

/// Anything that may be hidden behind a module permission.
pub trait ModuleGuard {
    /// Module the item belongs to; `None` marks a public item.
    fn module_name(&self) -> Option<&str>;

    /// Capability needed on the module.
    fn required_action(&self) -> RequiredAction;
}

/// Static route compiled into the dashboard.
///
/// `element` is an opaque payload handed back untouched by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor<E> {
    path: String,
    module_name: Option<String>,
    required_action: RequiredAction,
    element: E,
}

impl<E> RouteDescriptor<E> {
    /// Creates a route that every signed-in user may open.
    #[must_use]
    pub fn public(path: impl Into<String>, element: E) -> Self {
        Self {
            path: path.into(),
            module_name: None,
            required_action: RequiredAction::default(),
            element,
        }
    }

    /// Creates a route that needs `required_action` on `module_name`.
    #[must_use]
    pub fn guarded(
        path: impl Into<String>,
        module_name: impl Into<String>,
        required_action: RequiredAction,
        element: E,
    ) -> Self {
        Self {
            path: path.into(),
            module_name: Some(module_name.into()),
            required_action,
            element,
        }
    }

    /// Returns the route pattern.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the rendered payload.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Consumes the route and returns its payload.
    #[must_use]
    pub fn into_element(self) -> E {
        self.element
    }
}

impl<E> ModuleGuard for RouteDescriptor<E> {
    fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    fn required_action(&self) -> RequiredAction {
        self.required_action
    }
}

/// Decides whether the current role may see a guarded item.
///
/// Super admins see everything and items without a module are public. A module
/// missing from `permissions` denies access.
#[must_use]
pub fn is_route_allowed<G>(guard: &G, permissions: &PermissionMap, is_super_admin: bool) -> bool
where
    G: ModuleGuard + ?Sized,
{
    if is_super_admin {
        return true;
    }

    let Some(module_name) = guard
        .module_name()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        return true;
    };

    permissions
        .get(module_name)
        .is_some_and(|module| module.satisfies(guard.required_action()))
}

/// Returns the routes the current role may open, in registry order.
#[must_use]
pub fn filter_routes<'a, E>(
    routes: &'a [RouteDescriptor<E>],
    permissions: &PermissionMap,
    is_super_admin: bool,
) -> Vec<&'a RouteDescriptor<E>> {
    routes
        .iter()
        .filter(|route| is_route_allowed(*route, permissions, is_super_admin))
        .collect()
}

/// Returns whether any route serves the application root.
#[must_use]
pub fn contains_root<'a, E: 'a>(routes: impl IntoIterator<Item = &'a RouteDescriptor<E>>) -> bool {
    routes.into_iter().any(|route| route.path() == ROOT_PATH)
}
