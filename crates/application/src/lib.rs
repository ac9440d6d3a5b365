//! Application services and ports.

#![forbid(unsafe_code)]

mod access_session;
mod navigation;
mod permission_ports;
mod route_registry;

pub use access_session::AccessSession;
pub use navigation::{
    NavigationMode, NavigationPlan, NavigationService, NavigationSettings, Redirect,
};
pub use permission_ports::PermissionSource;
pub use route_registry::{
    DashboardPage, dashboard_menu, dashboard_navigation, dashboard_routes, modules,
};
