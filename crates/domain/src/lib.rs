//! Domain types and pure algorithms for dashboard paging and access filtering.

#![forbid(unsafe_code)]

mod menu;
mod pager;
mod pagination;
mod permission;
mod route;

pub use menu::{MenuItem, MenuSection, filter_menu};
pub use pager::Pager;
pub use pagination::{
    DEFAULT_SIBLING_COUNT, PageItem, PageRange, PageRangeRequest, compute_range, total_pages,
};
pub use permission::{
    ModulePermissions, PermissionAction, PermissionMap, PermissionMapReport, PermissionRecord,
    RequiredAction, build_permission_map,
};
pub use route::{
    ModuleGuard, ROOT_PATH, RouteDescriptor, contains_root, filter_routes, is_route_allowed,
};
