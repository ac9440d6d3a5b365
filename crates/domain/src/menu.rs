use serde::Serialize;

use crate::permission::{PermissionMap, RequiredAction};
use crate::route::{ModuleGuard, is_route_allowed};

/// Sidebar entry linking to a dashboard route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    label: String,
    path: String,
    module_name: Option<String>,
    required_action: RequiredAction,
}

impl MenuItem {
    /// Creates an entry visible to every signed-in user.
    #[must_use]
    pub fn public(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            module_name: None,
            required_action: RequiredAction::default(),
        }
    }

    /// Creates an entry guarded by a module capability.
    #[must_use]
    pub fn guarded(
        label: impl Into<String>,
        path: impl Into<String>,
        module_name: impl Into<String>,
        required_action: RequiredAction,
    ) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            module_name: Some(module_name.into()),
            required_action,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the linked path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

impl ModuleGuard for MenuItem {
    fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    fn required_action(&self) -> RequiredAction {
        self.required_action
    }
}

/// Titled group of sidebar entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSection {
    label: String,
    items: Vec<MenuItem>,
}

impl MenuSection {
    /// Creates a section.
    #[must_use]
    pub fn new(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    /// Returns the section title.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the entries in display order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        self.items.as_slice()
    }
}

/// Hides entries the current role may not open and drops sections left empty.
#[must_use]
pub fn filter_menu(
    sections: &[MenuSection],
    permissions: &PermissionMap,
    is_super_admin: bool,
) -> Vec<MenuSection> {
    let mut filtered_sections = Vec::new();
    for section in sections {
        let items: Vec<MenuItem> = section
            .items
            .iter()
            .filter(|item| is_route_allowed(*item, permissions, is_super_admin))
            .cloned()
            .collect();

        if items.is_empty() {
            continue;
        }

        filtered_sections.push(MenuSection::new(section.label.clone(), items));
    }

    filtered_sections
}
