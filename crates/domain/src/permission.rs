use std::collections::BTreeMap;
use std::str::FromStr;

use colend_core::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Capability a role may hold on a dashboard module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Read access to lists and details.
    View,
    /// Creating new records.
    Create,
    /// Editing existing records.
    Edit,
    /// Deleting records.
    Delete,
    /// Approving records submitted by others.
    Approve,
}

impl PermissionAction {
    /// Returns a stable name for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Approve => "approve",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionAction] = &[
            PermissionAction::View,
            PermissionAction::Create,
            PermissionAction::Edit,
            PermissionAction::Delete,
            PermissionAction::Approve,
        ];

        ALL
    }
}

/// Capability a route or menu item demands before it is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredAction {
    /// Requires view access.
    #[default]
    View,
    /// Requires create access.
    Create,
    /// Requires edit access.
    Edit,
    /// Requires delete access.
    Delete,
    /// Requires approve access.
    Approve,
    /// Requires at least one capability of any kind.
    Any,
}

impl RequiredAction {
    /// Returns a stable name for this requirement.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Any => "any",
        }
    }
}

impl From<PermissionAction> for RequiredAction {
    fn from(action: PermissionAction) -> Self {
        match action {
            PermissionAction::View => Self::View,
            PermissionAction::Create => Self::Create,
            PermissionAction::Edit => Self::Edit,
            PermissionAction::Delete => Self::Delete,
            PermissionAction::Approve => Self::Approve,
        }
    }
}

impl FromStr for RequiredAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "approve" => Ok(Self::Approve),
            "any" => Ok(Self::Any),
            _ => Err(AppError::Validation(format!(
                "unknown required action '{value}'"
            ))),
        }
    }
}

/// Effective capabilities of the current role on one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModulePermissions {
    /// View access.
    pub view: bool,
    /// Create access.
    pub create: bool,
    /// Edit access.
    pub edit: bool,
    /// Delete access.
    pub delete: bool,
    /// Approve access.
    pub approve: bool,
}

impl ModulePermissions {
    /// Returns a record with every capability granted.
    #[must_use]
    pub fn all() -> Self {
        Self {
            view: true,
            create: true,
            edit: true,
            delete: true,
            approve: true,
        }
    }

    /// Returns whether the named capability is granted.
    #[must_use]
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.view,
            PermissionAction::Create => self.create,
            PermissionAction::Edit => self.edit,
            PermissionAction::Delete => self.delete,
            PermissionAction::Approve => self.approve,
        }
    }

    /// Returns whether at least one capability is granted.
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.view || self.create || self.edit || self.delete || self.approve
    }

    /// Returns whether the record satisfies a route requirement.
    #[must_use]
    pub fn satisfies(&self, required: RequiredAction) -> bool {
        match required {
            RequiredAction::View => self.view,
            RequiredAction::Create => self.create,
            RequiredAction::Edit => self.edit,
            RequiredAction::Delete => self.delete,
            RequiredAction::Approve => self.approve,
            RequiredAction::Any => self.allows_any(),
        }
    }
}

/// Permission row as delivered by the backend after login.
///
/// Deserialization never fails on field contents: capability flags follow
/// JavaScript truthiness and a non-string or blank `module_name` becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Module key, e.g. `nbfc` or `bre`.
    #[serde(default, deserialize_with = "lenient_module_name")]
    pub module_name: Option<String>,
    /// View capability.
    #[serde(default, deserialize_with = "truthy")]
    pub view: bool,
    /// Create capability.
    #[serde(default, deserialize_with = "truthy")]
    pub create: bool,
    /// Edit capability.
    #[serde(default, deserialize_with = "truthy")]
    pub edit: bool,
    /// Delete capability.
    #[serde(default, deserialize_with = "truthy")]
    pub delete: bool,
    /// Approve capability.
    #[serde(default, deserialize_with = "truthy")]
    pub approve: bool,
}

impl PermissionRecord {
    /// Creates a record for a module with the given capabilities.
    #[must_use]
    pub fn new(module_name: impl Into<String>, permissions: ModulePermissions) -> Self {
        Self {
            module_name: Some(module_name.into()),
            view: permissions.view,
            create: permissions.create,
            edit: permissions.edit,
            delete: permissions.delete,
            approve: permissions.approve,
        }
    }

    /// Returns the capability flags of this record.
    #[must_use]
    pub fn permissions(&self) -> ModulePermissions {
        ModulePermissions {
            view: self.view,
            create: self.create,
            edit: self.edit,
            delete: self.delete,
            approve: self.approve,
        }
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

fn lenient_module_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(name) => {
            let trimmed = name.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        _ => None,
    })
}

/// Diagnostics gathered while building a [`PermissionMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMapReport {
    /// Whether the payload was not a list at all.
    pub malformed_payload: bool,
    /// Entries skipped for lacking a usable module name or shape.
    pub dropped_records: usize,
    /// Modules that appeared more than once; the last occurrence won.
    pub duplicate_modules: Vec<String>,
}

impl PermissionMapReport {
    /// Returns whether the build skipped or overrode anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.malformed_payload && self.dropped_records == 0 && self.duplicate_modules.is_empty()
    }
}

/// Module capabilities of the current role, keyed by module name.
///
/// The map is immutable once built; a changed payload produces a new map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<String, ModulePermissions>);

impl PermissionMap {
    /// Builds a map from typed records and reports what was skipped.
    #[must_use]
    pub fn from_records_with_report(
        records: &[PermissionRecord],
    ) -> (Self, PermissionMapReport) {
        let mut report = PermissionMapReport::default();
        let mut modules = BTreeMap::new();

        for record in records {
            let Some(module_name) = record
                .module_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
            else {
                report.dropped_records += 1;
                continue;
            };

            let previous = modules.insert(module_name.to_owned(), record.permissions());
            let already_reported = report
                .duplicate_modules
                .iter()
                .any(|name| name == module_name);
            if previous.is_some() && !already_reported {
                report.duplicate_modules.push(module_name.to_owned());
            }
        }

        (Self(modules), report)
    }

    /// Builds a map from a raw backend payload.
    ///
    /// Anything other than a JSON array produces an empty map. Array entries
    /// that are not objects are dropped.
    #[must_use]
    pub fn from_payload(payload: &Value) -> (Self, PermissionMapReport) {
        let Value::Array(entries) = payload else {
            return (
                Self::default(),
                PermissionMapReport {
                    malformed_payload: true,
                    ..PermissionMapReport::default()
                },
            );
        };

        let mut malformed_entries = 0;
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.is_object() {
                malformed_entries += 1;
                continue;
            }

            match PermissionRecord::deserialize(entry) {
                Ok(record) => records.push(record),
                Err(_) => malformed_entries += 1,
            }
        }

        let (map, mut report) = Self::from_records_with_report(&records);
        report.dropped_records += malformed_entries;
        (map, report)
    }

    /// Returns the capabilities for a module.
    #[must_use]
    pub fn get(&self, module_name: &str) -> Option<&ModulePermissions> {
        self.0.get(module_name)
    }

    /// Returns whether the module has an entry.
    #[must_use]
    pub fn contains_module(&self, module_name: &str) -> bool {
        self.0.contains_key(module_name)
    }

    /// Returns the module names in sorted order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no module is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ModulePermissions)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (String, ModulePermissions)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Groups permission records by module name, last record winning.
#[must_use]
pub fn build_permission_map(records: &[PermissionRecord]) -> PermissionMap {
    PermissionMap::from_records_with_report(records).0
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::{
        ModulePermissions, PermissionAction, PermissionMap, PermissionRecord, RequiredAction,
        build_permission_map,
    };

    #[test]
    fn required_action_roundtrip_storage_value() {
        let action = RequiredAction::Approve;
        let restored = RequiredAction::from_str(action.as_str());
        assert_eq!(restored.unwrap_or(RequiredAction::View), action);
    }

    #[test]
    fn unknown_required_action_is_rejected() {
        assert!(RequiredAction::from_str("publish").is_err());
    }

    #[test]
    fn permission_action_maps_to_matching_requirement() {
        for action in PermissionAction::all() {
            assert_eq!(RequiredAction::from(*action).as_str(), action.as_str());
        }
    }

    #[test]
    fn any_requirement_needs_one_capability() {
        assert!(!ModulePermissions::default().satisfies(RequiredAction::Any));

        let approve_only = ModulePermissions {
            approve: true,
            ..ModulePermissions::default()
        };
        assert!(approve_only.satisfies(RequiredAction::Any));
        assert!(!approve_only.satisfies(RequiredAction::View));
    }

    #[test]
    fn payload_capabilities_are_coerced_to_booleans() {
        let payload = json!([{
            "module_name": "bre",
            "view": "Y",
            "create": "false",
            "edit": [1],
            "delete": {"a": 1},
            "approve": 2
        }]);

        let (map, report) = PermissionMap::from_payload(&payload);
        assert!(report.is_clean());
        assert_eq!(map.get("bre").copied(), Some(ModulePermissions::all()));
    }

    #[test]
    fn falsy_capability_values_deny() {
        let payload = json!([{
            "module_name": "nbfc",
            "view": 0,
            "create": "",
            "edit": null,
            "delete": false
        }]);

        let (map, _) = PermissionMap::from_payload(&payload);
        assert_eq!(map.get("nbfc").copied(), Some(ModulePermissions::default()));
    }

    #[test]
    fn missing_capability_fields_default_to_false() {
        let payload = json!([{ "module_name": "nbfc", "view": true, "id": 7 }]);
        let (map, _) = PermissionMap::from_payload(&payload);
        let nbfc = map.get("nbfc").copied().unwrap_or_default();
        assert!(nbfc.view);
        assert!(!nbfc.edit);
    }

    #[test]
    fn entries_without_usable_module_name_are_dropped() {
        let payload = json!([
            { "view": true },
            { "module_name": "   ", "view": true },
            { "module_name": 42, "view": true },
            "product",
            { "module_name": " product ", "view": true }
        ]);

        let (map, report) = PermissionMap::from_payload(&payload);
        assert_eq!(map.len(), 1);
        assert!(map.contains_module("product"));
        assert_eq!(report.dropped_records, 4);
    }

    #[test]
    fn non_list_payload_yields_empty_map() {
        for payload in [json!(null), json!({"module_name": "bre"}), json!("bre")] {
            let (map, report) = PermissionMap::from_payload(&payload);
            assert!(map.is_empty());
            assert!(report.malformed_payload);
        }
    }

    #[test]
    fn duplicate_modules_keep_the_last_record() {
        let records = vec![
            PermissionRecord::new("bre", ModulePermissions::all()),
            PermissionRecord::new(
                "bre",
                ModulePermissions {
                    view: true,
                    ..ModulePermissions::default()
                },
            ),
            PermissionRecord::new("bre", ModulePermissions::default()),
        ];

        let (map, report) = PermissionMap::from_records_with_report(&records);
        assert_eq!(map.get("bre").copied(), Some(ModulePermissions::default()));
        assert_eq!(report.duplicate_modules, vec!["bre".to_owned()]);
        assert_eq!(build_permission_map(&records), map);
    }

    #[test]
    fn module_names_are_sorted() {
        let map = build_permission_map(&[
            PermissionRecord::new("repayment", ModulePermissions::default()),
            PermissionRecord::new("bre", ModulePermissions::default()),
        ]);
        assert_eq!(map.module_names().collect::<Vec<_>>(), vec!["bre", "repayment"]);
    }
}
