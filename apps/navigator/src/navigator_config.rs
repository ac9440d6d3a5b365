use std::env;
use std::path::PathBuf;

use colend_application::NavigationSettings;
use colend_core::{AppError, AppResult, UserIdentity};

#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    pub permissions_dir: PathBuf,
    pub subject: String,
    pub display_name: String,
    pub role: String,
    pub settings: NavigationSettings,
    pub total_items: usize,
}

impl NavigatorConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let permissions_dir = PathBuf::from(required(&lookup, "NAVIGATOR_PERMISSIONS_DIR")?);
        let subject = required(&lookup, "NAVIGATOR_SUBJECT")?;
        let display_name =
            optional(&lookup, "NAVIGATOR_DISPLAY_NAME").unwrap_or_else(|| subject.clone());
        let role = optional(&lookup, "NAVIGATOR_ROLE").unwrap_or_else(|| "operator".to_owned());
        let fallback_path = optional(&lookup, "NAVIGATOR_FALLBACK_PATH")
            .unwrap_or_else(|| NavigationSettings::default().fallback_path().to_owned());
        let sibling_count = parse_usize(
            &lookup,
            "NAVIGATOR_PAGER_SIBLINGS",
            NavigationSettings::default().sibling_count(),
        )?;
        let page_size = parse_usize(
            &lookup,
            "NAVIGATOR_PAGE_SIZE",
            NavigationSettings::default().default_page_size(),
        )?;
        let total_items = parse_usize(&lookup, "NAVIGATOR_TOTAL_ITEMS", 0)?;

        let settings = NavigationSettings::new(fallback_path, sibling_count, page_size)
            .map_err(|error| AppError::Validation(format!("invalid navigator settings: {error}")))?;

        Ok(Self {
            permissions_dir,
            subject,
            display_name,
            role,
            settings,
            total_items,
        })
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(
            self.subject.as_str(),
            self.display_name.as_str(),
            None,
            self.role.as_str(),
        )
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    optional(lookup, name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
) -> AppResult<usize> {
    match optional(lookup, name) {
        Some(value) => value.parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::NavigatorConfig;

    fn load(vars: &[(&str, &str)]) -> Result<NavigatorConfig, colend_core::AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        NavigatorConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = load(&[
            ("NAVIGATOR_PERMISSIONS_DIR", "/tmp/permissions"),
            ("NAVIGATOR_SUBJECT", "analyst"),
        ]);
        let Ok(config) = config else {
            panic!("minimal config must load");
        };

        assert_eq!(config.display_name, "analyst");
        assert_eq!(config.role, "operator");
        assert_eq!(config.settings.fallback_path(), "/overview");
        assert_eq!(config.settings.sibling_count(), 1);
        assert_eq!(config.settings.default_page_size(), 10);
        assert_eq!(config.total_items, 0);
        assert!(!config.identity().is_super_admin());
    }

    #[test]
    fn missing_subject_is_rejected() {
        let config = load(&[("NAVIGATOR_PERMISSIONS_DIR", "/tmp/permissions")]);
        assert!(config.is_err());
    }

    #[test]
    fn invalid_numbers_and_paths_are_rejected() {
        let base = [
            ("NAVIGATOR_PERMISSIONS_DIR", "/tmp/permissions"),
            ("NAVIGATOR_SUBJECT", "analyst"),
        ];

        let mut vars = base.to_vec();
        vars.push(("NAVIGATOR_PAGE_SIZE", "zero"));
        assert!(load(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("NAVIGATOR_PAGE_SIZE", "0"));
        assert!(load(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("NAVIGATOR_FALLBACK_PATH", "overview"));
        assert!(load(&vars).is_err());
    }
}
