use std::sync::Arc;

use chrono::{DateTime, Utc};
use colend_core::{AppError, AppResult, NbfcId, UserIdentity};
use colend_domain::{PermissionMap, PermissionMapReport};
use tracing::{info, warn};

use crate::navigation::{NavigationPlan, NavigationService, Redirect};
use crate::permission_ports::PermissionSource;


#[derive(Debug, Clone)]
struct SignedIn {
    identity: UserIdentity,
    logged_in_at: DateTime<Utc>,
    selected_nbfc: Option<NbfcId>,
}

#[derive(Debug, Clone)]
struct CachedPlan<E> {
    generation: u64,
    plan: NavigationPlan<E>,
    redirect_taken: bool,
}

/// Per-user dashboard session holding identity, permissions and NBFC selection.
///
/// Every mutation goes through `&mut self`, so a permission map is always fully
/// built before any route filtering reads it.
pub struct AccessSession<E> {
    source: Arc<dyn PermissionSource>,
    navigation: NavigationService<E>,
    signed_in: Option<SignedIn>,
    permissions: Arc<PermissionMap>,
    generation: u64,
    cached_plan: Option<CachedPlan<E>>,
}

impl<E: Clone> AccessSession<E> {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new(source: Arc<dyn PermissionSource>, navigation: NavigationService<E>) -> Self {
        Self {
            source,
            navigation,
            signed_in: None,
            permissions: Arc::new(PermissionMap::default()),
            generation: 0,
            cached_plan: None,
        }
    }

    /// Signs a user in and loads their permissions.
    ///
    /// A failing permission source leaves the session signed out.
    pub async fn login(&mut self, identity: UserIdentity) -> AppResult<()> {
        let payload = match self.source.fetch_permissions(&identity).await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(
                    subject = identity.subject(),
                    error = %error,
                    "failed to load permissions during login"
                );
                self.clear();
                return Err(error);
            }
        };

        let (permissions, report) = PermissionMap::from_payload(&payload);
        log_build_report(identity.subject(), &report);

        info!(
            subject = identity.subject(),
            role = identity.role(),
            modules = permissions.len(),
            "dashboard session established"
        );

        self.signed_in = Some(SignedIn {
            identity,
            logged_in_at: Utc::now(),
            selected_nbfc: None,
        });
        self.install_permissions(permissions);
        Ok(())
    }

    /// Reloads permissions after a role change or session refresh.
    ///
    /// On a source failure the session keeps running with no module access.
    pub async fn refresh_permissions(&mut self) -> AppResult<()> {
        let identity = self.require_signed_in()?.identity.clone();

        match self.source.fetch_permissions(&identity).await {
            Ok(payload) => {
                let (permissions, report) = PermissionMap::from_payload(&payload);
                log_build_report(identity.subject(), &report);
                info!(
                    subject = identity.subject(),
                    modules = permissions.len(),
                    "permissions refreshed"
                );
                self.install_permissions(permissions);
                Ok(())
            }
            Err(error) => {
                warn!(
                    subject = identity.subject(),
                    error = %error,
                    "permission refresh failed, revoking module access"
                );
                self.install_permissions(PermissionMap::default());
                Err(error)
            }
        }
    }

    /// Ends the session and forgets all per-user state.
    pub fn logout(&mut self) {
        if let Some(signed_in) = &self.signed_in {
            info!(subject = signed_in.identity.subject(), "dashboard session ended");
        }
        self.clear();
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.signed_in.is_some()
    }

    /// Returns the signed-in identity.
    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.signed_in.as_ref().map(|signed_in| &signed_in.identity)
    }

    /// Returns when the current session was established.
    #[must_use]
    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in.as_ref().map(|signed_in| signed_in.logged_in_at)
    }

    /// Returns the permission map currently in force.
    #[must_use]
    pub fn permission_map(&self) -> Arc<PermissionMap> {
        Arc::clone(&self.permissions)
    }

    /// Returns a counter bumped every time the permission map is replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selects the NBFC the dashboard is scoped to.
    pub fn select_nbfc(&mut self, nbfc_id: NbfcId) -> AppResult<()> {
        let signed_in = self.require_signed_in_mut()?;
        signed_in.selected_nbfc = Some(nbfc_id);
        Ok(())
    }

    /// Returns the selected NBFC, if any.
    #[must_use]
    pub fn selected_nbfc(&self) -> Option<NbfcId> {
        self.signed_in
            .as_ref()
            .and_then(|signed_in| signed_in.selected_nbfc)
    }

    /// Clears the NBFC selection.
    pub fn clear_nbfc_selection(&mut self) {
        if let Some(signed_in) = self.signed_in.as_mut() {
            signed_in.selected_nbfc = None;
        }
    }

    /// Returns the navigation plan for the current permission map.
    ///
    /// The plan is computed once per permission map and reused afterwards.
    pub fn navigation(&mut self) -> AppResult<&NavigationPlan<E>> {
        Ok(&self.current_plan()?.plan)
    }

    /// Returns the pending root redirect, at most once per permission map.
    pub fn take_redirect(&mut self) -> AppResult<Option<Redirect>> {
        let cached = self.current_plan()?;
        if cached.redirect_taken {
            return Ok(None);
        }

        cached.redirect_taken = true;
        Ok(cached.plan.redirect().cloned())
    }

    fn current_plan(&mut self) -> AppResult<&mut CachedPlan<E>> {
        let is_super_admin = self.require_signed_in()?.identity.is_super_admin();

        let stale = self
            .cached_plan
            .as_ref()
            .is_none_or(|cached| cached.generation != self.generation);
        if stale {
            let plan = self.navigation.plan(&self.permissions, is_super_admin);
            self.cached_plan = Some(CachedPlan {
                generation: self.generation,
                plan,
                redirect_taken: false,
            });
        }

        self.cached_plan
            .as_mut()
            .ok_or_else(|| AppError::Internal("navigation plan cache is empty".to_owned()))
    }

    fn install_permissions(&mut self, permissions: PermissionMap) {
        self.permissions = Arc::new(permissions);
        self.generation += 1;
        self.cached_plan = None;
    }

    fn clear(&mut self) {
        self.signed_in = None;
        self.install_permissions(PermissionMap::default());
    }

    fn require_signed_in(&self) -> AppResult<&SignedIn> {
        self.signed_in
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("no user is signed in".to_owned()))
    }

    fn require_signed_in_mut(&mut self) -> AppResult<&mut SignedIn> {
        self.signed_in
            .as_mut()
            .ok_or_else(|| AppError::Unauthorized("no user is signed in".to_owned()))
    }
}

fn log_build_report(subject: &str, report: &PermissionMapReport) {
    if report.malformed_payload {
        warn!(subject, "permission payload is not a list, denying all modules");
    }

    if report.dropped_records > 0 {
        warn!(
            subject,
            dropped = report.dropped_records,
            "permission records without a module name were dropped"
        );
    }

    if !report.duplicate_modules.is_empty() {
        warn!(
            subject,
            modules = ?report.duplicate_modules,
            "duplicate permission modules, last record wins"
        );
    }
}
