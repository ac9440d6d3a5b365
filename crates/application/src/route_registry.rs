use colend_core::AppResult;
use colend_domain::{MenuItem, MenuSection, RequiredAction, RouteDescriptor};
use serde::Serialize;

use crate::navigation::{NavigationService, NavigationSettings};

/// Module keys used by the backend permission payload.
pub mod modules {
    /// NBFC onboarding and partner management.
    pub const NBFC: &str = "nbfc";
    /// Loan pool buyout review.
    pub const POOL_BUYOUT: &str = "pool_buyout";
    /// Business rule engine configuration.
    pub const BRE: &str = "bre";
    /// Disbursement tracking.
    pub const DISBURSEMENT: &str = "disbursement";
    /// Repayment schedules and statements.
    pub const REPAYMENT: &str = "repayment";
    /// Loan product catalogue.
    pub const PRODUCT: &str = "product";
    /// Dashboard user administration.
    pub const USER: &str = "user";
}

/// Pages of the co-lending dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPage {
    /// Partner portfolio landing page.
    Home,
    /// Summary page reachable by every signed-in user.
    Overview,
    /// New NBFC onboarding wizard.
    NbfcOnboarding,
    /// One NBFC's profile and limits.
    NbfcDetail,
    /// Pools offered for buyout.
    PoolBuyout,
    /// Approval view for a single pool.
    PoolBuyoutReview,
    /// Rule engine configuration list.
    BreConfig,
    /// Rule editor.
    BreEdit,
    /// Disbursement tracker.
    Disbursements,
    /// Repayment schedules.
    Repayments,
    /// Loan statement with export.
    Statement,
    /// Product catalogue.
    Products,
    /// User administration.
    Users,
}

/// Returns the dashboard's static route registry.
#[must_use]
pub fn dashboard_routes() -> Vec<RouteDescriptor<DashboardPage>> {
    use DashboardPage as Page;
    use RequiredAction as Action;

    vec![
        RouteDescriptor::guarded("/", modules::NBFC, Action::Any, Page::Home),
        RouteDescriptor::public("/overview", Page::Overview),
        RouteDescriptor::guarded(
            "/nbfc/onboarding",
            modules::NBFC,
            Action::Create,
            Page::NbfcOnboarding,
        ),
        RouteDescriptor::guarded("/nbfc/:nbfc_id", modules::NBFC, Action::View, Page::NbfcDetail),
        RouteDescriptor::guarded(
            "/pool-buyout",
            modules::POOL_BUYOUT,
            Action::View,
            Page::PoolBuyout,
        ),
        RouteDescriptor::guarded(
            "/pool-buyout/:pool_id/review",
            modules::POOL_BUYOUT,
            Action::Approve,
            Page::PoolBuyoutReview,
        ),
        RouteDescriptor::guarded("/bre", modules::BRE, Action::View, Page::BreConfig),
        RouteDescriptor::guarded("/bre/:rule_id/edit", modules::BRE, Action::Edit, Page::BreEdit),
        RouteDescriptor::guarded(
            "/disbursements",
            modules::DISBURSEMENT,
            Action::View,
            Page::Disbursements,
        ),
        RouteDescriptor::guarded(
            "/repayments",
            modules::REPAYMENT,
            Action::View,
            Page::Repayments,
        ),
        RouteDescriptor::guarded(
            "/repayments/:loan_id/statement",
            modules::REPAYMENT,
            Action::View,
            Page::Statement,
        ),
        RouteDescriptor::guarded("/products", modules::PRODUCT, Action::View, Page::Products),
        RouteDescriptor::guarded("/users", modules::USER, Action::Any, Page::Users),
    ]
}

/// Returns the dashboard sidebar.
#[must_use]
pub fn dashboard_menu() -> Vec<MenuSection> {
    use RequiredAction as Action;

    vec![
        MenuSection::new(
            "Home",
            vec![
                MenuItem::guarded("Portfolio", "/", modules::NBFC, Action::Any),
                MenuItem::public("Overview", "/overview"),
            ],
        ),
        MenuSection::new(
            "Partners",
            vec![MenuItem::guarded(
                "Onboard NBFC",
                "/nbfc/onboarding",
                modules::NBFC,
                Action::Create,
            )],
        ),
        MenuSection::new(
            "Co-lending",
            vec![
                MenuItem::guarded(
                    "Pool buyout",
                    "/pool-buyout",
                    modules::POOL_BUYOUT,
                    Action::View,
                ),
                MenuItem::guarded(
                    "Disbursements",
                    "/disbursements",
                    modules::DISBURSEMENT,
                    Action::View,
                ),
                MenuItem::guarded("Repayments", "/repayments", modules::REPAYMENT, Action::View),
            ],
        ),
        MenuSection::new(
            "Configuration",
            vec![
                MenuItem::guarded("Rule engine", "/bre", modules::BRE, Action::View),
                MenuItem::guarded("Products", "/products", modules::PRODUCT, Action::View),
            ],
        ),
        MenuSection::new(
            "Administration",
            vec![MenuItem::guarded("Users", "/users", modules::USER, Action::Any)],
        ),
    ]
}

/// Builds a navigation service over the dashboard registry.
pub fn dashboard_navigation(
    settings: NavigationSettings,
) -> AppResult<NavigationService<DashboardPage>> {
    NavigationService::new(dashboard_routes(), dashboard_menu(), settings)
}
