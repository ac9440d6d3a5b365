//! Resolves the dashboard navigation and table pager for one user.

#![forbid(unsafe_code)]

mod navigator_config;

use std::sync::Arc;

use colend_application::{AccessSession, dashboard_navigation};
use colend_core::AppResult;
use colend_domain::{ModuleGuard, PageItem, PageRange};
use colend_infrastructure::JsonFilePermissionSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::navigator_config::NavigatorConfig;

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = NavigatorConfig::load()?;
    let navigation = dashboard_navigation(config.settings.clone())?;
    let pager = navigation.pager(config.total_items)?;
    let source = Arc::new(JsonFilePermissionSource::new(config.permissions_dir.clone()));

    info!(
        subject = %config.subject,
        role = %config.role,
        permissions_dir = %source.directory().display(),
        "resolving dashboard navigation"
    );

    let mut session = AccessSession::new(source, navigation);
    session.login(config.identity()).await?;

    let plan = session.navigation()?;
    println!("routes:");
    for route in plan.routes() {
        let guard = route
            .module_name()
            .map(|module| format!("{module}:{}", route.required_action().as_str()))
            .unwrap_or_else(|| "public".to_owned());
        println!("  {:<32} {:<20} {:?}", route.path(), guard, route.element());
    }

    println!("menu:");
    for section in plan.menu() {
        println!("  {}", section.label());
        for item in section.items() {
            println!("    {:<20} {}", item.label(), item.path());
        }
    }

    match session.take_redirect()? {
        Some(redirect) => println!(
            "redirect: {} ({:?})",
            redirect.target(),
            redirect.mode()
        ),
        None => println!("redirect: none"),
    }

    if pager.should_render() {
        println!(
            "pager: {} (page {} of {})",
            render_range(&pager.range()),
            pager.current_page(),
            pager.total_pages()
        );
    } else {
        println!("pager: hidden");
    }

    Ok(())
}

fn render_range(range: &PageRange) -> String {
    range
        .items()
        .iter()
        .map(|item| match item {
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
