//! CLI Commands

pub mod access;
pub mod auth;
pub mod events;
pub mod inscriptions;
pub mod notifications;
pub mod permissions;
pub mod resources;
pub mod roles;

pub use access::AccessCommand;
pub use auth::{LoginCommand, RegisterCommand, ResetPasswordCommand};
pub use events::EventsCommand;
pub use inscriptions::InscriptionsCommand;
pub use notifications::NotificationsCommand;
pub use permissions::PermissionsCommand;
pub use resources::ResourcesCommand;
pub use roles::RolesCommand;

use anyhow::bail;
use app::AppCore;
use chrono::NaiveDate;
use rbac::guard::LOGIN;
use rbac::GuardDecision;
use shared::dates::parse_flexible_date;

/// Clap value parser for day arguments
pub fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_flexible_date(raw)
        .ok_or_else(|| format!("'{}' is not a date (use YYYY-MM-DD or DD/MM/YYYY)", raw))
}

/// Fail unless the guard of `route` lets the current user through
pub async fn require_route(core: &AppCore, route: &str) -> anyhow::Result<()> {
    let authenticated = core.session().is_authenticated();
    match core.route_guard().check_path(route, authenticated).await {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Redirect(LOGIN) => bail!("Inicia sesión primero (congress login)"),
        GuardDecision::Redirect(_) => bail!("No tienes permiso para acceder a {}", route),
    }
}
