//! congress access ...

use crate::output::Output;
use app::AppCore;
use clap::{Args, Subcommand};
use console::style;
use rbac::{GuardDecision, ROUTES};
use serde::Serialize;
use shared::find_resource;

#[derive(Debug, Args)]
pub struct AccessCommand {
    #[command(subcommand)]
    pub command: AccessSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AccessSubcommand {
    /// Check whether the current user can use a resource
    Check {
        /// Resource key, e.g. events.create
        resource: String,
    },

    /// Show which screens the current user may open
    Routes,
}

#[derive(Debug, Serialize)]
struct AccessReport {
    resource: String,
    granted: bool,
}

#[derive(Debug, Serialize)]
struct RouteReport {
    path: &'static str,
    allowed: bool,
    redirect: Option<&'static str>,
}

impl AccessCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        match &self.command {
            AccessSubcommand::Check { resource } => {
                if find_resource(resource).is_none() {
                    tracing::warn!(resource = %resource, "checking a resource the client does not define");
                }
                let granted = out
                    .spin("Comprobando acceso...", core.has_resource_access(resource))
                    .await;
                let report = AccessReport {
                    resource: resource.clone(),
                    granted,
                };
                out.render(&report, |report| {
                    let verdict = if report.granted {
                        style("permitido").green().bold()
                    } else {
                        style("denegado").red().bold()
                    };
                    println!("{}: {}", report.resource, verdict);
                })
            }
            AccessSubcommand::Routes => {
                let authenticated = core.session().is_authenticated();
                let guard = core.route_guard();
                let mut reports = Vec::with_capacity(ROUTES.len());
                for route in ROUTES {
                    let decision = guard.check(route.guard, authenticated).await;
                    reports.push(RouteReport {
                        path: route.path,
                        allowed: decision == GuardDecision::Allow,
                        redirect: match decision {
                            GuardDecision::Allow => None,
                            GuardDecision::Redirect(to) => Some(to),
                        },
                    });
                }

                out.render(&reports, |reports| {
                    out.heading("Rutas");
                    for report in reports {
                        match report.redirect {
                            None => println!("  {} {}", style("✓").green(), report.path),
                            Some(to) => println!(
                                "  {} {} {}",
                                style("✗").red(),
                                report.path,
                                style(format!("→ {}", to)).dim()
                            ),
                        }
                    }
                })
            }
        }
    }
}
