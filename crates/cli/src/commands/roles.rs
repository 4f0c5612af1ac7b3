//! congress roles ...

use super::require_route;
use crate::output::{empty, Output};
use app::AppCore;
use clap::{Args, Subcommand};
use console::style;

#[derive(Debug, Args)]
pub struct RolesCommand {
    #[command(subcommand)]
    pub command: RolesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RolesSubcommand {
    /// List roles
    List,
}

impl RolesCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        require_route(core, "/roleManagement").await?;

        match &self.command {
            RolesSubcommand::List => {
                let roles = out.spin("Cargando roles...", core.list_roles()).await?;
                out.render(&roles, |roles| {
                    out.heading("Roles");
                    if roles.is_empty() {
                        println!("{}", empty("roles"));
                    }
                    for role in roles {
                        println!(
                            "{:>5}  {}  {}",
                            style(format!("#{}", role.id)).dim(),
                            style(&role.name).bold(),
                            role.description.as_deref().unwrap_or(""),
                        );
                    }
                })
            }
        }
    }
}
