//! congress permissions ...

use super::require_route;
use crate::output::{empty, Output};
use app::AppCore;
use clap::{Args, Subcommand};
use console::style;
use dialoguer::Confirm;

#[derive(Debug, Args)]
pub struct PermissionsCommand {
    #[command(subcommand)]
    pub command: PermissionsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PermissionsSubcommand {
    /// List permissions
    List,

    /// Delete a permission and drop the resources that required it
    Delete {
        /// Permission ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl PermissionsCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        require_route(core, "/permissionManagement").await?;

        match &self.command {
            PermissionsSubcommand::List => {
                let permissions = out
                    .spin("Cargando permisos...", core.list_permissions())
                    .await?;
                out.render(&permissions, |permissions| {
                    out.heading("Permisos");
                    if permissions.is_empty() {
                        println!("{}", empty("permissions"));
                    }
                    for permission in permissions {
                        println!(
                            "{:>5}  {}  {}",
                            style(format!("#{}", permission.id)).dim(),
                            style(&permission.name).bold(),
                            permission.resource,
                        );
                    }
                })
            }
            PermissionsSubcommand::Delete { id, yes } => {
                if !yes {
                    let confirmed = Confirm::new()
                        .with_prompt(format!("¿Eliminar el permiso #{}?", id))
                        .default(false)
                        .interact()?;
                    if !confirmed {
                        out.info("Cancelado");
                        return Ok(());
                    }
                }

                out.spin("Eliminando permiso...", core.delete_permission(*id))
                    .await?;
                out.success(&format!("Permiso #{} eliminado", id));
                Ok(())
            }
        }
    }
}
