//! congress resources ...

use super::require_route;
use crate::output::{empty, Output};
use app::AppCore;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;
use shared::resource_definitions;

const SCREEN: &str = "/permissionManagement";

#[derive(Debug, Args)]
pub struct ResourcesCommand {
    #[command(subcommand)]
    pub command: ResourcesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourcesSubcommand {
    /// List gated resources and the permission each one requires
    List,

    /// Require a permission for a resource
    Assign {
        /// Resource key
        resource: String,

        /// Permission ID
        permission_id: i64,
    },

    /// Remove the permission requirement of a resource
    Unassign {
        /// Resource key
        resource: String,
    },
}

#[derive(Debug, Serialize)]
struct ResourceRow {
    key: String,
    label: String,
    description: String,
    permission_id: Option<i64>,
}

impl ResourcesCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        require_route(core, SCREEN).await?;

        match &self.command {
            ResourcesSubcommand::List => {
                let map = core.resource_map();
                let rows: Vec<ResourceRow> = resource_definitions()
                    .into_iter()
                    .map(|def| ResourceRow {
                        permission_id: map.get(&def.key),
                        key: def.key,
                        label: def.label,
                        description: def.description,
                    })
                    .collect();

                out.render(&rows, |rows| {
                    out.heading("Recursos");
                    if rows.is_empty() {
                        println!("{}", empty("resources"));
                    }
                    for row in rows {
                        let permission = match row.permission_id {
                            Some(id) => style(format!("permiso #{}", id)).cyan().to_string(),
                            None => style("sin asignar").dim().to_string(),
                        };
                        println!("  {}  {}  {}", style(&row.key).bold(), row.label, permission);
                        println!("      {}", style(&row.description).dim());
                    }
                })
            }
            ResourcesSubcommand::Assign {
                resource,
                permission_id,
            } => {
                core.assign_resource(resource, *permission_id)?;
                out.success(&format!("{} requiere ahora el permiso #{}", resource, permission_id));
                Ok(())
            }
            ResourcesSubcommand::Unassign { resource } => {
                if core.unassign_resource(resource)? {
                    out.success(&format!("{} ya no requiere permiso", resource));
                } else {
                    out.info(&format!("{} no tenía permiso asignado", resource));
                }
                Ok(())
            }
        }
    }
}
