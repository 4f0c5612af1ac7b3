//! congress inscriptions ...

use super::require_route;
use crate::output::{empty, Output};
use app::AppCore;
use clap::{Args, Subcommand};
use console::style;
use shared::dates::format_display_date;

#[derive(Debug, Args)]
pub struct InscriptionsCommand {
    #[command(subcommand)]
    pub command: InscriptionsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum InscriptionsSubcommand {
    /// List the current user's inscriptions
    Mine,
}

impl InscriptionsCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        match &self.command {
            InscriptionsSubcommand::Mine => {
                require_route(core, "/inscriptions/mine").await?;

                let inscriptions = out
                    .spin("Cargando inscripciones...", core.my_inscriptions())
                    .await?;
                out.render(&inscriptions, |inscriptions| {
                    out.heading("Mis inscripciones");
                    if inscriptions.is_empty() {
                        println!("{}", empty("inscriptions"));
                    }
                    for inscription in inscriptions {
                        println!(
                            "{:>5}  {}  {}  {}",
                            style(format!("#{}", inscription.id_inscripcion)).dim(),
                            style(&inscription.evento_nombre).bold(),
                            format_display_date(&inscription.fecha_inscripcion),
                            inscription.estado,
                        );
                    }
                })
            }
        }
    }
}
