//! congress notifications ...

use crate::output::{empty, read_marker, Output};
use app::{AppCore, NotificationInbox};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;
use shared::dates::format_display_date;
use shared::{LocalNotification, ServerNotification};

#[derive(Debug, Args)]
pub struct NotificationsCommand {
    #[command(subcommand)]
    pub command: NotificationsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum NotificationsSubcommand {
    /// Show local and server notifications
    List {
        /// Do not contact the backend
        #[arg(long)]
        offline: bool,
    },

    /// Mark every notification as read
    ReadAll,
}

#[derive(Debug, Serialize)]
struct Listing {
    local: Vec<LocalNotification>,
    server: Vec<ServerNotification>,
    unread: usize,
}

impl NotificationsCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        let user = core.session().require_user()?;
        let mut inbox = NotificationInbox::new();

        match &self.command {
            NotificationsSubcommand::List { offline } => {
                if !offline {
                    let synced = out
                        .spin("Cargando notificaciones...", inbox.sync(core.api(), user.id))
                        .await;
                    if let Err(e) = synced {
                        tracing::warn!(error = %e, "showing local notifications only");
                    }
                }

                let local = core.notifications().for_user(user.id);
                let listing = Listing {
                    unread: core.notifications().unread_count(user.id) + inbox.unread_count(),
                    local,
                    server: inbox.items().to_vec(),
                };

                out.render(&listing, |listing| {
                    out.heading(&format!("Notificaciones ({} sin leer)", listing.unread));
                    if listing.local.is_empty() && listing.server.is_empty() {
                        println!("{}", empty("notifications"));
                    }
                    for item in &listing.server {
                        println!(
                            "{} {}  {}",
                            read_marker(item.leida),
                            style(format_display_date(&item.created_at)).dim(),
                            item.mensaje
                        );
                    }
                    for item in &listing.local {
                        println!(
                            "{} {}  {}",
                            read_marker(item.read),
                            style(format_display_date(&item.created_at)).dim(),
                            item.message
                        );
                    }
                })
            }
            NotificationsSubcommand::ReadAll => {
                core.notifications().mark_all_read(user.id)?;

                out.spin("Sincronizando...", inbox.sync(core.api(), user.id))
                    .await?;
                let unread: Vec<i64> = inbox
                    .items()
                    .iter()
                    .filter(|n| !n.leida)
                    .map(|n| n.id_notificacion)
                    .collect();
                for id in &unread {
                    inbox.mark_read_remote(core.api(), *id).await?;
                }

                out.success(&format!("{} notificaciones marcadas como leídas", unread.len()));
                Ok(())
            }
        }
    }
}
