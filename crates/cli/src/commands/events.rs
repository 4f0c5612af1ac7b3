//! congress events ...

use super::{parse_day, require_route};
use crate::output::{empty, flag, Output};
use anyhow::{bail, Context};
use app::catalog::EventFilter;
use app::AppCore;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use console::style;
use dialoguer::Confirm;
use shared::dates::{format_display_date, today};
use shared::{Event, EventDetail, EventDraft, RegistrationAction};

#[derive(Debug, Args)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub command: EventsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsSubcommand {
    /// List current and upcoming events
    List(ListArgs),

    /// Show an event and its sessions
    Show {
        /// Event ID
        id: i64,
    },

    /// Create an event
    Create(CreateArgs),

    /// Open registrations for an event
    Open {
        /// Event ID
        id: i64,
    },

    /// Close registrations for an event
    Close {
        /// Event ID
        id: i64,
    },

    /// Delete an event
    Delete {
        /// Event ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include past events and ignore every filter
    #[arg(long)]
    pub all: bool,

    /// Text to look for in name or location
    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long, default_value = "")]
    pub country: String,

    #[arg(long, default_value = "")]
    pub city: String,

    /// Only events ending on or after this day
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,

    /// Only events starting on or before this day
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,
}

impl ListArgs {
    fn filter(&self) -> EventFilter {
        EventFilter {
            search: self.search.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    /// First day (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_parser = parse_day)]
    pub start: NaiveDate,

    /// Last day
    #[arg(long, value_parser = parse_day)]
    pub end: NaiveDate,

    /// Last day to register; defaults to the first day
    #[arg(long, value_parser = parse_day)]
    pub close: Option<NaiveDate>,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub country: String,
}

impl EventsCommand {
    pub async fn run(&self, core: &AppCore, out: &Output) -> anyhow::Result<()> {
        match &self.command {
            EventsSubcommand::List(args) => list(core, out, args).await,
            EventsSubcommand::Show { id } => show(core, out, *id).await,
            EventsSubcommand::Create(args) => create(core, out, args).await,
            EventsSubcommand::Open { id } => {
                registrations(core, out, *id, RegistrationAction::Abrir).await
            }
            EventsSubcommand::Close { id } => {
                registrations(core, out, *id, RegistrationAction::Cerrar).await
            }
            EventsSubcommand::Delete { id, yes } => delete(core, out, *id, *yes).await,
        }
    }
}

async fn list(core: &AppCore, out: &Output, args: &ListArgs) -> anyhow::Result<()> {
    require_route(core, "/events").await?;

    let events = if args.all {
        out.spin("Cargando eventos...", core.load_events()).await?
    } else {
        out.spin("Cargando eventos...", core.catalog(&args.filter(), today()))
            .await?
    };

    out.render(&events, |events| {
        out.heading("Eventos");
        if events.is_empty() {
            println!("{}", empty("events"));
        }
        for event in events {
            print_event_line(event);
        }
    })
}

fn print_event_line(event: &Event) {
    println!(
        "{:>5}  {}  {} → {}  {}  inscripciones {}",
        style(format!("#{}", event.id_evento)).dim(),
        style(&event.nombre).bold(),
        format_display_date(&event.fecha_inicio),
        format_display_date(&event.fecha_fin),
        event.ubicacion,
        flag(event.inscripciones_abiertas),
    );
}

async fn show(core: &AppCore, out: &Output, id: i64) -> anyhow::Result<()> {
    require_route(core, &format!("/events/{}", id)).await?;

    let response = out
        .spin("Cargando evento...", core.api().get_event_detail(id))
        .await;
    if !response.is_success() {
        bail!(response.error_message_or("No se pudo cargar el evento"));
    }
    let detail: EventDetail = response
        .json()
        .context("the backend answered with an unexpected event shape")?;

    out.render(&detail, |detail| {
        let event = &detail.event;
        out.heading(&event.nombre);
        println!(
            "Fechas:       {} → {}",
            format_display_date(&event.fecha_inicio),
            format_display_date(&event.fecha_fin)
        );
        println!("Lugar:        {}", event.ubicacion);
        println!(
            "Inscripción:  {} (cierre {})",
            flag(event.inscripciones_abiertas),
            format_display_date(&event.fecha_cierre_inscripcion)
        );
        println!();
        if detail.sesiones.is_empty() {
            println!("{}", empty("sessions"));
        }
        for session in &detail.sesiones {
            println!(
                "  {}  {}  {}",
                format_display_date(&session.fecha_inicio),
                style(&session.titulo).bold(),
                session.ponente.as_deref().unwrap_or("-"),
            );
        }
    })
}

async fn create(core: &AppCore, out: &Output, args: &CreateArgs) -> anyhow::Result<()> {
    require_route(core, "/events/new").await?;

    let draft = EventDraft {
        name: args.name.clone(),
        start: args.start,
        end: args.end,
        registration_close: args.close.unwrap_or(args.start),
        city: args.city.clone(),
        country: args.country.clone(),
    };
    let created = out.spin("Creando evento...", core.create_event(draft)).await?;

    if out.json {
        return out.render(&created, |_| {});
    }
    out.success(&format!("Evento '{}' creado", args.name.trim()));
    Ok(())
}

async fn registrations(
    core: &AppCore,
    out: &Output,
    id: i64,
    action: RegistrationAction,
) -> anyhow::Result<()> {
    require_route(core, "/events").await?;

    out.spin("Actualizando inscripciones...", core.set_registrations(id, action))
        .await?;
    let state = match action {
        RegistrationAction::Abrir => "abiertas",
        RegistrationAction::Cerrar => "cerradas",
    };
    out.success(&format!("Inscripciones {} para el evento #{}", state, id));
    Ok(())
}

async fn delete(core: &AppCore, out: &Output, id: i64, yes: bool) -> anyhow::Result<()> {
    require_route(core, "/events").await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("¿Eliminar el evento #{}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            out.info("Cancelado");
            return Ok(());
        }
    }

    out.spin("Eliminando evento...", core.delete_event(id)).await?;
    out.success(&format!("Evento #{} eliminado", id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_filter() {
        let args = ListArgs {
            all: false,
            search: "bio".into(),
            country: String::new(),
            city: "Mérida".into(),
            from: NaiveDate::from_ymd_opt(2026, 11, 1),
            to: None,
        };
        let filter = args.filter();
        assert_eq!(filter.search, "bio");
        assert_eq!(filter.city, "Mérida");
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert!(filter.to.is_none());
    }
}
