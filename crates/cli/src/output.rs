//! Terminal output helpers

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// How results are written: human-readable lines or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Confirmation line for a completed action
    pub fn success(&self, message: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "ok": true, "message": message }));
        } else {
            println!("{} {}", style("✓").green().bold(), message);
        }
    }

    /// Informational line, suppressed in JSON mode
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{}", message);
        }
    }

    /// Heading above a listing, suppressed in JSON mode
    pub fn heading(&self, title: &str) {
        if !self.json {
            println!("{}", style(title).bold().underlined());
        }
    }

    /// Print a value as JSON when requested, else run the human renderer
    pub fn render<T, F>(&self, value: &T, human: F) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T),
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    /// Await `future` behind a spinner on stderr
    pub async fn spin<F, T>(&self, message: &str, future: F) -> T
    where
        F: Future<Output = T>,
    {
        if self.json {
            return future.await;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = future.await;
        spinner.finish_and_clear();
        result
    }
}

/// Dimmed placeholder for empty listings
pub fn empty(label: &str) -> String {
    style(format!("(no {})", label)).dim().to_string()
}

/// Coloured read/unread marker
pub fn read_marker(read: bool) -> String {
    if read {
        style("·").dim().to_string()
    } else {
        style("●").yellow().to_string()
    }
}

/// Coloured yes/no flag
pub fn flag(value: bool) -> String {
    if value {
        style("abiertas").green().to_string()
    } else {
        style("cerradas").red().to_string()
    }
}
