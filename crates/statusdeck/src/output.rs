//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use statusdeck_core::{IncidentStatus, MaintenanceStatus, ServiceStatus, Severity};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Human label for a service status, colored by severity when enabled.
pub fn paint_service_status(status: ServiceStatus, color: bool) -> String {
    let label = status.label();
    if !color {
        return label.to_owned();
    }
    match status {
        ServiceStatus::Operational => label.green().to_string(),
        ServiceStatus::Maintenance => label.blue().to_string(),
        ServiceStatus::DegradedPerformance => label.yellow().to_string(),
        ServiceStatus::PartialOutage => label.bright_red().to_string(),
        ServiceStatus::MajorOutage => label.red().bold().to_string(),
    }
}

pub fn paint_incident_status(status: IncidentStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        IncidentStatus::Investigating => label.red().to_string(),
        IncidentStatus::Identified => label.bright_red().to_string(),
        IncidentStatus::Monitoring => label.yellow().to_string(),
        IncidentStatus::Resolved => label.green().to_string(),
    }
}

pub fn paint_maintenance_status(status: MaintenanceStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        MaintenanceStatus::Scheduled => label.cyan().to_string(),
        MaintenanceStatus::InProgress => label.blue().to_string(),
        MaintenanceStatus::Completed => label.green().to_string(),
        MaintenanceStatus::Cancelled => label.dimmed().to_string(),
    }
}

pub fn paint_severity(severity: Severity, color: bool) -> String {
    let label = severity.to_string();
    if !color {
        return label;
    }
    match severity {
        Severity::Minor => label.yellow().to_string(),
        Severity::Major => label.bright_red().to_string(),
        Severity::Critical => label.red().bold().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list in the chosen format.
///
/// Tables are built from `to_row`; `plain` emits `id_fn` per item; the
/// structured formats serialize `data` itself.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Plain => Ok(data.iter().map(id_fn).collect::<Vec<_>>().join("\n")),
        structured => render_structured(structured, data),
    }
}

/// Render one item. Table output uses the pre-formatted `detail_fn` view.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Plain => Ok(id_fn(data)),
        structured => render_structured(structured, data),
    }
}

/// Print rendered output to stdout unless quiet.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a one-line confirmation to stderr unless quiet.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_structured<T: serde::Serialize + ?Sized>(
    format: &OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        _ => serde_json::to_string_pretty(data)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: "srv_1", name: "API" },
            Item { id: "srv_2", name: "Web" },
        ]
    }

    fn render(format: &OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| ItemRow {
                name: i.name.into(),
            },
            |i| i.id.into(),
        )
        .unwrap()
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        assert_eq!(render(&OutputFormat::Plain), "srv_1\nsrv_2");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render(&OutputFormat::JsonCompact);
        assert_eq!(
            out,
            r#"[{"id":"srv_1","name":"API"},{"id":"srv_2","name":"Web"}]"#
        );
    }

    #[test]
    fn table_has_header_and_rows() {
        let out = render(&OutputFormat::Table);
        assert!(out.contains("Name"));
        assert!(out.contains("API"));
        assert!(out.contains("Web"));
    }

    #[test]
    fn yaml_carries_fields() {
        let out = render(&OutputFormat::Yaml);
        assert!(out.contains("id: srv_1"));
    }

    #[test]
    fn uncolored_labels_are_plain_text() {
        assert_eq!(
            paint_service_status(ServiceStatus::PartialOutage, false),
            "Partial Outage"
        );
        assert_eq!(
            paint_maintenance_status(MaintenanceStatus::InProgress, false),
            "in_progress"
        );
        assert!(paint_service_status(ServiceStatus::MajorOutage, true).contains('\u{1b}'));
    }
}
