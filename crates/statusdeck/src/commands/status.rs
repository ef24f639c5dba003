//! `status`: the public summary, once or continuously with `--watch`.

use std::fmt::Write as _;
use std::io::IsTerminal;

use chrono::Utc;

use statusdeck_core::{
    Controller, Incident, MaintenanceEvent, Service, ServiceStatus, StatusSummary,
};

use crate::cli::{GlobalOpts, OutputFormat, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// Fallback for `--watch` when neither `--interval` nor the config sets one.
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 30;

pub async fn handle(
    controller: &Controller,
    args: StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.watch {
        return watch(controller, &args, global).await;
    }
    let (_, out) = render(controller, &args, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Re-render whenever a refresh changes what the summary shows.
async fn watch(
    controller: &Controller,
    args: &StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut services = controller.services();
    let mut groups = controller.groups();
    let mut incidents = controller.incidents();
    let mut maintenance = controller.maintenance();
    let clear = matches!(global.output, OutputFormat::Table) && std::io::stdout().is_terminal();

    let mut shown = String::new();
    loop {
        let (key, out) = render(controller, args, global)?;
        if key != shown {
            if clear {
                print!("\x1b[2J\x1b[H");
            }
            output::print_output(&out, global.quiet);
            shown = key;
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            Some(_) = services.changed() => {}
            Some(_) = groups.changed() => {}
            Some(_) = incidents.changed() => {}
            Some(_) = maintenance.changed() => {}
            else => return Ok(()),
        }
    }
}

/// Returns the plain-text body (used to detect changes) and the output in
/// the selected format.
fn render(
    controller: &Controller,
    args: &StatusArgs,
    global: &GlobalOpts,
) -> Result<(String, String), CliError> {
    let services = controller.services_snapshot();
    let groups = controller.groups_snapshot();
    let incidents = controller.incidents_snapshot();
    let maintenance = controller.maintenance_snapshot();
    let summary = StatusSummary::build(
        services.iter().map(|s| &**s),
        groups.iter().map(|g| &**g),
        incidents.iter().map(|i| &**i),
        maintenance.iter().map(|m| &**m),
        Utc::now(),
    );

    let key = summary_text(controller, &summary, args.history, false);
    let out = match global.output {
        OutputFormat::Table => {
            let color = output::should_color(&global.color);
            let mut text = summary_text(controller, &summary, args.history, color);
            let refreshed = controller
                .store()
                .last_full_refresh()
                .unwrap_or(summary.generated_at);
            let _ = write!(text, "\nLast refreshed {}", util::format_time(refreshed));
            text
        }
        ref format => output::render_single(format, &summary, |_| String::new(), |s| {
            s.overall.to_string()
        })?,
    };
    Ok((key, out))
}

fn summary_text(
    controller: &Controller,
    summary: &StatusSummary<'_>,
    history: bool,
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        output::paint_service_status(summary.overall, color),
        summary.headline
    );

    for group in &summary.groups {
        let _ = writeln!(out);
        write_service_line(&mut out, group.name, group.status, 0, color);
        for service in &group.services {
            write_service(&mut out, service, 2, color);
        }
    }
    if !summary.ungrouped.is_empty() {
        let _ = writeln!(out);
        if !summary.groups.is_empty() {
            let _ = writeln!(out, "Other services");
        }
        let indent = if summary.groups.is_empty() { 0 } else { 2 };
        for service in &summary.ungrouped {
            write_service(&mut out, service, indent, color);
        }
    }

    write_incidents(&mut out, controller, "Active incidents", &summary.active_incidents, color);
    write_maintenance(&mut out, "Maintenance in progress", &summary.ongoing_maintenance);
    write_maintenance(&mut out, "Upcoming maintenance", &summary.upcoming_maintenance);
    if history {
        write_incidents(
            &mut out,
            controller,
            "Resolved incidents",
            &summary.resolved_incidents,
            color,
        );
        write_maintenance(&mut out, "Completed maintenance", &summary.completed_maintenance);
    }
    out.trim_end().to_owned()
}

fn write_service(out: &mut String, service: &Service, indent: usize, color: bool) {
    write_service_line(out, &service.name, service.status, indent, color);
}

fn write_service_line(
    out: &mut String,
    name: &str,
    status: ServiceStatus,
    indent: usize,
    color: bool,
) {
    let width = 32usize.saturating_sub(indent);
    let _ = writeln!(
        out,
        "{:indent$}{name:<width$} {}",
        "",
        output::paint_service_status(status, color)
    );
}

fn write_incidents(
    out: &mut String,
    controller: &Controller,
    heading: &str,
    incidents: &[&Incident],
    color: bool,
) {
    if incidents.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for incident in incidents {
        let _ = writeln!(
            out,
            "  {} [{}] {} ({})",
            incident.id,
            output::paint_severity(incident.severity, color),
            incident.title,
            output::paint_incident_status(incident.status(), color),
        );
        let _ = writeln!(
            out,
            "    affects: {}",
            util::service_names(controller, &incident.affected_services)
        );
        if let Some(latest) = incident.latest_update() {
            let _ = writeln!(
                out,
                "    {} {}: {}",
                util::format_time(latest.created_at),
                latest.author,
                latest.message
            );
        }
    }
}

fn write_maintenance(out: &mut String, heading: &str, events: &[&MaintenanceEvent]) {
    if events.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for event in events {
        let window = event.window.map_or_else(String::new, |w| {
            format!(
                " {} to {}",
                util::format_time(w.scheduled_start),
                util::format_time(w.scheduled_end)
            )
        });
        let _ = writeln!(out, "  {} {}{window}", event.id, event.title);
    }
}
