//! Maintenance command handlers.

use std::sync::Arc;

use tabled::Tabled;

use statusdeck_core::{
    AppendUpdateRequest, Command as CoreCommand, CommandResult, Controller, EventEdit,
    MaintenanceEvent, MaintenanceStatus, MaintenanceWindow, NewEvent, Severity,
};

use crate::cli::{GlobalOpts, MaintenanceArgs, MaintenanceCommand};
use crate::error::CliError;
use crate::output;

use super::{timeline, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MaintenanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Starts")]
    starts: String,
    #[tabled(rename = "Ends")]
    ends: String,
    #[tabled(rename = "Services")]
    services: String,
}

fn row(controller: &Controller, m: &Arc<MaintenanceEvent>) -> MaintenanceRow {
    let (starts, ends) = m.window.map_or_else(Default::default, |w| {
        (
            util::format_time(w.scheduled_start),
            util::format_time(w.scheduled_end),
        )
    });
    MaintenanceRow {
        id: m.id.to_string(),
        title: m.title.clone(),
        status: m.status().to_string(),
        starts,
        ends,
        services: util::service_names(controller, &m.affected_services),
    }
}

fn detail(controller: &Controller, m: &MaintenanceEvent, color: bool) -> String {
    let status = output::paint_maintenance_status(m.status(), color);
    let window = m.window.map_or_else(
        || "Window:   -".to_owned(),
        |w| {
            format!(
                "Window:   {} to {}",
                util::format_time(w.scheduled_start),
                util::format_time(w.scheduled_end)
            )
        },
    );
    timeline::event_detail(controller, m, &status, &[window])
}

fn print_event(
    controller: &Controller,
    event: &MaintenanceEvent,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        event,
        |m| detail(controller, m, color),
        |m| m.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_result(
    controller: &Controller,
    result: &CommandResult,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let CommandResult::Maintenance { event, warning } = result {
        util::report_warning(warning.as_ref());
        print_event(controller, event, global)?;
    }
    Ok(())
}

fn parse_window(start: &str, end: &str) -> Result<MaintenanceWindow, CliError> {
    let start = util::parse_time("start", start)?;
    let end = util::parse_time("end", end)?;
    MaintenanceWindow::new(start, end).map_err(CliError::Rejected)
}

async fn append(
    controller: &Controller,
    id: &str,
    message: String,
    status: Option<MaintenanceStatus>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let current = util::find_maintenance(controller, id)?;
    let update = AppendUpdateRequest {
        message,
        status: status.unwrap_or_else(|| current.status()),
        author: None,
    };
    let result = controller
        .execute(CoreCommand::AppendMaintenanceUpdate {
            id: current.id.clone(),
            update,
        })
        .await?;
    output::notice("Update posted", global.quiet);
    print_result(controller, &result, global)
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    controller: &Controller,
    args: MaintenanceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MaintenanceCommand::List { list, all } => {
            let mut events: Vec<_> = controller
                .maintenance_snapshot()
                .iter()
                .filter(|m| all || m.is_active())
                .cloned()
                .collect();
            events.sort_by_key(|m| m.window.map(|w| w.scheduled_start));
            let snap = util::apply_list_args(events, &list, |m| m.title.as_str());
            let out = output::render_list(
                &global.output,
                &snap,
                |m| row(controller, m),
                |m| m.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MaintenanceCommand::Get { id } => {
            let event = util::find_maintenance(controller, &id)?;
            print_event(controller, &event, global)
        }

        MaintenanceCommand::Timeline { id } => {
            let event = util::find_maintenance(controller, &id)?;
            let out = timeline::render_timeline(&global.output, &*event)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MaintenanceCommand::Create {
            title,
            message,
            start,
            end,
            services,
        } => {
            let event = NewEvent {
                title,
                description: message,
                status: MaintenanceStatus::Scheduled,
                severity: Severity::default(),
                affected_services: util::resolve_service_ids(controller, &services)?,
                window: Some(parse_window(&start, &end)?),
            };
            let result = controller
                .execute(CoreCommand::CreateMaintenance {
                    event,
                    author: None,
                })
                .await?;
            output::notice("Maintenance scheduled", global.quiet);
            print_result(controller, &result, global)
        }

        MaintenanceCommand::Update {
            id,
            message,
            status,
        } => append(controller, &id, message, status.map(Into::into), global).await,

        MaintenanceCommand::Start { id, message } => {
            let status = Some(MaintenanceStatus::InProgress);
            append(controller, &id, message, status, global).await
        }

        MaintenanceCommand::Complete { id, message } => {
            let status = Some(MaintenanceStatus::Completed);
            append(controller, &id, message, status, global).await
        }

        MaintenanceCommand::Cancel { id, message } => {
            let status = Some(MaintenanceStatus::Cancelled);
            append(controller, &id, message, status, global).await
        }

        MaintenanceCommand::Edit {
            id,
            title,
            description,
            services,
            start,
            end,
        } => {
            let current = util::find_maintenance(controller, &id)?;
            let affected_services = if services.is_empty() {
                None
            } else {
                Some(util::resolve_service_ids(controller, &services)?)
            };
            let window = match (start, end) {
                (Some(start), Some(end)) => Some(parse_window(&start, &end)?),
                _ => None,
            };
            let edit = EventEdit {
                title,
                description,
                severity: None,
                affected_services,
                window,
            };
            if edit.is_empty() {
                return Err(CliError::Validation {
                    field: "edit".into(),
                    reason: "nothing to change; pass at least one field flag".into(),
                });
            }
            let result = controller
                .execute(CoreCommand::EditMaintenance {
                    id: current.id.clone(),
                    edit,
                })
                .await?;
            output::notice("Maintenance updated", global.quiet);
            print_result(controller, &result, global)
        }

        MaintenanceCommand::Delete { id } => {
            let event = util::find_maintenance(controller, &id)?;
            if !util::confirm(&format!("Delete maintenance '{}'?", event.title), global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteMaintenance {
                    id: event.id.clone(),
                })
                .await?;
            output::notice("Maintenance deleted", global.quiet);
            Ok(())
        }
    }
}
