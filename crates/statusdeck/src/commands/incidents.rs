//! Incident command handlers.

use std::sync::Arc;

use tabled::Tabled;

use statusdeck_core::{
    AppendUpdateRequest, Command as CoreCommand, CommandResult, Controller, EventEdit, Incident,
    IncidentStatus, NewEvent,
};

use crate::cli::{GlobalOpts, IncidentsArgs, IncidentsCommand};
use crate::error::CliError;
use crate::output;

use super::{timeline, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Services")]
    services: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

fn row(controller: &Controller, i: &Arc<Incident>) -> IncidentRow {
    IncidentRow {
        id: i.id.to_string(),
        title: i.title.clone(),
        status: i.status().to_string(),
        severity: i.severity.to_string(),
        services: util::service_names(controller, &i.affected_services),
        updated: util::format_time(i.updated_at()),
    }
}

fn detail(controller: &Controller, i: &Incident, color: bool) -> String {
    let status = output::paint_incident_status(i.status(), color);
    let severity = format!("Severity: {}", output::paint_severity(i.severity, color));
    timeline::event_detail(controller, i, &status, &[severity])
}

fn print_incident(
    controller: &Controller,
    incident: &Incident,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        incident,
        |i| detail(controller, i, color),
        |i| i.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_result(
    controller: &Controller,
    result: &CommandResult,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let CommandResult::Incident { incident, warning } = result {
        util::report_warning(warning.as_ref());
        print_incident(controller, incident, global)?;
    }
    Ok(())
}

async fn append(
    controller: &Controller,
    id: &str,
    message: String,
    status: Option<IncidentStatus>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let current = util::find_incident(controller, id)?;
    let update = AppendUpdateRequest {
        message,
        status: status.unwrap_or_else(|| current.status()),
        author: None,
    };
    let result = controller
        .execute(CoreCommand::AppendIncidentUpdate {
            id: current.id.clone(),
            update,
        })
        .await?;
    output::notice("Update posted", global.quiet);
    print_result(controller, &result, global)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: IncidentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        IncidentsCommand::List { list, all } => {
            let mut incidents: Vec<_> = controller
                .incidents_snapshot()
                .iter()
                .filter(|i| all || i.is_active())
                .cloned()
                .collect();
            incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let snap = util::apply_list_args(incidents, &list, |i| i.title.as_str());
            let out = output::render_list(
                &global.output,
                &snap,
                |i| row(controller, i),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        IncidentsCommand::Get { id } => {
            let incident = util::find_incident(controller, &id)?;
            print_incident(controller, &incident, global)
        }

        IncidentsCommand::Timeline { id } => {
            let incident = util::find_incident(controller, &id)?;
            let out = timeline::render_timeline(&global.output, &*incident)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        IncidentsCommand::Create {
            title,
            message,
            status,
            severity,
            services,
        } => {
            let incident = NewEvent {
                title,
                description: message,
                status: status.into(),
                severity: severity.into(),
                affected_services: util::resolve_service_ids(controller, &services)?,
                window: None,
            };
            let result = controller
                .execute(CoreCommand::CreateIncident {
                    incident,
                    author: None,
                })
                .await?;
            output::notice("Incident opened", global.quiet);
            print_result(controller, &result, global)
        }

        IncidentsCommand::Update {
            id,
            message,
            status,
        } => append(controller, &id, message, status.map(Into::into), global).await,

        IncidentsCommand::Resolve { id, message } => {
            append(
                controller,
                &id,
                message,
                Some(IncidentStatus::Resolved),
                global,
            )
            .await
        }

        IncidentsCommand::Edit {
            id,
            title,
            description,
            severity,
            services,
        } => {
            let current = util::find_incident(controller, &id)?;
            let affected_services = if services.is_empty() {
                None
            } else {
                Some(util::resolve_service_ids(controller, &services)?)
            };
            let edit = EventEdit {
                title,
                description,
                severity: severity.map(Into::into),
                affected_services,
                window: None,
            };
            if edit.is_empty() {
                return Err(CliError::Validation {
                    field: "edit".into(),
                    reason: "nothing to change; pass at least one field flag".into(),
                });
            }
            let result = controller
                .execute(CoreCommand::EditIncident {
                    id: current.id.clone(),
                    edit,
                })
                .await?;
            output::notice("Incident updated", global.quiet);
            print_result(controller, &result, global)
        }

        IncidentsCommand::Delete { id } => {
            let incident = util::find_incident(controller, &id)?;
            let prompt = format!(
                "Delete incident '{}' and its {} update(s)?",
                incident.title,
                incident.updates().len()
            );
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteIncident {
                    id: incident.id.clone(),
                })
                .await?;
            output::notice("Incident deleted", global.quiet);
            Ok(())
        }
    }
}
