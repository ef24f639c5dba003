//! Service command handlers.

use std::sync::Arc;

use tabled::Tabled;

use statusdeck_core::{
    Command as CoreCommand, CommandResult, Controller, CreateServiceRequest, Service,
    ServiceStatus, UpdateServiceRequest,
};

use crate::cli::{GlobalOpts, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

fn row(controller: &Controller, s: &Arc<Service>) -> ServiceRow {
    ServiceRow {
        id: s.id.to_string(),
        name: s.name.clone(),
        status: s.status.label().into(),
        group: group_name(controller, s),
        uptime: s.uptime.map(|u| u.to_string()).unwrap_or_default(),
    }
}

fn group_name(controller: &Controller, s: &Service) -> String {
    s.group.as_ref().map_or_else(String::new, |id| {
        controller
            .store()
            .group_by_id(id)
            .map_or_else(|| id.to_string(), |g| g.name.clone())
    })
}

fn detail(controller: &Controller, s: &Arc<Service>, color: bool) -> String {
    let mut lines = vec![
        format!("ID:          {}", s.id),
        format!("Name:        {}", s.name),
        format!("Status:      {}", output::paint_service_status(s.status, color)),
        format!("Group:       {}", or_dash(&group_name(controller, s))),
        format!(
            "Uptime:      {}",
            s.uptime.map_or_else(|| "-".into(), |u| u.to_string())
        ),
        format!(
            "Updated:     {}",
            s.last_updated.map_or_else(|| "-".into(), util::format_time)
        ),
    ];
    if !s.description.is_empty() {
        lines.push(format!("Description: {}", s.description));
    }

    let open: Vec<_> = controller
        .incidents_snapshot()
        .iter()
        .filter(|i| i.is_active() && i.affects(&s.id))
        .map(|i| format!("  {} {} ({})", i.id, i.title, i.status()))
        .collect();
    if !open.is_empty() {
        lines.push("Open incidents:".into());
        lines.extend(open);
    }
    lines.join("\n")
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn print_service(
    controller: &Controller,
    service: &Arc<Service>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        service,
        |s| detail(controller, s, color),
        |s| s.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_result(
    controller: &Controller,
    result: CommandResult,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match result {
        CommandResult::Service(service) => print_service(controller, &Arc::new(service), global),
        _ => Ok(()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ServicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ServicesCommand::List {
            list,
            status,
            group,
        } => {
            let group_id = group
                .as_deref()
                .map(|g| util::resolve_group(controller, g).map(|g| g.id.clone()))
                .transpose()?;
            let status = status.map(ServiceStatus::from);

            let mut all: Vec<_> = controller
                .services_snapshot()
                .iter()
                .filter(|s| status.is_none_or(|st| s.status == st))
                .filter(|s| group_id.is_none() || s.group == group_id)
                .cloned()
                .collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));

            let snap = util::apply_list_args(all, &list, |s| s.name.as_str());
            let out = output::render_list(
                &global.output,
                &snap,
                |s| row(controller, s),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServicesCommand::Get { service } => {
            let s = util::resolve_service(controller, &service)?;
            print_service(controller, &s, global)
        }

        ServicesCommand::Create {
            name,
            description,
            status,
            group,
            uptime,
        } => {
            let group = group
                .as_deref()
                .map(|g| util::resolve_group(controller, g).map(|g| g.id.clone()))
                .transpose()?;
            let result = controller
                .execute(CoreCommand::CreateService(CreateServiceRequest {
                    name,
                    description,
                    status: status.into(),
                    group,
                    uptime,
                }))
                .await?;
            output::notice("Service created", global.quiet);
            print_result(controller, result, global)
        }

        ServicesCommand::Update {
            service,
            name,
            description,
            status,
            group,
            no_group,
            uptime,
        } => {
            let id = util::resolve_service(controller, &service)?.id.clone();
            let group = if no_group {
                Some(None)
            } else {
                group
                    .as_deref()
                    .map(|g| util::resolve_group(controller, g).map(|g| Some(g.id.clone())))
                    .transpose()?
            };
            let update = UpdateServiceRequest {
                name,
                description,
                status: status.map(Into::into),
                group,
                uptime,
            };
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one field flag".into(),
                });
            }
            let result = controller
                .execute(CoreCommand::UpdateService { id, update })
                .await?;
            output::notice("Service updated", global.quiet);
            print_result(controller, result, global)
        }

        ServicesCommand::SetStatus { service, status } => {
            let id = util::resolve_service(controller, &service)?.id.clone();
            let update = UpdateServiceRequest {
                status: Some(status.into()),
                ..UpdateServiceRequest::default()
            };
            let result = controller
                .execute(CoreCommand::UpdateService { id, update })
                .await?;
            print_result(controller, result, global)
        }

        ServicesCommand::Delete { service } => {
            let s = util::resolve_service(controller, &service)?;
            if !util::confirm(&format!("Delete service '{}'?", s.name), global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteService { id: s.id.clone() })
                .await?;
            output::notice("Service deleted", global.quiet);
            Ok(())
        }
    }
}
