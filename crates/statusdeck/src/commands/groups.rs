//! Service group command handlers.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use statusdeck_core::{
    Command as CoreCommand, CommandResult, Controller, CreateGroupRequest, EntityId, Service,
    ServiceGroup, ServiceStatus, UpdateGroupRequest, aggregate_status,
};

use crate::cli::{GlobalOpts, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// A group together with the status aggregated over its members.
#[derive(Serialize)]
struct GroupView {
    #[serde(flatten)]
    group: Arc<ServiceGroup>,
    status: ServiceStatus,
    members: Vec<Arc<Service>>,
}

impl GroupView {
    fn build(controller: &Controller, group: Arc<ServiceGroup>) -> Self {
        let store = controller.store();
        let members: Vec<_> = group
            .services
            .iter()
            .filter_map(|id| store.service_by_id(id))
            .collect();
        let status = aggregate_status(members.iter().map(|s| &**s));
        Self {
            group,
            status,
            members,
        }
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Services")]
    services: usize,
}

impl From<&GroupView> for GroupRow {
    fn from(v: &GroupView) -> Self {
        Self {
            id: v.group.id.to_string(),
            name: v.group.name.clone(),
            status: v.status.label().into(),
            services: v.members.len(),
        }
    }
}

fn detail(v: &GroupView, color: bool) -> String {
    let mut lines = vec![
        format!("ID:       {}", v.group.id),
        format!("Name:     {}", v.group.name),
        format!("Status:   {}", output::paint_service_status(v.status, color)),
        format!("Services: {}", v.members.len()),
    ];
    for s in &v.members {
        lines.push(format!(
            "  {:<24} {}",
            s.name,
            output::paint_service_status(s.status, color)
        ));
    }
    lines.join("\n")
}

fn print_group(
    controller: &Controller,
    group: Arc<ServiceGroup>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let view = GroupView::build(controller, group);
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| detail(v, color),
        |v| v.group.id.to_string(),
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
        CommandResult::Group(group) => print_group(controller, Arc::new(group), global),
        _ => Ok(()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: GroupsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupsCommand::List(list) => {
            let mut groups: Vec<_> = controller.groups_snapshot().iter().cloned().collect();
            groups.sort_by(|a, b| a.name.cmp(&b.name));
            let views: Vec<_> = util::apply_list_args(groups, &list, |g| g.name.as_str())
                .into_iter()
                .map(|g| GroupView::build(controller, g))
                .collect();
            let out = output::render_list(
                &global.output,
                &views,
                |v| GroupRow::from(v),
                |v| v.group.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Get { group } => {
            let group = util::resolve_group(controller, &group)?;
            print_group(controller, group, global)
        }

        GroupsCommand::Create { name, services } => {
            let services = util::resolve_service_ids(controller, &services)?;
            let result = controller
                .execute(CoreCommand::CreateGroup(CreateGroupRequest { name, services }))
                .await?;
            output::notice("Group created", global.quiet);
            print_result(controller, result, global)
        }

        GroupsCommand::Update {
            group,
            name,
            services,
            clear,
        } => {
            let id = util::resolve_group(controller, &group)?.id.clone();
            let services: Option<Vec<EntityId>> = if clear {
                Some(Vec::new())
            } else if services.is_empty() {
                None
            } else {
                Some(util::resolve_service_ids(controller, &services)?)
            };
            let update = UpdateGroupRequest { name, services };
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --name, --service or --clear".into(),
                });
            }
            let result = controller
                .execute(CoreCommand::UpdateGroup { id, update })
                .await?;
            output::notice("Group updated", global.quiet);
            print_result(controller, result, global)
        }

        GroupsCommand::Delete { group } => {
            let group = util::resolve_group(controller, &group)?;
            let prompt = format!(
                "Delete group '{}'? Its {} service(s) become ungrouped.",
                group.name,
                group.services.len()
            );
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            controller
                .execute(CoreCommand::DeleteGroup {
                    id: group.id.clone(),
                })
                .await?;
            output::notice("Group deleted", global.quiet);
            Ok(())
        }
    }
}
