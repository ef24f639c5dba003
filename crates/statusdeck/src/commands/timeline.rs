//! Rendering shared by incidents and maintenance: event detail views and
//! the update timeline.

use tabled::Tabled;

use statusdeck_core::{Controller, EventStatus, StatusEvent, Update};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct UpdateRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl<S: EventStatus> From<&Update<S>> for UpdateRow {
    fn from(u: &Update<S>) -> Self {
        Self {
            when: util::format_time(u.created_at),
            status: u.status.to_string(),
            author: u.author.clone(),
            message: u.message.clone(),
        }
    }
}

/// The update log, oldest first.
pub fn render_timeline<S: EventStatus>(
    format: &OutputFormat,
    event: &StatusEvent<S>,
) -> Result<String, CliError> {
    output::render_list(
        format,
        event.updates(),
        |u| UpdateRow::from(u),
        |u| u.id.to_string(),
    )
}

/// Detail view for one event. `status` and `extra` come pre-rendered since
/// incidents and maintenance show different fields.
pub fn event_detail<S: EventStatus>(
    controller: &Controller,
    event: &StatusEvent<S>,
    status: &str,
    extra: &[String],
) -> String {
    let mut lines = vec![
        format!("ID:       {}", event.id),
        format!("Title:    {}", event.title),
        format!("Status:   {status}"),
    ];
    lines.extend_from_slice(extra);
    lines.push(format!(
        "Services: {}",
        util::service_names(controller, &event.affected_services)
    ));
    lines.push(format!("Created:  {}", util::format_time(event.created_at)));
    lines.push(format!("Updated:  {}", util::format_time(event.updated_at())));
    if !event.description.is_empty() {
        lines.push(String::new());
        lines.push(event.description.clone());
    }
    if let Some(latest) = event.latest_update() {
        lines.push(String::new());
        lines.push(format!(
            "Latest of {} update(s), by {} at {}:",
            event.updates().len(),
            latest.author,
            util::format_time(latest.created_at)
        ));
        lines.push(format!("  {}", latest.message));
    }
    lines.join("\n")
}
