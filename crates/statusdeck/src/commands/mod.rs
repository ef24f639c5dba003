//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod config_cmd;
pub mod groups;
pub mod incidents;
pub mod maintenance;
pub mod services;
pub mod status;
pub mod timeline;
pub mod util;
pub mod whoami;

use statusdeck_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to its handler. The controller must
/// already be connected.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status(args) => status::handle(controller, args, global).await,
        Command::Services(args) => services::handle(controller, args, global).await,
        Command::Groups(args) => groups::handle(controller, args, global).await,
        Command::Incidents(args) => incidents::handle(controller, args, global).await,
        Command::Maintenance(args) => maintenance::handle(controller, args, global).await,
        Command::Whoami => whoami::handle(controller, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a backend connection".into(),
        )),
    }
}
