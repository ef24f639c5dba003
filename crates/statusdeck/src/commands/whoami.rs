use statusdeck_core::{Controller, User};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(user: &User, author: &str) -> String {
    let mut lines = vec![
        format!("ID:     {}", user.id),
        format!("Email:  {}", user.email),
        format!("Name:   {}", user.name.as_deref().unwrap_or("-")),
        format!("Role:   {}", user.role.as_deref().unwrap_or("-")),
    ];
    if let Some(ref org) = user.organization {
        lines.push(format!("Org:    {} ({})", org.name, org.id));
    }
    lines.push(format!("Author: {author}"));
    lines.join("\n")
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let user = controller
        .current_user()
        .await
        .ok_or_else(|| CliError::Internal("connected without a user session".into()))?;

    // Name stamped on updates: configured author first, then the account.
    let author = controller
        .config()
        .author
        .clone()
        .unwrap_or_else(|| user.display_name().to_owned());

    let out = output::render_single(
        &global.output,
        &user,
        |u| detail(u, &author),
        |u| u.email.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
