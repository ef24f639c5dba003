use std::fs;
use std::path::Path;

use clap::CommandFactory;

// cli.rs only depends on clap + clap_complete, so it can be compiled here
// on its own.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        panic!("OUT_DIR not set by Cargo");
    };
    let man_dir = Path::new(&out_dir).join("man");
    if let Err(e) = fs::create_dir_all(&man_dir) {
        panic!("failed to create {}: {e}", man_dir.display());
    }

    write_manpages(&cli::Cli::command(), &man_dir);
}

/// One page per command, named `statusdeck-incidents-update.1` and so on.
fn write_manpages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    if let Err(e) = clap_mangen::Man::new(cmd.clone()).render(&mut page) {
        panic!("man page for `{name}` failed to render: {e}");
    }
    let target = dir.join(format!("{name}.1"));
    if let Err(e) = fs::write(&target, page) {
        panic!("failed to write {}: {e}", target.display());
    }

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let prefixed = sub.clone().name(format!("{name}-{}", sub.get_name()));
        write_manpages(&prefixed, dir);
    }
}
