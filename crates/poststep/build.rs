//! Renders roff man pages from the clap tree into `$OUT_DIR/man`.
//!
//! `poststep.1` is embedded in the binary (`poststep man`); the per-command
//! pages (`poststep-run.1`, ...) are left in the same directory for
//! packagers to copy into `share/man/man1`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// cli.rs only needs clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .expect("OUT_DIR is set for build scripts")
        .into();
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("man output directory is creatable");

    let root = cli::Cli::command();
    write_page(&root, &man_dir);

    let parent = root.get_name().to_owned();
    for sub in root.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let page = sub.clone().name(format!("{parent}-{}", sub.get_name()));
        write_page(&page, &man_dir);
    }
}

fn write_page(cmd: &clap::Command, dir: &Path) {
    let path = dir.join(format!("{}.1", cmd.get_name()));
    let mut roff = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut roff)
        .unwrap_or_else(|e| panic!("rendering {}: {e}", path.display()));
    fs::write(&path, roff).unwrap_or_else(|e| panic!("writing {}: {e}", path.display()));
}
