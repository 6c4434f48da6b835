// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Common argument: project root
fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .value_name("DIR")
        .help("Project root (default: current directory)")
}

/// Common argument: config file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Config file (default: <root>/legacify.toml if present)")
}

fn build_args() -> Vec<Arg> {
    vec![
        root_arg(),
        config_arg(),
        Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help("Fail on import statements that never close"),
        Arg::new("create_dirs")
            .long("create-dirs")
            .action(ArgAction::SetTrue)
            .help("Create missing output directories"),
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the run report as JSON"),
    ]
}

fn build_cli() -> Command {
    Command::new("legacify")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Legacify Contributors")
        .about("Rewrite an ES-module GNOME Shell extension into the legacy imports dialect")
        .subcommand_required(false)
        .args(build_args())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("build")
                .about("Transpile the source tree and patch metadata.json")
                .args(build_args()),
        )
        .subcommand(
            Command::new("mappings")
                .about("List the effective import table in evaluation order")
                .arg(root_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

/// Render `legacify.1` plus one `legacify-<sub>.1` page per subcommand
fn write_man_pages(man_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(man_dir)?;

    let cli = build_cli();
    let mut pages = vec![("legacify".to_string(), cli.clone())];
    for sub in cli.get_subcommands() {
        let name = format!("legacify-{}", sub.get_name());
        pages.push((name, sub.clone()));
    }

    for (name, cmd) in pages {
        let mut buffer = Vec::new();
        Man::new(cmd).title(name.as_str()).render(&mut buffer)?;
        fs::write(man_dir.join(format!("{name}.1")), buffer)?;
    }
    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping man pages");
        return;
    };

    let man_dir = PathBuf::from(manifest_dir).join("man");
    if let Err(e) = write_man_pages(&man_dir) {
        println!("cargo:warning=Failed to write man pages to {}: {}", man_dir.display(), e);
    }
}
