// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Flags shared by commands that fetch recipes
fn fetch_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("config").long("config").value_name("FILE").help("Configuration file (TOML)"))
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_name("N")
                .help("Number of packages converted in parallel"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("HTTP timeout in seconds"),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .long("define")
                .value_name("NAME=VALUE")
                .action(ArgAction::Append)
                .help("Macro default (repeatable)"),
        )
}

fn build_cli() -> Command {
    Command::new("rpm2flatpak")
        .version(env!("CARGO_PKG_VERSION"))
        .author("rpm2flatpak Contributors")
        .about("Convert RPM component listings into flatpak-builder manifests")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging (RUST_LOG takes precedence)"),
        )
        .subcommand(fetch_args(
            Command::new("convert")
                .about("Build a flatpak manifest for an application")
                .arg(Arg::new("app").required(true).help("Application name, as known to fedmod"))
                .arg(
                    Arg::new("flathub")
                        .long("flathub")
                        .value_name("TERM")
                        .help("Search term for the Flathub application to take defaults from"),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Let fedmod overwrite existing files"),
                )
                .arg(
                    Arg::new("no_bootstrap")
                        .long("no-bootstrap")
                        .action(ArgAction::SetTrue)
                        .help("Use existing container.yaml and listing instead of running fedmod"),
                )
                .arg(Arg::new("listing").long("listing").value_name("FILE").help("Component listing (default: <APP>.yaml)"))
                .arg(
                    Arg::new("container")
                        .long("container")
                        .value_name("FILE")
                        .default_value("container.yaml")
                        .help("Container description"),
                )
                .arg(
                    Arg::new("runtime_version")
                        .long("runtime-version")
                        .value_name("VERSION")
                        .help("Runtime branch (default: f<VERSION_ID> of the host)"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the manifest here instead of stdout"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "yaml"])
                        .default_value("json")
                        .help("Manifest format"),
                ),
        ))
        .subcommand(fetch_args(
            Command::new("module")
                .about("Translate one package and print its module")
                .arg(Arg::new("name").required(true).help("Package name"))
                .arg(
                    Arg::new("ref")
                        .long("ref")
                        .default_value("rawhide")
                        .help("Revision (branch, tag or commit) of the package repository"),
                ),
        ))
        .subcommand(
            Command::new("search")
                .about("Look up a Flathub application id")
                .arg(Arg::new("term").required(true).help("Case-insensitive substring of the id or name")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("rpm2flatpak.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
