// tests/inputs.rs
//! Integration tests for file-based inputs: listing, container.yaml and
//! configuration

use rpm2flatpak::manifest::{read_listing, read_skeleton};
use rpm2flatpak::{ConvertConfig, Error};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_read_listing_and_skeleton() {
    let dir = TempDir::new().unwrap();

    let listing_path = dir.path().join("gnome-calculator.yaml");
    fs::write(
        &listing_path,
        "data:\n  components:\n    rpms:\n      libmpc:\n        ref: f41\n      gtksourceview5:\n        ref: 5\n      mpfr:\n        repository: https://git.example.org/rpms/mpfr\n",
    )
    .unwrap();

    let container_path = dir.path().join("container.yaml");
    fs::write(
        &container_path,
        "flatpak:\n  id: org.gnome.Calculator\n  command: gnome-calculator\n  finish-args: |-\n    --share=ipc\n    --socket=wayland\n",
    )
    .unwrap();

    let entries = read_listing(&listing_path).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["libmpc", "gtksourceview5", "mpfr"]);
    assert_eq!(entries[1].revision, "5");
    assert!(entries[2].is_private);

    let config = ConvertConfig::default();
    let skeleton = read_skeleton(&container_path, &config, "f41").unwrap();
    assert_eq!(skeleton.app_id, "org.gnome.Calculator");
    assert_eq!(skeleton.command, "gnome-calculator");
    assert_eq!(skeleton.runtime_version, "f41");
    assert_eq!(skeleton.finish_args, vec!["--share=ipc", "--socket=wayland"]);
}

#[test]
fn test_missing_listing_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = read_listing(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rpm2flatpak.toml");
    fs::write(
        &path,
        "jobs = 8\nrecipe-url = \"https://git.example.org/{name}/raw/{ref}/{name}.spec\"\n\n[defines]\ndist = \".fc41\"\n",
    )
    .unwrap();

    let config = ConvertConfig::load(&path).unwrap();
    assert_eq!(config.jobs(), 8);
    assert_eq!(config.macro_defaults().get("dist"), Some(".fc41"));
}
