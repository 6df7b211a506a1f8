//! Keeps the workspace manifests in lockstep: every member inherits the
//! workspace version, and sibling crates are referenced through
//! `[workspace.dependencies]` rather than ad-hoc paths.

use std::path::{Path, PathBuf};

const MEMBERS: [&str; 3] = [
    "crates/rigforge-core",
    "crates/rigforge-cli",
    "crates/rigforge-state",
];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .unwrap()
        .to_path_buf()
}

fn manifest(dir: &Path) -> toml::Value {
    let text = std::fs::read_to_string(dir.join("Cargo.toml")).unwrap();
    text.parse().unwrap()
}

fn inherits_workspace(value: Option<&toml::Value>) -> bool {
    value
        .and_then(|v| v.get("workspace"))
        .and_then(toml::Value::as_bool)
        == Some(true)
}

#[test]
fn all_crates_use_workspace_version() {
    let root = workspace_root();
    for member in MEMBERS {
        let doc = manifest(&root.join(member));
        assert!(
            inherits_workspace(doc["package"].get("version")),
            "{member} should use version.workspace = true"
        );
    }
}

#[test]
fn workspace_members_match_crate_list() {
    let doc = manifest(&workspace_root());
    let mut members: Vec<&str> = doc["workspace"]["members"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(toml::Value::as_str)
        .collect();
    members.sort_unstable();
    let mut expected = MEMBERS.to_vec();
    expected.sort_unstable();
    assert_eq!(members, expected);
}

#[test]
fn sibling_crates_come_from_workspace_dependencies() {
    let root = workspace_root();
    for member in MEMBERS {
        let doc = manifest(&root.join(member));
        let Some(deps) = doc.get("dependencies").and_then(toml::Value::as_table) else {
            continue;
        };
        for (name, spec) in deps.iter().filter(|(n, _)| n.starts_with("rigforge-")) {
            assert!(
                inherits_workspace(Some(spec)),
                "{member}: dependency {name} should use workspace = true"
            );
        }
    }
}

#[test]
fn workspace_version_matches_cargo_pkg() {
    let doc = manifest(&workspace_root());
    let ws_version = doc["workspace"]["package"]["version"].as_str().unwrap();
    assert_eq!(ws_version, env!("CARGO_PKG_VERSION"));
}
