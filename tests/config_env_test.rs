//! Environment overrides live in their own test binary: env vars are process-wide.

use std::env;
use std::fs;

use tempfile::TempDir;

use blindtree::config::Settings;
use blindtree::domain::SearchMethod;

#[test]
fn given_env_vars_when_loading_then_override_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blindtree.toml");
    fs::write(&path, "method = \"bfs\"\npalette = [\"#111\"]\n").unwrap();

    env::set_var("BLINDTREE_METHOD", "DFS");
    env::set_var("BLINDTREE_PALETTE", "#123,#456");
    let loaded = Settings::load(Some(&path));
    env::set_var("BLINDTREE_METHOD", "bogus");
    let bogus = Settings::load(Some(&path));
    env::remove_var("BLINDTREE_METHOD");
    env::remove_var("BLINDTREE_PALETTE");

    let settings = loaded.expect("load settings");
    assert_eq!(settings.method, SearchMethod::Dfs);
    assert_eq!(settings.palette, vec!["#123", "#456"]);
    assert!(bogus.is_err());
}
