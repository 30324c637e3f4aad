//! Environment variable layering of the configuration loader.
//!
//! Kept in its own test binary: the loader reads the process environment, so
//! these tests must not run next to tests expecting file values only.

use pagebuilder_config::{ConfigLoader, ENVIRONMENT_VAR};
use std::fs;

#[test]
fn test_environment_layers() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("default.toml"),
        "[control]\nquery_param_name = \"q\"\nmax_pagination_window = 7\n",
    )
    .expect("write default.toml");
    fs::write(
        dir.path().join("staging.toml"),
        "[control]\nquery_param_name = \"search\"\n",
    )
    .expect("write staging.toml");

    std::env::set_var(ENVIRONMENT_VAR, "staging");
    std::env::set_var("PAGEBUILDER__CONTROL__MAX_PAGINATION_WINDOW", "11");
    std::env::set_var("PAGEBUILDER__FACTORY", "compact");

    let settings = ConfigLoader::new(dir.path()).expect("load").get();

    std::env::remove_var(ENVIRONMENT_VAR);
    std::env::remove_var("PAGEBUILDER__CONTROL__MAX_PAGINATION_WINDOW");
    std::env::remove_var("PAGEBUILDER__FACTORY");

    assert_eq!(settings.control.query_param_name, "search");
    assert_eq!(settings.control.max_pagination_window, 11);
    assert_eq!(settings.factory, "compact");
}
