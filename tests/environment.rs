//! Public API tests against the shipped environment files.

use coffeeshop_environment::environment::active;
use coffeeshop_environment::{Environment, EnvironmentError, Target};
use std::path::PathBuf;

fn config_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join(name)
}

fn read_config(name: &str) -> Environment {
    let content = std::fs::read_to_string(config_path(name)).unwrap();
    Environment::from_yaml_str(&content).unwrap()
}

#[test]
fn shipped_files_match_builtin_targets() {
    assert_eq!(
        read_config("environment.development.yaml"),
        Target::Development.environment()
    );
    assert_eq!(
        read_config("environment.production.yaml"),
        Target::Production.environment()
    );
}

#[test]
fn active_environment_is_set_once() {
    let dev = Target::Development.environment();

    let active_env = active::init(dev.clone()).unwrap();
    assert_eq!(active_env, &dev);
    assert_eq!(active::get(), Some(&dev));

    let second = active::init(Target::Production.environment());
    assert!(matches!(second, Err(EnvironmentError::AlreadyInitialized)));

    // first value stays in place
    let current = active::get().unwrap();
    assert!(!current.production());
    assert_eq!(current.api_server_url(), "http://127.0.0.1:5000");
}
