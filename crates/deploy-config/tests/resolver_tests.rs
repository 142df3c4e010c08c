//! Resolution against working copies on disk

use deploy_config::{ConfigResolver, DeployConfig, Error};
use deploy_fs::NormalizedPath;
use deploy_test_utils::repo::TestRepo;
use pretty_assertions::assert_eq;

#[test]
fn test_name_only_config_gets_all_defaults() {
    let repo = TestRepo::new();
    repo.write_file(".compose-deploy.yaml", "name: demo\n");

    let config = ConfigResolver::on_disk()
        .resolve(&repo.normalized(), "ignored")
        .unwrap();

    assert_eq!(config.name, "demo");
    assert_eq!(config.reference, "refs/heads/main");
    assert_eq!(config.working_directory, ".");
    assert_eq!(
        config.compose_files,
        vec![
            "compose.yaml",
            "compose.yml",
            "docker-compose.yml",
            "docker-compose.yaml"
        ]
    );
    assert_eq!(config.timeout, 300);
}

#[test]
fn test_empty_compose_files_names_the_key() {
    let repo = TestRepo::new();
    repo.write_file(".compose-deploy.yml", "name: demo\ncompose_files: []\n");

    let err = ConfigResolver::on_disk()
        .resolve(&repo.normalized(), "my-repo")
        .unwrap_err();

    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert_eq!(err.missing_key(), Some("compose_files"));
    assert!(err.to_string().contains("compose_files"));
}

#[test]
fn test_no_config_returns_default() {
    let repo = TestRepo::new();
    repo.write_file("compose.yaml", "services: {}\n");
    repo.write_file("nested/.compose-deploy.yaml", "name: nested\n");

    let config = ConfigResolver::on_disk()
        .resolve(&repo.normalized(), "my-repo")
        .unwrap();

    assert_eq!(config, DeployConfig::default_for("my-repo"));
}

#[test]
fn test_yaml_preferred_over_yml() {
    let repo = TestRepo::new();
    repo.write_file(".compose-deploy.yml", "name: second\n");
    repo.write_file(".compose-deploy.yaml", "name: first\n");

    let located = ConfigResolver::on_disk()
        .locate(&repo.normalized())
        .unwrap()
        .unwrap();

    assert_eq!(located.file_name(), Some(".compose-deploy.yaml"));
}

#[test]
fn test_missing_working_copy_is_not_a_fallback() {
    let repo = TestRepo::new();
    let missing = NormalizedPath::new(repo.root()).join("missing");

    let err = ConfigResolver::on_disk()
        .resolve(&missing, "my-repo")
        .unwrap_err();

    assert!(matches!(err, Error::Fs(_)));
}
