//! End-to-end scenarios: a local git repository is acquired through the
//! real git acquirer and resolved from disk.

use std::path::Path;
use std::sync::Arc;

use deploy_config::{DeployConfig, model::DEFAULT_COMPOSE_FILES};
use deploy_core::{Assembler, Error, Response, Settings, TriggerEvent};
use deploy_git::CancelToken;
use deploy_test_utils::git::{commit_all, repo_with_files, tag_head};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Fixture {
    source: TempDir,
    workdir: TempDir,
}

impl Fixture {
    fn new(files: &[(&str, &str)]) -> Self {
        let source = TempDir::new().unwrap();
        repo_with_files(source.path(), files);
        Self {
            source,
            workdir: TempDir::new().unwrap(),
        }
    }

    fn assembler(&self) -> Assembler {
        let settings = Settings {
            workdir_root: self.workdir.path().to_path_buf(),
            // Local transports cannot fetch shallow
            clone_depth: 0,
            ..Settings::default()
        };
        Assembler::new(&settings)
    }

    fn event(&self, repository: &str, reference: &str) -> TriggerEvent {
        TriggerEvent::new(
            repository,
            self.source.path().to_string_lossy(),
            reference,
        )
    }

    fn workdir_entries(&self) -> usize {
        std::fs::read_dir(self.workdir.path()).unwrap().count()
    }
}

#[test]
fn scenario_a_name_only_config_gets_defaults() {
    let fixture = Fixture::new(&[
        (".compose-deploy.yaml", "name: demo\n"),
        ("compose.yaml", "services: {}\n"),
    ]);

    let request = fixture
        .assembler()
        .assemble(&fixture.event("demo-repo", "refs/heads/main"), &CancelToken::new())
        .unwrap();

    let config = request.config();
    assert_eq!(config.name, "demo");
    assert_eq!(config.reference, "refs/heads/main");
    assert_eq!(config.working_directory, ".");
    assert_eq!(config.compose_files, DEFAULT_COMPOSE_FILES.map(String::from).to_vec());
    assert_eq!(config.timeout, 300);
    assert!(request.working_copy_path().join("compose.yaml").is_file());
    assert!(request.working_copy_path().starts_with(fixture.workdir.path()));

    drop(request);
    assert_eq!(fixture.workdir_entries(), 0);
}

#[test]
fn scenario_b_empty_compose_files_is_invalid() {
    let fixture = Fixture::new(&[(".compose-deploy.yml", "name: demo\ncompose_files: []\n")]);

    let err = fixture
        .assembler()
        .assemble(&fixture.event("demo-repo", "main"), &CancelToken::new())
        .unwrap_err();

    let Error::Resolve { ref source, .. } = err else {
        panic!("expected resolution failure, got {err:?}");
    };
    assert!(matches!(source, deploy_config::Error::InvalidConfig { .. }));
    assert_eq!(source.missing_key(), Some("compose_files"));
    assert_eq!(Response::from_error(&err).code, 422);

    // The copy survives inside the error until the caller lets go of it
    assert_eq!(fixture.workdir_entries(), 1);
    drop(err);
    assert_eq!(fixture.workdir_entries(), 0);
}

#[test]
fn working_dir_outside_checkout_is_invalid() {
    let fixture = Fixture::new(&[(
        ".compose-deploy.yaml",
        "name: demo\nworking_dir: ../../../etc\n",
    )]);

    let err = fixture
        .assembler()
        .assemble(&fixture.event("demo-repo", "main"), &CancelToken::new())
        .unwrap_err();

    let Error::Resolve { ref source, .. } = err else {
        panic!("expected resolution failure, got {err:?}");
    };
    assert!(matches!(source, deploy_config::Error::InvalidConfig { .. }));
    assert_eq!(source.offending_key(), Some("working_dir"));
    assert_eq!(Response::from_error(&err).code, 422);
}

#[test]
fn scenario_c_missing_config_uses_default() {
    let fixture = Fixture::new(&[("docker-compose.yml", "services: {}\n")]);

    let request = fixture
        .assembler()
        .assemble(&fixture.event("my-repo", "refs/heads/main"), &CancelToken::new())
        .unwrap();

    assert_eq!(request.config(), &DeployConfig::default_for("my-repo"));
}

#[test]
fn scenario_d_unreachable_remote_fails_clone() {
    let workdir = TempDir::new().unwrap();
    let settings = Settings {
        workdir_root: workdir.path().to_path_buf(),
        ..Settings::default()
    };
    let event = TriggerEvent::new("demo", "http://127.0.0.1:9/acme/demo.git", "refs/heads/main");

    let err = Assembler::new(&settings)
        .assemble(&event, &CancelToken::new())
        .unwrap_err();

    assert!(matches!(err, Error::Acquire(deploy_git::Error::CloneFailed { .. })));
    assert!(err.into_working_copy().is_none());
    assert_eq!(std::fs::read_dir(workdir.path()).unwrap().count(), 0);
}

#[test]
fn tag_reference_deploys_tagged_commit() {
    let fixture = Fixture::new(&[(".compose-deploy.yaml", "name: demo\ntimeout: 30\n")]);
    let repo = git2::Repository::open(fixture.source.path()).unwrap();
    tag_head(&repo, "v1.0.0");
    let tagged = repo.head().unwrap().peel_to_commit().unwrap().id();

    std::fs::write(
        fixture.source.path().join(".compose-deploy.yaml"),
        "name: demo\ntimeout: 600\n",
    )
    .unwrap();
    commit_all(&repo, "raise timeout");

    let request = fixture
        .assembler()
        .assemble(&fixture.event("demo", "refs/tags/v1.0.0"), &CancelToken::new())
        .unwrap();

    assert_eq!(request.working_copy().commit(), tagged.to_string());
    assert_eq!(request.config().timeout, 30);
    assert!(!request.matches_reference());
}

#[test]
fn canceled_trigger_leaves_nothing_behind() {
    let fixture = Fixture::new(&[(".compose-deploy.yaml", "name: demo\n")]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = fixture
        .assembler()
        .assemble(&fixture.event("demo", "main"), &cancel)
        .unwrap_err();

    assert!(err.is_canceled());
    assert_eq!(fixture.workdir_entries(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_triggers_for_one_stack_are_isolated() {
    let fixture = Fixture::new(&[(".compose-deploy.yaml", "name: demo\n")]);
    let assembler = Arc::new(fixture.assembler());

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let assembler = Arc::clone(&assembler);
            let event = fixture.event("demo", "refs/heads/main");
            tokio::spawn(assembler.assemble_async(event, CancelToken::new()))
        })
        .collect();

    let mut requests = Vec::new();
    for task in tasks {
        requests.push(task.await.unwrap().unwrap());
    }

    let mut paths: Vec<&Path> = requests.iter().map(|r| r.working_copy_path()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 6);
    assert_eq!(fixture.workdir_entries(), 6);

    drop(requests);
    assert_eq!(fixture.workdir_entries(), 0);
}

#[test]
fn handoff_serializes_for_executor() {
    let fixture = Fixture::new(&[(".compose-deploy.yaml", "name: demo\n")]);
    let request = fixture
        .assembler()
        .assemble(&fixture.event("demo", "main"), &CancelToken::new())
        .unwrap();

    let handoff = request.handoff();
    let json = serde_json::to_value(&handoff).unwrap();

    assert_eq!(json["config"]["name"], "demo");
    assert_eq!(json["config"]["working_dir"], ".");
    assert!(handoff.working_copy_path.join(".compose-deploy.yaml").is_file());

    if let Some(root) = handoff.working_copy_path.parent() {
        std::fs::remove_dir_all(root).unwrap();
    }
}
