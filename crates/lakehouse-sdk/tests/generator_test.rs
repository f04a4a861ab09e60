//! Integration tests for the full generation pipeline.
//!
//! Tests that export launch variables touch the process environment and are
//! marked `#[serial]`.

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use lakehouse_sdk::artifacts::ArtifactKind;
use lakehouse_sdk::generator::{Generator, GeneratorOptions};
use lakehouse_sdk::host::{HostIdentity, HostSource};
use lakehouse_sdk::launch::{DRIVER_HOST_VAR, SUBMIT_ARGS_VAR};
use lakehouse_sdk::GeneratorError;
use serial_test::serial;
use tempfile::TempDir;

const SPARK_INIT_FIXTURE: &str = include_str!("fixtures/spark_init.py");
const README_FIXTURE: &str = include_str!("fixtures/README.md");

fn worker_1() -> HostSource {
    HostSource::Fixed(HostIdentity::new(
        "worker-1",
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
    ))
}

fn options_for(dir: &Path) -> GeneratorOptions {
    GeneratorOptions {
        output_dir: dir.to_path_buf(),
        host: worker_1(),
        ..GeneratorOptions::default()
    }
}

#[tokio::test]
#[serial]
async fn test_run_writes_both_artifacts_verbatim() {
    let dir = TempDir::new().unwrap();
    let generator = Generator::new(options_for(dir.path()));

    let report = generator.run(|_| {}).await.unwrap();

    let init = fs::read(dir.path().join("spark_init.py")).unwrap();
    let readme = fs::read(dir.path().join("README.md")).unwrap();
    assert_eq!(init, SPARK_INIT_FIXTURE.as_bytes());
    assert_eq!(readme, README_FIXTURE.as_bytes());
    assert_eq!(
        report.written,
        vec![dir.path().join("spark_init.py"), dir.path().join("README.md")]
    );
}

#[tokio::test]
#[serial]
async fn test_run_output_independent_of_environment() {
    let first = TempDir::new().unwrap();
    Generator::new(options_for(first.path()))
        .run(|_| {})
        .await
        .unwrap();

    std::env::set_var("HIVE_METASTORE_URI", "thrift://elsewhere:9083");
    std::env::set_var("NAMESPACE", "other");
    let second = TempDir::new().unwrap();
    let result = Generator::new(options_for(second.path())).run(|_| {}).await;
    std::env::remove_var("HIVE_METASTORE_URI");
    std::env::remove_var("NAMESPACE");
    result.unwrap();

    for kind in ArtifactKind::ALL {
        assert_eq!(
            fs::read(kind.path_in(first.path())).unwrap(),
            fs::read(kind.path_in(second.path())).unwrap(),
            "{kind} differs"
        );
    }
}

#[tokio::test]
#[serial]
async fn test_run_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let generator = Generator::new(options_for(dir.path()));

    generator.run(|_| {}).await.unwrap();
    let first_init = fs::read(dir.path().join("spark_init.py")).unwrap();
    let first_readme = fs::read(dir.path().join("README.md")).unwrap();

    generator.run(|_| {}).await.unwrap();
    assert_eq!(fs::read(dir.path().join("spark_init.py")).unwrap(), first_init);
    assert_eq!(fs::read(dir.path().join("README.md")).unwrap(), first_readme);
}

#[tokio::test]
#[serial]
async fn test_driver_host_exported_before_any_write() {
    std::env::remove_var(DRIVER_HOST_VAR);
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let err = Generator::new(options_for(&missing))
        .run(|_| panic!("nothing should be written"))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Write { .. }));
    assert_eq!(std::env::var(DRIVER_HOST_VAR).unwrap(), "10.0.0.5");
    assert!(std::env::var(SUBMIT_ARGS_VAR)
        .unwrap()
        .starts_with("--packages io.delta:delta-spark_2.12:3.2.0,"));
    assert!(!missing.exists());
}

#[tokio::test]
#[serial]
async fn test_export_can_be_disabled() {
    std::env::remove_var(DRIVER_HOST_VAR);
    let dir = TempDir::new().unwrap();
    let options = GeneratorOptions {
        export_env: false,
        ..options_for(dir.path())
    };

    let report = Generator::new(options).run(|_| {}).await.unwrap();

    assert!(std::env::var(DRIVER_HOST_VAR).is_err());
    assert_eq!(report.driver_host().to_string(), "10.0.0.5");
}

#[tokio::test]
#[serial]
async fn test_on_written_sees_init_before_readme() {
    let dir = TempDir::new().unwrap();
    let mut seen = Vec::new();

    Generator::new(options_for(dir.path()))
        .run(|artifact| {
            assert!(artifact.path.exists());
            seen.push(artifact.kind);
        })
        .await
        .unwrap();

    assert_eq!(seen, vec![ArtifactKind::SparkInit, ArtifactKind::Readme]);
}

#[tokio::test]
#[serial]
async fn test_readme_failure_leaves_init_in_place() {
    let dir = TempDir::new().unwrap();
    // A directory squatting on README.md makes the second write fail.
    fs::create_dir(dir.path().join("README.md")).unwrap();

    let err = Generator::new(options_for(dir.path()))
        .run(|_| {})
        .await
        .unwrap_err();

    match err {
        GeneratorError::Write { path, .. } => assert_eq!(path, dir.path().join("README.md")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(dir.path().join("spark_init.py").is_file());
}

#[tokio::test]
#[serial]
async fn test_resolved_localhost_is_ip_literal() {
    let dir = TempDir::new().unwrap();
    let options = GeneratorOptions {
        host: HostSource::Named("localhost".to_string()),
        ..options_for(dir.path())
    };

    let report = Generator::new(options).run(|_| {}).await.unwrap();

    let exported: IpAddr = std::env::var(DRIVER_HOST_VAR).unwrap().parse().unwrap();
    assert_eq!(exported, report.host.address);
    assert!(exported.is_loopback());
}
