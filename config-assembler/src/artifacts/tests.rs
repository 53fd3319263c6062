use super::*;
use crate::test_fixtures::{
    CAMERA_SECRET, MQTT_SECRET, SecretFiles, sample_options_with, write_secret_files,
};
use artifact_store::{make_inmemory_store, make_local_store};
use mocks::artifact_store::make_store_mock;
use rstest::rstest;
use serde_yml::Value;
use test_utils::asserts::{assert_str_contains, assert_str_not_contains};

fn paths() -> ArtifactPaths {
    ArtifactPaths {
        config: "/etc/frigate/config.yml".into(),
        env_file: "/run/frigate/camera.passwd".into(),
        descriptor: "/etc/frigate/service.yml".into(),
    }
}

fn secrets(dir: &tempfile::TempDir) -> SecretFiles {
    write_secret_files(dir.path())
}

#[test]
fn sample_assembly() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);

    let artifacts = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();

    let config: Value = serde_yml::from_str(&artifacts.app_config).unwrap();
    assert_eq!(
        config["cameras"]["front-door"]["birdseye"]["mode"].as_str(),
        Some("continuous")
    );
    assert_eq!(
        config["cameras"]["garage"]["birdseye"]["mode"].as_str(),
        Some("objects")
    );
    assert_eq!(config["record"]["retain"]["days"].as_u64(), Some(7));
    assert_eq!(
        config["mqtt"]["password"].as_str(),
        Some("{FRIGATE_MQTT_PASSWORD}")
    );
    assert_eq!(
        config["ffmpeg"]["hwaccel_args"][0].as_str(),
        Some("preset-vaapi")
    );

    assert_eq!(artifacts.camera_names, ["front-door", "garage"]);
    assert_eq!(artifacts.service.shm_size.mebibytes(), 1024);
    assert_str_contains(
        &artifacts.descriptor,
        "/etc/frigate/config.yml:/config/config.yml:ro",
    );
    assert_str_contains(&artifacts.descriptor, "/run/frigate/camera.passwd");
}

#[test]
fn secrets_only_in_env_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);

    let artifacts = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();

    for secret in [CAMERA_SECRET, MQTT_SECRET] {
        assert_str_not_contains(&artifacts.app_config, secret);
        assert_str_not_contains(&artifacts.descriptor, secret);
        assert_str_not_contains(&format!("{artifacts:?}"), secret);
    }

    assert_eq!(
        artifacts.env_file.expose(),
        "FRIGATE_RTSP_PASSWORD=\"cam-s3cret\"\nFRIGATE_MQTT_PASSWORD=\"mq\\\"tt \\$ecret\"\n"
    );
}

#[test]
fn single_terminator_trimmed() {
    let dir = tempfile::TempDir::new().unwrap();
    let files = secrets(&dir);
    std::fs::write(&files.camera, "abc\n").unwrap();
    std::fs::write(&files.mqtt, "  padded  \n\n").unwrap();
    let options = sample_options_with(&files, |s| s);

    let artifacts = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();
    let env = artifacts.env_file.expose();

    assert_str_contains(env, "FRIGATE_RTSP_PASSWORD=\"abc\"\n");
    assert_str_contains(env, "FRIGATE_MQTT_PASSWORD=\"  padded  \\n\"\n");
}

#[rstest]
fn idempotent(#[values(DocumentFormat::Yaml, DocumentFormat::Json)] format: DocumentFormat) {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);

    let first = assemble(&options, &paths(), format).unwrap();
    let second = assemble(&options, &paths(), format).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.app_config.as_bytes(), second.app_config.as_bytes());
    assert_eq!(first.env_file.as_bytes(), second.env_file.as_bytes());
    assert_eq!(first.descriptor.as_bytes(), second.descriptor.as_bytes());
}

#[test]
fn legacy_schema_assembly() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| format!("schema: \"0.13\"\n{s}"));

    let artifacts = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();

    assert_str_not_contains(&artifacts.app_config, "go2rtc");
    assert_str_contains(&artifacts.descriptor, "5000:5000");
}

#[test]
fn missing_secret_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let files = secrets(&dir);
    std::fs::remove_file(&files.mqtt).unwrap();
    let options = sample_options_with(&files, |s| s);

    let err = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap_err();
    assert!(matches!(err, AssemblyError::MissingSecretFile { path, .. } if path == files.mqtt));
}

#[test]
fn unreadable_options_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("options.yaml");
    std::fs::write(&path, "cameras: [not, a, camera]\n").unwrap();

    let err = assemble_from_file(&path, &paths(), DocumentFormat::Yaml).unwrap_err();
    assert!(matches!(err, AssemblyError::UnreadableInput(_)));

    let err = assemble_from_file(&dir.path().join("absent.yaml"), &paths(), DocumentFormat::Yaml)
        .unwrap_err();
    assert!(matches!(err, AssemblyError::UnreadableInput(_)));
}

#[rstest]
#[case::invalid_port(|s: String| s.replace("web: 5000", "web: 70000"))]
#[case::negative_retention(|s: String| s.replace("default_days: 7", "default_days: -7"))]
#[case::duplicate_camera(|s: String| s.replace("name: garage", "name: front-door"))]
#[case::missing_secret(|s: String| s.replace("camera_password_file: ", "camera_password_file: /nonexistent"))]
fn failures_write_nothing(#[case] edit: fn(String) -> String) {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), edit);

    let mut store = make_store_mock();
    store.expect_put_from_memory().never();
    store.expect_mkdir_p().never();
    store.expect_file_exists().never();
    store.expect_get_to_memory().never();

    assert!(assemble_and_write(&store, &options, &paths(), DocumentFormat::Yaml).is_err());
}

#[test]
fn invalid_port_error_kind() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s.replace("web: 5000", "web: 70000"));

    let err = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidPort { value: 70000, .. }));
}

#[test]
fn env_file_written_owner_only() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);
    let env_path = paths().env_file;

    let mut store = make_store_mock();
    store.expect_description().returning(|| "mock".to_string());
    store.expect_file_exists().returning(|_| Ok(false));
    store
        .expect_put_from_memory()
        .withf(move |_, to, access| (Path::new(to) == env_path.as_path()) == (*access == FileAccess::OwnerOnly))
        .times(3)
        .returning(|_, _, _| Ok(()));

    assemble_and_write(&store, &options, &paths(), DocumentFormat::Yaml).unwrap();
}

#[test]
fn rewrite_only_when_changed() {
    let dir = tempfile::TempDir::new().unwrap();
    let files = secrets(&dir);
    let options = sample_options_with(&files, |s| s);
    let store = make_inmemory_store();

    let artifacts = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();
    assert_eq!(
        write_artifacts(store.as_ref(), &artifacts, &paths()).unwrap(),
        [WriteOutcome::Written; 3]
    );
    assert_eq!(
        write_artifacts(store.as_ref(), &artifacts, &paths()).unwrap(),
        [WriteOutcome::Unchanged; 3]
    );

    // A rotated secret only touches the env file
    std::fs::write(&files.mqtt, "rotated\n").unwrap();
    let rotated = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();
    assert_eq!(
        write_artifacts(store.as_ref(), &rotated, &paths()).unwrap(),
        [
            WriteOutcome::Unchanged,
            WriteOutcome::Written,
            WriteOutcome::Unchanged
        ]
    );

    assert_eq!(
        store.get_to_memory(&paths().config).unwrap(),
        rotated.app_config.as_bytes()
    );
    assert_eq!(
        store.get_to_memory(&paths().env_file).unwrap(),
        rotated.env_file.as_bytes()
    );
}

#[cfg(unix)]
#[test]
fn unchanged_env_file_is_made_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);
    let out = tempfile::TempDir::new().unwrap();
    let paths = ArtifactPaths {
        config: out.path().join("frigate.yml"),
        env_file: out.path().join("run").join("camera.passwd"),
        descriptor: out.path().join("frigate-service.yml"),
    };
    let artifacts = assemble(&options, &paths, DocumentFormat::Yaml).unwrap();

    // Same bytes already in place, but readable by everyone
    std::fs::create_dir_all(out.path().join("run")).unwrap();
    std::fs::write(&paths.env_file, artifacts.env_file.as_bytes()).unwrap();
    std::fs::set_permissions(&paths.env_file, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = make_local_store(out.path());
    assert_eq!(
        write_artifacts(store.as_ref(), &artifacts, &paths).unwrap(),
        [
            WriteOutcome::Written,
            WriteOutcome::Unchanged,
            WriteOutcome::Written
        ]
    );

    let mode = std::fs::metadata(&paths.env_file)
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(
        std::fs::read(&paths.env_file).unwrap(),
        artifacts.env_file.as_bytes()
    );
}

#[test]
fn unchanged_artifacts_get_their_access_reapplied() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);
    let artifacts = assemble(&options, &paths(), DocumentFormat::Yaml).unwrap();
    let env_path = paths().env_file;

    let mut store = make_store_mock();
    store.expect_file_exists().returning(|_| Ok(true));
    let on_disk = artifacts.clone();
    store.expect_get_to_memory().returning(move |from| {
        Ok(match from.file_name().and_then(|n| n.to_str()) {
            Some("config.yml") => on_disk.app_config.clone().into_bytes(),
            Some("camera.passwd") => on_disk.env_file.as_bytes().to_vec(),
            _ => on_disk.descriptor.clone().into_bytes(),
        })
    });
    store
        .expect_set_access()
        .withf(move |path, access| {
            (Path::new(path) == env_path.as_path()) == (*access == FileAccess::OwnerOnly)
        })
        .times(3)
        .returning(|_, _| Ok(()));
    store.expect_put_from_memory().never();

    assert_eq!(
        write_artifacts(&store, &artifacts, &paths()).unwrap(),
        [WriteOutcome::Unchanged; 3]
    );
}

#[test]
fn partial_write_failure_names_replaced_artifacts() {
    let dir = tempfile::TempDir::new().unwrap();
    let options = sample_options_with(&secrets(&dir), |s| s);
    let env_path = paths().env_file;

    let mut store = make_store_mock();
    store.expect_description().returning(|| "mock".to_string());
    store.expect_file_exists().returning(|_| Ok(false));
    store
        .expect_put_from_memory()
        .returning(move |_, to, _| {
            if Path::new(to) == env_path.as_path() {
                Err(anyhow::anyhow!("disk full"))
            } else {
                Ok(())
            }
        })
        .times(2);

    let err = assemble_and_write(&store, &options, &paths(), DocumentFormat::Yaml).unwrap_err();
    let message = format!("{err:#}");

    assert_str_contains(&message, "after replacing `/etc/frigate/config.yml`");
    assert_str_contains(&message, "mix old and new versions");
    assert_str_contains(&message, "disk full");
    assert_str_not_contains(&message, "/etc/frigate/service.yml");
}
