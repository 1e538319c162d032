use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use terminal_scheme_manager::formatting::fix_formatting;
use terminal_scheme_manager::{
    ConfigFile, CycleDirection, Error, FixedPath, ProfileTarget, SettingsLocator,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(format!("tests/fixtures/{}", name))
}

fn stage_fixture(dir: &std::path::Path, name: &str) -> PathBuf {
    let staged = dir.join("profiles.json");
    fs::copy(fixture_path(name), &staged).unwrap();
    staged
}

#[test]
fn open_fails_when_the_file_is_missing() {
    init_logging();
    let dir = tempdir().unwrap();
    let missing = dir.path().join("profiles.json");
    let err = ConfigFile::open_path(&missing).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }));
}

#[test]
fn open_through_a_locator_strategy() {
    init_logging();
    let dir = tempdir().unwrap();
    let staged = stage_fixture(dir.path(), "profile_with_schemes.json");
    let locator = FixedPath(staged.clone());
    let file = ConfigFile::open(&locator).unwrap();
    assert_eq!(file.path(), staged);
    assert_eq!(file.config().scheme_names().unwrap().len(), 3);
    assert_eq!(locator.settings_path().unwrap(), staged);
}

#[test]
fn write_to_reproduces_the_normalized_file() {
    init_logging();
    let dir = tempdir().unwrap();
    let staged = stage_fixture(dir.path(), "default_profiles.json");
    let file = ConfigFile::open_path(&staged).unwrap();

    let out = dir.path().join("written.json");
    file.write_to(&out).unwrap();

    let original = fs::read_to_string(&staged).unwrap();
    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, fix_formatting(&original));
}

#[test]
fn write_backs_up_the_previous_contents() {
    init_logging();
    let dir = tempdir().unwrap();
    let staged = stage_fixture(dir.path(), "schemes_with_set_scheme.json");
    let original = fs::read_to_string(&staged).unwrap();

    let mut file = ConfigFile::open_path(&staged).unwrap();
    let next = file
        .config_mut()
        .cycle_scheme(&ProfileTarget::Defaults, CycleDirection::Forward)
        .unwrap();
    assert_eq!(next, "3024 Day");
    file.write().unwrap();

    let backups: Vec<PathBuf> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let name = path.file_name().unwrap().to_str().unwrap();
            name.starts_with("profiles_") && name.ends_with(".json")
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), original);

    let rewritten = fs::read_to_string(&staged).unwrap();
    assert!(rewritten.contains("\"colorScheme\": \"3024 Day\""));
    // the comment above the defaults block survived the write
    assert!(rewritten.contains("// Applies to every profile without its own scheme"));
}

#[test]
fn remove_backups_deletes_only_timestamped_copies() {
    init_logging();
    let dir = tempdir().unwrap();
    let staged = stage_fixture(dir.path(), "profile_with_schemes.json");
    let file = ConfigFile::open_path(&staged).unwrap();

    fs::write(dir.path().join("profiles_202601021530.json"), "{}").unwrap();
    fs::write(dir.path().join("profiles_202601021531.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.json"), "{}").unwrap();

    let removed = file.remove_backups().unwrap();
    assert_eq!(removed, 2);
    assert!(dir.path().join("notes.json").exists());
    assert!(staged.exists());
}

#[test]
fn reload_discards_in_memory_changes() {
    init_logging();
    let dir = tempdir().unwrap();
    let staged = stage_fixture(dir.path(), "schemes_with_set_scheme.json");
    let mut file = ConfigFile::open_path(&staged).unwrap();

    file.config_mut()
        .set_scheme("AlienBlood", &ProfileTarget::Defaults)
        .unwrap();
    assert_eq!(
        file.config().current_scheme(&ProfileTarget::Defaults).unwrap(),
        Some("AlienBlood".to_string())
    );

    file.reload().unwrap();
    assert_eq!(
        file.config().current_scheme(&ProfileTarget::Defaults).unwrap(),
        Some("Monokai Soda".to_string())
    );
}
