use super::*;
use std::io::Write;

fn entry(teams: &[(&str, &str)], apps: &[(&str, bool)], repos: &[&str]) -> AccessEntry {
    AccessEntry {
        teams: teams
            .iter()
            .map(|(team, permission)| (team.to_string(), permission.to_string()))
            .collect(),
        apps: apps.iter().map(|(app, on)| (app.to_string(), *on)).collect(),
        repos: repos.iter().map(|repo| repo.to_string()).collect(),
    }
}

#[test]
fn test_normalize_flattens_entries_per_repository() {
    let entries = vec![
        entry(&[("team-a", "pull"), ("team-b", "push")], &[], &["repo-a", "repo-b"]),
        entry(&[("team-c", "pull")], &[], &["repo-c"]),
        entry(&[("team-c", "pull")], &[("dependabot", true)], &["repo-d"]),
    ];

    let config = normalize(&entries, "main-team").unwrap();

    assert_eq!(config.len(), 4);
    assert_eq!(config["repo-a"], config["repo-b"]);
    assert_eq!(config["repo-a"].teams["team-b"], "push");
    assert!(config["repo-c"].apps.is_empty());
    assert!(config["repo-d"].app_enabled("dependabot"));
    assert!(!config["repo-c"].app_enabled("dependabot"));
}

#[test]
fn test_normalize_rejects_duplicate_repo_in_one_entry() {
    let entries = vec![entry(
        &[("team-c", "pull")],
        &[("dependabot", true)],
        &["repo-d", "repo-d"],
    )];

    let err = normalize(&entries, "main-team").unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateRepository { repo } if repo == "repo-d"));
}

#[test]
fn test_normalize_rejects_duplicate_repo_across_entries() {
    let entries = vec![
        entry(&[("team-a", "pull")], &[], &["a"]),
        entry(&[("team-b", "push")], &[], &["b", "a"]),
    ];

    let err = normalize(&entries, "main-team").unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateRepository { repo } if repo == "a"));
}

#[test]
fn test_normalize_rejects_main_team() {
    let entries = vec![
        entry(&[("team-a", "pull")], &[], &["a"]),
        entry(&[("main-team", "admin")], &[], &["b"]),
    ];

    let err = normalize(&entries, "main-team").unwrap_err();

    assert!(matches!(err, ConfigError::MainTeamConfigured { team } if team == "main-team"));
}

#[test]
fn test_load_access_config_defaults_missing_apps() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"teams": {{"team-a": "pull"}}, "repos": ["test"]}}]"#).unwrap();

    let entries = load_access_config(file.path()).unwrap();
    let config = normalize(&entries, "test-team").unwrap();

    assert_eq!(config["test"].apps, BTreeMap::new());
    assert_eq!(config["test"].teams["team-a"], "pull");
}

#[test]
fn test_load_access_config_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"repos": "not-a-list"}}"#).unwrap();

    let err = load_access_config(file.path()).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_access_config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_access_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Read { path: p, .. } if p == path));
}
