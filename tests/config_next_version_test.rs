use git_semver::config::Config;
use git_semver::git::MockRepository;
use git_semver::strategies::{
    ConfigNextVersionStrategy, StrategyKind, VersionContext, VersionStrategy,
};
use git_semver::GitSemverError;

fn versions_for(next_version: Option<&str>) -> git_semver::Result<Vec<String>> {
    let mut repo = MockRepository::new();
    repo.commit("initial");

    let config = Config {
        next_version: next_version.map(str::to_string),
        ..Config::default()
    };
    let effective = config.resolve("main")?;
    let context = VersionContext::new(&repo, &config, &effective)?;

    let versions = ConfigNextVersionStrategy.versions(&context)?;
    for version in &versions {
        assert!(!version.should_increment);
        assert_eq!(version.strategy, StrategyKind::ConfigNextVersion);
    }
    Ok(versions
        .into_iter()
        .map(|v| v.semantic_version.to_string())
        .collect())
}

#[test]
fn test_returns_nothing_when_not_configured() {
    assert!(versions_for(None).unwrap().is_empty());
}

#[test]
fn test_returns_nothing_for_empty_value() {
    assert!(versions_for(Some("")).unwrap().is_empty());
}

#[test]
fn test_configured_versions_round_trip() {
    for expected in ["1.0.0", "2.12.654651698"] {
        assert_eq!(versions_for(Some(expected)).unwrap(), vec![expected]);
    }
}

#[test]
fn test_invalid_value_is_fatal() {
    let err = versions_for(Some("one.two")).unwrap_err();
    assert!(matches!(err, GitSemverError::Config(_)));
}
