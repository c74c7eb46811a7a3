use std::sync::Arc;

use git_semver::agents::{AzurePipelines, BuildAgent};
use git_semver::env::{Environment, InMemoryEnvironment};
use git_semver::variables::VersionVariables;

const KEY: &str = "BUILD_BUILDNUMBER";
const LOG_PREFIX: &str = "##vso[build.updatebuildnumber]";

fn agent_with(build_number: Option<&str>) -> AzurePipelines {
    let env = InMemoryEnvironment::new();
    env.set(KEY, build_number);
    AzurePipelines::new(Arc::new(env))
}

fn full_sem_ver(value: &str) -> VersionVariables {
    VersionVariables {
        full_sem_ver: value.to_string(),
        ..VersionVariables::default()
    }
}

fn sem_ver(value: &str) -> VersionVariables {
    VersionVariables {
        sem_ver: value.to_string(),
        ..VersionVariables::default()
    }
}

#[test]
fn test_develop_branch_keeps_unknown_placeholders() {
    let agent = agent_with(Some(
        "Some Build_Value $(GitVersion_FullSemVer) 20151310.3 $(UnknownVar) Release",
    ));

    let message = agent.generate_set_version_message(&full_sem_ver("0.0.0-Unstable4"));

    assert_eq!(
        message,
        "##vso[build.updatebuildnumber]Some Build_Value 0.0.0-Unstable4 20151310.3 $(UnknownVar) Release"
    );
}

#[test]
fn test_parameter_values_are_not_escaped() {
    let agent = agent_with(None);
    let value = "0.8.0-unstable568 Branch:'develop' Sha:'ee69bff1087ebc95c6b43aa2124bd58f5722e0cb'";

    let lines = agent.generate_set_parameter_message("Foo", value);

    assert!(lines.contains(&format!(
        "##vso[task.setvariable variable=GitVersion.Foo]{}",
        value
    )));
    assert!(lines.contains(&format!(
        "##vso[task.setvariable variable=GitVersion.Foo;isOutput=true]{}",
        value
    )));
}

#[test]
fn test_missing_env_returns_plain_full_sem_ver() {
    let agent = agent_with(None);
    let message = agent.generate_set_version_message(&full_sem_ver("0.0.0-Unstable4"));
    assert_eq!(message, "0.0.0-Unstable4");
    assert!(!agent.is_active());
}

#[test]
fn test_blank_env_returns_plain_full_sem_ver() {
    let agent = agent_with(Some("   "));
    let message = agent.generate_set_version_message(&full_sem_ver("1.0.0"));
    assert_eq!(message, "1.0.0");
}

#[test]
fn test_build_number_with_full_sem_ver() {
    let cases = [
        ("$(GitVersion.FullSemVer)", "1.0.0", "1.0.0"),
        ("$(GITVERSION_FULLSEMVER)", "1.0.0", "1.0.0"),
        ("$(GitVersion.FullSemVer)-Build.1234", "1.0.0", "1.0.0-Build.1234"),
        ("$(GITVERSION_FULLSEMVER)-Build.1234", "1.0.0", "1.0.0-Build.1234"),
    ];

    for (template, version, expected) in cases {
        let agent = agent_with(Some(template));
        let message = agent.generate_set_version_message(&full_sem_ver(version));
        assert_eq!(message, format!("{}{}", LOG_PREFIX, expected), "template {}", template);
    }
}

#[test]
fn test_build_number_with_sem_ver() {
    let cases = [
        ("$(GitVersion.SemVer)", "1.0.0", "1.0.0"),
        ("$(GITVERSION_SEMVER)", "1.0.0", "1.0.0"),
        ("$(GitVersion.SemVer)-Build.1234", "1.0.0", "1.0.0-Build.1234"),
        ("$(GITVERSION_SEMVER)-Build.1234", "1.0.0", "1.0.0-Build.1234"),
    ];

    for (template, version, expected) in cases {
        let agent = agent_with(Some(template));
        let message = agent.generate_set_version_message(&sem_ver(version));
        assert_eq!(message, format!("{}{}", LOG_PREFIX, expected), "template {}", template);
    }
}

#[test]
fn test_generating_does_not_modify_environment() {
    let env = Arc::new(InMemoryEnvironment::new().with(KEY, "$(GitVersion.FullSemVer)"));
    let agent = AzurePipelines::new(env.clone());

    agent.generate_set_version_message(&full_sem_ver("2.0.0"));

    assert_eq!(env.get(KEY).as_deref(), Some("$(GitVersion.FullSemVer)"));
}
