//! Argument translation properties

use nunit_tool::{
    AppDomainUsage, ArgumentTranslator, FixedDirectory, HostPlatform, MemoryLog, ProcessModel,
    RunConfiguration,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn args(config: &RunConfiguration, platform: HostPlatform) -> Vec<String> {
    ArgumentTranslator::new(config, platform)
        .command_line()
        .to_args()
}

fn scenario() -> RunConfiguration {
    RunConfiguration {
        hide_dots: true,
        exclude_category: Some("Slow".to_string()),
        ..RunConfiguration::new(["A.dll", "B.dll"])
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_unix() {
    let config = scenario();
    let command_line = ArgumentTranslator::new(&config, HostPlatform::Unix).command_line();
    insta::assert_snapshot!(command_line.to_string(), @"-nologo -nodots A.dll B.dll -exclude=Slow");
}

#[test]
fn test_scenario_windows() {
    let config = scenario();
    let command_line = ArgumentTranslator::new(&config, HostPlatform::Windows).command_line();
    insta::assert_snapshot!(command_line.to_string(), @"/nologo /nodots A.dll B.dll /exclude=Slow");
}

#[test]
fn test_output_is_deterministic() {
    let config = RunConfiguration {
        include_category: Some("Fast".to_string()),
        process_model: ProcessModel::Separate,
        app_domain_usage: AppDomainUsage::Multiple,
        timeout_milliseconds: 250,
        ..scenario()
    };
    let first = args(&config, HostPlatform::Unix);
    for _ in 0..10 {
        assert_eq!(args(&config, HostPlatform::Unix), first);
    }
}

// ============================================================================
// Flags
// ============================================================================

#[rstest]
#[case(HostPlatform::Unix, "-nologo")]
#[case(HostPlatform::MacOs, "-nologo")]
#[case(HostPlatform::Windows, "/nologo")]
fn test_default_flags_start_with_nologo_then_assembly(
    #[case] platform: HostPlatform,
    #[case] nologo: &str,
) {
    let config = RunConfiguration::new(["First.dll", "Second.dll"]);
    let args = args(&config, platform);

    assert_eq!(&args[..2], &[nologo.to_string(), "First.dll".to_string()]);
    assert!(!args.iter().any(|a| a.ends_with("nothread")));
}

#[rstest]
#[case(false, false, false)]
#[case(true, false, false)]
#[case(true, true, true)]
#[case(false, true, false)]
fn test_nothread_once_after_flags_before_assemblies(
    #[case] noshadow: bool,
    #[case] nodots: bool,
    #[case] labels: bool,
) {
    let config = RunConfiguration {
        shadow_copy_disabled: noshadow,
        hide_dots: nodots,
        show_labels: labels,
        run_in_new_thread: false,
        ..RunConfiguration::new(["A.dll"])
    };
    let args = args(&config, HostPlatform::Unix);

    let positions: Vec<usize> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| *a == "-nothread")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(positions.len(), 1);

    let flags = 1 + usize::from(noshadow) + usize::from(nodots) + usize::from(labels);
    assert_eq!(positions[0], flags);
    assert_eq!(args[flags + 1], "A.dll");
}

// ============================================================================
// Valued switches
// ============================================================================

#[test]
fn test_unset_or_empty_strings_never_emit_switch() {
    let config = RunConfiguration {
        exclude_category: Some(String::new()),
        project_configuration: Some(String::new()),
        ..RunConfiguration::new(["A.dll"])
    };
    let args = args(&config, HostPlatform::Unix);
    for key in [
        "config=",
        "run=",
        "include=",
        "exclude=",
        "transform=",
        "xml=",
        "err=",
        "framework=",
    ] {
        assert!(
            !args.iter().any(|a| a.contains(key)),
            "unexpected {} in {:?}",
            key,
            args
        );
    }
}

#[rstest]
#[case(ProcessModel::Default, None)]
#[case(ProcessModel::Single, Some("-process=Single"))]
#[case(ProcessModel::Separate, Some("-process=Separate"))]
#[case(ProcessModel::Multiple, Some("-process=Multiple"))]
fn test_process_model_switch(#[case] model: ProcessModel, #[case] expected: Option<&str>) {
    let config = RunConfiguration {
        process_model: model,
        ..RunConfiguration::new(["A.dll"])
    };
    let emitted: Vec<String> = args(&config, HostPlatform::Unix)
        .into_iter()
        .filter(|a| a.starts_with("-process="))
        .collect();
    assert_eq!(emitted, expected.into_iter().map(String::from).collect::<Vec<_>>());
}

#[rstest]
#[case(AppDomainUsage::Default, None)]
#[case(AppDomainUsage::None, Some("/domain=None"))]
#[case(AppDomainUsage::Single, Some("/domain=Single"))]
#[case(AppDomainUsage::Multiple, Some("/domain=Multiple"))]
fn test_app_domain_switch(#[case] usage: AppDomainUsage, #[case] expected: Option<&str>) {
    let config = RunConfiguration {
        app_domain_usage: usage,
        ..RunConfiguration::new(["A.dll"])
    };
    let emitted: Vec<String> = args(&config, HostPlatform::Windows)
        .into_iter()
        .filter(|a| a.starts_with("/domain="))
        .collect();
    assert_eq!(emitted, expected.into_iter().map(String::from).collect::<Vec<_>>());
}

#[rstest]
#[case(0, None)]
#[case(1500, Some("-timeout=1500"))]
#[case(1_000_000, Some("-timeout=1000000"))]
fn test_timeout_switch(#[case] timeout: u32, #[case] expected: Option<&str>) {
    let config = RunConfiguration {
        timeout_milliseconds: timeout,
        ..RunConfiguration::new(["A.dll"])
    };
    let emitted: Vec<String> = args(&config, HostPlatform::Unix)
        .into_iter()
        .filter(|a| a.starts_with("-timeout="))
        .collect();
    assert_eq!(emitted, expected.into_iter().map(String::from).collect::<Vec<_>>());
}

#[test]
fn test_process_model_parsed_from_any_case() {
    let mut config = RunConfiguration::new(["A.dll"]);
    config.set_process_model("sEpArAtE").unwrap();
    assert_eq!(config.process_model, ProcessModel::Separate);
    assert!(args(&config, HostPlatform::Unix).contains(&"-process=Separate".to_string()));

    assert!(config.set_process_model("bogus").is_err());
    assert_eq!(config.process_model, ProcessModel::Separate);
}

// ============================================================================
// Executable
// ============================================================================

#[test]
fn test_executable_names() {
    let config = RunConfiguration::new(["A.dll"]);
    assert_eq!(
        ArgumentTranslator::new(&config, HostPlatform::Windows).tool_name(),
        "nunit-console.exe"
    );

    let config = RunConfiguration {
        force_32bit: true,
        ..RunConfiguration::new(["A.dll"])
    };
    assert_eq!(
        ArgumentTranslator::new(&config, HostPlatform::Unix).tool_name(),
        "nunit-console-x86"
    );
}

#[test]
fn test_provider_directory_without_configured_path() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = RunConfiguration::new(["A.dll"]);
    let mut log = MemoryLog::new();

    let path = ArgumentTranslator::new(&config, HostPlatform::MacOs)
        .full_path_to_tool(&FixedDirectory::new(temp_dir.path()), &mut log);

    assert_eq!(path, temp_dir.path().join("nunit-console"));
    assert!(log.errors().is_empty());
}

#[test]
#[serial_test::serial]
fn test_blank_build_file_tool_path_uses_provider_directory() {
    let project = tempfile::TempDir::new().unwrap();
    let tools = tempfile::TempDir::new().unwrap();
    std::fs::write(
        project.path().join("nunit.toml"),
        r#"
[targets.unit]
assemblies = ["A.dll"]
tool-path = "   "
"#,
    )
    .unwrap();

    let config = nunit_config::ConfigLoader::new()
        .with_user_config_path(project.path().join("no-user-config.toml"))
        .load_from_directory(project.path())
        .unwrap();
    let run = config.run_configuration(None).unwrap();
    let mut log = MemoryLog::new();

    let path = ArgumentTranslator::new(&run, HostPlatform::Unix)
        .full_path_to_tool(&FixedDirectory::new(tools.path()), &mut log);

    assert_eq!(path, tools.path().join("nunit-console"));
    assert!(log.errors().is_empty());
}
