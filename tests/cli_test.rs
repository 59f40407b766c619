use engine_run::cli::CliApp;
use tempfile::TempDir;

const CONFIG_YAML: &str = r#"
version: "1.0"
engine:
  name: cli
seed:
  - engine.plugin.JobExecutorPlugin
plugins:
  engine.plugin.JobExecutorPlugin:
    maxJobsPerAcquisition: 5
  engine.plugin.HistoryPlugin:
    historyLevel: activity
"#;

fn write_config(dir: &TempDir, yaml: &str) -> String {
    let path = dir.path().join("engine-run.yaml");
    std::fs::write(&path, yaml).unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn test_validate_command() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, CONFIG_YAML);

    let matches = CliApp::app()
        .try_get_matches_from(["engine-run", "validate", "--config", &config_path])
        .unwrap();
    CliApp::run(&matches).await.unwrap();
}

#[tokio::test]
async fn test_start_command_with_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, CONFIG_YAML);

    let matches = CliApp::app()
        .try_get_matches_from(["engine-run", "start", "--config", &config_path, "--json"])
        .unwrap();
    CliApp::run(&matches).await.unwrap();
}

#[tokio::test]
async fn test_start_command_reports_bad_property() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        r#"
version: "1.0"
plugins:
  engine.plugin.JobExecutorPlugin:
    corePoolSize: none
"#,
    );

    let matches = CliApp::app()
        .try_get_matches_from(["engine-run", "start", "--config", &config_path])
        .unwrap();
    let err = CliApp::run(&matches).await.unwrap_err();

    let chain = format!("{:#}", err);
    assert!(chain.contains("engine.plugin.JobExecutorPlugin"));
    assert!(chain.contains("corePoolSize"));
}

#[tokio::test]
async fn test_plugins_command() {
    let matches = CliApp::app()
        .try_get_matches_from(["engine-run", "plugins", "--detailed"])
        .unwrap();
    CliApp::run(&matches).await.unwrap();
}
