//! Integration tests for the `fetch` and `validate` commands

use camino::Utf8PathBuf;
use repo_pulse_lib::{Host, run};
use std::io::Write;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default)]
struct CaptureHost {
    output: Vec<u8>,
    error: Vec<u8>,
    exit_code: Option<i32>,
}

impl Host for CaptureHost {
    fn output(&mut self) -> impl Write {
        &mut self.output
    }

    fn error(&mut self) -> impl Write {
        &mut self.error
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::try_from(dir.path().join("repo-pulse.toml")).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_fetch_prints_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "stargazers_count": 3 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/gadgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "forks_count": 2 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloads/point/last-week/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "downloads": 11 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/repos/acme/widgets/(commits|releases|contributors)$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(
        &tmp,
        &format!(
            "primary_repo = \"acme/widgets\"\nsecondary_repo = \"acme/gadgets\"\npackage = \"widgets\"\nhosting_base_url = \"{uri}\"\nregistry_base_url = \"{uri}\"\n",
            uri = server.uri()
        ),
    );

    let mut host = CaptureHost::default();
    run(&mut host, ["repo-pulse", "fetch", "--compact", "--log-level", "none", "--config", config.as_str()])
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&host.output).unwrap();
    assert_eq!(json["stars"], 3);
    assert_eq!(json["secondaryForks"], 2);
    assert_eq!(json["secondaryStars"], serde_json::Value::Null);
    assert_eq!(json["downloadsWeek"], 11);
    assert_eq!(json["downloadsMonth"], 0);
    assert_eq!(json["activityFeed"], serde_json::json!([]));
    assert_eq!(json["stale"], false);
    assert!(json["fetchedAt"].is_string());
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_fetch_reports_shape_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "releases": [] })))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(
        &tmp,
        &format!(
            "primary_repo = \"acme/widgets\"\nhosting_base_url = \"{uri}\"\nregistry_base_url = \"{uri}\"\n",
            uri = server.uri()
        ),
    );

    let mut host = CaptureHost::default();
    let err = run(&mut host, ["repo-pulse", "fetch", "--log-level", "none", "--config", config.as_str()])
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("releases"));
    assert!(host.output.is_empty());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_validate_reports_invalid_config() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(&tmp, "secondary_repo = \"no-slash\"\n");

    let mut host = CaptureHost::default();
    run(&mut host, ["repo-pulse", "validate", config.as_str(), "--log-level", "none"])
        .await
        .unwrap();

    assert_eq!(host.exit_code, Some(1));
    assert!(String::from_utf8_lossy(&host.error).contains("owner/name"));
}
