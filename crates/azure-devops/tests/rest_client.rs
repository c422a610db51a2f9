//! `AzureDevOpsClient` against a mock Azure DevOps server.
//!
//! A non-Azure host keeps release calls on the collection URL, so one
//! `MockServer` serves both the build and the release API areas.

use std::time::Duration;

use azure_devops::{AzureDevOpsClient, DEFAULT_TIMEOUT};
use pipeline::{
    AccessToken, BranchRef, BuildQueueRequest, BuildReason, CommitSha, DefinitionHandle,
    DefinitionId, DevOpsClient, InvocationContext, PipelineKind, PipelineName, PipelineRef,
    PipelineTrigger, ProjectHandle, ProjectName, ProjectUrl, RemoteError, RemoteProjectId,
    RepositoryId, RunId, RunOutcome, TriggerRequest, ValidationResult,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Basic` credentials for an empty user and the token `pat`.
const BASIC_PAT: &str = "Basic OnBhdA==";

fn project_url(server: &MockServer) -> ProjectUrl {
    ProjectUrl::parse(&format!("{}/proj", server.uri())).unwrap()
}

fn client(server: &MockServer) -> AzureDevOpsClient {
    AzureDevOpsClient::new(&project_url(server), AccessToken::new("pat").unwrap()).unwrap()
}

fn project() -> ProjectName {
    ProjectName::new("proj").unwrap()
}

#[tokio::test]
async fn release_search_requests_exact_name_with_artifacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/release/definitions"))
        .and(query_param("searchText", "Deploy"))
        .and(query_param("isExactNameMatch", "true"))
        .and(query_param("$expand", "artifacts"))
        .and(query_param("api-version", "7.1"))
        .and(header("authorization", BASIC_PAT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "value": [{
                "id": 9,
                "name": "Deploy",
                "artifacts": [{
                    "alias": "_Org_Repo",
                    "type": "GitHub",
                    "definitionReference": { "definition": { "id": "Org/Repo", "name": "Org/Repo" } }
                }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = client(&server)
        .get_release_definitions(&project(), &PipelineName::new("Deploy").unwrap())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, DefinitionId::new(9));
    assert_eq!(found[0].artifacts[0].upstream_name(), Some("Org/Repo"));
}

#[tokio::test]
async fn build_search_filters_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/build/definitions"))
        .and(query_param("name", "CI"))
        .and(header("authorization", BASIC_PAT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "value": [{ "id": 5, "name": "CI" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = client(&server)
        .get_definitions(&project(), &PipelineName::new("CI").unwrap())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, DefinitionId::new(5));
}

#[tokio::test]
async fn queue_build_ignores_warnings_and_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/p-guid/_apis/build/builds"))
        .and(query_param("ignoreWarnings", "true"))
        .and(query_param("api-version", "7.1"))
        .and(header("authorization", BASIC_PAT))
        .and(body_partial_json(json!({
            "definition": { "id": 5 },
            "project": { "id": "p-guid" },
            "sourceBranch": "refs/heads/main",
            "sourceVersion": "abc123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1001,
            "buildNumber": "20240101.3",
            "validationResults": [{ "result": "warning", "message": "careful" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = BuildQueueRequest {
        definition: DefinitionHandle {
            id: DefinitionId::new(5),
        },
        project: ProjectHandle {
            id: RemoteProjectId::new("p-guid").unwrap(),
        },
        source_branch: BranchRef::new("refs/heads/main"),
        source_version: CommitSha::new("abc123"),
        reason: BuildReason::Triggered,
    };

    let build = client(&server)
        .queue_build(&request.project.id, &request)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(build.id, Some(RunId::new(1001)));
    assert_eq!(build.validation_results[0].result, ValidationResult::Warning);
}

#[tokio::test]
async fn missing_definition_by_id_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/build/definitions/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Definition 5 was not found."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = client(&server)
        .get_definition(&project(), DefinitionId::new(5))
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn missing_project_on_search_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/build/definitions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "TF200016: The following project does not exist: proj."
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_definitions(&project(), &PipelineName::new("CI").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RemoteError::Status {
            status: 404,
            message: "TF200016: The following project does not exist: proj.".to_string(),
        }
    );
}

#[tokio::test]
async fn sign_in_page_fails_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/build/definitions/5"))
        .respond_with(ResponseTemplate::new(203).set_body_string("<html>Sign in</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_definition(&project(), DefinitionId::new(5))
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Status { status: 203, .. }));
}

#[tokio::test]
async fn slow_server_times_out() {
    assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(60));

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/build/definitions/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 5, "name": "CI", "project": { "id": "p-guid" } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = AzureDevOpsClient::with_timeout(
        &project_url(&server),
        AccessToken::new("pat").unwrap(),
        Duration::from_millis(100),
    )
    .unwrap();

    let err = client
        .get_definition(&project(), DefinitionId::new(5))
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Transport { .. }));
}

#[tokio::test]
async fn unknown_yaml_id_falls_back_to_release_definition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/build/definitions/9"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proj/_apis/release/definitions/9"))
        .and(header("authorization", BASIC_PAT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "name": "Deploy",
            "artifacts": [{
                "alias": "_Org_Repo",
                "type": "GitHub",
                "definitionReference": { "definition": { "id": "Org/Repo", "name": "Org/Repo" } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/proj/_apis/release/releases"))
        .and(body_partial_json(json!({
            "definitionId": 9,
            "reason": "continuousIntegration",
            "artifacts": [{
                "alias": "_Org_Repo",
                "instanceReference": { "id": "abc123", "sourceBranch": "refs/heads/main" }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 31,
            "name": "Release-31",
            "_links": { "web": { "href": "https://example.test/release/31" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let context = InvocationContext::github(
        RepositoryId::new("Org/Repo").unwrap(),
        BranchRef::new("refs/heads/main").unwrap(),
        CommitSha::new("abc123").unwrap(),
    );
    let request = TriggerRequest {
        project_url: project_url(&server),
        pipeline: PipelineRef::Id(DefinitionId::new(9)),
        explicit_ref: None,
        explicit_sha: None,
        credential: AccessToken::new("pat").unwrap(),
    };

    let report = PipelineTrigger::new(&client, &context)
        .trigger(&request)
        .await
        .unwrap();

    assert_eq!(report.kind, PipelineKind::Designer);
    assert_eq!(report.definition_id, DefinitionId::new(9));
    assert_eq!(
        report.outcome,
        RunOutcome::Queued {
            run_id: Some(RunId::new(31)),
            web_url: Some("https://example.test/release/31".to_string()),
        }
    );
}
