//! Fetching descriptions over HTTP.
//!
//! These tests use wiremock to serve descriptions and verify the Fetch phase
//! and a full run against a remote input.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;

use apigen_core::{
    GenerateError, Generator, GeneratorConfig, QueryWithBodyPolicy, RenderOptions, check,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE: &str = include_str!("fixtures/translate.json");

const YAML_DESCRIPTION: &str = "\
openapi: 3.1.0
info:
  title: Notes
  version: 0.1.0
paths:
  /notes/{note_id}:
    get:
      tags: [Notes]
      summary: Get Note
      parameters:
        - name: note_id
          in: path
          required: true
          schema:
            type: integer
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Note'
components:
  schemas:
    Note:
      type: object
      required: [id]
      properties:
        id:
          type: integer
        body:
          type: string
";

/// Test that a JSON description is fetched and rendered in memory.
#[tokio::test]
async fn test_check_remote_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIXTURE, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/openapi.json", mock_server.uri());
    let rendered = check(&url, &RenderOptions::default()).await;

    assert!(rendered.is_ok(), "Check failed: {:?}", rendered.err());
    let rendered = rendered.unwrap();
    assert!(rendered.file("services/GlossaryService.ts").is_some());
    assert!(rendered.diagnostics.is_empty());
}

/// Test that YAML is detected from the content type.
#[tokio::test]
async fn test_check_remote_yaml() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(YAML_DESCRIPTION, "application/yaml"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/openapi", mock_server.uri());
    let rendered = check(&url, &RenderOptions::default()).await.unwrap();

    let notes = rendered.file("services/NotesService.ts").unwrap();
    assert!(notes.contains(
        "export const getNote = async (note_id: number): Promise<Note> => {\n  return await api.get<Note>(`/notes/${note_id}`)\n}\n"
    ));
    assert!(rendered.file("schemas/Note.ts").unwrap().contains("  body?: string\n"));
}

/// Test that a non-success status aborts the run.
#[tokio::test]
async fn test_http_error_status_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/openapi.json", mock_server.uri());
    let result = check(&url, &RenderOptions::default()).await;

    match result {
        Err(GenerateError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected an HTTP status error, got {other:?}"),
    }
}

/// Test that an invalid body is a parse failure and nothing is written.
#[tokio::test]
async fn test_invalid_body_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"paths\": ", "application/json"))
        .mount(&mock_server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let output = temp.path().join("client");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("keep.ts"), "previous run").unwrap();

    let generator = Generator::new(GeneratorConfig {
        input: format!("{}/openapi.json", mock_server.uri()),
        output: output.clone(),
        render: RenderOptions::default(),
    });
    let result = generator.run().await;

    assert!(matches!(result, Err(GenerateError::ParseJson(_))));
    // Fetch failures happen before the output root is touched
    assert!(output.join("keep.ts").exists());
}

/// Test a full run against a remote description.
#[tokio::test]
async fn test_run_remote() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIXTURE, "application/json"))
        .mount(&mock_server)
        .await;

    let temp = tempfile::tempdir().unwrap();
    let output = temp.path().join("client");
    let generator = Generator::new(GeneratorConfig {
        input: format!("{}/openapi.json", mock_server.uri()),
        output: output.clone(),
        render: RenderOptions {
            api_prefix: "/api".into(),
            dev_base_url: "http://127.0.0.1:9000".into(),
            query_with_body: QueryWithBodyPolicy::Reject,
        },
    });

    let report = generator.run().await.unwrap();
    assert_eq!(report.files_written, 11);
    assert_eq!(report.output, output);

    let defaults = fs::read_to_string(output.join("defaults.ts")).unwrap();
    assert!(defaults.contains("    return 'http://127.0.0.1:9000'\n"));
    assert!(defaults.contains("    return '/api'\n"));
}
