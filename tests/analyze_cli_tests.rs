mod common;

use common::{TestEnv, EXAMPLE_CSV, INSIGHT_JSON};
use serde_json::json;
use std::process::Output;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

fn point_at(env: &TestEnv, server: &MockServer) {
    env.write_config(&format!(
        "[llm]\nprovider = \"openai\"\napi_key = \"sk-test\"\nendpoint = \"{}\"\ntimeout_secs = 10\n",
        server.uri()
    ));
}

async fn run_in_background(env: &TestEnv, args: &[&str]) -> Output {
    let mut command = env.command(args);
    tokio::task::spawn_blocking(move || command.output())
        .await
        .expect("join blocking task")
        .expect("failed to execute feedback-insights binary")
}

#[tokio::test]
async fn writes_report_from_model_insights() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(openai_reply(INSIGHT_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    point_at(&env, &server);
    env.write_file("feedback.csv", EXAMPLE_CSV);

    let output = run_in_background(&env, &["feedback.csv", "--out-path", "insights.md"]).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "analyze should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Report created: insights.md"));

    let report = std::fs::read_to_string(env.work_dir().join("insights.md")).unwrap();
    assert!(report.contains("- **Total responses:** 5"));
    assert!(report.contains("- **Average rating:** 3.4 / 5"));
    assert!(report.contains("- Fix photo upload crash"));
    assert!(report.contains("- Automated regression testing"));
    assert!(!report.contains("sk-test"));

    let headings: Vec<&str> = report
        .lines()
        .filter_map(|l| l.strip_prefix("## "))
        .collect();
    assert_eq!(
        headings,
        vec![
            "Overview",
            "TL;DR",
            "Top Themes",
            "Recommended Improvements",
            "Quick Wins",
            "Long-Term Actions",
        ]
    );
}

#[tokio::test]
async fn prompt_carries_only_the_sample() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(openai_reply(INSIGHT_JSON))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    point_at(&env, &server);
    env.write_file("feedback.csv", EXAMPLE_CSV);

    let output = run_in_background(&env, &["feedback.csv", "--sample-size", "2"]).await;
    assert!(output.status.success());

    let requests = server.received_requests().await.expect("request recording enabled");
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("- total_responses: 5"));
    assert!(user.contains("- Love the new dashboard"));
    assert!(!user.contains("Great value for the price"));
    assert_eq!(body["response_format"]["type"], "json_object");

    let report = std::fs::read_to_string(env.work_dir().join("report.md")).unwrap();
    assert!(report.contains("- **Samples analyzed:** 2"));
}

#[tokio::test]
async fn service_failure_leaves_existing_report_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    point_at(&env, &server);
    env.write_file("feedback.csv", EXAMPLE_CSV);
    env.write_file("report.md", "previous report");

    let output = run_in_background(&env, &["feedback.csv"]).await;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("HTTP 500"), "stderr:\n{}", stderr);
    assert_eq!(
        std::fs::read_to_string(env.work_dir().join("report.md")).unwrap(),
        "previous report"
    );
}

#[tokio::test]
async fn unauthorized_key_is_reported_without_leaking_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided" }
        })))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    point_at(&env, &server);
    env.write_file("feedback.csv", EXAMPLE_CSV);

    let output = run_in_background(&env, &["feedback.csv", "--verbose"]).await;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("rejected the API key"), "stderr:\n{}", stderr);
    assert!(!stderr.contains("sk-test"));
    assert!(!env.work_dir().join("report.md").exists());
}

#[tokio::test]
async fn malformed_model_output_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(openai_reply("I'd rather not answer in JSON."))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    point_at(&env, &server);
    env.write_file("feedback.csv", EXAMPLE_CSV);

    let output = run_in_background(&env, &["feedback.csv"]).await;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("non-JSON"), "stderr:\n{}", stderr);
    assert!(!env.work_dir().join("report.md").exists());
}
