//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either the expected parse result or the expected error. Comparing
//! parsed JSON (not raw strings) avoids false negatives from field ordering.

use serde_json::Value;
use todo_api_client::{
    ApiClientError, HttpMethod, HttpRequest, HttpResponse, TaskDto, TodoApiClient,
};

const BASE_URL: &str = "http://localhost:3000";

/// Only the build/parse halves are exercised, so no transport is needed.
fn client() -> TodoApiClient<()> {
    TodoApiClient::with_transport(BASE_URL, ())
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    let method = parse_method(expected["method"].as_str().unwrap());
    assert_eq!(req.method, method, "{name}: method");
    let url = format!("{BASE_URL}{}", expected["path"].as_str().unwrap());
    assert_eq!(req.url, url, "{name}: url");

    match expected.get("body") {
        Some(expected_body) => {
            let expected_headers: Vec<(String, String)> = expected["headers"]
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    let key = arr[0].as_str().unwrap().to_string();
                    (key, arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");

            let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&body, expected_body, "{name}: body");
        }
        None => {
            assert!(req.headers.is_empty(), "{name}: headers should be empty");
            assert!(req.body.is_none(), "{name}: body should be None");
        }
    }
}

fn assert_expected_error(name: &str, err: ApiClientError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "ItemNotFound" => match err {
            ApiClientError::ItemNotFound { id } => {
                assert_eq!(id.as_deref(), expected["id"].as_str(), "{name}: id")
            }
            other => panic!("{name}: expected ItemNotFound, got {other:?}"),
        },
        "UnknownError" => match err {
            ApiClientError::UnknownError { status, .. } => {
                let expected_status = expected["status"].as_u64().unwrap();
                assert_eq!(u64::from(status), expected_status, "{name}: status")
            }
            other => panic!("{name}: expected UnknownError, got {other:?}"),
        },
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_all_tasks();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_all_tasks(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Vec<TaskDto> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_task_by_id(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_task_by_id(id, simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: TaskDto =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: TaskDto = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_add_task(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_add_task(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: TaskDto =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: TaskDto = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_task_by_id(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_task_by_id(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: TaskDto =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
