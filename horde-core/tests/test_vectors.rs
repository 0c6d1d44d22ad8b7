//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use horde_core::{
    ApiError, ApiModel, GenerationId, HordeClient, HttpMethod, HttpRequest, HttpResponse,
    ImageGenerateAsyncRequest, ImageGenerateAsyncResponse, ImageGenerateCheckResponse,
    ImageGenerateStatusResponse, ImageGenerationJobSubmitRequest,
    ImageGenerationJobSubmitResponse, WorkerType,
};

const BASE_URL: &str = "https://aihorde.net/api";
const APIKEY: &str = "0000000000";

fn client() -> HordeClient {
    HordeClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request_line(req: &HttpRequest, expected: &serde_json::Value, name: &str) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
}

fn expected_headers(expected: &serde_json::Value) -> Vec<(String, String)> {
    expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn assert_expected_error(err: ApiError, expected: &str, name: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        "Validation" => assert!(
            matches!(err, ApiError::Validation(_)),
            "{name}: expected Validation"
        ),
        "Api" => assert!(matches!(err, ApiError::Api { .. }), "{name}: expected Api"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Generate async
// ---------------------------------------------------------------------------

#[test]
fn generate_async_test_vectors() {
    let raw = include_str!("../../test-vectors/generate_async.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Invalid inputs are rejected at model construction, before any
        // request exists.
        let input = ImageGenerateAsyncRequest::from_value(case["input"].clone());
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(input.unwrap_err(), expected_error.as_str().unwrap(), name);
            continue;
        }
        let input = input.unwrap();

        // Verify build
        let expected_req = &case["expected_request"];
        let req = c.build_generate_async(APIKEY, &input).unwrap();
        assert_request_line(&req, expected_req, name);
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");

        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let parsed = c.parse_generate_async(simulated_response(case)).unwrap();
        let expected: ImageGenerateAsyncResponse =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(parsed, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Generate check
// ---------------------------------------------------------------------------

#[test]
fn generate_check_test_vectors() {
    let raw = include_str!("../../test-vectors/generate_check.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id: GenerationId = case["input_id"].as_str().unwrap().parse().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_generate_check(id);
        assert_request_line(&req, expected_req, name);
        assert!(req.body.is_none(), "{name}: body should be None");
        assert!(req.headers.is_empty(), "{name}: headers should be empty");

        // Verify parse
        let result = c.parse_generate_check(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(result.unwrap_err(), expected_error.as_str().unwrap(), name);
        } else {
            let expected: ImageGenerateCheckResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Generate status
// ---------------------------------------------------------------------------

#[test]
fn generate_status_test_vectors() {
    let raw = include_str!("../../test-vectors/generate_status.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id: GenerationId = case["input_id"].as_str().unwrap().parse().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_generate_status(id);
        assert_request_line(&req, expected_req, name);
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_generate_status(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(result.unwrap_err(), expected_error.as_str().unwrap(), name);
        } else {
            let expected: ImageGenerateStatusResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[test]
fn submit_test_vectors() {
    let raw = include_str!("../../test-vectors/submit.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = ImageGenerationJobSubmitRequest::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_submit_generation(APIKEY, &input).unwrap();
        assert_request_line(&req, expected_req, name);
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");

        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let result = c.parse_submit_generation(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(result.unwrap_err(), expected_error.as_str().unwrap(), name);
        } else {
            let expected: ImageGenerationJobSubmitResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

#[test]
fn workers_test_vectors() {
    let raw = include_str!("../../test-vectors/workers.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let worker_type = match case["input_type"].as_str() {
            None => None,
            Some("image") => Some(WorkerType::Image),
            Some("text") => Some(WorkerType::Text),
            Some("interrogation") => Some(WorkerType::Interrogation),
            Some(other) => panic!("{name}: unknown worker type: {other}"),
        };
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_workers_all(worker_type);
        assert_request_line(&req, expected_req, name);
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_workers_all(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(result.unwrap_err(), expected_error.as_str().unwrap(), name);
        } else {
            let workers = result.unwrap();
            let expected_count = case["expected_count"].as_u64().unwrap() as usize;
            assert_eq!(workers.len(), expected_count, "{name}: worker count");
            // Shape check against the raw roster the server sent.
            let raw_roster: serde_json::Value =
                serde_json::from_str(case["simulated_response"]["body"].as_str().unwrap()).unwrap();
            for (worker, raw) in workers.iter().zip(raw_roster.as_array().unwrap()) {
                assert_eq!(worker.name, raw["name"].as_str().unwrap(), "{name}: worker name");
            }
        }
    }
}
