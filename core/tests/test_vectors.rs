//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected parse result or an expected error (status and
//! message). Request bodies are compared as exact strings because field order
//! is part of the wire contract; parsed results are compared as values.

use serde_json::Value;
use ticket_core::{
    ApiError, CreateTicketRequest, HttpMethod, HttpRequest, HttpResponse, Ticket, TicketClient,
    TicketStatus,
};

const BASE_URL: &str = "http://localhost:8080";

fn client() -> TicketClient {
    TicketClient::new(BASE_URL)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    match expected.get("body") {
        Some(body) => {
            assert_eq!(req.body.as_deref(), body.as_str(), "{name}: body");
            let expected_headers: Vec<(String, String)> = expected["headers"]
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
        }
        None => {
            assert!(req.body.is_none(), "{name}: body should be None");
            assert!(req.headers.is_empty(), "{name}: headers should be empty");
        }
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Check `result` against `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &Value, result: Result<T, ApiError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        assert_eq!(
            err.status(),
            Some(expected_error["status"].as_u64().unwrap() as u16),
            "{name}: error status"
        );
        assert_eq!(err.to_string(), expected_error["message"].as_str().unwrap(), "{name}: error message");
    } else {
        let value = result.unwrap();
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(value, expected, "{name}: parsed result");
    }
}

fn input_id(case: &Value) -> i64 {
    case["input_id"].as_i64().unwrap()
}

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list_tickets(), &case["expected_request"]);
        assert_outcome::<Vec<Ticket>>(name, &case, c.parse_list_tickets(simulated(&case)));
    }
}

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_get_ticket(input_id(&case)), &case["expected_request"]);
        assert_outcome::<Ticket>(name, &case, c.parse_get_ticket(simulated(&case)));
    }
}

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTicketRequest = serde_json::from_value(case["input"].clone()).unwrap();
        assert_request(name, &c.build_create_ticket(&input).unwrap(), &case["expected_request"]);
        assert_outcome::<Ticket>(name, &case, c.parse_create_ticket(simulated(&case)));
    }
}

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTicketRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_update_ticket(input_id(&case), &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Ticket>(name, &case, c.parse_update_ticket(simulated(&case)));
    }
}

#[test]
fn update_status_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update_status.json")) {
        let name = case["name"].as_str().unwrap();
        let status: TicketStatus = case["input_status"].as_str().unwrap().parse().unwrap();
        let req = c.build_update_ticket_status(input_id(&case), status).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Ticket>(name, &case, c.parse_update_ticket_status(simulated(&case)));
    }
}

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_delete_ticket(input_id(&case)), &case["expected_request"]);

        let result = c.parse_delete_ticket(simulated(&case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert!(err.is_not_found(), "{name}: expected 404");
            assert_eq!(err.to_string(), expected_error["message"].as_str().unwrap(), "{name}: error message");
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
