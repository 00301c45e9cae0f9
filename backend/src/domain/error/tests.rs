//! Tests for domain error construction and code serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::validation("bad"), ErrorCode::ValidationError)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::method_not_allowed("verb"), ErrorCode::MethodNotAllowed)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::app("oops"), ErrorCode::AppError)]
#[case(Error::database("pool"), ErrorCode::DatabaseError)]
#[case(Error::internal("boom"), ErrorCode::InternalServerError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
    assert!(error.details().is_none());
}

#[rstest]
#[case(ErrorCode::ValidationError, "VALIDATION_ERROR")]
#[case(ErrorCode::NotFound, "NOT_FOUND")]
#[case(ErrorCode::MethodNotAllowed, "METHOD_NOT_ALLOWED")]
#[case(ErrorCode::Unauthorized, "UNAUTHORIZED")]
#[case(ErrorCode::Forbidden, "FORBIDDEN")]
#[case(ErrorCode::AppError, "APP_ERROR")]
#[case(ErrorCode::DatabaseError, "DATABASE_ERROR")]
#[case(ErrorCode::InternalServerError, "INTERNAL_SERVER_ERROR")]
fn codes_serialise_as_screaming_snake_case(#[case] code: ErrorCode, #[case] wire: &str) {
    let value = serde_json::to_value(code).expect("serialise code");
    assert_eq!(value, json!(wire));
    assert_eq!(code.as_str(), wire);
}

#[rstest]
fn with_details_attaches_payload() {
    let error = Error::validation("bad").with_details(json!([{"loc": ["body"]}]));
    assert_eq!(error.details(), Some(&json!([{"loc": ["body"]}])));
}

#[rstest]
fn display_includes_code_and_message() {
    let error = Error::not_found("Task with ID 3 not found");
    assert_eq!(error.to_string(), "NOT_FOUND: Task with ID 3 not found");
}
