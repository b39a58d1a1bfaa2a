//! Request validation in front of the store.
//!
//! Everything here runs before the store lock is touched. The store only
//! ever sees a well-typed `(i64, Fragment)`.

use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cadence_store::Fragment;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// A validated `POST /instruction` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRequest {
    pub seq: i64,
    pub fragment: Fragment,
}

/// Malformed or missing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request must be JSON")]
    NotJson,

    #[error("JSON must include 'seq' and 'instruction'")]
    MissingFields,

    #[error("'seq' must be an integer")]
    SeqNotInteger,

    #[error("'instruction' must be a string")]
    InstructionNotString,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request: {}", self);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Validate headers and body of an instruction submission.
pub fn parse_instruction(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<InstructionRequest, ValidationError> {
    if !is_json(headers) {
        return Err(ValidationError::NotJson);
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::NotJson)?;
    let object = value.as_object().ok_or(ValidationError::MissingFields)?;
    let (seq, instruction) = required_fields(object)?;

    let seq = parse_seq(seq)?;
    let text = instruction
        .as_str()
        .ok_or(ValidationError::InstructionNotString)?;

    Ok(InstructionRequest {
        seq,
        fragment: Fragment::from_wire(text.to_string()),
    })
}

fn required_fields(object: &Map<String, Value>) -> Result<(&Value, &Value), ValidationError> {
    match (object.get("seq"), object.get("instruction")) {
        (Some(seq), Some(instruction)) => Ok((seq, instruction)),
        _ => Err(ValidationError::MissingFields),
    }
}

/// JSON integers, or strings holding a decimal integer.
fn parse_seq(value: &Value) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(ValidationError::SeqNotInteger),
        Value::String(s) => s.trim().parse().map_err(|_| ValidationError::SeqNotInteger),
        _ => Err(ValidationError::SeqNotInteger),
    }
}

/// `application/json` or any `application/*+json`.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn parse(body: &str) -> Result<InstructionRequest, ValidationError> {
        parse_instruction(&json_headers(), body.as_bytes())
    }

    #[test]
    fn valid_content() {
        assert_eq!(
            parse(r#"{"seq": 3, "instruction": "ab"}"#),
            Ok(InstructionRequest {
                seq: 3,
                fragment: Fragment::content("ab"),
            })
        );
    }

    #[test]
    fn empty_instruction_is_terminator() {
        let req = parse(r#"{"seq": 4, "instruction": ""}"#).unwrap();
        assert_eq!(req.fragment, Fragment::Terminator);
    }

    #[test]
    fn numeric_string_seq_is_accepted() {
        assert_eq!(parse(r#"{"seq": " 12 ", "instruction": "x"}"#).unwrap().seq, 12);
        assert_eq!(parse(r#"{"seq": -2, "instruction": "x"}"#).unwrap().seq, -2);
    }

    #[test]
    fn requires_json_content_type() {
        let err = parse_instruction(&HeaderMap::new(), br#"{"seq":1,"instruction":"a"}"#);
        assert_eq!(err, Err(ValidationError::NotJson));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert_eq!(
            parse_instruction(&headers, br#"{"seq":1,"instruction":"a"}"#),
            Err(ValidationError::NotJson)
        );
    }

    #[test]
    fn accepts_json_variants() {
        for ct in ["application/json; charset=utf-8", "application/vnd.api+json"] {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(ct).unwrap());
            assert!(parse_instruction(&headers, br#"{"seq":1,"instruction":"a"}"#).is_ok());
        }
    }

    #[test]
    fn rejects_malformed_bodies() {
        let cases = [
            ("not json", ValidationError::NotJson),
            (r#"[1, 2]"#, ValidationError::MissingFields),
            (r#"{"seq": 1}"#, ValidationError::MissingFields),
            (r#"{"instruction": "a"}"#, ValidationError::MissingFields),
            (r#"{"seq": 1.5, "instruction": "a"}"#, ValidationError::SeqNotInteger),
            (r#"{"seq": "one", "instruction": "a"}"#, ValidationError::SeqNotInteger),
            (r#"{"seq": true, "instruction": "a"}"#, ValidationError::SeqNotInteger),
            (r#"{"seq": null, "instruction": "a"}"#, ValidationError::SeqNotInteger),
            (r#"{"seq": 1, "instruction": 7}"#, ValidationError::InstructionNotString),
            (r#"{"seq": 1, "instruction": null}"#, ValidationError::InstructionNotString),
        ];

        for (body, expected) in cases {
            assert_eq!(parse(body), Err(expected), "body {:?}", body);
        }
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let response = ValidationError::MissingFields.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
