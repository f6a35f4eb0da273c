//! Tests for error display, classification and aggregation.

use recast_error::{
    ConfigError, GenerationError, GenerationErrorKind, PipelineError, PipelineErrorKind,
    RecastError, RecastErrorKind, RetryableError,
};

fn http(status_code: u16) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Http {
        status_code,
        message: "status".to_string(),
    })
}

#[test]
fn test_transient_statuses_are_retryable() {
    for status in [408, 429, 500, 502, 503, 504] {
        assert!(http(status).is_retryable(), "{status} should be retryable");
    }
}

#[test]
fn test_client_errors_are_permanent() {
    for status in [400, 401, 403, 404] {
        assert!(!http(status).is_retryable(), "{status} should not be retryable");
    }
    assert!(!GenerationError::new(GenerationErrorKind::EmptyResponse).is_retryable());
    assert!(
        !GenerationError::new(GenerationErrorKind::MalformedResponse("x".into())).is_retryable()
    );
}

#[test]
fn test_local_failures_are_permanent() {
    for kind in [
        GenerationErrorKind::MissingApiKey("GEMINI_API_KEY".into()),
        GenerationErrorKind::InvalidRequest("missing field".into()),
        GenerationErrorKind::LimiterClosed,
    ] {
        assert!(!GenerationError::new(kind.clone()).is_retryable(), "{kind} retried");
    }
}

#[test]
fn test_request_failures_are_not_reported_as_responses() {
    let err = GenerationError::new(GenerationErrorKind::InvalidRequest(
        "Failed to build request: missing contents".into(),
    ));

    assert!(err.to_string().contains("Invalid request"));
    assert!(!err.to_string().contains("response"));
}

#[test]
fn test_network_failures_are_retryable() {
    assert!(GenerationError::new(GenerationErrorKind::Transport("reset".into())).is_retryable());
    assert!(GenerationError::new(GenerationErrorKind::Timeout(1000)).is_retryable());
}

#[test]
fn test_setting_is_named() {
    let err = ConfigError::invalid("retry.max_backoff_ms", "is below initial_backoff_ms");

    assert_eq!(err.setting.as_deref(), Some("retry.max_backoff_ms"));
    assert!(err.file.ends_with("error_test.rs"));
    assert!(
        err.to_string()
            .starts_with("Configuration Error: `retry.max_backoff_ms` is below initial_backoff_ms at line")
    );
}

#[test]
fn test_location_is_recorded() {
    let err = ConfigError::new("bad model");
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.to_string().contains("bad model"));
    assert!(err.to_string().contains(&format!("line {}", err.line)));
}

#[test]
fn test_sequence_error_exposes_generation_error() {
    let err = PipelineError::new(PipelineErrorKind::Sequence {
        platform: "linkedin".to_string(),
        step: 2,
        step_kind: "rewrite".to_string(),
        source: http(503),
    });

    let message = err.to_string();
    assert!(message.contains("linkedin"));
    assert!(message.contains("step 2 (rewrite)"));
    assert!(err.generation_error().is_some_and(|e| e.is_retryable()));
}

#[test]
fn test_aggregate_conversion() {
    let err: RecastError = PipelineError::new(PipelineErrorKind::EmptyContent).into();

    assert!(matches!(err.kind(), RecastErrorKind::Pipeline(_)));
    assert!(err.to_string().starts_with("Recast Error: Pipeline Error: Content cannot be empty"));

    let err: RecastError = GenerationError::new(GenerationErrorKind::LimiterClosed).into();
    assert!(matches!(err.kind(), RecastErrorKind::Generation(_)));

    let err: RecastError = ConfigError::invalid("model", "cannot be empty").into();
    assert!(matches!(err.kind(), RecastErrorKind::Config(e) if e.setting.is_some()));
}
