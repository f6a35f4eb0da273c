//! Tests for generator construction and output rendering.

use recast::{
    GenerationErrorKind, OutputFormat, PipelineCoordinator, Platform, RecastConfig,
    RecastErrorKind, RunResult, TextGenerator, build_generator, render, rewrite,
};
use std::collections::HashMap;

fn load(pairs: &[(&str, &str)]) -> RecastConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RecastConfig::load_from(None, Some(env)).unwrap()
}

#[test]
fn test_gemini_requires_api_key() {
    let err = build_generator(&load(&[])).err().unwrap();

    match err.kind() {
        RecastErrorKind::Generation(e) => assert_eq!(
            *e.kind(),
            GenerationErrorKind::MissingApiKey("GOOGLE_GEMINI_API_KEY".to_string())
        ),
        other => panic!("expected a missing key error, got {other}"),
    }
}

#[test]
fn test_rejected_model_surfaces_as_config_error() {
    let err = build_generator(&load(&[
        ("GEMINI_API_KEY", "k"),
        ("RECAST_MODEL", "models/gemini-1.5-flash"),
    ]))
    .err()
    .unwrap();

    match err.kind() {
        RecastErrorKind::Config(e) => assert_eq!(e.setting.as_deref(), Some("model")),
        other => panic!("expected a config error, got {other}"),
    }
}

#[tokio::test]
async fn test_rewrite_empty_content_without_credentials() {
    let result = rewrite(&load(&[]), "").await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_rewrite_reports_missing_credentials() {
    let err = rewrite(&load(&[]), "Launch day!").await.unwrap_err();

    assert!(matches!(err.kind(), RecastErrorKind::Generation(_)));
    assert!(err.to_string().contains("API key not set"));
}

#[test]
fn test_gemini_generator_built() {
    let generator = build_generator(&load(&[("GEMINI_API_KEY", "k")])).unwrap();

    assert_eq!(generator.provider_name(), "gemini");
    assert_eq!(generator.model_name(), "gemini-1.5-flash");
}

#[test]
fn test_openai_compat_generator_built_without_key() {
    let config = load(&[
        ("RECAST_PROVIDER", "openai_compat"),
        ("RECAST_BASE_URL", "http://localhost:11434/v1"),
        ("RECAST_MODEL", "llama3"),
    ]);

    let generator = build_generator(&config).unwrap();

    assert_eq!(generator.provider_name(), "openai_compat");
    assert_eq!(generator.model_name(), "llama3");
}

#[tokio::test]
async fn test_empty_content_needs_no_network() {
    let generator = build_generator(&load(&[("GEMINI_API_KEY", "k")])).unwrap();
    let pipeline = PipelineCoordinator::new(generator).unwrap();

    let result = pipeline.process("").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(render(&result, OutputFormat::Json).unwrap(), "{}");
    assert_eq!(render(&result, OutputFormat::Human).unwrap(), "");
}

#[test]
fn test_human_output_has_header_per_platform() {
    let result: RunResult = [
        (Platform::Instagram, "Caption\n".to_string()),
        (Platform::LinkedIn, "Post".to_string()),
    ]
    .into_iter()
    .collect();

    let text = render(&result, OutputFormat::Human).unwrap();

    assert_eq!(
        text,
        "## instagram_content\n\nCaption\n\n## linkedin_content\n\nPost\n"
    );
}
