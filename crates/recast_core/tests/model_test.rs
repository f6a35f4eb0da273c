//! Tests for roles, steps, sequences and run results.

use recast_core::{
    GenerateRequest, Platform, Role, RunResult, Sequence, Speaker, Step, StepKind,
};
use recast_error::ModelErrorKind;
use std::str::FromStr;
use std::sync::Arc;

fn editor() -> Arc<Role> {
    Arc::new(Role::new("Editor", "Polish text", "A careful editor.").unwrap())
}

#[test]
fn test_role_rejects_blank_name() {
    let err = Role::new("   ", "goal", "persona").unwrap_err();
    assert_eq!(err.kind, ModelErrorKind::EmptyRoleName);
}

#[test]
fn test_role_rejects_blank_persona() {
    let err = Role::new("Critic", "goal", "").unwrap_err();
    assert_eq!(err.kind, ModelErrorKind::EmptyPersona("Critic".to_string()));
}

#[test]
fn test_role_keeps_fields_verbatim() {
    let role = Role::new("Editor", "Polish text", "  A careful editor.  ").unwrap();

    assert_eq!(role.name(), "Editor");
    assert_eq!(role.goal(), "Polish text");
    assert_eq!(role.persona(), "  A careful editor.  ");
    assert!(role.system_prompt().ends_with("\nA careful editor."));
}

#[test]
fn test_system_prompt_without_goal() {
    let role = Role::new("Critic", "", "Sharp eyes.").unwrap();
    assert_eq!(role.system_prompt(), "You are Critic.\nSharp eyes.");
}

#[test]
fn test_step_render_uses_custom_heading() {
    let step = Step::new(StepKind::Rewrite, editor(), "Apply the feedback.")
        .unwrap()
        .with_context_heading("Feedback:");

    assert_eq!(
        step.render("too long"),
        "Apply the feedback.\n\nFeedback:\ntoo long"
    );
}

#[test]
fn test_step_render_does_not_escape() {
    let step = Step::new(StepKind::Generate, editor(), "Rewrite:").unwrap();
    let context = "{braces} and \"quotes\"\n";

    assert!(step.render(context).ends_with(context));
}

#[test]
fn test_step_rejects_blank_template() {
    let err = Step::new(StepKind::Critique, editor(), "\n").unwrap_err();
    assert_eq!(err.kind, ModelErrorKind::EmptyTemplate("Editor".to_string()));
}

#[test]
fn test_sequence_rejects_empty() {
    let err = Sequence::new("instagram", Vec::new()).unwrap_err();
    assert_eq!(
        err.kind,
        ModelErrorKind::EmptySequence("instagram".to_string())
    );
}

#[test]
fn test_sequence_keeps_order() {
    let steps = vec![
        Step::new(StepKind::Generate, editor(), "one").unwrap(),
        Step::new(StepKind::Critique, editor(), "two").unwrap(),
    ];
    let sequence = Sequence::new("s", steps).unwrap();

    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.steps()[0].template(), "one");
    assert_eq!(sequence.steps()[1].template(), "two");
}

#[test]
fn test_platform_parse_is_case_insensitive() {
    assert_eq!(Platform::from_str("TikTok").unwrap(), Platform::TikTok);
    assert_eq!(Platform::from_str("linkedin").unwrap(), Platform::LinkedIn);
    assert!(Platform::from_str("myspace").is_err());
}

#[test]
fn test_run_result_serializes_with_output_keys() {
    let result: RunResult = [
        (Platform::Instagram, "insta".to_string()),
        (Platform::TikTok, "tok".to_string()),
        (Platform::LinkedIn, "pro".to_string()),
    ]
    .into_iter()
    .collect();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "instagram_content": "insta",
            "tiktok_content": "tok",
            "linkedin_content": "pro",
        })
    );
}

#[test]
fn test_empty_run_result_serializes_as_empty_object() {
    let json = serde_json::to_string(&RunResult::new()).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_request_for_role() {
    let role = editor();
    let request = GenerateRequest::for_role(&role, "Do the thing").with_sampling(Some(0.1), None);

    assert_eq!(request.messages().len(), 2);
    assert_eq!(*request.messages()[1].speaker(), Speaker::User);
    assert_eq!(request.messages()[1].content(), "Do the thing");
    assert_eq!(request.system_text(), Some(role.system_prompt().as_str()));
    assert_eq!(*request.temperature(), Some(0.1));
}
