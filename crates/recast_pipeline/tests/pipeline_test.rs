//! Integration tests for the sequence runner and platform coordinator.

use async_trait::async_trait;
use recast_core::{Platform, Role, Sequence, Step, StepKind};
use recast_error::{GenerationError, GenerationErrorKind, PipelineErrorKind};
use recast_interface::TextGenerator;
use recast_pipeline::{
    FailurePolicy, PipelineConfig, PipelineCoordinator, PlatformProfile, SequenceRunner,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers every call with `"<ROLE>:<INSTR_LEN>"` and records what it saw.
#[derive(Default)]
struct EchoGenerator {
    calls: Mutex<Vec<(String, String)>>,
    fail_role: Option<String>,
    panic_role: Option<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl EchoGenerator {
    fn failing_for(role: &str) -> Self {
        Self {
            fail_role: Some(role.to_string()),
            ..Default::default()
        }
    }

    fn panicking_for(role: &str) -> Self {
        Self {
            panic_role: Some(role.to_string()),
            ..Default::default()
        }
    }

    fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_for(&self, role: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(r, _)| r == role)
            .map(|(_, i)| i)
            .collect()
    }
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((role.name().to_string(), instruction.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.panic_role.as_deref() == Some(role.name().as_str()) {
            panic!("generator crashed for {}", role.name());
        }
        if self.fail_role.as_deref() == Some(role.name().as_str()) {
            return Err(GenerationError::new(GenerationErrorKind::Http {
                status_code: 500,
                message: "boom".to_string(),
            }));
        }
        Ok(format!("{}:{}", role.name(), instruction.len()))
    }

    fn provider_name(&self) -> &str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-1"
    }
}

fn role(name: &str) -> Arc<Role> {
    Arc::new(Role::new(name, "goal", "persona").unwrap())
}

fn test_profiles() -> Vec<PlatformProfile> {
    vec![
        PlatformProfile::new(Platform::Instagram, role("editor_a"), "Brief for platform a."),
        PlatformProfile::new(Platform::TikTok, role("editor_b"), "Brief for platform b."),
        PlatformProfile::new(Platform::LinkedIn, role("editor_c"), "Brief for platform c."),
    ]
}

fn coordinator(generator: EchoGenerator) -> PipelineCoordinator<EchoGenerator> {
    PipelineCoordinator::with_profiles(generator, role("critic"), test_profiles()).unwrap()
}

#[tokio::test]
async fn test_empty_content_makes_no_calls() {
    let pipeline = coordinator(EchoGenerator::default());

    let result = pipeline.process("").await.unwrap();

    assert!(result.is_empty());
    assert!(pipeline.generator().calls().is_empty());
}

#[tokio::test]
async fn test_strict_rejects_empty_content() {
    let pipeline = coordinator(EchoGenerator::default());

    let err = pipeline.process_strict("").await.unwrap_err();

    assert!(matches!(err.kind(), PipelineErrorKind::EmptyContent));
    assert!(pipeline.generator().calls().is_empty());
}

#[tokio::test]
async fn test_one_entry_per_platform() {
    let pipeline = coordinator(EchoGenerator::default());

    let result = pipeline.process("We launched a new product today.").await.unwrap();

    assert_eq!(result.len(), 3);
    let keys: Vec<_> = result.into_keyed_map().into_keys().collect();
    assert_eq!(
        keys,
        vec!["instagram_content", "linkedin_content", "tiktok_content"]
    );
    // Three platforms, three steps each.
    assert_eq!(pipeline.generator().calls().len(), 9);
}

#[tokio::test]
async fn test_final_text_comes_from_rewrite() {
    let pipeline = coordinator(EchoGenerator::default());

    let result = pipeline.process("Hello world").await.unwrap();

    for (platform, editor) in [
        (Platform::Instagram, "editor_a"),
        (Platform::TikTok, "editor_b"),
        (Platform::LinkedIn, "editor_c"),
    ] {
        let text = result.get(platform).unwrap();
        let (role_name, len) = text.split_once(':').unwrap();
        assert_eq!(role_name, editor);

        // The editor answers twice; the second (rewrite) instruction is longer.
        let instructions = pipeline.generator().calls_for(editor);
        assert_eq!(instructions.len(), 2);
        assert_eq!(len.parse::<usize>().unwrap(), instructions[1].len());
        assert!(instructions[1].len() > instructions[0].len());
    }
}

#[tokio::test]
async fn test_context_flows_between_steps() {
    let generator = EchoGenerator::default();
    let profile = PlatformProfile::new(Platform::LinkedIn, role("editor"), "Be professional.");
    let sequence = profile.build_sequence(&role("critic")).unwrap();
    let runner = SequenceRunner::new(generator);

    let execution = runner.run(&sequence, "Original post").await.unwrap();

    let steps = execution.steps();
    assert_eq!(steps.len(), 3);
    assert!(steps[0].instruction().contains("Original post"));

    // Critique sees the draft.
    assert!(steps[1].instruction().contains(steps[0].output()));

    // Rewrite sees the critique and the original content.
    assert!(steps[2].instruction().contains(steps[1].output()));
    assert!(steps[2].instruction().contains("Given Content:\nOriginal post"));
    assert_eq!(execution.final_text(), steps[2].output());
}

#[tokio::test]
async fn test_failing_step_reports_index_and_kind() {
    let runner = SequenceRunner::new(EchoGenerator::failing_for("critic"));
    let profile = PlatformProfile::new(Platform::TikTok, role("editor"), "Keep it short.");
    let sequence = profile.build_sequence(&role("critic")).unwrap();

    let err = runner.run(&sequence, "content").await.unwrap_err();

    match err.kind() {
        PipelineErrorKind::Sequence {
            platform,
            step,
            step_kind,
            ..
        } => {
            assert_eq!(platform, "tiktok");
            assert_eq!(*step, 1);
            assert_eq!(step_kind, "critique");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.generation_error().is_some());
    // Rewrite never ran.
    assert_eq!(runner.generator().calls().len(), 2);
}

#[tokio::test]
async fn test_failed_platform_does_not_stop_others() {
    let pipeline = coordinator(EchoGenerator::failing_for("editor_b"));

    let report = pipeline.process_report("Some content").await;

    assert_eq!(report.len(), 3);
    assert!(!report.is_complete());
    assert!(report.outcome(Platform::Instagram).unwrap().is_ok());
    assert!(report.outcome(Platform::LinkedIn).unwrap().is_ok());
    let failures: Vec<_> = report.failures().map(|(p, _)| p).collect();
    assert_eq!(failures, vec![Platform::TikTok]);

    // Platforms a and c ran all three steps, b stopped after its first.
    let generator = pipeline.generator();
    assert_eq!(generator.calls_for("editor_a").len(), 2);
    assert_eq!(generator.calls_for("editor_c").len(), 2);
    assert_eq!(generator.calls_for("editor_b").len(), 1);
}

#[tokio::test]
async fn test_panicked_sequence_reported_as_task_join() {
    let pipeline = coordinator(EchoGenerator::panicking_for("editor_b"));

    let report = pipeline.process_report("content").await;

    assert_eq!(report.len(), 3);
    assert!(
        report
            .outcome(Platform::Instagram)
            .unwrap()
            .as_ref()
            .is_ok_and(|text| text.starts_with("editor_a:"))
    );
    assert!(report.outcome(Platform::LinkedIn).unwrap().is_ok());
    let err = report.outcome(Platform::TikTok).unwrap().as_ref().unwrap_err();
    match err.kind() {
        PipelineErrorKind::TaskJoin { platform, .. } => assert_eq!(platform, "tiktok"),
        other => panic!("expected TaskJoin, got {other}"),
    }
}

#[tokio::test]
async fn test_dropped_run_cancels_in_flight_sequences() {
    let pipeline = coordinator(EchoGenerator::with_delay(Duration::from_millis(200)));

    let outcome = tokio::time::timeout(Duration::from_millis(50), pipeline.process("content")).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_millis(400)).await;

    let generator = pipeline.generator();
    assert_eq!(generator.calls().len(), 3);
    assert_eq!(generator.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_atomic_policy_fails_run() {
    let pipeline = coordinator(EchoGenerator::failing_for("editor_b"));

    let err = pipeline.process("Some content").await.unwrap_err();

    match err.kind() {
        PipelineErrorKind::Sequence { platform, step, .. } => {
            assert_eq!(platform, "tiktok");
            assert_eq!(*step, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Every platform was still attempted.
    assert_eq!(pipeline.generator().calls_for("editor_a").len(), 2);
    assert_eq!(pipeline.generator().calls_for("editor_c").len(), 2);
}

#[tokio::test]
async fn test_isolated_policy_keeps_successes() {
    let pipeline = coordinator(EchoGenerator::failing_for("editor_b"))
        .with_config(PipelineConfig::default().with_failure_policy(FailurePolicy::Isolated));

    let result = pipeline.process("Some content").await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(result.get(Platform::TikTok).is_none());
    assert!(result.get(Platform::Instagram).is_some());
}

#[tokio::test]
async fn test_isolated_policy_fails_when_everything_fails() {
    let pipeline = coordinator(EchoGenerator::failing_for("critic"))
        .with_config(PipelineConfig::default().with_failure_policy(FailurePolicy::Isolated));

    assert!(pipeline.process("Some content").await.is_err());
}

#[tokio::test]
async fn test_concurrency_limit_respected() {
    let pipeline = coordinator(EchoGenerator::with_delay(Duration::from_millis(20)))
        .with_config(PipelineConfig::default().with_max_concurrent_sequences(1));

    let result = pipeline.process("Some content").await.unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(pipeline.generator().peak_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_sequences_run_concurrently() {
    let pipeline = coordinator(EchoGenerator::with_delay(Duration::from_millis(50)));

    pipeline.process("Some content").await.unwrap();

    assert!(pipeline.generator().peak_in_flight.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_duplicate_platform_rejected() {
    let profiles = vec![
        PlatformProfile::new(Platform::Instagram, role("a"), "brief"),
        PlatformProfile::new(Platform::Instagram, role("b"), "brief"),
    ];

    let err = PipelineCoordinator::with_profiles(EchoGenerator::default(), role("critic"), profiles)
        .unwrap_err();

    assert!(err.to_string().contains("instagram"));
}

#[tokio::test]
async fn test_default_catalogue_covers_all_platforms() {
    let pipeline = PipelineCoordinator::new(EchoGenerator::default()).unwrap();

    let platforms: Vec<_> = pipeline.platforms().collect();
    assert_eq!(
        platforms,
        vec![Platform::Instagram, Platform::TikTok, Platform::LinkedIn]
    );

    let result = pipeline.process("A short announcement.").await.unwrap();
    assert_eq!(result.len(), 3);
    assert!(
        result
            .get(Platform::TikTok)
            .unwrap()
            .starts_with("Tiktok Content Editor:")
    );
}

#[tokio::test]
async fn test_custom_single_step_sequence() {
    let generator = EchoGenerator::default();
    let step = Step::new(StepKind::Generate, role("solo"), "Summarize.").unwrap();
    let sequence = Sequence::new("solo", vec![step]).unwrap();
    let runner = SequenceRunner::new(generator);

    let text = runner.run_text(&sequence, "abc").await.unwrap();

    let expected_len = "Summarize.\n\nGiven Content:\nabc".len();
    assert_eq!(text, format!("solo:{expected_len}"));
}
