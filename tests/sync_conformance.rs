//! End-to-end blocking conformance runs over the scripted providers

use chatcert::harness::{Outcome, SyncConformanceSuite};
use chatcert::providers::{Fault, Script, ScriptedProvider};
use chatcert::{AskOptions, AskReply, ChatOptions, ChatReply, SyncProvider};
use pretty_assertions::assert_eq;

#[test_log::test]
fn conformant_provider_passes_every_scenario() {
    let report = SyncConformanceSuite::new().run(ScriptedProvider::default);
    assert!(report.passed(), "{report}");
    assert_eq!(report.scenarios().len(), 8);
    assert!(report.failures().is_empty());
}

#[test]
fn streaming_scenarios_observe_at_least_one_element() {
    let script = Script::new("one two three");
    let report = SyncConformanceSuite::new().run(|| ScriptedProvider::new(script.clone()));

    for name in ["ask_stream", "ask_stream_raw", "chat_stream"] {
        let scenario = report.scenario(name).unwrap();
        assert!(scenario.outcome.is_passed());
        assert_eq!(scenario.elements, Some(3), "{name}");
    }
}

#[test]
fn empty_streams_pass_with_zero_elements() {
    let script = Script::default().with_fault(Fault::EmptyStreams);
    let report = SyncConformanceSuite::new().run(|| ScriptedProvider::new(script.clone()));

    assert!(report.passed(), "{report}");
    assert_eq!(report.scenario("ask_stream").unwrap().elements, Some(0));
    assert_eq!(report.scenario("chat_stream").unwrap().elements, Some(0));
}

#[test]
fn provider_errors_are_reported_as_errors_not_failures() {
    let script = Script::default().with_fault(Fault::Error("backend down".into()));
    let report = SyncConformanceSuite::new().run(|| ScriptedProvider::new(script.clone()));

    assert!(!report.passed());
    assert_eq!(report.failures().len(), 8);
    for scenario in report.failures() {
        assert!(
            matches!(&scenario.outcome, Outcome::Errored { error } if error.contains("backend down")),
            "{}: {}",
            scenario.name,
            scenario.outcome
        );
    }
}

#[test]
fn wrong_non_stream_shape_fails_the_affected_scenarios() {
    let script = Script::default().with_fault(Fault::NonStreamAsStream);
    let report = SyncConformanceSuite::new().run(|| ScriptedProvider::new(script.clone()));

    let failed: Vec<_> = report.failures().iter().map(|s| s.name).collect();
    assert_eq!(
        failed,
        vec![
            "ask_non_stream",
            "get_message",
            "chat_non_stream",
            "chat_optimizer"
        ]
    );
    for scenario in report.failures() {
        assert!(matches!(scenario.outcome, Outcome::Failed { .. }));
    }
}

#[test]
fn wrong_stream_shape_fails_the_streaming_ask_scenarios() {
    let script = Script::default().with_fault(Fault::StreamAsRecord);
    let report = SyncConformanceSuite::new().run(|| ScriptedProvider::new(script.clone()));

    let failed: Vec<_> = report.failures().iter().map(|s| s.name).collect();
    assert_eq!(failed, vec!["ask_stream", "ask_stream_raw"]);
}

#[test]
fn stale_last_response_fails_only_that_scenario() {
    let script = Script::default().with_fault(Fault::StaleLastResponse);
    let report = SyncConformanceSuite::new().run(|| ScriptedProvider::new(script.clone()));

    let failed: Vec<_> = report.failures().iter().map(|s| s.name).collect();
    assert_eq!(failed, vec!["last_response"]);
}

#[test]
fn chat_equals_extracted_ask_for_the_non_streaming_case() {
    let provider = ScriptedProvider::default();

    let AskReply::Record(record) = provider
        .ask("This is a test prompt", AskOptions::default())
        .unwrap()
    else {
        panic!("expected a record");
    };
    let extracted = provider.get_message(&record).unwrap();

    let ChatReply::Message(message) = provider
        .chat("This is a test prompt", ChatOptions::default())
        .unwrap()
    else {
        panic!("expected a message");
    };

    assert_eq!(message, extracted);
    assert!(!message.is_empty());
}

#[test]
fn last_response_is_overwritten_not_merged() {
    let provider = ScriptedProvider::default();
    assert!(provider.last_response().is_none());

    provider.chat("first", ChatOptions::default()).unwrap();
    let first = provider.last_response().unwrap();
    assert_eq!(first.get_str("prompt"), Some("first"));

    provider
        .ask("second", AskOptions::default())
        .unwrap();
    let second = provider.last_response().unwrap();
    assert_eq!(second.get_str("prompt"), Some("second"));
    assert_eq!(second.len(), first.len());
}
