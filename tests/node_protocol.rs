use std::sync::Arc;

use fable::builtin::{ContextCheck, ContextCondition, ContextEffect, ContextEvent};
use fable::{
    validate_uniqueness, AppConfig, CollectingSink, ConditionEvaluator, ContextScope,
    DiagnosticKind, EventDispatcher, FireOn, LogConfig, Node, Phase, QuestGraph, RuntimeContext,
};
use fable_test_utils::{actor, controller, EventLog, MockCondition, MockEvent};

#[test]
fn test_failing_second_condition_fails_node() {
    let sink = Arc::new(CollectingSink::new());
    let eval = ConditionEvaluator::new(sink.clone());

    let c1 = Arc::new(MockCondition::new("C1", true));
    let c2 = Arc::new(MockCondition::new("C2", false));
    let node = Node::new("Gate")
        .with_condition_arc(c1.clone())
        .with_condition_arc(c2.clone());

    let mut local = RuntimeContext::new("hero");
    let scope = ContextScope::new(&mut local);

    assert!(!eval.are_conditions_met(&node, &actor(), &controller(), &scope));
    assert_eq!(c1.calls(), 1);
    assert_eq!(c2.calls(), 1);
    assert!(sink.is_empty());
}

#[test]
fn test_exit_dispatch_runs_exit_and_both() {
    let dispatch = EventDispatcher::default();
    let log = EventLog::new();
    let node = Node::new("Scene")
        .with_event(MockEvent::new("E1", FireOn::Enter, &log))
        .with_event(MockEvent::new("E2", FireOn::Exit, &log))
        .with_event(MockEvent::new("E3", FireOn::Both, &log));

    let mut local = RuntimeContext::new("hero");
    let mut scope = ContextScope::new(&mut local);
    let report = dispatch.process_events(&node, &actor(), &controller(), &mut scope, Phase::Exit);

    assert_eq!(log.names(), vec!["E2", "E3"]);
    assert_eq!(report.executed, 2);
}

#[test]
fn test_null_entries_never_change_the_outcome() {
    let sink = Arc::new(CollectingSink::new());
    let eval = ConditionEvaluator::new(sink.clone());
    let dispatch = EventDispatcher::new(sink.clone());
    let log = EventLog::new();

    let node = Node::new("Sparse")
        .with_empty_condition()
        .with_condition(MockCondition::new("Pass", true))
        .with_empty_condition()
        .with_empty_event()
        .with_event(MockEvent::new("E", FireOn::Enter, &log))
        .with_empty_event();

    let mut local = RuntimeContext::new("hero");
    let mut scope = ContextScope::new(&mut local);

    assert!(eval.are_conditions_met(&node, &actor(), &controller(), &scope));
    dispatch.process_events(&node, &actor(), &controller(), &mut scope, Phase::Enter);

    assert_eq!(log.names(), vec!["E"]);
    assert!(sink.is_empty());
}

#[test]
fn test_quest_step_with_builtin_capabilities() {
    let sink = Arc::new(CollectingSink::new());
    let eval = ConditionEvaluator::new(sink.clone());
    let dispatch = EventDispatcher::new(sink.clone());

    let node = Node::new("AudienceWithKing")
        .with_condition(ContextCondition::new(
            "HasInvitation",
            ContextCheck::HasKey {
                key: "invitation".into(),
            },
        ))
        .with_condition(
            ContextCondition::new(
                "KingdomAtWar",
                ContextCheck::Expr {
                    expr: r#"realm == "war""#.into(),
                },
            )
            .negated()
            .on_shared(),
        )
        .with_event(ContextEvent::new(
            "ConsumeInvitation",
            ContextEffect::Remove {
                key: "invitation".into(),
            },
        ))
        .with_event(
            ContextEvent::new(
                "CountAudiences",
                ContextEffect::Increment {
                    key: "audiences".into(),
                    by: 1,
                },
            )
            .firing_on(FireOn::Exit)
            .on_shared(),
        );

    let mut hero = RuntimeContext::new("hero");
    hero.set("invitation", serde_json::json!(true));
    let mut world = RuntimeContext::new("world");
    world.set_str("realm", "peace");

    {
        let mut scope = ContextScope::new(&mut hero).with_shared(&mut world);
        assert!(eval.are_conditions_met(&node, &actor(), &controller(), &scope));
        dispatch.process_events(&node, &actor(), &controller(), &mut scope, Phase::Enter);
        dispatch.process_events(&node, &actor(), &controller(), &mut scope, Phase::Exit);
    }

    assert!(!hero.contains("invitation"));
    assert_eq!(world.get_i64("audiences"), Some(1));
    assert!(!hero.contains("audiences"));

    // The invitation is gone, so the gate now closes.
    let scope = ContextScope::new(&mut hero).with_shared(&mut world);
    assert!(!eval.are_conditions_met(&node, &actor(), &controller(), &scope));
    assert!(sink.is_empty());
}

#[test]
fn test_shared_request_without_shared_context_uses_local() {
    let sink = Arc::new(CollectingSink::new());
    let eval = ConditionEvaluator::new(sink.clone());
    let dispatch = EventDispatcher::new(sink.clone());

    let node = Node::new("Rumour")
        .with_condition(
            ContextCondition::new(
                "HeardRumour",
                ContextCheck::HasKey {
                    key: "rumour".into(),
                },
            )
            .on_shared(),
        )
        .with_event(
            ContextEvent::new(
                "SpreadRumour",
                ContextEffect::Set {
                    key: "rumour".into(),
                    value: serde_json::json!("dragon"),
                },
            )
            .on_shared(),
        );

    let config = AppConfig::default();
    let (mut local, shared) = config.context.build();
    assert!(shared.is_none());

    let mut scope = ContextScope::new(&mut local);
    dispatch.process_events(&node, &actor(), &controller(), &mut scope, Phase::Enter);
    assert!(eval.are_conditions_met(&node, &actor(), &controller(), &scope));
    drop(scope);

    assert_eq!(local.get_str("rumour"), Some("dragon"));
    assert_eq!(sink.count_of(DiagnosticKind::MissingSharedContext), 2);
}

#[test]
fn test_authoring_identity_flow() {
    let mut graph = QuestGraph::new();
    graph.add(Node::new("Intro"));
    let copy = graph.add(Node::new("Intro"));
    graph.add(Node::new("Outro").with_id("end"));

    graph.assign_identities();
    assert!(validate_uniqueness(&graph).is_err());

    assert_eq!(graph.ensure_unique_id(copy).as_deref(), Some("Intro_1"));
    assert!(validate_uniqueness(&graph).is_ok());
    assert!(graph.find("Intro_1").is_some());
}

#[test]
fn test_init_logging_is_idempotent() {
    let config = LogConfig::default();
    fable::init_logging(&config);
    assert!(!fable::init_logging(&config));
}
