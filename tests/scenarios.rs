//! End-to-end scenarios driven through `Stage`.

use std::cell::RefCell;
use std::rc::Rc;

use spark_remount::{LifecycleEvent, MountError, NodeState, Stage, StageConfig};

fn stage() -> Stage {
    spark_remount::logging::test();
    let config = StageConfig::default()
        .with_hosts(["hostA", "hostB"])
        .with_auto_mount(false);
    Stage::new(config).unwrap()
}

fn destroyed_lines(stage: &Stage) -> Vec<String> {
    stage
        .events()
        .destroyed_events()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn former_owner_destruction_spares_node() {
    let mut stage = stage();
    stage.mount("hostA").unwrap();
    stage.move_to("hostB").unwrap();

    assert_eq!(stage.destroy("hostA"), Ok(true));
    assert!(matches!(stage.state(), NodeState::Mounted(_)));
    assert_eq!(stage.owner_name(), Some("hostB"));
    assert!(destroyed_lines(&stage).is_empty());

    assert_eq!(stage.destroy("hostB"), Ok(true));
    assert_eq!(stage.state(), NodeState::Destroyed);
    assert_eq!(destroyed_lines(&stage), vec!["destroyed: hostB"]);
}

#[test]
fn current_owner_destruction_is_terminal() {
    let mut stage = stage();
    let node = stage.mount("hostA").unwrap();

    stage.destroy("hostA").unwrap();
    assert_eq!(stage.state(), NodeState::Destroyed);
    assert_eq!(destroyed_lines(&stage), vec!["destroyed: hostA"]);

    assert_eq!(stage.move_to("hostB"), Err(MountError::NodeDestroyed { node }));
    assert_eq!(destroyed_lines(&stage).len(), 1);
}

#[test]
fn repeated_destroy_emits_nothing_new() {
    let mut stage = stage();
    stage.mount("hostA").unwrap();

    assert_eq!(stage.destroy("hostA"), Ok(true));
    let before = stage.events().len();
    assert_eq!(stage.destroy("hostA"), Ok(false));
    assert_eq!(stage.events().len(), before);
}

#[test]
fn move_to_dead_host_keeps_owner() {
    let mut stage = stage();
    stage.mount("hostA").unwrap();
    stage.destroy("hostB").unwrap();

    assert_eq!(
        stage.move_to("hostB"),
        Err(MountError::DeadHost { host: "hostB".into() })
    );
    assert_eq!(stage.owner_name(), Some("hostA"));
    assert!(stage.registry().occupied_hosts().all(|slot| slot.name() == "hostA"));
}

#[test]
fn node_event_follows_node_teardown_order() {
    let mut stage = stage();
    stage.mount("hostA").unwrap();
    stage.events().clear();

    stage.destroy("hostA").unwrap();

    assert_eq!(
        stage.events().events(),
        vec![
            LifecycleEvent::NodeDestroyed {
                node: stage.manager().node().unwrap().id(),
                owner: "hostA".into(),
            },
            LifecycleEvent::HostDestroyed { host: "hostA".into() },
        ]
    );
}

#[test]
fn destroy_hook_runs_with_current_owner_only() {
    let mut stage = stage();
    let log = Rc::new(RefCell::new(Vec::new()));
    let hook_log = log.clone();

    stage.mount("hostA").unwrap();
    stage
        .manager_mut()
        .on_destroy(move || hook_log.borrow_mut().push("goodbye from child"))
        .unwrap();
    stage.move_to("hostB").unwrap();

    stage.destroy("hostA").unwrap();
    assert!(log.borrow().is_empty());

    stage.destroy("hostB").unwrap();
    assert_eq!(*log.borrow(), vec!["goodbye from child"]);
}

#[test]
fn default_walkthrough() {
    let mut stage = Stage::new(StageConfig::default()).unwrap();

    stage.move_to_last().unwrap();
    stage.destroy("Container 1").unwrap();
    stage.destroy("Container 2").unwrap();

    let lines: Vec<String> = stage.events().events().iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "mounted: Container 1",
            "moved: Container 1 -> Container 2",
            "host destroyed: Container 1",
            "destroyed: Container 2",
            "host destroyed: Container 2",
        ]
    );
}
