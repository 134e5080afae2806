use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ai_bt::{BtNode, BtStatus, Condition, Inverter, Node, Selector, Sequence, Wait};
use ai_core::TickContext;

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Leaf that replays a fixed script of statuses and records every tick.
struct Scripted {
    name: &'static str,
    script: Vec<BtStatus>,
    step: usize,
    log: Log,
}

impl Scripted {
    fn new(name: &'static str, script: &[BtStatus], log: &Log) -> Self {
        Self {
            name,
            script: script.to_vec(),
            step: 0,
            log: log.clone(),
        }
    }
}

impl BtNode for Scripted {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tick(&mut self, _ctx: &TickContext) -> BtStatus {
        self.log.borrow_mut().push(self.name);
        let status = self.script[self.step.min(self.script.len() - 1)];
        self.step += 1;
        status
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1)
}

#[test]
fn sequence_failure_stops_and_next_episode_restarts_at_first_child() {
    use BtStatus::*;
    let log = Log::default();
    let mut seq = Node::new(Sequence::new(vec![
        Scripted::new("a", &[Success], &log).into(),
        Scripted::new("b", &[Failure, Success], &log).into(),
        Scripted::new("c", &[Success], &log).into(),
    ]));

    assert_eq!(seq.update(&ctx(0)), Failure);
    assert_eq!(*log.borrow(), vec!["a", "b"]);
    assert_eq!(seq.snapshot().detail, ai_bt::NodeDetail::Cursor { index: 0 });

    log.borrow_mut().clear();
    assert_eq!(seq.update(&ctx(1)), Success);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn sequence_resumes_running_child_without_rechecking_earlier_ones() {
    use BtStatus::*;
    let log = Log::default();
    let mut seq = Node::new(Sequence::new(vec![
        Scripted::new("a", &[Success], &log).into(),
        Scripted::new("b", &[Running, Running, Success], &log).into(),
        Scripted::new("c", &[Success], &log).into(),
    ]));

    assert_eq!(seq.update(&ctx(0)), Running);
    assert_eq!(seq.update(&ctx(1)), Running);
    assert_eq!(seq.update(&ctx(2)), Success);
    assert_eq!(*log.borrow(), vec!["a", "b", "b", "b", "c"]);
}

#[test]
fn sequence_of_immediate_successes_resolves_in_one_update() {
    let ticked = Rc::new(Cell::new(0u32));
    let counter = |ticked: &Rc<Cell<u32>>| {
        let ticked = ticked.clone();
        Condition::new(move |_ctx: &TickContext| {
            ticked.set(ticked.get() + 1);
            true
        })
    };

    let mut seq = Node::new(
        Sequence::new(Vec::new())
            .with(counter(&ticked))
            .with(counter(&ticked))
            .with(counter(&ticked)),
    );

    assert_eq!(seq.update(&ctx(0)), BtStatus::Success);
    assert_eq!(ticked.get(), 3);
    assert!(!seq.is_started());
}

#[test]
fn empty_sequence_succeeds_and_empty_selector_fails() {
    let mut seq = Node::new(Sequence::new(Vec::new()));
    let mut sel = Node::new(Selector::new(Vec::new()));
    assert_eq!(seq.update(&ctx(0)), BtStatus::Success);
    assert_eq!(sel.update(&ctx(0)), BtStatus::Failure);
}

#[test]
fn selector_first_success_wins_and_later_children_are_skipped() {
    use BtStatus::*;
    let log = Log::default();
    let mut sel = Node::new(Selector::new(vec![
        Scripted::new("a", &[Failure], &log).into(),
        Scripted::new("b", &[Success], &log).into(),
        Scripted::new("c", &[Success], &log).into(),
    ]));

    assert_eq!(sel.update(&ctx(0)), Success);
    assert_eq!(*log.borrow(), vec!["a", "b"]);
    assert_eq!(sel.snapshot().detail, ai_bt::NodeDetail::Cursor { index: 0 });
}

#[test]
fn selector_fails_only_when_every_child_fails() {
    use BtStatus::*;
    let log = Log::default();
    let mut sel = Node::new(Selector::new(vec![
        Scripted::new("a", &[Failure], &log).into(),
        Scripted::new("b", &[Failure], &log).into(),
    ]));

    assert_eq!(sel.update(&ctx(0)), Failure);
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn selector_resumes_running_child_then_reprioritizes_next_episode() {
    use BtStatus::*;
    let log = Log::default();
    let mut sel = Node::new(Selector::new(vec![
        Scripted::new("high", &[Failure, Success], &log).into(),
        Scripted::new("low", &[Running, Success], &log).into(),
    ]));

    // Episode 1: high fails, low starts running.
    assert_eq!(sel.update(&ctx(0)), Running);
    // Still episode 1: low is resumed directly, high is not consulted.
    assert_eq!(sel.update(&ctx(1)), Success);
    assert_eq!(*log.borrow(), vec!["high", "low", "low"]);

    // Episode 2: high gets first refusal again.
    log.borrow_mut().clear();
    assert_eq!(sel.update(&ctx(2)), Success);
    assert_eq!(*log.borrow(), vec!["high"]);
}

#[test]
fn inverter_swaps_terminal_statuses() {
    use BtStatus::*;
    let log = Log::default();
    let mut inv = Node::new(Inverter::new(Scripted::new(
        "a",
        &[Success, Running, Failure],
        &log,
    )));

    assert_eq!(inv.update(&ctx(0)), Failure);
    assert_eq!(inv.update(&ctx(1)), Running);
    assert_eq!(inv.update(&ctx(2)), Success);
}

#[test]
fn wait_runs_until_duration_elapses() {
    let mut wait = Node::new(Wait::new(0.25));
    let step = TickContext::new(0, 0.125);

    assert_eq!(wait.update(&step), BtStatus::Running);
    assert_eq!(wait.update(&step), BtStatus::Success);
    // Fresh episode starts the clock over.
    assert_eq!(wait.update(&step), BtStatus::Running);
}
