#![forbid(unsafe_code)]

//! Scenario tests for the history adapter.
//!
//! Walks the documented timelines step by step and checks the whole
//! `HistoryState` after every transition.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use rewind_core::{Action, HistoryAdapter, HistoryAdapterConfig, HistoryState, UndoableMeta};

fn state(past: &[i32], present: i32, future: &[i32]) -> HistoryState<i32> {
    HistoryState {
        past: past.iter().copied().collect::<VecDeque<_>>(),
        present,
        future: future.iter().copied().collect::<VecDeque<_>>(),
    }
}

fn increment<P>(n: &mut i32, _: &Action<P>) {
    *n += 1;
}

#[test]
fn grouped_increments_undo_as_one_frame() {
    let mut adapter = HistoryAdapter::new(HistoryAdapterConfig::default());
    let mut s = adapter.get_initial_state(0);
    let helper = adapter.without_payload();

    let plain = Action::new("counter/increment", ()).with_meta(helper.undoable().meta);
    adapter.apply_undoable(&mut s, &plain, increment);
    assert_eq!(s, state(&[0], 1, &[]));

    let grouped = Action::new("counter/increment", ()).with_meta(helper.grouped("g").meta);
    adapter.apply_undoable(&mut s, &grouped, increment);
    assert_eq!(s, state(&[0, 1], 2, &[]));

    adapter.apply_undoable(&mut s, &grouped, increment);
    assert_eq!(s, state(&[0, 1], 3, &[]));

    adapter.undo(&mut s);
    assert_eq!(s, state(&[0], 1, &[3]));

    adapter.undo(&mut s);
    assert_eq!(s, state(&[], 0, &[1, 3]));

    adapter.redo(&mut s);
    assert_eq!(s, state(&[0], 1, &[3]));
}

#[test]
fn limit_two_evicts_first_value() {
    let limit = NonZeroUsize::new(2).unwrap();
    let mut adapter = HistoryAdapter::new(HistoryAdapterConfig::new().with_limit(limit));
    let mut s = adapter.get_initial_state(0);

    for _ in 0..3 {
        adapter.apply_undoable(&mut s, &Action::new("counter/increment", ()), increment);
    }
    assert_eq!(s, state(&[1, 2], 3, &[]));

    // 0 is gone for good.
    adapter.undo(&mut s);
    adapter.undo(&mut s);
    adapter.undo(&mut s);
    assert_eq!(s, state(&[], 1, &[2, 3]));
}

#[test]
fn new_branch_after_undo_discards_redo() {
    let mut adapter = HistoryAdapter::default();
    let mut s = adapter.get_initial_state(0);
    for _ in 0..3 {
        adapter.apply_undoable(&mut s, &Action::new("counter/increment", ()), increment);
    }
    adapter.jump(&mut s, -2);
    assert_eq!(s, state(&[0], 1, &[2, 3]));

    adapter.apply_undoable(&mut s, &Action::new("counter/set", 10), |n, a| *n = a.payload);
    assert_eq!(s, state(&[0, 1], 10, &[]));
    assert!(!s.can_redo());
}

#[test]
fn draft_updates_then_commit() {
    // Drag preview: transient moves skip history, the drop is recorded.
    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    let mut adapter = HistoryAdapter::default();
    let mut s = adapter.get_initial_state(Point { x: 0, y: 0 });
    let moved = adapter.with_payload::<(i32, i32)>();

    let mut original = None;
    for step in 1..=5 {
        let prepared = moved.skip_history((step, step * 2));
        let action = Action::new("shape/preview", prepared.payload).with_meta(prepared.meta);
        adapter.apply_undoable(&mut s, &action, |p, a| {
            original.get_or_insert(p.clone());
            p.x = a.payload.0;
            p.y = a.payload.1;
        });
    }
    assert_eq!(s.past_len(), 0);
    assert_eq!(s.present, Point { x: 5, y: 10 });

    // Commit: restore the origin first so the frame records the pre-drag value.
    s.present = original.unwrap();
    let prepared = moved.undoable((5, 10));
    let action = Action::new("shape/drop", prepared.payload).with_meta(prepared.meta);
    adapter.apply_undoable(&mut s, &action, |p, a| {
        p.x = a.payload.0;
        p.y = a.payload.1;
    });
    assert_eq!(s.past, VecDeque::from([Point { x: 0, y: 0 }]));

    adapter.undo(&mut s);
    assert_eq!(s.present, Point { x: 0, y: 0 });
}

#[test]
fn clear_history_checkpoint() {
    let mut adapter = HistoryAdapter::default();
    let mut s = adapter.get_initial_state(String::from("a"));
    adapter.apply_undoable(&mut s, &UndoableMeta::default(), |t, _| t.push('b'));
    adapter.apply_undoable(&mut s, &UndoableMeta::default(), |t, _| t.push('c'));
    adapter.undo(&mut s);

    assert_eq!(adapter.clear_history(&mut s), 2);
    assert_eq!(s, HistoryState::new(String::from("ab")));
    assert_eq!(adapter.undo(&mut s), 0);
    assert_eq!(adapter.redo(&mut s), 0);
}
