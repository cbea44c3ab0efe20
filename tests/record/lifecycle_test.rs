/*!
 * Record Lifecycle Tests
 * Exactly-once teardown, leak accounting and replacement semantics
 */

use flow_record::{ExecutionContext, KeyHandle, RecordError, RecordType};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingHandle {
    closed: Arc<AtomicUsize>,
}

impl KeyHandle for CountingHandle {
    fn name(&self) -> &[u8] {
        b"counted"
    }

    fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn counting_handle(closed: &Arc<AtomicUsize>) -> Box<dyn KeyHandle> {
    Box::new(CountingHandle {
        closed: closed.clone(),
    })
}

#[test]
fn test_list_of_three_strings_frees_everything_once() {
    let ctx = ExecutionContext::default();
    let mut list = ctx.list().unwrap();
    for value in ["a", "b", "c"] {
        list.list_push(ctx.string(value).unwrap()).unwrap();
    }

    let before = ctx.native_stats().snapshot();
    assert_eq!(before.nodes_allocated, 4);
    assert_eq!(before.nodes_released, 0);

    list.free();

    let after = ctx.native_stats().snapshot();
    assert_eq!(after.buffers_released, 3);
    assert_eq!(after.nodes_released, 4);
    assert_eq!(after.sequences_released, 1);
    assert!(after.is_balanced());
}

#[test]
fn test_nested_containers_balance() {
    let ctx = ExecutionContext::default();
    let mut inner = ctx.list().unwrap();
    inner.list_push(ctx.long(1).unwrap()).unwrap();
    inner.list_push(ctx.double(2.0).unwrap()).unwrap();

    let mut set = ctx.hash_set().unwrap();
    set.hash_set_set("inner", inner).unwrap();

    let key = ctx.key_with("outer", Some(set)).unwrap();
    assert_eq!(ctx.native_stats().live_nodes(), 5);

    drop(key);
    let snapshot = ctx.native_stats().snapshot();
    assert!(snapshot.is_balanced());
    assert_eq!(snapshot.tables_released, 1);
    assert_eq!(snapshot.sequences_released, 1);
    assert_eq!(snapshot.buffers_released, 1); // key name
}

#[test]
fn test_popped_element_outlives_list() {
    let ctx = ExecutionContext::default();
    let mut list = ctx.list().unwrap();
    list.list_push(ctx.string("kept").unwrap()).unwrap();
    let kept = list.list_pop().unwrap().unwrap();

    drop(list);
    assert_eq!(ctx.native_stats().snapshot().buffers_released, 0);
    assert_eq!(kept.string().unwrap(), b"kept");

    drop(kept);
    assert!(ctx.native_stats().snapshot().is_balanced());
}

#[test]
fn test_hash_set_replace_closes_superseded_handle_once() {
    let closed = Arc::new(AtomicUsize::new(0));
    let ctx = ExecutionContext::default();
    let mut set = ctx.hash_set().unwrap();

    set.hash_set_set("k", ctx.key_handler(counting_handle(&closed)).unwrap())
        .unwrap();
    set.hash_set_set("k", ctx.long(9).unwrap()).unwrap();

    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert_eq!(set.hash_set_get("k").unwrap().unwrap().long().unwrap(), 9);

    drop(set);
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert!(ctx.native_stats().snapshot().is_balanced());
}

#[test]
fn test_key_handler_in_list_closed_on_teardown() {
    let closed = Arc::new(AtomicUsize::new(0));
    let ctx = ExecutionContext::default();
    let mut list = ctx.list().unwrap();
    list.list_push(ctx.key_handler(counting_handle(&closed)).unwrap())
        .unwrap();
    list.list_push(ctx.key_handler(counting_handle(&closed)).unwrap())
        .unwrap();

    drop(list);
    assert_eq!(closed.load(Ordering::SeqCst), 2);
    assert_eq!(ctx.native_stats().snapshot().handles_closed, 2);
}

#[test]
fn test_allocation_failure_is_reported() {
    let config = flow_record::RecordConfig::default().with_max_live_records(2);
    let ctx = ExecutionContext::new(config);
    let mut list = ctx.list().unwrap();
    list.list_push(ctx.long(1).unwrap()).unwrap();

    let err = ctx.string("overflow").unwrap_err();
    assert!(err.is_exhaustion());

    drop(list);
    assert!(ctx.string("fits").is_ok());
}

#[test]
fn test_wrong_variant_access_is_rejected() {
    let ctx = ExecutionContext::default();
    let set = ctx.hash_set().unwrap();
    assert_eq!(
        set.list_len().unwrap_err(),
        RecordError::TypeMismatch {
            expected: RecordType::List,
            actual: RecordType::HashSet,
        }
    );
    assert!(set.key_handler().is_err());
}
