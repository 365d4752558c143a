//! Transfers between the root context and allocated contexts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cogen_context::{ContextError, ContextId, ExecutionContext, StackConfig, Transfer, Yielder};

#[test]
fn values_flow_both_ways() {
    let mut ctx = ExecutionContext::new(&StackConfig::default(), |yielder, input: i32| {
        let next = yielder.suspend(input * 2);
        let next2 = yielder.suspend(next * 3);
        next2 + 1
    })
    .unwrap();

    assert_eq!(ctx.transfer(5).unwrap(), Transfer::Suspended(10));
    assert_eq!(ctx.transfer(4).unwrap(), Transfer::Suspended(12));
    assert_eq!(ctx.transfer(99).unwrap(), Transfer::Finished(100));
}

#[test]
fn immediate_return() {
    let mut ctx = ExecutionContext::new(
        &StackConfig::default(),
        |_yielder: &Yielder<i32, i32>, input: i32| input + 42,
    )
    .unwrap();

    assert_eq!(ctx.transfer(0).unwrap(), Transfer::Finished(42));
}

#[test]
fn current_tracks_the_running_context() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);

    let mut ctx = ExecutionContext::new(
        &StackConfig::default(),
        move |yielder: &Yielder<(), ()>, ()| {
            record.borrow_mut().push(ContextId::current());
            yielder.suspend(());
            record.borrow_mut().push(ContextId::current());
        },
    )
    .unwrap();
    let id = ctx.id();

    assert_eq!(ContextId::current(), ContextId::ROOT);
    ctx.transfer(()).unwrap();
    assert_eq!(ContextId::current(), ContextId::ROOT);
    ctx.transfer(()).unwrap();
    assert_eq!(ContextId::current(), ContextId::ROOT);

    assert_eq!(*seen.borrow(), vec![id, id]);
}

#[test]
fn nested_contexts_return_to_their_caller() {
    let mut outer = ExecutionContext::new(
        &StackConfig::default(),
        |yielder: &Yielder<(), ContextId>, ()| {
            let outer_id = ContextId::current();
            let mut inner = ExecutionContext::new(
                &StackConfig::default(),
                |yielder: &Yielder<(), ContextId>, ()| {
                    yielder.suspend(ContextId::current());
                },
            )
            .unwrap();

            // Inner suspension lands back here, not in the root context.
            let inner_id = match inner.transfer(()).unwrap() {
                Transfer::Suspended(id) => id,
                Transfer::Finished(()) => panic!("inner finished early"),
            };
            assert_eq!(ContextId::current(), outer_id);
            yielder.suspend(inner_id);
            yielder.suspend(outer_id);
        },
    )
    .unwrap();
    let outer_id = outer.id();

    let inner_id = match outer.transfer(()).unwrap() {
        Transfer::Suspended(id) => id,
        Transfer::Finished(()) => panic!("outer finished early"),
    };
    assert_ne!(inner_id, outer_id);
    assert_eq!(outer.transfer(()).unwrap(), Transfer::Suspended(outer_id));
    assert_eq!(outer.transfer(()).unwrap(), Transfer::Finished(()));
}

#[test]
fn panic_is_reported_and_finishes_the_context() {
    let mut ctx = ExecutionContext::new(
        &StackConfig::default(),
        |yielder: &Yielder<(), i32>, ()| {
            yielder.suspend(1);
            panic!("body exploded");
        },
    )
    .unwrap();
    let id = ctx.id();

    assert_eq!(ctx.transfer(()).unwrap(), Transfer::Suspended(1));
    match ctx.transfer(()) {
        Err(ContextError::Panicked {
            id: reported,
            message,
        }) => {
            assert_eq!(reported, id);
            assert_eq!(message, "body exploded");
        }
        other => panic!("expected Panicked, got {other:?}"),
    }
    assert!(ctx.is_finished());
    assert!(matches!(ctx.transfer(()), Err(ContextError::Finished { .. })));
    assert_eq!(ContextId::current(), ContextId::ROOT);
}

#[test]
fn dropping_suspended_context_drops_body_locals() {
    struct SetOnDrop(Rc<Cell<bool>>);
    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    let dropped = Rc::new(Cell::new(false));
    let guard = SetOnDrop(Rc::clone(&dropped));

    let mut ctx = ExecutionContext::new(
        &StackConfig::default(),
        move |yielder: &Yielder<(), ()>, ()| {
            let _guard = guard;
            yielder.suspend(());
            yielder.suspend(());
        },
    )
    .unwrap();

    ctx.transfer(()).unwrap();
    assert!(!dropped.get());
    drop(ctx);
    assert!(dropped.get());
}

#[test]
fn oversized_stack_fails_to_allocate() {
    let result = ExecutionContext::new(
        &StackConfig::new(1 << 60),
        |_yielder: &Yielder<(), ()>, ()| {},
    );
    assert!(matches!(
        result,
        Err(ContextError::StackAllocation { size, .. }) if size == 1 << 60
    ));
}
