//! Generators invoking generators: yields must return to the most recent
//! invoker, not to whoever started the chain.

use std::cell::RefCell;
use std::rc::Rc;

use cogen_runtime::{
    ContextId, Generator, Step, current_generator, make_generator, suspension_depth,
    suspension_records, yield_,
};

fn leaf(values: Vec<i64>) -> Generator<(), i64> {
    make_generator(move |_| {
        for value in values.iter().copied() {
            yield_::<i64, ()>(value)?;
        }
        Ok(())
    })
    .unwrap()
}

#[test]
fn inner_yield_returns_to_outer_body() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let outer_log = Rc::clone(&log);

    let outer: Generator<(), i64> = make_generator(move |_| {
        // Built and drained entirely inside the outer body.
        let inner = leaf(vec![1, 2, 3]);
        assert_eq!(inner.creator(), current_generator().unwrap());
        while let Step::Yielded(values) = inner.resume([])? {
            let value = values.into_single()?;
            outer_log.borrow_mut().push(format!("outer got {value}"));
            yield_::<i64, ()>(value * 10)?;
        }
        outer_log.borrow_mut().push("inner drained".to_string());
        yield_::<i64, ()>(-1)?;
        Ok(())
    })
    .unwrap();

    let mut seen = Vec::new();
    loop {
        match outer.resume([]).unwrap() {
            Step::Yielded(values) => seen.push(values.into_single().unwrap()),
            Step::Completed => break,
        }
        log.borrow_mut().push("root resumed".to_string());
    }

    assert_eq!(seen, vec![10, 20, 30, -1]);
    assert_eq!(
        *log.borrow(),
        vec![
            "outer got 1",
            "root resumed",
            "outer got 2",
            "root resumed",
            "outer got 3",
            "root resumed",
            "inner drained",
            "root resumed",
        ]
    );
    assert_eq!(suspension_depth(), 0);
}

#[test]
fn suspension_stack_tracks_the_invocation_chain() {
    // Each level reports the records visible while it runs.
    fn level(depth: usize) -> Generator<(), Vec<(ContextId, ContextId)>> {
        make_generator(move |_| {
            let here: Vec<_> = suspension_records()
                .iter()
                .map(|record| (record.generator, record.resume))
                .collect();
            let deeper = if depth == 0 {
                here
            } else {
                let child = level(depth - 1);
                child.call_one([])?
            };
            yield_::<Vec<(ContextId, ContextId)>, ()>(deeper)?;
            Ok(())
        })
        .unwrap()
    }

    let top = level(2);
    let chain = top.call_one([]).unwrap();

    // Seen from the innermost body: three records, each resumed by the one below.
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0], (top.id(), ContextId::ROOT));
    assert_eq!(chain[1].1, chain[0].0);
    assert_eq!(chain[2].1, chain[1].0);
    assert_eq!(suspension_depth(), 0);
}

#[test]
fn interleaved_sibling_generators_keep_their_own_state() {
    let evens: Generator<(), i64> = make_generator(|_| {
        let mut n = 0;
        loop {
            yield_::<i64, ()>(n)?;
            n += 2;
        }
    })
    .unwrap();
    let odds: Generator<(), i64> = make_generator(|_| {
        let mut n = 1;
        loop {
            yield_::<i64, ()>(n)?;
            n += 2;
        }
    })
    .unwrap();

    let zipper: Generator<(), (i64, i64)> = make_generator(move |_| {
        loop {
            let pair = (evens.call_one([])?, odds.call_one([])?);
            yield_::<(i64, i64), ()>(pair)?;
        }
    })
    .unwrap();

    assert_eq!(zipper.call_one([]).unwrap(), (0, 1));
    assert_eq!(zipper.call_one([]).unwrap(), (2, 3));
    assert_eq!(zipper.call_one([]).unwrap(), (4, 5));
}

#[test]
fn generator_handle_can_move_between_invokers() {
    // A generator first driven from the root, then from inside another
    // generator, yields back to whichever context invoked it last.
    let shared = leaf(vec![7, 8, 9, 10]);
    assert_eq!(shared.call_one([]).unwrap(), 7);

    let relay_source = shared.clone();
    let relay: Generator<(), i64> = make_generator(move |_| {
        let value = relay_source.call_one([])?;
        assert_eq!(current_generator(), Some(ContextId::current()));
        yield_::<i64, ()>(value + 100)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(relay.call_one([]).unwrap(), 108);
    assert_eq!(shared.call_one([]).unwrap(), 9);
}
