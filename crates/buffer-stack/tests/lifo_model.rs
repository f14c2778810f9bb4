//! Model-based checks of `BufferStack` against a plain `Vec` used as a stack.

use std::num::NonZeroUsize;

use procstack_buffer_stack::{BufferStack, StackError};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(Vec<u8>),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..32).prop_map(Op::Push),
        Just(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn mixed_operations_follow_stack_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let stack = BufferStack::new(NonZeroUsize::new(capacity).unwrap()).unwrap();
        let mut model: Vec<Vec<u8>> = Vec::new();

        for op in ops {
            match op {
                Op::Push(payload) => {
                    let result = stack.push(&payload);
                    if model.len() == capacity {
                        prop_assert_eq!(result, Err(StackError::Full));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        model.push(payload);
                    }
                }
                Op::Pop => match model.pop() {
                    Some(expected) => {
                        let item = stack.pop().unwrap();
                        prop_assert_eq!(item.as_bytes(), expected.as_slice());
                    }
                    None => {
                        prop_assert_eq!(stack.pop(), Err(StackError::Empty));
                    }
                },
            }
            prop_assert_eq!(stack.len(), model.len());
        }
    }

    #[test]
    fn push_then_pop_returns_same_bytes(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 1..16),
    ) {
        let stack = BufferStack::new(NonZeroUsize::new(payloads.len()).unwrap()).unwrap();
        for payload in &payloads {
            stack.push(payload).unwrap();
            let item = stack.pop().unwrap();
            prop_assert_eq!(item.as_bytes(), payload.as_slice());
            stack.push(payload).unwrap();
        }
        prop_assert!(stack.is_full());
    }

    #[test]
    fn count_tracks_pushes_minus_pops(
        pushes in 1usize..20,
        pops in 0usize..20,
    ) {
        let pops = pops.min(pushes);
        let stack = BufferStack::new(NonZeroUsize::new(pushes).unwrap()).unwrap();
        for i in 0..pushes {
            stack.push(&(i as u32 + 1).to_le_bytes()).unwrap();
        }
        for _ in 0..pops {
            stack.pop().unwrap();
        }
        prop_assert_eq!(stack.len(), pushes - pops);
        match stack.pop() {
            Ok(item) => {
                let n = u32::from_le_bytes(item.as_bytes().try_into().unwrap());
                prop_assert_eq!(n as usize, pushes - pops);
            }
            Err(e) => {
                prop_assert_eq!(e, StackError::Empty);
                prop_assert_eq!(pushes, pops);
            }
        }
    }

    #[test]
    fn teardown_releases_every_stored_item(
        capacity in 1usize..16,
        stored in 0usize..16,
    ) {
        let stored = stored.min(capacity);
        let mut stack = BufferStack::new(NonZeroUsize::new(capacity).unwrap()).unwrap();
        for _ in 0..stored {
            stack.push(b"item").unwrap();
        }
        prop_assert_eq!(stack.teardown(), stored);
        prop_assert!(stack.is_empty());
    }
}
