use proptest::prelude::*;

use super::*;

#[derive(Clone, Debug)]
enum Op {
    Front(i32),
    Back(i32),
    After(usize, i32),
    Erase(usize),
    Set(usize, i32),
    Linearize,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Front),
        any::<i32>().prop_map(Op::Back),
        (any::<usize>(), any::<i32>()).prop_map(|(at, v)| Op::After(at, v)),
        any::<usize>().prop_map(Op::Erase),
        any::<usize>().prop_map(Op::Erase),
        (any::<usize>(), any::<i32>()).prop_map(|(at, v)| Op::Set(at, v)),
        Just(Op::Linearize),
    ]
}

/// Applies `ops` to both a list and a `Vec` model.
fn run(list: &mut ArenaList<i32>, model: &mut Vec<i32>, ops: &[Op]) -> Result<(), TestCaseError> {
    for op in ops {
        match *op {
            Op::Front(v) => {
                list.insert_front(v).unwrap();
                model.insert(0, v);
            }
            Op::Back(v) => {
                list.insert_back(v).unwrap();
                model.push(v);
            }
            Op::After(at, v) if !model.is_empty() => {
                let k = at % model.len();
                let pos = list.logical_to_physical(k + 1).unwrap();
                list.insert_before(pos, v).unwrap();
                model.insert(k + 1, v);
            }
            Op::Erase(at) if !model.is_empty() => {
                let k = at % model.len();
                let pos = list.logical_to_physical(k + 1).unwrap();
                prop_assert_eq!(list.erase(pos).unwrap(), model.remove(k));
            }
            Op::Set(at, v) if !model.is_empty() => {
                let k = at % model.len();
                let pos = list.logical_to_physical(k + 1).unwrap();
                let old = list.set(pos, v).unwrap();
                prop_assert_eq!(old, std::mem::replace(&mut model[k], v));
            }
            Op::Linearize => {
                list.linearize().unwrap();
                prop_assert!(list.is_linearized());
            }
            Op::After(..) | Op::Erase(_) | Op::Set(..) => {}
        }

        prop_assert!(list.violations().is_empty(), "{}", list.violations());
        prop_assert_eq!(list.len(), model.len());
        prop_assert_eq!(list.free_count(), list.capacity() - list.len());
    }
    Ok(())
}

proptest! {
    #[test]
    fn matches_vec_model(ops in proptest::collection::vec(op(), 1..200)) {
        let mut list = checked(2);
        let mut model = Vec::new();
        run(&mut list, &mut model, &ops)?;

        prop_assert_eq!(contents(&list), model.clone());
        let reversed: Vec<i32> = list.values().rev().copied().collect();
        model.reverse();
        prop_assert_eq!(reversed, model);
    }

    #[test]
    fn linearized_translation_matches_walk(ops in proptest::collection::vec(op(), 1..100)) {
        let mut list = checked(4);
        let mut model = Vec::new();
        run(&mut list, &mut model, &ops)?;

        let walked: Vec<_> = (1..=list.len())
            .map(|k| *list.get(list.logical_to_physical(k).unwrap()).unwrap())
            .collect();
        prop_assert_eq!(&walked, &model);

        list.linearize().unwrap();
        let head = list.head().map_or(0, Idx::into_raw);
        for (k, expected) in model.iter().enumerate() {
            let slot = list.logical_to_physical(k + 1).unwrap();
            prop_assert_eq!(slot.into_raw(), head + k);
            prop_assert_eq!(list.get(slot).unwrap(), expected);
        }
    }

    #[test]
    fn linearize_twice_is_stable(ops in proptest::collection::vec(op(), 1..100)) {
        let mut list = checked(3);
        let mut model = Vec::new();
        run(&mut list, &mut model, &ops)?;

        list.linearize().unwrap();
        let first = list.snapshot().slots.to_vec();
        list.linearize().unwrap();
        prop_assert_eq!(list.snapshot().slots, first.as_slice());
    }

    #[test]
    fn insert_erase_round_trip(
        ops in proptest::collection::vec(op(), 1..60),
        at in any::<usize>(),
        v in any::<i32>(),
    ) {
        let mut list = checked(3);
        let mut model = Vec::new();
        run(&mut list, &mut model, &ops)?;
        list.reserve(1).unwrap();
        let (size, free, capacity) = (list.len(), list.free_count(), list.capacity());

        let slot = if model.is_empty() {
            list.insert_front(v).unwrap()
        } else {
            let pos = list.logical_to_physical(at % model.len() + 1).unwrap();
            list.insert_before(pos, v).unwrap()
        };
        prop_assert_eq!(list.erase(slot).unwrap(), v);

        prop_assert_eq!(list.len(), size);
        if list.capacity() == capacity {
            prop_assert_eq!(list.free_count(), free);
        }
        prop_assert_eq!(contents(&list), model);
    }
}
