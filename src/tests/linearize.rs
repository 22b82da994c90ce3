use super::*;

/// Builds `[0, 1, 2, 3, 4]` through a mix of front, back and middle
/// inserts so that physical order is scrambled.
fn scrambled() -> ArenaList<i32> {
    let mut list = checked(8);
    let two = list.insert_back(2).unwrap();
    list.insert_front(0).unwrap();
    list.insert_back(4).unwrap();
    list.insert_before(two, 3).unwrap();
    let zero = list.head().unwrap();
    list.insert_before(zero, 1).unwrap();
    list
}

#[test]
fn fixture_is_scrambled() {
    let list = scrambled();
    assert_eq!(contents(&list), vec![0, 1, 2, 3, 4]);
    assert!(!list.is_linearized());
}

#[test]
fn element_k_lands_in_slot_k() {
    let mut list = scrambled();
    list.linearize().unwrap();

    assert!(list.is_linearized());
    assert_eq!(list.head(), Some(Idx::from_raw(1)));
    assert_eq!(list.tail(), Some(Idx::from_raw(5)));
    for k in 1..=5 {
        let slot = list.logical_to_physical(k).unwrap();
        assert_eq!(slot, Idx::from_raw(k));
        assert_eq!(*list.get(slot).unwrap(), i32::try_from(k).unwrap() - 1);
    }
    assert!(list.violations().is_empty());
}

#[test]
fn translation_matches_walk() {
    let mut list = scrambled();
    let walked: Vec<_> = list.values().copied().collect();
    list.linearize().unwrap();

    for (k, value) in walked.iter().enumerate() {
        let slot = list.logical_to_physical(k + 1).unwrap();
        let (iter_slot, _) = list.iter().nth(k).unwrap();
        assert_eq!(slot, iter_slot);
        assert_eq!(list.get(slot).unwrap(), value);
    }
}

#[test]
fn idempotent() {
    let mut list = scrambled();
    list.linearize().unwrap();
    let first = list.snapshot().slots.to_vec();

    list.linearize().unwrap();
    assert!(list.is_linearized());
    assert_eq!(list.snapshot().slots, first.as_slice());
}

#[test]
fn free_chain_ascends_after_tail() {
    let mut list = checked(5);
    list.insert_back('a').unwrap();
    list.insert_back('b').unwrap();
    list.linearize().unwrap();

    let snap = list.snapshot();
    assert_eq!(snap.free_head, 3);
    assert_eq!(snap.slots[3].next, 4);
    assert_eq!(snap.slots[4].next, 5);
    assert_eq!(snap.slots[5].next, 0);
    assert_eq!(snap.slots[0].next, 1);
    assert_eq!(snap.slots[0].prev, 2);
    assert_eq!(snap.slots[1].prev, 0);
    assert_eq!(snap.slots[2].next, 0);
}

#[test]
fn empty_list() {
    let mut list: ArenaList<i32> = checked(3);
    list.linearize().unwrap();
    let snap = list.snapshot();
    assert_eq!(snap.free_head, 1);
    assert_eq!(snap.head, 0);
    assert_eq!(snap.tail, 0);
    assert!(snap.violations().is_empty());
}

#[test]
fn full_list_has_no_free_head() {
    let config = ListConfig::new(3)
        .with_verify(true)
        .with_auto_resize(false);
    let mut list = ArenaList::with_config(config).unwrap();
    list.insert_back(1).unwrap();
    list.insert_front(0).unwrap();
    list.insert_back(2).unwrap();
    list.linearize().unwrap();

    let snap = list.snapshot();
    assert_eq!(snap.free_head, 0);
    assert_eq!(snap.free_count, 0);
    assert_eq!(contents(&list), vec![0, 1, 2]);
}

#[test]
fn moves_values_without_cloning() {
    let drops = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let mut list = checked(4);
    list.insert_back(Tracked(std::rc::Rc::clone(&drops))).unwrap();
    list.insert_front(Tracked(std::rc::Rc::clone(&drops))).unwrap();
    list.insert_back(Tracked(std::rc::Rc::clone(&drops))).unwrap();

    list.linearize().unwrap();
    assert_eq!(drops.get(), 0);
    assert_eq!(list.len(), 3);
}
