use std::cell::Cell;
use std::rc::Rc;

use super::*;

struct Tracked(Rc<Cell<u32>>);

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

/// List with the checker forced on, independent of the build profile.
fn checked<T>(capacity: usize) -> ArenaList<T> {
    ArenaList::with_config(ListConfig::new(capacity).with_verify(true)).unwrap()
}

fn contents<T: Clone>(list: &ArenaList<T>) -> Vec<T> {
    list.values().cloned().collect()
}

mod linearize;
mod props;
