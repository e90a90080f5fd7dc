use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// A composed UI tree's remembered state plus the scope its effects live in.
///
/// `compose` runs one recomposition pass: slots are swapped into the
/// thread's composer, the cursor is reset, and `f` runs inside the root scope.
/// Dropping it (or calling `dispose`) is the unmount: every registered
/// effect cleanup runs once.
pub struct Composition {
    scope: Scope,
    slots: Vec<Box<dyn Any>>,
    keyed_slots: HashMap<String, Box<dyn Any>>,
    passes: u64,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(),
            slots: Vec::new(),
            keyed_slots: HashMap::new(),
            passes: 0,
        }
    }

    pub fn compose<R>(&mut self, f: impl FnOnce() -> R) -> R {
        struct Swap<'a> {
            slots: &'a mut Vec<Box<dyn Any>>,
            keyed: &'a mut HashMap<String, Box<dyn Any>>,
            cursor: usize,
        }
        impl Drop for Swap<'_> {
            fn drop(&mut self) {
                COMPOSER.with(|c| {
                    let mut c = c.borrow_mut();
                    std::mem::swap(&mut c.slots, self.slots);
                    std::mem::swap(&mut c.keyed_slots, self.keyed);
                    c.cursor = self.cursor;
                });
            }
        }

        let cursor = COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            std::mem::swap(&mut c.slots, &mut self.slots);
            std::mem::swap(&mut c.keyed_slots, &mut self.keyed_slots);
            std::mem::replace(&mut c.cursor, 0)
        });
        self.passes += 1;
        let _swap = Swap {
            slots: &mut self.slots,
            keyed: &mut self.keyed_slots,
            cursor,
        };
        self.scope.run(f)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Unmounts now. Dropping the composition does the same.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for Composition {
    fn drop(&mut self) {
        // Children first, then the root's own disposers. Scope disposal takes
        // both lists, so a second pass finds nothing to run.
        self.scope.clone().dispose();
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}
