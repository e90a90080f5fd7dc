use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct SubscriptionKey;
}

#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: SlotMap<SubscriptionKey, Rc<dyn Fn(&T)>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
        })))
    }
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }
    /// Subscribers are called on every `set`/`update`, not on subscription.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionKey {
        self.0.borrow_mut().subs.insert(Rc::new(f))
    }
    /// Returns false if the key was already removed.
    pub fn unsubscribe(&self, key: SubscriptionKey) -> bool {
        self.0.borrow_mut().subs.remove(key).is_some()
    }
    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }
}

impl<T: Clone> Signal<T> {
    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    fn notify(&self) {
        // No borrow is held while a subscriber runs, so subscribers may
        // subscribe, unsubscribe or set this signal. Keys removed during the
        // pass are skipped; keys added during it wait for the next change.
        let (value, keys) = {
            let inner = self.0.borrow();
            (inner.value.clone(), inner.subs.keys().collect::<Vec<_>>())
        };
        for key in keys {
            let sub = self.0.borrow().subs.get(key).cloned();
            if let Some(sub) = sub {
                sub(&value);
            }
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
