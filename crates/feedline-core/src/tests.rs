use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::*;

#[test]
fn test_signal_basic() {
    let sig = signal(42);
    assert_eq!(sig.get(), 42);

    sig.set(100);
    assert_eq!(sig.get(), 100);

    sig.update(|v| *v += 1);
    assert_eq!(sig.get(), 101);
}

#[test]
fn test_signal_unsubscribe() {
    let sig = signal(0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let key = {
        let seen = seen.clone();
        sig.subscribe(move |v| seen.borrow_mut().push(*v))
    };
    sig.set(1);
    assert!(sig.unsubscribe(key));
    assert!(!sig.unsubscribe(key));
    sig.set(2);

    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(sig.subscriber_count(), 0);
}

#[test]
fn test_signal_subscriber_can_read() {
    let sig = signal(1);
    let doubled = Rc::new(Cell::new(0));
    {
        let reader = sig.clone();
        let doubled = doubled.clone();
        sig.subscribe(move |_| doubled.set(reader.get() * 2));
    }
    sig.set(21);
    assert_eq!(doubled.get(), 42);
}

#[test]
fn test_scope_explicit_dispose() {
    let cleaned_up = Rc::new(Cell::new(false));

    let scope = Scope::new();
    let cleaned_up_clone = cleaned_up.clone();
    scope.add_disposer(move || cleaned_up_clone.set(true));

    assert!(!cleaned_up.get());
    scope.dispose();
    assert!(cleaned_up.get());
}

#[test]
fn test_scope_children_dispose_first() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let parent = Scope::new();
    let child = parent.child();
    {
        let order = order.clone();
        parent.add_disposer(move || order.borrow_mut().push("parent"));
    }
    {
        let order = order.clone();
        child.add_disposer(move || order.borrow_mut().push("child"));
    }
    parent.dispose();
    assert_eq!(*order.borrow(), vec!["child", "parent"]);
}

#[test]
fn test_dispose_runs_once() {
    let count = Rc::new(Cell::new(0));
    let d = {
        let count = count.clone();
        Dispose::new(move || count.set(count.get() + 1))
    };
    d.run();
    d.run();
    assert_eq!(count.get(), 1);
    assert!(d.is_disposed());
}

#[test]
fn test_remember_survives_recomposition() {
    let mut composition = Composition::new();
    let first = composition.compose(|| remember(|| Cell::new(7)));
    first.set(8);
    let second = composition.compose(|| remember(|| Cell::new(7)));
    assert_eq!(second.get(), 8);
    assert_eq!(composition.passes(), 2);
}

#[test]
fn test_compositions_are_isolated() {
    let mut a = Composition::new();
    let mut b = Composition::new();
    let va = a.compose(|| remember(|| 1));
    let vb = b.compose(|| remember(|| 2));
    assert_eq!((*va, *vb), (1, 2));
    assert_eq!(*a.compose(|| remember(|| 0)), 1);
}

#[test]
fn test_key_based_remember() {
    let mut composition = Composition::new();
    let (val1, val2) = composition.compose(|| {
        (
            remember_with_key("test", || 42),
            remember_with_key("test", || 100),
        )
    });
    assert_eq!(*val1, 42);
    assert_eq!(*val2, 42);
}

#[test]
fn test_disposable_effect_reruns_on_key_change_and_unmount() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut composition = Composition::new();

    let pass = |composition: &mut Composition, key: u32| {
        let log = log.clone();
        composition.compose(move || {
            disposable_effect(key, move || {
                log.borrow_mut().push(format!("start {key}"));
                let log = log.clone();
                on_unmount(move || log.borrow_mut().push(format!("stop {key}")))
            });
        });
    };

    pass(&mut composition, 1);
    pass(&mut composition, 1);
    pass(&mut composition, 2);
    composition.dispose();

    assert_eq!(
        *log.borrow(),
        vec!["start 1", "stop 1", "start 2", "stop 2"]
    );
}

#[test]
fn test_dropping_composition_unmounts_effects() {
    let log = Rc::new(RefCell::new(Vec::<&str>::new()));
    {
        let mut composition = Composition::new();
        let log = log.clone();
        composition.compose(move || {
            let outer = log.clone();
            disposable_effect("outer", move || {
                on_unmount(move || outer.borrow_mut().push("outer"))
            });
            let child = current_scope().expect("root scope").child();
            child.run(|| {
                scoped_effect(move || on_unmount(move || log.borrow_mut().push("child")))
            });
        });
    }
    assert_eq!(*log.borrow(), vec!["child", "outer"]);
}

#[test]
fn test_subscriber_may_unsubscribe_during_notify() {
    let sig = signal(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(Cell::new(None));

    {
        let sig2 = sig.clone();
        let second = second.clone();
        let seen = seen.clone();
        sig.subscribe(move |v| {
            seen.borrow_mut().push(("first", *v));
            if let Some(key) = second.take() {
                sig2.unsubscribe(key);
            }
        });
    }
    {
        let seen = seen.clone();
        second.set(Some(sig.subscribe(move |v| seen.borrow_mut().push(("second", *v)))));
    }

    sig.set(1);
    sig.set(2);
    assert_eq!(*seen.borrow(), vec![("first", 1), ("first", 2)]);
    assert_eq!(sig.subscriber_count(), 1);
}

#[test]
fn test_subscriber_may_write_back() {
    let sig = signal(0);
    {
        let sig2 = sig.clone();
        sig.subscribe(move |v| {
            if *v > 10 {
                sig2.set(10);
            }
        });
    }
    sig.set(25);
    assert_eq!(sig.get(), 10);
}

#[test]
fn test_task_slot_latest_wins() {
    let slot = TaskSlot::new();
    let first = slot.replace();
    let second = slot.replace();
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert!(slot.is_active());

    slot.cancel();
    assert!(second.is_cancelled());
    assert!(!slot.is_active());
    assert_eq!(
        second.check_cancelled("color"),
        Err(Cancelled { stage: "color" })
    );
}

#[test]
fn test_color_from_hex() {
    let c = Color::from_hex("#FF5733");
    assert_eq!(c, Color(255, 87, 51, 255));

    let c_alpha = Color::from_hex("#FF5733AA");
    assert_eq!(c_alpha, Color(255, 87, 51, 170));

    assert_eq!(Color::from_hex("#zz"), Color::BLACK);
}

#[test]
fn test_gradient_sampling() {
    let brush = LinearGradient::vertical_two(Color::BLACK, Color::WHITE);
    assert_eq!(brush.color_at(0.0), Color::BLACK);
    assert_eq!(brush.color_at(1.0), Color::WHITE);
    assert_eq!(brush.color_at(0.5), Color(128, 128, 128, 255));
    assert_eq!(brush.color_at(-3.0), Color::BLACK);
}

#[test]
fn test_alpha_fraction() {
    assert_eq!(Color::WHITE.with_alpha_f32(0.5).3, 128);
    assert_eq!(Color::WHITE.with_alpha_f32(2.0).3, 255);
    assert_eq!(Color::WHITE.mul_alpha(0.0).3, 0);
}

#[test]
fn test_locals_default_and_override() {
    assert_eq!(window_width_class(), WindowWidthClass::Compact);
    with_window_width_class(WindowWidthClass::Expanded, || {
        assert_eq!(window_width_class(), WindowWidthClass::Expanded);
        with_platform_capabilities(
            PlatformCapabilities {
                supports_blur: false,
            },
            || {
                assert!(!platform_capabilities().supports_blur);
                assert_eq!(window_width_class(), WindowWidthClass::Expanded);
            },
        );
    });
    assert!(platform_capabilities().supports_blur);
}

#[test]
fn test_rect_contains() {
    let rect = Rect {
        x: 10.0,
        y: 10.0,
        w: 100.0,
        h: 50.0,
    };

    assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
    assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
    assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
}
