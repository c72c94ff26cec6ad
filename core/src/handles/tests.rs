//! Tests for the handle registry

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

/// Records every disposal into a shared log
#[derive(Debug)]
struct Tracked {
    id: u32,
    log: Rc<RefCell<Vec<u32>>>,
}

impl Dispose for Tracked {
    fn dispose(self) {
        self.log.borrow_mut().push(self.id);
    }
}

fn tracked(id: u32, log: &Rc<RefCell<Vec<u32>>>) -> Tracked {
    Tracked {
        id,
        log: Rc::clone(log),
    }
}

#[test]
fn test_handles_start_at_one_and_increase() {
    let log = Rc::default();
    let mut registry = HandleRegistry::new();
    assert_eq!(registry.register(tracked(10, &log)), 1);
    assert_eq!(registry.register(tracked(20, &log)), 2);
    assert_eq!(registry.register(tracked(30, &log)), 3);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.high_water_mark(), 3);
}

#[test]
fn test_resolve_returns_registered_object() {
    let log = Rc::default();
    let mut registry = HandleRegistry::new();
    let a = registry.register(tracked(7, &log));
    let b = registry.register(tracked(8, &log));
    assert_eq!(registry.get(a).unwrap().id, 7);
    assert_eq!(registry.get(b).unwrap().id, 8);

    registry.get_mut(a).unwrap().id = 70;
    assert_eq!(registry.get(a).unwrap().id, 70);
}

#[test]
fn test_null_and_unknown_handles_resolve_to_none() {
    let log = Rc::default();
    let mut registry = HandleRegistry::new();
    registry.register(tracked(1, &log));
    assert!(registry.get(0).is_none());
    assert!(registry.get_mut(0).is_none());
    assert!(registry.get(2).is_none());
    assert!(registry.get(u32::MAX).is_none());
    assert!(!registry.contains(0));
}

#[test]
fn test_release_disposes_exactly_once() {
    let log: Rc<RefCell<Vec<u32>>> = Rc::default();
    let mut registry = HandleRegistry::new();
    let handle = registry.register(tracked(5, &log));

    assert!(registry.release(handle));
    assert!(registry.get(handle).is_none());
    assert!(!registry.release(handle));
    assert!(!registry.release(handle));
    assert_eq!(*log.borrow(), vec![5]);
    assert!(registry.is_empty());
}

#[test]
fn test_release_of_null_or_unknown_is_noop() {
    let log: Rc<RefCell<Vec<u32>>> = Rc::default();
    let mut registry = HandleRegistry::new();
    registry.register(tracked(1, &log));

    assert!(!registry.release(0));
    assert!(!registry.release(99));
    assert!(log.borrow().is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_take_does_not_dispose() {
    let log: Rc<RefCell<Vec<u32>>> = Rc::default();
    let mut registry = HandleRegistry::new();
    let handle = registry.register(tracked(3, &log));

    let taken = registry.take(handle).unwrap();
    assert_eq!(taken.id, 3);
    assert!(registry.take(handle).is_none());
    assert!(!registry.release(handle));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_handles_are_never_reused() {
    let log = Rc::default();
    let mut registry = HandleRegistry::new();
    let first = registry.register(tracked(1, &log));
    registry.release(first);
    let second = registry.register(tracked(2, &log));
    assert_ne!(first, second);
    assert!(registry.get(first).is_none());
    assert_eq!(registry.get(second).unwrap().id, 2);
}

#[test]
fn test_iter_skips_released() {
    let log = Rc::default();
    let mut registry = HandleRegistry::new();
    let a = registry.register(tracked(1, &log));
    let b = registry.register(tracked(2, &log));
    let c = registry.register(tracked(3, &log));
    registry.release(b);

    let live: Vec<(Handle, u32)> = registry.iter().map(|(h, p)| (h, p.id)).collect();
    assert_eq!(live, vec![(a, 1), (c, 3)]);
}

#[test]
fn test_clear_disposes_newest_first() {
    let log: Rc<RefCell<Vec<u32>>> = Rc::default();
    let mut registry = HandleRegistry::new();
    registry.register(tracked(1, &log));
    let b = registry.register(tracked(2, &log));
    registry.register(tracked(3, &log));
    registry.release(b);
    log.borrow_mut().clear();

    registry.clear();
    assert_eq!(*log.borrow(), vec![3, 1]);
    assert!(registry.is_empty());
    assert_eq!(registry.register(tracked(4, &log)), 4);
}
