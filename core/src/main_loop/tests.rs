//! Tests for the main-loop bridge

use wasmtime::{Engine, Instance, Module, Store};

use super::*;

/// Table slot 0: increments `frames`; slot 1: wrong signature;
/// slot 2: traps; slot 3: null
const FRAME_MODULE: &str = r#"
    (module
        (global $frames (export "frames") (mut i32) (i32.const 0))
        (table (export "__indirect_function_table") 4 funcref)
        (func $frame
            global.get $frames
            i32.const 1
            i32.add
            global.set $frames)
        (func $takes_arg (param i32))
        (func $crash unreachable)
        (elem (i32.const 0) $frame $takes_arg $crash)
    )
"#;

struct Fixture {
    store: Store<MainLoop>,
    instance: Instance,
    table: Option<Table>,
}

fn fixture(wat: &str) -> Fixture {
    let engine = Engine::default();
    let module = Module::new(&engine, wat::parse_str(wat).unwrap()).unwrap();
    let mut store = Store::new(&engine, MainLoop::default());
    let instance = Instance::new(&mut store, &module, &[]).unwrap();
    let table = instance.get_table(&mut store, "__indirect_function_table");
    Fixture {
        store,
        instance,
        table,
    }
}

fn frames(fixture: &mut Fixture) -> i32 {
    let global = fixture
        .instance
        .get_global(&mut fixture.store, "frames")
        .unwrap();
    global.get(&mut fixture.store).unwrap_i32()
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_main_loop_default_inactive() {
    let main_loop = MainLoop::default();
    assert!(!main_loop.is_active());
    assert_eq!(main_loop.registered(), None);
}

#[test]
fn test_main_loop_set_replaces() {
    let mut main_loop = MainLoop::default();
    main_loop.set(3);
    main_loop.set(7);
    assert_eq!(main_loop.registered(), Some(7));
}

#[test]
fn test_main_loop_cancel() {
    let mut main_loop = MainLoop::default();
    main_loop.set(1);
    main_loop.cancel();
    assert!(!main_loop.is_active());
}

// ============================================================================
// Ticks
// ============================================================================

#[test]
fn test_tick_without_registration_is_idle() {
    // No table at all: an idle tick must not look one up
    let mut fixture = fixture("(module)");
    assert!(fixture.table.is_none());
    let outcome = run_tick(&mut fixture.store, fixture.table).unwrap();
    assert_eq!(outcome, TickOutcome::Idle);
}

#[test]
fn test_tick_after_cancel_is_idle() {
    let mut fixture = fixture("(module)");
    fixture.store.data_mut().set(0);
    fixture.store.data_mut().cancel();
    let outcome = run_tick(&mut fixture.store, fixture.table).unwrap();
    assert_eq!(outcome, TickOutcome::Idle);
}

#[test]
fn test_tick_runs_registered_function() {
    let mut fixture = fixture(FRAME_MODULE);
    fixture.store.data_mut().set(0);

    for _ in 0..3 {
        let outcome = run_tick(&mut fixture.store, fixture.table).unwrap();
        assert_eq!(outcome, TickOutcome::Ran);
    }
    assert_eq!(frames(&mut fixture), 3);
    assert!(fixture.store.data().is_active());
}

#[test]
fn test_tick_resolves_index_every_frame() {
    let mut fixture = fixture(FRAME_MODULE);
    fixture.store.data_mut().set(0);
    run_tick(&mut fixture.store, fixture.table).unwrap();

    // Point slot 0 at the trapping function; the next tick must pick it up
    let table = fixture.table.unwrap();
    let crash = table_entry(&mut fixture.store, table, 2).unwrap();
    table
        .set(&mut fixture.store, 0, wasmtime::Ref::Func(Some(crash)))
        .unwrap();

    let result = run_tick(&mut fixture.store, fixture.table);
    assert!(matches!(result, Err(MainLoopError::Trap(_))));
}

#[test]
fn test_tick_wrong_signature_cancels() {
    let mut fixture = fixture(FRAME_MODULE);
    fixture.store.data_mut().set(1);
    let result = run_tick(&mut fixture.store, fixture.table);
    assert!(matches!(
        result,
        Err(MainLoopError::WrongSignature { index: 1 })
    ));
    assert!(!fixture.store.data().is_active());
}

#[test]
fn test_tick_null_entry_cancels() {
    let mut fixture = fixture(FRAME_MODULE);
    fixture.store.data_mut().set(3);
    let result = run_tick(&mut fixture.store, fixture.table);
    assert!(matches!(result, Err(MainLoopError::MissingEntry { index: 3 })));
    assert!(!fixture.store.data().is_active());
}

#[test]
fn test_tick_index_past_table_end_cancels() {
    let mut fixture = fixture(FRAME_MODULE);
    fixture.store.data_mut().set(100);
    let result = run_tick(&mut fixture.store, fixture.table);
    assert!(matches!(
        result,
        Err(MainLoopError::MissingEntry { index: 100 })
    ));
    assert!(!fixture.store.data().is_active());
}

#[test]
fn test_tick_without_table_cancels() {
    let mut fixture = fixture("(module)");
    fixture.store.data_mut().set(0);
    let result = run_tick(&mut fixture.store, fixture.table);
    assert!(matches!(result, Err(MainLoopError::NoTable)));
    assert!(!fixture.store.data().is_active());
}

#[test]
fn test_tick_trap_is_reported() {
    let mut fixture = fixture(FRAME_MODULE);
    fixture.store.data_mut().set(2);
    let err = run_tick(&mut fixture.store, fixture.table).unwrap_err();
    assert!(matches!(err, MainLoopError::Trap(_)));
    assert!(err.to_string().starts_with("main loop callback trapped"));
}
