//! Tests for module analysis

use super::*;

fn analyze(wat: &str) -> ModuleReport {
    analyze_module(&wat::parse_str(wat).unwrap()).unwrap()
}

const TRIANGLE: &str = r#"
    (module
        (import "env" "wgpuCreateInstance" (func (param i32) (result i32)))
        (import "env" "wgpuInstanceRequestAdapter" (func (param i32 i32 i32 i32)))
        (import "env" "easel_set_main_loop" (func (param i32)))
        (import "env" "easel_log" (func (param i32 i32)))
        (memory (export "memory") 17)
        (table (export "__indirect_function_table") 2 funcref)
        (func (export "_start"))
        (func (export "easel_on_resize") (param i32 i32))
        (func (export "easel_on_quit"))
    )
"#;

// ============================================================================
// Report contents
// ============================================================================

#[test]
fn test_lists_imports_and_exports() {
    let report = analyze(TRIANGLE);
    assert_eq!(report.imports.len(), 4);
    assert_eq!(report.imports[0].module, "env");
    assert_eq!(report.imports[0].name, "wgpuCreateInstance");
    assert_eq!(report.imports[0].kind, ItemKind::Func);

    assert!(report.exports_item("memory", ItemKind::Memory));
    assert!(report.exports_item("__indirect_function_table", ItemKind::Table));
    assert!(report.has_function("_start"));
    assert!(!report.has_function("memory"));
}

#[test]
fn test_memory_min_pages() {
    assert_eq!(analyze(TRIANGLE).memory_min_pages, Some(17));
    assert_eq!(analyze("(module)").memory_min_pages, None);

    let imported = analyze(r#"(module (import "env" "memory" (memory 3)))"#);
    assert_eq!(imported.memory_min_pages, Some(3));
    assert_eq!(imported.imports[0].kind, ItemKind::Memory);
}

#[test]
fn test_bridge_features() {
    let report = analyze(TRIANGLE);
    assert_eq!(
        report.gpu_imports,
        vec!["wgpuCreateInstance", "wgpuInstanceRequestAdapter"]
    );
    assert!(report.uses_main_loop);
    assert_eq!(report.event_handlers, vec!["easel_on_resize", "easel_on_quit"]);
}

#[test]
fn test_cancel_alone_counts_as_main_loop() {
    let report = analyze(
        r#"(module (import "env" "easel_cancel_main_loop" (func)) (memory (export "memory") 1))"#,
    );
    assert!(report.uses_main_loop);
    assert!(report.gpu_imports.is_empty());
}

// ============================================================================
// Contract problems
// ============================================================================

#[test]
fn test_well_formed_module_has_no_problems() {
    assert!(analyze(TRIANGLE).problems().is_empty());
}

#[test]
fn test_foreign_import() {
    let report = analyze(
        r#"
        (module
            (import "wasi_snapshot_preview1" "fd_write" (func (param i32 i32 i32 i32) (result i32)))
            (memory (export "memory") 1)
        )
    "#,
    );
    assert_eq!(
        report.problems(),
        vec![ContractProblem::ForeignImport {
            module: "wasi_snapshot_preview1".into(),
            name: "fd_write".into(),
        }]
    );
}

#[test]
fn test_callbacks_without_table() {
    let report = analyze(
        r#"
        (module
            (import "env" "easel_set_main_loop" (func (param i32)))
            (import "env" "wgpuAdapterRequestDevice" (func (param i32 i32 i32 i32)))
            (import "env" "wgpuCreateInstance" (func (param i32) (result i32)))
            (memory (export "memory") 1)
        )
    "#,
    );
    let problems = report.problems();
    assert_eq!(problems.len(), 2);
    assert!(problems.contains(&ContractProblem::CallbackWithoutTable {
        import: "easel_set_main_loop".into()
    }));
    assert!(problems.contains(&ContractProblem::CallbackWithoutTable {
        import: "wgpuAdapterRequestDevice".into()
    }));
}

#[test]
fn test_missing_memory_export() {
    let report = analyze("(module (memory 1))");
    assert_eq!(report.problems(), vec![ContractProblem::MissingMemoryExport]);
    assert!(
        ContractProblem::MissingMemoryExport
            .to_string()
            .contains("'memory'")
    );
}

#[test]
fn test_invalid_bytes() {
    let err = analyze_module(b"not wasm").unwrap_err();
    assert!(matches!(err, AnalysisError::ParseError(_)));
}
