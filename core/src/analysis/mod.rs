//! Static analysis of compiled modules
//!
//! Reads a module's import and export sections without instantiating it,
//! reporting which bridge features it uses and whether it satisfies the
//! contract the bridge expects (imports from `env`, an exported linear
//! memory, a function table whenever callbacks are registered).
//!
//! # Example
//!
//! ```ignore
//! use easel_core::analysis::analyze_module;
//!
//! let bytes = std::fs::read("triangle.wasm")?;
//! let report = analyze_module(&bytes)?;
//! for problem in report.problems() {
//!     eprintln!("{problem}");
//! }
//! ```

use std::fmt;

use easel_shared::names::{
    CALLBACK_IMPORTS, CANCEL_MAIN_LOOP, EVENT_EXPORTS, FUNCTION_TABLE_EXPORT, GPU_IMPORT_PREFIX,
    IMPORT_MODULE, MEMORY_EXPORT, SET_MAIN_LOOP,
};
use wasmparser::{ExternalKind, Parser, Payload, TypeRef};

#[cfg(test)]
mod tests;

/// What an import or export refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Func,
    Memory,
    Table,
    Global,
    Other,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Func => "func",
            Self::Memory => "memory",
            Self::Table => "table",
            Self::Global => "global",
            Self::Other => "other",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub module: String,
    pub name: String,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub name: String,
    pub kind: ItemKind,
}

/// A contract violation found before instantiation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractProblem {
    #[error("import {module}::{name} is not from the 'env' module")]
    ForeignImport { module: String, name: String },

    #[error(
        "{import} takes a callback index but the module exports no '__indirect_function_table'"
    )]
    CallbackWithoutTable { import: String },

    #[error("module does not export its linear memory as 'memory'")]
    MissingMemoryExport,
}

/// Result of analyzing a module's sections
#[derive(Debug, Clone, Default)]
pub struct ModuleReport {
    pub imports: Vec<ImportEntry>,
    pub exports: Vec<ExportEntry>,

    /// Initial size of the module's memory (defined or imported), in 64 KiB pages
    pub memory_min_pages: Option<u64>,

    /// GPU entry points the module imports, in declaration order
    pub gpu_imports: Vec<String>,

    /// Imports `easel_set_main_loop` or `easel_cancel_main_loop`
    pub uses_main_loop: bool,

    /// Event exports the module provides
    pub event_handlers: Vec<&'static str>,
}

impl ModuleReport {
    pub fn exports_item(&self, name: &str, kind: ItemKind) -> bool {
        self.exports.iter().any(|e| e.name == name && e.kind == kind)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.exports_item(name, ItemKind::Func)
    }

    /// Contract violations, in a stable order
    pub fn problems(&self) -> Vec<ContractProblem> {
        let mut problems: Vec<ContractProblem> = self
            .imports
            .iter()
            .filter(|import| import.module != IMPORT_MODULE)
            .map(|import| ContractProblem::ForeignImport {
                module: import.module.clone(),
                name: import.name.clone(),
            })
            .collect();

        if !self.exports_item(FUNCTION_TABLE_EXPORT, ItemKind::Table) {
            problems.extend(
                self.imports
                    .iter()
                    .filter(|import| {
                        import.module == IMPORT_MODULE
                            && CALLBACK_IMPORTS.contains(&import.name.as_str())
                    })
                    .map(|import| ContractProblem::CallbackWithoutTable {
                        import: import.name.clone(),
                    }),
            );
        }

        if !self.exports_item(MEMORY_EXPORT, ItemKind::Memory) {
            problems.push(ContractProblem::MissingMemoryExport);
        }
        problems
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    #[error("WASM parsing failed: {0}")]
    ParseError(String),
}

impl From<wasmparser::BinaryReaderError> for AnalysisError {
    fn from(err: wasmparser::BinaryReaderError) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Analyze a module's imports and exports
///
/// # Errors
///
/// Returns an error if the bytes are not a well-formed module.
pub fn analyze_module(wasm_bytes: &[u8]) -> Result<ModuleReport, AnalysisError> {
    let mut report = ModuleReport::default();

    for payload in Parser::new(0).parse_all(wasm_bytes) {
        match payload? {
            Payload::ImportSection(reader) => {
                for import in reader {
                    let import = import?;
                    let kind = match import.ty {
                        TypeRef::Func(_) => ItemKind::Func,
                        TypeRef::Memory(memory) => {
                            report.memory_min_pages = Some(memory.initial);
                            ItemKind::Memory
                        }
                        TypeRef::Table(_) => ItemKind::Table,
                        TypeRef::Global(_) => ItemKind::Global,
                        _ => ItemKind::Other,
                    };
                    report.imports.push(ImportEntry {
                        module: import.module.to_string(),
                        name: import.name.to_string(),
                        kind,
                    });
                }
            }
            Payload::MemorySection(reader) => {
                for memory in reader {
                    let memory = memory?;
                    report.memory_min_pages.get_or_insert(memory.initial);
                }
            }
            Payload::ExportSection(reader) => {
                for export in reader {
                    let export = export?;
                    let kind = match export.kind {
                        ExternalKind::Func => ItemKind::Func,
                        ExternalKind::Memory => ItemKind::Memory,
                        ExternalKind::Table => ItemKind::Table,
                        ExternalKind::Global => ItemKind::Global,
                        _ => ItemKind::Other,
                    };
                    report.exports.push(ExportEntry {
                        name: export.name.to_string(),
                        kind,
                    });
                }
            }
            _ => {}
        }
    }

    for import in &report.imports {
        if import.module != IMPORT_MODULE || import.kind != ItemKind::Func {
            continue;
        }
        if import.name.starts_with(GPU_IMPORT_PREFIX) {
            report.gpu_imports.push(import.name.clone());
        } else if import.name == SET_MAIN_LOOP || import.name == CANCEL_MAIN_LOOP {
            report.uses_main_loop = true;
        }
    }
    report.event_handlers = EVENT_EXPORTS
        .iter()
        .copied()
        .filter(|name| report.has_function(name))
        .collect();

    Ok(report)
}
