//! Import and export names shared by the bridge and module toolchains

/// Import module of every bridge function
pub const IMPORT_MODULE: &str = "env";

/// Exported linear memory
pub const MEMORY_EXPORT: &str = "memory";

/// Exported function table holding main-loop and completion callbacks
pub const FUNCTION_TABLE_EXPORT: &str = "__indirect_function_table";

/// Default entry point, called once after instantiation
pub const DEFAULT_ENTRY_POINT: &str = "_start";

// =============================================================================
// Event exports (all optional)
// =============================================================================

/// `(x: f32, y: f32)` in canvas pixels
pub const ON_MOUSE_MOVE: &str = "easel_on_mouse_move";
/// `(button: u32, pressed: u32)`
pub const ON_MOUSE_BUTTON: &str = "easel_on_mouse_button";
/// `(width: u32, height: u32)`
pub const ON_RESIZE: &str = "easel_on_resize";
/// `()`
pub const ON_QUIT: &str = "easel_on_quit";

pub const EVENT_EXPORTS: &[&str] = &[ON_MOUSE_MOVE, ON_MOUSE_BUTTON, ON_RESIZE, ON_QUIT];

// =============================================================================
// System imports
// =============================================================================

pub const LOG: &str = "easel_log";
pub const SET_MAIN_LOOP: &str = "easel_set_main_loop";
pub const CANCEL_MAIN_LOOP: &str = "easel_cancel_main_loop";
pub const CANVAS_WIDTH: &str = "easel_canvas_width";
pub const CANVAS_HEIGHT: &str = "easel_canvas_height";

/// Imports taking a callback index into the function table
pub const CALLBACK_IMPORTS: &[&str] = &[
    SET_MAIN_LOOP,
    "wgpuInstanceRequestAdapter",
    "wgpuAdapterRequestDevice",
];

/// Prefix shared by every GPU entry point
pub const GPU_IMPORT_PREFIX: &str = "wgpu";
