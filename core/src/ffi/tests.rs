//! Tests for bridge FFI functions

use easel_shared::Handle;
use easel_shared::abi::codes::*;
use easel_shared::abi::*;
use wasmtime::{Engine, Linker, Store, WasmParams, WasmResults};

use super::*;
use crate::config::Config;
use crate::objects::ObjectKind;
use crate::test_utils::{DescriptorWriter, headless_capabilities};
use crate::wasm::{BridgeEngine, BridgeInstance};

const RAM_LIMIT: usize = 1024 * 1024;

fn instantiate(wat: &str) -> BridgeInstance {
    let engine = BridgeEngine::new().unwrap();
    let module = engine.load_module(&wat::parse_str(wat).unwrap()).unwrap();
    let context = BridgeContext::without_gpu(RAM_LIMIT);
    BridgeInstance::with_context(&engine, &module, context, &Config::default()).unwrap()
}

fn global_i32(bridge: &mut BridgeInstance, name: &str) -> i32 {
    let instance = *bridge.instance();
    let global = instance.get_global(bridge.store_mut(), name).unwrap();
    global.get(bridge.store_mut()).unwrap_i32()
}

fn global_i64(bridge: &mut BridgeInstance, name: &str) -> i64 {
    let instance = *bridge.instance();
    let global = instance.get_global(bridge.store_mut(), name).unwrap();
    global.get(bridge.store_mut()).unwrap_i64()
}

// ============================================================================
// FFI Registration Tests
// ============================================================================

#[test]
fn test_register_bridge_ffi() {
    let engine = Engine::default();
    let mut linker: Linker<BridgeContext> = Linker::new(&engine);
    assert!(register_bridge_ffi(&mut linker).is_ok());
}

#[test]
fn test_all_entry_points_registered() {
    let engine = Engine::default();
    let mut linker: Linker<BridgeContext> = Linker::new(&engine);
    register_bridge_ffi(&mut linker).unwrap();
    let mut store = Store::new(&engine, BridgeContext::without_gpu(RAM_LIMIT));

    let names = [
        "wgpuCreateInstance",
        "wgpuInstanceCreateSurface",
        "wgpuInstanceRequestAdapter",
        "wgpuAdapterRequestDevice",
        "wgpuDeviceGetQueue",
        "wgpuSurfaceGetPreferredFormat",
        "wgpuDeviceCreateSwapChain",
        "wgpuSwapChainGetCurrentTextureView",
        "wgpuSwapChainPresent",
        "wgpuDeviceCreateShaderModule",
        "wgpuDeviceCreateBuffer",
        "wgpuBufferGetSize",
        "wgpuDeviceCreateTexture",
        "wgpuTextureCreateView",
        "wgpuDeviceCreateSampler",
        "wgpuDeviceCreateBindGroupLayout",
        "wgpuDeviceCreatePipelineLayout",
        "wgpuDeviceCreateBindGroup",
        "wgpuDeviceCreateRenderPipeline",
        "wgpuRenderPipelineGetBindGroupLayout",
        "wgpuDeviceCreateCommandEncoder",
        "wgpuCommandEncoderBeginRenderPass",
        "wgpuRenderPassEncoderSetPipeline",
        "wgpuRenderPassEncoderSetBindGroup",
        "wgpuRenderPassEncoderSetVertexBuffer",
        "wgpuRenderPassEncoderSetIndexBuffer",
        "wgpuRenderPassEncoderSetViewport",
        "wgpuRenderPassEncoderSetScissorRect",
        "wgpuRenderPassEncoderSetBlendConstant",
        "wgpuRenderPassEncoderDraw",
        "wgpuRenderPassEncoderDrawIndexed",
        "wgpuRenderPassEncoderEnd",
        "wgpuCommandEncoderFinish",
        "wgpuQueueSubmit",
        "wgpuQueueWriteBuffer",
        "wgpuQueueWriteTexture",
        "wgpuInstanceRelease",
        "wgpuAdapterRelease",
        "wgpuDeviceRelease",
        "wgpuQueueRelease",
        "wgpuSurfaceRelease",
        "wgpuSwapChainRelease",
        "wgpuBufferRelease",
        "wgpuTextureRelease",
        "wgpuTextureViewRelease",
        "wgpuSamplerRelease",
        "wgpuShaderModuleRelease",
        "wgpuBindGroupLayoutRelease",
        "wgpuBindGroupRelease",
        "wgpuPipelineLayoutRelease",
        "wgpuRenderPipelineRelease",
        "wgpuCommandEncoderRelease",
        "wgpuRenderPassEncoderRelease",
        "wgpuCommandBufferRelease",
        "easel_log",
        "easel_set_main_loop",
        "easel_cancel_main_loop",
        "easel_canvas_width",
        "easel_canvas_height",
    ];
    for name in names {
        assert!(
            linker.get(&mut store, "env", name).is_some(),
            "{} not registered",
            name
        );
    }
}

// ============================================================================
// System functions
// ============================================================================

#[test]
fn test_log_message() {
    let mut bridge = instantiate(
        r#"
        (module
            (import "env" "easel_log" (func $log (param i32 i32)))
            (memory (export "memory") 1)
            (data (i32.const 64) "hello from the module")
            (func (export "_start") (call $log (i32.const 64) (i32.const 21)))
        )
    "#,
    );
    assert!(bridge.start().is_ok());
}

#[test]
fn test_log_out_of_bounds_traps() {
    let mut bridge = instantiate(
        r#"
        (module
            (import "env" "easel_log" (func $log (param i32 i32)))
            (memory (export "memory") 1)
            (func (export "_start") (call $log (i32.const 65530) (i32.const 100)))
        )
    "#,
    );
    let err = bridge.start().unwrap_err();
    assert!(format!("{:#}", err).contains("easel_log"));
}

#[test]
fn test_missing_memory_traps() {
    let mut bridge = instantiate(
        r#"
        (module
            (import "env" "easel_log" (func $log (param i32 i32)))
            (func (export "_start") (call $log (i32.const 0) (i32.const 0)))
        )
    "#,
    );
    let err = bridge.start().unwrap_err();
    assert!(format!("{:#}", err).contains("linear memory"));
}

// ============================================================================
// Recoverable failures return the null handle
// ============================================================================

/// Calls `wgpuDeviceCreateBuffer(device, desc)` with both values taken from
/// globals so each test can pick them
fn create_buffer_module(device: u32, desc: u32) -> String {
    format!(
        r#"
        (module
            (import "env" "wgpuDeviceCreateBuffer"
                (func $create_buffer (param i32 i32) (result i32)))
            (import "env" "wgpuBufferRelease" (func $release (param i32)))
            (memory (export "memory") 1)
            (global $result (export "result") (mut i32) (i32.const -1))
            (func (export "_start")
                (global.set $result (call $create_buffer (i32.const {device}) (i32.const {desc})))
                (call $release (i32.const 42)))
        )
    "#
    )
}

#[test]
fn test_unresolved_device_returns_null() {
    let mut bridge = instantiate(&create_buffer_module(5, 256));
    bridge.start().unwrap();
    assert_eq!(global_i32(&mut bridge, "result"), 0);
}

#[test]
fn test_descriptor_out_of_bounds_traps() {
    let mut bridge = instantiate(&create_buffer_module(5, 65530));
    let err = bridge.start().unwrap_err();
    assert!(format!("{:#}", err).contains("wgpuDeviceCreateBuffer"));
}

#[test]
fn test_create_instance_without_gpu_returns_null() {
    let mut bridge = instantiate(
        r#"
        (module
            (import "env" "wgpuCreateInstance" (func $create_instance (param i32) (result i32)))
            (memory (export "memory") 1)
            (global $result (export "result") (mut i32) (i32.const -1))
            (func (export "_start")
                (global.set $result (call $create_instance (i32.const 0))))
        )
    "#,
    );
    bridge.start().unwrap();
    assert_eq!(global_i32(&mut bridge, "result"), 0);
}

#[test]
fn test_pass_commands_on_unknown_pass_are_ignored() {
    let mut bridge = instantiate(
        r#"
        (module
            (import "env" "wgpuRenderPassEncoderDraw" (func $draw (param i32 i32 i32 i32 i32)))
            (import "env" "wgpuRenderPassEncoderSetScissorRect"
                (func $scissor (param i32 i32 i32 i32 i32)))
            (import "env" "wgpuRenderPassEncoderEnd" (func $end (param i32)))
            (memory (export "memory") 1)
            (func (export "_start")
                (call $scissor
                    (i32.const 9) (i32.const 0) (i32.const 0) (i32.const 4) (i32.const 4))
                (call $draw (i32.const 9) (i32.const 3) (i32.const 1) (i32.const 0) (i32.const 0))
                (call $end (i32.const 9)))
        )
    "#,
    );
    assert!(bridge.start().is_ok());
}

// ============================================================================
// Completion callbacks
// ============================================================================

const ADAPTER_CALLBACK: &str = r#"
    (module
        (import "env" "wgpuInstanceRequestAdapter"
            (func $request_adapter (param i32 i32 i32 i32)))
        (memory (export "memory") 1)
        (table (export "__indirect_function_table") 1 funcref)
        (global $status (export "status") (mut i32) (i32.const -1))
        (global $adapter (export "adapter") (mut i32) (i32.const -1))
        (global $userdata (export "userdata") (mut i32) (i32.const -1))
        (func $on_adapter (param i32 i32 i32 i32)
            (global.set $status (local.get 0))
            (global.set $adapter (local.get 1))
            (global.set $userdata (local.get 3)))
        (elem (i32.const 0) $on_adapter)
        (func (export "_start")
            (call $request_adapter (i32.const 0) (i32.const 0) (i32.const 0) (i32.const 77)))
        (func (export "bad_callback")
            (call $request_adapter (i32.const 0) (i32.const 0) (i32.const 5) (i32.const 0)))
    )
"#;

#[test]
fn test_request_adapter_error_reaches_callback_inline() {
    let mut bridge = instantiate(ADAPTER_CALLBACK);
    bridge.start().unwrap();
    // Instance handle 0 is unresolvable
    assert_eq!(global_i32(&mut bridge, "status"), 2);
    assert_eq!(global_i32(&mut bridge, "adapter"), 0);
    assert_eq!(global_i32(&mut bridge, "userdata"), 77);
}

#[test]
fn test_request_adapter_missing_callback_traps() {
    let mut bridge = instantiate(ADAPTER_CALLBACK);
    let instance = *bridge.instance();
    let bad = instance
        .get_typed_func::<(), ()>(bridge.store_mut(), "bad_callback")
        .unwrap();
    let err = bad.call(bridge.store_mut(), ()).unwrap_err();
    assert!(format!("{:#}", err).contains("table index 5"));
}

// ============================================================================
// GPU Tests (skipped without an adapter)
// ============================================================================

/// Negotiates through the callbacks, then creates, sizes, writes and
/// releases a VERTEX | COPY_DST buffer of 1024 bytes
const BUFFER_ROUND: &str = r#"
    (module
        (import "env" "wgpuCreateInstance" (func $create_instance (param i32) (result i32)))
        (import "env" "wgpuInstanceRequestAdapter" (func $request_adapter (param i32 i32 i32 i32)))
        (import "env" "wgpuAdapterRequestDevice" (func $request_device (param i32 i32 i32 i32)))
        (import "env" "wgpuDeviceGetQueue" (func $get_queue (param i32) (result i32)))
        (import "env" "wgpuDeviceCreateBuffer" (func $create_buffer (param i32 i32) (result i32)))
        (import "env" "wgpuBufferGetSize" (func $buffer_size (param i32) (result i64)))
        (import "env" "wgpuQueueWriteBuffer" (func $write_buffer (param i32 i32 i64 i32 i32)))
        (import "env" "wgpuBufferRelease" (func $release_buffer (param i32)))
        (memory (export "memory") 1)
        (table (export "__indirect_function_table") 2 funcref)

        ;; BufferDescriptor: usage VERTEX | COPY_DST, size 1024
        (data (i32.const 256)
            "\00\00\00\00" "\00\00\00\00" "\28\00\00\00" "\00\00\00\00"
            "\00\04\00\00\00\00\00\00" "\00\00\00\00\00\00\00\00")
        (data (i32.const 512) "0123456789abcdef")

        (global $instance (export "instance") (mut i32) (i32.const 0))
        (global $adapter_status (export "adapter_status") (mut i32) (i32.const -1))
        (global $adapter (export "adapter") (mut i32) (i32.const 0))
        (global $device_status (export "device_status") (mut i32) (i32.const -1))
        (global $device (export "device") (mut i32) (i32.const 0))
        (global $queue (export "queue") (mut i32) (i32.const 0))
        (global $buffer (export "buffer") (mut i32) (i32.const 0))
        (global $second (export "second") (mut i32) (i32.const 0))
        (global $size (export "size") (mut i64) (i64.const 0))

        (func $on_adapter (param i32 i32 i32 i32)
            (global.set $adapter_status (local.get 0))
            (global.set $adapter (local.get 1)))
        (func $on_device (param i32 i32 i32 i32)
            (global.set $device_status (local.get 0))
            (global.set $device (local.get 1)))
        (elem (i32.const 0) $on_adapter $on_device)

        (func (export "_start")
            (global.set $instance (call $create_instance (i32.const 0)))
            (call $request_adapter (global.get $instance) (i32.const 0) (i32.const 0) (i32.const 0))
            (call $request_device (global.get $adapter) (i32.const 0) (i32.const 1) (i32.const 0))
            (global.set $queue (call $get_queue (global.get $device)))
            (global.set $buffer (call $create_buffer (global.get $device) (i32.const 256)))
            (global.set $size (call $buffer_size (global.get $buffer)))
            (call $write_buffer
                (global.get $queue) (global.get $buffer)
                (i64.const 0) (i32.const 512) (i32.const 16))
            (call $release_buffer (global.get $buffer))
            (call $release_buffer (global.get $buffer))
            (global.set $second (call $create_buffer (global.get $device) (i32.const 256))))
    )
"#;

#[test]
fn test_gpu_request_callbacks_and_buffer() {
    let Some(caps) = headless_capabilities("test_gpu_request_callbacks_and_buffer") else {
        return;
    };
    let engine = BridgeEngine::new().unwrap();
    let module = engine
        .load_module(&wat::parse_str(BUFFER_ROUND).unwrap())
        .unwrap();
    let mut bridge = BridgeInstance::new(&engine, &module, caps, &Config::default()).unwrap();
    bridge.start().unwrap();

    assert_ne!(global_i32(&mut bridge, "instance"), 0);
    assert_eq!(global_i32(&mut bridge, "adapter_status"), 0);
    assert_ne!(global_i32(&mut bridge, "adapter"), 0);
    assert_eq!(global_i32(&mut bridge, "device_status"), 0);
    assert_ne!(global_i32(&mut bridge, "device"), 0);
    assert_ne!(global_i32(&mut bridge, "queue"), 0);

    let buffer = global_i32(&mut bridge, "buffer");
    let second = global_i32(&mut bridge, "second");
    assert_ne!(buffer, 0);
    assert_eq!(global_i64(&mut bridge, "size"), 1024);
    // Handles are never reused after release
    assert!(second > buffer);
    assert!(!bridge.context().objects.contains(buffer as u32));
}

#[test]
fn test_gpu_exposed_handles_reused_while_live() {
    let Some(caps) = headless_capabilities("test_gpu_exposed_handles_reused_while_live") else {
        return;
    };
    let engine = BridgeEngine::new().unwrap();
    let module = engine
        .load_module(&wat::parse_str(r#"(module (memory (export "memory") 1))"#).unwrap())
        .unwrap();
    let mut bridge = BridgeInstance::new(&engine, &module, caps, &Config::default()).unwrap();

    let ctx = bridge.context_mut();
    let first = ctx.expose(crate::objects::ObjectKind::Device);
    let again = ctx.expose(crate::objects::ObjectKind::Device);
    assert_eq!(first, again);

    assert!(ctx.objects.release(first));
    let fresh = ctx.expose(crate::objects::ObjectKind::Device);
    assert_ne!(fresh, first);
}

// ============================================================================
// Pipeline and submission flow (GPU)
// ============================================================================

/// Each export forwards to one import so the host can drive the calls with
/// descriptors it lays out itself
const RENDER_FLOW: &str = r#"
    (module
        (import "env" "wgpuDeviceCreateShaderModule" (func $shader (param i32 i32) (result i32)))
        (import "env" "wgpuDeviceCreateBuffer" (func $buffer (param i32 i32) (result i32)))
        (import "env" "wgpuDeviceCreateBindGroupLayout"
            (func $group_layout (param i32 i32) (result i32)))
        (import "env" "wgpuDeviceCreatePipelineLayout"
            (func $pipeline_layout (param i32 i32) (result i32)))
        (import "env" "wgpuDeviceCreateBindGroup" (func $group (param i32 i32) (result i32)))
        (import "env" "wgpuDeviceCreateRenderPipeline"
            (func $pipeline (param i32 i32) (result i32)))
        (import "env" "wgpuDeviceCreateSwapChain"
            (func $swap_chain (param i32 i32 i32) (result i32)))
        (import "env" "wgpuSwapChainGetCurrentTextureView"
            (func $current_view (param i32) (result i32)))
        (import "env" "wgpuDeviceCreateCommandEncoder" (func $encoder (param i32 i32) (result i32)))
        (import "env" "wgpuCommandEncoderBeginRenderPass"
            (func $begin (param i32 i32) (result i32)))
        (import "env" "wgpuRenderPassEncoderSetPipeline" (func $set_pipeline (param i32 i32)))
        (import "env" "wgpuRenderPassEncoderSetBindGroup"
            (func $set_group (param i32 i32 i32 i32 i32)))
        (import "env" "wgpuRenderPassEncoderDraw" (func $draw (param i32 i32 i32 i32 i32)))
        (import "env" "wgpuRenderPassEncoderEnd" (func $end (param i32)))
        (import "env" "wgpuCommandEncoderFinish" (func $finish (param i32 i32) (result i32)))
        (import "env" "wgpuQueueSubmit" (func $submit (param i32 i32 i32)))
        (memory (export "memory") 1)

        (func (export "shader") (param i32 i32) (result i32)
            (call $shader (local.get 0) (local.get 1)))
        (func (export "buffer") (param i32 i32) (result i32)
            (call $buffer (local.get 0) (local.get 1)))
        (func (export "group_layout") (param i32 i32) (result i32)
            (call $group_layout (local.get 0) (local.get 1)))
        (func (export "pipeline_layout") (param i32 i32) (result i32)
            (call $pipeline_layout (local.get 0) (local.get 1)))
        (func (export "group") (param i32 i32) (result i32)
            (call $group (local.get 0) (local.get 1)))
        (func (export "pipeline") (param i32 i32) (result i32)
            (call $pipeline (local.get 0) (local.get 1)))
        (func (export "swap_chain") (param i32 i32 i32) (result i32)
            (call $swap_chain (local.get 0) (local.get 1) (local.get 2)))
        (func (export "current_view") (param i32) (result i32)
            (call $current_view (local.get 0)))
        (func (export "encoder") (param i32) (result i32)
            (call $encoder (local.get 0) (i32.const 0)))
        (func (export "begin") (param i32 i32) (result i32)
            (call $begin (local.get 0) (local.get 1)))
        (func (export "draw_triangle") (param i32 i32 i32)
            (call $set_pipeline (local.get 0) (local.get 1))
            (call $set_group (local.get 0) (i32.const 0) (local.get 2) (i32.const 0) (i32.const 0))
            (call $draw (local.get 0) (i32.const 3) (i32.const 1) (i32.const 0) (i32.const 0))
            (call $end (local.get 0)))
        (func (export "finish") (param i32) (result i32)
            (call $finish (local.get 0) (i32.const 0)))
        (func (export "submit") (param i32 i32 i32)
            (call $submit (local.get 0) (local.get 1) (local.get 2)))
    )
"#;

const TINT_WGSL: &str = "
struct Tint { color: vec4<f32> }
@group(0) @binding(0) var<uniform> tint: Tint;

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    let x = f32(i32(index) - 1);
    let y = f32(i32(index & 1u) * 2 - 1);
    return vec4<f32>(x, y, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint.color;
}
";

fn call<P: WasmParams, R: WasmResults>(bridge: &mut BridgeInstance, name: &str, params: P) -> R {
    let instance = *bridge.instance();
    let func = instance
        .get_typed_func::<P, R>(bridge.store_mut(), name)
        .unwrap();
    func.call(bridge.store_mut(), params).unwrap()
}

/// Copy everything laid out so far into the module's memory
fn sync(bridge: &mut BridgeInstance, w: &DescriptorWriter) {
    let memory = bridge.context().memory.unwrap();
    memory.write(bridge.store_mut(), 0, w.bytes()).unwrap();
}

fn handle_arg(handle: Handle) -> i32 {
    handle as i32
}

struct Flow {
    bridge: BridgeInstance,
    w: DescriptorWriter,
    device: i32,
    queue: i32,
    pipeline: i32,
    group: i32,
    swap_chain: i32,
}

/// Build the tinted-triangle pipeline and its bind group. The color target
/// asks for whichever 8-bit presentable format the surface does not prefer.
fn build_flow(test_name: &str) -> Option<Flow> {
    let caps = headless_capabilities(test_name)?;
    let requested = if caps.preferred_format == wgpu::TextureFormat::Rgba8Unorm {
        texture_format::BGRA8_UNORM
    } else {
        texture_format::RGBA8_UNORM
    };

    let engine = BridgeEngine::new().unwrap();
    let module = engine
        .load_module(&wat::parse_str(RENDER_FLOW).unwrap())
        .unwrap();
    let mut bridge = BridgeInstance::new(&engine, &module, caps, &Config::default()).unwrap();

    let ctx = bridge.context_mut();
    let device = handle_arg(ctx.expose(ObjectKind::Device));
    let queue = handle_arg(ctx.expose(ObjectKind::Queue));
    let surface = handle_arg(ctx.expose(ObjectKind::Surface));

    let mut w = DescriptorWriter::new(64 * 1024);
    let code = w.push_str(TINT_WGSL);
    let wgsl = w.push(&ShaderModuleWgslDescriptor {
        chain: ChainedStruct {
            next: 0,
            s_type: s_type::SHADER_MODULE_WGSL_DESCRIPTOR,
        },
        code,
    });
    let shader_desc = w.push(&ShaderModuleDescriptor {
        next_in_chain: wgsl,
        ..Default::default()
    });
    let buffer_desc = w.push(&BufferDescriptor {
        usage: buffer_usage::UNIFORM,
        size: 16,
        ..Default::default()
    });
    let entries = w.push(&BindGroupLayoutEntry {
        binding: 0,
        visibility: shader_stage::FRAGMENT,
        buffer: BufferBindingLayout {
            ty: buffer_binding_type::UNIFORM,
            ..Default::default()
        },
        ..Default::default()
    });
    let group_layout_desc = w.push(&BindGroupLayoutDescriptor {
        entry_count: 1,
        entries,
        ..Default::default()
    });
    let swap_chain_desc = w.push(&SwapChainDescriptor {
        usage: texture_usage::RENDER_ATTACHMENT,
        format: requested,
        width: 64,
        height: 64,
        present_mode: present_mode::FIFO,
        ..Default::default()
    });
    sync(&mut bridge, &w);

    let shader: i32 = call(&mut bridge, "shader", (device, shader_desc as i32));
    let buffer: i32 = call(&mut bridge, "buffer", (device, buffer_desc as i32));
    let group_layout: i32 = call(&mut bridge, "group_layout", (device, group_layout_desc as i32));
    let swap_chain: i32 = call(
        &mut bridge,
        "swap_chain",
        (device, surface, swap_chain_desc as i32),
    );
    assert_ne!(shader, 0);
    assert_ne!(buffer, 0);
    assert_ne!(group_layout, 0);
    assert_ne!(swap_chain, 0);

    let layouts = w.push_slice(&[group_layout as u32]);
    let pipeline_layout_desc = w.push(&PipelineLayoutDescriptor {
        bind_group_layout_count: 1,
        bind_group_layouts: layouts,
        ..Default::default()
    });
    let group_entries = w.push(&BindGroupEntry {
        binding: 0,
        buffer: buffer as u32,
        size: WHOLE_SIZE,
        ..Default::default()
    });
    let group_desc = w.push(&BindGroupDescriptor {
        layout: group_layout as u32,
        entry_count: 1,
        entries: group_entries,
        ..Default::default()
    });
    let vs = w.push_str("vs_main");
    let fs = w.push_str("fs_main");
    let targets = w.push_slice(&[ColorTargetState {
        next_in_chain: 0,
        format: requested,
        blend: 0,
        write_mask: color_write_mask::ALL,
    }]);
    let fragment = w.push(&FragmentState {
        module: shader as u32,
        entry_point: fs,
        target_count: 1,
        targets,
        ..Default::default()
    });
    sync(&mut bridge, &w);

    let pipeline_layout: i32 = call(
        &mut bridge,
        "pipeline_layout",
        (device, pipeline_layout_desc as i32),
    );
    assert_ne!(pipeline_layout, 0);
    let pipeline_desc = w.push(&RenderPipelineDescriptor {
        layout: pipeline_layout as u32,
        vertex: VertexState {
            module: shader as u32,
            entry_point: vs,
            ..Default::default()
        },
        primitive: PrimitiveState {
            topology: primitive_topology::TRIANGLE_LIST,
            front_face: front_face::CCW,
            cull_mode: cull_mode::NONE,
            ..Default::default()
        },
        multisample: MultisampleState {
            count: 1,
            mask: u32::MAX,
            ..Default::default()
        },
        fragment,
        ..Default::default()
    });
    sync(&mut bridge, &w);

    let group: i32 = call(&mut bridge, "group", (device, group_desc as i32));
    let pipeline: i32 = call(&mut bridge, "pipeline", (device, pipeline_desc as i32));
    assert_ne!(group, 0);
    assert_ne!(pipeline, 0);

    Some(Flow {
        bridge,
        w,
        device,
        queue,
        pipeline,
        group,
        swap_chain,
    })
}

impl Flow {
    /// Record one triangle into the swap chain view and finish the encoder
    fn record_frame(&mut self) -> i32 {
        let view: i32 = call(&mut self.bridge, "current_view", self.swap_chain);
        assert_ne!(view, 0);
        let attachments = self.w.push_slice(&[RenderPassColorAttachment {
            view: view as u32,
            load_op: load_op::CLEAR,
            store_op: store_op::STORE,
            clear_value: Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            ..Default::default()
        }]);
        let pass_desc = self.w.push(&RenderPassDescriptor {
            color_attachment_count: 1,
            color_attachments: attachments,
            ..Default::default()
        });
        sync(&mut self.bridge, &self.w);

        let encoder: i32 = call(&mut self.bridge, "encoder", self.device);
        assert_ne!(encoder, 0);
        let pass: i32 = call(&mut self.bridge, "begin", (encoder, pass_desc as i32));
        assert_ne!(pass, 0);
        call::<_, ()>(
            &mut self.bridge,
            "draw_triangle",
            (pass, self.pipeline, self.group),
        );
        call(&mut self.bridge, "finish", encoder)
    }

    fn submit(&mut self, commands: &[u32]) {
        let list = self.w.push_slice(commands);
        sync(&mut self.bridge, &self.w);
        call::<_, ()>(
            &mut self.bridge,
            "submit",
            (self.queue, commands.len() as i32, list as i32),
        );
    }

    fn is_live(&self, handle: i32) -> bool {
        self.bridge.context().objects.contains(handle as u32)
    }
}

#[test]
fn test_gpu_render_flow_draws_into_swap_chain() {
    let Some(mut flow) = build_flow("test_gpu_render_flow_draws_into_swap_chain") else {
        return;
    };
    // A target format that differs from the view's would fail validation
    // when the encoder finishes and leave the null handle
    let commands = flow.record_frame();
    assert_ne!(commands, 0);
    assert_eq!(
        flow.bridge.context().objects.kind_of(commands as u32),
        Some(ObjectKind::CommandBuffer)
    );

    flow.submit(&[commands as u32]);
    assert!(!flow.is_live(commands));

    // Resubmitting a consumed buffer is ignored
    flow.submit(&[commands as u32]);
    assert!(!flow.is_live(commands));
}

#[test]
fn test_gpu_rejected_submission_keeps_buffers() {
    let Some(mut flow) = build_flow("test_gpu_rejected_submission_keeps_buffers") else {
        return;
    };
    let commands = flow.record_frame();
    assert_ne!(commands, 0);

    flow.submit(&[commands as u32, commands as u32]);
    assert!(flow.is_live(commands));

    flow.submit(&[commands as u32, flow.pipeline as u32]);
    assert!(flow.is_live(commands));
    assert!(flow.is_live(flow.pipeline));

    flow.submit(&[commands as u32]);
    assert!(!flow.is_live(commands));
}
