//! Tests for linear memory access

use easel_shared::abi::{BufferDescriptor, Extent3d};

use super::*;

fn put(data: &mut [u8], offset: usize, bytes: &[u8]) {
    data[offset..offset + bytes.len()].copy_from_slice(bytes);
}

#[test]
fn test_scalar_reads_are_little_endian() {
    let mut data = vec![0xAAu8; 64];
    put(&mut data, 0, &[0x01, 0x02]);
    put(&mut data, 4, &0xDEAD_BEEFu32.to_le_bytes());
    put(&mut data, 8, &(-5i32).to_le_bytes());
    put(&mut data, 16, &0x0102_0304_0506_0708u64.to_le_bytes());
    put(&mut data, 24, &1.5f32.to_le_bytes());
    put(&mut data, 32, &(-0.25f64).to_le_bytes());
    let mem = GuestMemory::new(&data);

    assert_eq!(mem.read_pod::<u8>(1).unwrap(), 0x02);
    assert_eq!(mem.read_pod::<u16>(0).unwrap(), 0x0201);
    assert_eq!(mem.read_pod::<u32>(4).unwrap(), 0xDEAD_BEEF);
    assert_eq!(mem.read_pod::<i32>(8).unwrap(), -5);
    assert_eq!(mem.read_pod::<u64>(16).unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(mem.read_pod::<f32>(24).unwrap(), 1.5);
    assert_eq!(mem.read_pod::<f64>(32).unwrap(), -0.25);
}

#[test]
fn test_unaligned_reads() {
    let mut data = vec![0u8; 16];
    put(&mut data, 3, &0x1234_5678u32.to_le_bytes());
    let mem = GuestMemory::new(&data);
    assert_eq!(mem.read_pod::<u32>(3).unwrap(), 0x1234_5678);
}

#[test]
fn test_read_past_end_is_out_of_bounds() {
    let data = vec![0u8; 16];
    let mem = GuestMemory::new(&data);

    assert!(mem.read_pod::<u32>(12).is_ok());
    match mem.read_pod::<u32>(13) {
        Err(BridgeError::OutOfBounds {
            offset,
            len,
            memory_size,
        }) => {
            assert_eq!(offset, 13);
            assert_eq!(len, 4);
            assert_eq!(memory_size, 16);
        }
        other => panic!("expected OutOfBounds, got {:?}", other),
    }
    assert!(mem.read_pod::<u64>(u32::MAX).is_err());
}

#[test]
fn test_out_of_bounds_is_fatal() {
    let data = vec![0u8; 4];
    let err = GuestMemory::new(&data).read_pod::<u64>(0).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_read_pod_struct() {
    let mut data = vec![0xFFu8; 128];
    let desc = BufferDescriptor {
        usage: 0x28,
        size: 1024,
        ..Default::default()
    };
    data[40..72].copy_from_slice(bytemuck::bytes_of(&desc));

    let mem = GuestMemory::new(&data);
    let read: BufferDescriptor = mem.read_pod(40).unwrap();
    assert_eq!(read, desc);
    assert!(mem.read_pod::<BufferDescriptor>(100).is_err());
}

#[test]
fn test_read_array() {
    let extents = [
        Extent3d {
            width: 1,
            height: 2,
            depth_or_array_layers: 3,
        },
        Extent3d {
            width: 4,
            height: 5,
            depth_or_array_layers: 6,
        },
    ];
    let mut data = vec![0u8; 64];
    data[10..34].copy_from_slice(bytemuck::cast_slice(&extents));

    let mem = GuestMemory::new(&data);
    assert_eq!(mem.read_array::<Extent3d>(10, 2).unwrap(), extents.to_vec());
    assert!(mem.read_array::<Extent3d>(50, 2).is_err());
}

#[test]
fn test_read_array_zero_count_ignores_pointer() {
    let data = vec![0u8; 8];
    let mem = GuestMemory::new(&data);
    assert!(mem.read_array::<Extent3d>(0, 0).unwrap().is_empty());
    assert!(mem.read_array::<Extent3d>(u32::MAX, 0).unwrap().is_empty());
}

#[test]
fn test_read_array_huge_count_does_not_overflow() {
    let data = vec![0u8; 8];
    let mem = GuestMemory::new(&data);
    assert!(mem.read_array::<Extent3d>(4, u32::MAX).is_err());
}

#[test]
fn test_read_cstr() {
    let mut data = vec![0xAAu8; 32];
    put(&mut data, 8, b"vs_main\0");
    let mem = GuestMemory::new(&data);
    assert_eq!(mem.read_cstr(8).unwrap(), "vs_main");
    assert_eq!(mem.read_cstr(10).unwrap(), "_main");
}

#[test]
fn test_read_cstr_without_terminator() {
    let data = vec![b'a'; 16];
    let mem = GuestMemory::new(&data);
    assert!(matches!(
        mem.read_cstr(4),
        Err(BridgeError::OutOfBounds { .. })
    ));
    assert!(mem.read_cstr(100).is_err());
}

#[test]
fn test_read_cstr_invalid_utf8() {
    let mut data = vec![0u8; 8];
    put(&mut data, 0, &[0xC3, 0x28, 0x00]);
    let mem = GuestMemory::new(&data);
    assert!(matches!(
        mem.read_cstr(0),
        Err(BridgeError::InvalidUtf8 { ptr: 0 })
    ));
}

#[test]
fn test_read_label() {
    let mut data = vec![0u8; 16];
    put(&mut data, 4, b"quad\0");
    let mem = GuestMemory::new(&data);
    assert_eq!(mem.read_label(0).unwrap(), None);
    assert_eq!(mem.read_label(4).unwrap().as_deref(), Some("quad"));
}
