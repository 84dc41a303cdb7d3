//! C Foreign Function Interface (FFI) for spiral streams.
//!
//! This module exposes the text stream buffer and slot window to a host
//! renderer written in another language. All functions are `extern "C"`
//! with stable ABI.
//!
//! # Safety
//!
//! All functions that accept pointers require valid pointers or NULL.
//! NULL handles are tolerated and treated as a no-op. The caller owns
//! every handle returned by a `_new` function and must release it with the
//! matching `_destroy`.
//!
//! # Example (C)
//!
//! ```c
//! #include "spiral.h"
//!
//! int main() {
//!     SpiralBuffer* buffer = spiral_buffer_new("hello", 32, 3, 42);
//!     SpiralWindow* window = spiral_window_new(64);
//!     spiral_window_sync(window, buffer);
//!
//!     spiral_buffer_append(buffer, " world", false);
//!     spiral_window_advance(window, buffer);
//!
//!     SpiralSlot slot;
//!     spiral_window_get(window, 63, &slot);
//!
//!     spiral_window_destroy(window);
//!     spiral_buffer_destroy(buffer);
//!     return 0;
//! }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::buffer::{CharSlot, TextStreamBuffer, TextStreamConfig};
use crate::window::SlotWindow;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a text stream buffer.
pub struct SpiralBuffer(TextStreamBuffer);

/// Opaque handle to a slot window.
pub struct SpiralWindow(SlotWindow);

// =============================================================================
// Result Codes and Data Types
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// Invalid UTF-8 string.
    InvalidUtf8 = 2,
    /// Out of bounds.
    OutOfBounds = 3,
}

/// C view of a character slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralSlot {
    /// Position within the commit chunk, or -1 for a blank.
    pub index: i32,
    /// Unicode scalar value of the character.
    pub char_code: u32,
    /// Offset from `index` to the shuffled display rank.
    pub readable_delta: i32,
}

impl From<CharSlot> for SpiralSlot {
    fn from(slot: CharSlot) -> Self {
        Self {
            index: slot.index,
            char_code: u32::from(slot.ch),
            readable_delta: slot.readable_delta,
        }
    }
}

// =============================================================================
// Buffer Functions
// =============================================================================

/// Create a text stream buffer, committing `initial` immediately.
///
/// `initial` may be NULL. Returns NULL if `chunk_size` is zero or
/// `initial` is not valid UTF-8.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_new(
    initial: *const c_char,
    chunk_size: usize,
    shuffle_radius: usize,
    seed: u64,
) -> *mut SpiralBuffer {
    let initial = if initial.is_null() {
        ""
    } else {
        match CStr::from_ptr(initial).to_str() {
            Ok(s) => s,
            Err(_) => return ptr::null_mut(),
        }
    };
    let config = TextStreamConfig {
        chunk_size,
        shuffle_radius,
    };
    match TextStreamBuffer::with_seed(initial, config, seed) {
        Ok(buffer) => Box::into_raw(Box::new(SpiralBuffer(buffer))),
        Err(_) => ptr::null_mut(),
    }
}

/// Destroy a text stream buffer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_destroy(buffer: *mut SpiralBuffer) {
    if !buffer.is_null() {
        drop(Box::from_raw(buffer));
    }
}

/// Append raw text. With `force`, everything pending is committed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_append(
    buffer: *mut SpiralBuffer,
    text: *const c_char,
    force: bool,
) -> SpiralResult {
    if buffer.is_null() || text.is_null() {
        return SpiralResult::NullPointer;
    }

    let Ok(text_str) = CStr::from_ptr(text).to_str() else {
        return SpiralResult::InvalidUtf8;
    };

    if force {
        (*buffer).0.append_forced(text_str);
    } else {
        (*buffer).0.append(text_str);
    }
    SpiralResult::Ok
}

/// Pop the next slot into `slot_out`. Returns false when none is released.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_shift(
    buffer: *mut SpiralBuffer,
    slot_out: *mut SpiralSlot,
) -> bool {
    if buffer.is_null() || slot_out.is_null() {
        return false;
    }
    match (*buffer).0.shift() {
        Some(slot) => {
            *slot_out = slot.into();
            true
        }
        None => false,
    }
}

/// Move the read cursor forward by `n` slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_advance(buffer: *mut SpiralBuffer, n: usize) {
    if !buffer.is_null() {
        (*buffer).0.advance(n);
    }
}

/// Number of unread slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_len(buffer: *const SpiralBuffer) -> usize {
    if buffer.is_null() {
        return 0;
    }
    (*buffer).0.len()
}

/// Change-detection token.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_state(buffer: *const SpiralBuffer) -> u64 {
    if buffer.is_null() {
        return 0;
    }
    (*buffer).0.state()
}

/// Number of distinct characters seen, including the space.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_unique_count(buffer: *const SpiralBuffer) -> usize {
    if buffer.is_null() {
        return 0;
    }
    (*buffer).0.unique_chars().len()
}

/// Check whether `char_code` has been seen. Used to size a glyph atlas.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_buffer_has_char(
    buffer: *const SpiralBuffer,
    char_code: u32,
) -> bool {
    if buffer.is_null() {
        return false;
    }
    char::from_u32(char_code).is_some_and(|c| (*buffer).0.unique_chars().contains(&c))
}

// =============================================================================
// Window Functions
// =============================================================================

/// Create a slot window. Returns NULL if `capacity` is zero.
#[unsafe(no_mangle)]
pub extern "C" fn spiral_window_new(capacity: usize) -> *mut SpiralWindow {
    match SlotWindow::new(capacity) {
        Ok(window) => Box::into_raw(Box::new(SpiralWindow(window))),
        Err(_) => ptr::null_mut(),
    }
}

/// Destroy a slot window.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_window_destroy(window: *mut SpiralWindow) {
    if !window.is_null() {
        drop(Box::from_raw(window));
    }
}

/// Number of visible slots.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_window_capacity(window: *const SpiralWindow) -> usize {
    if window.is_null() {
        return 0;
    }
    (*window).0.capacity()
}

/// Refill the window from the buffer's unread head, consuming what it takes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_window_sync(window: *mut SpiralWindow, buffer: *mut SpiralBuffer) {
    if window.is_null() || buffer.is_null() {
        return;
    }
    (*window).0.sync_from(&mut (*buffer).0);
}

/// Advance the window by one slot from the buffer.
///
/// Returns true if a real slot entered, false if a blank did.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_window_advance(
    window: *mut SpiralWindow,
    buffer: *mut SpiralBuffer,
) -> bool {
    if window.is_null() {
        return false;
    }
    if buffer.is_null() {
        (*window).0.advance(None);
        return false;
    }
    (*window).0.advance_from(&mut (*buffer).0).is_some()
}

/// Read the slot at visible position `i`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spiral_window_get(
    window: *const SpiralWindow,
    i: usize,
    slot_out: *mut SpiralSlot,
) -> SpiralResult {
    if window.is_null() || slot_out.is_null() {
        return SpiralResult::NullPointer;
    }
    if i >= (*window).0.capacity() {
        return SpiralResult::OutOfBounds;
    }
    *slot_out = (*window).0.get(i).into();
    SpiralResult::Ok
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the library version string.
#[unsafe(no_mangle)]
pub extern "C" fn spiral_version() -> *const c_char {
    static VERSION: &[u8] = b"0.1.0\0";
    VERSION.as_ptr().cast::<c_char>()
}
