//! Filesystem utilities for check-submodule-branch.
//!
//! `.gitmodules` is only ever replaced atomically.

pub mod atomic;

pub use atomic::atomic_write_file;
