//! Layout-aware decoding of memory captured from another process.
//!
//! Values are reconstructed following the target's own alignment, padding,
//! pointer width and byte order rather than the host's.

/// Shapes, machine layout, bounded cursor, pools, and the decode engine.
pub mod memory;
