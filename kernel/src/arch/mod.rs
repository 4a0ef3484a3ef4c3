//! Architecture support. Only 32-bit x86 is booted; the drivers also build on
//! x86_64 hosts so the crate type-checks everywhere it is tested.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;
