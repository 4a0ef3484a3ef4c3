// kernel/src/boot.rs
//! Boot stub
//!
//! The loader scans the image for a multiboot v1 header, switches to 32-bit
//! protected mode (flat, unpaged) and jumps to `_start`. From there:
//! 1. point `esp` at the top of a static stack
//! 2. call the binary's main routine (never returns)
//! 3. should it return anyway: interrupts off, halt forever

use bitflags::bitflags;

pub const MULTIBOOT_MAGIC: u32 = 0x1BAD_B002;

/// Size of the only stack the kernel ever runs on.
pub const BOOT_STACK_SIZE: usize = 64 * 1024;

bitflags! {
    /// Requests a multiboot v1 loader must honour.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeaderFlags: u32 {
        /// Boot modules aligned on 4 KiB pages.
        const PAGE_ALIGN  = 1 << 0;
        /// Fill the memory fields of the info structure.
        const MEMORY_INFO = 1 << 1;
        /// Video mode fields are present (unused: text mode is the default).
        const VIDEO_MODE  = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct MultibootHeader {
    pub magic: u32,
    pub flags: u32,
    pub checksum: u32,
}

impl MultibootHeader {
    /// Page-aligned modules + memory info: `0x1BADB002, 0x3, 0xE4524FFB`.
    pub const DEFAULT: Self =
        Self::new(HeaderFlags::PAGE_ALIGN.union(HeaderFlags::MEMORY_INFO));

    pub const fn new(flags: HeaderFlags) -> Self {
        let flags = flags.bits();
        Self {
            magic: MULTIBOOT_MAGIC,
            flags,
            checksum: 0u32.wrapping_sub(MULTIBOOT_MAGIC.wrapping_add(flags)),
        }
    }

    /// magic + flags + checksum must wrap to zero.
    pub const fn is_valid(&self) -> bool {
        self.magic == MULTIBOOT_MAGIC
            && self.magic.wrapping_add(self.flags).wrapping_add(self.checksum) == 0
    }
}

#[repr(C, align(16))]
pub struct BootStack([u8; BOOT_STACK_SIZE]);

pub static mut BOOT_STACK: BootStack = BootStack([0; BOOT_STACK_SIZE]);

// —————————————————— entry ——————————————————

/// Emits the multiboot header and the `_start` stub for a binary, then hands
/// control to `$main: fn() -> !`.
///
/// Must be invoked from the binary crate: the linker keeps only what the
/// binary pulls in.
#[macro_export]
macro_rules! entry_point {
    ($main:path) => {
        #[used]
        #[link_section = ".multiboot"]
        static __MULTIBOOT_HEADER: $crate::boot::MultibootHeader =
            $crate::boot::MultibootHeader::DEFAULT;

        extern "C" fn __kernel_entry() -> ! {
            let main: fn() -> ! = $main;
            main()
        }

        #[cfg(all(target_arch = "x86", target_os = "none"))]
        ::core::arch::global_asm!(
            ".section .text._start, \"ax\"",
            ".global _start",
            "_start:",
            "    mov esp, offset {stack} + {size}",
            "    xor ebp, ebp",
            "    call {entry}",
            "2:",
            "    cli",
            "    hlt",
            "    jmp 2b",
            stack = sym $crate::boot::BOOT_STACK,
            size = const $crate::boot::BOOT_STACK_SIZE,
            entry = sym __kernel_entry,
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_loader_contract() {
        assert_eq!(MultibootHeader::DEFAULT.magic, 0x1BADB002);
        assert_eq!(MultibootHeader::DEFAULT.flags, 0x0000_0003);
        assert_eq!(MultibootHeader::DEFAULT.checksum, 0xE452_4FFB);
        assert!(MultibootHeader::DEFAULT.is_valid());
    }

    #[test]
    fn checksum_holds_for_any_flags() {
        for flags in [HeaderFlags::empty(), HeaderFlags::all(), HeaderFlags::VIDEO_MODE] {
            assert!(MultibootHeader::new(flags).is_valid());
        }
        let mut broken = MultibootHeader::new(HeaderFlags::PAGE_ALIGN);
        broken.checksum ^= 1;
        assert!(!broken.is_valid());
    }

    #[test]
    fn header_is_three_words() {
        assert_eq!(core::mem::size_of::<MultibootHeader>(), 12);
    }
}
