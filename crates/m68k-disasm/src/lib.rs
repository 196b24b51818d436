//! A disassembler for the Motorola 680x0 family (68000, 68010, 68020, 68030,
//! 68040, and the EC020 memory-map variant).
//!
//! Given a byte buffer and a start address, [`Decoder::decode`] decodes a
//! single instruction into a structured [`Instruction`] record: mnemonic,
//! operand list, operand size, and an optional control-flow [`Group`]
//! classification. It does not execute, simulate, or print anything; that's
//! left to callers such as a disassembly-listing tool or a future printer
//! built on top of this crate.
//!
//! The decoder is a pure function of its inputs (see [`Decoder::decode`])
//! apart from a lazily-built, process-wide dispatch table: the first call
//! from any thread pays the cost of building and sorting roughly 250 opcode
//! descriptors into a 64k-entry jump table; every call after that is a
//! constant-time lookup, with no further allocation or synchronization.
//!
//! ```
//! use m68k_disasm::{CpuType, Decoder, Mnemonic};
//!
//! let decoder = Decoder::new();
//! let (insn, bytes_consumed) = decoder.decode(&[0x70, 0x2a], 0, 0, CpuType::M68000);
//! assert_eq!(insn.mnemonic, Mnemonic::Moveq);
//! assert_eq!(bytes_consumed, 2);
//! ```

mod cpu_type;
mod ctx;
mod decode;
mod ea;
mod instruction;
mod mnemonic;
mod operand;
mod reader;
mod shape;
mod table;

pub use cpu_type::{CpuCapabilities, CpuType};
pub use instruction::{Extension, Group, Instruction, OpSize};
pub use mnemonic::Mnemonic;
pub use operand::{AddressMode, BitfieldSpec, IndexSize, MemOperand, Operand, RegNum, RegisterFile};

/// The entry point into the decoder.
///
/// Holds no per-instance state; it exists so the API reads like other
/// stateful decoders in this workspace (`motorola-68000::Cpu`,
/// `cpu-m68k::Cpu`) and so a future revision can grow instance-level
/// configuration (e.g. a symbol resolver for branch targets) without
/// breaking callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    _private: (),
}

impl Decoder {
    /// Create a new decoder. Cheap: this does not build the dispatch table.
    #[must_use]
    pub const fn new() -> Self {
        Decoder { _private: () }
    }

    /// Decode one instruction from `code`, starting at `pc` (absolute).
    ///
    /// `base_address` is the absolute address the start of `code`
    /// corresponds to; it only differs from the caller's notion of "address
    /// zero" when `code` is a window into a larger address space. `cpu`
    /// selects both the instruction-set gate and the address mask applied
    /// to every fetch (24-bit for 68000/68010/EC020, 32-bit otherwise).
    ///
    /// Returns the decoded [`Instruction`] and the number of bytes consumed.
    /// Decoding never fails outright: an opcode this decoder doesn't
    /// recognize, can't validate a second extension word for, or that isn't
    /// implemented on the requested `cpu` all produce an `Instruction` whose
    /// mnemonic is [`Mnemonic::Invalid`] and whose sole operand carries the
    /// raw opcode word, consuming 2 bytes (clamped to however many bytes
    /// `code` actually has left from `pc`).
    #[must_use]
    pub fn decode(&self, code: &[u8], base_address: u32, pc: u32, cpu: CpuType) -> (Instruction, u8) {
        decode::decode(code, base_address, pc, cpu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_is_stateless_and_reusable() {
        let decoder = Decoder::new();
        let (a, _) = decoder.decode(&[0x4e, 0x71], 0, 0, CpuType::M68000);
        let (b, _) = decoder.decode(&[0x4e, 0x71], 0, 100, CpuType::M68000);
        assert_eq!(a.mnemonic, b.mnemonic);
        assert_eq!(a.mnemonic, Mnemonic::Nop);
    }

    #[test]
    fn concurrent_first_calls_see_a_consistent_table() {
        use std::thread;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    let decoder = Decoder::new();
                    decoder.decode(&[0x4e, 0x75], 0, 0, CpuType::M68000).0.mnemonic
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Mnemonic::Rts);
        }
    }
}
