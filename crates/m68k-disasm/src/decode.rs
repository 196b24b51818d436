//! The top-level decode step (D).
//!
//! Mirrors `m68k_disassemble`: peek the opcode word, reject it up front if
//! the matching table entry's CPU gate or second-word validity mask doesn't
//! hold, otherwise commit the opcode word and hand off to the row's
//! [`crate::shape::Shape`]. Every rejection path (`UnknownOpcode`,
//! `BadSecondWord`, `CpuMismatch`) converges on the same `Invalid` record
//! rather than being signalled separately — per this crate's design, errors
//! are values, not a parallel `Result` path.

use crate::cpu_type::CpuType;
use crate::ctx::Ctx;
use crate::instruction::{Extension, Instruction, OpSize};
use crate::operand::Operand;
use crate::reader::Reader;
use crate::shape::{self, ShapeParams};
use crate::table::{table, Descriptor};

/// Decode one instruction at `pc` within `code`, for the given CPU variant.
///
/// Returns the decoded instruction and the number of bytes consumed. On any
/// failure (unknown opcode, CPU-gated opcode, malformed second word) the
/// returned instruction's mnemonic is [`crate::Mnemonic::Invalid`], its sole
/// operand carries the raw opcode word, and exactly 2 bytes are consumed —
/// unless fewer than 2 bytes remain in `code`, in which case the count is
/// clamped to what's actually available.
pub(crate) fn decode(code: &[u8], base_address: u32, pc: u32, cpu: CpuType) -> (Instruction, u8) {
    let address_mask = cpu.address_mask();
    let peek = Reader::new(code, base_address, pc, address_mask);
    let ir = peek.peek_16();
    let available = peek.available();

    let descriptor = table()[ir as usize]
        .descriptor
        .filter(|d| cpu.allows(d.gate))
        .filter(|d| second_word_is_valid(&peek, pc, d));

    match descriptor {
        Some(descriptor) => decode_with(code, base_address, pc, cpu, ir, descriptor, available),
        None => invalid(pc, ir, available),
    }
}

fn second_word_is_valid(peek: &Reader, pc: u32, descriptor: &Descriptor) -> bool {
    if descriptor.word2_mask == 0 {
        return true;
    }
    let word2 = peek.peek_16_at(pc.wrapping_add(2));
    word2 & descriptor.word2_mask == descriptor.word2_match
}

fn decode_with(
    code: &[u8],
    base_address: u32,
    pc: u32,
    cpu: CpuType,
    ir: u16,
    descriptor: &Descriptor,
    available: u32,
) -> (Instruction, u8) {
    let address_mask = cpu.address_mask();
    let mut reader = Reader::new(code, base_address, pc, address_mask);
    reader.read_16();

    let mut ctx = Ctx::new(reader, cpu, ir);
    let params =
        ShapeParams { size: descriptor.size, ea_mask: descriptor.ea_mask, group: descriptor.group };
    let instruction = shape::apply(descriptor.shape, &mut ctx, descriptor.mnemonic, params);

    let consumed = ctx.reader.pc.wrapping_sub(pc).min(available);
    (instruction, clamp_to_u8(consumed))
}

fn invalid(pc: u32, ir: u16, available: u32) -> (Instruction, u8) {
    let mut ext = Extension::new(OpSize::None);
    ext.push(Operand::immediate(i64::from(ir)));
    let instruction =
        Instruction { mnemonic: crate::mnemonic::Mnemonic::Invalid, address: pc, extension: ext, group: None };
    (instruction, clamp_to_u8(2u32.min(available)))
}

fn clamp_to_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::Mnemonic;

    #[test]
    fn moveq_decodes_with_immediate_and_register() {
        let (insn, consumed) = decode(&[0x70, 0x2a], 0, 0, CpuType::M68000);
        assert_eq!(consumed, 2);
        assert_eq!(insn.mnemonic, Mnemonic::Moveq);
        assert_eq!(insn.operands()[0].immediate, 0x2a);
        assert_eq!(insn.operands()[1].reg, 0);
    }

    #[test]
    fn unknown_opcode_decodes_to_invalid() {
        let (insn, consumed) = decode(&[0xff, 0xff], 0, 0, CpuType::M68000);
        assert_eq!(consumed, 2);
        assert_eq!(insn.mnemonic, Mnemonic::Invalid);
        assert_eq!(insn.operands()[0].immediate, 0xffff);
    }

    #[test]
    fn truncated_buffer_clamps_bytes_consumed() {
        let (_, consumed) = decode(&[0x70], 0, 0, CpuType::M68000);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn empty_buffer_consumes_nothing() {
        let (insn, consumed) = decode(&[], 0, 0, CpuType::M68000);
        assert_eq!(consumed, 0);
        assert_eq!(insn.mnemonic, Mnemonic::Invalid);
    }

    #[test]
    fn movec_is_invalid_on_68000_but_decodes_on_68010() {
        let code = [0x4e, 0x7a, 0x10, 0x02];
        let (insn_68000, consumed_68000) = decode(&code, 0, 0, CpuType::M68000);
        assert_eq!(insn_68000.mnemonic, Mnemonic::Invalid);
        assert_eq!(consumed_68000, 2);

        let (insn_68010, consumed_68010) = decode(&code, 0, 0, CpuType::M68010);
        assert_eq!(insn_68010.mnemonic, Mnemonic::Movec);
        assert_eq!(consumed_68010, 4);
    }
}
