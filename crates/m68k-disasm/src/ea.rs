//! Effective-address parsing.
//!
//! `decode_ea` is the Rust transcription of `get_ea_mode_op`: a 12-way
//! switch over `instruction & 0x3f` covering register-direct, memory
//! indirect, both autoincrement forms, displacement, both indexed forms,
//! both absolute forms, both PC-relative forms, and immediate. `decode_indexed`
//! is `get_with_index_address_mode`: brief vs. full-format extension words
//! for modes 0x30-0x37 and 0x3b.

use crate::ctx::Ctx;
use crate::instruction::OpSize;
use crate::operand::{AddressMode, BitfieldSpec, IndexSize, MemOperand, Operand, RegisterFile};
use crate::reader::{make_int_16, make_int_8};

/// Decode the effective address named by the low 6 bits of `instruction`.
///
/// `instruction` is usually `ctx.ir`, but callers that build the MOVE
/// destination EA pass the bit-swapped field instead, so it's taken as an
/// explicit parameter rather than read from `ctx`.
pub(crate) fn decode_ea(ctx: &mut Ctx, instruction: u16, size: OpSize) -> Operand {
    let field = instruction & 0x3f;
    let reg = (field & 7) as u8;
    match field >> 3 {
        0 => Operand::data_register(reg),
        1 => Operand::address_register(reg),
        2 => indirect(reg),
        3 => post_increment(reg),
        4 => pre_decrement(reg),
        5 => {
            let disp = make_int_16(u32::from(ctx.reader.read_16()));
            displacement(reg, disp)
        }
        6 => decode_indexed(ctx, RegisterFile::Address, reg),
        _ => match field {
            0x38 => {
                let addr = make_int_16(u32::from(ctx.reader.read_16()));
                Operand {
                    mode: AddressMode::AbsoluteShort,
                    immediate: i64::from(addr),
                    ..Operand::NONE
                }
            }
            0x39 => {
                let addr = ctx.reader.read_32();
                Operand {
                    mode: AddressMode::AbsoluteLong,
                    immediate: i64::from(addr),
                    ..Operand::NONE
                }
            }
            0x3a => {
                let disp = make_int_16(u32::from(ctx.reader.read_16()));
                Operand {
                    mode: AddressMode::PcDisplacement,
                    mem: MemOperand { base_displacement: disp, ..MemOperand::default() },
                    ..Operand::NONE
                }
            }
            0x3b => decode_indexed(ctx, RegisterFile::ProgramCounter, 0),
            0x3c => immediate(ctx, size),
            _ => Operand::NONE,
        },
    }
}

fn indirect(reg: u8) -> Operand {
    Operand {
        mode: AddressMode::Indirect,
        mem: MemOperand { base_reg: Some((RegisterFile::Address, reg)), ..MemOperand::default() },
        ..Operand::NONE
    }
}

fn post_increment(reg: u8) -> Operand {
    Operand {
        mode: AddressMode::PostIncrement,
        mem: MemOperand { base_reg: Some((RegisterFile::Address, reg)), ..MemOperand::default() },
        ..Operand::NONE
    }
}

fn pre_decrement(reg: u8) -> Operand {
    Operand {
        mode: AddressMode::PreDecrement,
        mem: MemOperand { base_reg: Some((RegisterFile::Address, reg)), ..MemOperand::default() },
        ..Operand::NONE
    }
}

fn displacement(reg: u8, disp: i32) -> Operand {
    Operand {
        mode: AddressMode::Displacement,
        mem: MemOperand {
            base_reg: Some((RegisterFile::Address, reg)),
            base_displacement: disp,
            ..MemOperand::default()
        },
        ..Operand::NONE
    }
}

fn immediate(ctx: &mut Ctx, size: OpSize) -> Operand {
    let value = match size {
        OpSize::Byte => i64::from(make_int_8(u32::from(ctx.reader.read_16() & 0xff))),
        OpSize::Word => i64::from(make_int_16(u32::from(ctx.reader.read_16()))),
        OpSize::Long => i64::from(ctx.reader.read_32() as i32),
        _ => ctx.reader.read_64() as i64,
    };
    Operand::immediate(value)
}

/// Extension-word field accessors, named after the `EXT_*` macros they
/// correspond to.
mod ext_bits {
    pub(super) const fn full(ext: u16) -> bool {
        ext & 0x0100 != 0
    }
    pub(super) const fn base_register_present(ext: u16) -> bool {
        ext & 0x0080 == 0
    }
    pub(super) const fn index_register_present(ext: u16) -> bool {
        ext & 0x0040 == 0
    }
    pub(super) const fn index_register(ext: u16) -> u8 {
        ((ext >> 12) & 7) as u8
    }
    pub(super) const fn index_is_address(ext: u16) -> bool {
        ext & 0x8000 != 0
    }
    pub(super) const fn index_long(ext: u16) -> bool {
        ext & 0x0800 != 0
    }
    pub(super) const fn scale(ext: u16) -> u8 {
        1u8 << ((ext >> 9) & 3)
    }
    pub(super) const fn pre_post(ext: u16) -> u8 {
        (ext & 7) as u8
    }
    pub(super) const fn base_disp_present(ext: u16) -> bool {
        ext & 0x0030 != 0
    }
    pub(super) const fn base_disp_long(ext: u16) -> bool {
        ext & 0x0030 == 0x0030
    }
    pub(super) const fn outer_disp_present(ext: u16) -> bool {
        ext & 0x0003 != 0
    }
    pub(super) const fn outer_disp_long(ext: u16) -> bool {
        ext & 0x0003 == 0x0003
    }
    /// Whether the brief-format extension word's 8-bit displacement is
    /// non-zero. A zero displacement collapses the addressing mode to the
    /// base+index form rather than the explicit-displacement one.
    pub(super) const fn brief_disp_present(ext: u16) -> bool {
        ext & 0xff != 0
    }
    pub(super) const fn brief_disp(ext: u16) -> i32 {
        super::make_int_8(u32::from(ext & 0xff))
    }
}

fn decode_indexed(ctx: &mut Ctx, base_file: RegisterFile, base_reg: u8) -> Operand {
    let ext = ctx.reader.read_16();

    if ext_bits::full(ext) {
        return decode_indexed_full(ctx, base_file, base_reg, ext);
    }

    let index_reg = ext_bits::index_register(ext);
    let index_file =
        if ext_bits::index_is_address(ext) { RegisterFile::Address } else { RegisterFile::Data };
    let index_size = if ext_bits::index_long(ext) { IndexSize::Long } else { IndexSize::Word };
    let scale = ext_bits::scale(ext);

    let mut mem = MemOperand {
        base_reg: Some((base_file, base_reg)),
        index_reg: Some((index_file, index_reg)),
        index_size: Some(index_size),
        scale,
        ..MemOperand::default()
    };

    let disp_present = ext_bits::brief_disp_present(ext);
    if disp_present {
        mem.base_displacement = ext_bits::brief_disp(ext);
    }

    Operand {
        mode: match (base_file, disp_present) {
            (RegisterFile::ProgramCounter, true) => AddressMode::PcIndex8,
            (RegisterFile::ProgramCounter, false) => AddressMode::PcIndexBaseDisplacement,
            (_, true) => AddressMode::Index8,
            (_, false) => AddressMode::IndexBaseDisplacement,
        },
        mem,
        ..Operand::NONE
    }
}

fn decode_indexed_full(ctx: &mut Ctx, base_file: RegisterFile, base_reg: u8, ext: u16) -> Operand {
    let mut mem = MemOperand::default();

    mem.base_reg = if ext_bits::base_register_present(ext) {
        Some((base_file, base_reg))
    } else {
        None
    };

    if ext_bits::index_register_present(ext) {
        let index_reg = ext_bits::index_register(ext);
        let index_file = if ext_bits::index_is_address(ext) {
            RegisterFile::Address
        } else {
            RegisterFile::Data
        };
        mem.index_reg = Some((index_file, index_reg));
        mem.index_size =
            Some(if ext_bits::index_long(ext) { IndexSize::Long } else { IndexSize::Word });
        mem.scale = ext_bits::scale(ext);
    }

    // "Effective zero": base register suppressed and no indirection at all,
    // meaning the base contributes nothing to the final address.
    mem.effective_zero = mem.base_reg.is_none()
        && !ext_bits::base_disp_present(ext)
        && !ext_bits::outer_disp_present(ext);

    if ext_bits::base_disp_present(ext) {
        mem.base_displacement = if ext_bits::base_disp_long(ext) {
            ctx.reader.read_32() as i32
        } else {
            make_int_16(u32::from(ctx.reader.read_16()))
        };
    }

    if ext_bits::outer_disp_present(ext) {
        mem.outer_displacement = if ext_bits::outer_disp_long(ext) {
            ctx.reader.read_32() as i32
        } else {
            make_int_16(u32::from(ctx.reader.read_16()))
        };
    }

    let pre_post = ext_bits::pre_post(ext);
    let preindex = pre_post > 0 && pre_post < 4;
    let postindex = pre_post > 4;

    let mode = match (base_file, preindex, postindex) {
        (RegisterFile::ProgramCounter, true, _) => AddressMode::PcMemoryIndirectPreIndexed,
        (RegisterFile::ProgramCounter, _, true) => AddressMode::PcMemoryIndirectPostIndexed,
        (RegisterFile::ProgramCounter, false, false) => AddressMode::PcIndexBaseDisplacement,
        (_, true, _) => AddressMode::MemoryIndirectPreIndexed,
        (_, _, true) => AddressMode::MemoryIndirectPostIndexed,
        (_, false, false) => AddressMode::IndexBaseDisplacement,
    };

    Operand { mode, mem, ..Operand::NONE }
}

/// Bitfield static/dynamic offset or width, per the `BIT_B`/`BIT_5` encoding:
/// the dynamic form stores a data-register index directly in the same bits,
/// but offset and width pack that index at different shifts (bits 8-6 for
/// offset, bits 2-0 for width), so the caller names which one applies.
pub(crate) const fn bitfield_field(
    ext: u16,
    dynamic_bit: u16,
    reg_shift: u8,
    static_bits: u8,
) -> BitfieldSpec {
    if ext & dynamic_bit != 0 {
        BitfieldSpec::Dynamic(((ext >> reg_shift) & 7) as u8)
    } else {
        BitfieldSpec::Static(static_bits)
    }
}
