//! Operand shapes.
//!
//! `AddressMode` enumerates every distinct addressing shape the decoder can
//! produce, mirroring `get_ea_mode_op`/`get_with_index_address_mode`'s
//! branches one-for-one. `Operand` carries whichever fields a given mode
//! actually uses; fields that don't apply stay at their default.

/// A general-purpose or address register index, 0-7.
pub type RegNum = u8;

/// A fully decoded addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Dn
    DataRegister,
    /// An
    AddressRegister,
    /// (An)
    Indirect,
    /// (An)+
    PostIncrement,
    /// -(An)
    PreDecrement,
    /// d16(An)
    Displacement,
    /// d8(An,Xn) with a non-zero 8-bit displacement (brief extension-word
    /// format only).
    Index8,
    /// Brief-format indexed with a zero 8-bit displacement, or a full-format
    /// base/index/outer variant without memory indirection.
    IndexBaseDisplacement,
    /// Full-format memory-indirect pre-indexed: `([bd,An,Xn],od)`.
    MemoryIndirectPreIndexed,
    /// Full-format memory-indirect post-indexed: `([bd,An],Xn,od)`.
    MemoryIndirectPostIndexed,
    /// d16(PC)
    PcDisplacement,
    /// d8(PC,Xn) with a non-zero 8-bit displacement (brief extension-word
    /// format only).
    PcIndex8,
    /// Brief-format PC-relative indexed with a zero 8-bit displacement, or a
    /// full-format PC-relative base/index/outer variant without memory
    /// indirection.
    PcIndexBaseDisplacement,
    PcMemoryIndirectPreIndexed,
    PcMemoryIndirectPostIndexed,
    /// (xxx).W
    AbsoluteShort,
    /// (xxx).L
    AbsoluteLong,
    /// #imm
    Immediate,
    /// A bare register reference with no memory semantics (e.g. the
    /// register argument of `LINK`, `CPUSH`, `MOVEC`).
    RegisterDirect,
    /// A named special register (`CCR`, `SR`, `USP`, or a `MOVEC` control
    /// register).
    SpecialRegister,
    /// A register-list bitmask, as used by `MOVEM`.
    RegisterList,
    /// A register pair, as used by `CAS`/`CAS2` (`Dc:Du` or similar).
    RegisterPair,
    /// No operand is present (this slot is unused).
    None,
}

/// Index register size used inside an indexed addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSize {
    Word,
    Long,
}

/// Which register file an indexed/base register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterFile {
    #[default]
    Data,
    Address,
    ProgramCounter,
    /// An FPU data register (`FP0`-`FP7`), used by the coprocessor shapes.
    Fpu,
}

/// Static vs. dynamic (register-held) bitfield offset/width. The original
/// disassembler packs this into raw extension-word bits with no dedicated
/// tag; this crate models it explicitly instead of replicating that
/// aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitfieldSpec {
    Static(u8),
    /// Holds a data-register index, not a width/offset value.
    Dynamic(RegNum),
}

/// The extra fields used by memory-referencing addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemOperand {
    pub base_reg: Option<(RegisterFile, RegNum)>,
    pub index_reg: Option<(RegisterFile, RegNum)>,
    pub index_size: Option<IndexSize>,
    pub scale: u8,
    pub base_displacement: i32,
    pub outer_displacement: i32,
    /// Set when the full-format extension word's base register is
    /// suppressed (`EXT_EFFECTIVE_ZERO`): the base contributes 0 instead of
    /// the named register's value.
    pub effective_zero: bool,
    pub bitfield_offset: Option<BitfieldSpec>,
    pub bitfield_width: Option<BitfieldSpec>,
}

/// One decoded operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub mode: AddressMode,
    pub reg: RegNum,
    /// Second register, used by `RegisterPair` operands (`CAS`/`CAS2`/`EXG`).
    pub reg2: RegNum,
    /// Which file `reg` names, for modes that don't already imply it
    /// (`RegisterDirect`; `DataRegister`/`AddressRegister` imply their own
    /// file and leave this at the default).
    pub reg_file: RegisterFile,
    pub immediate: i64,
    pub register_bits: u16,
    pub mem: MemOperand,
}

impl Operand {
    pub(crate) const NONE: Operand = Operand {
        mode: AddressMode::None,
        reg: 0,
        reg2: 0,
        reg_file: RegisterFile::Data,
        immediate: 0,
        register_bits: 0,
        mem: MemOperand {
            base_reg: None,
            index_reg: None,
            index_size: None,
            scale: 0,
            base_displacement: 0,
            outer_displacement: 0,
            effective_zero: false,
            bitfield_offset: None,
            bitfield_width: None,
        },
    };

    pub(crate) fn data_register(n: RegNum) -> Self {
        Operand { mode: AddressMode::DataRegister, reg: n, ..Operand::NONE }
    }

    pub(crate) fn address_register(n: RegNum) -> Self {
        Operand { mode: AddressMode::AddressRegister, reg: n, ..Operand::NONE }
    }

    pub(crate) fn register_direct(file: RegisterFile, n: RegNum) -> Self {
        Operand { mode: AddressMode::RegisterDirect, reg: n, reg_file: file, ..Operand::NONE }
    }

    pub(crate) fn immediate(value: i64) -> Self {
        Operand { mode: AddressMode::Immediate, immediate: value, ..Operand::NONE }
    }

    pub(crate) fn special_register(reg: RegNum) -> Self {
        Operand { mode: AddressMode::SpecialRegister, reg, ..Operand::NONE }
    }

    pub(crate) fn register_list(bits: u16) -> Self {
        Operand { mode: AddressMode::RegisterList, register_bits: bits, ..Operand::NONE }
    }

    pub(crate) fn register_pair(a: RegNum, b: RegNum) -> Self {
        Operand { mode: AddressMode::RegisterPair, reg: a, reg2: b, ..Operand::NONE }
    }
}
