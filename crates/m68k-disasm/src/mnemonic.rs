//! The closed enumeration of mnemonics this crate can produce.
//!
//! One variant per distinct instruction identity, not per (size, addressing
//! shape) combination — size and operand shape live in [`crate::Extension`].
//! Condition-coded families (Bcc, DBcc, Scc, TRAPcc) are expanded into one
//! variant per condition rather than carrying a condition field, matching
//! the closed `M68K_INS_*` enumeration this table is transcribed from.

/// A decoded instruction's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Mnemonic {
    Invalid,
    Illegal,

    AbcdRr,
    AbcdMm,
    Add,
    Adda,
    Addi,
    Addq,
    Addx,
    And,
    AndiToCcr,
    AndiToSr,
    Andi,
    Asr,
    Asl,

    Bra,
    Bsr,
    Bhi,
    Bls,
    Bcc,
    Bcs,
    Bne,
    Beq,
    Bvc,
    Bvs,
    Bpl,
    Bmi,
    Bge,
    Blt,
    Bgt,
    Ble,

    Bchg,
    Bclr,
    Bset,
    Btst,

    Bfchg,
    Bfclr,
    Bfexts,
    Bfextu,
    Bfffo,
    Bfins,
    Bfset,
    Bftst,

    Bkpt,
    Callm,

    Cas,
    Cas2,
    Chk,
    Chk2,
    Cmp2,
    Cinvl,
    Cinvp,
    Cinva,
    Cpushl,
    Cpushp,
    Cpusha,

    Clr,
    Cmp,
    Cmpa,
    Cmpi,
    Cmpm,

    Dbt,
    Dbf,
    Dbhi,
    Dbls,
    Dbcc,
    Dbcs,
    Dbne,
    Dbeq,
    Dbvc,
    Dbvs,
    Dbpl,
    Dbmi,
    Dbge,
    Dblt,
    Dbgt,
    Dble,
    Dbra,

    Divs,
    Divu,

    Eor,
    EoriToCcr,
    EoriToSr,
    Eori,
    ExgDd,
    ExgAa,
    ExgDa,
    Ext,
    Extb,

    Fmovecr,
    Fmovem,
    Fmove,
    Fint,
    Fsinh,
    Fintrz,
    Fsqrt,
    Flognp1,
    Fetoxm1,
    Fatanh,
    Fatan,
    Fasin,
    Fsin,
    Ftan,
    Fetox,
    Ftwotox,
    Ftentox,
    Flogn,
    Flog10,
    Flog2,
    Fabs,
    Fcosh,
    Fneg,
    Facos,
    Fcos,
    Fgetexp,
    Fgetman,
    Fdiv,
    Fmod,
    Fadd,
    Fmul,
    Fsgldiv,
    Frem,
    Fscale,
    Fsglmul,
    Fsub,
    Fcmp,
    Ftst,

    Jmp,
    Jsr,
    Lea,
    Link,

    Lsr,
    Lsl,

    Move,
    Movea,
    MoveToCcr,
    MoveFromCcr,
    MoveToSr,
    MoveFromSr,
    MoveToUsp,
    MoveFromUsp,
    Movec,
    Movem,
    Movep,
    Moves,
    Moveq,
    Move16,

    Muls,
    Mulu,

    Nbcd,
    Neg,
    Negx,
    Nop,
    Not,

    Or,
    OriToCcr,
    OriToSr,
    Ori,

    Pack,
    Unpk,
    Pea,

    Reset,
    Ror,
    Rol,
    Roxr,
    Roxl,

    Rtd,
    Rte,
    Rtm,
    Rtr,
    Rts,

    SbcdRr,
    SbcdMm,

    St,
    Sf,
    Shi,
    Sls,
    Scc,
    Scs,
    Sne,
    Seq,
    Svc,
    Svs,
    Spl,
    Smi,
    Sge,
    Slt,
    Sgt,
    Sle,

    Stop,
    Sub,
    Suba,
    Subi,
    Subq,
    Subx,
    Swap,
    Tas,

    Trap,
    Trapt,
    Trapf,
    Traphi,
    Trapls,
    Trapcc,
    Trapcs,
    Trapne,
    Trapeq,
    Trapvc,
    Trapvs,
    Trappl,
    Trapmi,
    Trapge,
    Traplt,
    Trapgt,
    Traple,
    Trapv,

    Tst,
    Unlk,
}

/// 16-entry condition lookup, indexed by `ir[11..8]`, producing the `Bcc`
/// family mnemonic. Position 0/1 (`T`/`F`) are BRA/(reserved, never reached
/// through this table — BRA has its own descriptor row).
pub const BRANCH_CONDITIONS: [Mnemonic; 16] = [
    Mnemonic::Invalid,
    Mnemonic::Invalid,
    Mnemonic::Bhi,
    Mnemonic::Bls,
    Mnemonic::Bcc,
    Mnemonic::Bcs,
    Mnemonic::Bne,
    Mnemonic::Beq,
    Mnemonic::Bvc,
    Mnemonic::Bvs,
    Mnemonic::Bpl,
    Mnemonic::Bmi,
    Mnemonic::Bge,
    Mnemonic::Blt,
    Mnemonic::Bgt,
    Mnemonic::Ble,
];

/// Condition lookup for the `DBcc` family.
pub const DBCC_CONDITIONS: [Mnemonic; 16] = [
    Mnemonic::Dbt,
    Mnemonic::Dbf,
    Mnemonic::Dbhi,
    Mnemonic::Dbls,
    Mnemonic::Dbcc,
    Mnemonic::Dbcs,
    Mnemonic::Dbne,
    Mnemonic::Dbeq,
    Mnemonic::Dbvc,
    Mnemonic::Dbvs,
    Mnemonic::Dbpl,
    Mnemonic::Dbmi,
    Mnemonic::Dbge,
    Mnemonic::Dblt,
    Mnemonic::Dbgt,
    Mnemonic::Dble,
];

/// Condition lookup for the `Scc` family.
pub const SCC_CONDITIONS: [Mnemonic; 16] = [
    Mnemonic::St,
    Mnemonic::Sf,
    Mnemonic::Shi,
    Mnemonic::Sls,
    Mnemonic::Scc,
    Mnemonic::Scs,
    Mnemonic::Sne,
    Mnemonic::Seq,
    Mnemonic::Svc,
    Mnemonic::Svs,
    Mnemonic::Spl,
    Mnemonic::Smi,
    Mnemonic::Sge,
    Mnemonic::Slt,
    Mnemonic::Sgt,
    Mnemonic::Sle,
];

/// Condition lookup for the `TRAPcc` family.
pub const TRAP_CONDITIONS: [Mnemonic; 16] = [
    Mnemonic::Trapt,
    Mnemonic::Trapf,
    Mnemonic::Traphi,
    Mnemonic::Trapls,
    Mnemonic::Trapcc,
    Mnemonic::Trapcs,
    Mnemonic::Trapne,
    Mnemonic::Trapeq,
    Mnemonic::Trapvc,
    Mnemonic::Trapvs,
    Mnemonic::Trappl,
    Mnemonic::Trapmi,
    Mnemonic::Trapge,
    Mnemonic::Traplt,
    Mnemonic::Trapgt,
    Mnemonic::Traple,
];

/// The quick-data table used by `ADDQ`/`SUBQ`/shift-by-immediate: a 3-bit
/// field of 0 encodes the *value* 8, not 0.
pub const QUICK_DATA: [u32; 8] = [8, 1, 2, 3, 4, 5, 6, 7];

/// The 5-bit bitfield-width table: a 5-bit field of 0 encodes *width* 32.
pub const BITFIELD_WIDTH: [u32; 32] = [
    32, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31,
];
