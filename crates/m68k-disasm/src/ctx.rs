//! Shared decode-in-progress state threaded through the EA parser and the
//! operand builders.

use crate::cpu_type::CpuType;
use crate::reader::Reader;

pub(crate) struct Ctx<'a> {
    pub(crate) reader: Reader<'a>,
    pub(crate) cpu: CpuType,
    /// The instruction register: the first, already-consumed opcode word.
    pub(crate) ir: u16,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(reader: Reader<'a>, cpu: CpuType, ir: u16) -> Self {
        Ctx { reader, cpu, ir }
    }
}
