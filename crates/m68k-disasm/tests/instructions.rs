//! Whole-instruction decode tests against the public API.

use m68k_disasm::{AddressMode, CpuType, Decoder, Group, Mnemonic, RegisterFile};

#[test]
fn moveq_decodes_an_inline_sign_extended_immediate() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x70, 0x2a], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 2);
    assert_eq!(insn.mnemonic, Mnemonic::Moveq);
    let ops = insn.operands();
    assert_eq!(ops[0].immediate, 0x2a);
    assert_eq!(ops[1].mode, AddressMode::DataRegister);
    assert_eq!(ops[1].reg, 0);
}

#[test]
fn add_w_decodes_register_to_register() {
    // ADD.W D1,D0
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0xd0, 0x41], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 2);
    assert_eq!(insn.mnemonic, Mnemonic::Add);
    let ops = insn.operands();
    assert_eq!(ops[0].mode, AddressMode::DataRegister);
    assert_eq!(ops[0].reg, 1);
    assert_eq!(ops[1].mode, AddressMode::DataRegister);
    assert_eq!(ops[1].reg, 0);
}

#[test]
fn nop_has_no_operands() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x4e, 0x71], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 2);
    assert_eq!(insn.mnemonic, Mnemonic::Nop);
    assert!(insn.operands().is_empty());
}

#[test]
fn bra_b_carries_its_raw_signed_byte_displacement() {
    // BRA.B *+0 (branches back to itself: displacement -2)
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x60, 0xfe], 0, 0x1000, CpuType::M68000);

    assert_eq!(consumed, 2);
    assert_eq!(insn.mnemonic, Mnemonic::Bra);
    assert_eq!(insn.operands()[0].immediate, -2);
    assert_eq!(insn.address, 0x1000);
}

#[test]
fn rts_is_classified_as_a_return() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x4e, 0x75], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 2);
    assert_eq!(insn.mnemonic, Mnemonic::Rts);
    assert_eq!(insn.group, Some(Group::Ret));
    assert!(insn.operands().is_empty());
}

#[test]
fn movem_w_predecrement_stores_the_register_mask_bit_reversed() {
    // MOVEM.W D0/D1/A0/A1,-(A7) — register list 0x0303, -(A7)
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x48, 0xa7, 0xc0, 0xc0], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 4);
    assert_eq!(insn.mnemonic, Mnemonic::Movem);
    let ops = insn.operands();
    assert_eq!(ops[0].mode, AddressMode::RegisterList);
    assert_eq!(ops[0].register_bits, 0x0303);
    assert_eq!(ops[1].mode, AddressMode::PreDecrement);
    assert_eq!(ops[1].mem.base_reg, Some((RegisterFile::Address, 7)));
}

#[test]
fn movec_is_gated_off_on_68000_but_decodes_on_68010() {
    // MOVEC D1,CACR
    let code = [0x4e, 0x7a, 0x10, 0x02];
    let decoder = Decoder::new();

    let (insn_68000, consumed_68000) = decoder.decode(&code, 0, 0, CpuType::M68000);
    assert_eq!(insn_68000.mnemonic, Mnemonic::Invalid);
    assert_eq!(consumed_68000, 2);

    let (insn_68010, consumed_68010) = decoder.decode(&code, 0, 0, CpuType::M68010);
    assert_eq!(consumed_68010, 4);
    assert_eq!(insn_68010.mnemonic, Mnemonic::Movec);
    let ops = insn_68010.operands();
    assert_eq!(ops[0].mode, AddressMode::SpecialRegister);
    assert_eq!(ops[0].reg, 0x02); // CACR
    assert_eq!(ops[1].mode, AddressMode::RegisterDirect);
    assert_eq!(ops[1].reg_file, RegisterFile::Data);
    assert_eq!(ops[1].reg, 1);
}

#[test]
fn fmovecr_reads_a_rom_constant_into_an_fpu_register() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0xf2, 0x00, 0x5c, 0x01], 0, 0, CpuType::M68020);

    assert_eq!(consumed, 4);
    assert_eq!(insn.mnemonic, Mnemonic::Fmovecr);
    let ops = insn.operands();
    assert_eq!(ops[0].immediate, 1);
    assert_eq!(ops[1].mode, AddressMode::RegisterDirect);
    assert_eq!(ops[1].reg_file, RegisterFile::Fpu);
    assert_eq!(ops[1].reg, 0);
}

#[test]
fn fmovecr_is_invalid_on_a_plain_68000() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0xf2, 0x00, 0x5c, 0x01], 0, 0, CpuType::M68000);
    assert_eq!(insn.mnemonic, Mnemonic::Invalid);
    assert_eq!(consumed, 2);
}

#[test]
fn bfextu_decodes_a_static_full_width_field_from_a_data_register() {
    // BFEXTU D0{0:32},D0
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0xe9, 0xc0, 0x00, 0x00], 0, 0, CpuType::M68020);

    assert_eq!(consumed, 4);
    assert_eq!(insn.mnemonic, Mnemonic::Bfextu);
    let ops = insn.operands();
    assert_eq!(ops[0].mode, AddressMode::DataRegister);
    assert_eq!(ops[0].reg, 0);
    assert_eq!(
        ops[0].mem.bitfield_offset,
        Some(m68k_disasm::BitfieldSpec::Static(0))
    );
    assert_eq!(
        ops[0].mem.bitfield_width,
        Some(m68k_disasm::BitfieldSpec::Static(32))
    );
    assert_eq!(ops[1].mode, AddressMode::DataRegister);
    assert_eq!(ops[1].reg, 0);
}

#[test]
fn bfextu_is_gated_off_before_68020() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0xe9, 0xc0, 0x00, 0x00], 0, 0, CpuType::M68010);
    assert_eq!(insn.mnemonic, Mnemonic::Invalid);
    assert_eq!(consumed, 2);
}

#[test]
fn cas2_decodes_three_register_pairs_from_its_two_extension_words() {
    let decoder = Decoder::new();
    let code = [0x0c, 0xfc, 0x10, 0x83, 0x41, 0x46];
    let (insn, consumed) = decoder.decode(&code, 0, 0, CpuType::M68020);

    assert_eq!(consumed, 6);
    assert_eq!(insn.mnemonic, Mnemonic::Cas2);
    let ops = insn.operands();
    assert_eq!(ops[0].mode, AddressMode::RegisterPair);
    assert_eq!((ops[0].reg, ops[0].reg2), (3, 6));
    assert_eq!(ops[1].mode, AddressMode::RegisterPair);
    assert_eq!((ops[1].reg, ops[1].reg2), (2, 5));
    assert_eq!(ops[2].mode, AddressMode::RegisterPair);
    assert_eq!((ops[2].reg, ops[2].reg2), (1, 4));
}

#[test]
fn decoding_is_deterministic_across_repeated_calls() {
    let decoder = Decoder::new();
    let code = [0x4e, 0x75];
    let first = decoder.decode(&code, 0, 0, CpuType::M68000);
    let second = decoder.decode(&code, 0, 0, CpuType::M68000);
    assert_eq!(first.0.mnemonic, second.0.mnemonic);
    assert_eq!(first.1, second.1);
}

#[test]
fn an_unrecognized_opcode_falls_back_to_invalid_with_its_raw_word() {
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0xff, 0xff], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 2);
    assert_eq!(insn.mnemonic, Mnemonic::Invalid);
    assert_eq!(insn.operands()[0].immediate, 0xffff);
}

#[test]
fn a_truncated_buffer_clamps_bytes_consumed_without_panicking() {
    let decoder = Decoder::new();
    let (_, consumed) = decoder.decode(&[0x48, 0xa7], 0, 0, CpuType::M68000);
    assert_eq!(consumed, 2);
}

#[test]
fn brief_indexed_with_zero_displacement_is_tagged_index_base_displacement() {
    // LEA (0,A0,D0.W),A1
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x43, 0xf0, 0x00, 0x00], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 4);
    assert_eq!(insn.mnemonic, Mnemonic::Lea);
    assert_eq!(insn.operands()[0].mode, AddressMode::IndexBaseDisplacement);
}

#[test]
fn brief_indexed_with_nonzero_displacement_is_tagged_index8() {
    // LEA (5,A0,D0.W),A1
    let decoder = Decoder::new();
    let (insn, consumed) = decoder.decode(&[0x43, 0xf0, 0x00, 0x05], 0, 0, CpuType::M68000);

    assert_eq!(consumed, 4);
    assert_eq!(insn.mnemonic, Mnemonic::Lea);
    assert_eq!(insn.operands()[0].mode, AddressMode::Index8);
}

#[test]
fn pc_relative_brief_indexed_distinguishes_zero_and_nonzero_displacement() {
    // LEA d8(PC,D0.W),A0, once with a zero displacement and once with 7.
    let decoder = Decoder::new();

    let (zero_disp, _) = decoder.decode(&[0x41, 0xfb, 0x00, 0x00], 0, 0, CpuType::M68000);
    assert_eq!(zero_disp.operands()[0].mode, AddressMode::PcIndexBaseDisplacement);

    let (nonzero_disp, _) = decoder.decode(&[0x41, 0xfb, 0x00, 0x07], 0, 0, CpuType::M68000);
    assert_eq!(nonzero_disp.operands()[0].mode, AddressMode::PcIndex8);
}
