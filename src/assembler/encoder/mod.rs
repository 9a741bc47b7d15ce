/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

pub mod components;
pub mod constants;
mod instruction_encoders;
pub mod operand_validators;
pub mod operands;

use crate::assembler::branch_table::BranchTable;
use crate::assembler::encoder::constants::*;
use crate::assembler::symbol_table::SymbolTable;
use crate::ast::{CodeLine, MachineWord, Mnemonic, Token};
use crate::errors::AssemblyError;

// Per-instruction encoding context, shared by the format encoders in
// instruction_encoders/.
pub struct Encoder<'a> {
    pub symbol_table: &'a SymbolTable,
    pub branch_table: &'a BranchTable,
    pub line_num: usize,
}

// The operand format of an instruction. Twelve formats cover all 26
// mnemonics; field_b selectors ride along where a format is shared.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Implied,
    InputDirect(u16),
    InputIndexed(u16),
    RegisterPair,
    RegisterImmediate,
    LoadDirect,
    LoadIndexed,
    LoadPointer,
    StoreDirect,
    StoreIndexed,
    Shift(u16),
    Branch(u16),
}

/// The instruction table: opcode nibble and operand format for every
/// mnemonic.
pub fn instruction_format(mnemonic: Mnemonic) -> (u16, Format) {
    match mnemonic {
        Mnemonic::Noop => (NOOP_OPCODE, Format::Implied),
        Mnemonic::Inputc => (INPUT_OPCODE, Format::InputDirect(INPUT_CODE)),
        Mnemonic::Inputcf => (INPUT_OPCODE, Format::InputIndexed(INPUT_CODE_INDEXED)),
        Mnemonic::Inputd => (INPUT_OPCODE, Format::InputDirect(INPUT_DATA)),
        Mnemonic::Inputdf => (INPUT_OPCODE, Format::InputIndexed(INPUT_DATA_INDEXED)),
        Mnemonic::Move => (MOVE_OPCODE, Format::RegisterPair),
        Mnemonic::Loadi => (LOADI_OPCODE, Format::RegisterImmediate),
        Mnemonic::Loadp => (LOADI_OPCODE, Format::LoadPointer),
        Mnemonic::Add => (ADD_OPCODE, Format::RegisterPair),
        Mnemonic::Addi => (ADDI_OPCODE, Format::RegisterImmediate),
        Mnemonic::Sub => (SUB_OPCODE, Format::RegisterPair),
        Mnemonic::Subi => (SUBI_OPCODE, Format::RegisterImmediate),
        Mnemonic::Load => (LOAD_OPCODE, Format::LoadDirect),
        Mnemonic::Loadf => (LOADF_OPCODE, Format::LoadIndexed),
        Mnemonic::Store => (STORE_OPCODE, Format::StoreDirect),
        Mnemonic::Storef => (STOREF_OPCODE, Format::StoreIndexed),
        Mnemonic::Shiftl => (SHIFT_OPCODE, Format::Shift(SHIFT_LEFT)),
        Mnemonic::Shiftr => (SHIFT_OPCODE, Format::Shift(SHIFT_RIGHT)),
        Mnemonic::Cmp => (CMP_OPCODE, Format::RegisterPair),
        Mnemonic::Jump => (JUMP_OPCODE, Format::Branch(BRANCH_ALWAYS)),
        Mnemonic::Bre | Mnemonic::Brz => (BRANCH_OPCODE, Format::Branch(BRANCH_EQ)),
        Mnemonic::Brne | Mnemonic::Brnz => (BRANCH_OPCODE, Format::Branch(BRANCH_NE)),
        Mnemonic::Brg => (BRANCH_OPCODE, Format::Branch(BRANCH_GT)),
        Mnemonic::Brge => (BRANCH_OPCODE, Format::Branch(BRANCH_GE)),
    }
}

/// Translates a single code line into its machine word.
pub fn encode_instruction(
    line: &CodeLine,
    symbol_table: &SymbolTable,
    branch_table: &BranchTable,
) -> Result<MachineWord, AssemblyError> {
    let mnemonic = match line.tokens.first() {
        Some(Token::Word(name)) => Mnemonic::parse(name),
        Some(_) => None,
        None => {
            // A label line whose instruction slot is empty.
            return Err(AssemblyError::Instruction {
                line: line.index,
                reason: "Instruction is missing an opcode.".to_string(),
            });
        }
    }
    .ok_or_else(|| AssemblyError::Instruction {
        line: line.index,
        reason: "Opcode is not valid".to_string(),
    })?;

    let encoder = Encoder {
        symbol_table,
        branch_table,
        line_num: line.index,
    };
    let operands = &line.tokens[1..];
    let (opcode, format) = instruction_format(mnemonic);

    match format {
        Format::Implied => encoder.encode_implied(opcode, operands, mnemonic),
        Format::InputDirect(channel) => {
            encoder.encode_input_direct(opcode, channel, operands, mnemonic)
        }
        Format::InputIndexed(channel) => {
            encoder.encode_input_indexed(opcode, channel, operands, mnemonic)
        }
        Format::RegisterPair => encoder.encode_register_pair(opcode, operands, mnemonic),
        Format::RegisterImmediate => encoder.encode_register_immediate(opcode, operands, mnemonic),
        Format::LoadDirect => encoder.encode_load_direct(opcode, operands, mnemonic),
        Format::LoadIndexed => encoder.encode_load_indexed(opcode, operands, mnemonic),
        Format::LoadPointer => encoder.encode_load_pointer(opcode, operands, mnemonic),
        Format::StoreDirect => encoder.encode_store_direct(opcode, operands, mnemonic),
        Format::StoreIndexed => encoder.encode_store_indexed(opcode, operands, mnemonic),
        Format::Shift(direction) => encoder.encode_shift(opcode, direction, operands, mnemonic),
        Format::Branch(condition) => encoder.encode_branch(opcode, condition, operands, mnemonic),
    }
}

// ------------- unit tests -------------
