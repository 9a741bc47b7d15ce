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

use crate::assembler::encoder::Encoder;
use crate::assembler::encoder::operand_validators::{
    confirm_comma, confirm_operand_count, find_comma,
};
use crate::assembler::encoder::operands::{BracketKind, grab_register, interpret_bracket};
use crate::ast::{MachineWord, Mnemonic, Token};
use crate::errors::AssemblyError;

impl<'a> Encoder<'a> {
    // LOAD: `Rd , [ v (op k)? ]`
    pub fn encode_load_direct(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 5, mnemonic.name(), self.line_num)?;
        confirm_comma(operands.get(1), self.line_num)?;

        let rd = grab_register(operands.first(), self.line_num)?;
        let bracket = interpret_bracket(
            &operands[2..],
            self.symbol_table,
            self.line_num,
            BracketKind::Square,
            false,
            true,
        )?;

        Ok(MachineWord::pack(opcode, rd.field(), 0, bracket.address))
    }

    // LOADF: `Rd , [ v + Ri (op k)? ]`. The final address depends on
    // Ri at runtime, so the bracket stays permissive.
    pub fn encode_load_indexed(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 7, mnemonic.name(), self.line_num)?;
        confirm_comma(operands.get(1), self.line_num)?;

        let rd = grab_register(operands.first(), self.line_num)?;
        let bracket = interpret_bracket(
            &operands[2..],
            self.symbol_table,
            self.line_num,
            BracketKind::Square,
            true,
            false,
        )?;
        let index_register = bracket.register.map(|r| r.field()).unwrap_or(0);

        Ok(MachineWord::pack(
            opcode,
            rd.field(),
            index_register,
            bracket.address,
        ))
    }

    // LOADP: `Rd , { v (op k)? }`, permissive bounds
    pub fn encode_load_pointer(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 5, mnemonic.name(), self.line_num)?;
        confirm_comma(operands.get(1), self.line_num)?;

        let rd = grab_register(operands.first(), self.line_num)?;
        let bracket = interpret_bracket(
            &operands[2..],
            self.symbol_table,
            self.line_num,
            BracketKind::Curly,
            false,
            false,
        )?;

        Ok(MachineWord::pack(opcode, rd.field(), 0, bracket.address))
    }

    // STORE: `[ v (op k)? ] , Rs`. When the bracket consumed a numeric
    // offset the register token sits two positions further along.
    pub fn encode_store_direct(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 5, mnemonic.name(), self.line_num)?;

        let comma_index = find_comma(operands, self.line_num)?;
        let bracket = interpret_bracket(
            &operands[..comma_index],
            self.symbol_table,
            self.line_num,
            BracketKind::Square,
            false,
            true,
        )?;

        let register_index = if bracket.had_offset { 6 } else { 4 };
        let rs = grab_register(operands.get(register_index), self.line_num)?;

        Ok(MachineWord::pack(opcode, rs.field(), 0, bracket.address))
    }

    // STOREF: `[ v + Ri (op k)? ] , Rs`
    pub fn encode_store_indexed(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 7, mnemonic.name(), self.line_num)?;

        let comma_index = find_comma(operands, self.line_num)?;
        let bracket = interpret_bracket(
            &operands[..comma_index],
            self.symbol_table,
            self.line_num,
            BracketKind::Square,
            true,
            true,
        )?;

        let register_index = if bracket.had_offset { 8 } else { 6 };
        let rs = grab_register(operands.get(register_index), self.line_num)?;
        let index_register = bracket.register.map(|r| r.field()).unwrap_or(0);

        Ok(MachineWord::pack(
            opcode,
            rs.field(),
            index_register,
            bracket.address,
        ))
    }
}
