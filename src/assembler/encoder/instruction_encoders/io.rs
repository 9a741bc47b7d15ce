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
use crate::assembler::encoder::operand_validators::confirm_operand_count;
use crate::assembler::encoder::operands::{BracketKind, interpret_bracket};
use crate::ast::{MachineWord, Mnemonic, Token};
use crate::errors::AssemblyError;

impl<'a> Encoder<'a> {
    // INPUTC, INPUTD: `[ v (op k)? ]`, memory selected via field_b
    pub fn encode_input_direct(
        &self,
        opcode: u16,
        channel: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 3, mnemonic.name(), self.line_num)?;

        let bracket = interpret_bracket(
            operands,
            self.symbol_table,
            self.line_num,
            BracketKind::Square,
            false,
            true,
        )?;

        Ok(MachineWord::pack(opcode, 0, channel, bracket.address))
    }

    // INPUTCF, INPUTDF: `[ v + Ri (op k)? ]`, index register in field_a
    pub fn encode_input_indexed(
        &self,
        opcode: u16,
        channel: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 3, mnemonic.name(), self.line_num)?;

        let bracket = interpret_bracket(
            operands,
            self.symbol_table,
            self.line_num,
            BracketKind::Square,
            true,
            true,
        )?;
        let index_register = bracket.register.map(|r| r.field()).unwrap_or(0);

        Ok(MachineWord::pack(
            opcode,
            index_register,
            channel,
            bracket.address,
        ))
    }
}
