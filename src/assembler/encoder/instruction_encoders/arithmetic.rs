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
use crate::assembler::encoder::components::{immediate_byte, parse_integer};
use crate::assembler::encoder::operand_validators::{confirm_comma, confirm_operand_count};
use crate::assembler::encoder::operands::grab_register;
use crate::ast::{MachineWord, Mnemonic, Token};
use crate::errors::AssemblyError;

impl<'a> Encoder<'a> {
    // MOVE, ADD, SUB, CMP: `Rd , Rs`
    pub fn encode_register_pair(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 3, mnemonic.name(), self.line_num)?;
        confirm_comma(operands.get(1), self.line_num)?;

        let rd = grab_register(operands.first(), self.line_num)?;
        let rs = grab_register(operands.get(2), self.line_num)?;

        Ok(MachineWord::pack(opcode, rd.field(), rs.field(), 0))
    }

    // LOADI, ADDI, SUBI: `Rd , k`. The tokenizer splits a sign off the
    // digits, so a negative literal arrives as a minus token followed
    // by the digit token.
    pub fn encode_register_immediate(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 3, mnemonic.name(), self.line_num)?;
        confirm_comma(operands.get(1), self.line_num)?;

        let rd = grab_register(operands.first(), self.line_num)?;
        let value = match &operands[2] {
            Token::Minus => match operands.get(3) {
                Some(digits) => -parse_integer(digits, self.line_num)?,
                None => {
                    return Err(AssemblyError::Value {
                        line: self.line_num,
                        reason: "Negative integer given ( - ) is invalid.".to_string(),
                        source_line: None,
                    });
                }
            },
            token => parse_integer(token, self.line_num)?,
        };

        Ok(MachineWord::pack(
            opcode,
            rd.field(),
            0,
            immediate_byte(value),
        ))
    }

    // SHIFTL, SHIFTR: `Rd`, direction in field_b
    pub fn encode_shift(
        &self,
        opcode: u16,
        direction: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 1, mnemonic.name(), self.line_num)?;

        let rd = grab_register(operands.first(), self.line_num)?;

        Ok(MachineWord::pack(opcode, rd.field(), direction, 0))
    }
}
