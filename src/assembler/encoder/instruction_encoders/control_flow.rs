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

use crate::assembler::branch_table::get_branch;
use crate::assembler::encoder::Encoder;
use crate::assembler::encoder::components::immediate_byte;
use crate::assembler::encoder::operand_validators::confirm_operand_count;
use crate::ast::{MachineWord, Mnemonic, Token};
use crate::errors::AssemblyError;

impl<'a> Encoder<'a> {
    // JUMP and the BR* family: a single label operand, condition in
    // field_b. The displacement is relative to the next instruction:
    // target - (index + 1), rendered as a two's-complement byte.
    pub fn encode_branch(
        &self,
        opcode: u16,
        condition: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        confirm_operand_count(operands.len(), 1, mnemonic.name(), self.line_num)?;
        if operands.len() != 1 {
            return Err(AssemblyError::Argument {
                line: self.line_num,
                reason: format!(
                    "{} does not have the correct number of arguments ( 1 ).",
                    operands[0]
                ),
            });
        }

        let label = operands[0].to_string();
        let target = get_branch(self.branch_table, &label, self.line_num)?;
        let displacement = target as i64 - (self.line_num as i64 + 1);

        Ok(MachineWord::pack(
            opcode,
            0,
            condition,
            immediate_byte(displacement),
        ))
    }
}
