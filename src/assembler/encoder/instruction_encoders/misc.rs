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
use crate::ast::{MachineWord, Mnemonic, Token};
use crate::errors::AssemblyError;

impl<'a> Encoder<'a> {
    // NOOP takes no operands at all; surplus tokens are rejected
    // rather than ignored.
    pub fn encode_implied(
        &self,
        opcode: u16,
        operands: &[Token],
        mnemonic: Mnemonic,
    ) -> Result<MachineWord, AssemblyError> {
        if !operands.is_empty() {
            return Err(AssemblyError::Argument {
                line: self.line_num,
                reason: format!(
                    "{} does not have the correct number of arguments ( 0 ).",
                    mnemonic.name()
                ),
            });
        }
        Ok(MachineWord::pack(opcode, 0, 0, 0))
    }
}
