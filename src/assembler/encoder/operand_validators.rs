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

use crate::ast::Token;
use crate::errors::AssemblyError;

// Operand counts are minimums; surplus tokens are caught by the
// operand parsers where they matter.
pub fn confirm_operand_count(
    found: usize,
    required: usize,
    mnemonic: &str,
    line_num: usize,
) -> Result<(), AssemblyError> {
    if found < required {
        return Err(AssemblyError::Argument {
            line: line_num,
            reason: format!(
                "{} does not have the correct number of arguments ( {} ).",
                mnemonic, required
            ),
        });
    }
    Ok(())
}

pub fn confirm_comma(token: Option<&Token>, line_num: usize) -> Result<(), AssemblyError> {
    match token {
        Some(Token::Comma) => Ok(()),
        _ => Err(AssemblyError::Instruction {
            line: line_num,
            reason: "Token is not a comma.".to_string(),
        }),
    }
}

/// Position of the comma separating a store's bracketed destination
/// from its source register.
pub fn find_comma(tokens: &[Token], line_num: usize) -> Result<usize, AssemblyError> {
    tokens
        .iter()
        .position(|token| matches!(token, Token::Comma))
        .ok_or_else(|| AssemblyError::Instruction {
            line: line_num,
            reason: "Instruction is missing a comma.".to_string(),
        })
}
