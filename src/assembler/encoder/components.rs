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

/// Renders a value as the 8-bit two's-complement field_c byte.
pub fn immediate_byte(value: i64) -> u16 {
    (value & 0xFF) as u16
}

/// Parses an integer literal token: decimal digits with an optional
/// leading minus sign. The tokenizer splits the sign off the digits,
/// so callers that accept signed literals match the minus token
/// themselves and negate the parsed digits; a lone minus token is
/// rejected here.
pub fn parse_integer(token: &Token, line_num: usize) -> Result<i64, AssemblyError> {
    let text = token.to_string();

    if let Some(rest) = text.strip_prefix('-') {
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AssemblyError::Value {
                line: line_num,
                reason: format!("Negative integer given ( {} ) is invalid.", text),
                source_line: None,
            });
        }
    } else if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AssemblyError::Value {
            line: line_num,
            reason: format!("Positive integer given ( {} ) is invalid.", text),
            source_line: None,
        });
    }

    text.parse::<i64>().map_err(|_| AssemblyError::Value {
        line: line_num,
        reason: format!("Integer given ( {} ) is out of range.", text),
        source_line: None,
    })
}

// ------------- unit tests -------------
