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

use crate::assembler::encoder::components::immediate_byte;
use crate::assembler::encoder::constants::MAX_DATA_ADDRESS;
use crate::assembler::symbol_table::{SymbolTable, find_data_address};
use crate::ast::{Register, Token};
use crate::errors::AssemblyError;

// The two bracketed addressing grammars:
//   [ name ( + reg ( op k )? )? ]
//   { name ( op k )? }
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketKind {
    Square,
    Curly,
}

impl BracketKind {
    fn is_open(&self, token: &Token) -> bool {
        match self {
            BracketKind::Square => matches!(token, Token::OpenBracket),
            BracketKind::Curly => matches!(token, Token::OpenBrace),
        }
    }

    fn is_close(&self, token: &Token) -> bool {
        match self {
            BracketKind::Square => matches!(token, Token::CloseBracket),
            BracketKind::Curly => matches!(token, Token::CloseBrace),
        }
    }
}

// The result of parsing one bracketed operand: the rendered address
// byte, whether a numeric offset was consumed (store encoders use this
// to locate their register token), and the index register if the form
// carries one.
#[derive(Debug, PartialEq)]
pub struct BracketOperand {
    pub address: u16,
    pub had_offset: bool,
    pub register: Option<Register>,
}

/// Parses a bracketed addressing operand. `tokens` must span the
/// bracket exactly, opening token through closing token. Strict
/// callers reject resolved addresses outside [0, 63]; LOADP and LOADF
/// derive their final address at runtime and stay permissive.
pub fn interpret_bracket(
    tokens: &[Token],
    symbol_table: &SymbolTable,
    line_num: usize,
    kind: BracketKind,
    with_register: bool,
    strict_bounds: bool,
) -> Result<BracketOperand, AssemblyError> {
    if tokens.len() < 3 {
        return Err(AssemblyError::Argument {
            line: line_num,
            reason: "Invalid number of arguments.".to_string(),
        });
    }

    if !kind.is_open(&tokens[0]) {
        return Err(AssemblyError::Argument {
            line: line_num,
            reason: "Invalid left bracket found in instruction.".to_string(),
        });
    }

    let base = match &tokens[1] {
        Token::Word(name) => find_data_address(symbol_table, name, line_num)? as i64,
        _ => {
            return Err(AssemblyError::Argument {
                line: line_num,
                reason: "No data allocated with variable name used.".to_string(),
            });
        }
    };

    let mut position = 2;
    let mut register = None;
    if with_register {
        if !matches!(tokens.get(position), Some(Token::Plus)) {
            return Err(AssemblyError::Argument {
                line: line_num,
                reason: "Operator ( + ) is missing from arguments.".to_string(),
            });
        }
        register = Some(grab_register(tokens.get(position + 1), line_num)?);
        position += 2;
    }

    let mut address = base;
    let mut had_offset = false;
    match tokens.get(position) {
        Some(token) if kind.is_close(token) => position += 1,
        Some(operator @ (Token::Plus | Token::Minus)) => {
            let offset = match tokens.get(position + 1) {
                Some(Token::Word(digits))
                    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    digits.parse::<i64>().map_err(|_| AssemblyError::Value {
                        line: line_num,
                        reason: "Offset argument is not a number.".to_string(),
                        source_line: None,
                    })?
                }
                _ => {
                    return Err(AssemblyError::Value {
                        line: line_num,
                        reason: "Offset argument is not a number.".to_string(),
                        source_line: None,
                    });
                }
            };

            if matches!(operator, Token::Plus) {
                address += offset;
            } else {
                address -= offset;
            }
            had_offset = true;
            position += 2;

            if !tokens.get(position).is_some_and(|token| kind.is_close(token)) {
                return Err(AssemblyError::Value {
                    line: line_num,
                    reason: "Right bracket is not valid or missing.".to_string(),
                    source_line: None,
                });
            }
            position += 1;
        }
        Some(other) => {
            return Err(AssemblyError::Argument {
                line: line_num,
                reason: format!("Invalid operator ( {} ) used.", other),
            });
        }
        None => {
            return Err(AssemblyError::Value {
                line: line_num,
                reason: "Right bracket is not valid or missing.".to_string(),
                source_line: None,
            });
        }
    }

    if position != tokens.len() {
        return Err(AssemblyError::Value {
            line: line_num,
            reason: "Right bracket is not valid or missing.".to_string(),
            source_line: None,
        });
    }

    confirm_valid_address(address, strict_bounds, line_num)?;

    Ok(BracketOperand {
        address: immediate_byte(address),
        had_offset,
        register,
    })
}

pub fn confirm_valid_address(
    address: i64,
    strict_bounds: bool,
    line_num: usize,
) -> Result<(), AssemblyError> {
    if strict_bounds && !(0..=MAX_DATA_ADDRESS).contains(&address) {
        return Err(AssemblyError::Value {
            line: line_num,
            reason: "Address is out of bounds of DMEM.".to_string(),
            source_line: None,
        });
    }
    Ok(())
}

pub fn grab_register(token: Option<&Token>, line_num: usize) -> Result<Register, AssemblyError> {
    match token {
        Some(Token::Word(name)) => {
            Register::parse(name).ok_or_else(|| AssemblyError::Argument {
                line: line_num,
                reason: format!("Register [ {} ] does not exist.", name),
            })
        }
        Some(other) => Err(AssemblyError::Argument {
            line: line_num,
            reason: format!("Register [ {} ] does not exist.", other),
        }),
        None => Err(AssemblyError::Argument {
            line: line_num,
            reason: "Invalid number of arguments.".to_string(),
        }),
    }
}

// ------------- unit tests -------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::symbol_table::{DataSymbol, DataValue};
    use crate::parser::tokenize_line;

    fn table() -> SymbolTable {
        let mut symbols = SymbolTable::new();
        symbols.insert(DataSymbol {
            name: "X".to_string(),
            value: DataValue::Byte(5),
            offset: 0,
        });
        symbols.insert(DataSymbol {
            name: "V".to_string(),
            value: DataValue::Array(vec![1, 2, 3]),
            offset: 1,
        });
        symbols
    }

    fn bracket(
        source: &str,
        kind: BracketKind,
        with_register: bool,
        strict_bounds: bool,
    ) -> Result<BracketOperand, AssemblyError> {
        let tokens = tokenize_line(source, 0).unwrap();
        interpret_bracket(&tokens, &table(), 0, kind, with_register, strict_bounds)
    }

    #[test]
    fn test_plain_address() {
        let operand = bracket("[ V ]", BracketKind::Square, false, true).unwrap();
        assert_eq!(
            operand,
            BracketOperand {
                address: 1,
                had_offset: false,
                register: None,
            }
        );
    }

    #[test]
    fn test_address_with_offset() {
        let operand = bracket("[ V + 2 ]", BracketKind::Square, false, true).unwrap();
        assert_eq!(operand.address, 3);
        assert!(operand.had_offset);

        let operand = bracket("[ V - 1 ]", BracketKind::Square, false, true).unwrap();
        assert_eq!(operand.address, 0);
    }

    #[test]
    fn test_address_with_register() {
        let operand = bracket("[ V + B ]", BracketKind::Square, true, true).unwrap();
        assert_eq!(operand.register, Some(Register::B));
        assert!(!operand.had_offset);

        let operand = bracket("[ V + D + 2 ]", BracketKind::Square, true, true).unwrap();
        assert_eq!(operand.register, Some(Register::D));
        assert_eq!(operand.address, 3);
        assert!(operand.had_offset);
    }

    #[test]
    fn test_curly_form() {
        let operand = bracket("{ X + 4 }", BracketKind::Curly, false, false).unwrap();
        assert_eq!(operand.address, 4);

        // A square bracket is not a curly bracket.
        assert!(matches!(
            bracket("[ X ]", BracketKind::Curly, false, false),
            Err(AssemblyError::Argument { .. })
        ));
    }

    #[test]
    fn test_permissive_negative_address_wraps() {
        let operand = bracket("{ X - 5 }", BracketKind::Curly, false, false).unwrap();
        assert_eq!(operand.address, 0b11111011);
    }

    #[test]
    fn test_strict_bounds() {
        assert!(matches!(
            bracket("[ X + 64 ]", BracketKind::Square, false, true),
            Err(AssemblyError::Value { .. })
        ));
        assert!(matches!(
            bracket("[ X - 1 ]", BracketKind::Square, false, true),
            Err(AssemblyError::Value { .. })
        ));
        assert!(bracket("[ X + 63 ]", BracketKind::Square, false, true).is_ok());
    }

    #[test]
    fn test_unknown_variable() {
        assert!(matches!(
            bracket("[ MISSING ]", BracketKind::Square, false, true),
            Err(AssemblyError::Argument { .. })
        ));
    }

    #[test]
    fn test_unknown_register() {
        assert!(matches!(
            bracket("[ V + Q ]", BracketKind::Square, true, true),
            Err(AssemblyError::Argument { .. })
        ));
    }

    #[test]
    fn test_missing_register_operator() {
        assert!(matches!(
            bracket("[ V ]", BracketKind::Square, true, true),
            Err(AssemblyError::Argument { .. })
        ));
    }

    #[test]
    fn test_malformed_closings() {
        assert!(matches!(
            bracket("[ V + 2", BracketKind::Square, false, true),
            Err(AssemblyError::Value { .. })
        ));
        assert!(matches!(
            bracket("[ V ] ]", BracketKind::Square, false, true),
            Err(AssemblyError::Value { .. })
        ));
        assert!(matches!(
            bracket("[ V + ]", BracketKind::Square, false, true),
            Err(AssemblyError::Value { .. })
        ));
    }
}
