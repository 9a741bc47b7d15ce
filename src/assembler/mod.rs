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

pub mod branch_table;
mod encoder;
pub mod symbol_table;

use crate::DMEM_LIMIT;
use crate::ast::{CodeLine, MachineWord, Mnemonic, SourceLine, Token};
use crate::errors::AssemblyError;
use crate::parser::Listing;
use branch_table::BranchTable;
use encoder::components::parse_integer;
use symbol_table::{DataSymbol, DataValue, SymbolTable};

/// Pass 1: strip labels from the code lines and record their
/// instruction indices in the branch table. A label and an instruction
/// on the same line share one index. Jump operands are collected and
/// verified against the branch table once the walk completes.
pub fn resolve_labels(listing: &Listing) -> Result<(Vec<CodeLine>, BranchTable), AssemblyError> {
    let mut branch_table = BranchTable::new();
    let mut code_lines: Vec<CodeLine> = Vec::new();
    let mut pending_labels: Vec<(String, usize)> = Vec::new();

    for (index, line) in listing.code_lines().iter().enumerate() {
        let mut tokens = line.tokens.clone();

        if let Some(colon) = tokens.iter().position(|token| matches!(token, Token::Colon)) {
            let label = match &tokens[..colon] {
                [Token::Word(name)] => name.clone(),
                _ => {
                    return Err(AssemblyError::Value {
                        line: index,
                        reason: "Label is not valid".to_string(),
                        source_line: Some(line.text.clone()),
                    });
                }
            };

            if branch_table.contains_key(&label) {
                return Err(AssemblyError::Instruction {
                    line: index,
                    reason: format!("Label {} is declared more than once.", label),
                });
            }

            branch_table.insert(label, index);
            tokens.drain(..=colon);
        } else {
            let mnemonic = match tokens.first() {
                Some(Token::Word(name)) => Mnemonic::parse(name),
                _ => None,
            };
            let Some(mnemonic) = mnemonic else {
                return Err(AssemblyError::Value {
                    line: index,
                    reason: "Opcode is not valid".to_string(),
                    source_line: Some(line.text.clone()),
                });
            };

            if mnemonic.is_jump() {
                let Some(target) = tokens.get(1) else {
                    return Err(AssemblyError::Argument {
                        line: index,
                        reason: format!(
                            "{} does not have the correct number of arguments ( 1 ).",
                            mnemonic.name()
                        ),
                    });
                };
                record_pending(&mut pending_labels, target.to_string(), index);
            }
        }

        code_lines.push(CodeLine {
            index,
            text: line.text.clone(),
            tokens,
        });
    }

    for (label, index) in &pending_labels {
        if !branch_table.contains_key(label) {
            return Err(AssemblyError::Instruction {
                line: *index,
                reason: "Jump label in use does not exist.".to_string(),
            });
        }
    }

    Ok((code_lines, branch_table))
}

// Re-referencing a label keeps one pending entry, bound to the latest
// referencing instruction.
fn record_pending(pending: &mut Vec<(String, usize)>, label: String, index: usize) {
    match pending.iter_mut().find(|(name, _)| *name == label) {
        Some(entry) => entry.1 = index,
        None => pending.push((label, index)),
    }
}

/// Pass 2: walk the data section assigning byte offsets in declaration
/// order. Lines have the shape `name BYTE value(, value)*` where each
/// value is a decimal literal or the `?` wildcard (stored as zero).
pub fn assign_variables(data_lines: &[SourceLine]) -> Result<SymbolTable, AssemblyError> {
    let mut symbol_table = SymbolTable::new();
    let mut data_address: usize = 0;

    for (line_num, line) in data_lines.iter().enumerate() {
        let tokens = &line.tokens;
        if tokens.len() < 3 {
            return Err(AssemblyError::Instruction {
                line: line_num,
                reason: "Data is not properly formatted.".to_string(),
            });
        }

        let name = match &tokens[0] {
            Token::Word(name) => name.clone(),
            _ => {
                return Err(AssemblyError::Instruction {
                    line: line_num,
                    reason: "Data is not properly formatted.".to_string(),
                });
            }
        };

        if !matches!(&tokens[1], Token::Word(keyword) if keyword == "BYTE") {
            return Err(AssemblyError::Instruction {
                line: line_num,
                reason: "Data is not of type BYTE.".to_string(),
            });
        }

        if symbol_table.contains_key(&name) {
            return Err(AssemblyError::Instruction {
                line: line_num,
                reason: format!("Variable {} is declared more than once.", name),
            });
        }

        let value = if tokens.len() > 3 {
            if matches!(tokens.last(), Some(Token::Comma)) {
                return Err(AssemblyError::Value {
                    line: line_num,
                    reason: "Trailing comma found in array declaration.".to_string(),
                    source_line: None,
                });
            }

            let mut values = Vec::new();
            for token in tokens[2..].iter().filter(|t| !matches!(t, Token::Comma)) {
                values.push(parse_array_element(token, line_num)?);
            }
            DataValue::Array(values)
        } else {
            DataValue::Byte(parse_scalar(&tokens[2], line_num)?)
        };

        let byte_len = value.byte_len();
        symbol_table.insert(DataSymbol {
            name,
            value,
            offset: data_address,
        });
        data_address += byte_len;

        if symbol_table.len() > DMEM_LIMIT {
            return Err(AssemblyError::MemoryOverflow {
                reason: "Data variables exceed DMEM.".to_string(),
            });
        }
        if symbol_table.byte_len() > DMEM_LIMIT {
            return Err(AssemblyError::MemoryOverflow {
                reason: "Data bytes exceed DMEM.".to_string(),
            });
        }
    }

    Ok(symbol_table)
}

// Array elements pass an alphanumeric filter before the integer parse;
// scalars accept decimal digits only.
fn parse_array_element(token: &Token, line_num: usize) -> Result<i64, AssemblyError> {
    match token {
        Token::Word(text) if text == "?" => Ok(0),
        Token::Word(text)
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric()) =>
        {
            parse_integer(token, line_num)
        }
        _ => Err(AssemblyError::Value {
            line: line_num,
            reason: "ISA does not support non-integer values.".to_string(),
            source_line: None,
        }),
    }
}

fn parse_scalar(token: &Token, line_num: usize) -> Result<i64, AssemblyError> {
    match token {
        Token::Word(text) if text == "?" => Ok(0),
        Token::Word(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            parse_integer(token, line_num)
        }
        _ => Err(AssemblyError::Value {
            line: line_num,
            reason: "Data value is neither undefined nor defined.".to_string(),
            source_line: None,
        }),
    }
}

/// Pass 3: encode every code line into its machine word.
pub fn generate_code(
    code_lines: &[CodeLine],
    symbol_table: &SymbolTable,
    branch_table: &BranchTable,
) -> Result<Vec<MachineWord>, AssemblyError> {
    code_lines
        .iter()
        .map(|line| encoder::encode_instruction(line, symbol_table, branch_table))
        .collect()
}

/// The data image: one byte per scalar and per array element, in
/// symbol insertion order.
pub fn data_image(symbol_table: &SymbolTable) -> Vec<u8> {
    symbol_table
        .iter()
        .flat_map(|symbol| symbol.value.bytes())
        .collect()
}

// ------------- unit tests -------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::analyze_source;

    fn code_listing(body: &str) -> Listing {
        analyze_source(&format!(".code\n{}", body)).unwrap()
    }

    fn data_listing(body: &str) -> Listing {
        analyze_source(&format!(".data\n{}\n.code\nNOOP", body)).unwrap()
    }

    #[test]
    fn test_labels_share_index_with_instruction() {
        let listing = code_listing("NOOP\nLOOP: NOOP\nJUMP LOOP");
        let (code_lines, branch_table) = resolve_labels(&listing).unwrap();
        assert_eq!(branch_table.get("LOOP"), Some(&1));
        assert_eq!(code_lines.len(), 3);
        assert_eq!(code_lines[1].tokens, vec![Token::Word("NOOP".to_string())]);
    }

    #[test]
    fn test_forward_references_resolve() {
        let listing = code_listing("BRE AHEAD\nNOOP\nAHEAD: NOOP");
        assert!(resolve_labels(&listing).is_ok());
    }

    #[test]
    fn test_missing_label_is_reported() {
        let listing = code_listing("NOOP\nJUMP NOWHERE");
        assert_eq!(
            resolve_labels(&listing),
            Err(AssemblyError::Instruction {
                line: 1,
                reason: "Jump label in use does not exist.".to_string(),
            })
        );
    }

    #[test]
    fn test_labelled_jump_is_checked_at_encoding() {
        // A jump that shares its line with a label is not collected
        // into the pending set; its target is checked during encoding.
        let listing = code_listing("SKIP: JUMP NOWHERE");
        assert!(resolve_labels(&listing).is_ok());
    }

    #[test]
    fn test_invalid_opcode() {
        let listing = code_listing("NOOP\nFNORD A , B");
        assert!(matches!(
            resolve_labels(&listing),
            Err(AssemblyError::Value { line: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_label() {
        let listing = code_listing("L: NOOP\nL: NOOP");
        assert!(matches!(
            resolve_labels(&listing),
            Err(AssemblyError::Instruction { line: 1, .. })
        ));
    }

    #[test]
    fn test_scalar_and_array_offsets() {
        let listing = data_listing("X BYTE 5\nV BYTE 1 , 2 , 3\nY BYTE ?");
        let symbol_table = assign_variables(listing.data_lines()).unwrap();

        let offsets: Vec<(String, usize)> = symbol_table
            .iter()
            .map(|symbol| (symbol.name.clone(), symbol.offset))
            .collect();
        assert_eq!(
            offsets,
            vec![
                ("X".to_string(), 0),
                ("V".to_string(), 1),
                ("Y".to_string(), 4),
            ]
        );
        assert_eq!(data_image(&symbol_table), vec![5, 1, 2, 3, 0]);
    }

    #[test]
    fn test_wildcard_elements_store_zero() {
        let listing = data_listing("V BYTE 1 , ? , 3");
        let symbol_table = assign_variables(listing.data_lines()).unwrap();
        assert_eq!(data_image(&symbol_table), vec![1, 0, 3]);
    }

    #[test]
    fn test_data_type_keyword() {
        let listing = data_listing("X WORD 5");
        assert_eq!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::Instruction {
                line: 0,
                reason: "Data is not of type BYTE.".to_string(),
            })
        );
    }

    #[test]
    fn test_trailing_comma() {
        let listing = data_listing("V BYTE 1 , 2 ,");
        assert!(matches!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::Value { .. })
        ));
    }

    #[test]
    fn test_scalar_value_must_be_numeric() {
        let listing = data_listing("X BYTE Q5");
        assert_eq!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::Value {
                line: 0,
                reason: "Data value is neither undefined nor defined.".to_string(),
                source_line: None,
            })
        );
    }

    #[test]
    fn test_array_element_alphanumeric_filter() {
        // An alphanumeric element passes the type filter and fails the
        // integer parse instead.
        let listing = data_listing("V BYTE 1 , A2");
        assert!(matches!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::Value { .. })
        ));
    }

    #[test]
    fn test_symbol_count_overflow() {
        let declarations: Vec<String> =
            (0..17).map(|index| format!("VAR{} BYTE 1", index)).collect();
        let listing = data_listing(&declarations.join("\n"));
        assert_eq!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::MemoryOverflow {
                reason: "Data variables exceed DMEM.".to_string(),
            })
        );
    }

    #[test]
    fn test_byte_count_overflow() {
        let listing = data_listing("V BYTE 1 , 2 , 3 , 4 , 5 , 6 , 7 , 8 , 9\nW BYTE 1 , 2 , 3 , 4 , 5 , 6 , 7 , 8");
        assert_eq!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::MemoryOverflow {
                reason: "Data bytes exceed DMEM.".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_variable() {
        let listing = data_listing("X BYTE 1\nX BYTE 2");
        assert!(matches!(
            assign_variables(listing.data_lines()),
            Err(AssemblyError::Instruction { line: 1, .. })
        ));
    }
}
