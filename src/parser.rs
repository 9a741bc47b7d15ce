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

use crate::IMEM_LIMIT;
use crate::ast::{SourceLine, Token};
use crate::errors::AssemblyError;
use pest::Parser;
use pest_derive::Parser;

// Derive the tokenizer from our grammar file.
#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct I281Parser;

// The cleaned source: comment-only and blank lines removed, every
// remaining line tokenized, section markers located. Marker lines stay
// in the stream so the section slices below stay index-stable.
#[derive(Debug)]
pub struct Listing {
    pub lines: Vec<SourceLine>,
    pub data_marker: Option<usize>,
    pub code_marker: usize,
}

impl Listing {
    /// The lines strictly between the `.data` and `.code` markers.
    pub fn data_lines(&self) -> &[SourceLine] {
        let start = self.data_marker.map(|index| index + 1).unwrap_or(0);
        if start >= self.code_marker {
            &[]
        } else {
            &self.lines[start..self.code_marker]
        }
    }

    /// The lines strictly after the `.code` marker.
    pub fn code_lines(&self) -> &[SourceLine] {
        &self.lines[self.code_marker + 1..]
    }
}

/// Tokenizes a single raw line. A comment-only or blank line produces
/// an empty stream; a character outside the token grammar is rejected.
pub fn tokenize_line(text: &str, index: usize) -> Result<Vec<Token>, AssemblyError> {
    let pairs = I281Parser::parse(Rule::line, text).map_err(|_| AssemblyError::Value {
        line: index,
        reason: "Illegal character found".to_string(),
        source_line: Some(text.to_string()),
    })?;

    let tokens = pairs
        .flatten()
        .filter_map(|pair| match pair.as_rule() {
            Rule::word => Some(Token::Word(pair.as_str().to_string())),
            Rule::directive => Some(Token::Directive(pair.as_str().to_string())),
            Rule::comma => Some(Token::Comma),
            Rule::colon => Some(Token::Colon),
            Rule::plus => Some(Token::Plus),
            Rule::minus => Some(Token::Minus),
            Rule::open_bracket => Some(Token::OpenBracket),
            Rule::close_bracket => Some(Token::CloseBracket),
            Rule::open_brace => Some(Token::OpenBrace),
            Rule::close_brace => Some(Token::CloseBrace),
            _ => None,
        })
        .collect();

    Ok(tokens)
}

/// Cleans the raw source and locates the section markers. The `.data`
/// marker is optional, the `.code` marker is mandatory and unique, and
/// the code section must fit the instruction memory.
pub fn analyze_source(source: &str) -> Result<Listing, AssemblyError> {
    let mut lines: Vec<SourceLine> = Vec::new();
    let mut data_marker: Option<usize> = None;
    let mut code_marker: Option<usize> = None;

    for raw in source.lines() {
        let index = lines.len();
        let tokens = tokenize_line(raw, index)?;
        if tokens.is_empty() {
            continue;
        }

        let is_marker = |name: &str| {
            tokens
                .iter()
                .any(|token| matches!(token, Token::Directive(text) if text == name))
        };

        if is_marker(".data") {
            if data_marker.is_some() {
                return Err(AssemblyError::Section {
                    line: index,
                    reason: "More than one .data section exists.".to_string(),
                    source_line: Some(raw.to_string()),
                });
            }
            data_marker = Some(index);
        } else if is_marker(".code") {
            if code_marker.is_some() {
                return Err(AssemblyError::Section {
                    line: index,
                    reason: "More than one .code section exists.".to_string(),
                    source_line: Some(raw.to_string()),
                });
            }
            code_marker = Some(index);
        }

        lines.push(SourceLine {
            index,
            text: raw.to_string(),
            tokens,
        });
    }

    let code_marker = code_marker.ok_or_else(|| AssemblyError::Section {
        line: 0,
        reason: "There does not exist a .code section.".to_string(),
        source_line: None,
    })?;

    if lines.len() - code_marker - 1 > IMEM_LIMIT {
        return Err(AssemblyError::Section {
            line: 0,
            reason: "Length of code exceeds size of IMEM.".to_string(),
            source_line: None,
        });
    }

    Ok(Listing {
        lines,
        data_marker,
        code_marker,
    })
}

// ------------- unit tests -------------
