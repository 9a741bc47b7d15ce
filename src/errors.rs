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

use thiserror::Error;

// Some diagnostics echo the offending source line after the message.
fn echo(source_line: &Option<String>) -> String {
    match source_line {
        Some(line) => format!("\n{}", line),
        None => String::new(),
    }
}

// Line numbers are relative to the section being processed: the cleaned
// stream for section errors, the code section for label and encoding
// errors, the data section for allocation errors.
#[derive(Error, Debug, PartialEq)]
pub enum AssemblyError {
    #[error("ln({line:03}): error: {reason} [SectionError]{}", echo(.source_line))]
    Section {
        line: usize,
        reason: String,
        source_line: Option<String>,
    },

    #[error("ln({line:03}): error: {reason} [InstructionError]")]
    Instruction { line: usize, reason: String },

    #[error("ln({line:03}): error: {reason} [ArgumentError]")]
    Argument { line: usize, reason: String },

    #[error("ln({line:03}): error: {reason} [ValueError]{}", echo(.source_line))]
    Value {
        line: usize,
        reason: String,
        source_line: Option<String>,
    },

    #[error("ln(000): error: {reason} [MemoryOverflow]")]
    MemoryOverflow { reason: String },

    #[error("ln(000): error: {reason} [IOError]")]
    Io { reason: String },
}

impl From<std::io::Error> for AssemblyError {
    fn from(err: std::io::Error) -> Self {
        AssemblyError::Io {
            reason: err.to_string(),
        }
    }
}
