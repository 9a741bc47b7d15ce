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

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod file_reader;
pub mod logging;
pub mod output;
pub mod parser;

use assembler::symbol_table::SymbolTable;
use ast::MachineWord;
use errors::AssemblyError;

extern crate pest;
extern crate pest_derive;

/// Data memory holds 16 named bytes.
pub const DMEM_LIMIT: usize = 16;
/// Instruction memory holds 32 words.
pub const IMEM_LIMIT: usize = 32;

/// The result of assembling one source: the machine words in
/// instruction order and the data symbols in declaration order. The
/// output writer pads both images to their 16 memory slots.
#[derive(Debug)]
pub struct Assembly {
    pub words: Vec<MachineWord>,
    pub symbols: SymbolTable,
}

impl Assembly {
    /// The code image, one 16-digit binary line per instruction.
    pub fn code_image(&self) -> Vec<String> {
        self.words.iter().map(|word| word.to_string()).collect()
    }

    /// The data image, one byte per scalar and per array element.
    pub fn data_image(&self) -> Vec<u8> {
        assembler::data_image(&self.symbols)
    }
}

/// Assembles one i281 source to completion. Each call owns its symbol
/// and branch tables; nothing is shared between sources.
pub fn assemble(source: &str) -> Result<Assembly, AssemblyError> {
    let listing = parser::analyze_source(source)?;

    let (code_lines, branch_table) = assembler::resolve_labels(&listing)?;

    let symbols = assembler::assign_variables(listing.data_lines())?;

    let words = assembler::generate_code(&code_lines, &symbols, &branch_table)?;

    Ok(Assembly { words, symbols })
}
