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

use crate::errors::AssemblyError;
use std::collections::HashMap;

// The value bound to a data symbol. The `?` wildcard is stored as zero
// at allocation time.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Byte(i64),
    Array(Vec<i64>),
}

impl DataValue {
    /// Number of data-memory bytes the value occupies.
    pub fn byte_len(&self) -> usize {
        match self {
            DataValue::Byte(_) => 1,
            DataValue::Array(values) => values.len(),
        }
    }

    /// The occupied bytes, each masked to 8 bits.
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            DataValue::Byte(value) => vec![(*value & 0xFF) as u8],
            DataValue::Array(values) => values.iter().map(|value| (*value & 0xFF) as u8).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSymbol {
    pub name: String,
    pub value: DataValue,
    pub offset: usize,
}

// The symbol table stores variable names with their values and byte
// offsets. Insertion order is significant: the data image is emitted
// in declaration order.
#[derive(Debug, Default, PartialEq)]
pub struct SymbolTable {
    symbols: Vec<DataSymbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn insert(&mut self, symbol: DataSymbol) {
        self.index.insert(symbol.name.clone(), self.symbols.len());
        self.symbols.push(symbol);
    }

    pub fn get(&self, name: &str) -> Option<&DataSymbol> {
        self.index.get(name).map(|&position| &self.symbols[position])
    }

    /// Number of named symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Total number of allocated data bytes.
    pub fn byte_len(&self) -> usize {
        self.symbols.iter().map(|symbol| symbol.value.byte_len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataSymbol> {
        self.symbols.iter()
    }
}

pub fn find_data_address(
    symbol_table: &SymbolTable,
    name: &str,
    line_num: usize,
) -> Result<usize, AssemblyError> {
    let symbol = symbol_table
        .get(name)
        .ok_or_else(|| AssemblyError::Argument {
            line: line_num,
            reason: "No data allocated with variable name used.".to_string(),
        })?;

    Ok(symbol.offset)
}
