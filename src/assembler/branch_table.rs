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

// The branch table stores label names and their instruction indices.
pub type BranchTable = HashMap<String, usize>;

pub fn get_branch(
    branch_table: &BranchTable,
    label_name: &str,
    line_num: usize,
) -> Result<usize, AssemblyError> {
    let target = branch_table
        .get(label_name)
        .ok_or_else(|| AssemblyError::Instruction {
            line: line_num,
            reason: "Jump label in use does not exist.".to_string(),
        })?;

    Ok(*target)
}
