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
use std::fs;
use std::path::{Path, PathBuf};

/// Confirms the path names an assembly (.asm) file.
pub fn check_asm_file(path: &Path) -> Result<(), AssemblyError> {
    match path.extension() {
        Some(extension) if extension == "asm" => Ok(()),
        _ => Err(AssemblyError::Io {
            reason: "File given is not an assembly file.".to_string(),
        }),
    }
}

/// Catalogs the .asm files directly inside a directory, sorted so the
/// processing order does not depend on the filesystem.
pub fn catalog_directory(path: &Path) -> Result<Vec<PathBuf>, AssemblyError> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && check_asm_file(&entry_path).is_ok() {
            files.push(entry_path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(AssemblyError::Argument {
            line: 0,
            reason: "Directory given has no assembly file(s) within.".to_string(),
        });
    }

    Ok(files)
}

/// Expands one command line input into the list of sources to
/// assemble: a directory is cataloged, a file must be an .asm file.
pub fn collect_sources(input: &Path) -> Result<Vec<PathBuf>, AssemblyError> {
    if !input.exists() {
        return Err(AssemblyError::Argument {
            line: 0,
            reason: "File/Directory given is not valid or does not exist.".to_string(),
        });
    }

    if input.is_dir() {
        catalog_directory(input)
    } else {
        check_asm_file(input)?;
        Ok(vec![input.to_path_buf()])
    }
}

pub fn read_source(path: &Path) -> Result<String, AssemblyError> {
    Ok(fs::read_to_string(path)?)
}

// ------------- unit tests -------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_asm_file() {
        assert!(check_asm_file(Path::new("program.asm")).is_ok());
        assert!(check_asm_file(Path::new("program.txt")).is_err());
        assert!(check_asm_file(Path::new("program")).is_err());
    }

    #[test]
    fn test_collect_sources_rejects_missing_path() {
        let result = collect_sources(Path::new("does/not/exist.asm"));
        assert!(matches!(result, Err(AssemblyError::Argument { .. })));
    }
}
