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

//! The output bundle for one assembled source: a transcript file and
//! the three Verilog HDL modules that preload the processor memories.

use crate::Assembly;
use crate::assembler::symbol_table::{DataValue, SymbolTable};
use crate::ast::MachineWord;
use crate::errors::AssemblyError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// Each memory module carries sixteen output ports.
const MODULE_SLOTS: usize = 16;
const ZERO_WORD: &str = "0000_00_00_00000000";
const ZERO_BYTE: &str = "00000000";

/// Creates `<output_root>/<name>`, prompting before reusing an
/// existing bundle directory unless `force` is set.
pub fn prepare_bundle_dir(
    output_root: &Path,
    name: &str,
    force: bool,
) -> Result<PathBuf, AssemblyError> {
    if !output_root.exists() {
        fs::create_dir_all(output_root)?;
    }

    let bundle_dir = output_root.join(name);
    if bundle_dir.exists() {
        if !force && !confirm_overwrite(name)? {
            return Err(AssemblyError::Io {
                reason: "Directory already exists, aborting.".to_string(),
            });
        }
    } else {
        fs::create_dir_all(&bundle_dir)?;
    }

    Ok(bundle_dir)
}

fn confirm_overwrite(name: &str) -> Result<bool, AssemblyError> {
    loop {
        print!(
            "Do you wish to overwrite previously compiled files for {} [Y/N]?  ",
            name
        );
        io::stdout().flush()?;

        let mut response = String::new();
        if io::stdin().read_line(&mut response)? == 0 {
            return Ok(false);
        }
        match response.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}

/// Writes the assembly-code half of the transcript. The machine-code
/// half is appended once assembly succeeds, so a failed source leaves
/// its partial transcript behind for inspection.
pub fn write_transcript_source(path: &Path, source: &str) -> Result<(), AssemblyError> {
    let mut transcript = String::from("=======ASSEMBLY CODE======\n");
    for line in source.lines() {
        if line.chars().count() > 1 {
            transcript.push_str(line);
            transcript.push('\n');
        }
    }
    transcript.push('\n');
    fs::write(path, transcript)?;
    Ok(())
}

pub fn append_machine_code(path: &Path, assembly: &Assembly) -> Result<(), AssemblyError> {
    let mut transcript = fs::OpenOptions::new().append(true).open(path)?;
    writeln!(transcript, "=======MACHINE CODE=======")?;
    write!(transcript, "{}", assembly.code_image().join("\n"))?;
    Ok(())
}

/// Writes the three Verilog HDL modules for Quartus Prime. Both code
/// modules receive the same 16-word image.
pub fn write_verilog_modules(bundle_dir: &Path, assembly: &Assembly) -> Result<(), AssemblyError> {
    fs::write(
        bundle_dir.join("User_Code_Low.v"),
        render_code_module("User_Code_Low", &assembly.words),
    )?;
    fs::write(
        bundle_dir.join("User_Code_High.v"),
        render_code_module("User_Code_High", &assembly.words),
    )?;
    fs::write(
        bundle_dir.join("User_Data.v"),
        render_data_module(&assembly.symbols),
    )?;
    Ok(())
}

fn module_header(name: &str, width: usize) -> String {
    let ports: Vec<String> = (0..MODULE_SLOTS).map(|slot| format!("b{}I", slot)).collect();

    let mut text = format!("module {}({});\r\n\r\n", name, ports.join(","));
    for slot in 0..MODULE_SLOTS {
        text.push_str(&format!("\toutput [{}:0] b{}I;\r\n", width - 1, slot));
    }
    text.push('\n');
    text
}

fn render_code_module(name: &str, words: &[MachineWord]) -> String {
    let mut text = module_header(name, 16);

    for (slot, word) in words.iter().take(MODULE_SLOTS).enumerate() {
        text.push_str(&format!("\tassign b{}I[15:0] = 16'b{};\r\n", slot, word));
    }
    for slot in words.len().min(MODULE_SLOTS)..MODULE_SLOTS {
        text.push_str(&format!("\tassign b{}I[15:0] = 16'b{};\r\n", slot, ZERO_WORD));
    }

    text.push_str("\nendmodule\r\n");
    text
}

fn render_data_module(symbols: &SymbolTable) -> String {
    let mut text = module_header("User_Data", 8);

    let mut slot = 0;
    for symbol in symbols.iter() {
        match &symbol.value {
            DataValue::Byte(value) => {
                text.push_str(&format!(
                    "\tassign b{}I[7:0] = 8'b{:08b}; //{}\r\n",
                    slot,
                    (*value & 0xFF) as u8,
                    symbol.name
                ));
                slot += 1;
            }
            DataValue::Array(values) => {
                for value in values {
                    text.push_str(&format!(
                        "\tassign b{}I[7:0] = 8'b{:08b}; //{}[{}]\r\n",
                        slot,
                        (*value & 0xFF) as u8,
                        symbol.name,
                        slot
                    ));
                    slot += 1;
                }
            }
        }
    }
    while slot < MODULE_SLOTS {
        text.push_str(&format!("\tassign b{}I[7:0] = 8'b{};\r\n", slot, ZERO_BYTE));
        slot += 1;
    }

    text.push_str("\nendmodule\r\n");
    text
}

/// Summary of one driver run, serialized to report.json on request.
#[derive(Serialize)]
pub struct BuildReport {
    pub succeeded: BTreeMap<String, String>,
    pub failed: BTreeMap<String, String>,
}

pub fn write_report(output_root: &Path, report: &BuildReport) -> Result<(), AssemblyError> {
    let json = serde_json::to_string_pretty(report).map_err(|err| AssemblyError::Io {
        reason: err.to_string(),
    })?;
    fs::write(output_root.join("report.json"), json)?;
    Ok(())
}

// ------------- unit tests -------------
