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

use i281asm::errors::AssemblyError;
use i281asm::{Assembly, assemble, output};

fn code_lines(assembly: &Assembly) -> Vec<String> {
    assembly.code_image()
}

#[test]
fn test_single_noop() {
    let assembly = assemble(".code\nNOOP").unwrap();

    assert_eq!(code_lines(&assembly), vec!["0000_00_00_00000000"]);
    assert!(assembly.data_image().is_empty());
}

#[test]
fn test_scalar_data_and_loadi() {
    let assembly = assemble(".data\nX BYTE 5\n.code\nLOADI A , 7").unwrap();

    assert_eq!(code_lines(&assembly), vec!["0011_00_00_00000111"]);

    let symbol = assembly.symbols.get("X").unwrap();
    assert_eq!(symbol.offset, 0);
    assert_eq!(assembly.data_image(), vec![5]);
    assert_eq!(format!("{:08b}", assembly.data_image()[0]), "00000101");
}

#[test]
fn test_array_data_and_load() {
    let assembly = assemble(".data\nV BYTE 1 , 2 , 3\n.code\nLOAD B , [ V + 2 ]").unwrap();

    let symbol = assembly.symbols.get("V").unwrap();
    assert_eq!(symbol.offset, 0);
    assert_eq!(symbol.value.byte_len(), 3);
    assert_eq!(code_lines(&assembly), vec!["1000_01_00_00000010"]);
}

#[test]
fn test_forward_branch_displacement() {
    let assembly = assemble(".code\nNOOP\nBRE L\nNOOP\nL: NOOP").unwrap();

    // The BRE at index 1 reaches L at index 3: 3 - 2 = 1.
    assert_eq!(code_lines(&assembly)[1], "1111_00_00_00000001");
}

#[test]
fn test_backward_branch_displacement() {
    let assembly = assemble(".code\nL: NOOP\nJUMP L").unwrap();

    // The JUMP at index 1 reaches L at index 0: 0 - 2 = -2.
    assert_eq!(code_lines(&assembly)[1], "1110_00_00_11111110");
}

#[test]
fn test_data_overflow_is_rejected() {
    let declarations: Vec<String> = (0..17).map(|index| format!("V{} BYTE 1", index)).collect();
    let source = format!(".data\n{}\n.code\nNOOP", declarations.join("\n"));

    assert!(matches!(
        assemble(&source),
        Err(AssemblyError::MemoryOverflow { .. })
    ));
}

#[test]
fn test_code_overflow_is_rejected() {
    let source = format!(".code\n{}", "NOOP\n".repeat(33));

    assert!(matches!(assemble(&source), Err(AssemblyError::Section { .. })));

    let fitting = format!(".code\n{}", "NOOP\n".repeat(32));
    assert_eq!(assemble(&fitting).unwrap().words.len(), 32);
}

#[test]
fn test_every_word_has_sixteen_digits() {
    let source = "\
.data
X BYTE 5
V BYTE 1 , 2 , 3
.code
START: LOADI A , 0
LOOP: ADD A , B
LOAD C , [ V + 1 ]
STOREF [ V + C ] , A
INPUTC [ X ]
SHIFTL A
CMP A , D
BRNE LOOP
JUMP START";

    let assembly = assemble(source).unwrap();
    assert_eq!(assembly.words.len(), 9);

    for line in code_lines(&assembly) {
        let digits: String = line.chars().filter(|c| *c != '_').collect();
        assert_eq!(digits.len(), 16);
        assert!(digits.chars().all(|c| c == '0' || c == '1'));
    }
    for byte in assembly.data_image() {
        assert_eq!(format!("{:08b}", byte).len(), 8);
    }
}

#[test]
fn test_symbol_offsets_concatenate_without_gaps() {
    let source = ".data\nA1 BYTE 1\nA2 BYTE 1 , 2 , 3 , 4\nA3 BYTE ?\nA4 BYTE 9\n.code\nNOOP";
    let assembly = assemble(source).unwrap();

    let mut expected_offset = 0;
    for symbol in assembly.symbols.iter() {
        assert_eq!(symbol.offset, expected_offset);
        expected_offset += symbol.value.byte_len();
    }
    assert_eq!(assembly.data_image().len(), expected_offset);
}

#[test]
fn test_relative_branch_law() {
    let source = ".code\nSTART: NOOP\nNOOP\nBRG START\nBRGE END\nNOOP\nEND: NOOP";
    let assembly = assemble(source).unwrap();

    // BRG at index 2 targets START at 0; BRGE at index 3 targets END at 5.
    let decode = |word: &i281asm::ast::MachineWord| (word.field_c() as u8) as i8 as i64;
    assert_eq!(decode(&assembly.words[2]), 0 - 3);
    assert_eq!(decode(&assembly.words[3]), 5 - 4);
}

#[test]
fn test_determinism() {
    let source = ".data\nX BYTE 1 , ? , 3\n.code\nLOOP: LOAD A , [ X + 1 ]\nSUBI A , 1\nBRNZ LOOP";

    let first = assemble(source).unwrap();
    let second = assemble(source).unwrap();

    assert_eq!(first.code_image(), second.code_image());
    assert_eq!(first.data_image(), second.data_image());
}

#[test]
fn test_negative_immediates() {
    let assembly = assemble(".code\nLOADI A , -5\nSUBI B , -128").unwrap();
    assert_eq!(
        assembly.code_image(),
        vec!["0011_00_00_11111011", "0111_01_00_10000000"]
    );
}

#[test]
fn test_uninitialized_data_reads_as_zero() {
    let assembly = assemble(".data\nX BYTE ?\nV BYTE 1 , ? , 2\n.code\nNOOP").unwrap();
    assert_eq!(assembly.data_image(), vec![0, 1, 0, 2]);
}

#[test]
fn test_unknown_variable_is_an_argument_error() {
    assert!(matches!(
        assemble(".code\nLOAD A , [ MISSING ]"),
        Err(AssemblyError::Argument { .. })
    ));
}

#[test]
fn test_unresolved_branch_label() {
    assert!(matches!(
        assemble(".code\nJUMP NOWHERE\nNOOP"),
        Err(AssemblyError::Instruction { .. })
    ));
}

#[test]
fn test_strict_address_bound() {
    assert!(matches!(
        assemble(".data\nX BYTE 1\n.code\nLOAD A , [ X + 64 ]"),
        Err(AssemblyError::Value { .. })
    ));
    assert!(assemble(".data\nX BYTE 1\n.code\nLOAD A , [ X + 63 ]").is_ok());
    // LOADP derives its address at runtime and is not bounded.
    assert!(assemble(".data\nX BYTE 1\n.code\nLOADP A , { X + 64 }").is_ok());
}

#[test]
fn test_diagnostic_format() {
    let err = assemble(".data\nX BYTE 5\n.code\nLOADI A , Q").unwrap_err();
    assert_eq!(
        err.to_string(),
        "ln(000): error: Positive integer given ( Q ) is invalid. [ValueError]"
    );

    let err = assemble(".code\nNOOP\nGLORP A").unwrap_err();
    assert_eq!(
        err.to_string(),
        "ln(001): error: Opcode is not valid [ValueError]\nGLORP A"
    );
}

#[test]
fn test_output_bundle() {
    let temp = tempfile::tempdir().unwrap();
    let output_root = temp.path().join("output");

    let source = ".data\nX BYTE 5\nV BYTE 1 , 2\n.code\nNOOP\nLOADI A , 7";
    let assembly = assemble(source).unwrap();

    let bundle_dir = output::prepare_bundle_dir(&output_root, "demo", false).unwrap();
    let transcript_path = bundle_dir.join("demo.bin");
    output::write_transcript_source(&transcript_path, source).unwrap();
    output::append_machine_code(&transcript_path, &assembly).unwrap();
    output::write_verilog_modules(&bundle_dir, &assembly).unwrap();

    let transcript = std::fs::read_to_string(&transcript_path).unwrap();
    assert!(transcript.starts_with("=======ASSEMBLY CODE======\n"));
    assert!(transcript.contains("LOADI A , 7\n"));
    assert!(transcript.contains("=======MACHINE CODE=======\n"));
    assert!(transcript.ends_with("0000_00_00_00000000\n0011_00_00_00000111"));

    // Both code modules carry the same image.
    let low = std::fs::read_to_string(bundle_dir.join("User_Code_Low.v")).unwrap();
    let high = std::fs::read_to_string(bundle_dir.join("User_Code_High.v")).unwrap();
    assert!(low.contains("\tassign b1I[15:0] = 16'b0011_00_00_00000111;\r\n"));
    assert_eq!(
        low.replace("User_Code_Low", "User_Code_High"),
        high
    );

    let data = std::fs::read_to_string(bundle_dir.join("User_Data.v")).unwrap();
    assert!(data.contains("\tassign b0I[7:0] = 8'b00000101; //X\r\n"));
    assert!(data.contains("\tassign b2I[7:0] = 8'b00000010; //V[2]\r\n"));
    assert!(data.contains("\tassign b15I[7:0] = 8'b00000000;\r\n"));

    // A second run with force overwrites without prompting.
    assert!(output::prepare_bundle_dir(&output_root, "demo", true).is_ok());
}

#[test]
fn test_sources_are_independent() {
    // A failure in one source leaves no state behind for the next.
    assert!(assemble(".code\nJUMP NOWHERE").is_err());

    let assembly = assemble(".code\nHERE: NOOP\nJUMP HERE").unwrap();
    assert_eq!(code_lines(&assembly)[1], "1110_00_00_11111110");
}
