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

use std::fmt;

// Represents one lexical token of a source line. Punctuation tokenizes
// on its own regardless of surrounding whitespace, so `[V+2]` and
// `[ V + 2 ]` produce the same stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Directive(String),
    Comma,
    Colon,
    Plus,
    Minus,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(text) => write!(f, "{}", text),
            Token::Directive(text) => write!(f, "{}", text),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::OpenBracket => write!(f, "["),
            Token::CloseBracket => write!(f, "]"),
            Token::OpenBrace => write!(f, "{{"),
            Token::CloseBrace => write!(f, "}}"),
        }
    }
}

// A cleaned source line: its index within the cleaned stream, the
// original text for diagnostics, and the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub index: usize,
    pub text: String,
    pub tokens: Vec<Token>,
}

// A code-section line after label stripping. The index is the
// instruction index used for branch targets; a label and the
// instruction sharing its line share this index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub index: usize,
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    A,
    B,
    C,
    D,
}

impl Register {
    pub fn parse(name: &str) -> Option<Register> {
        match name {
            "A" => Some(Register::A),
            "B" => Some(Register::B),
            "C" => Some(Register::C),
            "D" => Some(Register::D),
            _ => None,
        }
    }

    /// The two-bit register field.
    pub fn field(&self) -> u16 {
        match self {
            Register::A => 0b00,
            Register::B => 0b01,
            Register::C => 0b10,
            Register::D => 0b11,
        }
    }
}

// Enum representing a single instruction mnemonic.
// This directly maps to the mnemonics of the i281 ISA.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mnemonic {
    Noop,
    Inputc,
    Inputcf,
    Inputd,
    Inputdf,
    Move,
    Loadi,
    Loadp,
    Add,
    Addi,
    Sub,
    Subi,
    Load,
    Loadf,
    Store,
    Storef,
    Shiftl,
    Shiftr,
    Cmp,
    Jump,
    Bre,
    Brz,
    Brne,
    Brnz,
    Brg,
    Brge,
}

impl Mnemonic {
    pub fn parse(name: &str) -> Option<Mnemonic> {
        match name {
            "NOOP" => Some(Mnemonic::Noop),
            "INPUTC" => Some(Mnemonic::Inputc),
            "INPUTCF" => Some(Mnemonic::Inputcf),
            "INPUTD" => Some(Mnemonic::Inputd),
            "INPUTDF" => Some(Mnemonic::Inputdf),
            "MOVE" => Some(Mnemonic::Move),
            "LOADI" => Some(Mnemonic::Loadi),
            "LOADP" => Some(Mnemonic::Loadp),
            "ADD" => Some(Mnemonic::Add),
            "ADDI" => Some(Mnemonic::Addi),
            "SUB" => Some(Mnemonic::Sub),
            "SUBI" => Some(Mnemonic::Subi),
            "LOAD" => Some(Mnemonic::Load),
            "LOADF" => Some(Mnemonic::Loadf),
            "STORE" => Some(Mnemonic::Store),
            "STOREF" => Some(Mnemonic::Storef),
            "SHIFTL" => Some(Mnemonic::Shiftl),
            "SHIFTR" => Some(Mnemonic::Shiftr),
            "CMP" => Some(Mnemonic::Cmp),
            "JUMP" => Some(Mnemonic::Jump),
            "BRE" => Some(Mnemonic::Bre),
            "BRZ" => Some(Mnemonic::Brz),
            "BRNE" => Some(Mnemonic::Brne),
            "BRNZ" => Some(Mnemonic::Brnz),
            "BRG" => Some(Mnemonic::Brg),
            "BRGE" => Some(Mnemonic::Brge),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Noop => "NOOP",
            Mnemonic::Inputc => "INPUTC",
            Mnemonic::Inputcf => "INPUTCF",
            Mnemonic::Inputd => "INPUTD",
            Mnemonic::Inputdf => "INPUTDF",
            Mnemonic::Move => "MOVE",
            Mnemonic::Loadi => "LOADI",
            Mnemonic::Loadp => "LOADP",
            Mnemonic::Add => "ADD",
            Mnemonic::Addi => "ADDI",
            Mnemonic::Sub => "SUB",
            Mnemonic::Subi => "SUBI",
            Mnemonic::Load => "LOAD",
            Mnemonic::Loadf => "LOADF",
            Mnemonic::Store => "STORE",
            Mnemonic::Storef => "STOREF",
            Mnemonic::Shiftl => "SHIFTL",
            Mnemonic::Shiftr => "SHIFTR",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Jump => "JUMP",
            Mnemonic::Bre => "BRE",
            Mnemonic::Brz => "BRZ",
            Mnemonic::Brne => "BRNE",
            Mnemonic::Brnz => "BRNZ",
            Mnemonic::Brg => "BRG",
            Mnemonic::Brge => "BRGE",
        }
    }

    /// True for JUMP and the conditional branch family, whose single
    /// operand is a label.
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            Mnemonic::Jump
                | Mnemonic::Bre
                | Mnemonic::Brz
                | Mnemonic::Brne
                | Mnemonic::Brnz
                | Mnemonic::Brg
                | Mnemonic::Brge
        )
    }
}

// A 16-bit machine word, partitioned opcode(4) | field_a(2) |
// field_b(2) | field_c(8). Field semantics depend on the mnemonic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MachineWord(u16);

impl MachineWord {
    pub fn pack(opcode: u16, field_a: u16, field_b: u16, field_c: u16) -> MachineWord {
        MachineWord(
            ((opcode & 0xF) << 12) | ((field_a & 0x3) << 10) | ((field_b & 0x3) << 8)
                | (field_c & 0xFF),
        )
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn opcode(&self) -> u16 {
        self.0 >> 12
    }

    pub fn field_a(&self) -> u16 {
        (self.0 >> 10) & 0x3
    }

    pub fn field_b(&self) -> u16 {
        (self.0 >> 8) & 0x3
    }

    pub fn field_c(&self) -> u16 {
        self.0 & 0xFF
    }
}

impl fmt::Display for MachineWord {
    // Canonical rendering: 16 binary digits with underscore separators
    // at the field boundaries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04b}_{:02b}_{:02b}_{:08b}",
            self.opcode(),
            self.field_a(),
            self.field_b(),
            self.field_c()
        )
    }
}

// ------------- unit tests -------------
