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

// Opcode nibbles. INPUT* share one opcode and select the memory and
// addressing mode through field_b; SHIFTL/SHIFTR share one opcode and
// select the direction through field_b; the BR* family shares one
// opcode and selects the condition through field_b.
pub const NOOP_OPCODE: u16 = 0b0000;
pub const INPUT_OPCODE: u16 = 0b0001;
pub const MOVE_OPCODE: u16 = 0b0010;
pub const LOADI_OPCODE: u16 = 0b0011;
pub const ADD_OPCODE: u16 = 0b0100;
pub const ADDI_OPCODE: u16 = 0b0101;
pub const SUB_OPCODE: u16 = 0b0110;
pub const SUBI_OPCODE: u16 = 0b0111;
pub const LOAD_OPCODE: u16 = 0b1000;
pub const LOADF_OPCODE: u16 = 0b1001;
pub const STORE_OPCODE: u16 = 0b1010;
pub const STOREF_OPCODE: u16 = 0b1011;
pub const SHIFT_OPCODE: u16 = 0b1100;
pub const CMP_OPCODE: u16 = 0b1101;
pub const JUMP_OPCODE: u16 = 0b1110;
pub const BRANCH_OPCODE: u16 = 0b1111;

// field_b selectors for the INPUT* family.
pub const INPUT_CODE: u16 = 0b00;
pub const INPUT_CODE_INDEXED: u16 = 0b01;
pub const INPUT_DATA: u16 = 0b10;
pub const INPUT_DATA_INDEXED: u16 = 0b11;

// field_b selectors for the shift family.
pub const SHIFT_LEFT: u16 = 0b00;
pub const SHIFT_RIGHT: u16 = 0b01;

// field_b condition selectors for JUMP and the BR* family.
pub const BRANCH_ALWAYS: u16 = 0b00;
pub const BRANCH_EQ: u16 = 0b00;
pub const BRANCH_NE: u16 = 0b01;
pub const BRANCH_GT: u16 = 0b10;
pub const BRANCH_GE: u16 = 0b11;

// Strict addressing modes must stay within the 6-bit address space.
pub const MAX_DATA_ADDRESS: i64 = 63;
