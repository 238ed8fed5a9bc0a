//! x86-64 machine code generation (System V ABI).
//!
//! For each function: a symbol recording its `.text` offset, a prologue,
//! a store of each of the first four parameters from its argument
//! register into a stack slot, the function body, and an epilogue.

use awlc_par::Width;
use awlc_sem::{TExpression, TFile, TFun, TStatement};

use crate::elf::{shf, sht, stb, stt, ElfWriter};

/// Argument registers in System V order, as ModR/M register numbers
/// (`rax=0, rcx=1, rdx=2, rbx=3, rsp=4, rbp=5, rsi=6, rdi=7`). Only the
/// first four are ever consulted — the language caps parameter stores at
/// four registers' worth (§4.4 step 4).
const ARG_REGS: [u8; 4] = [7 /* rdi */, 6 /* rsi */, 2 /* rdx */, 1 /* rcx */];

const RAX: u8 = 0;
const RBP_RM: u8 = 0b101;

/// Walks a `TFile` and emits a complete `.text` section plus symbol table
/// into a fresh [`ElfWriter`], returning the finished object bytes.
pub struct CodeGenerator<'a> {
    tfile: &'a TFile,
    elf: ElfWriter,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(tfile: &'a TFile) -> Self {
        Self { tfile, elf: ElfWriter::new() }
    }

    pub fn generate(mut self) -> Vec<u8> {
        self.elf.add_section(".text", sht::PROGBITS, shf::ALLOC | shf::EXECINSTR);
        self.elf.set_section(".text");

        for (_, fun) in self.tfile.funs.iter_enumerated() {
            self.gen_fun(fun);
        }

        self.elf.finish()
    }

    fn gen_fun(&mut self, fun: &TFun) {
        let value = self.elf.current_section_size();
        self.elf.add_symbol(None, &fun.name, stb::GLOBAL, stt::FUNC, value);

        self.elf.write(&[0x55, 0x48, 0x89, 0xE5]); // push %rbp; mov %rsp, %rbp

        let mut offset: i8 = 4;
        let param_vars = &self.tfile.scopes.scopes[fun.scope].variables;
        for (i, &var_id) in param_vars.iter().enumerate().take(ARG_REGS.len()) {
            let ty = self.tfile.variables[var_id].ty;
            let byte_size = self.tfile.types[ty].byte_size as i8;
            self.elf.write(&store_param(ARG_REGS[i], offset));
            offset += byte_size;
        }

        for statement in &fun.body.statements {
            self.gen_statement(statement);
        }

        self.elf.write(&[0x5D, 0xC3]); // pop %rbp; ret
    }

    fn gen_statement(&mut self, statement: &TStatement) {
        match statement {
            TStatement::Return { expr: Some(expr) } => self.gen_expr(expr, RAX),
            TStatement::Return { expr: None } => {}
        }
    }

    fn gen_expr(&mut self, expr: &TExpression, dest: u8) {
        match expr {
            TExpression::NumberLiteral(number) => {
                self.elf.write(&mov_imm_to_reg(number.width, number.value, dest));
            }
        }
    }
}

/// `REX.W 89 /r` storing register `src` (ModR/M `reg`) to `[rbp - offset]`
/// (`mod=01`, disp8 = two's-complement negation of `offset`).
fn store_param(src_reg: u8, offset: i8) -> [u8; 4] {
    let modrm = (0b01 << 6) | (src_reg << 3) | RBP_RM;
    let disp8 = offset.wrapping_neg() as u8;
    [0x48, 0x89, modrm, disp8]
}

/// The shortest `mov imm -> reg` encoding for `value` at `width`: `B8+reg`
/// with a 4-byte zero-padded immediate for widths <= 32, or `REX.W B8+reg`
/// with a full 8-byte immediate for 64-bit literals.
fn mov_imm_to_reg(width: Width, value: i128, dest: u8) -> Vec<u8> {
    match width {
        Width::W8 => {
            let mut bytes = vec![0xB8 + dest, value as i8 as u8];
            bytes.extend_from_slice(&[0, 0, 0]);
            bytes
        }
        Width::W16 => {
            let mut bytes = vec![0xB8 + dest];
            bytes.extend_from_slice(&(value as i16 as u16).to_le_bytes());
            bytes.extend_from_slice(&[0, 0]);
            bytes
        }
        Width::W32 => {
            let mut bytes = vec![0xB8 + dest];
            bytes.extend_from_slice(&(value as i32 as u32).to_le_bytes());
            bytes
        }
        Width::W64 => {
            let mut bytes = vec![0x48, 0xB8 + dest];
            bytes.extend_from_slice(&(value as i64 as u64).to_le_bytes());
            bytes
        }
    }
}
