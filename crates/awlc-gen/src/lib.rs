//! Typed tree to x86-64 machine code, assembled into an ELF64 relocatable
//! object.

mod elf;
mod x86;

pub use elf::ElfWriter;
pub use x86::CodeGenerator;
