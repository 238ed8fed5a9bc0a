//! ELF64 relocatable object writer.
//!
//! Accumulates sections, symbols, and the two string tables as the code
//! generator runs, then assembles a well-formed little-endian ELF64
//! relocatable for `EM_X86_64` on [`ElfWriter::finish`].

use awlc_util::bug;

const EHSIZE: u64 = 0x40;
const SHENTSIZE: u64 = 0x40;
const STENTSIZE: u64 = 0x18;

pub mod sht {
    pub const NULL: u32 = 0x00;
    pub const PROGBITS: u32 = 0x01;
    pub const SYMTAB: u32 = 0x02;
    pub const STRTAB: u32 = 0x03;
}

pub mod shf {
    pub const ALLOC: u64 = 0x02;
    pub const EXECINSTR: u64 = 0x04;
}

pub mod stb {
    pub const LOCAL: u8 = 0x00;
    pub const GLOBAL: u8 = 0x01;
}

pub mod stt {
    pub const NOTYPE: u8 = 0x00;
    pub const FUNC: u8 = 0x02;
}

const SHN_UNDEF: u16 = 0x0000;

struct SectionHeader {
    name: u32,
    ty: u32,
    flags: u64,
    offset: u64,
    size: u64,
    link: u32,
    info: u32,
    entsize: u64,
}

struct Section {
    header: SectionHeader,
    data: Vec<u8>,
}

struct Symbol {
    name: u32,
    info: u8,
    shndx: u16,
    value: u64,
}

/// An in-progress ELF64 relocatable object.
///
/// Section 0 (the null section) and symbol 0 (the null symbol) are created
/// by [`ElfWriter::new`]; every subsequent section/symbol is appended by
/// the code generator as it runs.
pub struct ElfWriter {
    sections: Vec<Section>,
    current: usize,
    symbols: Vec<Symbol>,
    shstrtab: Vec<u8>,
    strtab: Vec<u8>,
}

impl ElfWriter {
    pub fn new() -> Self {
        let mut writer = Self {
            sections: Vec::new(),
            current: 0,
            symbols: Vec::new(),
            shstrtab: Vec::new(),
            strtab: Vec::new(),
        };
        writer.add_section("", sht::NULL, 0);
        writer.add_symbol(Some(SHN_UNDEF), "", stb::LOCAL, stt::NOTYPE, 0);
        writer
    }

    /// Appends a new section and records its name in `.shstrtab`.
    pub fn add_section(&mut self, name: &str, ty: u32, flags: u64) {
        let name_off = self.push_shstr(name);
        self.sections.push(Section {
            header: SectionHeader { name: name_off, ty, flags, offset: 0, size: 0, link: 0, info: 0, entsize: 0 },
            data: Vec::new(),
        });
    }

    /// Makes `name` the section later [`ElfWriter::write`] calls append to.
    pub fn set_section(&mut self, name: &str) {
        match self.sections.iter().position(|s| self.shstr_at(s.header.name) == name) {
            Some(idx) => self.current = idx,
            None => bug!("tried to access invalid ELF section '{}'", name),
        }
    }

    /// The byte offset of the next write within the current section — used
    /// to record a function symbol's value before its body is emitted.
    pub fn current_section_size(&self) -> u64 {
        self.sections[self.current].data.len() as u64
    }

    pub fn write(&mut self, data: &[u8]) {
        self.sections[self.current].data.extend_from_slice(data);
    }

    /// Adds a symbol. `section` is `None` to mean "the current section",
    /// matching the writer's `SHN_CUR` convention in the original.
    pub fn add_symbol(&mut self, section: Option<u16>, name: &str, binding: u8, ty: u8, value: u64) {
        let name_off = self.push_str(name);
        let shndx = section.unwrap_or(self.current as u16);
        self.symbols.push(Symbol { name: name_off, info: (binding << 4) | (ty & 0xF), shndx, value });
    }

    fn push_shstr(&mut self, s: &str) -> u32 {
        let off = self.shstrtab.len() as u32;
        self.shstrtab.extend_from_slice(s.as_bytes());
        self.shstrtab.push(0);
        off
    }

    fn push_str(&mut self, s: &str) -> u32 {
        let off = self.strtab.len() as u32;
        self.strtab.extend_from_slice(s.as_bytes());
        self.strtab.push(0);
        off
    }

    fn shstr_at(&self, offset: u32) -> &str {
        let start = offset as usize;
        let end = self.shstrtab[start..].iter().position(|&b| b == 0).map(|n| start + n).unwrap_or(self.shstrtab.len());
        std::str::from_utf8(&self.shstrtab[start..end]).unwrap_or("")
    }

    /// Builds `.symtab`, `.strtab`, and `.shstrtab`, computes section
    /// offsets, and serialises the whole object to bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let symtab_data = self.build_symtab();
        let nlocal = self.symbols.iter().filter(|s| s.info >> 4 == stb::LOCAL).count() as u32;

        let symtab_idx = self.sections.len();
        self.add_section(".symtab", sht::SYMTAB, 0);
        self.sections[symtab_idx].header.info = nlocal;
        self.sections[symtab_idx].header.size = (self.symbols.len() as u64) * STENTSIZE;
        self.sections[symtab_idx].header.entsize = STENTSIZE;
        self.sections[symtab_idx].data = symtab_data;

        let strtab_idx = self.sections.len();
        self.add_section(".strtab", sht::STRTAB, 0);
        self.sections[strtab_idx].header.size = self.strtab.len() as u64;
        self.sections[strtab_idx].data = std::mem::take(&mut self.strtab);

        self.sections[symtab_idx].header.link = strtab_idx as u32;

        let shstrtab_idx = self.sections.len();
        let shstrndx = shstrtab_idx as u16;
        self.add_section(".shstrtab", sht::STRTAB, 0);
        self.sections[shstrtab_idx].header.size = self.shstrtab.len() as u64;
        self.sections[shstrtab_idx].data = std::mem::take(&mut self.shstrtab);

        let mut offset = EHSIZE + SHENTSIZE * self.sections.len() as u64;
        for section in self.sections.iter_mut().skip(1) {
            section.header.offset = offset;
            offset += section.header.size;
        }

        let mut out = Vec::new();
        self.emit_header(&mut out, shstrndx);
        for section in &self.sections {
            self.emit_section_header(&mut out, &section.header);
        }
        for section in &self.sections {
            out.extend_from_slice(&section.data);
        }
        out
    }

    fn build_symtab(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.symbols.len() * STENTSIZE as usize);
        for binding in [stb::LOCAL, stb::GLOBAL] {
            for sym in &self.symbols {
                if sym.info >> 4 != binding {
                    continue;
                }
                out.extend_from_slice(&sym.name.to_le_bytes());
                out.push(sym.info);
                out.push(0); // other
                out.extend_from_slice(&sym.shndx.to_le_bytes());
                out.extend_from_slice(&sym.value.to_le_bytes());
                out.extend_from_slice(&0u64.to_le_bytes()); // size
            }
        }
        out
    }

    fn emit_header(&self, out: &mut Vec<u8>, shstrndx: u16) {
        out.extend_from_slice(&[0x7F, 0x45, 0x4C, 0x46]); // EI_MAG
        out.push(0x02); // EI_CLASS = 64-bit
        out.push(0x01); // EI_DATA = little-endian
        out.push(0x01); // EI_VERSION
        out.push(0x00); // EI_OSABI = System V
        out.push(0x00); // EI_ABIVERSION
        out.extend_from_slice(&[0u8; 7]); // EI_PAD

        out.extend_from_slice(&1u16.to_le_bytes()); // e_type = ET_REL
        out.extend_from_slice(&0x3Eu16.to_le_bytes()); // e_machine = EM_X86_64
        out.extend_from_slice(&1u32.to_le_bytes()); // e_version
        out.extend_from_slice(&0u64.to_le_bytes()); // e_entry
        out.extend_from_slice(&0u64.to_le_bytes()); // e_phoff
        out.extend_from_slice(&0x40u64.to_le_bytes()); // e_shoff
        out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
        out.extend_from_slice(&(EHSIZE as u16).to_le_bytes()); // e_ehsize
        out.extend_from_slice(&0u16.to_le_bytes()); // e_phentsize
        out.extend_from_slice(&0u16.to_le_bytes()); // e_phnum
        out.extend_from_slice(&(SHENTSIZE as u16).to_le_bytes()); // e_shentsize
        out.extend_from_slice(&(self.sections.len() as u16).to_le_bytes()); // e_shnum
        out.extend_from_slice(&shstrndx.to_le_bytes()); // e_shstrndx
    }

    fn emit_section_header(&self, out: &mut Vec<u8>, hdr: &SectionHeader) {
        out.extend_from_slice(&hdr.name.to_le_bytes());
        out.extend_from_slice(&hdr.ty.to_le_bytes());
        out.extend_from_slice(&hdr.flags.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes()); // addr
        out.extend_from_slice(&hdr.offset.to_le_bytes());
        out.extend_from_slice(&hdr.size.to_le_bytes());
        out.extend_from_slice(&hdr.link.to_le_bytes());
        out.extend_from_slice(&hdr.info.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes()); // addralign
        out.extend_from_slice(&hdr.entsize.to_le_bytes());
    }
}

impl Default for ElfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_object_has_expected_header_fields() {
        let writer = ElfWriter::new();
        let bytes = writer.finish();
        assert_eq!(&bytes[0..4], &[0x7F, 0x45, 0x4C, 0x46]);
        assert_eq!(bytes[4], 0x02);
        assert_eq!(bytes[5], 0x01);
        let e_shoff = u64::from_le_bytes(bytes[0x20..0x28].try_into().unwrap());
        assert_eq!(e_shoff, 0x40);
    }

    #[test]
    fn text_section_with_function_symbol_round_trips() {
        let mut writer = ElfWriter::new();
        writer.add_section(".text", sht::PROGBITS, shf::ALLOC | shf::EXECINSTR);
        writer.set_section(".text");
        writer.add_symbol(None, "main", stb::GLOBAL, stt::FUNC, writer.current_section_size());
        writer.write(&[0x55, 0x48, 0x89, 0xE5, 0x5D, 0xC3]);
        let bytes = writer.finish();
        assert!(bytes.len() > 0x40);
    }
}
