//! Driver: threads lex → parse → analyse → generate → write, and names the
//! output file.
//!
//! Per §5 of the spec this implements, control flow is strictly sequential
//! and nothing is retried: a source/internal error terminates the process
//! from inside `awlc_util::diagnostic` before this function ever sees a
//! `Result` to propagate, and a user error (bad path) is the only thing
//! that comes back through `anyhow` for `main` to report.

use std::path::PathBuf;

use clap::Parser as ClapParser;

use awlc_gen::CodeGenerator;
use awlc_lex::Lexer;
use awlc_par::Parser as AwlParser;
use awlc_sem::Analyser;
use awlc_util::{CompileError, SourceFile};

/// `awlc <path>` — compiles one source file to `<path>.o`.
#[derive(ClapParser, Debug)]
#[command(name = "awlc", version, about = "Compiles a single .awl source file to an ELF64 relocatable object")]
pub struct Cli {
    /// Path to the source file to compile.
    pub path: PathBuf,

    /// Log each pipeline stage to stderr as it runs.
    #[arg(short, long)]
    pub verbose: bool,
}

/// State for a single compiler invocation.
pub struct Session {
    cli: Cli,
}

impl Session {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Runs the full pipeline against `self.cli.path` and writes the object
    /// file. The object is assembled entirely in memory and only written
    /// once generation succeeds, so a failing pipeline never leaves a
    /// zero-length `.o` behind.
    pub fn compile(&self) -> anyhow::Result<()> {
        let file = SourceFile::load(&self.cli.path)?;

        self.log("lexing");
        let tokens = Lexer::new(&file).tokenize();

        self.log("parsing");
        let pfile = AwlParser::new(tokens, &file).parse_file();

        self.log("analysing");
        let tfile = Analyser::new(&file).analyse(pfile);

        self.log("generating code");
        let object = CodeGenerator::new(&tfile).generate();

        let output_path = file.output_path();
        self.log(&format!("writing {}", output_path.display()));
        std::fs::write(&output_path, &object).map_err(|source| CompileError::WriteFailed {
            path: output_path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    fn log(&self, stage: &str) {
        if self.cli.verbose {
            eprintln!("awlc: {stage}");
        }
    }
}
