//! `sim`: the Setun-1958 emulator binary. Loads a program in the nonary
//! text format into FRAM, runs it to a terminal status, and optionally
//! dumps the resulting memory and register state.

mod dump;
mod loader;
mod tape;
mod typewriter;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use setun_core::Cpu;
use setun_core::TritWord;

use tape::FileTape;
use typewriter::{Lang, Typewriter};

#[derive(Parser, Debug)]
#[command(name = "sim", about = "Setun-1958 balanced-ternary emulator")]
struct Args {
    /// Program file in the nonary program-load text format.
    program: PathBuf,

    /// Base FRAM address the program is loaded at, as a symbolic trit string.
    #[arg(long, default_value = "----0")]
    base: String,

    /// Tape input file, one symbolic trit word per line.
    #[arg(long)]
    tape_in: Option<PathBuf>,

    /// Tape output file; words written by the `-00` opcode are appended here.
    #[arg(long)]
    tape_out: Option<PathBuf>,

    /// Typewriter alphabet used when rendering tape output as text.
    #[arg(long, value_enum, default_value = "russian")]
    language: LangArg,

    /// Print a full FRAM dump after the run.
    #[arg(long)]
    dump: bool,

    /// Print the final register file as JSON after the run.
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LangArg {
    Russian,
    Latin,
}

impl From<LangArg> for Lang {
    fn from(a: LangArg) -> Lang {
        match a {
            LangArg::Russian => Lang::Russian,
            LangArg::Latin => Lang::Latin,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = TritWord::from_symbolic(&args.base)
        .with_context(|| format!("invalid base address {:?}", args.base))?;

    let program_text = fs::read_to_string(&args.program)
        .with_context(|| format!("reading program file {:?}", args.program))?;

    let tape_text = match &args.tape_in {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading tape file {path:?}"))?,
        None => String::new(),
    };
    let tape = FileTape::new(&tape_text, args.tape_out.clone())
        .context("constructing tape device")?;

    let mut cpu = Cpu::with_tape(Box::new(tape));
    loader::load_program(&mut cpu, &base, &program_text).context("loading program")?;
    cpu.regs.set_c(&base);

    let language: Lang = args.language.into();

    let status = cpu.run();
    info!("run finished: {status:?}");
    println!("halt status: {status:?}");
    println!("S = {} ({})", cpu.regs.s, cpu.regs.s.to_int());
    println!("R = {} ({})", cpu.regs.r, cpu.regs.r.to_int());
    println!("C = {} ({})", cpu.regs.c, cpu.regs.c.to_int());

    let mut typewriter = Typewriter::new(language);
    let typed = typewriter.feed_word(&cpu.regs.s.slice(1, 9));
    if !typed.is_empty() {
        println!("S as typewriter text: {typed}");
    }

    if args.dump {
        print!("{}", dump::dump_fram(&cpu.fram));
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&cpu.regs)?);
    }

    Ok(())
}
