//! `asm`: assembles Setun-1958 mnemonic source into the nonary
//! program-load text format `sim` consumes.

mod assemble;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use setun_core::codec::word_to_nonary;

#[derive(Parser, Debug)]
#[command(name = "asm", about = "Setun-1958 mnemonic assembler")]
struct Args {
    /// Source file: one `MNEMONIC ADDRESS` instruction per line.
    source: PathBuf,

    /// Output path for the assembled nonary program-load text.
    #[arg(short, long, default_value = "out.setun")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = fs::read_to_string(&args.source)
        .with_context(|| format!("reading source file {:?}", args.source))?;
    let words = assemble::assemble(&source)?;

    let text: String = words
        .iter()
        .map(|w| word_to_nonary(w))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&args.output, text + "\n")
        .with_context(|| format!("writing output file {:?}", args.output))?;

    info!("assembled {} instructions into {:?}", words.len(), args.output);
    println!("assembled {} instructions -> {:?}", words.len(), args.output);
    Ok(())
}
