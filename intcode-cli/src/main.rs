//! Intcode CLI: run, assemble, and disassemble programs, and drive clusters.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/parse/assembly error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "assemble" => commands::assemble(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "network" => commands::network(&args[2..]),
        "chain" => commands::chain(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: intcode <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog> [--input a,b,c] [--noun N] [--verb V] [--ascii]");
    eprintln!("                                        Execute a program and print its output");
    eprintln!("  assemble <input.asm> [-o output]      Assemble mnemonic text to a program");
    eprintln!("  disassemble <prog>                    Print a program as mnemonic text");
    eprintln!("  network <prog> [--size N]             Run a packet network until the NAT repeats");
    eprintln!("  chain <prog> --phases a,b,c [--feedback] [--search]");
    eprintln!("                                        Run an amplifier chain");
}
