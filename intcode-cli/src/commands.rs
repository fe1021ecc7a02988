//! CLI command implementations.

use std::fs;

use intcode_cluster::{Network, NetworkError, PipelineError, NETWORK_SIZE};
use intcode_common::Program;
use intcode_vm::{ascii, Machine, State};

/// Execute a program and print its output.
pub fn run(args: &[String]) -> Result<(), i32> {
    let input = require_file(args, "run", "<prog> [--input a,b,c] [--noun N] [--verb V] [--ascii]")?;
    let program = read_program(input)?;
    let noun = int_flag(args, "--noun")?;
    let verb = int_flag(args, "--verb")?;
    let ascii = has_flag(args, "--ascii");

    let inputs = if ascii {
        // Text input is sent as one line.
        let mut text = flag_value(args, "--input").unwrap_or_default().to_string();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        ascii::encode(&text)
    } else {
        match flag_value(args, "--input") {
            Some(list) => parse_list(list, "--input")?,
            None => Vec::new(),
        }
    };

    let mut machine = Machine::new();
    if let Err(e) = machine.execute_with(&program, inputs, noun, verb) {
        eprintln!("runtime error: {e}");
        return Err(3);
    }

    if ascii {
        let (text, values) = ascii::decode(machine.output());
        print!("{text}");
        for value in values {
            println!("{value}");
        }
    } else if !machine.output().is_empty() {
        println!("{}", Program::new(machine.output().to_vec()));
    }

    if noun.is_some() || verb.is_some() {
        println!("memory[0] = {}", machine.memory().get(0));
    }
    if machine.state() == State::Suspended {
        eprintln!(
            "note: machine suspended waiting for input at address {}",
            machine.ip()
        );
    }
    Ok(())
}

/// Assemble a mnemonic text file to a comma-separated program.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    let input = require_file(args, "assemble", "<input.asm> [-o output]")?;

    let output = match flag_value(args, "-o") {
        Some(path) => path.to_string(),
        None => match input.strip_suffix(".asm") {
            Some(stem) => format!("{stem}.intcode"),
            None => format!("{input}.intcode"),
        },
    };

    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    let program = intcode_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    fs::write(&output, format!("{program}\n")).map_err(|e| {
        eprintln!("error: cannot write '{output}': {e}");
        1
    })?;

    eprintln!("assembled {} cells -> {output}", program.len());
    Ok(())
}

/// Print a program as mnemonic text.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    let input = require_file(args, "disassemble", "<prog>")?;
    let program = read_program(input)?;
    print!("{}", intcode_assembler::disassemble(&program));
    Ok(())
}

/// Boot a packet network and run it until the NAT delivers the same `y`
/// twice in a row.
pub fn network(args: &[String]) -> Result<(), i32> {
    let input = require_file(args, "network", "<prog> [--size N]")?;
    let program = read_program(input)?;
    let size = match flag_value(args, "--size") {
        Some(text) => text.parse::<usize>().map_err(|_| {
            eprintln!("error: --size expects a machine count, got '{text}'");
            1
        })?,
        None => NETWORK_SIZE,
    };

    let network_error = |e: NetworkError| {
        eprintln!("runtime error: {e}");
        3
    };

    let mut network = Network::new(size, &program).map_err(network_error)?;
    network
        .run_until(|net| net.first_nat_packet().is_some())
        .map_err(network_error)?;
    if let Some(packet) = network.first_nat_packet() {
        println!("first NAT packet: x={} y={}", packet.x, packet.y);
    }

    let y = network.run_until_repeat().map_err(network_error)?;
    println!("repeated NAT y: {y}");
    Ok(())
}

/// Run an amplifier chain, optionally looped and optionally searching
/// every phase ordering.
pub fn chain(args: &[String]) -> Result<(), i32> {
    let usage = "<prog> --phases a,b,c [--feedback] [--search]";
    let input = require_file(args, "chain", usage)?;
    let program = read_program(input)?;
    let phases = match flag_value(args, "--phases") {
        Some(list) => parse_list(list, "--phases")?,
        None => {
            eprintln!("error: chain requires --phases");
            eprintln!("Usage: intcode chain {usage}");
            return Err(1);
        }
    };
    let feedback = has_flag(args, "--feedback");

    let pipeline_error = |e: PipelineError| {
        eprintln!("runtime error: {e}");
        3
    };

    if has_flag(args, "--search") {
        let (signal, order) = intcode_cluster::best_phase_setting(&program, &phases, feedback)
            .map_err(pipeline_error)?;
        println!("{signal} (phases {})", Program::new(order));
    } else {
        let signal = if feedback {
            intcode_cluster::run_feedback_loop(&program, &phases)
        } else {
            intcode_cluster::run_chain(&program, &phases)
        }
        .map_err(pipeline_error)?;
        println!("{signal}");
    }
    Ok(())
}

// ---- Helpers ----

/// The first argument, which names the input file.
fn require_file<'a>(args: &'a [String], command: &str, usage: &str) -> Result<&'a str, i32> {
    match args.first() {
        Some(file) if !file.starts_with('-') => Ok(file.as_str()),
        _ => {
            eprintln!("error: {command} requires an input file");
            eprintln!("Usage: intcode {command} {usage}");
            Err(1)
        }
    }
}

/// Read and parse a comma-separated program file.
fn read_program(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;
    Program::parse(&text).map_err(|e| {
        eprintln!("error: {path}: {e}");
        1
    })
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|pair| pair[0] == name)
        .map(|pair| pair[1].as_str())
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

fn int_flag(args: &[String], name: &str) -> Result<Option<i64>, i32> {
    flag_value(args, name)
        .map(|text| {
            text.parse().map_err(|_| {
                eprintln!("error: {name} expects an integer, got '{text}'");
                1
            })
        })
        .transpose()
}

/// A comma-separated list of integers, in the same format as a program.
fn parse_list(text: &str, name: &str) -> Result<Vec<i64>, i32> {
    Program::parse(text).map(|list| list.cells).map_err(|e| {
        eprintln!("error: {name}: {e}");
        1
    })
}
