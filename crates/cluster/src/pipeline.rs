//! Amplifier pipelines: machines wired output-to-input in series.
//!
//! Each stage is configured by a phase setting, its first input. The signal
//! starts at 0 and each stage's last output becomes the next stage's input.

use intcode_common::Program;
use intcode_vm::Machine;

use crate::error::PipelineError;

/// Run one pass through a fresh machine per phase and return the final signal.
pub fn run_chain(program: &Program, phases: &[i64]) -> Result<i64, PipelineError> {
    let mut signal = 0;
    for (stage, &phase) in phases.iter().enumerate() {
        let output = intcode_vm::run(program, &[phase, signal])
            .map_err(|source| PipelineError::Machine { stage, source })?;
        signal = *output.last().ok_or(PipelineError::NoOutput { stage })?;
    }
    Ok(signal)
}

/// Loop the last stage back into the first until the last stage halts.
///
/// Stages stay suspended between rounds, keeping their memory. Returns the
/// last signal produced by the final stage.
pub fn run_feedback_loop(program: &Program, phases: &[i64]) -> Result<i64, PipelineError> {
    let mut stages = phases
        .iter()
        .enumerate()
        .map(|(stage, &phase)| {
            let mut machine = Machine::new();
            machine
                .execute(program, [phase])
                .map_err(|source| PipelineError::Machine { stage, source })?;
            Ok(machine)
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    let mut signal = 0;
    while !stages.is_empty() {
        for (stage, machine) in stages.iter_mut().enumerate() {
            let output = machine
                .run([signal])
                .map_err(|source| PipelineError::Machine { stage, source })?;
            signal = *output.last().ok_or(PipelineError::NoOutput { stage })?;
        }
        if stages.last().is_some_and(Machine::is_halted) {
            break;
        }
    }
    Ok(signal)
}

/// Try every ordering of `phases` and return the highest signal with the
/// ordering that produced it.
pub fn best_phase_setting(
    program: &Program,
    phases: &[i64],
    feedback: bool,
) -> Result<(i64, Vec<i64>), PipelineError> {
    let mut best: Option<(i64, Vec<i64>)> = None;
    for order in permutations(phases) {
        let signal = if feedback {
            run_feedback_loop(program, &order)?
        } else {
            run_chain(program, &order)?
        };
        if best.as_ref().map_or(true, |(top, _)| signal > *top) {
            best = Some((signal, order));
        }
    }
    Ok(best.unwrap_or((0, Vec::new())))
}

/// All orderings of `items`, in lexicographic order of positions.
fn permutations(items: &[i64]) -> Vec<Vec<i64>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}
