//! Errors raised while driving groups of machines.
//!
//! Machine failures are passed through unchanged, tagged with which
//! machine raised them.

use intcode_vm::RuntimeError;
use thiserror::Error;

/// Errors from the packet network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// A machine failed; the network cannot continue.
    #[error("machine {address}: {source}")]
    Machine {
        address: usize,
        #[source]
        source: RuntimeError,
    },

    /// A packet named a destination that is neither a machine nor the NAT.
    #[error("machine {from} sent a packet to unknown address {destination}")]
    UnknownAddress { from: usize, destination: i64 },
}

/// Errors from amplifier pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A stage failed.
    #[error("stage {stage}: {source}")]
    Machine {
        stage: usize,
        #[source]
        source: RuntimeError,
    },

    /// A stage halted or blocked without producing a signal.
    #[error("stage {stage} produced no output")]
    NoOutput { stage: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_machine_error() {
        let e = NetworkError::Machine {
            address: 3,
            source: RuntimeError::InvalidOpcode { at: 0, opcode: 42 },
        };
        assert_eq!(e.to_string(), "machine 3: invalid opcode 42 at address 0");
    }

    #[test]
    fn display_unknown_address() {
        let e = NetworkError::UnknownAddress {
            from: 1,
            destination: 77,
        };
        assert_eq!(
            e.to_string(),
            "machine 1 sent a packet to unknown address 77"
        );
    }

    #[test]
    fn display_pipeline_errors() {
        assert_eq!(
            PipelineError::NoOutput { stage: 4 }.to_string(),
            "stage 4 produced no output"
        );
        let e = PipelineError::Machine {
            stage: 0,
            source: RuntimeError::NegativeAddress { at: 2, address: -1 },
        };
        assert_eq!(
            e.to_string(),
            "stage 0: negative address -1 accessed by instruction at 2"
        );
    }
}
