//! Clusters of Intcode machines.
//!
//! Two ways of wiring machines together, both relying on a machine
//! suspending when its input queue runs dry:
//!
//! - [`Network`]: many machines exchanging three-cell packets, with a NAT
//!   node that wakes machine 0 when the whole network goes idle
//! - [`pipeline`]: a chain of machines, each feeding its output to the
//!   next, optionally looped back into the first
//!
//! Scheduling is single-threaded and cooperative: each machine runs until
//! it blocks on input or halts, then the next one gets its turn.

pub mod error;
pub mod network;
pub mod pipeline;

pub use error::{NetworkError, PipelineError};
pub use network::{Network, Packet, IDLE_SIGNAL, NAT_ADDRESS, NETWORK_SIZE};
pub use pipeline::{best_phase_setting, run_chain, run_feedback_loop};
