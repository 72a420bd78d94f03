//! Scripted sequences
//!
//! Time-keyed one-shot actions ("after 150 ms do X, after 300 ms do Y")
//! that run alongside the frame loop without blocking it.

pub mod runner;
pub mod step;

pub use runner::{
    Sequence, SequenceError, Sequences, MAX_NAME_LEN, MAX_SEQUENCES, MAX_STEPS,
};
pub use step::Step;
