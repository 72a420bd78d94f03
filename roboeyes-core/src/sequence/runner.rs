//! Sequence execution
//!
//! Each sequence is anchored to the timestamp it was started at. Calling
//! `update` with the current time fires every step that has come due,
//! exactly once, in the order the steps were added.

use heapless::{String, Vec};

use super::step::Step;

/// Maximum number of sequences held by one [`Sequences`]
pub const MAX_SEQUENCES: usize = 8;

/// Maximum steps per sequence
pub const MAX_STEPS: usize = 16;

/// Maximum sequence name length (bytes)
pub const MAX_NAME_LEN: usize = 16;

/// Sequence building and lookup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Already holding [`MAX_SEQUENCES`] sequences
    TooManySequences,
    /// Sequence already holds [`MAX_STEPS`] steps
    TooManySteps,
    /// Name longer than [`MAX_NAME_LEN`]
    NameTooLong,
    /// No sequence with that name
    UnknownSequence,
    /// A sequence with that name already exists
    DuplicateName,
}

/// Named, time-anchored list of steps
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence<A> {
    name: String<MAX_NAME_LEN>,
    steps: Vec<Step<A>, MAX_STEPS>,
    /// Start timestamp, `None` until started (or after reset)
    started_at_ms: Option<u64>,
}

impl<A: Copy> Sequence<A> {
    /// Create an empty, unstarted sequence
    pub fn new(name: &str) -> Result<Self, SequenceError> {
        let mut label = String::new();
        label
            .push_str(name)
            .map_err(|_| SequenceError::NameTooLong)?;
        Ok(Self {
            name: label,
            steps: Vec::new(),
            started_at_ms: None,
        })
    }

    /// Sequence name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Append a step firing `delay_ms` after start
    pub fn step(&mut self, delay_ms: u32, action: A) -> Result<&mut Self, SequenceError> {
        self.steps
            .push(Step::new(delay_ms, action))
            .map_err(|_| SequenceError::TooManySteps)?;
        Ok(self)
    }

    /// All steps in insertion order
    pub fn steps(&self) -> &[Step<A>] {
        &self.steps
    }

    /// Anchor the sequence at `now_ms`
    ///
    /// Steps that already fired stay fired; use [`reset`](Self::reset) to
    /// run the sequence again from scratch.
    pub fn start(&mut self, now_ms: u64) {
        self.started_at_ms = Some(now_ms);
    }

    /// Stop the sequence and rearm every step
    pub fn reset(&mut self) {
        self.started_at_ms = None;
        for step in self.steps.iter_mut() {
            step.rearm();
        }
    }

    /// Whether the sequence has been started since the last reset
    pub fn is_started(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// True when never started, or when every step has fired
    pub fn is_done(&self) -> bool {
        match self.started_at_ms {
            None => true,
            Some(_) => self.steps.iter().all(Step::is_fired),
        }
    }

    /// Fire every due step, handing its action to `fire`
    pub fn update(&mut self, now_ms: u64, mut fire: impl FnMut(A)) {
        let Some(start) = self.started_at_ms else {
            return;
        };
        let elapsed = now_ms.saturating_sub(start);
        for step in self.steps.iter_mut() {
            if let Some(action) = step.poll(elapsed) {
                fire(action);
            }
        }
    }
}

/// Collection of independently started sequences
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequences<A> {
    sequences: Vec<Sequence<A>, MAX_SEQUENCES>,
}

impl<A> Default for Sequences<A> {
    fn default() -> Self {
        Self {
            sequences: Vec::new(),
        }
    }
}

impl<A: Copy> Sequences<A> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new sequence and return it for building
    ///
    /// Names are unique; adding an existing name fails.
    pub fn add(&mut self, name: &str) -> Result<&mut Sequence<A>, SequenceError> {
        if self.get(name).is_some() {
            return Err(SequenceError::DuplicateName);
        }
        let sequence = Sequence::new(name)?;
        self.sequences
            .push(sequence)
            .map_err(|_| SequenceError::TooManySequences)?;
        let last = self.sequences.len() - 1;
        Ok(&mut self.sequences[last])
    }

    /// Look up a sequence by name
    pub fn get(&self, name: &str) -> Option<&Sequence<A>> {
        self.sequences.iter().find(|s| s.name() == name)
    }

    /// Look up a sequence by name for modification
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Sequence<A>> {
        self.sequences.iter_mut().find(|s| s.name() == name)
    }

    /// Start the named sequence at `now_ms`
    pub fn start(&mut self, name: &str, now_ms: u64) -> Result<(), SequenceError> {
        let sequence = self.get_mut(name).ok_or(SequenceError::UnknownSequence)?;
        sequence.start(now_ms);
        Ok(())
    }

    /// Reset the named sequence
    pub fn reset(&mut self, name: &str) -> Result<(), SequenceError> {
        let sequence = self.get_mut(name).ok_or(SequenceError::UnknownSequence)?;
        sequence.reset();
        Ok(())
    }

    /// Remove every sequence
    pub fn clear(&mut self) {
        self.sequences.clear();
    }

    /// True when every sequence is done (or none exist)
    pub fn is_done(&self) -> bool {
        self.sequences.iter().all(Sequence::is_done)
    }

    /// Advance every sequence in insertion order
    pub fn update(&mut self, now_ms: u64, mut fire: impl FnMut(A)) {
        for sequence in self.sequences.iter_mut() {
            sequence.update(now_ms, &mut fire);
        }
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether there are no sequences
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Iterate sequences in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Sequence<A>> {
        self.sequences.iter()
    }
}
