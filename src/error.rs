/// A component contract was violated by its caller, e.g. starting a sequencer
/// twice, grading before offering, grading twice. These are programming
/// errors: a correct orchestration never produces one, and tests assert on
/// them rather than user-facing code catching them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid state: {0}")]
pub struct InvalidStateError(pub &'static str);
