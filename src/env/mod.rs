//! Decision environment for learning agents.
//!
//! - `CamelEnv`: `reset(seed)` / `step(action)` over the 48-slot action space
//! - `ObservationEncoder`: the 253-feature observation vector
//! - `StateEncoder`: trait for alternative encodings

mod environment;
mod observation;

pub use environment::{CamelEnv, StepInfo, StepOutcome, AGENT, ILLEGAL_ACTION_REWARD, OPPONENT};
pub use observation::{layout, EncodedState, ObservationEncoder, StateEncoder, OBSERVATION_DIM};
