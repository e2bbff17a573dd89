mod engine;

pub use engine::{AttemptEngine, AttemptState};
