//! Guest-facing reply production: canned replies, contextual fact blocks,
//! per-topic fallbacks, and post-processing of model output.

pub mod generator;
pub mod naturalizer;

pub use generator::ResponseGenerator;
pub use naturalizer::ResponseNaturalizer;
