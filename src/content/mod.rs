//! Content ingestion: turning pasted study notes into flashcards.

pub mod generator;

pub use generator::{from_provider, CardGenerator, DraftCard, HeuristicGenerator};
