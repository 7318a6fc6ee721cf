pub mod card;
pub mod quiz;
pub mod review;
pub mod subject;

pub use card::Flashcard;
pub use quiz::{QuizAnswer, QuizQuestion};
pub use review::{ReviewLog, ReviewQuality};
pub use subject::Subject;
