mod quiz;

pub use quiz::{CategoryProgressRow, Quiz, QuizCategory};
