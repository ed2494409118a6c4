//! Civic education quizzes.
//!
//! Categories and questions are public. Answering and progress need a user;
//! each (user, question) pair is recorded at most once.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::QuizService;
