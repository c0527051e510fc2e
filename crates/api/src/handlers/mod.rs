pub mod categories;
pub mod drinks;
pub mod fallback;
pub mod questions;
pub mod quizzes;
