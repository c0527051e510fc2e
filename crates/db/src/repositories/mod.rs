//! Repository layer: one unit struct per table with associated query fns.
//!
//! Every function takes a `&mut PgConnection` so callers decide the
//! transaction scope; the PostgreSQL stores pass `&mut *tx`.

pub mod category_repo;
pub mod drink_repo;
pub mod question_repo;

pub use category_repo::CategoryRepo;
pub use drink_repo::DrinkRepo;
pub use question_repo::QuestionRepo;
