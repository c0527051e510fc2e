pub mod category;
pub mod drink;
pub mod question;
