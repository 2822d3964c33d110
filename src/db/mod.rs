pub mod assessments;
pub mod questions;
pub mod results;
pub mod users;
