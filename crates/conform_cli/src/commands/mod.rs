pub mod check;
pub mod translate;
pub mod validate;
