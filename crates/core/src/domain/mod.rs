pub mod nutrition;
pub mod recipe;
pub mod substitution;
pub mod tags;
