pub mod combos;
pub mod score;
pub mod select;
