pub mod token;
pub mod track;
