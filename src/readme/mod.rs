pub mod section;
pub mod table;
