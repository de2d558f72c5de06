pub mod aggregate;
pub mod tally;
