pub mod candidates;
pub mod cycle;
