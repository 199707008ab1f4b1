pub mod control;
pub mod startup;
