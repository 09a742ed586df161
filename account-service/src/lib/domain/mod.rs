pub mod account;
pub mod item;
