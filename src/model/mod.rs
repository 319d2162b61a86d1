pub mod balance;
pub mod weather;
