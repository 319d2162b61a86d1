pub mod vacation;
pub mod weather;
