//! Simple to use cli for keeping track of your own working hours.
//! Clock in, go to lunch, come back, clock out; the hours add themselves up into weekly and
//! monthly totals and can be exported as CSV.
//!

pub mod analysis;
pub mod cli;
pub mod export;
pub mod storage;
pub mod utils;
