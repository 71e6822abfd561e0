pub mod aggregate;
pub mod deficiency;
pub mod nutrients;
pub mod recommend;
pub mod units;
