pub mod cagr;
pub mod projection;
pub mod tax;
