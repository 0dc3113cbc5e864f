//! Domain models for the Utzk'aslem dashboard

mod alert;
mod crop;
mod gateway;
mod region;
mod risk;
mod weather;

pub use alert::*;
pub use crop::*;
pub use gateway::*;
pub use region::*;
pub use risk::*;
pub use weather::*;
