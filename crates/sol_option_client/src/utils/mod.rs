pub mod math;
pub mod pda;

pub use math::*;
pub use pda::*;
