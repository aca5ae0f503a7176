pub mod deepgram;
pub mod role;
pub mod segment;
pub mod turn;

pub use deepgram::*;
pub use role::*;
pub use segment::*;
pub use turn::*;
