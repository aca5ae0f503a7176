pub mod stage1_smooth;
pub mod stage2_role_map;
pub mod stage3_turns;
pub mod stage4_cleanup;

pub use stage1_smooth::*;
pub use stage2_role_map::*;
pub use stage3_turns::*;
pub use stage4_cleanup::*;
