pub mod predict;
pub mod util;
