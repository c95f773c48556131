pub mod block;
pub mod state;

pub use block::*;
pub use state::*;
