pub mod protocol_adapter;
pub mod user_position;
pub mod vault;

pub use protocol_adapter::*;
pub use user_position::*;
pub use vault::*;
