pub mod collect_fees;
pub mod compound_rewards;
pub mod deposit;
pub mod initialize_protocol_adapter;
pub mod initialize_vault;
pub mod rebalance;
pub mod set_adapter_active;
pub mod set_paused;
pub mod update_vault_config;
pub mod update_yield_data;
pub mod withdraw;

pub use collect_fees::*;
pub use compound_rewards::*;
pub use deposit::*;
pub use initialize_protocol_adapter::*;
pub use initialize_vault::*;
pub use rebalance::*;
pub use set_adapter_active::*;
pub use set_paused::*;
pub use update_vault_config::*;
pub use update_yield_data::*;
pub use withdraw::*;
