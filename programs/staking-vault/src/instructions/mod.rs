pub mod add_rewarder;
pub mod cancel_unstake;
pub mod initialize_program_accounts;
pub mod initialize_vault_state;
pub mod remove_rewarder;
pub mod reward;
pub mod set_blacklist;
pub mod set_cooldown;
pub mod set_vesting_period;
pub mod stake;
pub mod start_unstake;
pub mod transfer_admin;
pub mod unstake;

pub use add_rewarder::*;
pub use cancel_unstake::*;
pub use initialize_program_accounts::*;
pub use initialize_vault_state::*;
pub use remove_rewarder::*;
pub use reward::*;
pub use set_blacklist::*;
pub use set_cooldown::*;
pub use set_vesting_period::*;
pub use stake::*;
pub use start_unstake::*;
pub use transfer_admin::*;
pub use unstake::*;
