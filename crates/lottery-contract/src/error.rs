use near_sdk::{env, AccountId, FunctionError};
use thiserror::Error;

use crate::Balance;

/// Reasons a lottery operation is rejected.
///
/// A rejected operation never changes contract state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotteryError {
    #[error("Insufficient contribution: attached {attached} yoctoNEAR, minimum is {minimum}")]
    InsufficientContribution { attached: Balance, minimum: Balance },

    #[error("Unauthorized: only the manager can pick a winner (caller {caller})")]
    Unauthorized { caller: AccountId },

    #[error("No players have entered the lottery")]
    NoPlayers,
}

impl FunctionError for LotteryError {
    fn panic(&self) -> ! {
        env::panic_str(&self.to_string())
    }
}
