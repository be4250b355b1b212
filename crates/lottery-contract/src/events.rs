use std::fmt;

use near_sdk::AccountId;

use crate::Balance;

/// Log lines produced by successful lottery mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotteryEvent {
    Created {
        manager: AccountId,
    },
    Entered {
        player: AccountId,
        contribution: Balance,
        entries: usize,
    },
    WinnerPicked {
        winner: AccountId,
        amount: Balance,
        entries: usize,
    },
    PayoutFailed {
        winner: AccountId,
        amount: Balance,
    },
}

impl fmt::Display for LotteryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotteryEvent::Created { manager } => {
                write!(f, "Lottery: created with manager {}", manager)
            }
            LotteryEvent::Entered { player, contribution, entries } => write!(
                f,
                "Lottery: {} entered with {} yoctoNEAR ({} entries)",
                player, contribution, entries
            ),
            LotteryEvent::WinnerPicked { winner, amount, entries } => write!(
                f,
                "Lottery: {} won {} yoctoNEAR out of {} entries",
                winner, amount, entries
            ),
            LotteryEvent::PayoutFailed { winner, amount } => write!(
                f,
                "Lottery: payout of {} yoctoNEAR to {} failed, returned to the pot",
                amount, winner
            ),
        }
    }
}
