use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::AccountId;

use crate::error::LotteryError;
use crate::events::LotteryEvent;
use crate::Balance;

/// Smallest accepted entry: 0.01 NEAR.
pub const MIN_CONTRIBUTION: Balance = 10_000_000_000_000_000_000_000;

/// Lottery state machine, independent of the host it runs in.
///
/// Every operation validates before it mutates, so an `Err` leaves the
/// state exactly as it was.
#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, PartialEq, Eq)]
pub struct Lottery {
    manager: AccountId,
    players: Vec<AccountId>,
    pot: Balance,
}

/// Result of a successful draw. The host is responsible for moving `amount`
/// to `winner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub winner: AccountId,
    pub amount: Balance,
    pub entries: usize,
}

impl Payout {
    pub fn event(&self) -> LotteryEvent {
        LotteryEvent::WinnerPicked {
            winner: self.winner.clone(),
            amount: self.amount,
            entries: self.entries,
        }
    }
}

impl Lottery {
    pub fn new(manager: AccountId) -> Self {
        Self {
            manager,
            players: Vec::new(),
            pot: 0,
        }
    }

    pub fn manager(&self) -> &AccountId {
        &self.manager
    }

    pub fn players(&self) -> &[AccountId] {
        &self.players
    }

    pub fn pot(&self) -> Balance {
        self.pot
    }

    pub fn created_event(&self) -> LotteryEvent {
        LotteryEvent::Created {
            manager: self.manager.clone(),
        }
    }

    /// Record an entry. Re-entering is allowed and adds a second ticket.
    pub fn enter(
        &mut self,
        player: AccountId,
        contribution: Balance,
    ) -> Result<LotteryEvent, LotteryError> {
        if contribution < MIN_CONTRIBUTION {
            return Err(LotteryError::InsufficientContribution {
                attached: contribution,
                minimum: MIN_CONTRIBUTION,
            });
        }

        self.players.push(player.clone());
        self.pot += contribution;

        Ok(LotteryEvent::Entered {
            player,
            contribution,
            entries: self.players.len(),
        })
    }

    /// Draw a winner using `random_seed`, empty the player list and hand the
    /// whole pot to the winner.
    pub fn pick_winner(
        &mut self,
        caller: &AccountId,
        random_seed: &[u8; 32],
    ) -> Result<Payout, LotteryError> {
        if caller != &self.manager {
            return Err(LotteryError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if self.players.is_empty() {
            return Err(LotteryError::NoPlayers);
        }

        let entries = self.players.len();
        let winner = self.players[winner_index(random_seed, entries)].clone();
        let amount = std::mem::take(&mut self.pot);
        self.players.clear();

        Ok(Payout {
            winner,
            amount,
            entries,
        })
    }

    /// Put an undelivered payout back into the pot. The players of that
    /// round stay cleared; the amount goes to whoever wins the next draw.
    pub fn restore_pot(&mut self, winner: AccountId, amount: Balance) -> LotteryEvent {
        self.pot += amount;
        LotteryEvent::PayoutFailed { winner, amount }
    }
}

/// First eight seed bytes as a little-endian integer, reduced modulo the
/// number of entries.
pub fn winner_index(random_seed: &[u8; 32], entries: usize) -> usize {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&random_seed[..8]);
    (u64::from_le_bytes(bytes) % entries as u64) as usize
}
