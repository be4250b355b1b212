//! Lottery contract
//!
//! Accounts enter by attaching at least 0.01 NEAR. The account that
//! initialized the contract is the manager and is the only one allowed to
//! draw a winner, who then receives the whole pot.

use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U128;
use near_sdk::{env, near_bindgen, AccountId, Gas, NearToken, PanicOnDefault, Promise, PromiseResult};

pub type Balance = u128;

/// Gas reserved for `on_payout`.
const PAYOUT_CALLBACK_GAS: Gas = Gas::from_tgas(5);

pub mod error;
pub mod events;
pub mod lottery;

pub use error::LotteryError;
pub use events::LotteryEvent;
pub use lottery::{winner_index, Lottery, Payout, MIN_CONTRIBUTION};

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct LotteryContract {
    lottery: Lottery,
}

#[near_bindgen]
impl LotteryContract {
    /// The predecessor of the init call becomes the manager.
    #[init]
    pub fn new() -> Self {
        let lottery = Lottery::new(env::predecessor_account_id());
        env::log_str(&lottery.created_event().to_string());
        Self { lottery }
    }

    #[payable]
    #[handle_result]
    pub fn enter(&mut self) -> Result<(), LotteryError> {
        let event = self.lottery.enter(
            env::predecessor_account_id(),
            env::attached_deposit().as_yoctonear(),
        )?;
        env::log_str(&event.to_string());
        Ok(())
    }

    /// Manager only. Sends the pot to a randomly drawn player and starts a
    /// new round.
    #[handle_result]
    pub fn pick_winner(&mut self) -> Result<AccountId, LotteryError> {
        let payout = self
            .lottery
            .pick_winner(&env::predecessor_account_id(), &env::random_seed_array())?;
        env::log_str(&payout.event().to_string());

        Promise::new(payout.winner.clone())
            .transfer(NearToken::from_yoctonear(payout.amount))
            .then(
                Self::ext(env::current_account_id())
                    .with_static_gas(PAYOUT_CALLBACK_GAS)
                    .on_payout(payout.winner.clone(), U128(payout.amount)),
            );
        Ok(payout.winner)
    }

    /// Resolves the payout transfer. A bounced transfer is refunded to this
    /// account, so its amount goes back into the pot for the next draw.
    #[private]
    pub fn on_payout(&mut self, winner: AccountId, amount: U128) -> bool {
        match env::promise_result(0) {
            PromiseResult::Successful(_) => true,
            PromiseResult::Failed => {
                let event = self.lottery.restore_pot(winner, amount.0);
                env::log_str(&event.to_string());
                false
            }
        }
    }

    pub fn get_players(&self) -> Vec<AccountId> {
        self.lottery.players().to_vec()
    }

    pub fn manager(&self) -> AccountId {
        self.lottery.manager().clone()
    }

    pub fn get_pot(&self) -> U128 {
        U128(self.lottery.pot())
    }

    pub fn get_player_count(&self) -> u64 {
        self.lottery.players().len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use near_sdk::test_utils::{accounts, get_logs, VMContextBuilder};
    use near_sdk::{testing_env, VMContext};

    fn get_context(predecessor: AccountId, deposit: NearToken) -> VMContext {
        VMContextBuilder::new()
            .current_account_id("lottery.near".parse().unwrap())
            .predecessor_account_id(predecessor.clone())
            .signer_account_id(predecessor)
            .account_balance(NearToken::from_near(100))
            .attached_deposit(deposit)
            .random_seed([7u8; 32])
            .build()
    }

    fn entry() -> NearToken {
        NearToken::from_millinear(10)
    }

    #[test]
    fn test_minimum_contribution_is_one_hundredth_near() {
        assert_eq!(MIN_CONTRIBUTION, entry().as_yoctonear());
    }

    #[test]
    fn test_deployer_is_manager() {
        testing_env!(get_context(accounts(0), NearToken::from_yoctonear(0)));

        let contract = LotteryContract::new();
        assert_eq!(contract.manager(), accounts(0));
        assert!(contract.get_players().is_empty());
        assert_eq!(contract.get_pot(), U128(0));
    }

    #[test]
    fn test_enter() {
        testing_env!(get_context(accounts(0), NearToken::from_yoctonear(0)));
        let mut contract = LotteryContract::new();

        testing_env!(get_context(accounts(1), entry()));
        contract.enter().unwrap();

        assert_eq!(contract.get_players(), vec![accounts(1)]);
        assert_eq!(contract.get_player_count(), 1);
        assert_eq!(contract.get_pot(), U128(MIN_CONTRIBUTION));
        assert_eq!(
            get_logs(),
            vec![format!(
                "Lottery: {} entered with {} yoctoNEAR (1 entries)",
                accounts(1),
                MIN_CONTRIBUTION
            )]
        );
    }

    #[test]
    fn test_enter_without_deposit_is_rejected() {
        testing_env!(get_context(accounts(0), NearToken::from_yoctonear(0)));
        let mut contract = LotteryContract::new();

        let err = contract.enter().unwrap_err();
        assert!(matches!(err, LotteryError::InsufficientContribution { attached: 0, .. }));
        assert!(contract.get_players().is_empty());
    }

    #[test]
    fn test_only_manager_picks_winner() {
        testing_env!(get_context(accounts(0), NearToken::from_yoctonear(0)));
        let mut contract = LotteryContract::new();

        testing_env!(get_context(accounts(1), entry()));
        contract.enter().unwrap();

        testing_env!(get_context(accounts(1), NearToken::from_yoctonear(0)));
        let err = contract.pick_winner().unwrap_err();

        assert_eq!(err, LotteryError::Unauthorized { caller: accounts(1) });
        assert_eq!(contract.get_players(), vec![accounts(1)]);
        assert_eq!(contract.get_pot(), U128(MIN_CONTRIBUTION));
    }

    #[test]
    fn test_pick_winner_resets_round() {
        testing_env!(get_context(accounts(0), NearToken::from_yoctonear(0)));
        let mut contract = LotteryContract::new();

        for i in 1..4 {
            testing_env!(get_context(accounts(i), entry()));
            contract.enter().unwrap();
        }

        testing_env!(get_context(accounts(0), NearToken::from_yoctonear(0)));
        let winner = contract.pick_winner().unwrap();

        // seed starts with 7u8 bytes, so the draw is deterministic
        let expected = winner_index(&[7u8; 32], 3);
        assert_eq!(winner, accounts(expected + 1));
        assert!(contract.get_players().is_empty());
        assert_eq!(contract.get_pot(), U128(0));
        assert_eq!(contract.manager(), accounts(0));
    }
}
