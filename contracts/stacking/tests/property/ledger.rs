#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the deployed contract.
//!
//! Invariants tested:
//! - Deposits below 0.001 tokens are always rejected
//! - Deposits on a plan id outside 0..=2 are always rejected
//! - A deposit can be withdrawn exactly once
//! - `withdraw_tokens` succeeds iff `amount <= admin_tokens` and decrements by `amount`
//! - Contract balance always equals `total_stacked + admin_tokens`

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use stacking::{ContractError, StackingContract, StackingContractClient};

const ONE_TOKEN: i128 = 10_000_000;
const ONE_DAY: u64 = 86_400;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, StackingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let contract_id = env.register(StackingContract, ());
    let client = StackingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token.address());
    StellarAssetClient::new(&env, &token.address()).mint(&owner, &(1_000 * ONE_TOKEN));

    (env, client, owner)
}

fn expect_error<T: core::fmt::Debug, C: core::fmt::Debug, I: core::fmt::Debug>(
    result: Result<Result<T, C>, Result<ContractError, I>>,
) -> ContractError {
    match result {
        Err(Ok(e)) => e,
        other => panic!("expected contract error, got {:?}", other),
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_below_minimum_always_rejected(amount in -ONE_TOKEN..(ONE_TOKEN / 1_000), plan in 0u32..3) {
        let (_env, client, owner) = setup();
        let err = expect_error(client.try_deposit_tokens(&owner, &plan, &amount));
        prop_assert_eq!(err, ContractError::BelowMinimumDeposit);
        prop_assert_eq!(client.total_stacked(), 0);
    }

    #[test]
    fn prop_invalid_plan_always_rejected(plan in 3u32..u32::MAX, amount in (ONE_TOKEN / 1_000)..ONE_TOKEN) {
        let (_env, client, owner) = setup();
        let err = expect_error(client.try_deposit_tokens(&owner, &plan, &amount));
        prop_assert_eq!(err, ContractError::InvalidPlan);
    }

    #[test]
    fn prop_withdraw_exactly_once(plan in 0u32..3, days in 0u64..120) {
        let (env, client, owner) = setup();
        client.add_tokens(&owner, &(10 * ONE_TOKEN));
        client.deposit_tokens(&owner, &plan, &(10 * ONE_TOKEN));

        env.ledger().set_timestamp(days * ONE_DAY);
        client.withdraw(&owner, &0);

        let err = expect_error(client.try_withdraw(&owner, &0));
        prop_assert_eq!(err, ContractError::DepositAlreadyTaken);
    }

    #[test]
    fn prop_withdraw_tokens_guard(pool in 0i128..(100 * ONE_TOKEN), request in 0i128..(200 * ONE_TOKEN)) {
        let (_env, client, owner) = setup();
        client.add_tokens(&owner, &pool);
        prop_assert_eq!(client.admin_tokens(), pool);

        let result = client.try_withdraw_tokens(&owner, &request);
        if request <= pool {
            prop_assert!(result.is_ok());
            prop_assert_eq!(client.admin_tokens(), pool - request);
        } else {
            prop_assert_eq!(expect_error(result), ContractError::ExceedsAdminTokens);
            prop_assert_eq!(client.admin_tokens(), pool);
        }
    }

    #[test]
    fn prop_balance_splits_into_principal_and_pool(
        deposits in proptest::collection::vec((0u32..3, 1i128..(20 * ONE_TOKEN), 0u64..100), 1..6),
        reward in 0i128..(10 * ONE_TOKEN),
    ) {
        let (env, client, owner) = setup();
        client.add_tokens(&owner, &reward);

        let mut now = 0u64;
        for (i, (plan, amount, days)) in deposits.iter().enumerate() {
            let amount = (*amount).max(ONE_TOKEN / 1_000);
            client.deposit_tokens(&owner, plan, &amount);
            now += days * ONE_DAY;
            env.ledger().set_timestamp(now);
            // Closing may fail for lack of rewards; state must stay consistent either way.
            let _ = client.try_withdraw(&owner, &(i as u32));

            prop_assert_eq!(
                client.get_contract_balance(),
                client.total_stacked() + client.admin_tokens()
            );
        }
    }
}
