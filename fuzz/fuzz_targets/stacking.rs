#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use stacking::{StackingContract, StackingContractClient};

const FUNDING: i128 = 1_000_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { plan: u8, amount: u64 },
    Withdraw { deposit_id: u8 },
    AddTokens { amount: u64 },
    WithdrawTokens { amount: u64 },
    Advance { hours: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StackingContract, ());
    let client = StackingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token);

    let mut users = vec![owner.clone()];
    for _ in 0..3 {
        users.push(Address::generate(&env));
    }
    let minter = StellarAssetClient::new(&env, &token);
    for user in &users {
        minter.mint(user, &FUNDING);
    }

    let mut now = 0u64;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { plan, amount } => {
                let _ = client.try_deposit_tokens(caller, &u32::from(plan), &i128::from(amount));
            }
            FuzzAction::Withdraw { deposit_id } => {
                let _ = client.try_withdraw(caller, &u32::from(deposit_id));
            }
            FuzzAction::AddTokens { amount } => {
                let _ = client.try_add_tokens(caller, &i128::from(amount));
            }
            FuzzAction::WithdrawTokens { amount } => {
                let _ = client.try_withdraw_tokens(&owner, &i128::from(amount));
            }
            FuzzAction::Advance { hours } => {
                now = now.saturating_add(u64::from(hours) * 3_600);
                env.ledger().set_timestamp(now);
            }
        }

        // Reserve is always principal plus reward pool.
        assert_eq!(
            client.get_contract_balance(),
            client.total_stacked() + client.admin_tokens()
        );
        assert!(client.admin_tokens() >= 0);
    }
});
