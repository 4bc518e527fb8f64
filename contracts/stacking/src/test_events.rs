#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, IntoVal, Val, Vec,
};

use crate::events::{NewDepositEvent, NewbieEvent, OwnershipTransferredEvent, WithdrawnEvent};
use crate::{StackingContract, StackingContractClient};

const ONE_TOKEN: i128 = 10_000_000;
const ONE_DAY: u64 = 86_400;
const START: u64 = 1_700_000_000;

fn setup() -> (Env, StackingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let contract_id = env.register(StackingContract, ());
    let client = StackingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token.address());
    StellarAssetClient::new(&env, &token.address()).mint(&owner, &(100 * ONE_TOKEN));

    (env, client, owner)
}

fn contract_event<T: IntoVal<Env, Val>>(
    env: &Env,
    contract: &Address,
    topics: Vec<Val>,
    data: T,
) -> (Address, Vec<Val>, Val) {
    (contract.clone(), topics, data.into_val(env))
}

#[test]
fn test_first_deposit_emits_newbie_then_new_deposit() {
    let (env, client, owner) = setup();

    client.deposit_tokens(&owner, &0, &ONE_TOKEN);

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            contract_event(
                &env,
                &client.address,
                (symbol_short!("NEWBIE"),).into_val(&env),
                NewbieEvent {
                    user: owner.clone(),
                    timestamp: START,
                },
            ),
            contract_event(
                &env,
                &client.address,
                (symbol_short!("NEW_DEP"), owner.clone()).into_val(&env),
                NewDepositEvent {
                    user: owner.clone(),
                    plan: 0,
                    amount: ONE_TOKEN,
                    deposit_id: 0,
                    timestamp: START,
                },
            ),
        ]
    );
}

#[test]
fn test_repeat_deposit_emits_only_new_deposit() {
    let (env, client, owner) = setup();
    client.deposit_tokens(&owner, &0, &ONE_TOKEN);

    env.ledger().set_timestamp(START + ONE_DAY);
    client.deposit_tokens(&owner, &2, &(2 * ONE_TOKEN));

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            contract_event(
                &env,
                &client.address,
                (symbol_short!("NEW_DEP"), owner.clone()).into_val(&env),
                NewDepositEvent {
                    user: owner.clone(),
                    plan: 2,
                    amount: 2 * ONE_TOKEN,
                    deposit_id: 1,
                    timestamp: START + ONE_DAY,
                },
            ),
        ]
    );
}

#[test]
fn test_withdraw_emits_payout_and_penalty() {
    let (env, client, owner) = setup();
    let amount = 10 * ONE_TOKEN;
    client.deposit_tokens(&owner, &0, &amount);

    env.ledger().set_timestamp(START + 10 * ONE_DAY);
    let payout = client.withdraw(&owner, &0);
    let penalty = 3 * ONE_TOKEN / 10;
    assert_eq!(payout, amount - penalty);

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            contract_event(
                &env,
                &client.address,
                (symbol_short!("WITHDRAWN"), owner.clone()).into_val(&env),
                WithdrawnEvent {
                    user: owner.clone(),
                    deposit_id: 0,
                    amount: payout,
                    penalty,
                    timestamp: START + 10 * ONE_DAY,
                },
            ),
        ]
    );
}

#[test]
fn test_transfer_ownership_emits_own_xfer() {
    let (env, client, owner) = setup();
    let new_owner = Address::generate(&env);

    client.transfer_ownership(&owner, &new_owner);

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            contract_event(
                &env,
                &client.address,
                (symbol_short!("OWN_XFER"),).into_val(&env),
                OwnershipTransferredEvent {
                    previous_owner: Some(owner.clone()),
                    new_owner: Some(new_owner.clone()),
                    timestamp: START,
                },
            ),
        ]
    );
}

#[test]
fn test_rejected_deposit_emits_nothing() {
    let (env, client, owner) = setup();

    assert!(client.try_deposit_tokens(&owner, &7, &ONE_TOKEN).is_err());
    assert!(env
        .events()
        .all()
        .filter_by_contract(&client.address)
        .events()
        .is_empty());
}
