#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub min_amount: i128,
    pub timestamp: u64,
}

/// Fired on every deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewDepositEvent {
    pub user: Address,
    pub plan: u32,
    pub amount: i128,
    pub deposit_id: u32,
    pub timestamp: u64,
}

/// Fired on a user's first-ever deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewbieEvent {
    pub user: Address,
    pub timestamp: u64,
}

/// Fired when a deposit is closed and paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub user: Address,
    pub deposit_id: u32,
    pub amount: i128,
    pub penalty: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Option<Address>,
    pub new_owner: Option<Address>,
    pub timestamp: u64,
}

/// Fired when reward liquidity enters or leaves the admin pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTokensEvent {
    pub account: Address,
    pub amount: i128,
    pub admin_tokens: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address, min_amount: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            min_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_new_deposit(env: &Env, user: Address, plan: u32, amount: i128, deposit_id: u32) {
    env.events().publish(
        (symbol_short!("NEW_DEP"), user.clone()),
        NewDepositEvent {
            user,
            plan,
            amount,
            deposit_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_newbie(env: &Env, user: Address) {
    env.events().publish(
        (symbol_short!("NEWBIE"),),
        NewbieEvent {
            user,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, user: Address, deposit_id: u32, amount: i128, penalty: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), user.clone()),
        WithdrawnEvent {
            user,
            deposit_id,
            amount,
            penalty,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(
    env: &Env,
    previous_owner: Option<Address>,
    new_owner: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("OWN_XFER"),),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_added(env: &Env, account: Address, amount: i128, admin_tokens: i128) {
    env.events().publish(
        (symbol_short!("TOK_ADD"), account.clone()),
        AdminTokensEvent {
            account,
            amount,
            admin_tokens,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tokens_withdrawn(env: &Env, account: Address, amount: i128, admin_tokens: i128) {
    env.events().publish(
        (symbol_short!("TOK_WDR"), account.clone()),
        AdminTokensEvent {
            account,
            amount,
            admin_tokens,
            timestamp: env.ledger().timestamp(),
        },
    );
}
