use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// Per-user persistent storage uses tuple keys: (prefix, user) and
// (prefix, user, deposit_id).
const USER: Symbol = symbol_short!("USER");
const DEPOSIT: Symbol = symbol_short!("DEP");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// A single fixed-term deposit. Never deleted; `is_taken` latches on withdraw.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub plan: u32,
    /// Plan percent captured when the deposit was made.
    pub percent: u32,
    pub amount: i128,
    pub start: u64,
    pub finish: u64,
    pub is_taken: bool,
}

/// Stored per-user record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub checkpoint: u64,
    pub seed_income: i128,
    pub withdrawn: i128,
    /// Number of deposits ever made; also the next deposit id.
    pub deposits: u32,
    /// Sum of every deposit amount ever made.
    pub total_deposited: i128,
}

impl User {
    pub fn new(checkpoint: u64) -> Self {
        User {
            checkpoint,
            seed_income: 0,
            withdrawn: 0,
            deposits: 0,
            total_deposited: 0,
        }
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            checkpoint: self.checkpoint,
            seed_income: self.seed_income,
            withdrawn: self.withdrawn,
        }
    }
}

/// Public view returned by `users`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserInfo {
    pub checkpoint: u64,
    pub seed_income: i128,
    pub withdrawn: i128,
}

/// Public view returned by `get_user_deposit_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositInfo {
    pub plan: u32,
    pub percent: u32,
    pub amount: i128,
    pub start: u64,
    pub finish: u64,
}

impl From<Deposit> for DepositInfo {
    fn from(deposit: Deposit) -> Self {
        DepositInfo {
            plan: deposit.plan,
            percent: deposit.percent,
            amount: deposit.amount,
            start: deposit.start,
            finish: deposit.finish,
        }
    }
}

fn user_key(user: &Address) -> (Symbol, Address) {
    (USER, user.clone())
}

fn deposit_key(user: &Address, deposit_id: u32) -> (Symbol, Address, u32) {
    (DEPOSIT, user.clone(), deposit_id)
}

/// Keep instance storage (config, totals, plans) alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_user(env: &Env, user: &Address) -> Option<User> {
    let key = user_key(user);
    let record: Option<User> = env.storage().persistent().get(&key);
    if record.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    record
}

pub fn store_user(env: &Env, user: &Address, record: &User) {
    let key = user_key(user);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_deposit(env: &Env, user: &Address, deposit_id: u32) -> Option<Deposit> {
    let key = deposit_key(user, deposit_id);
    let deposit: Option<Deposit> = env.storage().persistent().get(&key);
    if deposit.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    deposit
}

pub fn store_deposit(env: &Env, user: &Address, deposit_id: u32, deposit: &Deposit) {
    let key = deposit_key(user, deposit_id);
    env.storage().persistent().set(&key, deposit);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
