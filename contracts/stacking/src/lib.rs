#![no_std]

pub mod dividends;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod plans;

use errors::reject;
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Symbol, Vec};

pub use dividends::Settlement;
pub use errors::ContractError;
pub use ledger::{Deposit, DepositInfo, User, UserInfo};
pub use plans::Plan;

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const PLANS: Symbol = symbol_short!("PLANS");
const MIN_AMOUNT: Symbol = symbol_short!("MIN_AMT");
const TOTAL_STACKED: Symbol = symbol_short!("TOT_STK");
const ADMIN_TOKENS: Symbol = symbol_short!("ADM_TOK");

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StackingContract;

#[contractimpl]
impl StackingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner` – account allowed to drain the admin pool and manage ownership.
    /// * `token_id` – token both deposited and paid out as dividends.
    ///
    /// The minimum deposit is derived from the token's decimals.
    pub fn initialize(env: Env, owner: Address, token_id: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(reject(&env, ContractError::AlreadyInitialized));
        }

        let decimals = token::Client::new(&env, &token_id).decimals();
        let min_amount = dividends::min_amount_for_decimals(decimals)?;

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token_id);
        env.storage().instance().set(&MIN_AMOUNT, &min_amount);
        env.storage()
            .instance()
            .set(&PLANS, &plans::default_plans(&env));
        // TOTAL_STACKED and ADMIN_TOKENS start at zero; unwrap_or(0) covers
        // the absent keys.
        ledger::extend_instance_ttl(&env);

        events::publish_initialized(&env, owner.clone(), token_id, min_amount);
        events::publish_ownership_transferred(&env, None, Some(owner));

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Lock `amount` tokens on `plan` and return the new deposit id.
    ///
    /// The plan percent is snapshotted into the deposit.
    pub fn deposit_tokens(
        env: Env,
        user: Address,
        plan: u32,
        amount: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let plan_info = Self::load_plan(&env, plan)?;
        if amount < Self::min_amount(env.clone()) {
            return Err(reject(&env, ContractError::BelowMinimumDeposit));
        }

        let now = env.ledger().timestamp();
        let finish = dividends::finish_time(now, plan_info.time)?;

        let (mut record, is_newbie) = match ledger::load_user(&env, &user) {
            Some(record) => (record, false),
            None => (User::new(now), true),
        };
        let deposit_id = record.deposits;
        record.deposits = deposit_id
            .checked_add(1)
            .ok_or(ContractError::MathOverflow)?;
        record.total_deposited = record
            .total_deposited
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let new_total = Self::total_stacked(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;

        // Pull tokens from the depositor into the contract.
        Self::token_client(&env)?.transfer(&user, &env.current_contract_address(), &amount);

        let deposit = Deposit {
            plan,
            percent: plan_info.percent,
            amount,
            start: now,
            finish,
            is_taken: false,
        };
        ledger::store_deposit(&env, &user, deposit_id, &deposit);
        ledger::store_user(&env, &user, &record);
        env.storage().instance().set(&TOTAL_STACKED, &new_total);
        ledger::extend_instance_ttl(&env);

        if is_newbie {
            events::publish_newbie(&env, user.clone());
        }
        events::publish_new_deposit(&env, user, plan, amount, deposit_id);

        Ok(deposit_id)
    }

    /// Close a deposit and return the amount paid out.
    ///
    /// At or after `finish` the depositor gets principal plus dividends, the
    /// dividends coming out of the admin pool. Before `finish` the dividends
    /// are forfeited and the early-withdraw penalty moves into the admin pool.
    pub fn withdraw(env: Env, user: Address, deposit_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let mut record = ledger::load_user(&env, &user)
            .ok_or_else(|| reject(&env, ContractError::InvalidDepositId))?;
        let mut deposit = ledger::load_deposit(&env, &user, deposit_id)
            .ok_or_else(|| reject(&env, ContractError::InvalidDepositId))?;
        if deposit.is_taken {
            return Err(reject(&env, ContractError::DepositAlreadyTaken));
        }

        let now = env.ledger().timestamp();
        let settlement = dividends::settle(
            deposit.amount,
            deposit.percent,
            deposit.start,
            deposit.finish,
            now,
        )?;

        let admin_tokens = Self::admin_tokens(env.clone());
        if admin_tokens < settlement.dividends {
            return Err(reject(&env, ContractError::InsufficientRewards));
        }
        let new_admin_tokens = admin_tokens
            .checked_sub(settlement.dividends)
            .and_then(|pool| pool.checked_add(settlement.penalty))
            .ok_or(ContractError::MathOverflow)?;
        let new_total = Self::total_stacked(env.clone())
            .checked_sub(deposit.amount)
            .ok_or(ContractError::MathOverflow)?;
        record.withdrawn = record
            .withdrawn
            .checked_add(settlement.payout)
            .ok_or(ContractError::MathOverflow)?;
        record.checkpoint = now;

        // Latch before transfer (checks-effects-interactions).
        deposit.is_taken = true;
        ledger::store_deposit(&env, &user, deposit_id, &deposit);
        ledger::store_user(&env, &user, &record);
        env.storage().instance().set(&TOTAL_STACKED, &new_total);
        env.storage().instance().set(&ADMIN_TOKENS, &new_admin_tokens);
        ledger::extend_instance_ttl(&env);

        if settlement.is_early() {
            log!(&env, "stacking: early withdrawal penalty {}", settlement.penalty);
        }

        Self::token_client(&env)?.transfer(
            &env.current_contract_address(),
            &user,
            &settlement.payout,
        );

        events::publish_withdrawn(
            &env,
            user,
            deposit_id,
            settlement.payout,
            settlement.penalty,
        );

        Ok(settlement.payout)
    }

    // ── Admin pool ──────────────────────────────────────────────────────────

    /// Fund the dividend pool. Open to any account; zero is a no-op.
    pub fn add_tokens(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount < 0 {
            return Err(reject(&env, ContractError::InvalidAmount));
        }

        let new_admin_tokens = Self::admin_tokens(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;

        Self::token_client(&env)?.transfer(&from, &env.current_contract_address(), &amount);

        env.storage().instance().set(&ADMIN_TOKENS, &new_admin_tokens);
        ledger::extend_instance_ttl(&env);

        events::publish_tokens_added(&env, from, amount, new_admin_tokens);

        Ok(())
    }

    /// Drain up to `admin_tokens` from the pool back to the owner.
    pub fn withdraw_tokens(env: Env, owner: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;

        if amount < 0 {
            return Err(reject(&env, ContractError::InvalidAmount));
        }

        let admin_tokens = Self::admin_tokens(env.clone());
        if amount > admin_tokens {
            return Err(reject(&env, ContractError::ExceedsAdminTokens));
        }
        let new_admin_tokens = admin_tokens - amount;

        env.storage().instance().set(&ADMIN_TOKENS, &new_admin_tokens);
        ledger::extend_instance_ttl(&env);

        Self::token_client(&env)?.transfer(&env.current_contract_address(), &owner, &amount);

        events::publish_tokens_withdrawn(&env, owner, amount, new_admin_tokens);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_plan_info(env: Env, plan: u32) -> Result<Plan, ContractError> {
        Self::load_plan(&env, plan)
    }

    /// Same lookup as `get_plan_info`, kept under the storage-getter name.
    pub fn plans(env: Env, id: u32) -> Result<Plan, ContractError> {
        Self::load_plan(&env, id)
    }

    pub fn get_user_deposit_info(
        env: Env,
        user: Address,
        deposit_id: u32,
    ) -> Result<DepositInfo, ContractError> {
        ledger::load_deposit(&env, &user, deposit_id)
            .map(DepositInfo::from)
            .ok_or_else(|| reject(&env, ContractError::InvalidDepositId))
    }

    /// Dividends accrued by a deposit at the current ledger time.
    ///
    /// Accrual is linear over a 365-day year and stops at `finish`. A taken
    /// deposit reads zero.
    pub fn get_user_dividends(
        env: Env,
        user: Address,
        deposit_id: u32,
    ) -> Result<i128, ContractError> {
        let deposit = ledger::load_deposit(&env, &user, deposit_id)
            .ok_or_else(|| reject(&env, ContractError::InvalidDepositId))?;
        let elapsed = dividends::accrual_elapsed(
            deposit.start,
            deposit.finish,
            env.ledger().timestamp(),
            deposit.is_taken,
        );
        dividends::compute_dividends(deposit.amount, deposit.percent, elapsed)
    }

    /// Sum of every deposit the user has ever made, taken or not.
    pub fn get_user_total_deposits(env: Env, user: Address) -> i128 {
        ledger::load_user(&env, &user)
            .map(|record| record.total_deposited)
            .unwrap_or(0)
    }

    pub fn get_user_amount_of_deposits(env: Env, user: Address) -> u32 {
        ledger::load_user(&env, &user)
            .map(|record| record.deposits)
            .unwrap_or(0)
    }

    /// Token balance held by the contract: principal plus the admin pool.
    pub fn get_contract_balance(env: Env) -> Result<i128, ContractError> {
        Ok(Self::token_client(&env)?.balance(&env.current_contract_address()))
    }

    pub fn total_stacked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STACKED).unwrap_or(0)
    }

    pub fn admin_tokens(env: Env) -> i128 {
        env.storage().instance().get(&ADMIN_TOKENS).unwrap_or(0)
    }

    /// Checkpoint, seed income and withdrawn total; zeroed for unknown users.
    pub fn users(env: Env, user: Address) -> UserInfo {
        ledger::load_user(&env, &user)
            .map(|record| record.info())
            .unwrap_or(UserInfo {
                checkpoint: 0,
                seed_income: 0,
                withdrawn: 0,
            })
    }

    pub fn token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or_else(|| reject(&env, ContractError::NotInitialized))
    }

    pub fn owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&OWNER)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn min_amount(env: Env) -> i128 {
        env.storage().instance().get(&MIN_AMOUNT).unwrap_or(0)
    }

    pub fn time_step(_env: Env) -> u64 {
        dividends::TIME_STEP
    }

    pub fn percent_divider(_env: Env) -> i128 {
        dividends::PERCENT_DIVIDER
    }

    pub fn one_year(_env: Env) -> u64 {
        dividends::ONE_YEAR
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    /// Hand ownership to `new_owner`. Only the current owner can call this.
    pub fn transfer_ownership(
        env: Env,
        owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;

        env.storage().instance().set(&OWNER, &new_owner);

        events::publish_ownership_transferred(&env, Some(owner), Some(new_owner));

        Ok(())
    }

    /// Leave the contract without an owner. Owner-only calls fail afterwards.
    pub fn renounce_ownership(env: Env, owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;

        env.storage().instance().remove(&OWNER);

        events::publish_ownership_transferred(&env, Some(owner), None);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(reject(env, ContractError::NotInitialized));
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Option<Address> = env.storage().instance().get(&OWNER);
        match owner {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(reject(env, ContractError::Unauthorized)),
        }
    }

    fn load_plan(env: &Env, plan: u32) -> Result<Plan, ContractError> {
        let plans: Vec<Plan> = env
            .storage()
            .instance()
            .get(&PLANS)
            .ok_or_else(|| reject(env, ContractError::NotInitialized))?;
        plans
            .get(plan)
            .ok_or_else(|| reject(env, ContractError::InvalidPlan))
    }

    fn token_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or_else(|| reject(env, ContractError::NotInitialized))?;
        Ok(token::Client::new(env, &token))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_events;
