use soroban_sdk::{contracttype, Env, Vec};

/// A fixed-term deposit plan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    /// Lock duration in days.
    pub time: u64,
    /// Yearly rate in basis points of `PERCENT_DIVIDER`.
    pub percent: u32,
}

/// Plans installed at initialization, indexed by plan id.
pub static PLAN_TABLE: [Plan; 3] = [
    Plan {
        time: 30,
        percent: 1_000,
    },
    Plan {
        time: 60,
        percent: 1_500,
    },
    Plan {
        time: 90,
        percent: 2_000,
    },
];

pub fn default_plans(env: &Env) -> Vec<Plan> {
    let mut plans = Vec::new(env);
    for plan in PLAN_TABLE.iter() {
        plans.push_back(plan.clone());
    }
    plans
}
