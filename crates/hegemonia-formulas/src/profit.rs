//! Profit-rate decay (TRPF) and value-composition formulas.

/// Tendential fall of the extraction multiplier over time.
///
/// `max(floor, 1 - coefficient * tick)`: a linear decay of extraction
/// efficiency that never drops below its floor and never increases with
/// the tick counter.
pub fn trpf_multiplier(tick: u64, coefficient: f64, floor: f64) -> f64 {
    (1.0 - coefficient * tick as f64).max(floor)
}

/// Per-tick decay of the imperial rent pool.
///
/// `max(0, pool * (1 - rate))`. A non-positive rate means no decay (the
/// pool is never grown by this formula); a rate of 1 or more drains the
/// pool entirely.
pub fn rent_pool_decay(pool: f64, rate: f64) -> f64 {
    if rate <= 0.0 {
        return pool.max(0.0);
    }
    (pool * (1.0 - rate)).max(0.0)
}

/// Rate of profit `s / (c + v)`: surplus value over total capital
/// advanced. Zero when no capital is advanced.
pub fn rate_of_profit(surplus_value: f64, constant_capital: f64, variable_capital: f64) -> f64 {
    let total = constant_capital + variable_capital;
    if total <= 0.0 { 0.0 } else { surplus_value / total }
}

/// Organic composition of capital `c / v`. Zero when no variable
/// capital is employed.
pub fn organic_composition(constant_capital: f64, variable_capital: f64) -> f64 {
    if variable_capital <= 0.0 {
        0.0
    } else {
        constant_capital / variable_capital
    }
}
