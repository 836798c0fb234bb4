use soroban_sdk::{Env, Vec};

use crate::storage_types::{Error, PERCENTAGE_BASE};

/// Get current timestamp
pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// `value * percentage / 100`, rounded down.
pub fn calculate_percentage(value: i128, percentage: u32) -> Result<i128, Error> {
    value
        .checked_mul(percentage as i128)
        .map(|v| v / PERCENTAGE_BASE)
        .ok_or(Error::ArithmeticOverflow)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_sub(b).ok_or(Error::ArithmeticOverflow)
}

/// Total price of an order.
///
/// `quantities` must already be known to match `prices` in length.
pub fn order_value(prices: &Vec<i128>, quantities: &Vec<u32>) -> Result<i128, Error> {
    let mut total: i128 = 0;
    for (price, quantity) in prices.iter().zip(quantities.iter()) {
        let line = price
            .checked_mul(quantity as i128)
            .ok_or(Error::ArithmeticOverflow)?;
        total = checked_add(total, line)?;
    }
    Ok(total)
}

/// Element-wise sum of two quantity vectors of equal length.
pub fn add_quantities(env: &Env, a: &Vec<u32>, b: &Vec<u32>) -> Result<Vec<u32>, Error> {
    let mut sum = Vec::new(env);
    for (x, y) in a.iter().zip(b.iter()) {
        sum.push_back(x.checked_add(y).ok_or(Error::ArithmeticOverflow)?);
    }
    Ok(sum)
}
