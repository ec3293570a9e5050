use bigdecimal::BigDecimal;

use crate::repository::BidRejection;

/// Decimal places a stored amount keeps (`NUMERIC(12, 2)`).
pub const AMOUNT_SCALE: i64 = 2;

/// Digits a stored amount keeps before the decimal point.
pub const AMOUNT_INTEGER_DIGITS: u32 = 10;

/// Amounts must be representable exactly by the bids column, so the value
/// compared here is the value that gets stored.
pub fn check_amount_precision(amount: &BigDecimal) -> Result<(), BidRejection> {
    let (_, scale) = amount.normalized().as_bigint_and_exponent();
    if scale > AMOUNT_SCALE {
        return Err(BidRejection::InvalidAmount);
    }

    let limit = BigDecimal::from(10u64.pow(AMOUNT_INTEGER_DIGITS));
    if amount.abs() >= limit {
        return Err(BidRejection::InvalidAmount);
    }

    Ok(())
}

/// Validity rule applied by the data stores when saving a bid.
///
/// The first bid on an auction may match the starting price; every later bid
/// must strictly exceed the current high bid.
pub fn check_bid_amount(
    amount: &BigDecimal,
    starting_price: &BigDecimal,
    high_bid: Option<&BigDecimal>,
) -> Result<(), BidRejection> {
    if *amount <= BigDecimal::from(0) {
        return Err(BidRejection::NotPositive);
    }

    check_amount_precision(amount)?;

    match high_bid {
        Some(high) if amount <= high => Err(BidRejection::NotAboveHighBid),
        Some(_) => Ok(()),
        None if amount < starting_price => Err(BidRejection::BelowStartingPrice),
        None => Ok(()),
    }
}
