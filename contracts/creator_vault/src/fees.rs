use crate::storage::BASIS_POINTS;

/// A payment divided between the platform and the creator
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaymentSplit {
    pub platform_fee: i128,
    pub creator_share: i128,
}

/// Split a payment by the platform fee rate
///
/// Formula: fee = amount × fee_rate_bps / 10,000 (rounded down),
/// creator_share = amount - fee
///
/// Example:
/// - amount: 5.000000 (6 decimals)
/// - fee_rate: 2.5% (250 basis points)
/// - fee: 0.125000, creator_share: 4.875000
pub fn split_payment(amount: i128, fee_rate_bps: u32) -> Option<PaymentSplit> {
    let platform_fee = amount
        .checked_mul(fee_rate_bps as i128)?
        .checked_div(BASIS_POINTS)?;
    let creator_share = amount.checked_sub(platform_fee)?;

    Some(PaymentSplit {
        platform_fee,
        creator_share,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: i128 = 1_000_000; // 6 decimals

    #[test]
    fn test_default_fee() {
        let split = split_payment(5 * UNIT, 250).unwrap();

        assert_eq!(split.platform_fee, 125_000);
        assert_eq!(split.creator_share, 4_875_000);
    }

    #[test]
    fn test_fee_rounds_down() {
        // 0.25% of 399 = 0.9975
        let split = split_payment(399, 25).unwrap();

        assert_eq!(split.platform_fee, 0);
        assert_eq!(split.creator_share, 399);
    }

    #[test]
    fn test_parts_sum_to_amount() {
        for amount in [1i128, 7, 333, 10_001, 5 * UNIT, 123_456_789] {
            for rate in [0u32, 1, 250, 999, 1000] {
                let split = split_payment(amount, rate).unwrap();
                assert_eq!(split.platform_fee + split.creator_share, amount);
                assert_eq!(split.platform_fee, amount * rate as i128 / BASIS_POINTS);
            }
        }
    }

    #[test]
    fn test_zero_fee() {
        let split = split_payment(10 * UNIT, 0).unwrap();

        assert_eq!(split.platform_fee, 0);
        assert_eq!(split.creator_share, 10 * UNIT);
    }

    #[test]
    fn test_overflow() {
        assert!(split_payment(i128::MAX, 250).is_none());
    }
}
