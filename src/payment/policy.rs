//! The policy for splitting each payment between the owner and the growth fund.

use serde::Serialize;

use crate::Error;

/// The tolerance used when checking that two shares make up a whole payment.
const SHARE_TOLERANCE: f64 = 1e-9;

/// How each payment is divided between the platform owner and the growth fund.
///
/// Construct custom policies with [PayoutPolicy::new], which checks that the
/// two shares add up to the whole payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutPolicy {
    owner_share: f64,
    growth_share: f64,
}

impl PayoutPolicy {
    /// The share of each payment paid out to the owner unless configured otherwise.
    pub const DEFAULT_OWNER_SHARE: f64 = 0.6;
    /// The share of each payment kept in the growth fund unless configured otherwise.
    pub const DEFAULT_GROWTH_SHARE: f64 = 0.4;

    /// Create a new policy from the owner's and the growth fund's shares.
    ///
    /// # Errors
    /// Returns [Error::InvalidPayoutPolicy] if either share is outside `[0, 1]`
    /// or the shares do not add up to one.
    pub fn new(owner_share: f64, growth_share: f64) -> Result<Self, Error> {
        let in_range = |share: f64| (0.0..=1.0).contains(&share);

        if !in_range(owner_share)
            || !in_range(growth_share)
            || (owner_share + growth_share - 1.0).abs() > SHARE_TOLERANCE
        {
            return Err(Error::InvalidPayoutPolicy {
                owner_share,
                growth_share,
            });
        }

        Ok(Self {
            owner_share,
            growth_share,
        })
    }

    /// The share of each payment paid out to the owner.
    pub fn owner_share(&self) -> f64 {
        self.owner_share
    }

    /// The share of each payment kept in the growth fund.
    pub fn growth_share(&self) -> f64 {
        self.growth_share
    }

    /// Divide `amount` between the owner and the growth fund.
    pub fn split(&self, amount: f64) -> PaymentSplit {
        PaymentSplit {
            owner_payout: amount * self.owner_share,
            growth_fund: amount * self.growth_share,
        }
    }
}

impl Default for PayoutPolicy {
    fn default() -> Self {
        Self {
            owner_share: Self::DEFAULT_OWNER_SHARE,
            growth_share: Self::DEFAULT_GROWTH_SHARE,
        }
    }
}

/// The result of applying a [PayoutPolicy] to a payment amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSplit {
    /// The part of the payment paid out to the owner.
    pub owner_payout: f64,
    /// The part of the payment kept in the growth fund.
    pub growth_fund: f64,
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::PayoutPolicy;

    #[test]
    fn default_policy_splits_sixty_forty() {
        let split = PayoutPolicy::default().split(1000.0);

        assert_eq!(split.owner_payout, 600.0);
        assert_eq!(split.growth_fund, 400.0);
    }

    #[test]
    fn split_uses_exact_policy_products() {
        let policy = PayoutPolicy::default();

        for amount in [0.0, 0.01, 1.0, 19.99, 299.0, 499.0, 12345.678, 1e12] {
            let split = policy.split(amount);

            assert_eq!(split.owner_payout, amount * 0.6);
            assert_eq!(split.growth_fund, amount * 0.4);
        }
    }

    #[test]
    fn split_adds_up_to_amount() {
        let policy = PayoutPolicy::default();

        for amount in [0.0, 0.01, 0.1, 3.0, 19.99, 299.0, 12345.678, 987654321.123] {
            let split = policy.split(amount);
            let total = split.owner_payout + split.growth_fund;

            assert!(
                (total - amount).abs() <= 1e-9 * amount.max(1.0),
                "split of {amount} adds up to {total}"
            );
        }
    }

    #[test]
    fn custom_policy_is_used() {
        let policy = PayoutPolicy::new(0.7, 0.3).unwrap();

        let split = policy.split(100.0);

        assert_eq!(split.owner_payout, 100.0 * 0.7);
        assert_eq!(split.growth_fund, 100.0 * 0.3);
    }

    #[test]
    fn rejects_shares_that_do_not_add_up_to_one() {
        assert_eq!(
            PayoutPolicy::new(0.6, 0.6),
            Err(Error::InvalidPayoutPolicy {
                owner_share: 0.6,
                growth_share: 0.6
            })
        );
    }

    #[test]
    fn rejects_shares_outside_unit_range() {
        assert!(PayoutPolicy::new(1.5, -0.5).is_err());
        assert!(PayoutPolicy::new(f64::NAN, 0.4).is_err());
    }

    #[test]
    fn accepts_all_to_one_side() {
        assert!(PayoutPolicy::new(1.0, 0.0).is_ok());
        assert!(PayoutPolicy::new(0.0, 1.0).is_ok());
    }
}
