use uuid::Uuid;

use crate::{Engine, Money, Profile, ResultEngine};

/// A balance compared against the threshold of a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceCheck {
    pub balance: Money,
    pub threshold: Money,
}

impl BalanceCheck {
    /// Strictly below: a balance equal to the threshold is not low.
    pub fn is_low(&self) -> bool {
        self.balance < self.threshold
    }
}

impl Engine {
    /// Compare the current balance of a user with the threshold of its
    /// profile.
    ///
    /// Without a profile there is no threshold to compare with, so `None` is
    /// returned without reading the ledger.
    pub async fn evaluate_balance(
        &self,
        user_id: Uuid,
        profile: Option<&Profile>,
    ) -> ResultEngine<Option<BalanceCheck>> {
        let Some(profile) = profile else {
            return Ok(None);
        };
        let balance = self.balance(user_id).await?.total();
        Ok(Some(BalanceCheck {
            balance,
            threshold: profile.low_balance_threshold,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_is_not_low() {
        let check = BalanceCheck {
            balance: Money::new(5000),
            threshold: Money::new(5000),
        };
        assert!(!check.is_low());
    }

    #[test]
    fn below_is_low() {
        let check = BalanceCheck {
            balance: Money::new(4999),
            threshold: Money::new(5000),
        };
        assert!(check.is_low());

        let negative = BalanceCheck {
            balance: Money::new(-100),
            threshold: Money::ZERO,
        };
        assert!(negative.is_low());
    }
}
