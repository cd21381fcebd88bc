//! Market module transaction messages

use market_types::{Coin, Denom};
use serde::{Deserialize, Serialize};

use crate::errors::MsgError;
use crate::module::ROUTER_KEY;

/// Swap `offer_coin` into `ask_denom` for the trader's own account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSwap {
    pub trader: String,
    pub offer_coin: Coin,
    pub ask_denom: Denom,
}

impl MsgSwap {
    pub fn new(trader: impl Into<String>, offer_coin: Coin, ask_denom: Denom) -> Self {
        Self {
            trader: trader.into(),
            offer_coin,
            ask_denom,
        }
    }

    pub fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    pub fn validate_basic(&self) -> Result<(), MsgError> {
        if self.trader.trim().is_empty() {
            return Err(MsgError::EmptyAddress("trader"));
        }
        validate_offer(&self.offer_coin, &self.ask_denom)
    }
}

/// Swap and deliver the proceeds to another account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSwapSend {
    pub from_address: String,
    pub to_address: String,
    pub offer_coin: Coin,
    pub ask_denom: Denom,
}

impl MsgSwapSend {
    pub fn new(
        from_address: impl Into<String>,
        to_address: impl Into<String>,
        offer_coin: Coin,
        ask_denom: Denom,
    ) -> Self {
        Self {
            from_address: from_address.into(),
            to_address: to_address.into(),
            offer_coin,
            ask_denom,
        }
    }

    pub fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    pub fn validate_basic(&self) -> Result<(), MsgError> {
        if self.from_address.trim().is_empty() {
            return Err(MsgError::EmptyAddress("from"));
        }
        if self.to_address.trim().is_empty() {
            return Err(MsgError::EmptyAddress("to"));
        }
        validate_offer(&self.offer_coin, &self.ask_denom)
    }
}

fn validate_offer(offer: &Coin, ask_denom: &Denom) -> Result<(), MsgError> {
    if !offer.is_positive() {
        return Err(MsgError::NonPositiveOffer(offer.clone()));
    }
    if &offer.denom == ask_denom {
        return Err(MsgError::RecursiveSwap(ask_denom.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_types::{MICRO_LUNA_DENOM, MICRO_USD_DENOM};

    fn luna(amount: u128) -> Coin {
        Coin::new(Denom::from_static(MICRO_LUNA_DENOM), amount)
    }

    #[test]
    fn test_msg_swap_validate_basic() {
        let usd = Denom::from_static(MICRO_USD_DENOM);
        assert!(MsgSwap::new("trader1", luna(10), usd.clone()).validate_basic().is_ok());
        assert_eq!(
            MsgSwap::new("", luna(10), usd.clone()).validate_basic(),
            Err(MsgError::EmptyAddress("trader"))
        );
        assert_eq!(
            MsgSwap::new("trader1", luna(0), usd).validate_basic(),
            Err(MsgError::NonPositiveOffer(luna(0)))
        );
        assert_eq!(
            MsgSwap::new("trader1", luna(5), Denom::from_static(MICRO_LUNA_DENOM))
                .validate_basic(),
            Err(MsgError::RecursiveSwap(Denom::from_static(MICRO_LUNA_DENOM)))
        );
    }

    #[test]
    fn test_msg_swap_send_validate_basic() {
        let usd = Denom::from_static(MICRO_USD_DENOM);
        let msg = MsgSwapSend::new("from1", "to1", luna(1), usd.clone());
        assert!(msg.validate_basic().is_ok());
        assert_eq!(msg.route(), "market");
        assert_eq!(
            MsgSwapSend::new("from1", " ", luna(1), usd).validate_basic(),
            Err(MsgError::EmptyAddress("to"))
        );
    }
}
