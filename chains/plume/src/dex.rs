//! CrocSwap adapter.
//!
//! Builds the `swap` call on the CrocSwap dex for "buy `qty` of token X paying
//! with token Y", the way the Croc SDK's `buy(..).with(..).swap()` does.

use crate::calls::{self, ContractCall};
use crate::constants;
use ethers::abi::Token;
use ethers::types::{Address, U256};
use rand::Rng;
use std::fmt;

/// Arguments of `CrocSwapDex.swap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub base: Address,
    pub quote: Address,
    pub pool_idx: u64,
    pub is_buy: bool,
    pub in_base_qty: bool,
    pub qty: u128,
    pub tip: u16,
    pub limit_price: u128,
    /// Floor on output for fixed-input swaps, ceiling on input for fixed-output swaps.
    pub min_out: u128,
    pub reserve_flags: u8,
}

impl SwapPlan {
    /// Receive exactly `qty` of `target`, paying at most `max_paid` of `paid_with`.
    pub fn buy(target: Address, paid_with: Address, qty: u128, max_paid: u128) -> Self {
        // Croc orders the pair by address; base is always the lower one
        let (base, quote) = if target < paid_with {
            (target, paid_with)
        } else {
            (paid_with, target)
        };
        let target_is_base = target == base;

        // `is_buy` means the user pays base and receives quote
        let is_buy = !target_is_base;
        let limit_price = if is_buy {
            constants::CROC_MAX_SQRT_PRICE
        } else {
            constants::CROC_MIN_SQRT_PRICE
        };

        Self {
            base,
            quote,
            pool_idx: constants::CROC_POOL_IDX,
            is_buy,
            in_base_qty: target_is_base,
            qty,
            tip: 0,
            limit_price,
            min_out: max_paid,
            reserve_flags: 0,
        }
    }

    pub fn to_call(&self, dex: Address) -> ContractCall {
        calls::with_signature(
            dex,
            constants::CROC_SWAP_SIGNATURE,
            &[
                Token::Address(self.base),
                Token::Address(self.quote),
                Token::Uint(U256::from(self.pool_idx)),
                Token::Bool(self.is_buy),
                Token::Bool(self.in_base_qty),
                Token::Uint(U256::from(self.qty)),
                Token::Uint(U256::from(self.tip)),
                Token::Uint(U256::from(self.limit_price)),
                Token::Uint(U256::from(self.min_out)),
                Token::Uint(U256::from(self.reserve_flags)),
            ],
        )
    }
}

/// Swap size in ten-thousandths of a token (18 decimals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAmount {
    ten_thousandths: u64,
}

impl SwapAmount {
    const WEI_PER_UNIT: u128 = 100_000_000_000_000; // 1e14

    pub fn from_ten_thousandths(ten_thousandths: u64) -> Self {
        Self { ten_thousandths }
    }

    /// Uniform in [0.0001, 0.0005), rounded to 4 decimals.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let raw: f64 = rng.gen_range(0.0001..0.0005);
        Self {
            ten_thousandths: (raw * 10_000.0).round() as u64,
        }
    }

    pub fn wei(&self) -> u128 {
        self.ten_thousandths as u128 * Self::WEI_PER_UNIT
    }
}

impl fmt::Display for SwapAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.ten_thousandths as f64 / 10_000.0)
    }
}
