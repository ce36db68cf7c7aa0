//! Fixed Plume testnet addresses, endpoints and loop timings.

use std::time::Duration;

pub const CHAIN_ID: u64 = 161_221_135; // 0x99c0a0f
pub const CHAIN_NAME: &str = "plume-testnet";

pub const FAUCET_API_URL: &str = "https://faucet.plumenetwork.xyz/api/faucet";
pub const EXPLORER_TX_URL: &str = "https://testnet-explorer.plumenetwork.xyz/tx/";

pub const CHECK_IN_CONTRACT: &str = "0x8Dc5b3f1CcC75604710d9F464e3C5D2dfCAb60d8";
pub const GOON_TOKEN: &str = "0xba22114ec75f0d55c34a5e5a3cf384484ad9e733";
pub const GOON_USD_TOKEN: &str = "0x5c1409a46cd113b3a667db6df0a8d7be37ed3bb3";
pub const CROC_SWAP_DEX: &str = "0x4c722A53Cf9EB5373c655E1dD2dA95AcC10152D1";
pub const NEST_STAKING: &str = "0xA34420e04DE6B34F8680EE87740B379103DC69f6";

/// `0x103fc452`: faucet claim taking `(string token, bytes32 salt, bytes signature)`.
pub const FAUCET_CLAIM_SELECTOR: [u8; 4] = [0x10, 0x3f, 0xc4, 0x52];

pub const CHECK_IN_SIGNATURE: &str = "checkIn()";
pub const APPROVE_SIGNATURE: &str = "approve(address,uint256)";
pub const STAKE_SIGNATURE: &str = "stake(uint256)";
pub const CROC_SWAP_SIGNATURE: &str =
    "swap(address,address,uint256,bool,bool,uint128,uint16,uint128,uint128,uint8)";

/// CrocSwap pool type used for the GOON/goonUSD pair on testnet.
pub const CROC_POOL_IDX: u64 = 36_000;
/// CrocSwap price bounds (Q64.64 square root price).
pub const CROC_MIN_SQRT_PRICE: u128 = 65_538;
pub const CROC_MAX_SQRT_PRICE: u128 = 21_267_430_153_580_247_136_652_501_917_186_561_138;

/// 1 goonUSD, 18 decimals.
pub const STAKE_AMOUNT_WEI: u128 = 1_000_000_000_000_000_000;

pub const CHECK_IN_PASS_DELAY: Duration = Duration::from_secs(24 * 60 * 60);
pub const FAUCET_ETH_WALLET_DELAY: Duration = Duration::from_secs(10 * 60);
pub const FAUCET_GOON_WALLET_DELAY: Duration = Duration::from_secs(5);
pub const FAUCET_GOON_PASS_DELAY: Duration = Duration::from_secs(2 * 60 * 60);
pub const SWAP_WALLET_DELAY: Duration = Duration::from_secs(3 * 60);
pub const STAKE_PASS_DELAY: Duration = Duration::from_secs(24 * 60 * 60);
