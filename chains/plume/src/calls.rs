//! Calldata encoders for the contract calls the bot makes.

use crate::config::PlumeConfig;
use crate::constants;
use crate::faucet::{ClaimSignature, FaucetToken};
use anyhow::{Context, Result};
use ethers::abi::{encode, Token};
use ethers::types::{Address, Bytes, U256};
use ethers::utils::id;

/// A call ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl ContractCall {
    fn new(to: Address, selector: [u8; 4], args: &[Token]) -> Self {
        let mut data = selector.to_vec();
        data.extend_from_slice(&encode(args));
        Self {
            to,
            data: Bytes::from(data),
            value: U256::zero(),
        }
    }

    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// Contract addresses resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlumeAddresses {
    pub faucet: Address,
    pub check_in: Address,
    pub goon: Address,
    pub goon_usd: Address,
    pub croc_dex: Address,
    pub nest_staking: Address,
}

impl PlumeAddresses {
    pub fn resolve(config: &PlumeConfig) -> Result<Self> {
        Ok(Self {
            faucet: parse_address("faucet_contract", &config.faucet_contract)?,
            check_in: parse_address("check-in contract", constants::CHECK_IN_CONTRACT)?,
            goon: parse_address("GOON token", constants::GOON_TOKEN)?,
            goon_usd: parse_address("goonUSD token", constants::GOON_USD_TOKEN)?,
            croc_dex: parse_address("CrocSwap dex", constants::CROC_SWAP_DEX)?,
            nest_staking: parse_address("Nest staking", constants::NEST_STAKING)?,
        })
    }
}

fn parse_address(name: &str, value: &str) -> Result<Address> {
    value
        .parse()
        .with_context(|| format!("Invalid {} address: {}", name, value))
}

pub fn check_in(contract: Address) -> ContractCall {
    ContractCall::new(contract, id(constants::CHECK_IN_SIGNATURE), &[])
}

pub fn faucet_claim(contract: Address, token: FaucetToken, claim: &ClaimSignature) -> ContractCall {
    ContractCall::new(
        contract,
        constants::FAUCET_CLAIM_SELECTOR,
        &[
            Token::String(token.symbol().to_string()),
            Token::FixedBytes(claim.salt.as_bytes().to_vec()),
            Token::Bytes(claim.signature.to_vec()),
        ],
    )
}

pub fn approve(token: Address, spender: Address, amount: U256) -> ContractCall {
    ContractCall::new(
        token,
        id(constants::APPROVE_SIGNATURE),
        &[Token::Address(spender), Token::Uint(amount)],
    )
}

pub fn stake(contract: Address, amount: U256) -> ContractCall {
    ContractCall::new(contract, id(constants::STAKE_SIGNATURE), &[Token::Uint(amount)])
}

/// Raw call with a pre-encoded argument list, used by the dex adapter.
pub fn with_signature(contract: Address, signature: &str, args: &[Token]) -> ContractCall {
    ContractCall::new(contract, id(signature), args)
}
