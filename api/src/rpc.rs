use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::{NATIVE_DECIMALS, NATIVE_SYMBOL, TOKEN_SYMBOL};
use crate::error::FetchError;
use crate::network::NetworkSelection;
use crate::session::Balances;

/// Source of asset balances for an address on a network.
#[async_trait(?Send)]
pub trait BalanceSource {
    async fn fetch(&self, selection: &NetworkSelection, address: &str)
        -> Result<Balances, FetchError>;
}

#[derive(Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Deserialize, Debug)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct WithContext<T> {
    pub value: T,
}

#[derive(Deserialize, Debug)]
pub struct TokenAccount {
    pub account: TokenAccountData,
}

#[derive(Deserialize, Debug)]
pub struct TokenAccountData {
    pub data: ParsedData,
}

#[derive(Deserialize, Debug)]
pub struct ParsedData {
    pub parsed: ParsedAccount,
}

#[derive(Deserialize, Debug)]
pub struct ParsedAccount {
    pub info: ParsedTokenInfo,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTokenInfo {
    pub token_amount: TokenAmount,
}

#[derive(Deserialize, Debug)]
pub struct TokenAmount {
    pub amount: String,
    pub decimals: u32,
}

/// Balances over Solana JSON-RPC: native lamports plus the network's token mint.
#[derive(Clone, Debug, Default)]
pub struct RpcBalanceSource {
    client: reqwest::Client,
}

impl RpcBalanceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches balances against an explicit endpoint and mint.
    pub async fn fetch_at(
        &self,
        rpc_url: &str,
        mint: &str,
        address: &str,
    ) -> Result<Balances, FetchError> {
        let lamports = fetch_lamports(&self.client, rpc_url, address).await?;
        let tokens = fetch_token_amount(&self.client, rpc_url, address, mint).await?;

        let mut balances = Balances::new();
        balances.insert(
            NATIVE_SYMBOL.to_string(),
            Decimal::from_i128_with_scale(lamports as i128, NATIVE_DECIMALS),
        );
        balances.insert(TOKEN_SYMBOL.to_string(), tokens);
        Ok(balances)
    }
}

#[async_trait(?Send)]
impl BalanceSource for RpcBalanceSource {
    async fn fetch(
        &self,
        selection: &NetworkSelection,
        address: &str,
    ) -> Result<Balances, FetchError> {
        self.fetch_at(selection.endpoint(), selection.token_address(), address)
            .await
    }
}

pub async fn rpc_call<T: DeserializeOwned>(
    client: &reqwest::Client,
    rpc_url: &str,
    method: &'static str,
    params: Vec<serde_json::Value>,
) -> Result<T, FetchError> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method,
        params,
    };

    let response = client.post(rpc_url).json(&request).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    let rpc_response: RpcResponse<T> = response.json().await?;

    if let Some(error) = rpc_response.error {
        return Err(FetchError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    rpc_response
        .result
        .ok_or_else(|| FetchError::Decode(format!("No result returned for {}", method)))
}

/// Native balance in lamports.
pub async fn fetch_lamports(
    client: &reqwest::Client,
    rpc_url: &str,
    address: &str,
) -> Result<u64, FetchError> {
    let result: WithContext<u64> = rpc_call(
        client,
        rpc_url,
        "getBalance",
        vec![serde_json::json!(address)],
    )
    .await?;
    Ok(result.value)
}

/// Sum of every token account `owner` holds for `mint`.
pub async fn fetch_token_amount(
    client: &reqwest::Client,
    rpc_url: &str,
    owner: &str,
    mint: &str,
) -> Result<Decimal, FetchError> {
    let result: WithContext<Vec<TokenAccount>> = rpc_call(
        client,
        rpc_url,
        "getTokenAccountsByOwner",
        vec![
            serde_json::json!(owner),
            serde_json::json!({ "mint": mint }),
            serde_json::json!({ "encoding": "jsonParsed" }),
        ],
    )
    .await?;

    let mut total = Decimal::ZERO;
    for account in &result.value {
        total = total
            .checked_add(token_amount(&account.account.data.parsed.info.token_amount)?)
            .ok_or_else(|| FetchError::Decode("Token amount overflow".to_string()))?;
    }
    Ok(total)
}

// Raw amounts are unsigned base units; scale is bounded by `Decimal`'s 28 digits.
fn token_amount(amount: &TokenAmount) -> Result<Decimal, FetchError> {
    let raw: u64 = amount
        .amount
        .parse()
        .map_err(|_| FetchError::Decode(format!("Bad token amount '{}'", amount.amount)))?;
    Decimal::try_from_i128_with_scale(i128::from(raw), amount.decimals).map_err(|e| {
        FetchError::Decode(format!(
            "Token amount {} with {} decimals: {}",
            amount.amount, amount.decimals, e
        ))
    })
}
