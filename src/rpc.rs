use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::network::is_address;

const SELECTOR_BALANCE_OF: &str = "70a08231";
const SELECTOR_DECIMALS: &str = "313ce567";

/// Read access to an Ethereum JSON-RPC node.
///
/// Implementors only provide [`ChainReader::request`]; the typed queries are
/// built on top of it.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    async fn block_number(&self) -> Result<u64> {
        let v = self.request("eth_blockNumber", json!([])).await?;
        to_u64(parse_quantity(&v)?)
    }

    /// Unix seconds of the given block, `None` if the node does not know it.
    async fn block_timestamp(&self, number: u64) -> Result<Option<i64>> {
        let block = self
            .request("eth_getBlockByNumber", json!([format!("0x{number:x}"), false]))
            .await?;
        match block.get("timestamp") {
            None => Ok(None),
            Some(ts) => Ok(Some(i64::try_from(parse_quantity(ts)?)?)),
        }
    }

    /// Wei.
    async fn gas_price(&self) -> Result<u128> {
        let v = self.request("eth_gasPrice", json!([])).await?;
        parse_quantity(&v)
    }

    async fn chain_id(&self) -> Result<u64> {
        let v = self.request("eth_chainId", json!([])).await?;
        to_u64(parse_quantity(&v)?)
    }

    /// Native balance in wei.
    async fn balance(&self, address: &str) -> Result<u128> {
        if !is_address(address) {
            bail!("malformed address: {address}");
        }
        let v = self.request("eth_getBalance", json!([address, "latest"])).await?;
        parse_quantity(&v)
    }

    /// Read-only contract call, returns the raw hex result.
    async fn call(&self, to: &str, data: &str) -> Result<String> {
        let v = self
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        v.as_str()
            .map(String::from)
            .ok_or_else(|| anyhow!("eth_call returned non-string result"))
    }

    async fn erc20_balance(&self, token: &str, owner: &str) -> Result<u128> {
        let data = erc20_call_data(SELECTOR_BALANCE_OF, Some(owner))?;
        let raw = self.call(token, &data).await?;
        parse_quantity(&Value::String(raw))
    }

    async fn erc20_decimals(&self, token: &str) -> Result<u32> {
        let data = erc20_call_data(SELECTOR_DECIMALS, None)?;
        let raw = self.call(token, &data).await?;
        let d = parse_quantity(&Value::String(raw))?;
        u32::try_from(d).map_err(|_| anyhow!("decimals out of range: {d}"))
    }
}

#[derive(Clone)]
pub struct JsonRpcClient {
    url: String,
    http: Client,
}

#[derive(Serialize)]
struct RpcPayload<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

impl JsonRpcClient {
    pub fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChainReader for JsonRpcClient {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        debug!(method, "rpc.request");
        let resp = self
            .http
            .post(&self.url)
            .json(&RpcPayload {
                jsonrpc: "2.0",
                id: 1,
                method,
                params,
            })
            .send()
            .await
            .with_context(|| format!("{method} request failed"))?
            .error_for_status()?;

        let body: Value = resp.json().await.context("rpc response decode failed")?;
        unwrap_rpc_body(method, body)
    }
}

fn unwrap_rpc_body(method: &str, mut body: Value) -> Result<Value> {
    if let Some(err) = body.get("error") {
        let msg = err
            .get("message")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| err.to_string());
        bail!("{method} failed: {msg}");
    }
    body.get_mut("result")
        .map(Value::take)
        .ok_or_else(|| anyhow!("{method}: response missing 'result' field"))
}

/// Decodes a hex quantity (`0x1a`) or a 32-byte ABI word into a u128.
pub fn parse_quantity(v: &Value) -> Result<u128> {
    let s = v
        .as_str()
        .ok_or_else(|| anyhow!("expected hex string, got {v}"))?;
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| anyhow!("missing 0x prefix: {s}"))?;
    let digits = hex.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 32 {
        bail!("quantity does not fit in 128 bits: {s}");
    }
    u128::from_str_radix(digits, 16).with_context(|| format!("invalid hex quantity: {s}"))
}

fn to_u64(v: u128) -> Result<u64> {
    u64::try_from(v).map_err(|_| anyhow!("value out of range: {v}"))
}

/// Selector plus an optional address argument left-padded to 32 bytes.
pub fn erc20_call_data(selector: &str, address: Option<&str>) -> Result<String> {
    match address {
        None => Ok(format!("0x{selector}")),
        Some(addr) => {
            if !is_address(addr) {
                bail!("malformed address: {addr}");
            }
            Ok(format!("0x{selector}{:0>64}", addr[2..].to_lowercase()))
        }
    }
}

/// `value / 10^decimals` rendered with a fixed number of places.
pub fn format_units(value: u128, decimals: u32, places: usize) -> String {
    let scaled = value as f64 / 10f64.powi(decimals as i32);
    format!("{scaled:.places$}")
}
