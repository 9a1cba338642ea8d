use alloy::network::EthereumWallet;
use alloy::primitives::Bytes;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use color_eyre::eyre::Result;

/// Wrapper around the concrete provider returned by `ProviderBuilder`.
/// Trait-object erasure keeps us from spelling out the full generic type.
pub struct EthProvider {
    provider: Box<dyn Provider + Send + Sync>,
    chain_id: u64,
}

impl EthProvider {
    /// Connect a read-only provider via HTTP RPC.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let url = rpc_url.parse()?;
        let provider = ProviderBuilder::new().on_http(url);
        let chain_id = provider.get_chain_id().await?;
        Ok(Self {
            provider: Box::new(provider),
            chain_id,
        })
    }

    /// Connect a provider with a wallet attached, able to sign and send
    /// transactions for the wallet's account.
    pub async fn connect_with_wallet(rpc_url: &str, wallet: EthereumWallet) -> Result<Self> {
        let url = rpc_url.parse()?;
        let provider = ProviderBuilder::new().wallet(wallet).on_http(url);
        let chain_id = provider.get_chain_id().await?;
        Ok(Self {
            provider: Box::new(provider),
            chain_id,
        })
    }

    /// Return the chain ID obtained at connection time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Perform a read-only contract call.
    pub async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        let data = self.provider.call(tx).await?;
        Ok(data)
    }

    /// Send a state-changing transaction and wait for it to be included,
    /// returning the receipt.
    pub async fn send_and_confirm(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
        let pending = self.provider.send_transaction(tx).await?;
        let receipt = pending.get_receipt().await?;
        Ok(receipt)
    }
}
