use std::time::Duration;

/// Symbol of the native asset.
pub const NATIVE_SYMBOL: &str = "SOL";

/// Decimals of the native asset (lamports per SOL = 10^9).
pub const NATIVE_DECIMALS: u32 = 9;

/// Symbol of the Portal token.
pub const TOKEN_SYMBOL: &str = "PRTL";

/// Decimals of the Portal token mint.
pub const TOKEN_DECIMALS: u32 = 9;

/// Mainnet RPC endpoint.
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Testnet RPC endpoint.
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";

/// Mainnet explorer base.
pub const MAINNET_EXPLORER_URL: &str = "https://explorer.solana.com";

/// Testnet explorer base. The cluster query must survive path splicing.
pub const TESTNET_EXPLORER_URL: &str = "https://explorer.solana.com?cluster=testnet";

/// Portal token mint on mainnet.
pub const MAINNET_TOKEN_ADDRESS: &str = "29Hi3txMefMyHcdctEgi4czSadQY2Ln4E18CG4Zj2Uof";

/// Portal token mint on testnet.
pub const TESTNET_TOKEN_ADDRESS: &str = "FX7dCbDxgLiBS1aHiyqGD5HbVHKp2FFaoN4QhXNgfrn2";

/// Storage key holding the last selected network.
pub const NETWORK_KEY: &str = "network";

/// Storage key holding the name of the last connected wallet.
pub const WALLET_KEY: &str = "walletName";

/// Default bound on a wallet connection attempt.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Length of a public key in bytes.
pub const PUBKEY_LEN: usize = 32;
