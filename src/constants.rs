//! Mainnet deployment address book
//!
//! Token, oracle and protocol contract addresses the strategies interact
//! with. Role holders built on top of these live in [`crate::roles`].

use crate::types::ContractAddr;
use alloy::primitives::uint;

// === Tokens ===
pub const USDC: ContractAddr = ContractAddr::new(uint!(0x053c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8_U256));
pub const ETH: ContractAddr = ContractAddr::new(uint!(0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7_U256));
pub const STRK: ContractAddr = ContractAddr::new(uint!(0x4718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d_U256));
pub const BTC: ContractAddr = ContractAddr::new(uint!(0x03fe2b97c1fd336e750087d68b9b867997fd64a2661ff3ca5a7c771641e8e7ac_U256));
/// Endur liquid staked STRK
pub const XSTRK: ContractAddr = ContractAddr::new(uint!(0x028d709c875c0ceac3dce7065bec5328186dc89fe254527084d1689910954b0a_U256));
pub const DAI: ContractAddr = ContractAddr::new(uint!(0x05574eb6b8789a91466f902c380d978e472db68170ff82a5b650b95a58ddf4ad_U256));
pub const USDT: ContractAddr = ContractAddr::new(uint!(0x068f5c6a61780768455de69077e07e89787839bf8166decfbf92b645209c0fb8_U256));
pub const WSTETH: ContractAddr = ContractAddr::new(uint!(0x042b8f0484674ca266ac5d08e4ac6a3fe65bd3129795def2dca5c34ecc5f96d2_U256));

// === Oracles ===
/// Pragma oracle
pub const ORACLE: ContractAddr = ContractAddr::new(uint!(0x023fb3afbff2c0e3399f896dcf7400acf1a161941cfb386e34a123f228c62832_U256));
/// Oracle wrapper deployed by the protocol
pub const ORACLE_OURS: ContractAddr = ContractAddr::new(uint!(0x435ab4d9c05c00455f2cb583d8cead3a6e3e5e713de1890b0bb2dba6b8d8349_U256));

// === Nostra money market ===
pub const NOSTRA_ETH_COLLATERAL: ContractAddr = ContractAddr::new(uint!(0x057146f6409deb4c9fa12866915dd952aa07c1eb2752e451d7f3b042086bdeb8_U256));
pub const NOSTRA_USDC_COLLATERAL: ContractAddr = ContractAddr::new(uint!(0x05dcd26c25d9d8fd9fc860038dcb6e4d835e524eb8a85213a8cda5b7fff845f6_U256));
pub const NOSTRA_USDC_DEBT: ContractAddr = ContractAddr::new(uint!(0x063d69ae657bd2f40337c39bf35a870ac27ddf91e6623c2f52529db4c1619a51_U256));
pub const NOSTRA_ETH_DEBT: ContractAddr = ContractAddr::new(uint!(0x00ba3037d968790ac486f70acaa9a1cab10cf5843bb85c986624b4d0e5a82e74_U256));
pub const NOSTRA_STRK_DEBT: ContractAddr = ContractAddr::new(uint!(0x001258eae3eae5002125bebf062d611a772e8aea3a1879b64a19f363ebd00947_U256));
pub const NOSTRA_CDP: ContractAddr = ContractAddr::new(uint!(0x73f6addc9339de9822cab4dac8c9431779c09077f02ba7bc36904ea342dd9eb_U256));

// === Nostra DEX ===
pub const NOSTRA_EX: ContractAddr = ContractAddr::new(uint!(0x6720b763aac6608ceba3f9069bebb0f990cd96b26071b3fa2a2109940f90db2_U256));
pub const NOSTRA_ETHUSDC_DEGEN_POOL: ContractAddr = ContractAddr::new(uint!(0x05e03162008d76cf645fe53c6c13a7a5fce745e8991c6ffe94400d60e44c210a_U256));
pub const NOSTRA_STRKETH_DEGEN_POOL: ContractAddr = ContractAddr::new(uint!(0x01a2de9f2895ac4e6cb80c11ecc07ce8062a4ae883f64cb2b1dc6724b85e897d_U256));

// === Ekubo ===
pub const EKUBO_CORE: ContractAddr = ContractAddr::new(uint!(0x00000005dd3d2f4429af886cd1a3b08289dbcea99a294197e9eb43b0e0325b4b_U256));
pub const EKUBO_ROUTER: ContractAddr = ContractAddr::new(uint!(0x0199741822c2dc722f6f605204f35e56dbc23bceed54818168c4c49e4fb8737e_U256));
pub const EKUBO_POSITIONS: ContractAddr = ContractAddr::new(uint!(0x02e0af29598b407c8716b17f6d2795eca1b471413fa03fb145a5e33722184067_U256));
pub const EKUBO_POSITIONS_NFT: ContractAddr = ContractAddr::new(uint!(0x07b696af58c967c1b14c9dde0ace001720635a660a8e90c565ea459345318b30_U256));

// === Vesu ===
pub const VESU_SINGLETON: ContractAddr = ContractAddr::new(uint!(0x2545b2e5d519fc230e9cd781046d3a64e092114f07e44771e0d719d148725ef_U256));
pub const VESU_GENESIS_POOL: ContractAddr = ContractAddr::new(uint!(0x4dc4f0ca6ea4961e4c8373265bfd5317678f4fe374d76f3fd7135f57763bf28_U256));
pub const GENESIS_V_TOKEN: ContractAddr = ContractAddr::new(uint!(0x37ae3f583c8d644b7556c93a04b83b52fa96159b2b0cbd83c14d3122aef80a2_U256));
pub const RE7_XSTRK_POOL: ContractAddr = ContractAddr::new(uint!(0x52fb52363939c3aa848f8f4ac28f0a51379f8d1b971d8444de25fbd77d8f161_U256));
pub const RE7_XSTRK_V_TOKEN: ContractAddr = ContractAddr::new(uint!(0x1f876e2da54266911d8a7409cba487414d318a2b6540149520bf7e2af56b93c_U256));
pub const RE7_SSTRK_POOL: ContractAddr = ContractAddr::new(uint!(0x2e06b705191dbe90a3fbaad18bb005587548048b725116bff3104ca501673c1_U256));
pub const RE7_SSTRK_V_TOKEN: ContractAddr = ContractAddr::new(uint!(0x5afdf4d18501d1d9d4664390df8c0786a6db8f28e66caa8800f1c2f51396492_U256));
pub const RE7_USDC_POOL: ContractAddr = ContractAddr::new(uint!(0x7f135b4df21183991e9ff88380c2686dd8634fd4b09bb2b5b14415ac006fe1d_U256));
pub const RE7_USDC_V_TOKEN: ContractAddr = ContractAddr::new(uint!(0xb5581d0bc94bc984cf79017d0f4b079c7e926af3d79bd92ff66fb451b340df_U256));
/// Default Vesu pool id, the genesis pool
pub const VESU_POOL_ID: ContractAddr = VESU_GENESIS_POOL;

// === Governance ===
pub const ACCESS_CONTROL: ContractAddr = ContractAddr::new(uint!(0x636a3f51cc37f5729e4da4b1de6a8549a28f3c0d5bf3b17f150971e451ff9c2_U256));
pub const TIMELOCK: ContractAddr = ContractAddr::new(uint!(0x0613a26e199f9bafa9418567f4ef0d78e9496a8d6aab15fba718a2ec7f2f2f69_U256));
/// Super admin hot wallet
pub const SUPER_ADMIN: ContractAddr = ContractAddr::new(uint!(0x055d39827894c40f04fe3a314ad013bf9bc5220f7eb6cd8863212dcba6c0e16e_U256));
/// Relayer / risk manager account
pub const RELAYER: ContractAddr = ContractAddr::new(uint!(0x02d6cf6182259ee62a001efc67e62c1fbc0df109d2aa4163eb70d6d1074f0173_U256));
/// Timelock delay in seconds
pub const TIMELOCK_DELAY: u64 = 0;
