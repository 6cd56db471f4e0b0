//! # Sentinel AMM
//!
//! Two-asset constant-product exchange engine with an anti-manipulation
//! guard in front of every swap and atomic, single-call flash loans for
//! registered strategy contracts.
//!
//! Everything lives in one value, [`GuardedPool`](pool::GuardedPool):
//! reserves, LP shares, per-trader guard state, the strategy registry, the
//! flash-loan slot and an audit log. Tokens are moved through a
//! [`TokenLedger`](traits::TokenLedger) capability supplied by the host;
//! [`InMemoryTokenLedger`](tokens::InMemoryTokenLedger) is provided for
//! tests and simulations.
//!
//! Every entry point is all-or-nothing. On error, reserves, shares, trader
//! activity, token balances and the audit log are exactly as they were
//! before the call.
//!
//! ## Provide liquidity and swap
//!
//! ```rust
//! use sentinel_amm::prelude::*;
//!
//! let (token_a, token_b) = (Address::repeat_byte(1), Address::repeat_byte(2));
//! let pair = TokenPair::new(Token::new(token_a, Decimals::MAX), Token::new(token_b, Decimals::MAX))
//!     .expect("distinct tokens");
//! let pool_addr = Address::repeat_byte(0xEE);
//! let config = EngineConfig::new(pair, Address::repeat_byte(0xAA), pool_addr).expect("valid config");
//!
//! let lp = Address::repeat_byte(0x11);
//! let mut tokens = InMemoryTokenLedger::new();
//! for token in [token_a, token_b] {
//!     tokens.mint(&token, &lp, Amount::new(1_000_000)).expect("mint");
//!     tokens.approve(&token, &lp, &pool_addr, Amount::MAX).expect("approve");
//! }
//!
//! let mut pool = GuardedPool::new(config, tokens).expect("pool");
//! let ctx = CallContext::new(lp, BlockHeight::new(1), Timestamp::new(1_000));
//! let deposit = pool
//!     .add_liquidity(&ctx, Amount::new(1_000_000), Amount::new(1_000_000))
//!     .expect("deposit");
//! assert_eq!(deposit.total_shares, pool.total_shares());
//!
//! // Same block as the deposit, but the LP has never swapped.
//! let receipt = pool
//!     .swap(&ctx, SwapDirection::AToB, Amount::new(10_000), Amount::ZERO, Timestamp::new(2_000))
//!     .expect("swap");
//! assert!(receipt.amount_out() < Amount::new(10_000));
//!
//! // Trading again in the same block trips the cooldown.
//! let again = pool.swap(&ctx, SwapDirection::BToA, Amount::new(10_000), Amount::ZERO, Timestamp::new(2_000));
//! assert!(matches!(again, Err(AmmError::CooldownActive { .. })));
//! ```
//!
//! # Architecture
//!
//! ```text
//! caller ──► GuardedPool entry point
//!              │  deadline
//!              ▼
//!            GuardChain            reentrancy, flash-loan lock, size,
//!              │                   cooldown, window, price impact
//!              ▼
//!            math                  quote, ratio, shares, payout
//!              │
//!              ▼
//!            envelope (lock + checkpoint)
//!              ├── TokenLedger     transfers
//!              ├── ReserveLedger   reserves and shares
//!              └── PoolEvent log
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), [`CallContext`](domain::CallContext), receipts |
//! | [`math`] | Checked arithmetic, 256-bit mul-div, constant-product formulas |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) and JSON-loadable [`GuardConfig`](config::GuardConfig) |
//! | [`ledger`] | Reserves and share accounting |
//! | [`guard`] | The [`GuardCheck`](guard::GuardCheck) chain, trader activity, reentrancy lock |
//! | [`flash`] | Flash-loan state machine and strategy registry |
//! | [`pool`] | [`GuardedPool`](pool::GuardedPool), the engine |
//! | [`traits`] | Capabilities consumed from the host: token ledger, flash borrower |
//! | [`tokens`] | In-memory token ledger |
//! | [`events`] | Audit events |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod flash;
pub mod guard;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod tokens;
pub mod traits;
