//! Guarded pool walkthrough.
//!
//! Seeds a DAPP/USD pool, trades against it, shows the guard rejecting a
//! same-block follow-up, then runs a flash loan through an approved
//! strategy and withdraws the fee-grown position.
//!
//! # Run
//!
//! ```bash
//! cargo run --example guarded_pool
//! ```

use sentinel_amm::prelude::*;

const DAPP: Address = Address::repeat_byte(0x01);
const USD: Address = Address::repeat_byte(0x02);
const REGISTRAR: Address = Address::repeat_byte(0xAA);
const POOL: Address = Address::repeat_byte(0xEE);
const LP: Address = Address::repeat_byte(0x11);
const TRADER: Address = Address::repeat_byte(0x21);
const STRATEGY: Address = Address::repeat_byte(0x51);

/// Borrows, pretends to arbitrage, and pays back principal plus fee.
struct Arbitrageur;

impl FlashBorrower<InMemoryTokenLedger> for Arbitrageur {
    fn address(&self) -> Address {
        STRATEGY
    }

    fn on_flash_loan(
        &mut self,
        account: &mut BorrowerAccount<'_, InMemoryTokenLedger>,
        terms: &FlashLoanTerms,
        _data: &[u8],
    ) -> Result<()> {
        println!(
            "  callback:    holding {} (phase {:?})",
            account.balance_of(&terms.token()),
            account.pool().flash_loan_session().phase()
        );
        account.repay(&terms.token(), terms.amount_owed())
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Guarded constant-product pool ===\n");

    // ── 1. Define tokens and configuration ──────────────────────────────
    let dapp = Token::new(DAPP, Decimals::MAX);
    let usd = Token::new(USD, Decimals::MAX);
    let pair = TokenPair::new(dapp, usd)?;
    let config = EngineConfig::new(pair, REGISTRAR, POOL)?;
    println!("Swap fee:        {}", config.swap_fee());
    println!("Flash-loan fee:  {}", config.flash_loan_fee());

    // ── 2. Fund accounts in the token ledger ────────────────────────────
    let mut ledger = InMemoryTokenLedger::new();
    for (who, whole) in [(LP, 100_000), (TRADER, 1_000), (STRATEGY, 100)] {
        for token in [dapp, usd] {
            ledger.mint(&token.address(), &who, Amount::new(token.to_raw_amount(whole)))?;
            ledger.approve(&token.address(), &who, &POOL, Amount::MAX)?;
        }
    }
    let mut pool = GuardedPool::new(config, ledger)?;

    // ── 3. Seed liquidity ───────────────────────────────────────────────
    let mut ctx = CallContext::new(LP, BlockHeight::new(1), Timestamp::new(12));
    let seed = Amount::new(dapp.to_raw_amount(100_000));
    let deposit = pool.add_liquidity(&ctx, seed, seed)?;
    println!("\n--- Deposit ---");
    println!("  Shares:      {}", deposit.shares_minted);
    println!("  Reserves:    {:?}", pool.reserves());

    // ── 4. Swap 100 DAPP for USD ────────────────────────────────────────
    ctx = ctx.next_block(12).with_caller(TRADER);
    let amount_in = Amount::new(dapp.to_raw_amount(100));
    let quote = pool.quote(SwapDirection::AToB, amount_in)?;
    let deadline = Timestamp::new(ctx.timestamp.get() + 60);
    let receipt = pool.swap(&ctx, SwapDirection::AToB, amount_in, quote.amount_out, deadline)?;
    println!("\n--- Swap: sell {amount_in} DAPP ---");
    println!("  Amount out:  {}", receipt.amount_out());
    println!("  Fee paid:    {}", receipt.fee());
    println!("  Invariant:   {}", pool.invariant());

    // ── 5. The guard rejects a same-block reverse trade ─────────────────
    let back = pool.swap(&ctx, SwapDirection::BToA, receipt.amount_out(), Amount::ZERO, deadline);
    println!("\n--- Same-block reverse trade ---");
    match back {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  rejected:    {e} ({:?})", e.category()),
    }

    // ── 6. Flash loan through an approved strategy ──────────────────────
    ctx = ctx.next_block(12);
    pool.approve_strategy(&ctx.with_caller(REGISTRAR), STRATEGY)?;
    let principal = Amount::new(dapp.to_raw_amount(10_000));
    println!("\n--- Flash loan: {principal} DAPP ---");
    let loan = pool.flash_loan(&ctx, DAPP, principal, &mut Arbitrageur, b"demo")?;
    println!("  Fee:         {}", loan.terms.fee());
    println!("  Retained:    {}", loan.retained);
    println!("  Reserves:    {:?}", pool.reserves());

    // ── 7. Withdraw the whole position ──────────────────────────────────
    ctx = ctx.next_block(12).with_caller(LP);
    let withdrawal = pool.remove_liquidity(&ctx, pool.share_of(&LP))?;
    println!("\n--- Withdraw ---");
    println!("  DAPP out:    {}", withdrawal.amount_a);
    println!("  USD out:     {}", withdrawal.amount_b);

    // ── 8. Audit log ────────────────────────────────────────────────────
    println!("\n--- Events ---");
    for event in pool.events() {
        println!("  {}", serde_json::to_string(event)?);
    }

    Ok(())
}
