//! Reputation voting program and its client-side instruction builders.

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

use solana_program::{pubkey, pubkey::Pubkey};

solana_program::declare_id!("4X9mF1yUx2ez6ifYCmr2aYJnX5DkKAxbu5QD93s7gooG");

/// Devnet deployment. Might lag behind mainnet.
pub const DEVNET_ID: Pubkey = pubkey!("HVFVK2UComnzuLfDbPukyt86LGi51iLQUL3aGBEVqLni");
