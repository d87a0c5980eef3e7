// Sample Anchor state file covering every supported field shape.
// Run: countoor demos/default.rs

use anchor_lang::prelude::*;

#[account]
pub struct Tournament {
    pub authority: Pubkey,
    pub name: String,
    pub entry_fee: u64,
    pub prize_pool: u128,
    pub players: Vec<Pubkey>, // up to the assumed Vec length
    pub scores: [u32; 8],
    pub winner: Option<Pubkey>,
    pub phase: Phase,
    pub bump: u8,
}

impl Tournament {
    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Registration)
    }
}

#[account]
pub struct Ticket {
    pub owner: Pubkey,
    pub tournament: Pubkey,
    pub seat: u16,
    pub paid: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq)]
pub enum Phase {
    Registration,
    Running { round: u8, started_at: i64 },
    Finished(Pubkey),
    Cancelled,
}
