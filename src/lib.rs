//! Season statistics for League of Legends leagues.
//!
//! Raw per-game performances are folded into [`analysis::player_stats`],
//! [`analysis::champion_stats`] and [`analysis::team_stats`] aggregators and
//! finalized into tables that any [`display::sink::TableSink`] can render.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;
