pub mod best_player;
pub mod catalog;
pub mod champion_stats;
pub mod metric;
pub mod player_stats;
pub mod table;
pub mod team_page;
pub mod team_stats;

/// Resolves a raw player id to the name shown in reports.
///
/// Implementations must not block on I/O; callers prefetch anything remote
/// before finalizing.
pub trait NameLookup {
    fn display_name(&self, player_id: &str) -> String;
}

impl<F> NameLookup for F
where
    F: Fn(&str) -> String,
{
    fn display_name(&self, player_id: &str) -> String {
        self(player_id)
    }
}
