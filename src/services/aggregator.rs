use std::collections::BTreeMap;

use crate::config::{trophy_adjustment, TOP_N};
use crate::models::{
    InningsSplit, MatchRecord, RankedEntry, ResultKind, ResultKindCount, SeasonWins, TeamReport,
    TossConversion, TossDecision, TrophyCount,
};
use crate::services::TeamResolver;
use crate::store::RecordStore;
use crate::utils::{calculate_win_percentage, pluralize_trophy, top_counts, value_counts};

/// Computes the dashboard views for a selected team.
///
/// Every method is total: a team that never appears in the table gets empty
/// lists and zero counts.
pub struct AggregationEngine {
    top_n: usize,
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self { top_n: TOP_N }
    }

    fn team_matches<'a>(store: &'a RecordStore, team: &'a str) -> impl Iterator<Item = &'a MatchRecord> {
        store.records().iter().filter(move |r| r.involves(team))
    }

    fn team_wins<'a>(store: &'a RecordStore, team: &'a str) -> impl Iterator<Item = &'a MatchRecord> {
        Self::team_matches(store, team).filter(move |r| r.won_by(team))
    }

    fn ranked<'a>(&self, names: impl Iterator<Item = &'a str>) -> Vec<RankedEntry> {
        top_counts(names, self.top_n)
            .into_iter()
            .map(|(name, count)| RankedEntry {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    /// Player-of-the-match awards in the team's matches.
    pub fn top_award_winners(&self, store: &RecordStore, team: &str) -> Vec<RankedEntry> {
        self.ranked(Self::team_matches(store, team).filter_map(|r| r.player_of_match.as_deref()))
    }

    /// Wins grouped by season, in season order.
    pub fn wins_per_season(&self, store: &RecordStore, team: &str) -> Vec<SeasonWins> {
        let mut seasons: BTreeMap<&str, usize> = BTreeMap::new();
        for record in Self::team_wins(store, team) {
            *seasons.entry(record.season.as_str()).or_default() += 1;
        }
        seasons
            .into_iter()
            .map(|(season, wins)| SeasonWins {
                season: season.to_string(),
                wins,
            })
            .collect()
    }

    /// Wins grouped by how they were decided, most common first. Wins with an
    /// unreadable result cell are left out.
    pub fn winning_style(&self, store: &RecordStore, team: &str) -> Vec<ResultKindCount> {
        value_counts(Self::team_wins(store, team).filter_map(|r| r.result))
            .into_iter()
            .map(|(result, count)| ResultKindCount { result, count })
            .collect()
    }

    /// A win counts as first-innings only when the team won the toss and chose
    /// to bat; every other win is booked as second-innings.
    pub fn innings_preference(&self, store: &RecordStore, team: &str) -> InningsSplit {
        let mut total = 0;
        let mut first_innings_wins = 0;
        for record in Self::team_wins(store, team) {
            total += 1;
            if record.toss_won_by(team) && record.toss_decision == Some(TossDecision::Bat) {
                first_innings_wins += 1;
            }
        }
        InningsSplit {
            first_innings_wins,
            second_innings_wins: total - first_innings_wins,
        }
    }

    /// Tosses won across the whole table and how many of those matches were won.
    pub fn toss_conversion(&self, store: &RecordStore, team: &str) -> TossConversion {
        let mut total_tosses_won = 0;
        let mut matches_won_after_toss = 0;
        for record in store.records().iter().filter(|r| r.toss_won_by(team)) {
            total_tosses_won += 1;
            if record.won_by(team) {
                matches_won_after_toss += 1;
            }
        }
        TossConversion {
            total_tosses_won,
            matches_won_after_toss,
            win_pct: calculate_win_percentage(matches_won_after_toss, total_tosses_won),
        }
    }

    /// Finals won, plus any configured titles missing from the table.
    pub fn trophy_count(&self, store: &RecordStore, team: &str) -> TrophyCount {
        let from_finals = store
            .records()
            .iter()
            .filter(|r| r.is_final() && r.won_by(team))
            .count();

        let (adjustment, adjusted_seasons) = match trophy_adjustment(team) {
            Some(adj) => (
                adj.extra,
                adj.seasons.iter().map(|s| s.to_string()).collect(),
            ),
            None => (0, Vec::new()),
        };

        TrophyCount {
            from_finals,
            adjustment,
            adjusted_seasons,
            total: from_finals + adjustment,
        }
    }

    /// Teams with the most wins by wickets, across every team.
    pub fn top_chasing_teams(&self, store: &RecordStore) -> Vec<RankedEntry> {
        self.ranked(
            store
                .records()
                .iter()
                .filter(|r| r.result == Some(ResultKind::Wickets))
                .filter_map(|r| r.winner.as_deref()),
        )
    }

    /// Player-of-the-match awards across the whole table.
    pub fn top_award_winners_overall(&self, store: &RecordStore) -> Vec<RankedEntry> {
        self.ranked(store.records().iter().filter_map(|r| r.player_of_match.as_deref()))
    }

    pub fn team_report(&self, store: &RecordStore, team: &str) -> TeamReport {
        let trophies = self.trophy_count(store, team);
        TeamReport {
            team: team.to_string(),
            short_code: TeamResolver::short_code(team).to_string(),
            top_award_winners: self.top_award_winners(store, team),
            wins_per_season: self.wins_per_season(store, team),
            winning_style: self.winning_style(store, team),
            innings: self.innings_preference(store, team),
            toss: self.toss_conversion(store, team),
            trophy_announcement: trophy_announcement(team, &trophies),
            trophies,
            top_chasing_teams: self.top_chasing_teams(store),
            top_award_winners_overall: self.top_award_winners_overall(store),
        }
    }
}

/// Headline plus either a row of trophies, the adjusted seasons, or a
/// consolation line.
pub fn trophy_announcement(team: &str, trophies: &TrophyCount) -> String {
    let headline = format!(
        "{} has won {} IPL {}.",
        team,
        trophies.total,
        pluralize_trophy(trophies.total)
    );

    let detail = if !trophies.adjusted_seasons.is_empty() {
        format!("🏆 {}", trophies.adjusted_seasons.join(", "))
    } else if trophies.total > 0 {
        "🏆".repeat(trophies.total)
    } else {
        "No trophies yet 🥺".to_string()
    };

    format!("{}\n\n{}", headline, detail)
}
