use std::collections::BTreeSet;

use crate::config::TEAM_SHORT_CODES;
use crate::store::RecordStore;

/// Distinct team names of a loaded table plus the display-code lookup.
pub struct TeamResolver {
    teams: Vec<String>,
}

impl TeamResolver {
    pub fn from_store(store: &RecordStore) -> Self {
        let teams: BTreeSet<&str> = store
            .records()
            .iter()
            .flat_map(|r| [r.team1.as_deref(), r.team2.as_deref()])
            .flatten()
            .collect();

        Self {
            teams: teams.into_iter().map(str::to_string).collect(),
        }
    }

    /// Every team that appears as team1 or team2, sorted and deduplicated.
    pub fn list_teams(&self) -> &[String] {
        &self.teams
    }

    pub fn contains(&self, team: &str) -> bool {
        self.teams.binary_search_by(|t| t.as_str().cmp(team)).is_ok()
    }

    /// Display code for a canonical team name, or "" when none is configured.
    pub fn short_code(team: &str) -> &'static str {
        TEAM_SHORT_CODES
            .iter()
            .find(|(name, _)| *name == team)
            .map(|(_, code)| *code)
            .unwrap_or("")
    }

    /// Exact match ignoring case and surrounding whitespace.
    pub fn resolve(&self, query: &str) -> Option<&str> {
        let query = query.trim();
        self.teams
            .iter()
            .find(|t| t.eq_ignore_ascii_case(query))
            .map(String::as_str)
    }

    /// Closest team names to `query`, best first. Short codes count as a
    /// perfect match so `csk` suggests Chennai Super Kings.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .teams
            .iter()
            .map(|team| {
                let score = if Self::short_code(team).eq_ignore_ascii_case(&needle) {
                    1.0
                } else {
                    strsim::jaro_winkler(&needle, &team.to_lowercase())
                };
                (score, team.as_str())
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, team)| team).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;

    #[test]
    fn test_list_teams_sorted_and_distinct() {
        let resolver = TeamResolver::from_store(&sample_store());
        assert_eq!(resolver.list_teams(), &[CSK, KKR, MI, RCB]);
    }

    #[test]
    fn test_list_teams_skips_missing_names() {
        let csv = "\
season,team1,team2,toss_winner,toss_decision,winner,result,player_of_match,match_type
2020,Punjab Kings,,Punjab Kings,bat,,no result,,League
";
        let store = RecordStore::from_reader(csv.as_bytes(), std::path::Path::new("inline.csv")).unwrap();
        let resolver = TeamResolver::from_store(&store);
        assert_eq!(resolver.list_teams(), &["Punjab Kings"]);
    }

    #[test]
    fn test_short_code_for_every_listed_team() {
        let resolver = TeamResolver::from_store(&sample_store());
        for team in resolver.list_teams() {
            assert!(!TeamResolver::short_code(team).is_empty(), "{team} has no code");
        }
        assert_eq!(TeamResolver::short_code(RCB), "RCB");
    }

    #[test]
    fn test_short_code_unknown_team_is_empty() {
        assert_eq!(TeamResolver::short_code("Royal Challengers Bangalore"), "");
        assert_eq!(TeamResolver::short_code(""), "");
    }

    #[test]
    fn test_renamed_franchises_share_a_code() {
        assert_eq!(TeamResolver::short_code("Delhi Capitals"), "DC");
        assert_eq!(TeamResolver::short_code("Deccan Chargers"), "DC");
    }

    #[test]
    fn test_resolve_and_contains() {
        let resolver = TeamResolver::from_store(&sample_store());
        assert_eq!(resolver.resolve("  mumbai indians "), Some(MI));
        assert_eq!(resolver.resolve("Mumbai"), None);
        assert!(resolver.contains(KKR));
        assert!(!resolver.contains("Gujarat Titans"));
    }

    #[test]
    fn test_suggest_ranks_close_names_first() {
        let resolver = TeamResolver::from_store(&sample_store());
        assert_eq!(resolver.suggest("Kolkatta Knight Riders", 1), vec![KKR]);
        assert_eq!(resolver.suggest("csk", 1), vec![CSK]);
        assert_eq!(resolver.suggest("anything", 10).len(), 4);
    }
}
