use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}

impl FromStr for TossDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bat" => Ok(Self::Bat),
            "field" => Ok(Self::Field),
            other => Err(format!("unknown toss decision '{}'", other)),
        }
    }
}

/// How a match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Runs,
    Wickets,
    Tie,
    NoResult,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Runs => "runs",
            Self::Wickets => "wickets",
            Self::Tie => "tie",
            Self::NoResult => "no-result",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "runs" => Ok(Self::Runs),
            "wickets" => Ok(Self::Wickets),
            "tie" => Ok(Self::Tie),
            "" | "na" | "no result" | "no-result" | "noresult" => Ok(Self::NoResult),
            other => Err(format!("unknown result kind '{}'", other)),
        }
    }
}

/// One row of the match table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub season: String,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<TossDecision>,
    pub winner: Option<String>, // None for no-result matches
    pub result: Option<ResultKind>, // None when the cell was unreadable
    pub player_of_match: Option<String>,
    pub match_type: String,
}

impl MatchRecord {
    pub fn involves(&self, team: &str) -> bool {
        self.team1.as_deref() == Some(team) || self.team2.as_deref() == Some(team)
    }

    pub fn won_by(&self, team: &str) -> bool {
        self.winner.as_deref() == Some(team)
    }

    pub fn toss_won_by(&self, team: &str) -> bool {
        self.toss_winner.as_deref() == Some(team)
    }

    pub fn is_final(&self) -> bool {
        self.match_type.trim().eq_ignore_ascii_case("final")
    }
}

// View types, one per dashboard panel

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWins {
    pub season: String,
    pub wins: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultKindCount {
    pub result: ResultKind,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsSplit {
    pub first_innings_wins: usize,
    pub second_innings_wins: usize,
}

impl InningsSplit {
    pub fn total(&self) -> usize {
        self.first_innings_wins + self.second_innings_wins
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TossConversion {
    pub total_tosses_won: usize,
    pub matches_won_after_toss: usize,
    pub win_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrophyCount {
    /// Finals won according to the match table.
    pub from_finals: usize,
    /// Titles added by a configured adjustment.
    pub adjustment: usize,
    pub adjusted_seasons: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    pub team: String,
    pub short_code: String,
    pub top_award_winners: Vec<RankedEntry>,
    pub wins_per_season: Vec<SeasonWins>,
    pub winning_style: Vec<ResultKindCount>,
    pub innings: InningsSplit,
    pub toss: TossConversion,
    pub trophies: TrophyCount,
    pub trophy_announcement: String,
    pub top_chasing_teams: Vec<RankedEntry>,
    pub top_award_winners_overall: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub short_code: String,
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_kind_parsing() {
        assert_eq!("Wickets".parse::<ResultKind>(), Ok(ResultKind::Wickets));
        assert_eq!("no result".parse::<ResultKind>(), Ok(ResultKind::NoResult));
        assert_eq!("".parse::<ResultKind>(), Ok(ResultKind::NoResult));
        assert!("innings".parse::<ResultKind>().is_err());
    }

    #[test]
    fn test_toss_decision_parsing() {
        assert_eq!(" BAT ".parse::<TossDecision>(), Ok(TossDecision::Bat));
        assert_eq!("field".parse::<TossDecision>(), Ok(TossDecision::Field));
        assert!("bowl".parse::<TossDecision>().is_err());
    }

    #[test]
    fn test_final_is_case_insensitive() {
        let mut record = MatchRecord {
            season: "2016".to_string(),
            team1: Some("Sunrisers Hyderabad".to_string()),
            team2: Some("Royal Challengers Bangalore".to_string()),
            toss_winner: Some("Sunrisers Hyderabad".to_string()),
            toss_decision: Some(TossDecision::Bat),
            winner: Some("Sunrisers Hyderabad".to_string()),
            result: Some(ResultKind::Runs),
            player_of_match: Some("BCJ Cutting".to_string()),
            match_type: "FINAL".to_string(),
        };
        assert!(record.is_final());
        record.match_type = "Qualifier 1".to_string();
        assert!(!record.is_final());
    }

    #[test]
    fn test_result_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ResultKind::NoResult).unwrap();
        assert_eq!(json, "\"no-result\"");
    }
}
