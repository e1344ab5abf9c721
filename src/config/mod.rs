use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "ipl_cleaned.csv";
pub const DEFAULT_PORT: u16 = 3000;

/// How many entries every "top N" view returns.
pub const TOP_N: usize = 5;

/// Canonical franchise name to display code.
///
/// Deccan Chargers and Delhi Capitals share `DC`; both names appear in the
/// historical data and the dashboard has always shown them that way.
pub const TEAM_SHORT_CODES: &[(&str, &str)] = &[
    ("Royal Challengers Bengaluru", "RCB"),
    ("Chennai Super Kings", "CSK"),
    ("Mumbai Indians", "MI"),
    ("Kolkata Knight Riders", "KKR"),
    ("Delhi Capitals", "DC"),
    ("Rajasthan Royals", "RR"),
    ("Sunrisers Hyderabad", "SRH"),
    ("Lucknow Super Giants", "LSG"),
    ("Gujarat Titans", "GT"),
    ("Punjab Kings", "PBKS"),
    ("Deccan Chargers", "DC"),
    ("Pune Warriors", "PW"),
    ("Rising Pune Supergiant", "RPS"),
    ("Kochi Tuskers Kerala", "KTK"),
];

/// A championship the match table does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrophyAdjustment {
    pub team: &'static str,
    pub extra: usize,
    pub seasons: &'static [&'static str],
}

/// RCB won the 2025 final, which postdates the dataset.
pub const RCB_2025_TITLE: TrophyAdjustment = TrophyAdjustment {
    team: "Royal Challengers Bengaluru",
    extra: 1,
    seasons: &["2025"],
};

pub const TROPHY_ADJUSTMENTS: &[TrophyAdjustment] = &[RCB_2025_TITLE];

pub fn trophy_adjustment(team: &str) -> Option<&'static TrophyAdjustment> {
    TROPHY_ADJUSTMENTS.iter().find(|adj| adj.team == team)
}

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let data_path = env::var("IPL_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT value {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self { data_path, port }
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(mut self, data_path: Option<PathBuf>, port: Option<u16>) -> Self {
        if let Some(path) = data_path {
            self.data_path = path;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rcb_is_adjusted() {
        let adj = trophy_adjustment("Royal Challengers Bengaluru").unwrap();
        assert_eq!(adj.extra, 1);
        assert_eq!(adj.seasons, &["2025"]);
        assert!(trophy_adjustment("Mumbai Indians").is_none());
        assert!(trophy_adjustment("Royal Challengers Bangalore").is_none());
    }

    #[test]
    fn test_short_codes_are_many_to_one_for_dc() {
        let dc: Vec<&str> = TEAM_SHORT_CODES
            .iter()
            .filter(|(_, code)| *code == "DC")
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(dc, vec!["Delhi Capitals", "Deccan Chargers"]);
    }

    #[test]
    fn test_overrides_replace_env_values() {
        let config = Config {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
        }
        .with_overrides(Some(PathBuf::from("/tmp/matches.csv")), None);

        assert_eq!(config.data_path, PathBuf::from("/tmp/matches.csv"));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
