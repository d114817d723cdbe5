use serde::Serialize;

/// Per-player counters from the score table.
///
/// A field is `None` when its bytes were not present in the row, which is
/// distinct from a decoded zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub air_kills: Option<u32>,
    pub ground_kills: Option<u32>,
    pub naval_kills: Option<u32>,
    pub team_kills: Option<u32>,
    pub ai_air_kills: Option<u32>,
    pub ai_ground_kills: Option<u32>,
    pub ai_naval_kills: Option<u32>,
    pub assists: Option<u8>,
    pub deaths: Option<u8>,
    pub captures: Option<u8>,
    pub squad: Option<u8>,
    pub auto_squad: Option<u8>,
    pub team: Option<u8>,
    pub score: Option<u32>,
}

impl PlayerStats {
    /// True when no field could be decoded.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sum of the player-kill counters that are present (team kills excluded).
    pub fn player_kills(&self) -> u32 {
        [self.air_kills, self.ground_kills, self.naval_kills]
            .into_iter()
            .flatten()
            .sum()
    }

    /// Sum of the AI-kill counters that are present.
    pub fn ai_kills(&self) -> u32 {
        [self.ai_air_kills, self.ai_ground_kills, self.ai_naval_kills]
            .into_iter()
            .flatten()
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(PlayerStats::default().is_empty());
        let stats = PlayerStats {
            deaths: Some(0),
            ..Default::default()
        };
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_kill_sums_skip_absent_fields() {
        let stats = PlayerStats {
            air_kills: Some(3),
            naval_kills: Some(1),
            team_kills: Some(9),
            ai_ground_kills: Some(4),
            ..Default::default()
        };
        assert_eq!(stats.player_kills(), 4);
        assert_eq!(stats.ai_kills(), 4);
    }
}
