//! Synthetic replay buffers for tests.

use crate::layout::ScoreRowLayout;

const RESULTS_TABLE_MARKER: [u8; 4] = [0x01, 0x16, 0xC6, 0x01];
const PLAYERS_END_MARKER: [u8; 4] = [0x00; 4];
const SCORES_MARKER: [u8; 4] = [0x03, 0x00, 0x00, 0x01];
const CHAT_MARKER: [u8; 3] = [0x22, 0x01, 0x3C];
const VEHICLE_MARKER: [u8; 6] = [0x0F, 0x09, 0xA5, 0x5A, 0x58, 0x07];
const WIN_STREAK_MARKER: &[u8] = b"winStreak";
const HEADER_SIZE: usize = 211;

/// Counter values for one score row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRow {
    pub air_kills: u32,
    pub ground_kills: u32,
    pub naval_kills: u32,
    pub team_kills: u32,
    pub ai_air_kills: u32,
    pub ai_ground_kills: u32,
    pub ai_naval_kills: u32,
    pub assists: u8,
    pub deaths: u8,
    pub captures: u8,
    pub score: u16,
    pub squad: u8,
    pub auto_squad: u8,
    pub team: u8,
}

impl ScoreRow {
    pub fn team(team: u8) -> Self {
        Self {
            team,
            ..Default::default()
        }
    }

    pub fn encode(&self, layout: &ScoreRowLayout) -> Vec<u8> {
        let mut row = vec![0u8; layout.stride];
        let mut word = |offset: usize, value: u32| {
            row[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        };
        word(layout.air_kills, self.air_kills);
        word(layout.ground_kills, self.ground_kills);
        word(layout.naval_kills, self.naval_kills);
        word(layout.team_kills, self.team_kills);
        word(layout.ai_air_kills, self.ai_air_kills);
        word(layout.ai_ground_kills, self.ai_ground_kills);
        word(layout.ai_naval_kills, self.ai_naval_kills);

        row[layout.assists] = self.assists;
        row[layout.deaths] = self.deaths;
        row[layout.captures] = self.captures;
        row[layout.score_low] = (self.score & 0xFF) as u8;
        row[layout.score_high] = (self.score >> 8) as u8;
        row[layout.squad] = self.squad;
        row[layout.auto_squad] = self.auto_squad;
        row[layout.team] = self.team;
        row
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePlayer {
    pub id: u64,
    pub name: String,
    pub clan_tag: Option<String>,
    pub row: ScoreRow,
}

/// Encode players the way the results table lists them: `name [clan] id`
/// per player, every token null-separated.
pub fn encode_player_table(players: &[FixturePlayer]) -> Vec<u8> {
    let mut tokens: Vec<Vec<u8>> = Vec::new();
    for player in players {
        tokens.push(player.name.as_bytes().to_vec());
        if let Some(tag) = &player.clan_tag {
            tokens.push(tag.as_bytes().to_vec());
        }
        tokens.push(player.id.to_string().into_bytes());
    }
    tokens.join(&0u8)
}

/// Builds a replay buffer in the default layout.
///
/// Chat, vehicle and win-streak records are written before the results
/// table, followed by the header, players and one score row per player.
#[derive(Debug, Clone)]
pub struct ReplayBuilder {
    players: Vec<FixturePlayer>,
    messages: Vec<(String, String, u8)>,
    vehicles: Vec<(u8, String)>,
    vehicle_index_base: u8,
    winner: Option<u8>,
    score_rows: Option<usize>,
    raw_player_table: Option<Vec<u8>>,
    results_marker: bool,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            messages: Vec::new(),
            vehicles: Vec::new(),
            vehicle_index_base: 0x20,
            winner: None,
            score_rows: None,
            raw_player_table: None,
            results_marker: true,
        }
    }
}

impl ReplayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, id: u64, name: &str, clan_tag: Option<&str>, row: ScoreRow) -> Self {
        self.players.push(FixturePlayer {
            id,
            name: name.to_string(),
            clan_tag: clan_tag.map(str::to_string),
            row,
        });
        self
    }

    pub fn chat(mut self, speaker: &str, body: &str, scope: u8) -> Self {
        self.messages
            .push((speaker.to_string(), body.to_string(), scope));
        self
    }

    /// A vehicle record for the player at `table_index`.
    pub fn vehicle(mut self, table_index: u8, vehicle: &str) -> Self {
        self.vehicles.push((table_index, vehicle.to_string()));
        self
    }

    /// Constant added to table indices in vehicle records.
    pub fn vehicle_index_base(mut self, base: u8) -> Self {
        self.vehicle_index_base = base;
        self
    }

    pub fn winner(mut self, table_index: u8) -> Self {
        self.winner = Some(table_index);
        self
    }

    /// Write only the first `count` score rows.
    pub fn score_rows(mut self, count: usize) -> Self {
        self.score_rows = Some(count);
        self
    }

    /// Write `section` as the players section instead of encoding the
    /// players. Score rows still come from the added players.
    pub fn raw_player_table(mut self, section: &[u8]) -> Self {
        self.raw_player_table = Some(section.to_vec());
        self
    }

    pub fn without_results_marker(mut self) -> Self {
        self.results_marker = false;
        self
    }

    pub fn players(&self) -> &[FixturePlayer] {
        &self.players
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = b"WRPL".to_vec();
        buffer.extend([0x55; 12]);

        for (speaker, body, scope) in &self.messages {
            buffer.extend(CHAT_MARKER);
            push_prefixed(&mut buffer, speaker);
            push_prefixed(&mut buffer, body);
            buffer.push(*scope);
            buffer.extend([0x55; 4]);
        }

        for (table_index, vehicle) in &self.vehicles {
            buffer.push(self.vehicle_index_base.wrapping_add(*table_index));
            buffer.extend(VEHICLE_MARKER);
            push_prefixed(&mut buffer, vehicle);
            buffer.extend([0x55; 4]);
        }

        if let Some(winner) = self.winner {
            buffer.extend([winner, 0x00, 0x00, 0x00, 0x00]);
            buffer.extend(WIN_STREAK_MARKER);
            buffer.extend([0x55; 4]);
        }

        if self.results_marker {
            buffer.extend(RESULTS_TABLE_MARKER);
        }
        buffer.extend([0x11; HEADER_SIZE]);
        match &self.raw_player_table {
            Some(section) => buffer.extend(section),
            None => buffer.extend(encode_player_table(&self.players)),
        }
        buffer.extend(PLAYERS_END_MARKER);
        buffer.extend([0x77; 8]);
        buffer.extend(SCORES_MARKER);

        let layout = ScoreRowLayout::default();
        let rows = self.score_rows.unwrap_or(self.players.len());
        for player in self.players.iter().take(rows) {
            buffer.extend(player.row.encode(&layout));
        }

        buffer
    }
}

fn push_prefixed(buffer: &mut Vec<u8>, text: &str) {
    buffer.push(text.len() as u8);
    buffer.extend(text.as_bytes());
}
