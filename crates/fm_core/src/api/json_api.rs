use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::MatchEngine;
use crate::error::{CoreError, Result, SetupError};
use crate::models::{MatchResult, MatchSetup, Player, PlayerId, Position, Roster, TeamSheet};
use crate::tactics::Tactic;
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Player records for both sides; extra records are ignored
    pub players: Vec<Player>,
    pub home: SheetRequest,
    pub away: SheetRequest,
    #[serde(default)]
    pub neutral_venue: bool,
    /// (home, away) morale, 50 = neutral
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morale: Option<(u8, u8)>,
    /// Falls back to `EngineConfig::default()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRequest {
    pub name: String,
    pub starters: Vec<StarterRequest>,
    #[serde(default)]
    pub bench: Vec<PlayerId>,
    #[serde(default)]
    pub tactic: Tactic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain: Option<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarterRequest {
    pub id: PlayerId,
    /// Natural position when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    /// SHA-256 of the event log, for replay checks
    pub event_log_digest: String,
    pub result: MatchResult,
}

impl SheetRequest {
    fn build(&self, roster: &Roster) -> std::result::Result<TeamSheet, SetupError> {
        let mut builder = TeamSheet::builder(self.name.clone()).tactic(self.tactic);
        for starter in &self.starters {
            builder = match starter.position {
                Some(position) => builder.starter_at(starter.id, position),
                None => builder.starter(starter.id),
            };
        }
        builder = builder.bench_players(self.bench.iter().copied());
        if let Some(captain) = self.captain {
            builder = builder.captain(captain);
        }
        builder.build(roster)
    }
}

impl MatchRequest {
    /// Validate the request and turn it into a ready `MatchSetup` + config.
    pub fn into_setup(self) -> Result<(MatchSetup, EngineConfig, u64)> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(CoreError::SchemaVersion { found: self.schema_version, expected: SCHEMA_VERSION });
        }

        let config = self.config.unwrap_or_default();
        config.validate()?;

        let roster: Roster = self.players.iter().map(|p| (p.id, p.clone())).collect();
        let home = self.home.build(&roster)?;
        let away = self.away.build(&roster)?;

        let mut setup = MatchSetup::new(home, away, self.players)?;
        if self.neutral_venue {
            setup = setup.neutral_venue();
        }
        if let Some((home_morale, away_morale)) = self.morale {
            setup = setup.with_morale(home_morale, away_morale);
        }
        Ok((setup, config, self.seed))
    }
}

fn run_request(request_json: &str) -> Result<MatchResponse> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let (setup, config, seed) = request.into_setup()?;
    debug!("JSON match request: {} vs {} (seed {})", setup.home.name, setup.away.name, seed);

    let mut engine = MatchEngine::new(setup, config, seed)?;
    let result = engine.simulate();
    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        event_log_digest: result.event_log_digest(),
        result,
    })
}

/// Main entry point for JSON API - simulates a match from JSON request
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let response = run_request(request_json).map_err(|e| {
        warn!("Rejected match request: {}", e);
        e
    })?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::demo_squad;
    use crate::models::MatchStatus;

    fn sheet(name: &str, players: &[Player]) -> SheetRequest {
        SheetRequest {
            name: name.to_string(),
            starters: players.iter().take(11).map(|p| StarterRequest { id: p.id, position: None }).collect(),
            bench: players.iter().skip(11).map(|p| p.id).collect(),
            tactic: Tactic::Balanced,
            captain: None,
        }
    }

    fn request(seed: u64) -> MatchRequest {
        let home = demo_squad(1, 72, 16);
        let away = demo_squad(101, 68, 16);
        MatchRequest {
            schema_version: SCHEMA_VERSION,
            seed,
            home: sheet("Harbour City", &home),
            away: sheet("Valley Rovers", &away),
            players: home.into_iter().chain(away).collect(),
            neutral_venue: false,
            morale: None,
            config: None,
        }
    }

    #[test]
    fn test_simulate_match_json_round_trip() {
        let json = serde_json::to_string(&request(7)).unwrap();
        let out = simulate_match_json(&json).unwrap();
        let response: MatchResponse = serde_json::from_str(&out).unwrap();

        assert_eq!(response.schema_version, SCHEMA_VERSION);
        assert_eq!(response.result.status, MatchStatus::Finished);
        assert_eq!(response.result.home_team, "Harbour City");
        assert_eq!(response.event_log_digest, response.result.event_log_digest());
    }

    #[test]
    fn test_same_seed_same_output() {
        let json = serde_json::to_string(&request(42)).unwrap();
        assert_eq!(simulate_match_json(&json).unwrap(), simulate_match_json(&json).unwrap());
    }

    #[test]
    fn test_schema_version_mismatch() {
        let mut req = request(1);
        req.schema_version = 9;
        let err = simulate_match_json(&serde_json::to_string(&req).unwrap()).unwrap_err();
        assert!(matches!(err, CoreError::SchemaVersion { found: 9, expected: 1 }));
    }

    #[test]
    fn test_malformed_json() {
        let err = simulate_match_json("{ not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
        assert!(!err.is_setup_error());
    }

    #[test]
    fn test_invalid_sheet_is_setup_error() {
        let mut req = request(1);
        req.home.starters.pop();
        let err = simulate_match_json(&serde_json::to_string(&req).unwrap()).unwrap_err();
        assert!(err.is_setup_error());
    }

    #[test]
    fn test_explicit_position_and_captain() {
        let mut req = request(3);
        req.home.starters[5].position = Some(Position::FWD);
        req.home.captain = Some(req.home.starters[3].id);
        req.neutral_venue = true;
        req.morale = Some((70, 30));
        let (setup, _, _) = req.into_setup().unwrap();

        assert_eq!(setup.home.assigned_position(6), Some(Position::FWD));
        assert_eq!(setup.home.captain(), 4);
        assert!(!setup.home_context.home_advantage);
        assert_eq!(setup.away_context.morale, 30);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut req = request(1);
        let mut config = EngineConfig::default();
        config.goals.max_chance = 2.0;
        req.config = Some(config);
        let err = simulate_match_json(&serde_json::to_string(&req).unwrap()).unwrap_err();
        assert!(matches!(err, CoreError::Setup(SetupError::InvalidConfig(_))));
    }

    #[test]
    fn test_minimal_request_uses_defaults() {
        let home = demo_squad(1, 70, 11);
        let away = demo_squad(50, 70, 11);
        let starters = |ps: &[Player]| -> Vec<serde_json::Value> {
            ps.iter().map(|p| serde_json::json!({ "id": p.id })).collect()
        };
        let json = serde_json::json!({
            "schema_version": 1,
            "seed": 5,
            "players": home.iter().chain(away.iter()).collect::<Vec<_>>(),
            "home": { "name": "A", "starters": starters(&home) },
            "away": { "name": "B", "starters": starters(&away), "tactic": "ULTRA_ATTACKING" },
        });
        let out = simulate_match_json(&json.to_string()).unwrap();
        assert!(out.contains("\"schema_version\":1"));
    }
}
