//! JSON API for host integrations.
//!
//! One request in, one response out, with the seed carried in the request
//! so hosts get the same determinism guarantee as direct callers.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::engine::config::ResolutionConfig;
use crate::engine::refine::{self, PlayExecutionResult};
use crate::engine::resolve::{PlayResolutionEngine, PlayResult};
use crate::error::{EngineError, Result};
use crate::models::formation::{DefenseAlignment, OffenseAlignment};
use crate::models::play::{DefensiveCall, PlayCall, PlayCategory};
use crate::models::player::PlayerProfile;
use crate::models::situation::Situation;
use crate::SCHEMA_VERSION;

/// Player ratings for the refinement pass, when the host supplies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefinementCast {
    Pass { qb: PlayerProfile, receiver: PlayerProfile, defender: PlayerProfile },
    Run { runner: PlayerProfile, defenders: Vec<PlayerProfile> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub offense: PlayCall,
    pub defense: DefensiveCall,
    pub offense_alignment: OffenseAlignment,
    pub defense_alignment: DefenseAlignment,
    #[serde(default)]
    pub situation: Situation,
    /// Defaults to the realistic preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ResolutionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<RefinementCast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayResponse {
    pub schema_version: u8,
    pub result: PlayResult,
    /// Present when the request carried a refinement cast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<PlayExecutionResult>,
}

/// Resolve a play described as JSON, returning the result as JSON.
pub fn resolve_play_json(request_json: &str) -> Result<String> {
    let request: PlayRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(EngineError::InvalidRequest(format!(
            "unsupported schema version {} (expected {})",
            request.schema_version, SCHEMA_VERSION
        )));
    }

    let config = request.config.clone().unwrap_or_default();
    let engine = PlayResolutionEngine::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);

    let result = engine.resolve_play(
        &request.offense,
        &request.defense,
        &request.offense_alignment,
        &request.defense_alignment,
        &request.situation,
        &mut rng,
    )?;

    let execution = match &request.cast {
        Some(RefinementCast::Pass { qb, receiver, defender }) => Some(refine::refine_pass(
            qb,
            receiver,
            defender,
            &result,
            &request.situation,
            &mut rng,
        )),
        Some(RefinementCast::Run { runner, defenders }) => {
            Some(refine::refine_run(runner, defenders, &result, &mut rng))
        }
        None => {
            if request.offense.category() == PlayCategory::Pass {
                log::debug!("no cast supplied for a pass play; skipping refinement");
            }
            None
        }
    };

    let response = PlayResponse { schema_version: SCHEMA_VERSION, result, execution };
    Ok(serde_json::to_string(&response)?)
}
