//! Built-in sample pairings and players.
//!
//! Demo data for CLIs, batch drivers, and tests. Real play and formation
//! definitions come from external loaders; these samples only exercise the
//! engine without one.

use crate::models::formation::{
    DefenseAlignment, DefensiveDepth, Lane, OffenseAlignment, OffensiveDepth,
};
use crate::models::play::{
    AssignmentDuty, BlockScheme, BlockTechnique, DefensiveCall, Direction, PlayAssignment,
    PlayCall, PlayStyle, ProtectionScheme,
};
use crate::models::player::{PlayerProfile, PlayerTrait, Skill};

fn run_block(role: &str, scheme: BlockScheme) -> PlayAssignment {
    PlayAssignment::new(
        role,
        AssignmentDuty::RunBlock { scheme, technique: None, partner: None, direction: None },
    )
}

/// I-formation power run at a base 4-3 front.
pub fn sample_power_run() -> (PlayCall, DefensiveCall, OffenseAlignment, DefenseAlignment) {
    let offense = PlayCall::new("Power O Right", PlayStyle::InsideRun, "i_form")
        .with_assignment(run_block("LT", BlockScheme::Drive))
        .with_assignment(PlayAssignment::new(
            "LG",
            AssignmentDuty::RunBlock {
                scheme: BlockScheme::Pull,
                technique: None,
                partner: None,
                direction: Some(Direction::Right),
            },
        ))
        .with_assignment(run_block("C", BlockScheme::Drive))
        .with_assignment(PlayAssignment::new(
            "RG",
            AssignmentDuty::RunBlock {
                scheme: BlockScheme::DoubleTeam,
                technique: None,
                partner: Some("RT".to_string()),
                direction: None,
            },
        ))
        .with_assignment(PlayAssignment::new(
            "RT",
            AssignmentDuty::RunBlock {
                scheme: BlockScheme::DoubleTeam,
                technique: None,
                partner: Some("RG".to_string()),
                direction: None,
            },
        ))
        .with_assignment(PlayAssignment::new("FB", AssignmentDuty::LeadBlock))
        .with_assignment(PlayAssignment::new(
            "QB",
            AssignmentDuty::Handoff { fake_direction: None, technique: None },
        ))
        .with_assignment(PlayAssignment::new(
            "WR1",
            AssignmentDuty::RunBlock {
                scheme: BlockScheme::Drive,
                technique: Some(BlockTechnique::Crack),
                partner: None,
                direction: None,
            },
        ));

    let defense = DefensiveCall::new("4-3 Base", "base43")
        .with_assignment(PlayAssignment::new("DE1", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new("DT1", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new("DT2", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new("DE2", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new(
            "LB1",
            AssignmentDuty::RunFit { gap: Some(crate::models::play::Gap::A) },
        ))
        .with_assignment(PlayAssignment::new(
            "LB2",
            AssignmentDuty::RunFit { gap: Some(crate::models::play::Gap::B) },
        ));

    let off_alignment = OffenseAlignment::new()
        .with(Lane::Left, OffensiveDepth::Line, 2)
        .with(Lane::Middle, OffensiveDepth::Line, 3)
        .with(Lane::Right, OffensiveDepth::Line, 2)
        .with(Lane::Middle, OffensiveDepth::Backfield, 3)
        .with(Lane::Left, OffensiveDepth::Wide, 1);

    let def_alignment = DefenseAlignment::new()
        .with(Lane::Left, DefensiveDepth::Line, 1)
        .with(Lane::Middle, DefensiveDepth::Line, 2)
        .with(Lane::Right, DefensiveDepth::Line, 1)
        .with(Lane::Middle, DefensiveDepth::Box, 3)
        .with(Lane::Middle, DefensiveDepth::Deep, 2);

    (offense, defense, off_alignment, def_alignment)
}

/// Shotgun quick slant against a nickel blitz.
pub fn sample_quick_slant() -> (PlayCall, DefensiveCall, OffenseAlignment, DefenseAlignment) {
    let offense = PlayCall::new("Quick Slant", PlayStyle::ShortPass, "shotgun_11")
        .with_assignment(PlayAssignment::new(
            "LT",
            AssignmentDuty::PassBlock { scheme: ProtectionScheme::VerticalSet },
        ))
        .with_assignment(PlayAssignment::new(
            "LG",
            AssignmentDuty::PassBlock { scheme: ProtectionScheme::Basic },
        ))
        .with_assignment(PlayAssignment::new(
            "C",
            AssignmentDuty::PassBlock { scheme: ProtectionScheme::Basic },
        ))
        .with_assignment(PlayAssignment::new(
            "RG",
            AssignmentDuty::PassBlock { scheme: ProtectionScheme::Basic },
        ))
        .with_assignment(PlayAssignment::new(
            "RT",
            AssignmentDuty::PassBlock { scheme: ProtectionScheme::VerticalSet },
        ))
        .with_assignment(PlayAssignment::new("WR1", AssignmentDuty::Route { depth: 4 }))
        .with_assignment(PlayAssignment::new("WR2", AssignmentDuty::Route { depth: 6 }))
        .with_assignment(PlayAssignment::new("TE1", AssignmentDuty::Route { depth: 8 }))
        .with_assignment(PlayAssignment::new("RB1", AssignmentDuty::Route { depth: 2 }));

    let defense = DefensiveCall::new("Nickel Fire", "nickel")
        .with_assignment(PlayAssignment::new("DE1", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new("DT1", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new("DE2", AssignmentDuty::Rush { technique: None }))
        .with_assignment(PlayAssignment::new("LB1", AssignmentDuty::Blitz { lane: Some(Lane::Middle) }))
        .with_assignment(PlayAssignment::new("LB2", AssignmentDuty::Blitz { lane: Some(Lane::Right) }))
        .with_assignment(PlayAssignment::new(
            "CB1",
            AssignmentDuty::Coverage { man_target: Some("WR1".to_string()) },
        ))
        .with_assignment(PlayAssignment::new(
            "CB2",
            AssignmentDuty::Coverage { man_target: Some("WR2".to_string()) },
        ))
        .with_assignment(PlayAssignment::new("S1", AssignmentDuty::Coverage { man_target: None }));

    let off_alignment = OffenseAlignment::new()
        .with(Lane::Left, OffensiveDepth::Line, 2)
        .with(Lane::Middle, OffensiveDepth::Line, 3)
        .with(Lane::Right, OffensiveDepth::Line, 2)
        .with(Lane::Middle, OffensiveDepth::Backfield, 2)
        .with(Lane::Left, OffensiveDepth::Wide, 2)
        .with(Lane::Right, OffensiveDepth::Wide, 2)
        .with(Lane::Middle, OffensiveDepth::Wide, 1);

    let def_alignment = DefenseAlignment::new()
        .with(Lane::Left, DefensiveDepth::Line, 1)
        .with(Lane::Middle, DefensiveDepth::Line, 2)
        .with(Lane::Right, DefensiveDepth::Line, 1)
        .with(Lane::Middle, DefensiveDepth::Box, 2)
        .with(Lane::Left, DefensiveDepth::Deep, 1)
        .with(Lane::Middle, DefensiveDepth::Deep, 1)
        .with(Lane::Right, DefensiveDepth::Deep, 1);

    (offense, defense, off_alignment, def_alignment)
}

/// Sample cast for pass-play refinement: elite QB and receiver against an
/// average corner.
pub fn sample_pass_cast() -> (PlayerProfile, PlayerProfile, PlayerProfile) {
    let qb = PlayerProfile::new("Elite QB", "QB", 92)
        .with_skill(Skill::Awareness, 95)
        .with_skill(Skill::Hands, 90);
    let receiver = PlayerProfile::new("Elite WR", "WR", 90)
        .with_skill(Skill::Hands, 92)
        .with_skill(Skill::RouteRunning, 91)
        .with_skill(Skill::Speed, 94)
        .with_skill(Skill::Agility, 88);
    let defender = PlayerProfile::new("Average CB", "CB", 75)
        .with_skill(Skill::Coverage, 76)
        .with_skill(Skill::Tackle, 72);
    (qb, receiver, defender)
}

/// Sample cast for run-play refinement: a power back against two box
/// defenders.
pub fn sample_run_cast() -> (PlayerProfile, Vec<PlayerProfile>) {
    let runner = PlayerProfile::new("Power RB", "RB", 85)
        .with_skill(Skill::Strength, 90)
        .with_skill(Skill::Agility, 78)
        .with_skill(Skill::Speed, 82)
        .with_trait(PlayerTrait::SecureHands);
    let defenders = vec![
        PlayerProfile::new("Mike LB", "LB", 80)
            .with_skill(Skill::Tackle, 84)
            .with_skill(Skill::Strength, 82),
        PlayerProfile::new("Box Safety", "S", 77)
            .with_skill(Skill::Tackle, 78)
            .with_skill(Skill::Strength, 74),
    ];
    (runner, defenders)
}
