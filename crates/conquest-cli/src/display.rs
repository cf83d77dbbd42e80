//! Text rendering for the console.

use conquest_core::{AttackRecord, Registry, SessionSummary};
use std::io::{self, Write};

const RULE: &str = "===================================================";
const THIN_RULE: &str = "---------------------------------------------------";

/// Print every territory with its index.
pub fn render_map(out: &mut impl Write, registry: &Registry) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, " CURRENT MAP ({} territories)", registry.len())?;
    writeln!(out, "{}", RULE)?;
    for (index, territory) in registry.iter() {
        writeln!(out, " [{}] Name:   {}", index, territory.name)?;
        writeln!(out, "     Color:  {}", territory.faction)?;
        writeln!(out, "     Troops: {}", territory.troop_count)?;
        writeln!(out, "{}", THIN_RULE)?;
    }
    Ok(())
}

/// Print the player's mission banner.
pub fn render_mission(out: &mut impl Write, mission_text: &str, player_faction: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, " YOUR MISSION")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "You command: {}", player_faction)?;
    writeln!(out, "Mission: {}", mission_text)?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

/// Print the dice and consequences of one attack.
pub fn render_battle(out: &mut impl Write, record: &AttackRecord) -> io::Result<()> {
    let outcome = &record.outcome;
    writeln!(out)?;
    writeln!(
        out,
        " BATTLE between {} and {}",
        record.attacker_name, record.defender_name
    )?;
    if outcome.conquered {
        writeln!(
            out,
            "  DICE: ATTACK({}) > DEFENSE({}). The attacker wins!",
            outcome.attack_roll, outcome.defense_roll
        )?;
        writeln!(
            out,
            "  {} conquered {}. {} troops transferred.",
            record.attacker_name, record.defender_name, outcome.troops_transferred
        )?;
    } else {
        writeln!(
            out,
            "  DICE: ATTACK({}) <= DEFENSE({}). The defense holds!",
            outcome.attack_roll, outcome.defense_roll
        )?;
        if outcome.attacker_lost_troop() {
            writeln!(
                out,
                "  {} lost 1 troop in the attack (remaining: {}).",
                record.attacker_name, outcome.attacker_troops
            )?;
        } else {
            writeln!(
                out,
                "  {} had too few troops to lose any.",
                record.attacker_name
            )?;
        }
    }
    Ok(())
}

/// Print the win banner.
pub fn render_victory(out: &mut impl Write, mission_text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, " CONGRATULATIONS! YOU COMPLETED YOUR MISSION!")?;
    writeln!(out, "Your mission was: {}", mission_text)?;
    Ok(())
}

/// Print end-of-session totals.
pub fn render_summary(out: &mut impl Write, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, " SESSION SUMMARY")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Result:           {}", summary.phase)?;
    writeln!(out, "Attacks:          {}", summary.attacks)?;
    writeln!(out, "Conquests:        {}", summary.conquests)?;
    writeln!(out, "Attacks repelled: {}", summary.repelled)?;
    writeln!(out, "Troops lost:      {}", summary.troops_lost)?;
    writeln!(out, "Territories held: {}", summary.territories_held)?;
    if let Some(progress) = &summary.progress {
        writeln!(out, "Mission progress: {}", progress.summary)?;
    }
    Ok(())
}
