//! The turn loop: setup prompts, attack prompts and the continue question.

use crate::console::{Console, ConsoleError};
use crate::display;
use crate::error::CliError;
use conquest_core::{
    GameError, GameSession, GameSettings, RandomnessSource, TerritoryIndex, TroopCount,
};
use std::io::{BufRead, Write};

/// Run a whole game: registration, mission draw and the attack loop.
///
/// `territory_count` skips the count prompt when given on the command line.
pub fn run_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    settings: &GameSettings,
    territory_count: Option<i64>,
    rng: &mut impl RandomnessSource,
) -> Result<GameSession, CliError> {
    console.say("===================================================")?;
    console.say(" INITIAL MAP SETUP")?;
    console.say("===================================================")?;

    let count = match territory_count {
        Some(count) => count,
        None => {
            let answer = console.read_line("Enter the total number of territories: ")?;
            answer
                .parse::<i64>()
                .map_err(|_| CliError::InvalidCount(answer.clone()))?
        }
    };
    if count <= 0 {
        return Err(CliError::InvalidCount(count.to_string()));
    }
    let size = usize::try_from(count).map_err(|_| CliError::InvalidCount(count.to_string()))?;

    let mut session = GameSession::new(size, settings.clone())?;
    register_territories(console, &mut session)?;

    session.start(rng)?;
    if let (Some(text), Some(faction)) = (session.mission_text(), session.player_faction()) {
        display::render_mission(console.output(), &text, faction)?;
    }

    play_session(console, &mut session, rng)?;
    Ok(session)
}

/// Prompt for every territory's name, color and troops.
///
/// Rejected answers repeat the same territory; nothing advances until the
/// slot is written.
pub fn register_territories<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut GameSession,
) -> Result<(), CliError> {
    let total = session.registry().len();
    let mut index = 0;
    while index < total {
        console.say(format!(
            "\n--- Registering territory {} of {} ---",
            index + 1,
            total
        ))?;
        let name = console.read_line("Territory NAME: ")?;
        let faction = console.read_line("Army COLOR (e.g. Blue, Red): ")?;
        let troops = read_troops(console)?;

        match session.set_territory(index, &name, &faction, troops) {
            Ok(()) => index += 1,
            Err(GameError::Registry(err)) => {
                tracing::warn!(index, error = %err, "territory rejected");
                console.say(format!(" {} Try again.", err))?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn read_troops<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<TroopCount, CliError> {
    loop {
        let troops: TroopCount = console.read_number("Number of TROOPS: ")?;
        if troops >= 0 {
            return Ok(troops);
        }
        console.say(" Troop count cannot be negative.")?;
    }
}

/// The attack loop. Returns once the mission is met or the player stops.
pub fn play_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut GameSession,
    rng: &mut impl RandomnessSource,
) -> Result<(), CliError> {
    loop {
        display::render_map(console.output(), session.registry())?;
        if announce_if_won(console, session)? {
            break;
        }

        let Some((attacker, defender)) = prompt_pair(console, session)? else {
            if session.phase().is_finished() {
                break;
            }
            continue;
        };

        match session.attack(attacker, defender, rng) {
            Ok(_) => {
                if let Some(record) = session.history().last() {
                    display::render_battle(console.output(), record)?;
                }
            }
            Err(GameError::Attack(err)) => {
                console.say(format!(" {}", err))?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if session.mission_satisfied() {
            display::render_map(console.output(), session.registry())?;
            announce_if_won(console, session)?;
            break;
        }

        let answer = match console.read_line("\nLaunch another attack? (s/n): ") {
            Ok(answer) => answer,
            Err(ConsoleError::EndOfInput) => String::new(),
            Err(err) => return Err(err.into()),
        };
        if !wants_to_continue(&answer) {
            session.abandon();
            break;
        }
    }

    display::render_summary(console.output(), &session.summary())?;
    Ok(())
}

fn announce_if_won<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut GameSession,
) -> Result<bool, CliError> {
    if !session.check_mission() {
        return Ok(false);
    }
    let text = session.mission_text().unwrap_or_default();
    display::render_victory(console.output(), &text)?;
    Ok(true)
}

/// Ask for attacker and defender. `None` means the choice was rejected (or
/// input ended, in which case the session is abandoned).
fn prompt_pair<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut GameSession,
) -> Result<Option<(TerritoryIndex, TerritoryIndex)>, CliError> {
    let len = session.registry().len();
    console.say(format!(
        "\n--- CONFIGURE ATTACK (enter an index between 0 and {}) ---",
        len - 1
    ))?;

    let Some(attacker) = prompt_index(console, session, "Attacking territory: ")? else {
        return Ok(None);
    };
    if let Err(err) = session.validate_attacker(attacker) {
        console.say(format!(" {}", err))?;
        return Ok(None);
    }

    let Some(defender) = prompt_index(console, session, "Defending territory: ")? else {
        return Ok(None);
    };
    Ok(Some((attacker, defender)))
}

fn prompt_index<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut GameSession,
    prompt: &str,
) -> Result<Option<TerritoryIndex>, CliError> {
    let raw: i64 = match console.read_number(prompt) {
        Ok(raw) => raw,
        Err(ConsoleError::EndOfInput) => {
            session.abandon();
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    match to_index(raw, session.registry().len()) {
        Some(index) => Ok(Some(index)),
        None => {
            tracing::warn!(index = raw, "territory index out of range");
            console.say(" Invalid index.")?;
            Ok(None)
        }
    }
}

fn to_index(raw: i64, len: usize) -> Option<TerritoryIndex> {
    usize::try_from(raw).ok().filter(|&index| index < len)
}

/// `s`/`S` (sim) continues; anything else stops.
pub fn wants_to_continue(answer: &str) -> bool {
    matches!(answer.chars().next(), Some('s' | 'S'))
}
