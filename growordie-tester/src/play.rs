//! Interactive console session.
use anyhow::Result;
use colored::Colorize;
use growordie_game::{
    GameEngine, Notification, Profile, ProfileStorage, SessionState, StatKind, Terminal,
};
use std::io::{BufRead, Write};

const HELP: &str = "Commands: water | sunlight | nutrients | rest | special | \
upgrade <strongRoots|wideLeaves|thickBark> | tip | reset | status | help | quit";

/// Where the console left off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaySummary {
    pub state: SessionState,
    pub profile: Profile,
    pub commands: usize,
}

/// Drive a session from line-based `input`, rendering to `out`.
///
/// The profile is written back through the engine's storage whenever a
/// command raises a notification that needs it.
pub fn run_console<S, R, W>(
    engine: &GameEngine<S>,
    seed: u64,
    input: R,
    out: &mut W,
) -> Result<PlaySummary>
where
    S: ProfileStorage,
    R: BufRead,
    W: Write,
{
    let mut session = engine.start_session(seed)?;
    let mut commands = 0;

    writeln!(out, "{}", "🌱 Grow or Die".bright_green().bold())?;
    writeln!(out, "{}", "==============".green())?;
    writeln!(out, "Seed {seed} | High score {}", session.high_score())?;
    writeln!(out, "{HELP}")?;
    render_state(out, session.state(), session.high_score())?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            "status" => {
                render_state(out, session.state(), session.high_score())?;
                continue;
            }
            _ => {}
        }

        commands += 1;
        let outcome = session.apply_str(command);
        for note in &outcome.notifications {
            render_notification(out, note)?;
        }
        engine.persist(&outcome.notifications, session.profile())?;

        if outcome.changed {
            render_state(out, session.state(), session.high_score())?;
        } else {
            writeln!(out, "{}", "Nothing happens.".dimmed())?;
        }
    }

    Ok(PlaySummary {
        state: session.state().clone(),
        profile: session.profile(),
        commands,
    })
}

fn stat_bar(value: i32) -> String {
    let filled = usize::try_from(value.clamp(0, 100) / 10).unwrap_or(0);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn render_state<W: Write>(out: &mut W, state: &SessionState, high_score: u32) -> Result<()> {
    let level = state.level();
    writeln!(out)?;
    writeln!(
        out,
        "{} {} | turn {} | score {} | best {}",
        level.icon,
        level.name.bold(),
        state.turns,
        state.score,
        high_score
    )?;
    for stat in StatKind::ALL {
        let value = state.stats.get(stat);
        let bar = stat_bar(value);
        let bar = if value < 20 {
            bar.red()
        } else if value < 50 {
            bar.yellow()
        } else {
            bar.green()
        };
        writeln!(out, "  {:<10} {bar} {value:>3}", stat.as_str())?;
    }
    if let Some(event) = state.active_event {
        let def = event.kind.def();
        writeln!(
            out,
            "  {} {} ({} turns left)",
            def.icon, def.text, event.remaining_turns
        )?;
    }
    match (level.special, state.special_cooldown) {
        (Some(tag), 0) => writeln!(out, "  Special {tag} ready")?,
        (Some(tag), turns) => writeln!(out, "  Special {tag} in {turns} turns")?,
        (None, _) => {}
    }
    if state.can_level_up() {
        writeln!(
            out,
            "  {}",
            "Ready to grow: upgrade strongRoots | wideLeaves | thickBark".bright_green()
        )?;
    } else if !state.is_max_level() && !state.is_over() {
        writeln!(
            out,
            "  Growth {}/{}",
            state.turns_in_level,
            level.turns_to_next
        )?;
    }
    match state.terminal {
        Terminal::Won => writeln!(out, "{}", "🌲 Your plant became an Ancient Tree!".bright_green())?,
        Terminal::Lost => writeln!(out, "{}", "🥀 Your plant withered. Type reset to try again.".red())?,
        Terminal::None => {}
    }
    Ok(())
}

fn render_notification<W: Write>(out: &mut W, note: &Notification) -> Result<()> {
    match note {
        Notification::EventStarted { icon, text, .. } => {
            writeln!(out, "{} {}", icon, text.bright_red())?;
        }
        Notification::EventEnded { kind } => {
            writeln!(out, "{}", format!("The {kind} has passed.").cyan())?;
        }
        Notification::SpecialEffectShown { text } => {
            writeln!(out, "{}", text.bright_magenta())?;
        }
        Notification::LevelUpAvailable => {
            writeln!(out, "{}", "✨ Your plant can grow!".bright_green())?;
        }
        Notification::RunEnded {
            won,
            score,
            high_score,
        } => {
            let verdict = if *won { "Victory" } else { "Game over" };
            writeln!(
                out,
                "{} | score {score} | high score {high_score}",
                verdict.bold()
            )?;
        }
        Notification::HighScoreUpdated { high_score } => {
            writeln!(out, "{}", format!("🏆 New high score: {high_score}").yellow())?;
        }
        Notification::TipShown { text } => {
            writeln!(out, "{}", text.bright_blue())?;
        }
    }
    Ok(())
}
