//! Plain-text rendering of the header, menu and lineup table.

use std::io::{self, Write};

use chrono::NaiveDate;
use lineup_core::{Lineup, Position};

const WIDTH: usize = 64;
const TITLE: &str = "Baseball Team Manager";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Title banner with today's date and, when set, the next game date.
pub fn render_header(
    out: &mut impl Write,
    today: NaiveDate,
    game_date: Option<NaiveDate>,
) -> io::Result<()> {
    let rule = "=".repeat(WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{TITLE:^WIDTH$}")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "CURRENT DATE : {}", today.format(DATE_FORMAT))?;

    if let Some(game_date) = game_date {
        writeln!(out, "GAME DATE    : {}", game_date.format(DATE_FORMAT))?;
        if game_date > today {
            let days = (game_date - today).num_days();
            writeln!(out, "DAYS UNTIL GAME : {days}")?;
        }
    }

    writeln!(out, "{rule}")
}

/// Numbered menu options.
pub fn render_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "MENU OPTIONS")?;
    writeln!(out, "1 - Display lineup")?;
    writeln!(out, "2 - Add player")?;
    writeln!(out, "3 - Remove player")?;
    writeln!(out, "4 - Move player")?;
    writeln!(out, "5 - Edit player position")?;
    writeln!(out, "6 - Edit player stats")?;
    writeln!(out, "7 - Exit program")?;
    writeln!(out)
}

pub fn render_positions(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "POSITIONS")?;
    writeln!(out, "{}", Position::codes())?;
    writeln!(out)
}

/// Table of players with their 1-based batting order numbers.
pub fn render_lineup(out: &mut impl Write, lineup: &Lineup) -> io::Result<()> {
    if lineup.is_empty() {
        writeln!(out)?;
        writeln!(out, "Lineup is empty.")?;
        return writeln!(out);
    }

    let rule = "-".repeat(WIDTH);
    writeln!(out)?;
    writeln!(out, "Lineup")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "{:<3} {:<22} {:<4} {:>6} {:>6} {:>10}",
        "#", "Player", "POS", "AB", "H", "AVG"
    )?;
    writeln!(out, "{rule}")?;

    for (number, player) in (1..).zip(lineup) {
        writeln!(
            out,
            "{:<3} {:<22} {:<4} {:>6} {:>6} {:>10.3}",
            number,
            player.name(),
            player.position().code(),
            player.at_bats(),
            player.hits(),
            player.average()
        )?;
    }

    writeln!(out)
}
