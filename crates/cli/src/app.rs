use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use lineup_core::{Lineup, LineupStore, Player, Position, RosterError, RosterResult, Stats};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    console::{Console, PromptError, PromptResult},
    view,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Entries of the main menu, numbered 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Display,
    Add,
    Remove,
    Move,
    EditPosition,
    EditStats,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Display),
            "2" => Some(Self::Add),
            "3" => Some(Self::Remove),
            "4" => Some(Self::Move),
            "5" => Some(Self::EditPosition),
            "6" => Some(Self::EditStats),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Reasons a menu operation stopped before completing.
#[derive(Debug, Error)]
enum FlowError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("could not save lineup: {0:#}")]
    Persist(anyhow::Error),
}

impl From<RosterError> for FlowError {
    fn from(err: RosterError) -> Self {
        Self::Prompt(PromptError::Rejected(err))
    }
}

impl From<io::Error> for FlowError {
    fn from(err: io::Error) -> Self {
        Self::Prompt(PromptError::Io(err))
    }
}

type FlowResult<T> = Result<T, FlowError>;

enum Step {
    Continue,
    Exit,
}

/// Menu-driven lineup editor. Every successful change is written to the store
/// before the next menu is shown.
pub struct LineupApp<S, R, W> {
    store: S,
    lineup: Lineup,
    game_date: Option<NaiveDate>,
    console: Console<R, W>,
}

impl<S, R, W> LineupApp<S, R, W>
where
    S: LineupStore,
    R: BufRead,
    W: Write,
{
    pub fn new(store: S, input: R, output: W) -> Result<Self> {
        let players = store.load().context("failed to load lineup")?;
        let lineup = Lineup::new(players);
        info!("starting with {} players", lineup.len());
        Ok(Self {
            store,
            lineup,
            game_date: None,
            console: Console::new(input, output),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.game_date = match self.prompt_game_date() {
            Ok(date) => date,
            Err(PromptError::Closed) => None,
            Err(err) => return Err(err.into()),
        };

        loop {
            let today = Local::now().date_naive();
            view::render_header(self.console.out(), today, self.game_date)?;
            view::render_menu(self.console.out())?;

            let choice = match self.console.ask("Menu option: ") {
                Ok(reply) => MenuChoice::parse(&reply),
                Err(PromptError::Closed) => Some(MenuChoice::Exit),
                Err(err) => return Err(err.into()),
            };
            let Some(choice) = choice else {
                self.console.say("Invalid option. Choose 1-7.\n")?;
                continue;
            };

            if let Step::Exit = self.dispatch(choice)? {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Step> {
        debug!(?choice, "menu selection");
        let outcome = match choice {
            MenuChoice::Display => {
                view::render_lineup(self.console.out(), &self.lineup)?;
                return Ok(Step::Continue);
            }
            MenuChoice::Add => self.add_player(),
            MenuChoice::Remove => self.remove_player(),
            MenuChoice::Move => self.move_player(),
            MenuChoice::EditPosition => self.edit_position(),
            MenuChoice::EditStats => self.edit_stats(),
            MenuChoice::Exit => {
                self.exit()?;
                return Ok(Step::Exit);
            }
        };

        match outcome {
            Ok(message) => self.console.say(&format!("{message}\n"))?,
            Err(FlowError::Prompt(PromptError::Closed)) => {
                self.exit()?;
                return Ok(Step::Exit);
            }
            Err(FlowError::Prompt(PromptError::Io(err))) => return Err(err.into()),
            Err(err) => {
                debug!("{choice:?} rejected: {err}");
                self.console.error(&err.to_string())?;
            }
        }
        Ok(Step::Continue)
    }

    fn prompt_game_date(&mut self) -> PromptResult<Option<NaiveDate>> {
        loop {
            let reply = self
                .console
                .ask("Enter next game date (YYYY-MM-DD) or press Enter to skip: ")?;
            if reply.is_empty() {
                return Ok(None);
            }
            match NaiveDate::parse_from_str(&reply, DATE_FORMAT) {
                Ok(date) => return Ok(Some(date)),
                Err(_) => self.console.say("Invalid date format. Use YYYY-MM-DD.")?,
            }
        }
    }

    fn add_player(&mut self) -> FlowResult<String> {
        self.console.say("\nAdd Player")?;
        let name = self.console.ask_text("Name: ", "Name")?;
        view::render_positions(self.console.out())?;
        let position: Position = self.console.ask("Position: ")?.parse()?;
        let at_bats = self.console.ask_count("At-bats: ", "At-bats")?;
        let hits = self.console.ask_count("Hits: ", "Hits")?;
        let player = Player::new(&name, position, Stats::new(at_bats, hits)?)?;

        self.commit(|lineup| {
            lineup.push(player);
            Ok(())
        })?;
        Ok("Player added.".to_string())
    }

    fn remove_player(&mut self) -> FlowResult<String> {
        if self.lineup.is_empty() {
            return Ok("Lineup is empty.".to_string());
        }
        view::render_lineup(self.console.out(), &self.lineup)?;

        let len = self.lineup.len();
        let number = self
            .console
            .ask_number(&format!("Remove which player (1-{len}): "))?;
        let removed = self.commit(|lineup| lineup.remove(number))?;
        Ok(format!("Removed: {}", removed.name()))
    }

    fn move_player(&mut self) -> FlowResult<String> {
        if self.lineup.len() < 2 {
            return Ok("Need at least 2 players to move.".to_string());
        }
        view::render_lineup(self.console.out(), &self.lineup)?;

        let len = self.lineup.len();
        let from = self.console.ask_number(&format!("Move FROM (1-{len}): "))?;
        self.lineup.player(from)?;
        let to = self.console.ask_number(&format!("Move TO (1-{len}): "))?;
        self.commit(|lineup| lineup.move_player(from, to))?;
        Ok("Player moved.".to_string())
    }

    fn edit_position(&mut self) -> FlowResult<String> {
        if self.lineup.is_empty() {
            return Ok("Lineup is empty.".to_string());
        }
        view::render_lineup(self.console.out(), &self.lineup)?;

        let len = self.lineup.len();
        let number = self
            .console
            .ask_number(&format!("Edit position for (1-{len}): "))?;
        self.lineup.player(number)?;
        view::render_positions(self.console.out())?;
        let code = self.console.ask("New position: ")?;
        self.commit(|lineup| lineup.edit_position(number, &code))?;
        Ok("Position updated.".to_string())
    }

    fn edit_stats(&mut self) -> FlowResult<String> {
        if self.lineup.is_empty() {
            return Ok("Lineup is empty.".to_string());
        }
        view::render_lineup(self.console.out(), &self.lineup)?;

        let len = self.lineup.len();
        let number = self
            .console
            .ask_number(&format!("Edit stats for (1-{len}): "))?;
        self.lineup.player(number)?;
        let at_bats = self.console.ask_count("At-bats: ", "At-bats")?;
        let hits = self.console.ask_count("Hits: ", "Hits")?;
        self.commit(|lineup| lineup.edit_stats(number, at_bats, hits))?;
        Ok("Stats updated.".to_string())
    }

    /// Apply `change` and persist the result. The lineup is restored if the
    /// store rejects the write, so memory never runs ahead of disk.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Lineup) -> RosterResult<T>,
    ) -> FlowResult<T> {
        let previous = self.lineup.clone();
        let value = change(&mut self.lineup)?;
        if let Err(err) = self.store.save(&self.lineup.snapshot()) {
            warn!("failed to save lineup: {err:#}");
            self.lineup = previous;
            return Err(FlowError::Persist(err));
        }
        Ok(value)
    }

    fn exit(&mut self) -> Result<()> {
        self.store
            .save(&self.lineup.snapshot())
            .context("failed to save lineup on exit")?;
        self.console.say("Bye!")?;
        info!("exiting with {} players", self.lineup.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::{
        cell::{Cell, RefCell},
        io::Cursor,
        sync::{Arc, Mutex},
    };

    #[derive(Default)]
    struct MemoryStore {
        players: RefCell<Vec<Player>>,
        saves: Cell<usize>,
        fail: bool,
    }

    impl MemoryStore {
        fn with(players: Vec<Player>) -> Self {
            Self {
                players: RefCell::new(players),
                ..Self::default()
            }
        }

        fn failing(players: Vec<Player>) -> Self {
            Self {
                fail: true,
                ..Self::with(players)
            }
        }

        fn names(&self) -> Vec<String> {
            self.players
                .borrow()
                .iter()
                .map(|player| player.name().to_string())
                .collect()
        }
    }

    impl LineupStore for MemoryStore {
        fn load(&self) -> Result<Vec<Player>> {
            Ok(self.players.borrow().clone())
        }

        fn save(&self, players: &[Player]) -> Result<()> {
            if self.fail {
                bail!("disk full");
            }
            *self.players.borrow_mut() = players.to_vec();
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    type TestApp = LineupApp<MemoryStore, Cursor<Vec<u8>>, Vec<u8>>;

    fn player(name: &str, at_bats: i64, hits: i64) -> Player {
        Player::new(name, Position::Catcher, Stats::new(at_bats, hits).unwrap()).unwrap()
    }

    fn roster(names: &[&str]) -> Vec<Player> {
        names.iter().map(|name| player(name, 0, 0)).collect()
    }

    /// Run the app over `script`; the first line answers the game date prompt.
    fn run(store: MemoryStore, script: &str) -> (TestApp, Result<()>, String) {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut app = LineupApp::new(store, input, Vec::new()).unwrap();
        let result = app.run();
        let output = String::from_utf8(app.console.output.clone()).unwrap();
        (app, result, output)
    }

    #[test]
    fn menu_choice_parses_numbers() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Display));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[test]
    fn add_player_persists_and_exit_says_bye() {
        let (app, result, output) = run(MemoryStore::default(), "\n2\nAlex\nss\n10\n3\n7\n");
        result.unwrap();

        assert!(output.contains("Player added."));
        assert!(output.ends_with("Bye!\n"));

        let saved = app.store.players.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name(), "Alex");
        assert_eq!(saved[0].position(), Position::Shortstop);
        assert_eq!((saved[0].at_bats(), saved[0].hits()), (10, 3));
        assert_eq!(app.store.saves.get(), 2);
    }

    #[test]
    fn add_player_rejects_more_hits_than_at_bats() {
        let (app, result, output) = run(MemoryStore::default(), "\n2\nAlex\nSS\n5\n6\n7\n");
        result.unwrap();

        assert!(output.contains("Error: Hits cannot be greater than at-bats."));
        assert!(app.lineup.is_empty());
    }

    #[test]
    fn add_player_rejects_negative_at_bats_immediately() {
        let (app, result, output) = run(MemoryStore::default(), "\n2\nAlex\nSS\n-1\n7\n");
        result.unwrap();

        assert!(output.contains("Error: At-bats and hits cannot be negative."));
        assert!(!output.contains("Hits: "));
        assert!(app.lineup.is_empty());
    }

    #[test]
    fn invalid_menu_option_reprompts() {
        let (_, result, output) = run(MemoryStore::default(), "\n9\n7\n");
        result.unwrap();
        assert!(output.contains("Invalid option. Choose 1-7."));
        assert_eq!(output.matches("MENU OPTIONS").count(), 2);
    }

    #[test]
    fn display_shows_lineup_table() {
        let store = MemoryStore::with(vec![player("Alex", 10, 3)]);
        let (_, result, output) = run(store, "\n1\n7\n");
        result.unwrap();
        assert!(output.contains("Alex"));
        assert!(output.contains("0.300"));
    }

    #[test]
    fn remove_reports_removed_name() {
        let store = MemoryStore::with(roster(&["A", "B", "C"]));
        let (app, result, output) = run(store, "\n3\n2\n7\n");
        result.unwrap();

        assert!(output.contains("Removed: B"));
        assert_eq!(app.store.names(), ["A", "C"]);
    }

    #[test]
    fn remove_on_empty_lineup_skips_prompt() {
        let (_, result, output) = run(MemoryStore::default(), "\n3\n7\n");
        result.unwrap();
        assert!(output.contains("Lineup is empty."));
        assert!(!output.contains("Remove which player"));
    }

    #[test]
    fn move_player_uses_post_removal_order() {
        let store = MemoryStore::with(roster(&["A", "B", "C", "D"]));
        let (app, result, output) = run(store, "\n4\n1\n3\n7\n");
        result.unwrap();

        assert!(output.contains("Player moved."));
        assert_eq!(app.store.names(), ["B", "C", "A", "D"]);
    }

    #[test]
    fn move_needs_two_players() {
        let store = MemoryStore::with(roster(&["A"]));
        let (_, result, output) = run(store, "\n4\n7\n");
        result.unwrap();
        assert!(output.contains("Need at least 2 players to move."));
    }

    #[test]
    fn out_of_range_number_aborts_before_value_prompt() {
        let store = MemoryStore::with(roster(&["A"]));
        let (app, result, output) = run(store, "\n5\n9\n7\n");
        result.unwrap();

        assert!(output.contains("Error: Invalid player number 9. Choose a number from 1 to 1."));
        assert!(!output.contains("New position: "));
        assert_eq!(app.store.saves.get(), 1);
    }

    #[test]
    fn edit_position_normalizes_case() {
        let store = MemoryStore::with(roster(&["A"]));
        let (app, result, output) = run(store, "\n5\n1\nlf\n7\n");
        result.unwrap();

        assert!(output.contains("Position updated."));
        assert_eq!(app.lineup.player(1).unwrap().position(), Position::LeftField);
    }

    #[test]
    fn edit_stats_saves_new_totals() {
        let store = MemoryStore::with(vec![player("Alex", 10, 3), player("Bo", 0, 0)]);
        let (app, result, output) = run(store, "\n6\n2\n8\n2\n7\n");
        result.unwrap();

        assert!(output.contains("Stats updated."));
        let saved = app.store.players.borrow();
        assert_eq!((saved[1].at_bats(), saved[1].hits()), (8, 2));
        assert_eq!((saved[0].at_bats(), saved[0].hits()), (10, 3));
        assert_eq!(app.store.saves.get(), 2);
    }

    #[test]
    fn edit_stats_rejection_keeps_previous_stats() {
        let store = MemoryStore::with(vec![player("Alex", 10, 3)]);
        let (app, result, output) = run(store, "\n6\n1\n5\n6\n7\n");
        result.unwrap();

        assert!(output.contains("Error: Hits cannot be greater than at-bats."));
        let alex = app.lineup.player(1).unwrap();
        assert_eq!((alex.at_bats(), alex.hits()), (10, 3));
    }

    #[test]
    fn non_numeric_input_reports_parse_error() {
        let store = MemoryStore::with(roster(&["A"]));
        let (_, result, output) = run(store, "\n6\none\n7\n");
        result.unwrap();
        assert!(output.contains("Error: Player number must be a whole number, got 'one'."));
    }

    #[test]
    fn failed_save_rolls_back_and_continues() {
        let store = MemoryStore::failing(roster(&["A", "B"]));
        let (app, result, output) = run(store, "\n3\n1\n1\n7\n");

        assert!(output.contains("Error: could not save lineup: disk full"));
        assert!(!output.contains("Removed: A"));
        assert_eq!(app.lineup.len(), 2);
        assert_eq!(app.lineup.player(1).unwrap().name(), "A");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to save lineup on exit"));
        assert!(!output.contains("Bye!"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_save_is_logged_below_error_level() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let store = MemoryStore::failing(roster(&["A"]));
        let (_, _, output) = tracing::subscriber::with_default(subscriber, || {
            run(store, "\n3\n1\n")
        });

        assert_eq!(output.matches("could not save lineup").count(), 1);
        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("failed to save lineup: disk full"));
        assert!(!logs.contains("ERROR"));
    }

    #[test]
    fn end_of_input_saves_and_exits() {
        let store = MemoryStore::with(roster(&["A"]));
        let (app, result, output) = run(store, "\n2\nAlex\n");
        result.unwrap();

        assert!(output.ends_with("Bye!\n"));
        assert_eq!(app.store.names(), ["A"]);
        assert_eq!(app.store.saves.get(), 1);
    }

    #[test]
    fn game_date_is_reprompted_until_valid() {
        let (app, result, output) = run(MemoryStore::default(), "2026-13-40\n2099-01-01\n7\n");
        result.unwrap();

        assert!(output.contains("Invalid date format. Use YYYY-MM-DD."));
        assert_eq!(app.game_date, NaiveDate::from_ymd_opt(2099, 1, 1));
        assert!(output.contains("GAME DATE    : 2099-01-01"));
        assert!(output.contains("DAYS UNTIL GAME : "));
    }

    #[test]
    fn skipped_game_date_is_not_shown() {
        let (app, result, output) = run(MemoryStore::default(), "\n7\n");
        result.unwrap();

        assert_eq!(app.game_date, None);
        assert!(output.contains("CURRENT DATE : "));
        assert!(!output.contains("GAME DATE"));
    }
}
