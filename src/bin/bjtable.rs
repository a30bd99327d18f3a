//! Interactive blackjack table.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use bjtable::snapshot;
use bjtable::{
    Action, ActionError, AlwaysStand, Command, Decider, Game, GameOptions, HandOutcome,
    RoundReport, SessionState, StandOnThreshold, TurnView, transition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Computers {
    /// Computer players always stand.
    AlwaysStand,
    /// Computer players draw to 17, like the dealer.
    DealerRule,
}

#[derive(Debug, Parser)]
#[command(name = "bjtable")]
#[command(about = "Play blackjack against the dealer alongside computer players")]
#[command(version)]
struct Cli {
    /// Number of seats at the table.
    #[arg(long, default_value_t = 3)]
    seats: usize,

    /// Minimum bet per round.
    #[arg(long, default_value_t = 10)]
    min_bet: usize,

    /// Number of decks in the shoe.
    #[arg(long, default_value_t = 6)]
    decks: u8,

    /// Money you start with.
    #[arg(long, default_value_t = 1000)]
    money: usize,

    /// Your name at the table.
    #[arg(long, default_value = "TheUser")]
    name: String,

    /// RNG seed for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// How computer players decide.
    #[arg(long, value_enum, default_value_t = Computers::AlwaysStand)]
    computers: Computers,

    /// Where saved games are written and read.
    #[arg(long, default_value = ".bjtable-save.json")]
    save_file: PathBuf,

    /// Resume the game stored in the save file.
    #[arg(long, conflicts_with = "defaults")]
    resume: bool,

    /// Start right away with the options given on the command line.
    #[arg(long)]
    defaults: bool,
}

impl Cli {
    fn options(&self) -> GameOptions {
        GameOptions::default()
            .with_seats(self.seats)
            .with_minimum_bet(self.min_bet)
            .with_decks(self.decks)
            .with_starting_money(self.money)
            .with_human_name(self.name.clone())
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        })
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let game = if cli.resume {
        File::open(&cli.save_file)
            .map_err(bjtable::SnapshotError::from)
            .and_then(|file| snapshot::load(BufReader::new(file)))
            .map_err(|err| err.to_string())
    } else {
        Game::new(cli.options(), cli.seed()).map_err(|err| err.to_string())
    };

    let mut game = match game {
        Ok(game) => game,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut computer: Box<dyn Decider> = match cli.computers {
        Computers::AlwaysStand => Box::new(AlwaysStand),
        Computers::DealerRule => Box::new(StandOnThreshold::default()),
    };

    println!("\n~~~~~~~~~~ Welcome to the Blackjack table! ~~~~~~~~~~\n");
    if !cli.resume && !cli.defaults {
        choose_options(&mut game, &cli);
    }
    print_menu();

    let mut state = SessionState::Running;
    while state == SessionState::Running {
        let Some(line) = prompt_line("(Blackjack)> ") else {
            state = transition(state, Command::Exit);
            continue;
        };
        if line.is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(_) => {
                println!("Invalid input. Press ? for help.");
                continue;
            }
        };

        match command {
            Command::Help => print_menu(),
            Command::Status => println!("{game}"),
            Command::PlayRound => play_round(&mut game, computer.as_mut()),
            Command::Pause => {
                println!("Game paused.");
                save(&game, &cli);
            }
            Command::Save => save(&game, &cli),
            Command::Restart => match game.restart() {
                Ok(()) => println!("New game started."),
                Err(err) => println!("Could not restart: {err}"),
            },
            Command::Options => choose_options(&mut game, &cli),
            Command::Exit => println!("\nExiting..."),
        }

        state = transition(state, command);
    }

    if state == SessionState::Paused {
        println!("Resume with --resume.");
    }
    ExitCode::SUCCESS
}

fn print_menu() {
    println!("---------- Menu ----------");
    for command in Command::ALL {
        println!("  {} -- {}", command.key(), command.describe());
    }
    println!();
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_lowercase()),
    }
}

fn save(game: &Game, cli: &Cli) {
    let result = File::create(&cli.save_file)
        .map_err(bjtable::SnapshotError::from)
        .and_then(|file| snapshot::save(game, BufWriter::new(file)));
    match result {
        Ok(()) => println!("Game saved to {}.", cli.save_file.display()),
        Err(err) => println!("Could not save: {err}"),
    }
}

fn choose_options(game: &mut Game, cli: &Cli) {
    let defaults = cli.options();
    let use_defaults = prompt_line("Use defaults? [y/n] > ").is_none_or(|a| a != "n");
    let options = if use_defaults {
        defaults
    } else {
        let name = prompt_line("What is your name? > ")
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| defaults.human_name.clone());
        let seats = prompt_line("Enter number of players > ")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seats);
        let minimum_bet = prompt_line("Enter minimum bet > $")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.minimum_bet);
        defaults
            .with_human_name(name)
            .with_seats(seats)
            .with_minimum_bet(minimum_bet)
    };

    match game.reconfigure(options) {
        Ok(()) => println!("New game started."),
        Err(err) => println!("Invalid options: {err}"),
    }
}

fn play_round(game: &mut Game, computer: &mut dyn Decider) {
    if game.table().interactive_player().is_none() {
        println!("You are no longer seated. Restart to play again.");
        return;
    }

    println!("...Dealing the round...");
    match game.play_round(&mut Prompt, computer) {
        Ok(report) => print_report(&report),
        Err(err) => println!("Round aborted: {err}. Bets were returned."),
    }
}

fn print_report(report: &RoundReport) {
    for (seat, name) in &report.vacated {
        println!("{name} (seat {seat}) is out of money!");
    }
    if report.dealer_blackjack {
        println!("Dealer has blackjack!");
    }
    println!("Dealer has: {}", report.dealer_score);
    for hand in &report.hands {
        match hand.outcome {
            HandOutcome::Win => println!("{} won ${}!", hand.player, hand.bet),
            HandOutcome::Push => println!("{} pushed.", hand.player),
            HandOutcome::Lose => println!("{} lost ${} :(", hand.player, hand.bet),
        }
    }
    println!("done.");
}

/// Asks the person at the keyboard.
struct Prompt;

impl Prompt {
    fn print_actions() {
        println!("---------- Options ----------");
        println!("  ? -- print this menu");
        println!("  g -- show your hand");
        println!("  h -- hit (draw another card)");
        println!("  s -- stand (move on to next player)");
        println!("  d -- double-down (double bet and take one hit)");
        println!("  x -- surrender (take 1/2 your bet and quit)");
        println!("  p -- split (if you have a pair)");
    }

    fn print_turn(view: &TurnView<'_>) {
        println!("########## It's your turn! ##########");
        println!("### Your hand is: {}", view.hand);
        if view.hand.has_pair() {
            println!("### You hold a pair, but this table does not split.");
        }
        if let Some(card) = view.dealer_up_card {
            println!("### Dealer shows: {card}");
        }
        println!("### Wallet ${}, bet ${}", view.player.wallet(), view.player.bet());
    }
}

impl Decider for Prompt {
    fn decide(&mut self, view: &TurnView<'_>) -> Action {
        Self::print_turn(view);
        Self::print_actions();
        loop {
            let Some(line) = prompt_line("(Blackjack)> ") else {
                return Action::Stand;
            };
            match line.as_str() {
                "" => {}
                "?" => Self::print_actions(),
                "g" => Self::print_turn(view),
                _ => match line.parse::<Action>() {
                    Ok(action) => return action,
                    Err(_) => println!("Invalid input."),
                },
            }
        }
    }

    fn rejected(&mut self, _view: &TurnView<'_>, action: Action, error: ActionError) {
        println!("Cannot {action}: {error}.");
    }
}
