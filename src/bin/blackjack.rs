// src/bin/blackjack.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use blackjack_engine::api::{
    parse_action, parse_bet, parse_menu, parse_yes_no, BetCommand, MenuCommand,
};
use blackjack_engine::domain::{Card, Chips, Hand};
use blackjack_engine::engine::{Outcome, PlayerAction, RoundStatus, RoundSummary};
use blackjack_engine::infra::{GameConfig, GameRng, JsonFileStore, DEFAULT_SAVE_FILE};
use blackjack_engine::Session;
use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use tracing_subscriber::EnvFilter;

type GameSession = Session<JsonFileStore, GameRng>;

const BANNER: &str = r#"
    _ _ _ ____ _    ____ ____ _  _ ____    ___ ____
    | | | |___ |    |    |  | |\/| |___     |  |  |
    |_|_| |___ |___ |___ |__| |  | |___     |  |__|

        ,-,---. .              ,-_/
         '|___/ |  ,-. ,-. . , '  | ,-. ,-. . ,
-- -- -- ,|   \ |  ,-| |   |/     | ,-| |   |/ -- -- --
        `-^---' `' `-^ `-' |\     | `-^ `-' |\
                               `--'
"#;

/// Terminal blackjack against the house.
#[derive(Debug, Parser)]
#[command(name = "blackjack", about = "Terminal blackjack with a persistent wallet")]
struct Args {
    /// Where the wallet and high score are stored.
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    save_file: PathBuf,

    /// Seed for a reproducible shoe.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause per dot while the dealer is "thinking", in milliseconds.
    #[arg(long, default_value_t = 400)]
    delay_ms: u64,

    /// Skip all pauses.
    #[arg(long)]
    no_delay: bool,
}

impl Args {
    fn into_config(self) -> GameConfig {
        GameConfig {
            save_path: self.save_file,
            dealer_delay_ms: if self.no_delay { 0 } else { self.delay_ms },
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn main() -> io::Result<()> {
    init_tracing();

    let config = Args::parse().into_config();
    let store = JsonFileStore::new(config.save_path.clone());
    let rng = GameRng::from_seed(config.seed);
    let mut session = Session::open(store, rng, &config);

    main_menu(&mut session, &config)
}

/// Logs go to stderr and are off below `error` unless RUST_LOG says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main_menu(session: &mut GameSession, config: &GameConfig) -> io::Result<()> {
    loop {
        clear_screen()?;
        draw_banner();

        println!("\nWelcome to the Casino!");
        for (i, cmd) in MenuCommand::ALL.iter().enumerate() {
            println!("  {}) {}", i + 1, cmd.label());
        }

        let Some(input) = prompt("\nChoose an option:")? else {
            return Ok(());
        };

        match parse_menu(&input) {
            Ok(MenuCommand::NewGame) => {
                session.new_game();
                report_save_error(session);
                play(session, config)?;
            }
            Ok(MenuCommand::LoadGame) => {
                session.resume();
                play(session, config)?;
            }
            Ok(MenuCommand::ShowHighScore) => {
                println!(
                    "\n{}",
                    format!("Your High Score: {}", session.high_score()).yellow()
                );
                if prompt("Press Enter to return to menu...")?.is_none() {
                    return Ok(());
                }
            }
            Ok(MenuCommand::Quit) => return Ok(()),
            Err(e) => {
                println!("{}", e.to_string().red());
                pause(Duration::from_secs(1), config);
            }
        }
    }
}

/// Round loop. Returns when the player bets 0, declines another round or closes stdin.
fn play(session: &mut GameSession, config: &GameConfig) -> io::Result<()> {
    loop {
        clear_screen()?;
        draw_banner();

        println!(
            "\n{}",
            format!("Current Wallet: {}", session.wallet()).green().bold()
        );

        if session.ensure_funds() {
            println!(
                "\n{}",
                format!("You're out of money! Resetting to {}.", session.wallet()).red()
            );
            report_save_error(session);
            pause(Duration::from_secs(2), config);
        }

        let Some(bet) = ask_bet(session, config)? else {
            break;
        };

        let status = match session.start_round(bet) {
            Ok(status) => status,
            Err(e) => {
                println!("{}", format!("Round cancelled: {e}").red());
                report_save_error(session);
                pause(Duration::from_secs(2), config);
                continue;
            }
        };

        if let Some(up) = session.table().dealer_up_card() {
            println!("\nDealer shows: {}", paint_card(&up));
        }
        draw_line();
        println!("Your hand:   {}", paint_hand(&session.player().hand.cards));
        draw_line();

        match player_turn(session, status)? {
            TurnEnd::Finished(summary) => show_result(&summary, config),
            TurnEnd::Voided => {
                report_save_error(session);
                pause(Duration::from_secs(2), config);
                continue;
            }
            TurnEnd::InputClosed => return finish(session),
        }
        report_save_error(session);

        if !ask_yes_no("\nPlay another round? (y/n)")? {
            break;
        }
    }

    finish(session)
}

fn ask_bet(session: &GameSession, config: &GameConfig) -> io::Result<Option<Chips>> {
    loop {
        let label = format!(
            "\nHow much do you want to bet? (or 0 to quit) [{}]:",
            config.default_bet.0
        );
        let Some(input) = prompt(&label)? else {
            return Ok(None);
        };
        match parse_bet(&input, session.wallet(), config.default_bet) {
            Ok(BetCommand::Place(bet)) => return Ok(Some(bet)),
            Ok(BetCommand::Quit) => return Ok(None),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

/// How the player's turn ended.
enum TurnEnd {
    Finished(RoundSummary),
    /// The engine failed and the round was voided with the stake refunded.
    Voided,
    InputClosed,
}

/// Ask for decisions until the round is finished.
fn player_turn(session: &mut GameSession, mut status: RoundStatus) -> io::Result<TurnEnd> {
    loop {
        if let RoundStatus::Finished(summary) = status {
            return Ok(TurnEnd::Finished(summary));
        }

        let legal = session.legal_actions();
        let choices: Vec<String> = legal
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}) {}", i + 1, a.label().bold()))
            .collect();
        let label = format!("\nWhat would you like to do? {}", choices.join("  "));
        let Some(input) = prompt(&label)? else {
            return Ok(TurnEnd::InputClosed);
        };

        let action = match parse_action(&input, &legal) {
            Ok(a) => a,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        status = match session.apply_action(action) {
            Ok(s) => s,
            Err(e) => {
                println!(
                    "{}",
                    format!("Round cancelled: {e}. Your bet was returned.").red()
                );
                return Ok(TurnEnd::Voided);
            }
        };

        if action == PlayerAction::Double {
            println!(
                "\n{}",
                format!("Bet increased to {}!", session.table().current_bet()).yellow()
            );
        }
        if action != PlayerAction::Stay {
            println!("Your hand:   {}", paint_hand(&session.player().hand.cards));
            draw_line();
        }
    }
}

fn show_result(summary: &RoundSummary, config: &GameConfig) {
    if summary.dealer_played {
        replay_dealer(summary, config);
    }

    if summary.player_bust() {
        println!("\n{}", "Bust! You lose.".red().bold());
        return;
    }

    println!("\n{}", "--- Final Score ---".bold());
    println!("You:    {}", summary.player_total);
    println!("Dealer: {}", summary.dealer_total);

    let message = match summary.outcome {
        Outcome::Blackjack => format!("BLACKJACK! ♠ Payout: +{}", summary.net())
            .yellow()
            .bold(),
        Outcome::PlayerWins => format!("YOU WIN! +{}", summary.net()).green().bold(),
        Outcome::DealerWins => format!("DEALER WINS! -{}", summary.bet).red().bold(),
        Outcome::Push => "PUSH (TIE)".to_string().yellow().bold(),
    };
    println!("\n{message}");

    if summary.new_high_score {
        println!("{}", "New High Score!".bold());
    }
    draw_line();
}

/// Show the dealer turn card by card with the cosmetic pause.
fn replay_dealer(summary: &RoundSummary, config: &GameConfig) {
    let opening = summary.dealer_cards.len().min(2);
    println!("\nDealer's hand: {}", paint_hand(&summary.dealer_cards[..opening]));

    for shown in opening + 1..=summary.dealer_cards.len() {
        print!("{}", "Dealer thinking".yellow());
        for _ in 0..3 {
            print!("{}", ".".yellow());
            let _ = io::stdout().flush();
            pause(config.dealer_delay(), config);
        }
        println!();

        let card = &summary.dealer_cards[shown - 1];
        println!("Dealer hits and gets: {}", paint_card(card));
        println!("Dealer's hand: {}", paint_hand(&summary.dealer_cards[..shown]));
        draw_line();
    }
}

fn finish(session: &mut GameSession) -> io::Result<()> {
    clear_screen()?;
    if session.table().round_in_progress() {
        if let Ok(refund) = session.abandon_round() {
            println!("Round left unfinished, {refund} returned to your wallet.");
        }
        report_save_error(session);
    }
    if let Err(e) = session.save() {
        println!("{}", format!("Could not save your progress: {e}").red());
    }
    println!(
        "\nThanks for playing! Final wallet: {}",
        session.wallet().to_string().green().bold()
    );
    draw_line();
    Ok(())
}

fn report_save_error(session: &mut GameSession) {
    if let Some(e) = session.take_save_error() {
        println!("{}", format!("Could not save your progress: {e}").red());
    }
}

fn ask_yes_no(label: &str) -> io::Result<bool> {
    loop {
        let Some(input) = prompt(label)? else {
            return Ok(false);
        };
        match parse_yes_no(&input) {
            Ok(answer) => return Ok(answer),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

/// Print a prompt and read one line. `None` on end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label} ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn pause(duration: Duration, config: &GameConfig) {
    if config.dealer_delay_ms > 0 {
        sleep(duration);
    }
}

fn clear_screen() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

fn draw_banner() {
    println!("{}", "*".repeat(60).blue().bold());
    println!("{BANNER}");
    println!("{}", "*".repeat(60).blue().bold());
}

fn draw_line() {
    println!("{}", "-".repeat(40).blue());
}

fn paint_card(card: &Card) -> String {
    if card.suit.is_red() {
        card.to_string().red().to_string()
    } else {
        card.to_string().green().to_string()
    }
}

fn paint_hand(cards: &[Card]) -> String {
    let total = Hand::from_cards(cards.to_vec()).value();
    let painted: Vec<String> = cards.iter().map(paint_card).collect();
    format!(
        "{} {}",
        painted.join(", "),
        format!("(Total: {total})").yellow()
    )
}
