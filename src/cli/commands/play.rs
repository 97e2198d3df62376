//! Play command - Human against the trained learner on the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::Parser;

use super::train::train_learner;
use crate::{
    Error,
    cli::{config::LearnerArgs, output::render_board},
    learning::Learner,
    pipeline::TrainingConfig,
    tictactoe::{Game, GameStatus, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the learner after self-play training")]
pub struct PlayArgs {
    /// Self-play games before the first human game
    #[arg(long, short = 't', default_value_t = 15)]
    pub training_games: usize,

    /// Which player the human controls (`x` or `o`); X moves first
    #[arg(long, default_value_t = Player::X)]
    pub human: Player,

    /// Also reinforce the human's moves in the learner's pools
    #[arg(long)]
    pub credit_human: bool,

    #[command(flatten)]
    pub learner: LearnerArgs,
}

/// What the human typed at a move prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveInput {
    Position(usize),
    Quit,
}

/// Parse a 1-based cell number or a quit command.
fn parse_move(line: &str) -> Option<MoveInput> {
    let token = line.trim().to_ascii_lowercase();
    match token.as_str() {
        "q" | "quit" | "exit" => Some(MoveInput::Quit),
        _ => match token.parse::<usize>() {
            Ok(n @ 1..=9) => Some(MoveInput::Position(n - 1)),
            _ => None,
        },
    }
}

/// Read one line; `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Summary of a play session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games: usize,
    pub human_wins: usize,
    pub agent_wins: usize,
    pub draws: usize,
}

/// Play games against `learner` until the human quits or input ends.
pub fn play_session<R: BufRead, W: Write>(
    learner: &mut Learner,
    human: Player,
    input: &mut R,
    output: &mut W,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    loop {
        let Some(status) = play_one(learner, human, input, output)? else {
            break;
        };
        summary.games += 1;
        match status {
            GameStatus::Won(player) if player == human => {
                summary.human_wins += 1;
                writeln!(output, "You win!")?;
            }
            GameStatus::Won(_) => {
                summary.agent_wins += 1;
                writeln!(output, "The computer wins.")?;
            }
            GameStatus::Exhausted => {
                summary.draws += 1;
                writeln!(output, "The computer has no moves left: stalemate.")?;
            }
            _ => {
                summary.draws += 1;
                writeln!(output, "It's a draw.")?;
            }
        }

        write!(output, "Play again? [y/n] ")?;
        output.flush()?;
        match read_line(input)? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    writeln!(
        output,
        "Games: {}  You: {}  Computer: {}  Draws: {}",
        summary.games, summary.human_wins, summary.agent_wins, summary.draws
    )?;
    Ok(summary)
}

/// Play a single game; `None` if the human quit before it finished.
fn play_one<R: BufRead, W: Write>(
    learner: &mut Learner,
    human: Player,
    input: &mut R,
    output: &mut W,
) -> Result<Option<GameStatus>> {
    let mut game = Game::new(learner);
    let mut player = Player::X;

    while !game.is_game_over() {
        if player == human {
            writeln!(output, "{}", render_board(&game.current()?))?;
            write!(output, "Your move ({human}), 1-9: ")?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            let position = match parse_move(&line) {
                Some(MoveInput::Position(position)) => position,
                Some(MoveInput::Quit) => return Ok(None),
                None => {
                    writeln!(output, "Enter a number from 1 to 9.")?;
                    continue;
                }
            };
            match game.play_at(human, position) {
                Ok(_) => {}
                Err(Error::CellOccupied { .. }) => {
                    writeln!(output, "That cell is taken.")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            match game.play(player) {
                Ok(_) => {
                    if let Some(ply) = game.history().last() {
                        writeln!(output, "Computer plays {}.", ply.position + 1)?;
                    }
                }
                Err(Error::MoveExhausted { .. }) => break,
                Err(err) => return Err(err.into()),
            }
        }
        player = player.opponent();
    }

    writeln!(output, "{}", render_board(&game.current()?))?;
    let status = game.status();
    if !status.is_over() {
        bail!("game stopped while still in progress");
    }
    Ok(Some(status))
}

/// Build and train the learner for a human session.
///
/// Self-play training follows the configured replay rule; the human games
/// afterwards credit only the agent's moves unless `--credit-human` is set.
pub fn prepare_learner(args: &PlayArgs) -> Result<Learner> {
    let mut learner = Learner::new(args.learner.resolve()?);

    if args.training_games > 0 {
        let config = TrainingConfig {
            num_games: args.training_games,
            first_player: Player::X,
        };
        let result = train_learner(&mut learner, config, None, false, args.training_games)?;
        println!(
            "Trained on {} self-play games (X {} / O {} / draws {}).",
            result.total_games, result.x_wins, result.o_wins, result.draws
        );
    }

    learner.set_reinforce_both_players(args.credit_human);
    Ok(learner)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut learner = prepare_learner(&args)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    play_session(&mut learner, args.human, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
