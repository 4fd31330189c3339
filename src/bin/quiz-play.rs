//! Terminal front-end: plays the UCL quiz against the HTTP backend.

use std::{
    env,
    io::{self, Write},
    sync::Arc,
};

use anyhow::Context;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ucl_quiz::{
    client::http::HttpQuizApi,
    host::{
        Notice, QuizHost, Screen,
        driver::{Command, QuizDriver},
    },
    quiz::{
        QuizSessionController, SessionPhase,
        clock::SystemClock,
        countdown::LOW_TIME_THRESHOLD,
        effects::{Cue, EffectError, Effects},
        scoring::{feedback_text, format_duration, score_message, star_count},
    },
};

const QUESTION_COUNT_ENV: &str = "UCL_QUIZ_QUESTION_COUNT";

const HELP: &str = "commands: start | 1-4 | skip | next | save | name <your name> | cancel | board | back | quit";

/// Rings the terminal bell on incorrect answers and in the low-time window.
struct BellEffects;

impl Effects for BellEffects {
    fn play(&self, cue: Cue) -> Result<(), EffectError> {
        if matches!(cue, Cue::Correct | Cue::Success) {
            return Ok(());
        }
        let mut stderr = io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|err| EffectError(err.to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let api = HttpQuizApi::from_env().context("building API client")?;
    let question_count = env::var(QUESTION_COUNT_ENV)
        .ok()
        .and_then(|value| value.parse::<usize>().ok());

    let controller = QuizSessionController::new(Arc::new(BellEffects), Arc::new(SystemClock));
    let driver = QuizDriver::new(QuizHost::new(controller), Arc::new(api), question_count);

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(read_commands(tx));

    let mut view = View::default();
    driver.run(rx, |host| view.render(host)).await;
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_command(&line) {
            Some(command) => {
                if tx.send(command).await.is_err() {
                    return;
                }
            }
            None => println!("{HELP}"),
        }
    }
    let _ = tx.send(Command::Quit).await;
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if let Some(name) = line.strip_prefix("name ") {
        return Some(Command::SubmitName(name.to_string()));
    }

    let command = match line.to_ascii_lowercase().as_str() {
        "start" | "s" | "restart" => Command::Start,
        "skip" => Command::Skip,
        "next" | "n" => Command::Next,
        "save" => Command::OpenNameEntry,
        "cancel" => Command::CloseNameEntry,
        "board" | "leaderboard" => Command::ShowLeaderboard,
        "back" => Command::BackToStart,
        "quit" | "q" => Command::Quit,
        digit => match digit.parse::<usize>() {
            Ok(choice @ 1..=4) => Command::Answer(choice - 1),
            _ => return None,
        },
    };
    Some(command)
}

/// Prints what changed since the previous render.
#[derive(Default)]
struct View {
    last_screen: Option<Screen>,
    last_phase: Option<SessionPhase>,
}

impl View {
    fn render(&mut self, host: &mut QuizHost) {
        for notice in host.drain_notices() {
            println!("! {}", notice_text(&notice));
        }

        let screen = host.screen();
        let phase = host.controller().phase();
        let screen_changed = self.last_screen != Some(screen);
        let previous = self.last_phase.replace(phase);
        self.last_screen = Some(screen);

        match screen {
            Screen::Start if screen_changed => {
                println!("\n=== UCL Champions League Quiz ===");
                println!("{HELP}");
            }
            Screen::Quiz => render_quiz(host, phase, previous),
            Screen::Results if screen_changed => render_results(host),
            Screen::Results if host.is_name_entry_open() => {
                println!("type `name <your name>` to save your score (max 15 characters)");
            }
            Screen::Leaderboard => {
                println!("\n=== Leaderboard ===");
                for (rank, entry) in host.leaderboard().iter().enumerate() {
                    println!(
                        "{:>2}. {:<15} {}/{}  {}",
                        rank + 1,
                        entry.player_name,
                        entry.score,
                        entry.total_questions,
                        format_duration(entry.time_in_seconds)
                    );
                }
                if host.leaderboard().is_empty() {
                    println!("no scores yet");
                }
            }
            _ => {}
        }
    }
}

fn render_quiz(host: &QuizHost, phase: SessionPhase, previous: Option<SessionPhase>) {
    let controller = host.controller();
    match phase {
        SessionPhase::Active { index, time_left } => {
            let fresh = !matches!(previous, Some(SessionPhase::Active { index: prev, .. }) if prev == index);
            if fresh {
                if let Some(question) = controller.current_question() {
                    println!(
                        "\nQuestion {}/{} [{}]  score {}",
                        index + 1,
                        controller.total_questions(),
                        question.difficulty(),
                        controller.score()
                    );
                    println!("{}", question.prompt());
                    for (i, option) in question.options().iter().enumerate() {
                        println!("  {}) {}", i + 1, option);
                    }
                }
            } else if time_left <= LOW_TIME_THRESHOLD {
                println!("  {time_left}s left");
            }
        }
        SessionPhase::Resolved { outcome, .. } if previous != Some(phase) => {
            if let Some(question) = controller.current_question() {
                println!("{:?}. {}", outcome, feedback_text(question));
            }
            let next = if controller.is_last_question() {
                "see results"
            } else {
                "next question"
            };
            println!("type `next` for the {next}");
        }
        _ => {}
    }
}

fn render_results(host: &QuizHost) {
    let Some(summary) = host.summary() else {
        return;
    };
    let stars = usize::from(star_count(summary.score, summary.total_questions));
    println!("\n=== Results ===");
    println!(
        "{}/{}  {}{}",
        summary.score,
        summary.total_questions,
        "*".repeat(stars),
        "-".repeat(5 - stars)
    );
    println!("time {}", format_duration(summary.time_in_seconds()));
    println!("{}", score_message(summary.score, summary.total_questions));
    println!("type `save` to enter the leaderboard, `start` to play again");
}

fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::BackupQuestions => "could not reach the server; playing the offline question set".into(),
        Notice::InvalidName(message) => message.clone(),
        Notice::ScoreSaved => "score saved".into(),
        Notice::SubmitFailed(message) => format!("could not save score ({message}); try again"),
        Notice::LeaderboardUnavailable(message) => format!("leaderboard unavailable ({message})"),
    }
}
