//! Event loop feeding a [`QuizHost`].
//!
//! Countdown ticks, player commands and backend responses are serialized
//! through one `tokio::select!` loop, so the host never sees two events at once.
//! Backend calls run on spawned tasks and report back through a channel; the
//! loop itself never waits on the network.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::mpsc,
    time::{Interval, MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::{
    client::{
        QuizApi,
        supply::{QuestionSupply, load_questions},
    },
    host::QuizHost,
    quiz::{
        QuizEvent, Step,
        leaderboard::LeaderboardEntry,
        submission::{Ack, Completion},
    },
};

/// Period of one countdown unit.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Player commands accepted by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch questions and start (or restart) a session.
    Start,
    /// Answer the active question.
    Answer(usize),
    /// Skip the active question.
    Skip,
    /// Move past a resolved question.
    Next,
    /// Show the name prompt on the results screen.
    OpenNameEntry,
    /// Hide the name prompt.
    CloseNameEntry,
    /// Submit the score under this name.
    SubmitName(String),
    /// Load and show the leaderboard. Ignored while a session is played.
    ShowLeaderboard,
    /// Return to the start screen.
    BackToStart,
    /// Stop the driver.
    Quit,
}

/// Result of a spawned backend call, tagged with the generation it was issued under.
#[derive(Debug)]
enum Response {
    Submitted {
        generation: u64,
        result: Result<Ack, String>,
    },
    Questions {
        navigation: u64,
        supply: QuestionSupply,
    },
    Leaderboard {
        navigation: u64,
        result: Result<Vec<LeaderboardEntry>, String>,
    },
}

/// Owns a host and the backend it talks to.
pub struct QuizDriver {
    host: QuizHost,
    api: Arc<dyn QuizApi>,
    question_count: Option<usize>,
    /// Bumped by every navigation; question and leaderboard loads issued under
    /// an older value are dropped on arrival.
    navigation: u64,
}

impl QuizDriver {
    /// Driver for `host`; sessions request `question_count` questions when set.
    pub fn new(host: QuizHost, api: Arc<dyn QuizApi>, question_count: Option<usize>) -> Self {
        Self {
            host,
            api,
            question_count,
            navigation: 0,
        }
    }

    /// Run until [`Command::Quit`] arrives or the command channel closes.
    ///
    /// `render` is called after every change of the host. The host is handed back on exit.
    pub async fn run<F>(mut self, mut commands: mpsc::Receiver<Command>, mut render: F) -> QuizHost
    where
        F: FnMut(&mut QuizHost),
    {
        let mut ticker = interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let (responses_tx, mut responses) = mpsc::unbounded_channel::<Response>();

        render(&mut self.host);
        loop {
            tokio::select! {
                _ = ticker.tick(), if self.host.is_counting_down() => {
                    if self.host.handle(QuizEvent::Tick) != Step::Ignored {
                        render(&mut self.host);
                    }
                }
                command = commands.recv() => {
                    let Some(command) = command.filter(|command| *command != Command::Quit) else {
                        break;
                    };
                    self.apply(command, &mut ticker, &responses_tx);
                    render(&mut self.host);
                }
                Some(response) = responses.recv() => {
                    if self.receive(response, &mut ticker, &responses_tx) {
                        render(&mut self.host);
                    }
                }
            }
        }

        info!("quiz driver stopped");
        self.host
    }

    fn apply(
        &mut self,
        command: Command,
        ticker: &mut Interval,
        responses: &mpsc::UnboundedSender<Response>,
    ) {
        match command {
            Command::Start => {
                self.host.leave_results();
                let navigation = self.navigate();
                let api = self.api.clone();
                let count = self.question_count;
                spawn_response(responses, async move {
                    let supply = load_questions(api.as_ref(), count).await;
                    Response::Questions { navigation, supply }
                });
            }
            Command::Answer(option) => {
                self.host.handle(QuizEvent::SelectAnswer(option));
            }
            Command::Skip => {
                self.host.handle(QuizEvent::Skip);
            }
            Command::Next => {
                if let Step::Advanced { .. } = self.host.handle(QuizEvent::Advance) {
                    ticker.reset();
                }
            }
            Command::OpenNameEntry => self.host.open_name_entry(),
            Command::CloseNameEntry => self.host.close_name_entry(),
            Command::SubmitName(name) => {
                let Ok(ticket) = self.host.submit_name(&name) else {
                    return;
                };
                let generation = ticket.generation();
                let request = self.api.submit_result(ticket.entry().clone());
                spawn_response(responses, async move {
                    let result = request.await.map_err(|err| err.to_string());
                    Response::Submitted { generation, result }
                });
            }
            Command::ShowLeaderboard => {
                if !self.host.can_show_leaderboard() {
                    debug!("leaderboard requested during a session; ignoring");
                    return;
                }
                self.host.leave_results();
                self.request_leaderboard(responses);
            }
            Command::BackToStart => {
                self.navigate();
                self.host.back_to_start();
            }
            Command::Quit => {}
        }
    }

    /// Apply a backend response. Returns whether the host changed.
    fn receive(
        &mut self,
        response: Response,
        ticker: &mut Interval,
        responses: &mpsc::UnboundedSender<Response>,
    ) -> bool {
        match response {
            Response::Submitted { generation, result } => {
                match self.host.complete_submission(generation, result) {
                    Completion::Accepted(_) => {
                        self.request_leaderboard(responses);
                        true
                    }
                    Completion::Failed(_) => true,
                    Completion::Stale => false,
                }
            }
            Response::Questions { navigation, .. } | Response::Leaderboard { navigation, .. }
                if navigation != self.navigation =>
            {
                debug!(navigation, current = self.navigation, "discarding outdated load");
                false
            }
            Response::Questions { supply, .. } => {
                if let Err(err) = self.host.begin(supply) {
                    warn!(error = %err, "could not start quiz session");
                    return false;
                }
                ticker.reset();
                true
            }
            Response::Leaderboard { result, .. } => match result {
                Ok(entries) => self.host.show_leaderboard(entries),
                Err(message) => {
                    warn!(error = %message, "failed to load leaderboard");
                    self.host.leaderboard_unavailable(message);
                    true
                }
            },
        }
    }

    fn request_leaderboard(&mut self, responses: &mpsc::UnboundedSender<Response>) {
        let navigation = self.navigate();
        let request = self.api.list_leaderboard();
        spawn_response(responses, async move {
            let result = request.await.map_err(|err| err.to_string());
            Response::Leaderboard { navigation, result }
        });
    }

    fn navigate(&mut self) -> u64 {
        self.navigation += 1;
        self.navigation
    }
}

/// Run `work` on its own task and post its response back to the loop.
fn spawn_response<F>(responses: &mpsc::UnboundedSender<Response>, work: F)
where
    F: Future<Output = Response> + Send + 'static,
{
    let responses = responses.clone();
    tokio::spawn(async move {
        if responses.send(work.await).is_err() {
            debug!("driver gone before backend call finished");
        }
    });
}
