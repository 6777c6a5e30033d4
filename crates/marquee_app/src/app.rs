use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use marquee_core::{update, AppState, AppViewModel, FeedKind, Msg, PageNumber, ViewProjection};
use marquee_engine::{ListingApi, ReqwestTransport};
use marquee_logging::{marquee_debug, marquee_info};

use crate::commands::{parse_command, Command, HELP};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render;

enum LoopEvent {
    Engine(Msg),
    Input(Command),
    Rejected(String),
}

/// Owns the one `AppState` instance; every transition goes through `dispatch`.
pub struct FeedController {
    state: AppState,
    runner: EffectRunner,
}

impl FeedController {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Applies one action and starts the fetches it asks for. Returns a view when something changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        marquee_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        changed.then(|| self.state.view())
    }

    pub fn projection(&self, kind: FeedKind) -> ViewProjection {
        self.state.projection(kind)
    }

    pub fn active_feed(&self) -> FeedKind {
        self.state.mode().kind()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(config.api_settings())?;
    let api = ListingApi::new(Arc::new(transport))
        .with_language(config.api.language.clone())
        .with_filters(config.browse_filters());

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();
    let engine_tx = event_tx.clone();
    let runner = EffectRunner::spawn(api, move |msg| {
        let _ = engine_tx.send(LoopEvent::Engine(msg));
    })?;
    let mut controller = FeedController::new(runner);
    spawn_input_reader(event_tx);

    marquee_info!("marquee started; base url {}", config.api.base_url);
    println!("{HELP}");
    if let Some(view) = controller.dispatch(Msg::RequestPage {
        feed: FeedKind::Browse,
        page: PageNumber::FIRST,
    }) {
        print_view(&view, &config.api.image_base_url);
    }

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            LoopEvent::Engine(msg) => msg,
            LoopEvent::Input(Command::Help) => {
                println!("{HELP}");
                continue;
            }
            LoopEvent::Input(Command::Quit) => break,
            LoopEvent::Input(command) => match command.into_msg(controller.state()) {
                Ok(Some(msg)) => msg,
                Ok(None) => continue,
                Err(err) => {
                    println!("rejected: {err}");
                    continue;
                }
            },
            LoopEvent::Rejected(reason) => {
                println!("{reason}");
                continue;
            }
        };
        if let Some(view) = controller.dispatch(msg) {
            print_view(&view, &config.api.image_base_url);
        }
    }

    let list = controller.projection(controller.active_feed());
    marquee_info!("marquee exiting with {} rows shown", list.items.len());
    Ok(())
}

/// Lines are parsed here; anything that depends on state is resolved by the loop.
fn spawn_input_reader(event_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match parse_command(&line) {
                Ok(Some(command)) => LoopEvent::Input(command),
                Ok(None) => continue,
                Err(err) => LoopEvent::Rejected(format!("rejected: {err}")),
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(LoopEvent::Input(Command::Quit));
    });
}

fn print_view(view: &AppViewModel, image_base: &str) {
    let mut out = io::stdout().lock();
    for line in render::render(view, image_base) {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}
