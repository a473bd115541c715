//! Terminal chat session.
//!
//! One task owns the [`ChatController`] and reacts to every source of events in a single
//! `tokio::select!` loop: connection events, user input, the polling timer, poll results
//! and the typing idle deadline. Network requests run in spawned tasks and report back
//! over channels, so no controller state is ever shared.

use std::{sync::Arc, time::Duration};

use rustyline::{DefaultEditor, Event, EventHandler, error::ReadlineError};
use tokio::{
    sync::{mpsc, watch},
    time::{Instant, MissedTickBehavior},
};
use tsudoi_shared::time::{Clock, SystemClock};

use crate::{
    config::ClientConfig,
    domain::{CallType, ChatApi, ConnectionState, Connector, Navigator, Outgoing, PollBatch},
    error::ClientError,
    infrastructure::{ChatRoutes, HttpChatApi, WebSocketConnector, dto::conversion::decode_frame},
    usecase::{
        ChatController, ConnectionEvent, ConnectionSlot, ConnectionSupervisor,
        FetchNewMessagesUseCase, ReconnectPolicy, StartCallUseCase, ViewUpdate,
    },
};

use super::{
    formatter::MessageFormatter,
    prompt::{KeystrokeHandler, TerminalNavigator, redisplay_prompt},
};

/// Input from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A submitted line
    Line(String),
    /// An editing key was pressed in the composer
    Keystroke,
    /// The terminal was closed (Ctrl+C / Ctrl+D)
    Closed,
}

enum Flow {
    Continue,
    Quit,
}

pub struct ChatSession {
    controller: ChatController,
    routes: ChatRoutes,
    slot: ConnectionSlot,
    connector: Arc<dyn Connector>,
    reconnect: ReconnectPolicy,
    fetch_messages: Arc<FetchNewMessagesUseCase>,
    start_call: Arc<StartCallUseCase>,
    poll_interval: Duration,
    prompt: String,
    /// Origin of the monotonic milliseconds fed to the typing debounce
    started_at: Instant,
}

impl ChatSession {
    pub fn new(
        config: &ClientConfig,
        api: Arc<dyn ChatApi>,
        connector: Arc<dyn Connector>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let controller = ChatController::new(
            config.user_id,
            config.last_message_id,
            config.typing_idle,
            clock,
        );

        Self {
            controller,
            routes: config.routes.clone(),
            slot: ConnectionSlot::default(),
            connector,
            reconnect: config.reconnect,
            fetch_messages: Arc::new(FetchNewMessagesUseCase::new(api.clone())),
            start_call: Arc::new(StartCallUseCase::new(
                api,
                navigator,
                config.routes.clone(),
            )),
            poll_interval: config.poll_interval,
            prompt: session_prompt(config),
            started_at: Instant::now(),
        }
    }

    /// Run until the user quits, the input closes, or reconnecting gives up.
    pub async fn run(
        mut self,
        mut input_rx: mpsc::UnboundedReceiver<InputEvent>,
    ) -> Result<(), ClientError> {
        let url = self.routes.websocket_url()?;
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let (supervisor, state_rx) = ConnectionSupervisor::new(
            self.connector.clone(),
            url,
            self.reconnect,
            self.slot.clone(),
            events_tx,
        );
        let mut supervisor_task = tokio::spawn(supervisor.run());

        let (poll_tx, mut poll_rx) = mpsc::unbounded_channel::<PollBatch>();
        let mut poll_timer =
            tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        poll_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            let typing_deadline = self.typing_deadline();

            tokio::select! {
                Some(event) = events_rx.recv() => self.on_connection_event(event, &poll_tx),
                input = input_rx.recv() => {
                    let flow = match input {
                        Some(InputEvent::Line(line)) => self.on_line(&line, &state_rx).await,
                        Some(InputEvent::Keystroke) => {
                            self.on_keystroke().await;
                            Flow::Continue
                        }
                        Some(InputEvent::Closed) | None => Flow::Quit,
                    };
                    if let Flow::Quit = flow {
                        break Ok(());
                    }
                }
                _ = poll_timer.tick() => self.spawn_poll(&poll_tx),
                Some(batch) = poll_rx.recv() => {
                    for update in self.controller.apply_poll(batch) {
                        self.render(&update);
                    }
                }
                _ = sleep_until_deadline(typing_deadline) => self.on_typing_idle().await,
                joined = &mut supervisor_task => {
                    break match joined {
                        Ok(result) => result,
                        Err(e) => Err(ClientError::ConnectionError(e.to_string())),
                    };
                }
            }
        };

        supervisor_task.abort();
        self.slot.clear().await;
        result
    }

    // ========================================
    // Connection
    // ========================================

    fn on_connection_event(
        &mut self,
        event: ConnectionEvent,
        poll_tx: &mpsc::UnboundedSender<PollBatch>,
    ) {
        match event {
            ConnectionEvent::StateChanged(state) => {
                print!("{}", MessageFormatter::format_connection_state(state));
                redisplay_prompt(&self.prompt);
                if state == ConnectionState::Open {
                    tracing::info!("WebSocket connection established");
                    self.spawn_poll(poll_tx);
                }
            }
            ConnectionEvent::Frame(raw) => match decode_frame(&raw) {
                Ok(event) => {
                    for update in self.controller.handle_event(event) {
                        self.render(&update);
                    }
                }
                Err(e) => tracing::warn!("Dropping malformed frame: {}", e),
            },
        }
    }

    fn spawn_poll(&self, poll_tx: &mpsc::UnboundedSender<PollBatch>) {
        let fetch_messages = self.fetch_messages.clone();
        let last_id = self.controller.last_seen_id();
        let poll_tx = poll_tx.clone();
        tokio::spawn(async move {
            if let Some(batch) = fetch_messages.execute(last_id).await {
                poll_tx.send(batch).ok();
            }
        });
    }

    // ========================================
    // Input
    // ========================================

    async fn on_line(&mut self, line: &str, state_rx: &watch::Receiver<ConnectionState>) -> Flow {
        let line = line.trim();

        if self.controller.is_call_modal_open() {
            self.on_call_modal_input(line);
            return Flow::Continue;
        }

        match line {
            "/quit" => return Flow::Quit,
            "/call" => {
                self.controller.open_call_modal();
                print!("{}", MessageFormatter::format_call_modal());
            }
            "/status" => {
                let state = *state_rx.borrow();
                print!("{}", MessageFormatter::format_connection_state(state));
                if let Some(count) = self.controller.online_members() {
                    print!("{}", MessageFormatter::format_online_members(count));
                }
            }
            text => {
                self.controller.composer_mut().set(text);
                if let Some(sent) = self.controller.send_message() {
                    self.render(&sent.update);
                    deliver(&self.slot, sent.outgoing).await;
                }
                return Flow::Continue;
            }
        }

        redisplay_prompt(&self.prompt);
        Flow::Continue
    }

    fn on_call_modal_input(&mut self, line: &str) {
        if line == "close" {
            self.controller.close_call_modal();
        } else if let Some(call_type) = CallType::parse(line) {
            if let Some(call_type) = self.controller.select_call_type(call_type) {
                let start_call = self.start_call.clone();
                tokio::spawn(async move {
                    start_call.execute(call_type).await;
                });
            }
        } else {
            print!("{}", MessageFormatter::format_call_modal());
        }
        redisplay_prompt(&self.prompt);
    }

    async fn on_keystroke(&mut self) {
        if let Some(outgoing) = self.controller.keystroke(self.elapsed_millis()) {
            deliver(&self.slot, outgoing).await;
        }
    }

    async fn on_typing_idle(&mut self) {
        if let Some(outgoing) = self.controller.typing_idle(self.elapsed_millis()) {
            deliver(&self.slot, outgoing).await;
        }
    }

    fn elapsed_millis(&self) -> i64 {
        i64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(i64::MAX)
    }

    fn typing_deadline(&self) -> Option<Instant> {
        self.controller
            .typing_deadline()
            .and_then(|millis| u64::try_from(millis).ok())
            .map(|millis| self.started_at + Duration::from_millis(millis))
    }

    // ========================================
    // Output
    // ========================================

    fn render(&self, update: &ViewUpdate) {
        let routes = &self.routes;
        let formatted = MessageFormatter::format_update(update, |path| {
            routes
                .resolve(path)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| path.to_string())
        });
        print!("{}", formatted);
        redisplay_prompt(&self.prompt);
    }
}

async fn deliver(slot: &ConnectionSlot, outgoing: Outgoing) {
    if let Err(e) = slot.send(outgoing).await {
        tracing::warn!("Failed to send frame: {}", e);
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn session_prompt(config: &ClientConfig) -> String {
    format!("group-{}> ", config.routes.group_id())
}

/// Spawn a blocking thread for rustyline (synchronous readline)
fn spawn_readline(prompt: String, input_tx: mpsc::UnboundedSender<InputEvent>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                input_tx.send(InputEvent::Closed).ok();
                return;
            }
        };
        rl.bind_sequence(
            Event::Any,
            EventHandler::Conditional(Box::new(KeystrokeHandler::new(input_tx.clone()))),
        );

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(InputEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }

        input_tx.send(InputEvent::Closed).ok();
    });
}

/// Run the terminal chat client
pub async fn run_chat(config: ClientConfig) -> Result<(), ClientError> {
    let prompt = session_prompt(&config);
    let api: Arc<dyn ChatApi> = Arc::new(HttpChatApi::new(
        config.routes.clone(),
        config.cookie.clone(),
    ));
    let session = ChatSession::new(
        &config,
        api,
        Arc::new(WebSocketConnector),
        Arc::new(TerminalNavigator::new(prompt.clone())),
        Arc::new(SystemClock),
    );

    println!(
        "\nJoined group {} as user {}. Type messages and press Enter to send.\n\
         Commands: /call to start a call, /status, /quit to exit.\n",
        config.routes.group_id(),
        config.user_id
    );

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    spawn_readline(prompt, input_tx);

    session.run(input_rx).await
}
