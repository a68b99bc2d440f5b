//! The event loop: draw, then react to keys, position fixes and ticks.

use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::{ApiClient, NewPlace, PlaceUpdate};
use crate::args::Args;
use crate::config::Settings;
use crate::error::{CoreError, RuntimeResult};
use crate::events::{self, Action};
use crate::location::{
    CoordsFileSource, FixedSource, LocationError, LocationTracker, WatchOptions,
};
use crate::nav::{NavPage, PageRequest};
use crate::session::{NoSessionCause, SessionOutcome, SessionStore};
use crate::state::{AppState, Coordinate, Session};
use crate::{app::terminal, ui};

/// Cadence of the housekeeping tick (banner expiry).
const TICK: Duration = Duration::from_millis(200);

/// Everything the action handlers need besides the state itself.
struct Runtime {
    api: ApiClient,
    store: SessionStore,
    settings: Settings,
    coords_override: Option<std::path::PathBuf>,
    fix_tx: mpsc::UnboundedSender<Result<Coordinate, LocationError>>,
    tracker: Option<LocationTracker>,
}

/// Run the application to completion.
///
/// # Errors
/// Terminal setup/teardown and draw failures; everything else is handled in
/// the loop and surfaced as modals.
pub async fn run(args: Args) -> RuntimeResult<()> {
    let settings = Settings::load();
    let server_url = args
        .server_url
        .clone()
        .unwrap_or_else(|| settings.server_url.clone());

    let store = match &args.session_file {
        Some(path) => SessionStore::at(path.clone()),
        None => SessionStore::open_default(),
    };
    let mut state = AppState::new(settings.initial_sort_order());

    let outcome = store.open_session();
    if let SessionOutcome::Active(session) = &outcome {
        state.ctx.set_session(session.clone());
    }
    if let SessionOutcome::NoSession(NoSessionCause::StorageUnavailable { reason }) = &outcome {
        state.show_alert(CoreError::StorageUnavailable {
            reason: reason.clone(),
        }
        .to_string());
    }
    state.navigator.resolve(&outcome);

    let (fix_tx, mut fix_rx) = mpsc::unbounded_channel();
    let mut runtime = Runtime {
        api: ApiClient::new(server_url),
        store,
        settings,
        coords_override: args.coords_file.clone(),
        fix_tx,
        tracker: None,
    };
    if state.ctx.has_session() {
        runtime.start_tracking();
        refresh(&mut state, &runtime).await;
    }

    let mut key_rx = spawn_key_reader();
    let mut terminal = terminal::setup()?;
    let result = event_loop(&mut terminal, &mut state, &mut runtime, &mut key_rx, &mut fix_rx).await;
    terminal::restore()?;
    if let Some(tracker) = runtime.tracker.take() {
        tracker.stop();
    }
    result
}

/// Read crossterm events on a dedicated thread so the async loop never
/// blocks on the terminal.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match crossterm::event::poll(Duration::from_millis(50)) {
            Ok(true) => match crossterm::event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "[Input] read failed");
                    break;
                }
            },
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "[Input] poll failed");
                break;
            }
        }
    });
    rx
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    runtime: &mut Runtime,
    key_rx: &mut mpsc::UnboundedReceiver<Event>,
    fix_rx: &mut mpsc::UnboundedReceiver<Result<Coordinate, LocationError>>,
) -> RuntimeResult<()> {
    let mut tick = tokio::time::interval(TICK);
    loop {
        terminal.draw(|f| ui::draw(f, state))?;
        tokio::select! {
            Some(ev) = key_rx.recv() => {
                if let Event::Key(key) = ev {
                    if key.kind == KeyEventKind::Press {
                        let action = events::handle_key(state, key);
                        apply_action(state, runtime, action).await;
                    }
                }
            }
            Some(outcome) = fix_rx.recv() => {
                handle_fix(state, runtime, outcome).await;
            }
            _ = tick.tick() => {
                state.expire_banner(Instant::now());
            }
        }
        if state.should_quit {
            return Ok(());
        }
    }
}

/// A fix updates the context and, on the list or map, the derived rows. A
/// location error surfaces once as an alert; the watch keeps running.
async fn handle_fix(
    state: &mut AppState,
    runtime: &Runtime,
    outcome: Result<Coordinate, LocationError>,
) {
    match outcome {
        Ok(fix) => {
            state.ctx.update_location(fix);
            let on_geo_page = matches!(
                state.navigator.current().map(|c| c.page),
                Some(NavPage::ReminderList | NavPage::MapView)
            );
            if on_geo_page {
                refresh(state, runtime).await;
            }
        }
        Err(e) => {
            state.show_alert(
                CoreError::Location {
                    code: e.code,
                    message: e.message,
                }
                .to_string(),
            );
        }
    }
}

/// Re-resolve the display rows through the cache.
async fn refresh(state: &mut AppState, runtime: &Runtime) {
    let Some(user_id) = state.ctx.user_id().map(str::to_string) else {
        state.set_display(Vec::new());
        return;
    };
    let location = state.ctx.location().copied();
    match state
        .cache
        .display_places(&runtime.api, &user_id, location.as_ref(), state.order)
        .await
    {
        Ok(rows) => state.set_display(rows),
        Err(e) => {
            state.set_display(Vec::new());
            state.show_alert(e.to_string());
        }
    }
}

async fn apply_action(state: &mut AppState, runtime: &mut Runtime, action: Action) {
    match action {
        Action::None => {}
        Action::Quit => state.should_quit = true,
        Action::Refresh => refresh(state, runtime).await,
        Action::Navigate(request) => {
            navigate(state, runtime, request).await;
        }
        Action::SubmitLogin => submit_login(state, runtime).await,
        Action::SubmitRegister => submit_register(state, runtime).await,
        Action::SubmitAddPlace => submit_add_place(state, runtime).await,
        Action::SubmitEditPlace => submit_edit_place(state, runtime).await,
        Action::TogglePlace { place_id, disabled } => {
            toggle_place(state, runtime, &place_id, disabled).await;
        }
        Action::DeletePlace { place_id } => delete_place(state, runtime, &place_id).await,
        Action::Logout => logout(state, runtime).await,
        Action::ToggleOrder => {
            state.order = state.order.toggled();
            refresh(state, runtime).await;
        }
    }
}

/// Apply a navigation request, then refresh pages that show place data.
async fn navigate(state: &mut AppState, runtime: &Runtime, request: PageRequest) {
    let has_banner = request.success_banner.is_some();
    let page = request.page;
    state
        .navigator
        .navigate(request, &mut state.cache, &mut state.ctx);
    if has_banner {
        state.arm_banner();
    }
    if matches!(page, NavPage::ReminderList | NavPage::MapView | NavPage::EvBattery) {
        refresh(state, runtime).await;
    }
}

async fn submit_login(state: &mut AppState, runtime: &mut Runtime) {
    let (name, password) = (
        state.login_form.username.trim().to_string(),
        state.login_form.password.clone(),
    );
    match runtime.api.login(&name, &password).await {
        Ok(user) => {
            let session = Session {
                user_id: user.id,
                user_name: user.name,
            };
            if let Err(e) = runtime.store.save_session(&session) {
                // Best-effort persistence: the in-memory session still works.
                tracing::warn!(error = %e, "[Session] could not persist login");
            }
            state.ctx.set_session(session);
            state.login_form.reset();
            if runtime.tracker.is_none() {
                runtime.start_tracking();
            }
            navigate(
                state,
                runtime,
                PageRequest::to(NavPage::ReminderList)
                    .with_banner("Login Success")
                    .with_force_fetch(),
            )
            .await;
        }
        Err(e) => state.show_alert(e.user_message()),
    }
}

async fn submit_register(state: &mut AppState, runtime: &Runtime) {
    let (name, password) = (
        state.register_form.username.trim().to_string(),
        state.register_form.password.clone(),
    );
    match runtime.api.register(&name, &password).await {
        Ok(user) => {
            state.register_form.reset();
            state.login_form.reset();
            state.login_form.username = user.name;
            navigate(
                state,
                runtime,
                PageRequest::to(NavPage::Login).with_banner("Register Success"),
            )
            .await;
        }
        Err(e) => state.show_alert(e.user_message()),
    }
}

async fn submit_add_place(state: &mut AppState, runtime: &Runtime) {
    let Some(user_id) = state.ctx.user_id().map(str::to_string) else {
        state.show_alert(CoreError::NoUser.to_string());
        return;
    };
    let Some((name, latitude, longitude)) = state.add_form.validated() else {
        return;
    };
    let form = &state.add_form;
    let payload = NewPlace {
        name,
        latitude,
        longitude,
        reminder_message: non_blank(&form.message),
        reminder_date: non_blank(&form.date),
        is_disable: !form.auto_activate,
        user_id,
    };
    match runtime.api.create_place(&payload).await {
        Ok(_) => {
            state.add_form.reset();
            navigate(
                state,
                runtime,
                PageRequest::to(NavPage::ReminderList)
                    .with_banner("Create Success")
                    .with_force_fetch(),
            )
            .await;
        }
        Err(e) => state.show_alert(e.user_message()),
    }
}

/// Submit the prefilled add form as an edit; the server's confirmed record
/// is written through into the held list.
async fn submit_edit_place(state: &mut AppState, runtime: &Runtime) {
    let Some(id) = state.add_form.editing_id.clone() else {
        return;
    };
    let Some((name, latitude, longitude)) = state.add_form.validated() else {
        return;
    };
    let form = &state.add_form;
    let update = PlaceUpdate {
        id,
        name: Some(name),
        latitude,
        longitude,
        reminder_message: non_blank(&form.message),
        reminder_date: non_blank(&form.date),
        is_disable: Some(!form.auto_activate),
    };
    match runtime.api.update_place(&update).await {
        Ok(updated) => {
            state.cache.apply_update(updated);
            state.add_form.reset();
            navigate(
                state,
                runtime,
                PageRequest::to(NavPage::ReminderList).with_banner("Update Success"),
            )
            .await;
        }
        Err(e) => state.show_alert(e.user_message()),
    }
}

async fn toggle_place(state: &mut AppState, runtime: &Runtime, place_id: &str, disabled: bool) {
    let update = PlaceUpdate {
        id: place_id.to_string(),
        is_disable: Some(disabled),
        ..PlaceUpdate::default()
    };
    match runtime.api.update_place(&update).await {
        Ok(updated) => {
            state.cache.apply_update(updated);
            refresh(state, runtime).await;
        }
        Err(e) => state.show_alert(e.user_message()),
    }
}

async fn delete_place(state: &mut AppState, runtime: &Runtime, place_id: &str) {
    match runtime.api.delete_place(place_id).await {
        Ok(()) => {
            state.cache.remove_place(place_id);
            navigate(
                state,
                runtime,
                PageRequest::to(NavPage::ReminderList).with_banner("Delete Success"),
            )
            .await;
        }
        Err(e) => state.show_alert(e.user_message()),
    }
}

/// Clear the persisted record, stop the watch and land on Login (which
/// drops the in-memory session and the cache).
async fn logout(state: &mut AppState, runtime: &mut Runtime) {
    if let Err(e) = runtime.store.clear_session() {
        tracing::warn!(error = %e, "[Session] could not clear persisted session");
    }
    if let Some(tracker) = runtime.tracker.take() {
        tracker.stop();
    }
    state.login_form.reset();
    navigate(state, runtime, PageRequest::to(NavPage::Login)).await;
}

impl Runtime {
    /// Start the position watch from whichever source is configured: the
    /// coordinates file (flag wins over settings), else a fixed coordinate.
    /// With neither configured there is no watch and distances stay zero.
    fn start_tracking(&mut self) {
        let options = WatchOptions::default();
        let poll = self.settings.poll_interval();
        let coords_file = self
            .coords_override
            .clone()
            .or_else(|| self.settings.coords_file.clone());
        if let Some(path) = coords_file {
            self.tracker = Some(LocationTracker::start(
                CoordsFileSource::new(path, poll),
                options,
                self.fix_tx.clone(),
            ));
            return;
        }
        if let (Some(latitude), Some(longitude)) =
            (self.settings.fixed_latitude, self.settings.fixed_longitude)
        {
            self.tracker = Some(LocationTracker::start(
                FixedSource::new(
                    Coordinate {
                        latitude,
                        longitude,
                    },
                    poll,
                ),
                options,
                self.fix_tx.clone(),
            ));
            return;
        }
        tracing::info!("[Location] no source configured, watch not started");
    }
}

/// Trimmed text, or `None` when blank.
fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
