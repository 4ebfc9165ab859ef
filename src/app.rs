use anyhow::{Context as _, Result};
use eframe::egui::{self, Stroke};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::HttpInfoApi;
use crate::config::ClientConfig;
use crate::error::ValidationError;
use crate::fetch::{FetchEvent, InfoFetcher, TokioSleeper};
use crate::formats::{apply_action, FormatAction};
use crate::handoff::{self, FileHandoffStore, HandoffStore, VideoContext};
use crate::localizations::Localizations;
use crate::models::{AppState, HandoffRecord, PanelState, Route, VideoQuery};
use crate::theme::*;
use crate::toast::{ToastKind, ToastQueue};
use crate::ui;

pub struct VidlApp {
    pub state: AppState,
    localizer: Localizations,
    toasts: ToastQueue,
    fetcher: Arc<InfoFetcher>,
    runtime: tokio::runtime::Runtime,
    store: Box<dyn HandoffStore>,
    redirect_delay: Duration,
    pending_redirect: Option<(Instant, HandoffRecord)>,
    status_sender: Sender<FetchEvent>,
    status_receiver: Receiver<FetchEvent>,
}

impl VidlApp {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = HttpInfoApi::new(&config.base_url, config.request_timeout())
            .context("building HTTP client")?;
        let fetcher = InfoFetcher::new(
            Arc::new(api),
            Arc::new(TokioSleeper),
            config.retry_policy(),
        );
        let store = handoff::open_session_store(FileHandoffStore::session_dir());
        Self::with_parts(config, fetcher, store)
    }

    pub fn with_parts(
        config: &ClientConfig,
        fetcher: InfoFetcher,
        store: Box<dyn HandoffStore>,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("vidl-fetch")
            .enable_all()
            .build()
            .context("starting async runtime")?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            state: AppState::default(),
            localizer: Localizations::new(config.language.as_deref()),
            toasts: ToastQueue::new(),
            fetcher: Arc::new(fetcher),
            runtime,
            store,
            redirect_delay: config.redirect_delay(),
            pending_redirect: None,
            status_sender: tx,
            status_receiver: rx,
        })
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Validates the URL field and starts a lookup. Ignored while a lookup
    /// is already running.
    pub fn start_fetch(&mut self, ctx: &egui::Context) {
        if self.state.is_fetching {
            return;
        }

        let query = match VideoQuery::parse(&self.state.url) {
            Ok(query) => query,
            Err(ValidationError::Empty) => {
                self.toasts
                    .notify(self.localizer.get("enter-url"), ToastKind::Warning);
                return;
            }
            Err(ValidationError::MissingScheme) => {
                self.toasts
                    .notify(self.localizer.get("invalid-url"), ToastKind::Error);
                return;
            }
        };

        self.state.is_fetching = true;
        self.state.current_url = query.url().to_string();
        self.state.panel = PanelState::Loading;

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.status_sender.clone();
        let repaint = ctx.clone();
        self.runtime.spawn(async move {
            let result = fetcher
                .fetch_video_info(query.url(), move |event| {
                    let _ = tx.send(event);
                    repaint.request_repaint();
                })
                .await;
            if let Err(err) = result {
                log::debug!("lookup for {} ended: {err}", query.url());
            }
        });
        ctx.request_repaint();
    }

    pub fn apply_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Retrying { failed, max } => {
                self.toasts.notify(
                    format!("{} ({failed}/{max})...", self.localizer.get("retrying")),
                    ToastKind::Warning,
                );
            }
            FetchEvent::Loaded(info) => {
                self.state.is_fetching = false;
                self.state.panel = PanelState::show_video(info);
                self.toasts
                    .notify(self.localizer.get("info-loaded"), ToastKind::Success);
            }
            FetchEvent::Failed(error) => {
                self.state.is_fetching = false;
                self.toasts.notify(error.message.clone(), ToastKind::Error);
                self.state.panel = PanelState::Error(error.message);
            }
        }
    }

    fn process_fetch_events(&mut self) {
        while let Ok(event) = self.status_receiver.try_recv() {
            self.apply_event(event);
        }
    }

    pub fn is_redirecting(&self) -> bool {
        self.pending_redirect.is_some()
    }

    /// Applies a card click. Download clicks are dropped while an earlier
    /// handoff is waiting to redirect.
    pub fn handle_format_action(&mut self, action: FormatAction) {
        if matches!(action, FormatAction::Download(_)) && self.is_redirecting() {
            return;
        }
        let PanelState::Video { info, selection } = &mut self.state.panel else {
            return;
        };
        let Some(option) = apply_action(&*info, selection, action) else {
            return;
        };

        self.toasts
            .notify(self.localizer.get("starting-download"), ToastKind::Info);

        let context = VideoContext {
            url: &self.state.current_url,
            info: &*info,
        };
        let record = match handoff::begin_download(self.store.as_ref(), option, &context) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("handoff record not stored: {err}");
                handoff::build_record(option, &context)
            }
        };

        self.toasts
            .notify(self.localizer.get("redirecting"), ToastKind::Success);
        self.pending_redirect = Some((Instant::now() + self.redirect_delay, record));
    }

    /// Moves to the download view once the redirect delay has passed.
    /// Returns the time left otherwise.
    pub fn poll_redirect(&mut self, now: Instant) -> Option<Duration> {
        let (deadline, _) = self.pending_redirect.as_ref()?;
        if now < *deadline {
            return Some(*deadline - now);
        }
        let (_, record) = self.pending_redirect.take()?;
        let record = match handoff::load_record(self.store.as_ref()) {
            Ok(Some(stored)) => stored,
            Ok(None) => record,
            Err(err) => {
                log::warn!("handoff record unreadable: {err}");
                record
            }
        };
        self.state.route = Route::Downloading(record);
        None
    }

    pub fn go_home(&mut self) {
        self.state.route = Route::Home;
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.process_fetch_events();

        let now = Instant::now();
        if let Some(left) = self.poll_redirect(now) {
            ctx.request_repaint_after(left);
        }
        self.toasts.prune(now);
        if !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.localizer.get("app-title"));
            ui.add_space(20.0);

            if let Route::Downloading(record) = &self.state.route {
                if ui::render_downloading(ui, record, &self.localizer) {
                    self.go_home();
                }
                return;
            }

            let url_response = ui::render_url_input(ui, &mut self.state, &self.localizer);
            if url_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_fetch(ctx);
            }

            ui.add_space(10.0);
            self.render_buttons(ui, ctx);
            ui.add_space(20.0);

            let redirecting = self.is_redirecting();
            let action = egui::ScrollArea::vertical()
                .show(ui, |ui| {
                    ui::render_panel(ui, &self.state.panel, redirecting, &self.localizer)
                })
                .inner;
            if let Some(action) = action {
                self.handle_format_action(action);
            }
        });

        ui::render_toasts(ctx, &self.toasts, now);
    }

    fn render_buttons(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let label = if self.state.is_fetching {
            self.localizer.get("fetching-button")
        } else {
            self.localizer.get("get-info-button")
        };

        let button = egui::Button::new(
            egui::RichText::new(label)
                .size(BUTTON_FONT_SIZE)
                .color(BUTTON_MAIN_TEXT),
        )
        .min_size(MIN_SIZE_BUTTON)
        .fill(PRIMARY_BUTTON_BG)
        .rounding(ROUNDING_BUTTON)
        .stroke(Stroke::new(1.0, BORDER_COLOR));

        if ui.add_enabled(!self.state.is_fetching, button).clicked() {
            self.start_fetch(ctx);
        }
    }
}

impl eframe::App for VidlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}
