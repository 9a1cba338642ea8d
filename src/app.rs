use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::components::Component;
use crate::components::compose::Compose;
use crate::components::header::Header;
use crate::components::help::HelpOverlay;
use crate::components::status_bar::StatusBar;
use crate::components::wave_list::WaveList;
use crate::data::export;
use crate::data::store::WaveStore;
use crate::data::ContractService;
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;
use crate::wallet::{WalletGateway, WalletState};

pub struct App {
    // Components
    header: Header,
    wave_list: WaveList,
    compose: Compose,
    status_bar: StatusBar,
    help: HelpOverlay,

    // State
    store: WaveStore,
    wallet: WalletGateway,

    // Data
    service: Arc<ContractService>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn with_service(
        service: Arc<ContractService>,
        wallet: WalletGateway,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            header: Header::new(),
            wave_list: WaveList::new(),
            compose: Compose::new(),
            status_bar: StatusBar::new(),
            help: HelpOverlay::new(),
            store: WaveStore::new(),
            wallet,
            service,
            event_rx,
            should_quit: false,
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn run(&mut self, mut terminal: ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        // Startup wallet check: a credential that needs no unlock step
        // connects immediately and triggers the seed read, mirroring the
        // already-authorized flow.
        match self.wallet.check_existing() {
            Ok(Some(account)) => self.apply_wallet_connected(account),
            Ok(None) => {
                self.status_bar.info_message = Some(match self.wallet.state() {
                    WalletState::Available => "Wallet found - press c to connect".to_string(),
                    _ => "No wallet configured - set WAVEPORTAL_PRIVATE_KEY or pass --keystore"
                        .to_string(),
                });
            }
            Err(e) => {
                self.status_bar.error_message = Some(e.to_string());
            }
        }

        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                _ = interval.tick() => {
                    terminal.draw(|frame| self.render(frame))?;
                }
                Some(Ok(event)) = events.next() => {
                    self.handle_terminal_event(event);
                }
                Some(app_event) = self.event_rx.recv() => {
                    self.handle_app_event(app_event);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(Style::default().bg(THEME.bg)),
            area,
        );

        // Layout: header (1) | wave feed (fill) | status bar (1)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render(frame, chunks[0]);
        self.wave_list.render(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.compose.render(frame, area);
        self.help.render(frame, area);
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only handle key press events (not release/repeat) for cross-platform compat
            if key.kind != KeyEventKind::Press {
                return;
            }

            // Help overlay consumes all keys when visible
            if self.help.handle_key(key) {
                return;
            }

            // Compose popup consumes keys when active
            if self.compose.active {
                if let Some(message) = self.compose.handle_key(key) {
                    self.submit_wave(message);
                }
                return;
            }

            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                }
                KeyCode::Char('w') => {
                    self.status_bar.error_message = None;
                    self.compose.activate();
                }
                KeyCode::Char('c') => {
                    self.connect_wallet();
                }
                KeyCode::Char('r') => {
                    self.refresh_feed();
                }
                KeyCode::Char('e') => {
                    self.export_feed(ExportFormat::Csv);
                }
                KeyCode::Char('E') => {
                    self.export_feed(ExportFormat::Json);
                }
                KeyCode::Char('?') => {
                    self.help.toggle();
                }
                _ => {
                    if let Some(event) = self.wave_list.handle_key(key) {
                        self.handle_app_event(event);
                    }
                }
            }
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Connected(chain_id) => {
                self.header.chain_id = chain_id;
                self.header.connected = true;
                self.status_bar.connected = true;
            }
            AppEvent::WavesLoaded(records) => {
                self.status_bar.loading = false;
                self.wave_list.loading = false;
                self.store.seed(records);
                self.header.total_waves = self.store.len() as u64;
                self.wave_list.set_waves(self.store.waves().to_vec());
            }
            AppEvent::LoadFailed(msg) => {
                self.status_bar.loading = false;
                self.wave_list.loading = false;
                self.status_bar.error_message = Some(msg);
            }
            AppEvent::TotalWaves(total) => {
                self.header.total_waves = total;
            }
            AppEvent::NewWave(record) => {
                // The same wave may already be here via a bulk read; the
                // store decides.
                if self.store.append(record) {
                    self.header.total_waves = self.store.len() as u64;
                    self.wave_list.set_waves(self.store.waves().to_vec());
                }
            }
            AppEvent::WaveSubmitted { tx_hash, total } => {
                self.status_bar.loading = false;
                self.compose.clear_draft();
                self.header.total_waves = total;
                self.status_bar.info_message =
                    Some(format!("Wave mined: {}", utils::truncate_hash(&tx_hash)));
                // Without a live subscription the new wave would never
                // show up; re-read the feed.
                if !self.status_bar.live {
                    self.service.fetch_all_waves();
                }
            }
            AppEvent::SubmitFailed(msg) => {
                self.status_bar.loading = false;
                self.status_bar.error_message = Some(msg);
            }
            AppEvent::LiveConnected => {
                self.status_bar.live = true;
            }
            AppEvent::LiveDisconnected => {
                self.status_bar.live = false;
            }
            AppEvent::Error(msg) => {
                self.status_bar.loading = false;
                self.status_bar.error_message = Some(msg);
            }
        }
    }

    /// Submit a validated draft. Never reaches the contract client
    /// without a connected wallet.
    fn submit_wave(&mut self, message: String) {
        match self.wallet.state() {
            WalletState::Connected(_) => {
                self.status_bar.error_message = None;
                self.status_bar.info_message = None;
                self.status_bar.loading = true;
                self.service.submit_wave(message);
            }
            _ => {
                self.status_bar.error_message =
                    Some("No wallet connected - press c to connect".to_string());
            }
        }
    }

    fn connect_wallet(&mut self) {
        match self.wallet.connect() {
            Ok(account) => self.apply_wallet_connected(account),
            Err(e) => {
                self.status_bar.error_message = Some(e.to_string());
            }
        }
    }

    fn apply_wallet_connected(&mut self, account: Address) {
        if let Some(wallet) = self.wallet.wallet() {
            self.service.set_wallet(wallet.clone());
        }
        tracing::info!(%account, "wallet connected");

        self.header.account = Some(account);
        self.wave_list.wallet_connected = true;
        self.status_bar.error_message = None;
        self.status_bar.info_message = None;

        // First sight of an authorized account seeds the feed.
        self.status_bar.loading = true;
        self.wave_list.loading = true;
        self.service.fetch_all_waves();
        self.service.fetch_total_waves();
    }

    fn refresh_feed(&mut self) {
        match self.wallet.state() {
            WalletState::Connected(_) => {
                self.status_bar.error_message = None;
                self.status_bar.loading = true;
                self.service.fetch_all_waves();
                self.service.fetch_total_waves();
            }
            _ => {
                self.status_bar.error_message =
                    Some("No wallet connected - press c to connect".to_string());
            }
        }
    }

    fn export_feed(&mut self, format: ExportFormat) {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };

        let result = match export::default_export_path(extension) {
            Some(path) => {
                let path = path.to_string_lossy().into_owned();
                match format {
                    ExportFormat::Csv => export::export_waves_csv(self.store.waves(), &path),
                    ExportFormat::Json => export::export_waves_json(self.store.waves(), &path),
                }
            }
            None => Err("Could not determine export directory".to_string()),
        };

        match result {
            Ok(msg) => self.status_bar.info_message = Some(msg),
            Err(e) => self.status_bar.error_message = Some(e),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}
