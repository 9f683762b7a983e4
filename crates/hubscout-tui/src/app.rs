// Dashboard state and the fetch state machine.
//
// One tagged phase instead of separate loading/error flags, and every
// outbound request carries a sequence number. A response that settles
// after a newer request was issued is stale and gets dropped, so rapid
// tab switching can never install the wrong list.

use ratatui::widgets::ListState;
use tracing::debug;

use hubscout_core::models::{
    ContentType, DatasetRecord, ModelRecord, PaperRecord, SpaceRecord, TimeFrame,
};
use hubscout_core::Result;

use crate::client::TabContent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,       // Navigating content
    EditingEmail, // Typing in the subscribe modal
}

/// A queued outbound request. The runner takes these and resolves them
/// through a ContentFetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub tab: ContentType,
    pub time_frame: TimeFrame,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// Transient status-bar notification; fades after a few ticks.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub ticks_left: u16,
}

const TOAST_TICKS: u16 = 40;

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub phase: Phase,
    pub active_tab: ContentType,
    pub time_frame: TimeFrame,
    pub limit: u32,
    pub papers: Vec<PaperRecord>,
    pub models: Vec<ModelRecord>,
    pub datasets: Vec<DatasetRecord>,
    pub spaces: Vec<SpaceRecord>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub show_subscribe: bool,
    pub subscribe_enabled: bool,
    pub email_input: String,
    pub toast: Option<Toast>,
    next_seq: u64,
    latest_seq: Option<u64>,
    pending: Option<FetchRequest>,
}

impl App {
    pub fn new(time_frame: TimeFrame, limit: u32, subscribe_enabled: bool) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            phase: Phase::Idle,
            active_tab: ContentType::Papers,
            time_frame,
            limit,
            papers: Vec::new(),
            models: Vec::new(),
            datasets: Vec::new(),
            spaces: Vec::new(),
            selected_index: 0,
            list_state,
            show_subscribe: false,
            subscribe_enabled,
            email_input: String::new(),
            toast: None,
            next_seq: 0,
            latest_seq: None,
            pending: None,
        };

        // Mount fetch for the initial tab.
        app.queue_fetch();
        app
    }

    fn queue_fetch(&mut self) {
        self.next_seq += 1;
        let request = FetchRequest {
            seq: self.next_seq,
            tab: self.active_tab,
            time_frame: self.time_frame,
            limit: self.limit,
        };
        self.latest_seq = Some(request.seq);
        self.pending = Some(request);
        self.phase = Phase::Loading;
    }

    /// Next request the runner should put on the wire, if any.
    pub fn take_pending(&mut self) -> Option<FetchRequest> {
        self.pending.take()
    }

    /// Tab switches always refetch; previously fetched lists stay in
    /// memory but are not trusted as fresh.
    pub fn switch_tab(&mut self, tab: ContentType) {
        if tab == self.active_tab {
            return;
        }
        self.active_tab = tab;
        self.reset_selection();
        self.queue_fetch();
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.switch_tab(self.active_tab.previous());
    }

    /// The time range only drives the papers feed; changing it on another
    /// tab just updates the selector until that tab is visited.
    pub fn set_time_frame(&mut self, time_frame: TimeFrame) {
        if time_frame == self.time_frame {
            return;
        }
        self.time_frame = time_frame;
        if self.active_tab == ContentType::Papers {
            self.queue_fetch();
        }
    }

    pub fn cycle_time_frame(&mut self) {
        self.set_time_frame(self.time_frame.next());
    }

    /// Re-issue the current tab's request after a failure.
    pub fn retry(&mut self) {
        self.queue_fetch();
    }

    /// Settle a fetch. Only the most recently issued sequence number may
    /// touch state; anything older lost the race and is dropped.
    pub fn complete_fetch(&mut self, seq: u64, result: Result<TabContent>) {
        if self.latest_seq != Some(seq) {
            debug!(seq, "discarding stale fetch response");
            return;
        }

        match result {
            Ok(content) => {
                match content {
                    TabContent::Papers(list) => self.papers = list,
                    TabContent::Models(list) => self.models = list,
                    TabContent::Datasets(list) => self.datasets = list,
                    TabContent::Spaces(list) => self.spaces = list,
                }
                self.phase = Phase::Loaded;
                self.reset_selection();
            }
            Err(err) => {
                let mut message = err.to_string();
                if message.is_empty() {
                    message = "Failed to fetch data".to_string();
                }
                self.phase = Phase::Errored(message.clone());
                self.set_toast(message, ToastKind::Error);
            }
        }
    }

    /// Window title after a settle: active tab plus the human time label.
    pub fn window_title(&self) -> String {
        format!(
            "HuggingFace {} - Top {}",
            self.active_tab,
            self.time_frame.label()
        )
    }

    pub fn items_len(&self) -> usize {
        match self.active_tab {
            ContentType::Papers => self.papers.len(),
            ContentType::Models => self.models.len(),
            ContentType::Datasets => self.datasets.len(),
            ContentType::Spaces => self.spaces.len(),
        }
    }

    fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    pub fn next_item(&mut self) {
        let len = self.items_len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_item(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// URL of the selected item, for opening in a browser. Spaces prefer
    /// their live deployment over the hub page.
    pub fn selected_url(&self) -> Option<String> {
        match self.active_tab {
            ContentType::Papers => self.papers.get(self.selected_index).map(|p| p.link.clone()),
            ContentType::Models => self.models.get(self.selected_index).map(|m| m.hub_url()),
            ContentType::Datasets => self.datasets.get(self.selected_index).map(|d| d.hub_url()),
            ContentType::Spaces => self.spaces.get(self.selected_index).map(|s| s.launch_url()),
        }
    }

    /// Direct PDF for the selected paper; None off the papers tab.
    pub fn selected_pdf_url(&self) -> Option<String> {
        if self.active_tab != ContentType::Papers {
            return None;
        }
        self.papers
            .get(self.selected_index)
            .and_then(|paper| paper.pdf_url())
    }

    pub fn open_subscribe(&mut self) {
        if !self.subscribe_enabled {
            self.set_toast(
                "No subscribe endpoint configured".to_string(),
                ToastKind::Info,
            );
            return;
        }
        self.show_subscribe = true;
        self.input_mode = InputMode::EditingEmail;
    }

    pub fn close_subscribe(&mut self) {
        self.show_subscribe = false;
        self.email_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Same bar the web form sets: it has to look like an address at all.
    pub fn email_is_plausible(&self) -> bool {
        self.email_input.contains('@')
    }

    pub fn set_toast(&mut self, text: String, kind: ToastKind) {
        self.toast = Some(Toast {
            text,
            kind,
            ticks_left: TOAST_TICKS,
        });
    }

    /// Called once per event-loop pass to age out the toast.
    pub fn tick(&mut self) {
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
