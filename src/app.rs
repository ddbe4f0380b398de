use ratatui::layout::Rect;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::{app as ac, messages};
use crate::flags::UiFlags;
use crate::theme::{ColorScheme, Theme};
use crate::types::{AppEvent, BlockRow, DisplayItem, ItemKey, TxLite};
use crate::ui_core::PixelScale;
use crate::ui_snapshot::{ItemSnapshot, RenderSnapshot};
use crate::util_text::{format_amount, format_bytes, short_hash};
use crate::visualizer::{Point, SpawnJitter, Viewport, Visualizer};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    #[default]
    Blocks,
    Transactions,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Blocks => Pane::Transactions,
            Pane::Transactions => Pane::Blocks,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Blocks => "Blocks",
            Pane::Transactions => "Transactions",
        }
    }
}

/// Contents of the details popup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailsView {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

pub struct App {
    quit: bool,
    pane: Pane,

    blocks: VecDeque<BlockRow>, // oldest first
    txs: VecDeque<TxLite>,      // oldest first
    keep_blocks: usize,
    keep_txs: usize,

    blocks_viz: Visualizer,
    txs_viz: Visualizer,

    scale: PixelScale,
    grid_area: Rect, // set by the UI layer every frame

    fps: u32,
    fps_choices: Vec<u32>,

    theme: Theme,
    flags: UiFlags,

    // Highlighted item and the item shown in the details popup
    selected: Option<ItemKey>,
    details: Option<(Pane, ItemKey)>,

    // Debug log (for development)
    debug_log: Vec<String>,
    debug_visible: bool,

    toast_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        let jitter = |offset: u64| match cfg.seed {
            Some(seed) => SpawnJitter::seeded(seed.wrapping_add(offset)),
            None => SpawnJitter::from_entropy(),
        };
        let flags = UiFlags {
            reduced_motion: cfg.reduced_motion,
            ..UiFlags::default()
        };

        Self {
            quit: false,
            pane: Pane::Blocks,
            blocks: VecDeque::with_capacity(cfg.keep_blocks),
            txs: VecDeque::with_capacity(cfg.keep_txs),
            keep_blocks: cfg.keep_blocks,
            keep_txs: cfg.keep_txs,
            blocks_viz: Visualizer::with_jitter(cfg.visualizer_config(Pane::Blocks), jitter(0)),
            txs_viz: Visualizer::with_jitter(
                cfg.visualizer_config(Pane::Transactions),
                jitter(1),
            ),
            scale: PixelScale::default(),
            grid_area: Rect::default(),
            fps: cfg.render_fps,
            fps_choices: cfg.render_fps_choices.clone(),
            theme: cfg.theme,
            flags,
            selected: None,
            details: None,
            debug_log: Vec::new(),
            debug_visible: false,
            toast_message: None,
        }
    }

    pub fn quit_flag(&self) -> bool {
        self.quit
    }
    pub fn pane(&self) -> Pane {
        self.pane
    }
    pub fn fps(&self) -> u32 {
        self.fps
    }
    pub fn theme(&self) -> Theme {
        self.theme
    }
    pub fn colors(&self) -> ColorScheme {
        self.theme.colors()
    }
    pub fn ui_flags(&self) -> UiFlags {
        self.flags
    }
    pub fn set_ui_flags(&mut self, flags: UiFlags) {
        self.flags = flags;
        if flags.reduced_motion {
            self.settle_all();
        }
    }
    pub fn selected(&self) -> Option<&ItemKey> {
        self.selected.as_ref()
    }
    pub fn debug_log(&self) -> &[String] {
        &self.debug_log
    }
    pub fn debug_visible(&self) -> bool {
        self.debug_visible
    }
    pub fn blocks(&self) -> &VecDeque<BlockRow> {
        &self.blocks
    }
    pub fn txs(&self) -> &VecDeque<TxLite> {
        &self.txs
    }
    pub fn grid_area(&self) -> Rect {
        self.grid_area
    }
    pub fn pixel_scale(&self) -> PixelScale {
        self.scale
    }

    pub fn visualizer(&self, pane: Pane) -> &Visualizer {
        match pane {
            Pane::Blocks => &self.blocks_viz,
            Pane::Transactions => &self.txs_viz,
        }
    }

    pub fn active_visualizer(&self) -> &Visualizer {
        self.visualizer(self.pane)
    }

    fn visualizers_mut(&mut self) -> [&mut Visualizer; 2] {
        [&mut self.blocks_viz, &mut self.txs_viz]
    }

    /// Show a toast notification for a couple of seconds
    pub fn show_toast(&mut self, msg: String) {
        self.toast_message = Some((msg, Instant::now()));
    }

    /// Get current toast message if still active
    pub fn toast_message(&self) -> Option<&str> {
        let duration = Duration::from_secs(ac::TOAST_DURATION_SECS);
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed() < duration {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    // ----- knobs -----
    pub fn cycle_fps(&mut self) {
        if self.fps_choices.is_empty() {
            return;
        }
        let mut idx = self
            .fps_choices
            .iter()
            .position(|&v| v == self.fps)
            .unwrap_or(0);
        idx = (idx + 1) % self.fps_choices.len();
        self.fps = self.fps_choices[idx];
        self.show_toast(format!("Render FPS: {}", self.fps));
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let msg = if self.theme.is_dark() {
            messages::THEME_DARK
        } else {
            messages::THEME_LIGHT
        };
        self.show_toast(msg.to_string());
    }

    pub fn toggle_debug_panel(&mut self) {
        self.debug_visible = !self.debug_visible;
    }

    pub fn log_debug(&mut self, msg: String) {
        log::debug!("{msg}");
        self.debug_log.push(msg);
        if self.debug_log.len() > ac::MAX_DEBUG_LOG_LINES {
            self.debug_log.remove(0);
        }
    }

    pub fn next_pane(&mut self) {
        self.pane = self.pane.next();
        self.selected = None;
        self.log_debug(format!("pane -> {}", self.pane.title()));
    }

    // ----- grid -----

    /// Record where the grid is drawn and resize both visualizers to match.
    pub fn set_grid_area(&mut self, area: Rect) {
        self.grid_area = area;
        let viewport = self.scale.viewport(area);
        self.set_viewport(viewport);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        for viz in self.visualizers_mut() {
            viz.set_viewport(viewport);
        }
        if self.flags.reduced_motion {
            self.settle_all();
        }
    }

    /// Advance both grids by `dt` ticks; returns how many items still move.
    pub fn tick(&mut self, dt: f64) -> usize {
        self.visualizers_mut().into_iter().map(|v| v.tick(dt)).sum()
    }

    pub fn tick_elapsed(&mut self, elapsed: Duration) -> usize {
        self.visualizers_mut()
            .into_iter()
            .map(|v| v.tick_elapsed(elapsed))
            .sum()
    }

    fn settle_all(&mut self) {
        for viz in self.visualizers_mut() {
            viz.settle_all();
        }
    }

    /// Drop every item in again.
    pub fn replay(&mut self) {
        for viz in self.visualizers_mut() {
            viz.replay();
        }
        if self.flags.reduced_motion {
            self.settle_all();
        }
        self.show_toast(messages::REPLAY.to_string());
    }

    // ----- activation -----

    /// Highlight the item under `point` (active pane, pixel space).
    pub fn select_at(&mut self, point: Point) -> Option<ItemKey> {
        let key = self.active_visualizer().item_at(point)?.key.clone();
        self.selected = Some(key.clone());
        Some(key)
    }

    /// Highlight and open the item under `point`.
    pub fn activate_at(&mut self, point: Point) -> Option<ItemKey> {
        let key = self.select_at(point)?;
        self.on_item_activated(key.clone());
        Some(key)
    }

    /// Open the item sitting in cell 0 (the newest one for the default ordering).
    pub fn activate_newest(&mut self) -> Option<ItemKey> {
        let key = self.active_visualizer().entries().next()?.0.key.clone();
        self.on_item_activated(key.clone());
        Some(key)
    }

    pub fn on_item_activated(&mut self, key: ItemKey) {
        self.log_debug(format!("activate {} in {}", key, self.pane.title()));
        self.selected = Some(key.clone());
        self.details = Some((self.pane, key));
    }

    /// Close the details popup; returns false if none was open.
    pub fn close_details(&mut self) -> bool {
        self.details.take().is_some()
    }

    pub fn details(&self) -> Option<DetailsView> {
        let (pane, key) = self.details.as_ref()?;
        match (pane, key) {
            (Pane::Blocks, ItemKey::Height(height)) => {
                let b = self.blocks.iter().find(|b| b.height == *height)?;
                let outputs: u64 = b.transactions.iter().map(|t| t.output_sum).sum();
                Some(DetailsView {
                    title: format!("Block #{}", b.height),
                    lines: vec![
                        ("Hash".into(), short_hash(&b.hash, 24)),
                        (
                            "Parent".into(),
                            b.prev_hash
                                .as_deref()
                                .map(|h| short_hash(h, 24))
                                .unwrap_or_else(|| "-".into()),
                        ),
                        ("Time".into(), b.when.clone()),
                        ("Transactions".into(), b.tx_count.to_string()),
                        ("Size".into(), format_bytes(b.size)),
                        ("Fees".into(), format_amount(b.total_fee)),
                        ("Outputs".into(), format_amount(outputs)),
                    ],
                })
            }
            (Pane::Transactions, ItemKey::Hash(hash)) => {
                let t = self.txs.iter().find(|t| &t.hash == hash)?;
                Some(DetailsView {
                    title: format!("Tx {}", short_hash(&t.hash, 16)),
                    lines: vec![
                        ("Hash".into(), short_hash(&t.hash, 24)),
                        ("Block".into(), format!("#{}", t.height)),
                        ("Signer".into(), t.signer_id.clone().unwrap_or_else(|| "-".into())),
                        (
                            "Receiver".into(),
                            t.receiver_id.clone().unwrap_or_else(|| "-".into()),
                        ),
                        ("Size".into(), format_bytes(t.size)),
                        ("Fee".into(), format_amount(t.fee)),
                        ("Output".into(), format_amount(t.output_sum)),
                    ],
                })
            }
            _ => None,
        }
    }

    // ----- snapshot -----

    pub fn snapshot(&self) -> RenderSnapshot {
        let viz = self.active_visualizer();
        let size = viz.cell_size().unwrap_or(0.0);
        RenderSnapshot {
            pane: self.pane,
            container_height: viz.container_height(),
            settled: viz.is_settled(),
            active: viz.active_count(),
            cell_size: viz.cell_size(),
            columns: viz.geometry().map(|g| g.columns),
            items: viz
                .entries()
                .map(|(item, state)| ItemSnapshot {
                    key: item.key.clone(),
                    x: state.x,
                    y: state.y,
                    size,
                    fee: item.fee,
                    count: item.count,
                    settled: state.settled,
                })
                .collect(),
        }
    }

    // ----- events -----
    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::Quit => self.quit = true,
            AppEvent::NewBlock(b) => self.push_block(b),
        }
    }

    fn push_block(&mut self, b: BlockRow) {
        let height = b.height;
        let tx_count = b.transactions.len();

        // A block we already hold is replaced along with its transactions
        self.txs.retain(|t| t.height != height);
        self.txs.extend(b.transactions.iter().cloned());
        match self.blocks.iter_mut().find(|x| x.height == height) {
            Some(existing) => *existing = b,
            None => self.blocks.push_back(b),
        }

        while self.blocks.len() > self.keep_blocks {
            self.blocks.pop_front();
        }
        while self.txs.len() > self.keep_txs {
            self.txs.pop_front();
        }

        let block_items: Vec<DisplayItem> = self.blocks.iter().map(DisplayItem::from).collect();
        let tx_items: Vec<DisplayItem> = self.txs.iter().map(DisplayItem::from).collect();
        let b_stats = self.blocks_viz.set_items(&block_items);
        let t_stats = self.txs_viz.set_items(&tx_items);
        if self.flags.reduced_motion {
            self.settle_all();
        }

        // Details for an item that aged out are no longer available
        if self.details.is_some() && self.details().is_none() {
            self.details = None;
        }

        self.log_debug(format!(
            "block #{height} ({tx_count} txs): blocks +{} -{}, txs +{} -{}",
            b_stats.spawned, b_stats.removed, t_stats.spawned, t_stats.removed
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_from, CliArgs};

    fn app_with(args: CliArgs) -> App {
        let cfg = load_from(CliArgs {
            seed: Some(7),
            ..args
        })
        .unwrap();
        let mut app = App::new(&cfg);
        app.set_viewport(Viewport::new(800.0, 320.0));
        app
    }

    fn app() -> App {
        app_with(CliArgs::default())
    }

    fn block(height: u64, txs: usize) -> BlockRow {
        BlockRow {
            height,
            hash: format!("hash{height}"),
            prev_hash: None,
            timestamp: height * 1000,
            tx_count: txs,
            size: 1024,
            total_fee: 10 * txs as u64,
            when: "12:00:00".into(),
            transactions: (0..txs)
                .map(|i| TxLite {
                    hash: format!("tx{height}-{i}"),
                    height,
                    timestamp: height * 1000 + i as u64,
                    size: 200,
                    fee: 10,
                    output_sum: 5,
                    signer_id: Some("alice".into()),
                    receiver_id: None,
                })
                .collect(),
        }
    }

    #[test]
    fn blocks_feed_both_grids() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(1, 2)));
        app.on_event(AppEvent::NewBlock(block(2, 3)));
        assert_eq!(app.visualizer(Pane::Blocks).len(), 2);
        assert_eq!(app.visualizer(Pane::Transactions).len(), 5);
        assert!(app.tick(1.0) > 0);
    }

    #[test]
    fn rolling_buffers_respect_limits() {
        let mut app = app_with(CliArgs {
            keep_blocks: Some(3),
            keep_txs: Some(4),
            ..CliArgs::default()
        });
        for h in 0..10 {
            app.on_event(AppEvent::NewBlock(block(h, 2)));
        }
        assert_eq!(app.blocks().len(), 3);
        assert_eq!(app.blocks().front().map(|b| b.height), Some(7));
        assert_eq!(app.txs().len(), 4);
        assert_eq!(app.visualizer(Pane::Blocks).len(), 3);
        assert!(app
            .visualizer(Pane::Blocks)
            .state(&ItemKey::Height(6))
            .is_none());
    }

    #[test]
    fn repeated_block_replaces_its_transactions() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(5, 3)));
        app.on_event(AppEvent::NewBlock(block(5, 1)));
        assert_eq!(app.blocks().len(), 1);
        assert_eq!(app.txs().len(), 1);
    }

    #[test]
    fn enter_opens_newest_block() {
        let mut app = app();
        for h in 1..=3 {
            app.on_event(AppEvent::NewBlock(block(h, 1)));
        }
        assert_eq!(app.activate_newest(), Some(ItemKey::Height(3)));
        let details = app.details().unwrap();
        assert_eq!(details.title, "Block #3");
        assert!(details.lines.contains(&("Transactions".into(), "1".into())));
        assert!(app.close_details());
        assert!(!app.close_details());
    }

    #[test]
    fn click_hits_settled_item() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(1, 0)));
        app.set_ui_flags(UiFlags {
            reduced_motion: true,
            ..UiFlags::default()
        });
        let s = *app
            .visualizer(Pane::Blocks)
            .state(&ItemKey::Height(1))
            .unwrap();
        let hit = app.activate_at(Point {
            x: s.x + 2.0,
            y: s.y + 2.0,
        });
        assert_eq!(hit, Some(ItemKey::Height(1)));
        assert_eq!(app.selected(), Some(&ItemKey::Height(1)));
        assert!(app.activate_at(Point { x: -1.0, y: -1.0 }).is_none());
    }

    #[test]
    fn transaction_details_show_parties() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(9, 2)));
        app.next_pane();
        assert_eq!(app.pane(), Pane::Transactions);
        let key = app.activate_newest().unwrap();
        assert_eq!(key, ItemKey::Hash("tx9-1".into()));
        let details = app.details().unwrap();
        assert!(details.lines.contains(&("Signer".into(), "alice".into())));
        assert!(details.lines.contains(&("Receiver".into(), "-".into())));
    }

    #[test]
    fn aged_out_details_close() {
        let mut app = app_with(CliArgs {
            keep_blocks: Some(1),
            ..CliArgs::default()
        });
        app.on_event(AppEvent::NewBlock(block(1, 0)));
        app.activate_newest();
        app.on_event(AppEvent::NewBlock(block(2, 0)));
        assert!(app.details().is_none());
        assert!(!app.close_details());
    }

    #[test]
    fn reduced_motion_places_items_immediately() {
        let mut app = app_with(CliArgs {
            reduced_motion: Some(true),
            ..CliArgs::default()
        });
        app.on_event(AppEvent::NewBlock(block(1, 4)));
        assert!(app.visualizer(Pane::Blocks).is_settled());
        assert!(app.visualizer(Pane::Transactions).is_settled());
        assert_eq!(app.tick(1.0), 0);
    }

    #[test]
    fn replay_restarts_animation() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(1, 2)));
        while app.tick(2.0) > 0 {}
        app.replay();
        assert_eq!(app.visualizer(Pane::Transactions).active_count(), 2);
        assert_eq!(app.toast_message(), Some(messages::REPLAY));
    }

    #[test]
    fn fps_cycles_through_choices() {
        let mut app = app();
        assert_eq!(app.fps(), 30);
        app.cycle_fps();
        assert_eq!(app.fps(), 60);
        app.cycle_fps();
        assert_eq!(app.fps(), 30);
    }

    #[test]
    fn theme_toggle_announces_itself() {
        let mut app = app();
        app.toggle_theme();
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(app.toast_message(), Some(messages::THEME_LIGHT));
    }

    #[test]
    fn debug_log_is_bounded() {
        let mut app = app();
        for i in 0..(ac::MAX_DEBUG_LOG_LINES + 10) {
            app.log_debug(format!("line {i}"));
        }
        assert_eq!(app.debug_log().len(), ac::MAX_DEBUG_LOG_LINES);
        assert_eq!(app.debug_log()[0], "line 10");
    }

    #[test]
    fn snapshot_describes_active_pane() {
        let mut app = app();
        app.on_event(AppEvent::NewBlock(block(1, 0)));
        app.on_event(AppEvent::NewBlock(block(2, 0)));
        let snap = app.snapshot();
        assert_eq!(snap.pane, Pane::Blocks);
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.items[0].key, ItemKey::Height(2));
        assert_eq!(snap.active, 2);
        assert!(!snap.settled);
    }

    #[test]
    fn grid_area_sets_viewport() {
        let mut app = app();
        app.set_grid_area(Rect::new(0, 2, 100, 20));
        assert_eq!(
            app.visualizer(Pane::Blocks).viewport(),
            Viewport::new(800.0, 320.0)
        );
    }
}
