//! PageGuide — one guide instance bound to one page.
//!
//! Holds the settings and all guide state: target registry, pending change
//! records, visible-target list, step cursor, open/welcome flags, readiness
//! poll, and the outgoing action queue. Shells call the operations directly
//! or go through `execute`.

use crate::command::Command;
use crate::error::{GuideError, Result};
use crate::events::{Hooks, TrackEvent};
use crate::navigation::Navigator;
use crate::page::Page;
use crate::response::{Action, OpenToggle, Response};
use crate::tracking::diff::{self, ChangeRecord};
use crate::tracking::readiness::ReadinessPoll;
use crate::tracking::registry::TargetRegistry;
use crate::tracking::{render, snapshot};
use crate::types::config::GuideSettings;
use crate::types::target::{OverlayId, TargetKey};
use crate::welcome::{StoredWelcome, WelcomeGate};


pub struct PageGuide<P: Page> {
    page: P,
    settings: GuideSettings,
    registry: TargetRegistry,
    changes: Vec<ChangeRecord>,
    visible: Vec<TargetKey>,
    nav: Navigator,
    active: Option<TargetKey>,
    /// Whether the container is on the page. Cleared by `teardown`.
    mounted: bool,
    is_open: bool,
    show_welcome: bool,
    welcome_open: bool,
    ready: bool,
    readiness: ReadinessPoll,
    gate: Box<dyn WelcomeGate>,
    hooks: Hooks,
    actions: Vec<Action>,
}


impl<P: Page> PageGuide<P> {
    /// Attach a guide to `page`. Returns `None` if the page has no tour.
    ///
    /// Queues the removal of any earlier guide followed by the mount of this
    /// one. The welcome gate defaults to an in-memory store; replace it with
    /// `with_welcome_gate` to persist dismissals.
    pub fn init(page: P, settings: GuideSettings) -> Option<PageGuide<P>> {
        if !page.has_tour() {
            tracing::debug!("page carries no tour; guide not attached");
            return None;
        }
        let gate = StoredWelcome::in_memory(&settings.welcome_key_prefix, &page.url());
        let actions = vec![Action::RemoveAll, mount_action(&page, &settings)];
        Some(PageGuide {
            page,
            readiness: ReadinessPoll::new(settings.poll_interval_ms),
            settings,
            registry: TargetRegistry::new(),
            changes: Vec::new(),
            visible: Vec::new(),
            nav: Navigator::new(),
            active: None,
            mounted: true,
            is_open: false,
            show_welcome: false,
            welcome_open: false,
            ready: false,
            gate: Box::new(gate),
            hooks: Hooks::default(),
            actions,
        })
    }

    pub fn with_welcome_gate(mut self, gate: Box<dyn WelcomeGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn settings(&self) -> &GuideSettings {
        &self.settings
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_welcome_open(&self) -> bool {
        self.welcome_open
    }

    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    pub fn visible_target_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible target keys; position `i` is step `i`.
    pub fn visible_targets(&self) -> &[TargetKey] {
        &self.visible
    }

    /// Key of the target whose step is showing.
    pub fn active_target(&self) -> Option<&TargetKey> {
        self.active.as_ref()
    }

    /// Change records not yet rendered. Empty between operations.
    pub fn pending_changes(&self) -> &[ChangeRecord] {
        &self.changes
    }

    /// Actions queued since the last drain.
    pub fn pending_actions(&self) -> &[Action] {
        &self.actions
    }

    /// Take and clear queued actions.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    // -----------------------------------------------------------------------
    // Readiness
    // -----------------------------------------------------------------------

    /// Advance the readiness poll. Returns whether the guide is ready.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let page = &self.page;
        let selector = &self.settings.loading_selector;
        if self.readiness.poll(now_ms, || page.is_shown(selector)) {
            self.become_ready();
        }
        self.ready
    }

    /// The host knows loading has finished; stop polling and get ready now.
    pub fn signal_ready(&mut self) {
        if self.readiness.resolve() {
            self.become_ready();
        }
    }

    pub fn cancel_readiness(&mut self) {
        self.readiness.cancel();
    }

    fn become_ready(&mut self) {
        tracing::info!("page loaded; guide ready");
        self.ready = true;
        self.setup_welcome();
        self.hooks.ready();
    }

    // -----------------------------------------------------------------------
    // Welcome
    // -----------------------------------------------------------------------

    fn setup_welcome(&mut self) {
        if !self.page.has_welcome() {
            return;
        }
        self.show_welcome = !self.gate.is_dismissed();
        if self.show_welcome {
            self.pop_welcome();
        }
    }

    fn pop_welcome(&mut self) {
        self.welcome_open = true;
        self.actions.push(Action::SetWelcomeOpen { open: true });
        self.hooks.track(TrackEvent::WelcomeShown);
    }

    fn close_welcome(&mut self) {
        if self.welcome_open {
            self.welcome_open = false;
            self.actions.push(Action::SetWelcomeOpen { open: false });
        }
    }

    /// Close the welcome for this visit only.
    pub fn ignore_welcome(&mut self) {
        self.close_welcome();
        self.hooks.track(TrackEvent::IgnoreWelcome);
    }

    /// Close the welcome and remember not to show it again on this page.
    pub fn dismiss_welcome(&mut self) {
        self.close_welcome();
        self.gate.dismiss();
        self.show_welcome = false;
        self.hooks.track(TrackEvent::DismissWelcome);
    }

    pub fn start_from_welcome(&mut self) {
        self.open();
        self.hooks.track(TrackEvent::StartFromWelcome);
    }

    // -----------------------------------------------------------------------
    // Open / close
    // -----------------------------------------------------------------------

    /// The open button. Closes an open guide; otherwise shows the welcome
    /// if it is still pending, or opens the guide.
    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else if self.show_welcome && !self.gate.is_dismissed() && !self.welcome_open {
            self.pop_welcome();
        } else {
            self.open();
        }
    }

    /// Open the guide: refresh every target and, with `auto_show_first`,
    /// show the first visible step. A pending welcome is dismissed first.
    pub fn open(&mut self) {
        if self.show_welcome {
            self.gate.dismiss();
            self.show_welcome = false;
            self.close_welcome();
        }
        if self.is_open {
            return;
        }
        self.is_open = true;
        self.hooks.track(TrackEvent::Open);

        self.refresh();
        self.actions.push(Action::SetGuideOpen { open: true });
        tracing::info!(visible = self.visible.len(), "guide opened");

        if self.settings.auto_show_first && !self.visible.is_empty() {
            self.nav.reset();
            if let Err(e) = self.show_step(0) {
                tracing::debug!(error = %e, "first step not shown");
            }
        }
    }

    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        self.hooks.track(TrackEvent::Close);

        self.active = None;
        self.actions.push(Action::ActivateOverlay { overlay: None });
        self.actions.push(Action::HideMessage);
        self.actions.push(Action::SetGuideOpen { open: false });
        tracing::info!("guide closed");
    }

    /// Discover new targets, re-measure all of them, and render the
    /// overlays that changed. Remounts the container after a teardown.
    pub fn refresh(&mut self) {
        if !self.mounted {
            tracing::debug!("remounting guide container");
            self.actions.push(mount_action(&self.page, &self.settings));
            self.mounted = true;
        }

        let entries = self.page.tour_entries();
        self.registry.discover(&entries, &mut self.actions);

        let pass = diff::recompute(&self.page, &mut self.registry);
        self.changes.extend(pass.changes);
        self.visible = pass.visible;

        render::apply_changes(&mut self.changes, &self.registry, &mut self.actions);
        self.follow_active();
    }

    /// Keep the cursor and the active step in line with a new visible list.
    ///
    /// An active target that is still visible keeps its step, renumbered if
    /// targets before it came or went. One that left is deactivated and the
    /// cursor is clamped into the list.
    fn follow_active(&mut self) {
        if let Some(key) = self.active.clone() {
            if let Some(pos) = self.visible.iter().position(|k| *k == key) {
                if pos != self.nav.current() {
                    self.nav.set(pos);
                    if let Some(target) = self.registry.get(key.as_str()) {
                        self.actions.push(Action::ShowMessage {
                            content: target.content.clone(),
                            step: pos + 1,
                        });
                    }
                }
                return;
            }
            tracing::debug!(target_key = %key, "active target left the page");
            self.active = None;
            self.actions.push(Action::ActivateOverlay { overlay: None });
            self.actions.push(Action::HideMessage);
        }
        match self.visible.len() {
            0 => self.nav.reset(),
            n if self.nav.current() >= n => self.nav.set(n - 1),
            _ => {}
        }
    }

    /// Remove everything the guide put on the page and forget all targets.
    /// The instance stays usable: the next refresh (or `open`) mounts a
    /// fresh container and rediscovers every target.
    pub fn teardown(&mut self) {
        self.actions.push(Action::RemoveAll);
        self.mounted = false;
        self.registry.clear();
        self.changes.clear();
        self.visible.clear();
        self.nav.reset();
        self.active = None;
        self.is_open = false;
        self.welcome_open = false;
        self.show_welcome = false;
        self.readiness.cancel();
        tracing::info!("guide torn down");
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Show the step at `index` among visible targets.
    ///
    /// Fails without changing anything when the index is out of range or
    /// the target has left the page since the last refresh.
    pub fn show_step(&mut self, index: usize) -> Result<()> {
        let count = self.visible.len();
        if count == 0 {
            return Err(GuideError::NoVisibleTargets);
        }
        let key = self
            .visible
            .get(index)
            .cloned()
            .ok_or(GuideError::StepOutOfRange { index, count })?;

        let hidden = || GuideError::TargetHidden {
            target: key.clone(),
        };
        let rect = *snapshot::take(&self.page, &key).rect().ok_or_else(hidden)?;
        let target = self.registry.get(key.as_str()).ok_or_else(hidden)?;
        let overlay = target.overlay;
        let content = target.content.clone();
        let step = target.visible_index.unwrap_or(index + 1);

        self.nav.set(index);
        self.actions.push(Action::ActivateOverlay {
            overlay: Some(overlay),
        });
        self.actions.push(Action::ShowMessage { content, step });

        let previous = self.active.replace(key.clone());
        if previous.as_ref() != Some(&key) {
            self.hooks.doc_switch(&key, previous.as_ref());
        }

        let viewport = self.page.viewport();
        if !viewport.contains(&rect, self.settings.scroll_tolerance_px) {
            self.actions.push(Action::ScrollTo {
                top: rect.top - self.settings.scroll_margin_px,
            });
        }
        tracing::debug!(index, target_key = %key, "showing step");
        Ok(())
    }

    pub fn step_forward(&mut self) -> Result<()> {
        let next = self
            .nav
            .forward(self.visible.len())
            .ok_or(GuideError::NoVisibleTargets)?;
        self.hooks.track(TrackEvent::Forward);
        self.show_step(next)
    }

    pub fn step_back(&mut self) -> Result<()> {
        let prev = self
            .nav
            .back(self.visible.len())
            .ok_or(GuideError::NoVisibleTargets)?;
        self.hooks.track(TrackEvent::Back);
        self.show_step(prev)
    }

    /// Show the step bound to a clicked overlay.
    pub fn select_overlay(&mut self, overlay: OverlayId) -> Result<()> {
        let key = self
            .registry
            .key_for_overlay(overlay)
            .ok_or(GuideError::UnknownOverlay { overlay })?;
        let index = self
            .visible
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| GuideError::TargetHidden {
                target: key.clone(),
            })?;
        self.hooks.track(TrackEvent::SpecificElement);
        self.show_step(index)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Guide state as JSON.
    pub fn status(&self) -> serde_json::Value {
        serde_json::json!({
            "open": self.is_open,
            "ready": self.ready,
            "welcome_open": self.welcome_open,
            "current_index": self.nav.current(),
            "visible_count": self.visible.len(),
            "visible": self.visible,
            "active": self.active,
        })
    }

    /// The single dispatch method.
    pub fn execute(&mut self, cmd: Command) -> Response {
        match cmd {
            Command::Status => ok(self.status().to_string()),
            Command::Open => {
                self.open();
                ok(format!("Guide open: {} visible steps", self.visible.len()))
            }
            Command::Close => {
                self.close();
                ok("Guide closed")
            }
            Command::Toggle => {
                self.toggle();
                ok(if self.is_open { "Guide open" } else { "Guide closed" })
            }
            Command::Refresh => {
                self.refresh();
                ok(format!("Refreshed: {} visible steps", self.visible.len()))
            }
            Command::Ready => {
                self.signal_ready();
                ok("Guide ready")
            }
            Command::Teardown => {
                self.teardown();
                ok("Guide removed")
            }
            Command::StepShow { index } => self.step_response(|g| g.show_step(index)),
            Command::StepNext => self.step_response(Self::step_forward),
            Command::StepBack => self.step_response(Self::step_back),
            Command::OverlaySelect { overlay } => {
                self.step_response(|g| g.select_overlay(OverlayId(overlay)))
            }
            Command::WelcomeDismiss => {
                self.dismiss_welcome();
                ok("Welcome dismissed")
            }
            Command::WelcomeIgnore => {
                self.ignore_welcome();
                ok("Welcome closed")
            }
            Command::WelcomeStart => {
                self.start_from_welcome();
                ok("Guide open")
            }
            Command::Help { topic } => ok(crate::help::help_text(topic.as_deref())),
        }
    }

    fn step_response(&mut self, op: impl FnOnce(&mut Self) -> Result<()>) -> Response {
        match op(self) {
            Ok(()) => ok(format!(
                "Step {} of {}",
                self.nav.current() + 1,
                self.visible.len()
            )),
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        }
    }
}


/// Mount action for `page`: the page's own tour title wins over the
/// configured one, and no toggle when the host brings its own button.
fn mount_action<P: Page>(page: &P, settings: &GuideSettings) -> Action {
    let toggle = if settings.custom_open_button {
        None
    } else {
        Some(OpenToggle {
            caption: settings.caption.clone(),
            title: page
                .tour_title()
                .unwrap_or_else(|| settings.tour_title.clone()),
        })
    };
    Action::Mount { toggle }
}


fn ok(output: impl Into<String>) -> Response {
    Response::Ok {
        output: output.into(),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
