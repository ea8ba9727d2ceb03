//! Host callbacks — interaction tracking, documentation switch, readiness.

use std::fmt;

use crate::types::target::TargetKey;


/// Named user interactions reported to the tracking sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent {
    Open,
    Close,
    Forward,
    Back,
    SpecificElement,
    WelcomeShown,
    IgnoreWelcome,
    DismissWelcome,
    StartFromWelcome,
}


impl TrackEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackEvent::Open => "PG.open",
            TrackEvent::Close => "PG.close",
            TrackEvent::Forward => "PG.fwd",
            TrackEvent::Back => "PG.back",
            TrackEvent::SpecificElement => "PG.specific_elt",
            TrackEvent::WelcomeShown => "PG.welcomeShown",
            TrackEvent::IgnoreWelcome => "PG.ignoreWelcome",
            TrackEvent::DismissWelcome => "PG.dismissWelcome",
            TrackEvent::StartFromWelcome => "PG.startFromWelcome",
        }
    }
}


impl fmt::Display for TrackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


pub type TrackFn = Box<dyn FnMut(TrackEvent)>;
pub type DocSwitchFn = Box<dyn FnMut(&TargetKey, Option<&TargetKey>)>;
pub type ReadyFn = Box<dyn FnMut()>;


/// Optional callbacks supplied by the host. All are fire-and-forget.
#[derive(Default)]
pub struct Hooks {
    pub track: Option<TrackFn>,
    /// Called with (new, previous) whenever the active target changes.
    pub doc_switch: Option<DocSwitchFn>,
    /// Called once, when the page has finished loading.
    pub ready: Option<ReadyFn>,
}


impl Hooks {
    pub fn track(&mut self, event: TrackEvent) {
        tracing::trace!(event = event.as_str(), "track");
        if let Some(cb) = self.track.as_mut() {
            cb(event);
        }
    }

    pub fn doc_switch(&mut self, current: &TargetKey, previous: Option<&TargetKey>) {
        if let Some(cb) = self.doc_switch.as_mut() {
            cb(current, previous);
        }
    }

    pub fn ready(&mut self) {
        if let Some(cb) = self.ready.as_mut() {
            cb();
        }
    }
}


impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("track", &self.track.is_some())
            .field("doc_switch", &self.doc_switch.is_some())
            .field("ready", &self.ready.is_some())
            .finish()
    }
}
