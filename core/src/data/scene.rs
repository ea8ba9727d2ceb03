//! Scene — an in-memory page described in YAML.
//!
//! A scene lists the page's elements with their measured boxes, the tour
//! (inline or from a markdown file), and guide settings. It answers the
//! guide's `Page` queries and applies the guide's `Action`s to a rendered
//! model, which is what the CLI prints and what scenario tests inspect.
//!
//! ```yaml
//! url: http://localhost/app
//! welcome: true
//! viewport: { scroll_top: 0, height: 800 }
//! settings:
//!   auto_show_first: true
//! tour_file: tour.md
//! elements:
//!   "#search": { top: 40, left: 10, width: 300, height: 30 }
//!   "#loading": { top: 0, left: 0, width: 20, height: 20, rendered: false }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::tour_md::TourMarkup;
use crate::page::Page;
use crate::response::{Action, OpenToggle};
use crate::types::config::GuideSettings;
use crate::types::geometry::{ElementBox, Rect, TargetStyle, Viewport, ZIndex};
use crate::types::target::{OverlayId, TargetKey, TourEntry};


#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}


/// One element of the page, as layout would report it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    #[serde(default = "default_rendered")]
    pub rendered: bool,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Explicit stacking level; absent means `auto`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}


fn default_rendered() -> bool {
    true
}


impl SceneElement {
    pub fn shown(rect: Rect) -> SceneElement {
        SceneElement {
            rendered: true,
            top: rect.top,
            left: rect.left,
            width: rect.width,
            height: rect.height,
            z_index: match rect.z_index {
                ZIndex::Auto => None,
                ZIndex::Level(n) => Some(n),
            },
        }
    }

    pub fn to_box(&self) -> ElementBox {
        ElementBox {
            rendered: self.rendered,
            rect: Rect {
                top: self.top,
                left: self.left,
                width: self.width,
                height: self.height,
                z_index: self.z_index.into(),
            },
        }
    }
}


/// Rendered state of one overlay box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedOverlay {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_class: Option<String>,
    pub style: TargetStyle,
    pub step: Option<usize>,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMessage {
    pub content: String,
    pub step: usize,
}


/// What the guide has drawn on the scene so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rendered {
    pub mounted: bool,
    pub toggle: Option<OpenToggle>,
    pub overlays: BTreeMap<OverlayId, RenderedOverlay>,
    pub active: Option<OverlayId>,
    pub message: Option<RenderedMessage>,
    pub guide_open: bool,
    pub welcome_open: bool,
}


impl Rendered {
    /// Target key of the active overlay.
    pub fn active_target(&self) -> Option<&str> {
        self.active
            .and_then(|id| self.overlays.get(&id))
            .map(|o| o.target.as_str())
    }

    pub fn overlay_for(&self, target: &str) -> Option<&RenderedOverlay> {
        self.overlays.values().find(|o| o.target == target)
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether the page carries a welcome dialog.
    #[serde(default)]
    pub welcome: bool,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub settings: GuideSettings,
    /// Markdown tour, relative to the scene file. Used when `tour` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_file: Option<PathBuf>,
    /// `None` means the page has no tour at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<Vec<TourEntry>>,
    #[serde(default)]
    pub elements: BTreeMap<String, SceneElement>,
    #[serde(skip)]
    pub rendered: Rendered,
}


fn default_url() -> String {
    "about:blank".into()
}


fn default_viewport() -> Viewport {
    Viewport {
        scroll_top: 0.0,
        height: 800.0,
    }
}


impl Default for Scene {
    fn default() -> Self {
        Scene {
            url: default_url(),
            title: None,
            welcome: false,
            viewport: default_viewport(),
            settings: GuideSettings::default(),
            tour_file: None,
            tour: None,
            elements: BTreeMap::new(),
            rendered: Rendered::default(),
        }
    }
}


impl Scene {
    pub fn from_yaml(input: &str) -> Result<Scene, SceneError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a scene file, pulling in its `tour_file` if it names one.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene = Scene::from_yaml(&text)?;

        if scene.tour.is_none() {
            if let Some(rel) = scene.tour_file.clone() {
                let tour_path = path.parent().unwrap_or(Path::new(".")).join(rel);
                let markup = TourMarkup::from_file(&tour_path).map_err(|source| SceneError::Io {
                    path: tour_path.clone(),
                    source,
                })?;
                if scene.title.is_none() {
                    scene.title = markup.title;
                }
                scene.tour = Some(markup.entries);
            }
        }
        Ok(scene)
    }

    pub fn tour_entries_or_empty(&self) -> Vec<TourEntry> {
        self.tour.clone().unwrap_or_default()
    }

    pub fn set_element(&mut self, selector: &str, element: SceneElement) {
        self.elements.insert(selector.to_string(), element);
    }

    pub fn remove_element(&mut self, selector: &str) -> Option<SceneElement> {
        self.elements.remove(selector)
    }

    /// Append a tour step, as a page would after loading more content.
    pub fn push_tour_entry(&mut self, entry: TourEntry) {
        self.tour.get_or_insert_with(Vec::new).push(entry);
    }

    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.apply(&action);
        }
    }

    /// Apply one guide action to the rendered model.
    pub fn apply(&mut self, action: &Action) {
        let r = &mut self.rendered;
        match action {
            Action::Mount { toggle } => {
                r.mounted = true;
                r.toggle = toggle.clone();
            }
            Action::CreateOverlay {
                overlay,
                target,
                position_class,
            } => {
                r.overlays.insert(
                    *overlay,
                    RenderedOverlay {
                        target: target.clone(),
                        position_class: position_class.clone(),
                        style: TargetStyle::default(),
                        step: None,
                    },
                );
            }
            Action::StyleOverlay { overlay, style } => {
                if let Some(o) = r.overlays.get_mut(overlay) {
                    o.style.merge(style);
                }
            }
            Action::LabelOverlay { overlay, step } => {
                if let Some(o) = r.overlays.get_mut(overlay) {
                    o.step = *step;
                }
            }
            Action::ActivateOverlay { overlay } => r.active = *overlay,
            Action::ShowMessage { content, step } => {
                r.message = Some(RenderedMessage {
                    content: content.clone(),
                    step: *step,
                });
            }
            Action::HideMessage => r.message = None,
            Action::ScrollTo { top } => self.viewport.scroll_top = top.max(0.0),
            Action::SetGuideOpen { open } => r.guide_open = *open,
            Action::SetWelcomeOpen { open } => r.welcome_open = *open,
            Action::RemoveAll => *r = Rendered::default(),
        }
    }
}


impl Page for Scene {
    fn has_tour(&self) -> bool {
        self.tour.is_some()
    }

    fn tour_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn tour_entries(&self) -> Vec<TourEntry> {
        self.tour_entries_or_empty()
    }

    fn inspect(&self, key: &TargetKey) -> Option<ElementBox> {
        self.elements.get(key.as_str()).map(SceneElement::to_box)
    }

    fn is_shown(&self, selector: &str) -> bool {
        self.elements
            .get(selector)
            .map(|el| {
                let b = el.to_box();
                b.rendered && b.rect.has_area()
            })
            .unwrap_or(false)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn has_welcome(&self) -> bool {
        self.welcome
    }

    fn url(&self) -> String {
        self.url.clone()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
