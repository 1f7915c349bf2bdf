//! UI surface registry and the gate's surface resolver.
//!
//! Surfaces register by name, tag and owner when the scene loads and are
//! dropped on teardown. The resolver runs its fallback chain on every
//! request: explicit reference, then surfaces of the configured owner, then
//! a registry-wide search that includes inactive surfaces.

use doorway_core::config::SurfaceConfig;
use doorway_core::constants::QUIZ_SURFACE_KEYWORD;

/// Stable handle to a registered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(usize);

#[derive(Debug, Clone)]
pub struct UiSurface {
    pub name: String,
    pub tag: Option<String>,
    pub owner: Option<String>,
    pub parent: Option<SurfaceId>,
    pub active: bool,
    pub visible: bool,
    pub interactable: bool,
    pub blocks_raycasts: bool,
    pub alpha: f32,
    pub text: String,
}

/// What the resolver should look for.
#[derive(Debug, Clone, Default)]
pub struct UiTarget {
    pub explicit: Option<SurfaceId>,
    pub owner: Option<String>,
    pub name: Option<String>,
    pub tag: Option<String>,
}

/// Which stage of the fallback chain produced the surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Explicit(SurfaceId),
    Owned(Vec<SurfaceId>),
    Searched(Vec<SurfaceId>),
    NotFound,
}

impl Resolution {
    pub fn roots(&self) -> Vec<SurfaceId> {
        match self {
            Resolution::Explicit(id) => vec![*id],
            Resolution::Owned(ids) | Resolution::Searched(ids) => ids.clone(),
            Resolution::NotFound => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiRegistry {
    surfaces: Vec<UiSurface>,
}

impl UiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        tag: Option<String>,
        owner: Option<String>,
        parent: Option<SurfaceId>,
        active: bool,
    ) -> SurfaceId {
        let id = SurfaceId(self.surfaces.len());
        self.surfaces.push(UiSurface {
            name: name.into(),
            tag,
            owner,
            parent,
            active,
            visible: active,
            interactable: active,
            blocks_raycasts: active,
            alpha: if active { 1.0 } else { 0.0 },
            text: String::new(),
        });
        id
    }

    /// Register a surface from scene config. The parent must already be registered.
    pub fn register_config(&mut self, config: &SurfaceConfig) -> SurfaceId {
        let parent = config.parent.as_deref().and_then(|p| {
            let found = self.find(p);
            if found.is_none() {
                log::warn!(
                    "surface '{}': parent '{}' not registered, attaching at root",
                    config.name,
                    p
                );
            }
            found
        });
        self.register(
            config.name.clone(),
            config.tag.clone(),
            config.owner.clone(),
            parent,
            config.active,
        )
    }

    pub fn get(&self, id: SurfaceId) -> Option<&UiSurface> {
        self.surfaces.get(id.0)
    }

    /// First surface registered under `name`.
    pub fn find(&self, name: &str) -> Option<SurfaceId> {
        self.surfaces
            .iter()
            .position(|s| s.name == name)
            .map(SurfaceId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &UiSurface)> {
        self.surfaces
            .iter()
            .enumerate()
            .map(|(i, s)| (SurfaceId(i), s))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Drop every surface (scene teardown).
    pub fn clear(&mut self) {
        self.surfaces.clear();
    }

    /// Every surface below `root`, depth first.
    pub fn descendants(&self, root: SurfaceId) -> Vec<SurfaceId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            for (id, surface) in self.iter() {
                if surface.parent == Some(current) {
                    out.push(id);
                    stack.push(id);
                }
            }
        }
        out
    }

    /// Make `root` and everything under it visible and interactive.
    pub fn show(&mut self, root: SurfaceId) {
        for id in std::iter::once(root).chain(self.descendants(root)) {
            if let Some(s) = self.surfaces.get_mut(id.0) {
                s.active = true;
                s.visible = true;
                s.interactable = true;
                s.blocks_raycasts = true;
                s.alpha = 1.0;
            }
        }
    }

    /// Hide `root` and everything under it and make them inert.
    pub fn hide(&mut self, root: SurfaceId) {
        for id in std::iter::once(root).chain(self.descendants(root)) {
            if let Some(s) = self.surfaces.get_mut(id.0) {
                s.active = false;
                s.visible = false;
                s.interactable = false;
                s.blocks_raycasts = false;
                s.alpha = 0.0;
            }
        }
    }

    /// Show or hide the first surface called `name`. Returns whether it exists.
    pub fn set_visible_by_name(&mut self, name: &str, visible: bool) -> bool {
        match self.find(name) {
            Some(id) if visible => {
                self.show(id);
                true
            }
            Some(id) => {
                self.hide(id);
                true
            }
            None => false,
        }
    }

    pub fn set_text(&mut self, id: SurfaceId, text: impl Into<String>) {
        if let Some(s) = self.surfaces.get_mut(id.0) {
            s.text = text.into();
        }
    }

    /// Run the fallback chain. First stage with a result wins.
    pub fn resolve(&self, target: &UiTarget) -> Resolution {
        if let Some(id) = target.explicit {
            return Resolution::Explicit(id);
        }

        if let Some(owner) = target.owner.as_deref() {
            let owned: Vec<SurfaceId> = self
                .iter()
                .filter(|(_, s)| s.owner.as_deref() == Some(owner))
                .map(|(id, _)| id)
                .collect();
            if !owned.is_empty() {
                return Resolution::Owned(owned);
            }
        }

        let matched: Vec<SurfaceId> = self
            .iter()
            .filter(|(_, s)| matches_search(s, target))
            .map(|(id, _)| id)
            .collect();
        if matched.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::Searched(matched)
        }
    }

    /// Resolve `target` and show every root found.
    pub fn activate(&mut self, target: &UiTarget) -> Resolution {
        let resolution = self.resolve(target);
        for id in resolution.roots() {
            self.show(id);
        }
        self.log_resolution("activated", &resolution);
        resolution
    }

    /// Resolve `target` and hide every root found.
    pub fn deactivate(&mut self, target: &UiTarget) -> Resolution {
        let resolution = self.resolve(target);
        for id in resolution.roots() {
            self.hide(id);
        }
        self.log_resolution("deactivated", &resolution);
        resolution
    }

    fn log_resolution(&self, verb: &str, resolution: &Resolution) {
        match resolution {
            Resolution::Explicit(id) => {
                let name = self.get(*id).map(|s| s.name.as_str()).unwrap_or("?");
                log::info!("{verb} explicit surface '{name}'");
            }
            Resolution::Owned(ids) => {
                log::info!("{verb} {} surface(s) under owner", ids.len());
            }
            Resolution::Searched(ids) => {
                for id in ids {
                    if let Some(s) = self.get(*id) {
                        log::info!("{verb} surface '{}' (matched by search)", s.name);
                    }
                }
            }
            Resolution::NotFound => {
                log::warn!("configuration missing: no quiz surface found, nothing {verb}");
            }
        }
    }
}

fn matches_search(surface: &UiSurface, target: &UiTarget) -> bool {
    if let Some(name) = target.name.as_deref() {
        if !name.is_empty() && surface.name == name {
            return true;
        }
    }
    if let (Some(tag), Some(surface_tag)) = (target.tag.as_deref(), surface.tag.as_deref()) {
        if !tag.is_empty() && surface_tag == tag {
            return true;
        }
    }
    surface.name.to_lowercase().contains(QUIZ_SURFACE_KEYWORD)
}

#[cfg(test)]
mod tests {
    use super::{Resolution, UiRegistry, UiTarget};

    fn search_target() -> UiTarget {
        UiTarget {
            explicit: None,
            owner: Some("QuizManager".into()),
            name: Some("QuizCanvas".into()),
            tag: Some("QuizUI".into()),
        }
    }

    #[test]
    fn explicit_reference_wins_even_when_inactive() {
        let mut ui = UiRegistry::new();
        let explicit = ui.register("Panel", None, None, None, false);
        let searched = ui.register("QuizCanvas", None, None, None, false);

        let target = UiTarget {
            explicit: Some(explicit),
            ..search_target()
        };
        assert_eq!(ui.activate(&target), Resolution::Explicit(explicit));
        assert!(ui.get(explicit).unwrap().active);
        assert!(!ui.get(searched).unwrap().active, "search stage must not run");
    }

    #[test]
    fn owner_surfaces_suppress_search() {
        let mut ui = UiRegistry::new();
        let a = ui.register("A", None, Some("QuizManager".into()), None, false);
        let b = ui.register("B", None, Some("QuizManager".into()), None, false);
        let other = ui.register("QuizCanvas", None, None, None, false);

        assert_eq!(ui.activate(&search_target()), Resolution::Owned(vec![a, b]));
        assert!(ui.get(a).unwrap().active && ui.get(b).unwrap().active);
        assert!(!ui.get(other).unwrap().active);
    }

    #[test]
    fn search_processes_every_match() {
        let mut ui = UiRegistry::new();
        let by_name = ui.register("QuizCanvas", None, None, None, false);
        let by_tag = ui.register("Overlay", Some("QuizUI".into()), None, None, false);
        let by_keyword = ui.register("BonusQUIZPanel", None, None, None, false);
        let unrelated = ui.register("Hud", None, None, None, false);

        let resolution = ui.activate(&search_target());
        assert_eq!(
            resolution,
            Resolution::Searched(vec![by_name, by_tag, by_keyword])
        );
        assert!(!ui.get(unrelated).unwrap().active);
    }

    #[test]
    fn nothing_found_is_a_no_op() {
        let mut ui = UiRegistry::new();
        let hud = ui.register("Hud", None, None, None, true);
        assert_eq!(ui.deactivate(&search_target()), Resolution::NotFound);
        assert!(ui.get(hud).unwrap().active);
    }

    #[test]
    fn show_and_hide_cover_descendants() {
        let mut ui = UiRegistry::new();
        let root = ui.register("QuizCanvas", None, None, None, false);
        let child = ui.register("Buttons", None, None, Some(root), false);
        let grandchild = ui.register("Answer0", None, None, Some(child), false);

        ui.show(root);
        for id in [root, child, grandchild] {
            let s = ui.get(id).unwrap();
            assert!(s.active && s.interactable && s.blocks_raycasts);
            assert_eq!(s.alpha, 1.0);
        }

        ui.hide(root);
        for id in [root, child, grandchild] {
            let s = ui.get(id).unwrap();
            assert!(!s.active && !s.interactable && !s.blocks_raycasts);
            assert_eq!(s.alpha, 0.0);
        }
    }

    #[test]
    fn resolution_is_not_cached() {
        let mut ui = UiRegistry::new();
        let target = search_target();
        assert_eq!(ui.resolve(&target), Resolution::NotFound);
        let late = ui.register("QuizCanvas", None, None, None, false);
        assert_eq!(ui.resolve(&target), Resolution::Searched(vec![late]));
    }
}
