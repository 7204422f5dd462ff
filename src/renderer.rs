use crate::data::RestaurantProfile;
use crate::lang::Language;
use crate::page::{Mount, ACTIVE_CLASS};
use crate::source::{resolve_slug, RestaurantSource};
use crate::view::PageView;

/// Owns one page view: the profile, the page it is drawn on and the
/// language currently shown.
pub struct ProfileRenderer<M: Mount> {
    profile: RestaurantProfile,
    mount: M,
    controls: Vec<String>,
    current: Language,
}

impl<M: Mount> ProfileRenderer<M> {
    /// Picks up the page's language controls and draws the default language.
    pub fn install(profile: RestaurantProfile, mount: M) -> Self {
        let controls = mount.language_controls();
        let mut renderer = Self {
            profile,
            mount,
            controls,
            current: Language::default(),
        };
        renderer.select(Language::default());
        renderer
    }

    /// Handles a click on the control at `index`. Returns the language
    /// switched to, or `None` when the click was ignored.
    pub fn click(&mut self, index: usize) -> Option<Language> {
        let Some(code) = self.controls.get(index) else {
            tracing::warn!("no language control at {index}");
            return None;
        };
        let Some(lang) = Language::from_code(code) else {
            tracing::warn!("unsupported language {code:?}");
            return None;
        };
        self.select(lang);
        Some(lang)
    }

    pub fn select(&mut self, lang: Language) {
        tracing::debug!("rendering profile in {lang}");
        self.current = lang;
        for (index, code) in self.controls.iter().enumerate() {
            self.mount
                .toggle_control_class(index, ACTIVE_CLASS, code == lang.code());
        }
        PageView::render(&self.profile, lang).mount_on(&mut self.mount);
    }

    pub fn language(&self) -> Language {
        self.current
    }

    pub fn profile(&self) -> &RestaurantProfile {
        &self.profile
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    pub fn into_mount(self) -> M {
        self.mount
    }
}

/// Loads the profile for `path` and draws it on `mount`. A failed fetch or
/// an unusable document never surfaces: the page shows placeholders instead.
pub async fn init<S, M>(path: &str, source: &S, mount: M) -> ProfileRenderer<M>
where
    S: RestaurantSource,
    M: Mount,
{
    let slug = resolve_slug(path);
    let profile = match load(&slug, source).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("restaurant data unavailable, showing placeholders: {e:#}");
            RestaurantProfile::fallback()
        }
    };
    ProfileRenderer::install(profile, mount)
}

async fn load<S: RestaurantSource>(slug: &str, source: &S) -> anyhow::Result<RestaurantProfile> {
    let doc = source.fetch(slug).await?;
    RestaurantProfile::from_json(&doc)
}
