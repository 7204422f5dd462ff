use std::collections::{BTreeMap, BTreeSet};

use crate::lang::Language;
use crate::view::Node;

pub const ACTIVE_CLASS: &str = "is-active";

/// Named elements the host page provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MountPoint {
    Name,
    Tagline,
    MenuTitle,
    MenuContainer,
    HoursTitle,
    HoursContainer,
    LocationTitle,
    LocationContainer,
    WhatsappContainer,
    SocialTitle,
    SocialContainer,
    SocialSection,
}

impl MountPoint {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Name => "restaurant-name",
            Self::Tagline => "restaurant-tagline",
            Self::MenuTitle => "menu-title",
            Self::MenuContainer => "menu-container",
            Self::HoursTitle => "hours-title",
            Self::HoursContainer => "hours-container",
            Self::LocationTitle => "location-title",
            Self::LocationContainer => "location-container",
            Self::WhatsappContainer => "whatsapp-container",
            Self::SocialTitle => "social-title",
            Self::SocialContainer => "social-container",
            Self::SocialSection => "social-section",
        }
    }
}

/// A page the renderer can write into.
pub trait Mount {
    fn set_text(&mut self, at: MountPoint, text: &str);

    /// Clears the element, then appends `children`.
    fn replace_children(&mut self, at: MountPoint, children: &[Node]);

    fn toggle_class(&mut self, at: MountPoint, class: &str, on: bool);

    /// Language codes of the page's language controls, in page order.
    fn language_controls(&self) -> Vec<String>;

    fn toggle_control_class(&mut self, control: usize, class: &str, on: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageControl {
    pub code: String,
    pub classes: BTreeSet<String>,
}

/// In-memory page: records whatever was mounted and can print it as HTML.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    texts: BTreeMap<MountPoint, String>,
    children: BTreeMap<MountPoint, Vec<Node>>,
    classes: BTreeMap<MountPoint, BTreeSet<String>>,
    controls: Vec<LanguageControl>,
}

impl MemoryPage {
    /// A page with one control per language code, e.g. `["es", "en"]`.
    pub fn with_controls<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            controls: codes
                .into_iter()
                .map(|code| LanguageControl {
                    code: code.into(),
                    classes: BTreeSet::new(),
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Controls for every supported language.
    pub fn bilingual() -> Self {
        Self::with_controls(Language::ALL.iter().map(Language::code))
    }

    pub fn text(&self, at: MountPoint) -> &str {
        self.texts.get(&at).map(String::as_str).unwrap_or_default()
    }

    pub fn children(&self, at: MountPoint) -> &[Node] {
        self.children.get(&at).map(Vec::as_slice).unwrap_or_default()
    }

    /// Text of a container and all of its descendants.
    pub fn content(&self, at: MountPoint) -> String {
        self.children(at).iter().map(Node::text_content).collect()
    }

    pub fn has_class(&self, at: MountPoint, class: &str) -> bool {
        self.classes
            .get(&at)
            .map_or(false, |classes| classes.contains(class))
    }

    pub fn controls(&self) -> &[LanguageControl] {
        &self.controls
    }

    /// Codes of the controls currently marked active.
    pub fn active_controls(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|control| control.classes.contains(ACTIVE_CLASS))
            .map(|control| control.code.as_str())
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();

        out.push_str("<header>\n");
        self.write_text_element(&mut out, "h1", MountPoint::Name);
        self.write_text_element(&mut out, "p", MountPoint::Tagline);
        out.push_str("  <nav>");
        for control in &self.controls {
            out.push_str("<button class=\"");
            out.push_str(&class_list("lang-button", &control.classes));
            out.push_str("\" data-lang=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(&control.code));
            out.push_str("\">");
            out.push_str(&html_escape::encode_text(&control.code.to_uppercase()));
            out.push_str("</button>");
        }
        out.push_str("</nav>\n");
        self.write_container(&mut out, "div", MountPoint::WhatsappContainer);
        out.push_str("</header>\n");

        for (title, container) in [
            (MountPoint::MenuTitle, MountPoint::MenuContainer),
            (MountPoint::HoursTitle, MountPoint::HoursContainer),
            (MountPoint::LocationTitle, MountPoint::LocationContainer),
        ] {
            out.push_str("<section>\n");
            self.write_text_element(&mut out, "h2", title);
            self.write_container(&mut out, "div", container);
            out.push_str("</section>\n");
        }

        out.push_str("<section id=\"social-section\"");
        if let Some(classes) = self.classes.get(&MountPoint::SocialSection) {
            if !classes.is_empty() {
                out.push_str(" class=\"");
                out.push_str(&classes.iter().cloned().collect::<Vec<_>>().join(" "));
                out.push('"');
            }
        }
        out.push_str(">\n");
        self.write_text_element(&mut out, "h2", MountPoint::SocialTitle);
        self.write_container(&mut out, "div", MountPoint::SocialContainer);
        out.push_str("</section>\n");

        out
    }

    fn write_text_element(&self, out: &mut String, tag: &str, at: MountPoint) {
        out.push_str(&format!(
            "  <{tag} id=\"{}\">{}</{tag}>\n",
            at.id(),
            html_escape::encode_text(self.text(at))
        ));
    }

    fn write_container(&self, out: &mut String, tag: &str, at: MountPoint) {
        out.push_str(&format!("  <{tag} id=\"{}\">", at.id()));
        for node in self.children(at) {
            node.write_html(out);
        }
        out.push_str(&format!("</{tag}>\n"));
    }
}

fn class_list(base: &str, extra: &BTreeSet<String>) -> String {
    std::iter::once(base)
        .chain(extra.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Mount for MemoryPage {
    fn set_text(&mut self, at: MountPoint, text: &str) {
        self.texts.insert(at, text.to_string());
    }

    fn replace_children(&mut self, at: MountPoint, children: &[Node]) {
        self.children.insert(at, children.to_vec());
    }

    fn toggle_class(&mut self, at: MountPoint, class: &str, on: bool) {
        let classes = self.classes.entry(at).or_default();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn language_controls(&self) -> Vec<String> {
        self.controls.iter().map(|control| control.code.clone()).collect()
    }

    fn toggle_control_class(&mut self, control: usize, class: &str, on: bool) {
        let Some(control) = self.controls.get_mut(control) else {
            return;
        };
        if on {
            control.classes.insert(class.to_string());
        } else {
            control.classes.remove(class);
        }
    }
}
