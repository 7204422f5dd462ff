//! Pure rendering: a profile and a language in, render instructions out.
//!
//! Nothing here touches a page. [`PageView::render`] produces the complete
//! content of every mount point, and [`PageView::mount_on`] hands it to a
//! [`Mount`] implementation.

use crate::data::{Contact, Hours, Location, MenuSection, RestaurantProfile, Social};
use crate::lang::{get_language_value, Language};
use crate::page::{Mount, MountPoint};

pub const HIDDEN_CLASS: &str = "is-hidden";
pub const WHATSAPP_LABEL: &str = "WhatsApp";

/// A node to append to a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub class: Option<&'static str>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An anchor opening in a new browsing context.
    pub fn external_link(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new("a")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text(label)
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Depth-first search for descendants (and self) carrying `class`.
    pub fn find_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if element.class == Some(class) {
                found.push(element);
            }
            for child in &element.children {
                child.find_by_class(class, found);
            }
        }
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if let Some(class) = element.class {
                    out.push_str(" class=\"");
                    out.push_str(class);
                    out.push('"');
                }
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

/// The localized "Pending" marker.
pub fn pending(lang: Language) -> Node {
    Element::new("span")
        .class("pending")
        .text(lang.pending())
        .into()
}

pub fn render_menu(menu: &[MenuSection], lang: Language) -> Vec<Node> {
    if menu.is_empty() {
        return vec![pending(lang)];
    }

    menu.iter()
        .map(|section| {
            let header = Element::new("h3")
                .class("menu-category")
                .text(get_language_value(section.category.as_ref(), lang));

            let mut list = Element::new("ul").class("menu-list");
            let visible = section
                .items
                .iter()
                .filter_map(|item| item.price.map(|price| (item, price)))
                .collect::<Vec<_>>();

            if visible.is_empty() {
                list = list.child(Element::new("li").class("menu-item").child(pending(lang)));
            }
            for (item, price) in visible {
                let name = Element::new("span")
                    .class("menu-item-name")
                    .text(get_language_value(item.name.as_ref(), lang));
                let price = Element::new("span")
                    .class("menu-item-price")
                    .text(format_usd(price));
                list = list.child(Element::new("li").class("menu-item").child(name).child(price));
            }

            Node::from(
                Element::new("div")
                    .class("menu-section")
                    .child(header)
                    .child(list),
            )
        })
        .collect()
}

pub fn render_hours(hours: &Hours, lang: Language) -> Vec<Node> {
    let rows = hours
        .schedule
        .iter()
        .filter(|row| row.is_displayable())
        .collect::<Vec<_>>();
    if rows.is_empty() {
        return vec![pending(lang)];
    }

    let or_pending = |field: &Option<String>| {
        field
            .clone()
            .unwrap_or_else(|| lang.pending().to_string())
    };
    let list = rows.into_iter().fold(Element::new("ul").class("info-list"), |list, row| {
        let line = format!(
            "{}: {} - {}",
            or_pending(&row.days),
            or_pending(&row.open),
            or_pending(&row.close)
        );
        list.child(Element::new("li").text(line))
    });

    vec![Node::from(list)]
}

pub fn render_location(location: &Location, lang: Language) -> Vec<Node> {
    let parts = [&location.address, &location.city, &location.state]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>();

    if parts.is_empty() && location.google_maps_url.is_none() {
        return vec![pending(lang)];
    }

    let mut nodes: Vec<Node> = Vec::new();
    if !parts.is_empty() {
        nodes.push(Element::new("p").text(parts.join(", ")).into());
    }
    if let Some(url) = &location.google_maps_url {
        let label = lang.pick("Ver en Google Maps", "View on Google Maps");
        nodes.push(Element::external_link(url, label).into());
    }
    nodes
}

/// Empty when there is no phone number; this section has no placeholder.
pub fn render_whatsapp(contact: &Contact, lang: Language) -> Vec<Node> {
    let Some(phone) = &contact.whatsapp else {
        return Vec::new();
    };

    let message = get_language_value(contact.whatsapp_message.as_ref(), lang);
    let href = format!(
        "https://wa.me/{}?text={}",
        encode_uri_component(phone),
        encode_uri_component(message)
    );
    vec![Node::from(
        Element::external_link(href, WHATSAPP_LABEL).class("whatsapp-button"),
    )]
}

/// Links for the channels present in `social`, in fixed channel order.
/// An empty result means the whole social section is hidden.
pub fn render_social(social: &Social, lang: Language) -> Vec<Node> {
    let channels = [
        (&social.facebook, "Facebook"),
        (&social.instagram, "Instagram"),
        (&social.tiktok, "TikTok"),
        (&social.website, lang.pick("Sitio web", "Website")),
    ];

    channels
        .into_iter()
        .filter_map(|(url, label)| {
            url.as_ref()
                .map(|url| Node::from(Element::external_link(url, label)))
        })
        .collect()
}

/// Everything the page shows for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub lang: Language,
    pub name: String,
    pub tagline: String,
    pub menu_title: &'static str,
    pub hours_title: &'static str,
    pub location_title: &'static str,
    pub social_title: &'static str,
    pub menu: Vec<Node>,
    pub hours: Vec<Node>,
    pub location: Vec<Node>,
    pub whatsapp: Vec<Node>,
    pub social: Vec<Node>,
}

impl PageView {
    pub fn render(profile: &RestaurantProfile, lang: Language) -> Self {
        Self {
            lang,
            name: get_language_value(profile.name.as_ref(), lang).to_string(),
            tagline: get_language_value(profile.tagline.as_ref(), lang).to_string(),
            menu_title: lang.pick("Menú", "Menu"),
            hours_title: lang.pick("Horarios", "Hours"),
            location_title: lang.pick("Ubicación", "Location"),
            social_title: lang.pick("Redes", "Social"),
            menu: render_menu(&profile.menu, lang),
            hours: render_hours(&profile.hours, lang),
            location: render_location(&profile.location, lang),
            whatsapp: render_whatsapp(&profile.contact, lang),
            social: render_social(&profile.social, lang),
        }
    }

    pub fn social_hidden(&self) -> bool {
        self.social.is_empty()
    }

    pub fn mount_on<M: Mount>(&self, mount: &mut M) {
        mount.set_text(MountPoint::Name, &self.name);
        mount.set_text(MountPoint::Tagline, &self.tagline);
        mount.set_text(MountPoint::MenuTitle, self.menu_title);
        mount.set_text(MountPoint::HoursTitle, self.hours_title);
        mount.set_text(MountPoint::LocationTitle, self.location_title);
        mount.set_text(MountPoint::SocialTitle, self.social_title);

        mount.replace_children(MountPoint::MenuContainer, &self.menu);
        mount.replace_children(MountPoint::HoursContainer, &self.hours);
        mount.replace_children(MountPoint::LocationContainer, &self.location);
        mount.replace_children(MountPoint::WhatsappContainer, &self.whatsapp);
        mount.replace_children(MountPoint::SocialContainer, &self.social);
        mount.toggle_class(MountPoint::SocialSection, HIDDEN_CLASS, self.social_hidden());
    }
}

/// en-US dollar formatting with exactly two decimals, e.g. `$1,234.50`.
pub fn format_usd(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}$∞");
    }

    let digits = round_to_cents(value.abs());
    let (whole, cents) = digits.split_at(digits.len() - 2);
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Digits of `value * 100` rounded half away from zero, at least three long.
/// Rounds the shortest decimal form of `value` rather than its binary value,
/// so `1.005` becomes `101`.
fn round_to_cents(value: f64) -> String {
    // f64 Display never uses an exponent
    let repr = value.to_string();
    let (whole, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits = whole
        .bytes()
        .chain(frac.bytes().chain(std::iter::repeat(b'0')).take(2))
        .collect::<Vec<u8>>();
    if frac.as_bytes().get(2).map_or(false, |d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    digits.into_iter().map(char::from).collect()
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// matching JavaScript's `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
