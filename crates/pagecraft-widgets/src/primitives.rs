#![forbid(unsafe_code)]

//! Leaf widgets.
//!
//! Text-like leaves inject `content` verbatim as markup. Any node may carry
//! `htmlCode`, `cssCode`, and `jsCode`, which [`inject_author_code`] splices
//! into its rendered element. Both are trusted author input and are not
//! sanitized.

use pagecraft_core::Component;
use pagecraft_render::{Element, Node, css};
use serde_json::Value;

use crate::{RenderContext, Widget};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Root element of a component: tag, kind class, author class, author style.
#[must_use]
pub fn shell(node: &Component, tag: &'static str, class: &'static str) -> Element {
    let mut el = Element::new(tag).class(class).node_id(node.id.as_str());
    if let Some(class_name) = &node.class_name {
        el = el.class(class_name.clone());
    }
    el.styles(css::declarations(&node.style))
}

/// Editor-only placeholder text.
fn placeholder(el: Element, ctx: &RenderContext<'_>, text: &str) -> Element {
    if ctx.is_editor() {
        el.class("pc-placeholder").text(text)
    } else {
        el
    }
}

/// Body of a text-like leaf: raw `content`, else escaped `props[key]`.
fn rich_text(
    el: Element,
    node: &Component,
    ctx: &RenderContext<'_>,
    key: &str,
    empty: &str,
) -> Element {
    if let Some(content) = node.content.as_deref().filter(|c| !c.is_empty()) {
        return el.raw(content);
    }
    match node.prop_str(key) {
        Some(text) => el.text(text),
        None => placeholder(el, ctx, empty),
    }
}

pub struct Heading<'a>(pub &'a Component);

impl Widget for Heading<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let level = self.0.prop_u64("level").unwrap_or(2).clamp(1, 6);
        let tag = HEADING_TAGS[usize::try_from(level - 1).unwrap_or(1)];
        rich_text(shell(self.0, tag, "pc-heading"), self.0, ctx, "text", "Heading")
    }

    fn name(&self) -> &'static str {
        "Heading"
    }
}

pub struct Text<'a>(pub &'a Component);

impl Widget for Text<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        rich_text(shell(self.0, "div", "pc-text"), self.0, ctx, "text", "Start typing…")
    }

    fn name(&self) -> &'static str {
        "Text"
    }
}

pub struct Button<'a>(pub &'a Component);

impl Widget for Button<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let label = node
            .prop_str("label")
            .or(node.content.as_deref())
            .unwrap_or("Button");
        let el = match node.prop_str("href") {
            Some(href) => {
                let el = shell(node, "a", "pc-button").attr("href", href);
                if node.prop_bool("newTab").unwrap_or(false) {
                    el.attr("target", "_blank").attr("rel", "noopener noreferrer")
                } else {
                    el
                }
            }
            None => shell(node, "button", "pc-button").attr("type", "button"),
        };
        let variant = node.prop_str("variant").unwrap_or("primary");
        el.class(format!("pc-button-{variant}")).text(label)
    }

    fn name(&self) -> &'static str {
        "Button"
    }
}

pub struct Image<'a>(pub &'a Component);

impl Widget for Image<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        match node.prop_str("src").filter(|src| !src.is_empty()) {
            Some(src) => shell(node, "img", "pc-image")
                .attr("src", src)
                .attr("alt", node.prop_str("alt").unwrap_or_default())
                .attr("loading", "lazy"),
            None => placeholder(shell(node, "div", "pc-image"), ctx, "No image selected"),
        }
    }

    fn name(&self) -> &'static str {
        "Image"
    }
}

/// Embed URL for known video hosts, or `None` for direct media files.
#[must_use]
pub fn embed_url(url: &str) -> Option<String> {
    if let Some((_, rest)) = url.split_once("youtube.com/watch?v=") {
        let id = rest.split('&').next().unwrap_or(rest);
        return Some(format!("https://www.youtube.com/embed/{id}"));
    }
    if let Some((_, id)) = url.split_once("youtu.be/") {
        let id = id.split('?').next().unwrap_or(id);
        return Some(format!("https://www.youtube.com/embed/{id}"));
    }
    if let Some((_, id)) = url.split_once("vimeo.com/") {
        if !url.contains("player.vimeo.com") {
            return Some(format!("https://player.vimeo.com/video/{id}"));
        }
    }
    if url.contains("/embed/") || url.contains("player.vimeo.com") {
        return Some(url.to_string());
    }
    None
}

pub struct Video<'a>(pub &'a Component);

impl Widget for Video<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let Some(url) = node.prop_str("url").filter(|url| !url.is_empty()) else {
            return placeholder(shell(node, "div", "pc-video"), ctx, "No video selected");
        };
        let player = match embed_url(url) {
            Some(src) => Element::new("iframe")
                .attr("src", src)
                .attr("title", node.prop_str("title").unwrap_or("Video"))
                .attr("allowfullscreen", "true"),
            None => {
                let el = Element::new("video").attr("src", url).attr("controls", "true");
                if node.prop_bool("autoplay").unwrap_or(false) {
                    el.attr("autoplay", "true").attr("muted", "true")
                } else {
                    el
                }
            }
        };
        shell(node, "div", "pc-video").child(player)
    }

    fn name(&self) -> &'static str {
        "Video"
    }
}

pub struct Divider<'a>(pub &'a Component);

impl Widget for Divider<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        shell(self.0, "hr", "pc-divider")
    }

    fn name(&self) -> &'static str {
        "Divider"
    }
}

pub struct Spacer<'a>(pub &'a Component);

impl Widget for Spacer<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let height = self
            .0
            .props
            .get("height")
            .and_then(|v| css::property_value("height", v))
            .unwrap_or_else(|| "32px".to_string());
        shell(self.0, "div", "pc-spacer")
            .attr("aria-hidden", "true")
            .style("height", height)
    }

    fn name(&self) -> &'static str {
        "Spacer"
    }
}

pub struct Code<'a>(pub &'a Component);

impl Widget for Code<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let mut code = Element::new("code");
        if let Some(language) = node.prop_str("language") {
            code = code.class(format!("language-{language}"));
        }
        let code = match (node.prop_str("code"), node.content.as_deref()) {
            (Some(source), _) => code.text(source),
            (None, Some(markup)) => code.raw(markup),
            (None, None) => placeholder(code, ctx, "// code"),
        };
        shell(node, "pre", "pc-code").child(code)
    }

    fn name(&self) -> &'static str {
        "Code"
    }
}

pub struct Alert<'a>(pub &'a Component);

impl Widget for Alert<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let variant = match node.prop_str("variant") {
            Some(v @ ("info" | "success" | "warning" | "error")) => v,
            _ => "info",
        };
        let mut el = shell(node, "div", "pc-alert")
            .class(format!("pc-alert-{variant}"))
            .attr("role", "alert");
        if let Some(title) = node.prop_str("title") {
            el = el.child(Element::new("strong").class("pc-alert-title").text(title));
        }
        rich_text(el, node, ctx, "message", "Alert message")
    }

    fn name(&self) -> &'static str {
        "Alert"
    }
}

pub struct SocialIcons<'a>(pub &'a Component);

impl Widget for SocialIcons<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let links: Vec<_> = node
            .prop_array("links")
            .iter()
            .filter_map(|link| {
                let network = link.get("network").and_then(Value::as_str)?;
                let url = link.get("url").and_then(Value::as_str).unwrap_or("#");
                Some(
                    Element::new("a")
                        .class("pc-social-link")
                        .attr("data-network", network)
                        .attr("href", url)
                        .attr("target", "_blank")
                        .attr("rel", "noopener noreferrer")
                        .attr("aria-label", network)
                        .text(network),
                )
            })
            .map(Node::from)
            .collect();
        let el = shell(node, "div", "pc-social-icons");
        if links.is_empty() {
            return placeholder(el, ctx, "Add social links");
        }
        el.children(links)
    }

    fn name(&self) -> &'static str {
        "SocialIcons"
    }
}

fn author_payload<'a>(node: &'a Component, key: &str) -> Option<&'a str> {
    node.prop_str(key).filter(|s| !s.trim().is_empty())
}

/// Splice a node's author code into its rendered element: `cssCode` as a
/// leading `<style>`, `htmlCode` in place of the default body, `jsCode` as a
/// trailing `<script>`. Elements of nodes without payloads pass through.
#[must_use]
pub fn inject_author_code(node: &Component, mut el: Element) -> Element {
    let css = author_payload(node, "cssCode");
    let html = author_payload(node, "htmlCode");
    let js = author_payload(node, "jsCode");
    if css.is_none() && html.is_none() && js.is_none() {
        return el;
    }
    let body = el.take_children();
    if let Some(css) = css {
        el.push(Element::new("style").raw(css));
    }
    el = match html {
        Some(html) => el.raw(html),
        None => el.children(body),
    };
    if let Some(js) = js {
        el.push(Element::new("script").raw(js));
    }
    el
}

/// Frame for author HTML/CSS/JS; the payloads themselves are spliced in by
/// [`inject_author_code`].
pub struct CustomCode<'a>(pub &'a Component);

impl Widget for CustomCode<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let el = shell(node, "div", "pc-custom-code");
        if author_payload(node, "htmlCode").is_some() {
            return el;
        }
        placeholder(el, ctx, "Custom code")
    }

    fn name(&self) -> &'static str {
        "CustomCode"
    }
}

/// Fallback for tags this renderer does not know.
pub struct UnknownKind<'a>(pub &'a Component);

impl Widget for UnknownKind<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        Element::div()
            .class("pc-unknown")
            .node_id(self.0.id.as_str())
            .attr("role", "note")
            .text(format!("Unknown component type: {}", self.0.kind))
    }

    fn name(&self) -> &'static str {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderOptions, WidgetStates};
    use pagecraft_core::{ComponentKind, RenderMode, SelectionState};
    use pagecraft_layout::Unconstrained;
    use pagecraft_render::Frame;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn html(mode: RenderMode, widget: &dyn Widget) -> String {
        let mut frame = Frame::new(mode);
        let states = WidgetStates::new();
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&mut frame, &Unconstrained, &states, &options, SelectionState::none());
        widget.render(&mut ctx).to_html()
    }

    #[test]
    fn heading_injects_content_verbatim() {
        let node = Component::new("h", ComponentKind::Heading)
            .with_prop("level", 1)
            .with_content("Hello <em>world</em>")
            .with_style("fontSize", 32);
        assert_eq!(
            html(RenderMode::Runtime, &Heading(&node)),
            "<h1 class=\"pc-heading\" data-node=\"h\" style=\"font-size: 32px;\">Hello <em>world</em></h1>"
        );
    }

    #[test]
    fn empty_text_placeholder_is_editor_only() {
        let node = Component::new("t", ComponentKind::Text);
        assert!(html(RenderMode::Editor, &Text(&node)).contains("pc-placeholder"));
        assert!(!html(RenderMode::Runtime, &Text(&node)).contains("pc-placeholder"));
    }

    #[test]
    fn button_with_href_is_a_link() {
        let node = Component::new("b", ComponentKind::Button)
            .with_prop("label", "Buy")
            .with_prop("href", "/buy")
            .with_class("wide");
        assert_eq!(
            html(RenderMode::Runtime, &Button(&node)),
            "<a class=\"pc-button wide pc-button-primary\" data-node=\"b\" href=\"/buy\">Buy</a>"
        );
    }

    #[test]
    fn video_urls_become_embeds() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc123&t=5").as_deref(),
            Some("https://www.youtube.com/embed/abc123")
        );
        assert_eq!(
            embed_url("https://youtu.be/xyz?si=1").as_deref(),
            Some("https://www.youtube.com/embed/xyz")
        );
        assert_eq!(
            embed_url("https://vimeo.com/42").as_deref(),
            Some("https://player.vimeo.com/video/42")
        );
        assert_eq!(embed_url("https://cdn.example.com/clip.mp4"), None);
    }

    #[test]
    fn custom_code_injects_all_three_payloads() {
        let node = Component::new("cc", ComponentKind::CustomCode)
            .with_prop("htmlCode", "<marquee>hi</marquee>")
            .with_prop("cssCode", "marquee { color: red }")
            .with_prop("jsCode", "console.log(1)");
        let out = inject_author_code(&node, shell(&node, "div", "pc-custom-code"));
        assert_eq!(
            out.to_html(),
            "<div class=\"pc-custom-code\" data-node=\"cc\"><style>marquee { color: red }</style>\
             <marquee>hi</marquee><script>console.log(1)</script></div>"
        );
    }

    #[test]
    fn css_and_js_wrap_the_default_body() {
        let node = Component::new("t", ComponentKind::Text)
            .with_content("<p>body</p>")
            .with_prop("cssCode", ".pc-text { color: red }")
            .with_prop("jsCode", "init()");
        let mut frame = Frame::new(RenderMode::Runtime);
        let states = WidgetStates::new();
        let options = RenderOptions::default();
        let mut ctx = RenderContext::new(&mut frame, &Unconstrained, &states, &options, SelectionState::none());
        let out = inject_author_code(&node, Text(&node).render(&mut ctx));
        assert_eq!(
            out.to_html(),
            "<div class=\"pc-text\" data-node=\"t\"><style>.pc-text { color: red }</style>\
             <p>body</p><script>init()</script></div>"
        );
    }

    #[test]
    fn blank_payloads_are_ignored() {
        let node = Component::new("t", ComponentKind::Text)
            .with_content("x")
            .with_prop("htmlCode", "  ");
        let el = shell(&node, "div", "pc-text").text("x");
        assert_eq!(inject_author_code(&node, el.clone()), el);
    }

    #[test]
    fn custom_code_placeholder_only_without_html() {
        let empty = Component::new("cc", ComponentKind::CustomCode);
        assert!(html(RenderMode::Editor, &CustomCode(&empty)).contains("pc-placeholder"));
        let filled = Component::new("cc", ComponentKind::CustomCode).with_prop("htmlCode", "<i>x</i>");
        assert!(!html(RenderMode::Editor, &CustomCode(&filled)).contains("pc-placeholder"));
    }

    #[test]
    fn code_prop_is_escaped() {
        let node = Component::new("c", ComponentKind::Code { legacy: false })
            .with_prop("code", "<b>")
            .with_prop("language", "html");
        assert_eq!(
            html(RenderMode::Runtime, &Code(&node)),
            "<pre class=\"pc-code\" data-node=\"c\"><code class=\"language-html\">&lt;b&gt;</code></pre>"
        );
    }

    #[test]
    fn social_links_skip_entries_without_network() {
        let node = Component::new("s", ComponentKind::SocialIcons).with_prop(
            "links",
            json!([{"network": "github", "url": "https://github.com"}, {"url": "x"}]),
        );
        let out = html(RenderMode::Runtime, &SocialIcons(&node));
        assert_eq!(out.matches("pc-social-link").count(), 1);
    }

    #[test]
    fn unknown_kind_names_the_tag() {
        let node = Component::new("u", ComponentKind::from("nonexistent"));
        assert!(html(RenderMode::Runtime, &UnknownKind(&node)).contains("Unknown component type: nonexistent"));
    }
}
