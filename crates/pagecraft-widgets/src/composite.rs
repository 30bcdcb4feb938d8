#![forbid(unsafe_code)]

//! Composite widgets.
//!
//! Each composite is a terminal node: it formats its own props, exposes no
//! children to the dispatcher, and may hold internal state in
//! [`WidgetStates`](crate::WidgetStates). Widget intents (FAQ toggles,
//! slider navigation) are registered in both modes; they never reach the
//! editor callbacks.

use pagecraft_core::{Component, Intent, WidgetAction};
use pagecraft_render::{Element, EventKind, Node};
use serde_json::Value;

use crate::primitives::shell;
use crate::state::slide_count;
use crate::{RenderContext, Widget};

fn field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value.get(key).and_then(Value::as_str)
}

fn number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `{label, href}` objects as anchors.
fn links(items: &[Value], class: &'static str) -> Vec<Node> {
    items
        .iter()
        .filter_map(|item| {
            let label = field(item, "label")?;
            Some(
                Element::new("a")
                    .class(class)
                    .attr("href", field(item, "href").unwrap_or("#"))
                    .text(label)
                    .into(),
            )
        })
        .collect()
}

/// Form controls are inert while authoring.
fn inert(el: Element, ctx: &RenderContext<'_>) -> Element {
    if ctx.is_editor() {
        el.attr("disabled", "true")
    } else {
        el
    }
}

fn widget_button(
    ctx: &mut RenderContext<'_>,
    node: &Component,
    class: &'static str,
    label: &str,
    action: WidgetAction,
) -> Element {
    let button = Element::new("button")
        .class(class)
        .attr("type", "button")
        .text(label);
    ctx.frame.bind(
        button,
        EventKind::Click,
        &node.id,
        Intent::Widget {
            node: node.id.clone(),
            action,
        },
    )
}

pub struct Header<'a>(pub &'a Component);

impl Widget for Header<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let mut brand = Element::new("a").class("pc-header-brand").attr("href", "/");
        if let Some(logo) = node.prop_str("logo") {
            brand = brand.child(
                Element::new("img")
                    .attr("src", logo)
                    .attr("alt", node.prop_str("title").unwrap_or("Logo")),
            );
        } else {
            brand = brand.text(node.prop_str("title").unwrap_or("Site"));
        }
        let nav = Element::new("nav")
            .class("pc-header-nav")
            .children(links(node.prop_array("links"), "pc-header-link"));
        let mut el = shell(node, "header", "pc-header").child(brand).child(nav);
        if let Some(label) = node.prop_str("ctaLabel") {
            el = el.child(
                Element::new("a")
                    .class("pc-button")
                    .class("pc-header-cta")
                    .attr("href", node.prop_str("ctaHref").unwrap_or("#"))
                    .text(label),
            );
        }
        el
    }

    fn name(&self) -> &'static str {
        "Header"
    }
}

pub struct Footer<'a>(pub &'a Component);

impl Widget for Footer<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let mut el = shell(node, "footer", "pc-footer");
        if let Some(text) = node.prop_str("text") {
            el = el.child(Element::new("p").class("pc-footer-text").text(text));
        }
        let items = links(node.prop_array("links"), "pc-footer-link");
        if !items.is_empty() {
            el = el.child(Element::new("nav").class("pc-footer-nav").children(items));
        }
        if let Some(copyright) = node.prop_str("copyright") {
            el = el.child(
                Element::new("small")
                    .class("pc-footer-copyright")
                    .text(format!("© {copyright}")),
            );
        }
        el
    }

    fn name(&self) -> &'static str {
        "Footer"
    }
}

pub struct Cart<'a>(pub &'a Component);

impl Widget for Cart<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let currency = node.prop_str("currency").unwrap_or("$");
        let items = node.prop_array("items");
        let el = shell(node, "div", "pc-cart")
            .child(Element::new("h3").class("pc-cart-title").text(node.prop_str("title").unwrap_or("Cart")));
        if items.is_empty() {
            return el.child(Element::new("p").class("pc-cart-empty").text("Your cart is empty"));
        }

        let mut list = Element::new("ul").class("pc-cart-items");
        let mut total = 0.0;
        for item in items {
            let name = field(item, "name").unwrap_or("Item");
            let price = number(item, "price").unwrap_or(0.0);
            let quantity = number(item, "quantity").unwrap_or(1.0);
            total += price * quantity;
            list.push(
                Element::new("li")
                    .class("pc-cart-item")
                    .child(Element::new("span").class("pc-cart-item-name").text(name))
                    .child(Element::new("span").class("pc-cart-item-qty").text(format!("× {quantity}")))
                    .child(
                        Element::new("span")
                            .class("pc-cart-item-price")
                            .text(format!("{currency}{:.2}", price * quantity)),
                    ),
            );
        }
        el.child(list).child(
            Element::div()
                .class("pc-cart-total")
                .text(format!("Total: {currency}{total:.2}")),
        )
    }

    fn name(&self) -> &'static str {
        "Cart"
    }
}

/// Image carousel with optional autoplay.
pub struct Slider<'a>(pub &'a Component);

impl Widget for Slider<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let slides = node.prop_array("slides");
        let len = slide_count(node);
        let current = ctx.states().slider(&node.id).current(len);
        let mut el = shell(node, "div", "pc-slider").attr("data-current", current.to_string());
        if len == 0 {
            return el.child(Element::new("p").class("pc-slider-empty").text("No slides"));
        }

        let mut track = Element::div().class("pc-slider-track");
        for (index, slide) in slides.iter().enumerate() {
            let mut item = Element::new("figure")
                .class("pc-slide")
                .class_if(index == current, "is-active");
            if index != current {
                item = item.attr("aria-hidden", "true");
            }
            if let Some(src) = field(slide, "image") {
                item = item.child(
                    Element::new("img")
                        .attr("src", src)
                        .attr("alt", field(slide, "alt").unwrap_or_default()),
                );
            }
            if let Some(caption) = field(slide, "caption") {
                item = item.child(Element::new("figcaption").text(caption));
            }
            track.push(item);
        }
        el.push(track);

        if len > 1 {
            el.push(widget_button(ctx, node, "pc-slider-prev", "‹", WidgetAction::PrevSlide));
            el.push(widget_button(ctx, node, "pc-slider-next", "›", WidgetAction::NextSlide));
            let mut dots = Element::div().class("pc-slider-dots");
            for index in 0..len {
                let dot = widget_button(ctx, node, "pc-slider-dot", "", WidgetAction::GoToSlide(index))
                    .class_if(index == current, "is-active")
                    .attr("aria-label", format!("Slide {}", index + 1));
                dots.push(dot);
            }
            el.push(dots);

            if node.prop_bool("autoplay").unwrap_or(true) {
                let interval = node
                    .prop_u64("interval")
                    .filter(|ms| *ms > 0)
                    .unwrap_or(ctx.options().slider_interval_ms);
                ctx.frame.request_timer(&node.id, interval, WidgetAction::NextSlide);
            }
        }
        el
    }

    fn name(&self) -> &'static str {
        "Slider"
    }
}

pub struct Banner<'a>(pub &'a Component);

impl Widget for Banner<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let mut el = shell(node, "section", "pc-banner");
        if let Some(image) = node.prop_str("backgroundImage") {
            el = el.style("background-image", format!("url(\"{image}\")"));
        }
        el = el.child(
            Element::new("h2")
                .class("pc-banner-title")
                .text(node.prop_str("title").unwrap_or("Banner title")),
        );
        if let Some(subtitle) = node.prop_str("subtitle") {
            el = el.child(Element::new("p").class("pc-banner-subtitle").text(subtitle));
        }
        if let Some(label) = node.prop_str("ctaLabel") {
            el = el.child(
                Element::new("a")
                    .class("pc-button")
                    .class("pc-banner-cta")
                    .attr("href", node.prop_str("ctaHref").unwrap_or("#"))
                    .text(label),
            );
        }
        el
    }

    fn name(&self) -> &'static str {
        "Banner"
    }
}

pub struct NavMenu<'a>(pub &'a Component);

impl Widget for NavMenu<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let orientation = match node.prop_str("orientation") {
            Some("vertical") => "vertical",
            _ => "horizontal",
        };
        let items = links(node.prop_array("items"), "pc-nav-link")
            .into_iter()
            .map(|link| Element::new("li").class("pc-nav-item").child(link).into());
        shell(node, "nav", "pc-nav-menu")
            .class(format!("pc-nav-{orientation}"))
            .child(Element::new("ul").children(items))
    }

    fn name(&self) -> &'static str {
        "NavMenu"
    }
}

pub struct PricingTable<'a>(pub &'a Component);

impl Widget for PricingTable<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let currency = node.prop_str("currency").unwrap_or("$");
        let mut el = shell(node, "div", "pc-pricing-table");
        for plan in node.prop_array("plans") {
            let highlighted = plan.get("highlighted").and_then(Value::as_bool).unwrap_or(false);
            let price = match plan.get("price") {
                Some(Value::Number(n)) => format!("{currency}{n}"),
                Some(Value::String(s)) => s.clone(),
                _ => String::new(),
            };
            let features = plan
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_str)
                .map(|f| Element::new("li").text(f).into());
            let mut card = Element::div()
                .class("pc-pricing-plan")
                .class_if(highlighted, "is-highlighted")
                .child(Element::new("h3").text(field(plan, "name").unwrap_or("Plan")))
                .child(
                    Element::div()
                        .class("pc-pricing-price")
                        .text(price)
                        .child(
                            Element::new("span")
                                .class("pc-pricing-period")
                                .text(field(plan, "period").unwrap_or("")),
                        ),
                )
                .child(Element::new("ul").class("pc-pricing-features").children(features));
            if let Some(label) = field(plan, "ctaLabel") {
                card = card.child(
                    Element::new("a")
                        .class("pc-button")
                        .attr("href", field(plan, "ctaHref").unwrap_or("#"))
                        .text(label),
                );
            }
            el.push(card);
        }
        el
    }

    fn name(&self) -> &'static str {
        "PricingTable"
    }
}

pub struct Testimonials<'a>(pub &'a Component);

impl Widget for Testimonials<'_> {
    fn render(&self, _ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let mut el = shell(node, "div", "pc-testimonials");
        for item in node.prop_array("items") {
            let Some(quote) = field(item, "quote") else {
                continue;
            };
            let mut cite = Element::new("figcaption")
                .class("pc-testimonial-author")
                .text(field(item, "author").unwrap_or("Anonymous"));
            if let Some(role) = field(item, "role") {
                cite = cite.child(Element::new("span").class("pc-testimonial-role").text(role));
            }
            el.push(
                Element::new("figure")
                    .class("pc-testimonial")
                    .child(Element::new("blockquote").text(quote))
                    .child(cite),
            );
        }
        el
    }

    fn name(&self) -> &'static str {
        "Testimonials"
    }
}

/// Accordion of question/answer items.
pub struct Faq<'a>(pub &'a Component);

impl Widget for Faq<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let state = ctx.states().faq(&node.id);
        let mut el = shell(node, "div", "pc-faq");
        if let Some(title) = node.prop_str("title") {
            el = el.child(Element::new("h3").class("pc-faq-title").text(title));
        }
        for (index, item) in node.prop_array("items").iter().enumerate() {
            let open = state.is_open(index);
            let question = widget_button(
                ctx,
                node,
                "pc-faq-question",
                field(item, "question").unwrap_or("Question"),
                WidgetAction::ToggleItem(index),
            )
            .attr("aria-expanded", open.to_string());
            let mut entry = Element::div()
                .class("pc-faq-item")
                .class_if(open, "is-open")
                .child(question);
            if open {
                entry = entry.child(
                    Element::div()
                        .class("pc-faq-answer")
                        .text(field(item, "answer").unwrap_or("")),
                );
            }
            el.push(entry);
        }
        el
    }

    fn name(&self) -> &'static str {
        "Faq"
    }
}

pub struct DomainSearch<'a>(pub &'a Component);

impl Widget for DomainSearch<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let input = Element::new("input")
            .attr("type", "search")
            .attr("name", "domain")
            .attr(
                "placeholder",
                node.prop_str("placeholder").unwrap_or("Find your domain"),
            );
        let button = Element::new("button")
            .attr("type", "submit")
            .text(node.prop_str("buttonLabel").unwrap_or("Search"));
        let mut form = Element::new("form")
            .class("pc-domain-search-form")
            .attr("role", "search")
            .child(inert(input, ctx))
            .child(inert(button, ctx));
        let tlds: Vec<Node> = node
            .prop_array("tlds")
            .iter()
            .filter_map(Value::as_str)
            .map(|tld| Element::new("span").class("pc-domain-tld").text(tld).into())
            .collect();
        if !tlds.is_empty() {
            form = form.child(Element::div().class("pc-domain-tlds").children(tlds));
        }
        shell(node, "div", "pc-domain-search").child(form)
    }

    fn name(&self) -> &'static str {
        "DomainSearch"
    }
}

/// Product cards laid out in responsive columns.
pub struct ProductsGrid<'a>(pub &'a Component);

impl Widget for ProductsGrid<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let declared = node
            .prop_u64("columns")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(3)
            .clamp(1, 6);
        ctx.frame.observe_region(&node.id, declared);
        let columns = ctx.columns().effective_columns(&node.id, declared);
        let currency = node.prop_str("currency").unwrap_or("$");

        let mut el = shell(node, "div", "pc-products-grid")
            .style("display", "grid")
            .style(
                "grid-template-columns",
                format!("repeat({columns}, minmax(0, 1fr))"),
            );
        for product in node.prop_array("products") {
            let mut card = Element::new("article").class("pc-product");
            if let Some(image) = field(product, "image") {
                card = card.child(
                    Element::new("img")
                        .attr("src", image)
                        .attr("alt", field(product, "name").unwrap_or_default()),
                );
            }
            card = card.child(
                Element::new("h4")
                    .class("pc-product-name")
                    .text(field(product, "name").unwrap_or("Product")),
            );
            if let Some(price) = number(product, "price") {
                card = card.child(
                    Element::new("span")
                        .class("pc-product-price")
                        .text(format!("{currency}{price:.2}")),
                );
            }
            if let Some(href) = field(product, "href") {
                card = card.child(Element::new("a").class("pc-button").attr("href", href).text("View"));
            }
            el.push(card);
        }
        el
    }

    fn name(&self) -> &'static str {
        "ProductsGrid"
    }
}

pub struct ContactForm<'a>(pub &'a Component);

impl Widget for ContactForm<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let defaults = [
            ("name", "Name", "text"),
            ("email", "Email", "email"),
            ("message", "Message", "textarea"),
        ];
        let declared = node.prop_array("fields");
        let fields: Vec<(&str, &str, &str, bool)> = if declared.is_empty() {
            defaults
                .iter()
                .map(|&(name, label, kind)| (name, label, kind, true))
                .collect()
        } else {
            declared
                .iter()
                .filter_map(|f| {
                    let name = field(f, "name")?;
                    Some((
                        name,
                        field(f, "label").unwrap_or(name),
                        field(f, "type").unwrap_or("text"),
                        f.get("required").and_then(Value::as_bool).unwrap_or(false),
                    ))
                })
                .collect()
        };

        let mut form = Element::new("form")
            .class("pc-contact-form-body")
            .attr("method", "post")
            .attr("action", node.prop_str("action").unwrap_or("#"));
        for (name, label, kind, required) in fields {
            let mut control = if kind == "textarea" {
                Element::new("textarea").attr("name", name)
            } else {
                Element::new("input").attr("type", kind).attr("name", name)
            };
            if required {
                control = control.attr("required", "true");
            }
            form.push(
                Element::new("label")
                    .class("pc-form-field")
                    .child(Element::new("span").text(label))
                    .child(inert(control, ctx)),
            );
        }
        let submit = Element::new("button")
            .attr("type", "submit")
            .class("pc-button")
            .text(node.prop_str("submitLabel").unwrap_or("Send"));
        form.push(inert(submit, ctx));

        let mut el = shell(node, "div", "pc-contact-form");
        if let Some(title) = node.prop_str("title") {
            el = el.child(Element::new("h3").text(title));
        }
        el.child(form)
    }

    fn name(&self) -> &'static str {
        "ContactForm"
    }
}

pub struct Newsletter<'a>(pub &'a Component);

impl Widget for Newsletter<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let input = Element::new("input")
            .attr("type", "email")
            .attr("name", "email")
            .attr("placeholder", node.prop_str("placeholder").unwrap_or("you@example.com"));
        let button = Element::new("button")
            .attr("type", "submit")
            .class("pc-button")
            .text(node.prop_str("buttonLabel").unwrap_or("Subscribe"));
        let mut el = shell(node, "div", "pc-newsletter").child(
            Element::new("h3")
                .class("pc-newsletter-title")
                .text(node.prop_str("title").unwrap_or("Subscribe to our newsletter")),
        );
        if let Some(description) = node.prop_str("description") {
            el = el.child(Element::new("p").text(description));
        }
        el.child(
            Element::new("form")
                .class("pc-newsletter-form")
                .child(inert(input, ctx))
                .child(inert(button, ctx)),
        )
    }

    fn name(&self) -> &'static str {
        "Newsletter"
    }
}
