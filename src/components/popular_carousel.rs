use yew::prelude::*;

use super::use_scroll_lock::{use_scroll_lock, ScrollLockOptions};
use crate::model::HighlightedDish;

#[derive(Properties, PartialEq, Clone)]
pub struct PopularCarouselProps {
    pub dishes: Vec<HighlightedDish>,
}

fn price_label(d: &HighlightedDish) -> Option<String> {
    let price = d.dish.price?;
    let currency = d.dish.currency.as_deref().unwrap_or("");
    Some(format!("{} {}", price, currency).trim().to_string())
}

#[function_component(PopularCarousel)]
pub fn popular_carousel(props: &PopularCarouselProps) -> Html {
    // a single slide has nothing to swipe to, leave the page scroll alone
    let carousel_ref = use_scroll_lock(ScrollLockOptions {
        enabled: props.dishes.len() > 1,
        ..Default::default()
    });

    if props.dishes.is_empty() {
        return html! {};
    }

    let track_style = "display:flex; gap:12px; overflow-x:auto; scroll-snap-type:x mandatory; \
        padding:4px 2px 12px; -webkit-overflow-scrolling:touch;";
    let card_style = "flex:0 0 78%; max-width:320px; scroll-snap-align:start; \
        background:var(--card-bg, #161b22); border:1px solid #30363d; border-radius:12px; padding:12px 14px;";

    html! {<section ref={carousel_ref} class="carousel-touch-guard" style={track_style}>
        { for props.dishes.iter().map(|d| html! {
            <article key={d.dish.id.clone()} style={card_style}>
                <div style="font-size:11px; text-transform:uppercase; opacity:0.7;">{ d.category_name.clone() }</div>
                <h3 style="margin:4px 0 6px; font-size:16px;">{ d.dish.name.clone() }</h3>
                { if d.dish.description.is_empty() { html!{} } else { html!{ <p style="margin:0 0 8px; font-size:13px; opacity:0.85;">{ d.dish.description.clone() }</p> } } }
                { if let Some(p) = price_label(d) { html!{ <div style="font-weight:600;">{p}</div> } } else { html!{} } }
            </article>
        }) }
    </section>}
}
