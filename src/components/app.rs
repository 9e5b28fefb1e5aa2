use super::{popular_carousel::PopularCarousel, theme_toggle::ThemeToggle};
use crate::model::{self, MenuDefinition, MenuFilters};
use crate::state::locale::{self, Message, text};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let menu = use_memo((), |_| model::bundled_menu());
    let menu: Option<&MenuDefinition> = (*menu).as_ref();
    let filters = use_state(MenuFilters::default);
    let lang = use_state(locale::current);
    let t = |m: Message| text(*lang, m);

    let popular = model::resolve_popular_dishes(menu);
    let options = model::resolve_category_options(menu);
    let visible = model::filter_categories(menu, &filters);
    let title = menu.map(|m| m.name.clone()).unwrap_or_else(|| "Menu".to_string());

    let on_search = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filters).clone();
            next.set_query(&input.value());
            filters.set(next);
        })
    };
    let on_clear = {
        let filters = filters.clone();
        Callback::from(move |_| filters.set(MenuFilters::default()))
    };
    let switch_lang = {
        let lang = lang.clone();
        Callback::from(move |_| {
            let next = lang.next();
            locale::set_locale(next);
            lang.set(next);
        })
    };

    let chips = options.iter().map(|c| {
        let active = filters.categories.contains(&c.id);
        let onclick = {
            let filters = filters.clone();
            let id = c.id.clone();
            Callback::from(move |_| {
                let mut next = (*filters).clone();
                next.toggle_category(&id);
                filters.set(next);
            })
        };
        let style = if active {
            "padding:4px 10px; border-radius:999px; border:1px solid #58a6ff; background:#1f6feb; color:#fff;"
        } else {
            "padding:4px 10px; border-radius:999px; border:1px solid #30363d;"
        };
        html! {<button key={c.id.clone()} {onclick} {style}>
            { format!("{} ({})", c.name, c.dish_count) }
        </button>}
    });

    html! {<div id="root" style="max-width:720px; margin:0 auto; padding:12px 16px;">
        <div id="top-bar" style="display:flex; justify-content:space-between; align-items:center; gap:8px;">
            <h1 style="margin:0; font-size:22px;">{title}</h1>
            <div style="display:flex; gap:6px;">
                <button onclick={switch_lang} style="padding:4px 10px; border-radius:8px;">{ lang.next().as_str().to_uppercase() }</button>
                <ThemeToggle />
            </div>
        </div>
        <h2 style="font-size:16px; margin:16px 0 8px;">{ t(Message::Popular) }</h2>
        <PopularCarousel dishes={popular} />
        <h2 style="font-size:16px; margin:16px 0 8px;">{ t(Message::Categories) }</h2>
        <div style="display:flex; gap:8px; align-items:center;">
            <input type="search" value={filters.query.clone()} oninput={on_search}
                placeholder={t(Message::Search)} style="flex:1; padding:6px 8px; border-radius:8px;" />
            { if filters.is_filtering() {
                html!{ <button onclick={on_clear} style="padding:4px 10px;">{ t(Message::ClearFilters) }</button> }
            } else { html!{} } }
        </div>
        <div style="display:flex; flex-wrap:wrap; gap:6px; margin:8px 0;">{ for chips }</div>
        { if visible.is_empty() {
            html!{ <p style="opacity:0.7;">{ t(Message::NoResults) }</p> }
        } else { html!{} } }
        { for visible.iter().map(|c| html! {
            <section key={c.id.clone()} style="margin:12px 0;">
                <h3 style="margin:0 0 6px; font-size:15px;">
                    { c.name.clone() }
                    <span style="opacity:0.6; font-weight:400;">{ format!(" · {} {}", c.dishes.len(), t(Message::Dishes)) }</span>
                </h3>
                <ul style="list-style:none; padding:0; margin:0;">
                    { for c.dishes.iter().map(|d| html! {
                        <li key={d.id.clone()} style="display:flex; justify-content:space-between; padding:8px 0; border-bottom:1px solid #30363d;">
                            <span>{ d.name.clone() }</span>
                            <span style="opacity:0.7;">{ d.price.map(|p| p.to_string()).unwrap_or_default() }</span>
                        </li>
                    }) }
                </ul>
            </section>
        }) }
        <div style="font-size:12px; opacity:0.6;">{ format!("{} {}", model::filtered_dish_count(&visible), t(Message::Dishes)) }</div>
    </div>}
}
