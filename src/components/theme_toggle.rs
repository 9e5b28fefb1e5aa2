use yew::prelude::*;

use crate::state::theme::{self, ColorSchemePreference, ResolvedScheme};

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let scheme = use_state(|| ResolvedScheme::Light);
    let follows_system = use_state(|| true);

    {
        let scheme = scheme.clone();
        let follows_system = follows_system.clone();
        use_effect_with((), move |_| {
            theme::init();
            scheme.set(theme::resolved());
            {
                let scheme = scheme.clone();
                theme::subscribe(Callback::from(move |next| scheme.set(next)));
            }
            follows_system.set(theme::preference() == ColorSchemePreference::System);
            || theme::reset()
        });
    }

    let toggle = {
        let scheme = scheme.clone();
        let follows_system = follows_system.clone();
        Callback::from(move |_| {
            scheme.set(theme::toggle_scheme());
            follows_system.set(false);
        })
    };
    let use_system = {
        let scheme = scheme.clone();
        let follows_system = follows_system.clone();
        Callback::from(move |_| {
            theme::set_scheme(ColorSchemePreference::System);
            scheme.set(theme::resolved());
            follows_system.set(true);
        })
    };
    let label = match *scheme {
        ResolvedScheme::Dark => "Light mode",
        ResolvedScheme::Light => "Dark mode",
    };

    html! {<div style="display:flex; gap:6px;">
        <button onclick={toggle} style="padding:4px 10px; border-radius:8px;">{label}</button>
        <button onclick={use_system} disabled={*follows_system} style="padding:4px 10px; border-radius:8px;">{"Auto"}</button>
    </div>}
}
