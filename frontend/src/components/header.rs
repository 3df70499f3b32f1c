use std::rc::Rc;

use lighthouse_shared::{
    nav::{NavBar, NavServices},
    session::{LoginResult, SettingsResult},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    api::ApiClient,
    components::toast::use_notifier,
    config,
    hooks::{use_modal, use_screen, use_viewport_width},
    i18n::current::header as t,
    modals::{login::LoginModal, register::RegisterModal, settings::SettingsModal},
    router::{Route, RouteNavigator},
};

#[derive(Clone, PartialEq)]
enum MenuAction {
    Link(Route),
    Settings,
    Logout,
    Login,
    Register,
}

#[function_component(Header)]
pub fn header() -> Html {
    let notifier = use_notifier();
    let navigator = use_navigator();
    let screen_navigator = navigator.clone();
    let nav = use_screen(move || {
        NavBar::new(
            NavServices {
                auth: Rc::new(ApiClient),
                author: Rc::new(ApiClient),
                navigator: Rc::new(RouteNavigator::new(screen_navigator)),
            },
            notifier,
            config::ui_config(),
        )
    });
    let login_modal = use_modal::<LoginResult>();
    let register_modal = use_modal::<String>();
    let settings_modal = use_modal::<SettingsResult>();

    {
        let nav = nav.clone();
        use_effect_with((), move |_| {
            spawn_local(async move { nav.init().await });
            || ()
        });
    }

    {
        let nav = nav.clone();
        use_viewport_width(Callback::from(move |width: u32| nav.resize(width)));
    }

    let state = nav.state();
    let drawer_open = state.drawer.is_open();
    let logged_in = nav.is_logged_in();

    let toggle_drawer = {
        let nav = nav.clone();
        Callback::from(move |_: MouseEvent| nav.toggle_drawer())
    };

    let on_action = {
        let nav = nav.clone();
        let login_modal = login_modal.clone();
        let register_modal = register_modal.clone();
        let settings_modal = settings_modal.clone();
        Callback::from(move |action: MenuAction| match action {
            MenuAction::Link(route) => {
                if nav.state().drawer.is_open() {
                    nav.toggle_drawer();
                }
                if let Some(navigator) = navigator.as_ref() {
                    navigator.push(&route);
                }
            },
            MenuAction::Settings => spawn_local(nav.edit_settings(settings_modal.open())),
            MenuAction::Logout => nav.logout(),
            MenuAction::Login => spawn_local(nav.login(login_modal.open())),
            MenuAction::Register => spawn_local(nav.register(register_modal.open())),
        })
    };

    let items: Vec<(&'static str, &'static str, MenuAction)> = if logged_in {
        vec![
            (t::NAV_ARTICLES, "fa-file-lines", MenuAction::Link(Route::Articles)),
            (t::NAV_NEW_ARTICLE, "fa-pen-to-square", MenuAction::Link(Route::NewArticle)),
            (t::SETTINGS, "fa-gear", MenuAction::Settings),
            (t::LOGOUT, "fa-right-from-bracket", MenuAction::Logout),
        ]
    } else {
        vec![
            (t::LOGIN, "fa-right-to-bracket", MenuAction::Login),
            (t::REGISTER, "fa-user-plus", MenuAction::Register),
        ]
    };

    let identity = match (logged_in, state.name.as_ref()) {
        (true, Some(name)) => html! {
            <span class={classes!("flex", "items-center", "gap-2", "text-sm", "font-medium")}>
                if let Some(avatar) = state.avatar.as_ref() {
                    <img
                        src={avatar.clone()}
                        alt={t::AVATAR_ALT}
                        class={classes!("h-8", "w-8", "rounded-full", "object-cover")}
                    />
                }
                { name.clone() }
            </span>
        },
        _ => Html::default(),
    };

    let render_item = |mobile: bool| {
        let on_action = on_action.clone();
        move |(label, icon, action): &(&'static str, &'static str, MenuAction)| {
            let on_action = on_action.clone();
            let action = action.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_action.emit(action.clone()));
            let classes = if mobile {
                classes!(
                    "mobile-nav-item", "flex", "items-center", "gap-3", "py-3", "px-4",
                    "rounded-lg", "bg-[var(--surface)]", "border", "border-[var(--border)]",
                    "text-[var(--text)]", "hover:border-[var(--primary)]"
                )
            } else {
                classes!(
                    "nav-icon-btn", "h-10", "px-3", "rounded-lg", "inline-flex", "items-center",
                    "gap-2", "text-sm", "text-[var(--muted)]", "transition-all", "duration-200",
                    "hover:text-[var(--primary)]", "hover:bg-[var(--surface-alt)]"
                )
            };
            html! {
                <button type="button" class={classes} onclick={onclick}>
                    <i class={classes!("fas", *icon, "w-5")} aria-hidden="true"></i>
                    <span>{ *label }</span>
                </button>
            }
        }
    };

    let mobile_menu_classes = classes!(
        "fixed",
        "inset-0",
        "z-[120]",
        "transition-opacity",
        "duration-300",
        if drawer_open { "opacity-100 pointer-events-auto" } else { "opacity-0 pointer-events-none" }
    );

    let mobile_panel_classes = classes!(
        "absolute",
        "inset-y-0",
        "left-0",
        "w-[min(80vw,20rem)]",
        "bg-[var(--surface)]",
        "text-[var(--text)]",
        "p-[4.5rem_1.5rem_2rem]",
        "flex",
        "flex-col",
        "gap-5",
        "overflow-y-auto",
        "shadow-[var(--shadow-16)]",
        "transition-transform",
        "duration-[350ms]",
        if drawer_open { "translate-x-0" } else { "-translate-x-full" }
    );

    let hamburger_line = classes!(
        "block",
        "w-[1.4rem]",
        "h-[2px]",
        "rounded-[1px]",
        "bg-[var(--text)]",
        "transition-all",
        "duration-200",
        "ease-in-out"
    );

    html! {
        <>
            <header class={classes!(
                "sticky", "top-0", "left-0", "right-0", "z-[80]", "w-full", "bg-[var(--surface)]",
                "shadow-[0_1px_0_rgba(var(--primary-rgb),0.08)]"
            )}>
                <div class={classes!(
                    "flex", "items-center", "gap-4", "min-h-[var(--header-height-desktop)]",
                    "max-w-7xl", "mx-auto", "px-4", "sm:px-6", "lg:px-8"
                )}>
                    <Link<Route> to={Route::Home} classes="brand-logo">
                        { t::BRAND_NAME }
                    </Link<Route>>

                    <div class={classes!("ml-auto", "flex", "items-center", "gap-3")}>
                        { identity }
                        // Desktop menu
                        <nav
                            class={classes!("hidden", "min-[600px]:flex", "items-center", "gap-1")}
                            aria-label={t::NAV_MAIN_ARIA}
                        >
                            { for items.iter().map(render_item(false)) }
                        </nav>
                        // Hamburger
                        <button
                            type="button"
                            class={classes!(
                                "min-[600px]:hidden", "w-12", "h-12", "border", "border-[var(--border)]",
                                "rounded-lg", "bg-[var(--surface)]", "flex", "flex-col",
                                "justify-center", "items-center", "gap-[0.35rem]"
                            )}
                            aria-label={t::OPEN_MENU_ARIA}
                            aria-expanded={drawer_open.to_string()}
                            onclick={toggle_drawer.clone()}
                        >
                            <span class={classes!(
                                hamburger_line.clone(),
                                if drawer_open { "translate-y-[6px] rotate-45" } else { "" }
                            )} />
                            <span class={classes!(
                                hamburger_line.clone(),
                                if drawer_open { "opacity-0" } else { "opacity-100" }
                            )} />
                            <span class={classes!(
                                hamburger_line,
                                if drawer_open { "-translate-y-[6px] -rotate-45" } else { "" }
                            )} />
                        </button>
                    </div>
                </div>
            </header>

            // Mobile drawer
            <div class={mobile_menu_classes}>
                <div
                    class={classes!("absolute", "inset-0", "bg-[rgba(15,23,42,0.45)]", "backdrop-blur-[12px]")}
                    onclick={toggle_drawer.clone()}
                />
                <div class={mobile_panel_classes} role="dialog" aria-modal="true">
                    <button
                        type="button"
                        class={classes!(
                            "absolute", "right-5", "top-5", "w-10", "h-10", "rounded-lg",
                            "border", "border-[var(--border)]"
                        )}
                        aria-label={t::CLOSE_MENU_ARIA}
                        onclick={toggle_drawer}
                    >
                        <i class="fas fa-arrow-left"></i>
                    </button>
                    <nav class={classes!("flex", "flex-col", "gap-3")} aria-label={t::MOBILE_NAV_ARIA}>
                        { for items.iter().map(render_item(true)) }
                    </nav>
                </div>
            </div>

            if login_modal.is_open() {
                <LoginModal on_close={login_modal.on_close()} />
            }
            if register_modal.is_open() {
                <RegisterModal on_close={register_modal.on_close()} />
            }
            if settings_modal.is_open() {
                <SettingsModal on_close={settings_modal.on_close()} />
            }
        </>
    }
}
