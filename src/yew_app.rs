use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, MouseEvent, PointerEvent, WheelEvent};
use yew::prelude::*;

use crate::app_router;
use crate::content_client::SanityClient;
use crate::input::{self, PointerKind};
use crate::site_config;
use crate::site_core::SiteCore;
use crate::timers::GlooScheduler;
use folio_core::chrome::{
    intro_tilt, scroll_fade_opacity, Tilt, OVERLAY_CLOSE_MS, POINTER_IDLE_MS, SCROLL_IDLE_MS,
};
use folio_core::drag::{
    centered_scroll, items_from_records, DraggableItem, CANVAS_CENTER_DELAY_MS, CANVAS_SCALE,
};
use folio_core::{
    CanvasPan, ContentKind, ContentRecord, ContentSet, FreePlacement, GalleryMode, IdleFlag,
    NavChrome, NavMode, OverlayState, RouteState, TransitionPhase, TransitionState, View, VIEWS,
};

const OWNER_NAME: &str = "Jeong Yejin";
const COPYRIGHT: &str = "@2026";
const HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?q=80&w=2500&auto=format&fit=crop";
const INTRO_TEXT: &str = "Hello. I am a designer who grows ideas from careful planning \
and keeps exploring how to give them precise, sensitive visual form.";
const PROJECTS_BLURB: &str = "An archive of projects built on careful planning and visual craft.";
const GRAPHIC_BLURB: &str = "A space collecting personal graphic work.";
const SKILLS: [(&str, u8); 5] = [
    ("Photoshop", 90),
    ("Illustrator", 85),
    ("Figma", 95),
    ("Blender", 20),
    ("Visual Studio", 40),
];
const SKILL_TICKS: [u8; 5] = [0, 25, 50, 75, 100];
const CONTACT_LINKS: [(&str, &str); 2] = [
    ("insta : @yezin_archive", "https://www.instagram.com/yezin_archive/"),
    ("bbh7972@naver.com", "mailto:bbh7972@naver.com"),
];

pub(crate) fn run() {
    let config = site_config::load_site_config();
    let core = SiteCore::new(&app_router::current_fragment());
    let client = Rc::new(SanityClient::new(config.content.clone()));
    yew::Renderer::<App>::with_props(AppProps {
        core,
        client,
        gallery: config.gallery,
    })
    .render();
}

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<SiteCore>,
    pub(crate) client: Rc<SanityClient>,
    pub(crate) gallery: GalleryMode,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
            && Rc::ptr_eq(&self.client, &other.client)
            && self.gallery == other.gallery
    }
}

#[hook]
fn use_compact() -> bool {
    let compact = use_state_eq(input::is_compact_viewport);
    {
        let compact = compact.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "resize", move |_| {
                    compact.set(input::is_compact_viewport());
                })
            });
            move || drop(listener)
        });
    }
    *compact
}

/// Content for `kind`, or `None` until the first load settles.
#[hook]
fn use_content(kind: ContentKind) -> Option<ContentSet> {
    let client = use_context::<Rc<SanityClient>>();
    let content = {
        let client = client.clone();
        use_state(move || client.and_then(|client| client.cached(kind)))
    };
    {
        let content = content.clone();
        let loaded = content.is_some();
        use_effect_with(kind, move |kind| {
            let kind = *kind;
            if !loaded {
                match client {
                    Some(client) => spawn_local(async move {
                        content.set(Some(client.load(kind).await));
                    }),
                    None => content.set(Some(ContentSet::placeholder(kind))),
                }
            }
            || ()
        });
    }
    (*content).clone()
}

#[derive(Clone)]
struct OverlayHandle {
    state: Rc<RefCell<OverlayState>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    refresh: UseForceUpdateHandle,
}

impl OverlayHandle {
    fn open(&self, id: &str) {
        self.timer.borrow_mut().take();
        self.state.borrow_mut().open(id);
        self.refresh.force_update();
    }

    fn close(&self) {
        if !self.state.borrow_mut().begin_close() {
            return;
        }
        self.refresh.force_update();
        let state = Rc::clone(&self.state);
        let refresh = self.refresh.clone();
        *self.timer.borrow_mut() = Some(Timeout::new(OVERLAY_CLOSE_MS, move || {
            state.borrow_mut().finish_close();
            refresh.force_update();
        }));
    }

    fn selected(&self) -> Option<String> {
        self.state.borrow().selected().map(str::to_string)
    }

    fn closing(&self) -> bool {
        self.state.borrow().closing()
    }
}

#[hook]
fn use_overlay() -> OverlayHandle {
    let state = use_mut_ref(OverlayState::default);
    let timer = use_mut_ref(|| None::<Timeout>);
    let refresh = use_force_update();
    OverlayHandle {
        state,
        timer,
        refresh,
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let core = props.core.clone();
    let snapshot = {
        let core = core.clone();
        use_state_eq(move || core.snapshot())
    };

    {
        let core = core.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let core_for_cb = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                snapshot.set(core_for_cb.snapshot());
            }));
            let listener = web_sys::window().map(|window| {
                let core = core.clone();
                app_router::listen_hash_changes(&window, move |raw| {
                    core.handle_fragment_change(&raw);
                })
            });
            move || {
                drop(listener);
                drop(subscription);
                core.shutdown();
            }
        });
    }

    let on_navigate = {
        let core = core.clone();
        Callback::from(move |view: View| {
            core.navigate(view);
        })
    };
    let on_select = {
        let core = core.clone();
        Callback::from(move |id: String| {
            core.select_project(&id);
        })
    };
    let on_back = {
        let core = core.clone();
        Callback::from(move |_: ()| {
            core.deselect_project();
        })
    };

    let route = snapshot.route.clone();
    let content = match route.view() {
        View::Home => html! { <HomeView /> },
        View::Projects => html! {
            <ProjectsView
                selected={route.selected_id().map(str::to_string)}
                on_select={on_select}
            />
        },
        View::Graphic => html! { <GraphicView mode={props.gallery} /> },
        View::About => html! { <AboutView /> },
    };

    html! {
        <ContextProvider<Rc<SanityClient>> context={props.client.clone()}>
            <div class="site">
                <Veil state={snapshot.transition} />
                <Navbar route={route.clone()} on_navigate={on_navigate} on_back={on_back} />
                <div class={classes!("view", format!("view-{}", route.view()))}>
                    { content }
                </div>
            </div>
        </ContextProvider<Rc<SanityClient>>>
    }
}

#[derive(Properties, PartialEq)]
struct VeilProps {
    state: TransitionState,
}

#[function_component(Veil)]
fn veil(props: &VeilProps) -> Html {
    let phase_class = match props.state.phase {
        TransitionPhase::Idle => return html! {},
        TransitionPhase::Veiling => "veil-in",
        TransitionPhase::Unveiling => "veil-out",
    };
    html! {
        <div class={classes!("veil", phase_class)}>
            <span class="veil-counter">{ format!("({}%)", props.state.progress) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavbarProps {
    route: RouteState,
    on_navigate: Callback<View>,
    on_back: Callback<()>,
}

#[function_component(Navbar)]
fn navbar(props: &NavbarProps) -> Html {
    let compact = use_compact();
    let hovered = use_state_eq(|| false);
    let scrolling = use_state_eq(|| false);
    let pointer_active = use_state_eq(|| true);
    let view = props.route.view();

    {
        let scrolling = scrolling.clone();
        let pointer_active = pointer_active.clone();
        use_effect_with(view, move |view| {
            let view = *view;
            let scheduler = Rc::new(GlooScheduler);
            let scroll_flag = Rc::new(IdleFlag::new(Rc::clone(&scheduler), SCROLL_IDLE_MS, false));
            let pointer_flag = Rc::new(IdleFlag::new(scheduler, POINTER_IDLE_MS, true));
            scroll_flag.set_on_change(Rc::new(move |on: bool| scrolling.set(on)));
            {
                let pointer_active = pointer_active.clone();
                pointer_flag.set_on_change(Rc::new(move |on: bool| pointer_active.set(on)));
            }
            pointer_active.set(true);
            let on_activity = {
                let pointer_flag = Rc::clone(&pointer_flag);
                Rc::new(move || {
                    if NavChrome::idles_on_pointer(view) {
                        pointer_flag.poke();
                    }
                })
            };
            on_activity();

            let mut listeners = Vec::new();
            if let Some(window) = web_sys::window() {
                let options = EventListenerOptions {
                    phase: EventListenerPhase::Capture,
                    passive: true,
                };
                let flag = Rc::clone(&scroll_flag);
                listeners.push(EventListener::new_with_options(
                    &window,
                    "scroll",
                    options,
                    move |_| flag.poke(),
                ));
                for event_type in ["mousemove", "mousedown", "touchstart"] {
                    let on_activity = Rc::clone(&on_activity);
                    listeners.push(EventListener::new(&window, event_type, move |_| {
                        on_activity()
                    }));
                }
            }
            move || {
                drop(listeners);
                drop(scroll_flag);
                drop(pointer_flag);
            }
        });
    }

    let chrome = NavChrome {
        view,
        compact,
        hovered: *hovered,
        scrolling: *scrolling,
        pointer_active: *pointer_active,
    };
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let body = match NavMode::for_route(&props.route) {
        NavMode::Back => {
            let on_back = props.on_back.clone();
            html! {
                <button class="nav-back" aria-label="Back" onclick={Callback::from(move |_: MouseEvent| on_back.emit(()))}>
                    <svg width="24" height="24" viewBox="0 0 24 24" fill="none"
                        stroke="currentColor" stroke-width="2.5"
                        stroke-linecap="round" stroke-linejoin="round">
                        <path d="M19 12H5M12 19l-7-7 7-7" />
                    </svg>
                </button>
            }
        }
        NavMode::Links => html! {
            <div class="nav-links">
                { for VIEWS.iter().map(|target| {
                    let target = *target;
                    let on_navigate = props.on_navigate.clone();
                    html! {
                        <button
                            class={classes!("nav-link", (target == view).then_some("active"))}
                            onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(target))}
                        >
                            { target.label() }
                        </button>
                    }
                }) }
            </div>
        },
    };

    html! {
        <nav
            class={classes!("navbar", compact.then_some("compact"))}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <div class={classes!(
                "nav-pill",
                if chrome.is_expanded() { "expanded" } else { "collapsed" },
                props.route.is_project_detail().then_some("detail"),
            )}>
                { body }
            </div>
        </nav>
    }
}

#[function_component(HomeView)]
fn home_view() -> Html {
    let compact = use_compact();
    let opacity = use_state_eq(|| 1.0_f64);
    let tilt = use_state_eq(Tilt::default);
    let scroll_ref = use_node_ref();

    {
        let opacity = opacity.clone();
        let scroll_ref = scroll_ref.clone();
        use_effect_with((), move |_| {
            let listener = scroll_ref.cast::<Element>().map(|container| {
                let target = container.clone();
                EventListener::new(&container, "scroll", move |_| {
                    let height = input::viewport_size().height;
                    opacity.set(scroll_fade_opacity(f64::from(target.scroll_top()), height));
                })
            });
            move || drop(listener)
        });
    }

    let onmousemove = {
        let tilt = tilt.clone();
        Callback::from(move |event: MouseEvent| {
            let pointer = input::client_point(&event);
            let viewport = input::viewport_size();
            tilt.set(intro_tilt(pointer.x, pointer.y, viewport.width, viewport.height));
        })
    };
    let onmouseleave = {
        let tilt = tilt.clone();
        Callback::from(move |_: MouseEvent| tilt.set(Tilt::default()))
    };
    let hint_style = format!("opacity: {:.3}", *opacity);

    html! {
        <div class="home">
            <div class={classes!("home-footer", compact.then_some("compact"))}>
                <span class="home-copyright">{ COPYRIGHT }</span>
                <span class="home-scroll-hint" style={hint_style}>{ "scroll ↓" }</span>
                <span class="home-owner">{ OWNER_NAME }</span>
            </div>
            <main class="home-scroll" ref={scroll_ref}>
                <section class="home-hero">
                    <div class="hero-image" style={format!("background-image: url('{HERO_IMAGE}')")} />
                </section>
                <section class="home-intro" onmousemove={onmousemove} onmouseleave={onmouseleave}>
                    <div class="intro-card" style={format!("transform: {} rotate(14deg)", tilt.css())}>
                        <h1>{ INTRO_TEXT }</h1>
                    </div>
                </section>
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectsViewProps {
    selected: Option<String>,
    on_select: Callback<String>,
}

#[function_component(ProjectsView)]
fn projects_view(props: &ProjectsViewProps) -> Html {
    let compact = use_compact();
    let content = use_content(ContentKind::Project);
    let strip_ref = use_node_ref();
    let detail = content.as_ref().and_then(|set| {
        props
            .selected
            .as_deref()
            .and_then(|id| set.find(id))
            .cloned()
    });
    let showing_detail = detail.is_some();

    {
        let strip_ref = strip_ref.clone();
        use_effect_with((showing_detail, content.is_some()), move |(showing_detail, _)| {
            let listener = if *showing_detail {
                None
            } else {
                strip_ref.cast::<Element>().map(|strip| {
                    let target = strip.clone();
                    let options = EventListenerOptions {
                        phase: EventListenerPhase::Bubble,
                        passive: false,
                    };
                    EventListener::new_with_options(&strip, "wheel", options, move |event: &Event| {
                        if let Some(event) = event.dyn_ref::<WheelEvent>() {
                            input::redirect_wheel(event, &target);
                        }
                    })
                })
            };
            move || drop(listener)
        });
    }

    let Some(set) = content else {
        return html! { <div class="projects loading" /> };
    };
    let cards = set.records.iter().enumerate().map(|(index, record)| {
        let on_select = props.on_select.clone();
        let id = record.id.clone();
        html! {
            <ProjectCard
                key={record.id.clone()}
                record={record.clone()}
                index={index}
                compact={compact}
                on_select={Callback::from(move |_: ()| on_select.emit(id.clone()))}
            />
        }
    });

    html! {
        <div class={classes!("projects", set.is_placeholder().then_some("placeholder"))}>
            if let Some(record) = detail {
                <ProjectDetail record={record} compact={compact} />
            }
            <div class={classes!("project-strip-wrap", showing_detail.then_some("hidden"))}>
                <div class="project-strip" ref={strip_ref}>
                    if !compact {
                        <div class="project-lead"><p>{ PROJECTS_BLURB }</p></div>
                    }
                    { for cards }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    record: ContentRecord,
    index: usize,
    compact: bool,
    on_select: Callback<()>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let record = &props.record;
    let on_select = props.on_select.clone();
    let delay = format!("transition-delay: {}ms", (props.index % 4) * 100);
    html! {
        <div
            class={classes!("project-card", props.compact.then_some("compact"))}
            style={delay}
            onclick={Callback::from(move |_: MouseEvent| on_select.emit(()))}
        >
            <div class="project-text">
                <h2 class="project-number">{ record.number.clone() }</h2>
                <h3 class="project-title">{ record.title.clone() }</h3>
                <p class="project-description">{ record.description.clone() }</p>
            </div>
            <div class="project-cover">
                if let Some(src) = record.cover_image() {
                    <img src={src.to_string()} alt={record.title.clone()} loading="lazy" />
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectDetailProps {
    record: ContentRecord,
    compact: bool,
}

#[function_component(ProjectDetail)]
fn project_detail(props: &ProjectDetailProps) -> Html {
    let container_ref = use_node_ref();
    {
        let container_ref = container_ref.clone();
        use_effect_with(props.record.id.clone(), move |_| {
            if let Some(container) = container_ref.cast::<Element>() {
                container.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        });
    }
    let record = &props.record;
    html! {
        <div class={classes!("project-detail", props.compact.then_some("compact"))} ref={container_ref}>
            <div class="project-detail-column">
                if let Some(src) = record.main_image.clone() {
                    <img src={src} alt={record.title.clone()} />
                }
                if let Some(text) = record.long_description.clone() {
                    <p class="project-long-description">{ text }</p>
                }
                { for record.images.iter().map(|src| html! { <img src={src.clone()} alt="" /> }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GraphicViewProps {
    mode: GalleryMode,
}

#[function_component(GraphicView)]
fn graphic_view(props: &GraphicViewProps) -> Html {
    match props.mode {
        GalleryMode::FreePlacement => html! { <GraphicWall /> },
        GalleryMode::CanvasPan => html! { <GraphicCanvas /> },
    }
}

fn graphic_intro() -> Html {
    html! {
        <div class="graphic-intro"><p>{ GRAPHIC_BLURB }</p></div>
    }
}

fn render_overlay(set: &ContentSet, overlay: &OverlayHandle, items: &[DraggableItem]) -> Html {
    let Some(id) = overlay.selected() else {
        return html! {};
    };
    let Some(record) = set.find(&id).cloned() else {
        return html! {};
    };
    let position = items
        .iter()
        .find(|item| item.id == id)
        .map(DraggableItem::position_label);
    let overlay = overlay.clone();
    let closing = overlay.closing();
    html! {
        <GraphicDetail
            record={record}
            position={position}
            closing={closing}
            on_close={Callback::from(move |_: ()| overlay.close())}
        />
    }
}

#[function_component(GraphicWall)]
fn graphic_wall() -> Html {
    let compact = use_compact();
    let content = use_content(ContentKind::Graphic);
    let wall = use_mut_ref(|| FreePlacement::new(Vec::new()));
    let refresh = use_force_update();
    let overlay = use_overlay();
    let container_ref = use_node_ref();

    {
        let wall = wall.clone();
        let refresh = refresh.clone();
        use_effect_with(content.clone(), move |content| {
            if let Some(set) = content.as_ref() {
                let mut wall = wall.borrow_mut();
                let touch_only = wall.touch_only();
                *wall = FreePlacement::new(items_from_records(&set.records));
                wall.set_touch_only(touch_only);
                refresh.force_update();
            }
            || ()
        });
    }
    {
        let wall = wall.clone();
        use_effect_with(compact, move |compact| {
            wall.borrow_mut().set_touch_only(*compact);
            || ()
        });
    }

    let dragging = wall.borrow().dragging_id().map(str::to_string);
    {
        let wall = wall.clone();
        let refresh = refresh.clone();
        let container_ref = container_ref.clone();
        use_effect_with(dragging.clone(), move |dragging| {
            let mut listeners = Vec::new();
            if let (Some(_), Some(window)) = (dragging.as_ref(), web_sys::window()) {
                {
                    let wall = wall.clone();
                    let refresh = refresh.clone();
                    listeners.push(EventListener::new(&window, "pointermove", move |event| {
                        let (Some(event), Some(container)) = (
                            event.dyn_ref::<PointerEvent>(),
                            container_ref.cast::<Element>(),
                        ) else {
                            return;
                        };
                        let surface = input::element_rect(&container);
                        if wall
                            .borrow_mut()
                            .pointer_move(input::client_point(event), surface)
                        {
                            refresh.force_update();
                        }
                    }));
                }
                // touch gestures taken over by the browser end in pointercancel
                for event_type in ["pointerup", "pointercancel"] {
                    let wall = wall.clone();
                    let refresh = refresh.clone();
                    listeners.push(EventListener::new(&window, event_type, move |_| {
                        wall.borrow_mut().pointer_up();
                        refresh.force_update();
                    }));
                }
            }
            move || drop(listeners)
        });
    }

    let Some(set) = content else {
        return html! { <div class="graphic loading" /> };
    };

    let onmousemove = {
        let wall = wall.clone();
        let refresh = refresh.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(container) = container_ref.cast::<Element>() {
                let surface = input::element_rect(&container);
                wall.borrow_mut()
                    .track_pointer(input::client_point(&event), surface);
                refresh.force_update();
            }
        })
    };

    let state = wall.borrow();
    let readout = if compact {
        html! {}
    } else {
        state.readout().map_or_else(
            || html! {},
            |readout| {
                let style = format!(
                    "left: {}px; top: {}px",
                    readout.client.x + 15.0,
                    readout.client.y + 15.0
                );
                html! { <div class="pointer-readout" style={style}>{ readout.label() }</div> }
            },
        )
    };
    let caption = if compact {
        html! {}
    } else {
        let hovered = state.hovered().and_then(|item| set.find(&item.id));
        html! {
            <div class={classes!("hover-caption", hovered.is_some().then_some("visible"))}>
                if let Some(record) = hovered {
                    <span class="caption-number">{ record.number.clone() }</span>
                    <h4 class="caption-title">{ record.title.clone() }</h4>
                    <p class="caption-description">{ record.description.clone() }</p>
                }
            </div>
        }
    };
    let items = state.items().iter().map(|item| {
        let id = item.id.clone();
        let record = set.find(&id);
        let size = item.display_size(compact);
        let style = format!(
            "left: {}%; top: {}%; width: {}px; height: {}px",
            item.position.x, item.position.y, size.width, size.height
        );
        let onpointerdown = {
            let wall = wall.clone();
            let refresh = refresh.clone();
            let id = id.clone();
            Callback::from(move |event: PointerEvent| {
                if PointerKind::of(&event) == PointerKind::Mouse && event.button() != 0 {
                    return;
                }
                let Some(target) = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|target| target.closest(".wall-item").ok().flatten())
                else {
                    return;
                };
                let item_rect = input::element_rect(&target);
                if wall
                    .borrow_mut()
                    .pointer_down(&id, input::client_point(&event), item_rect)
                {
                    event.prevent_default();
                    refresh.force_update();
                }
            })
        };
        let onmouseenter = {
            let wall = wall.clone();
            let refresh = refresh.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| {
                wall.borrow_mut().hover_enter(&id);
                refresh.force_update();
            })
        };
        let onmouseleave = {
            let wall = wall.clone();
            let refresh = refresh.clone();
            Callback::from(move |_: MouseEvent| {
                wall.borrow_mut().hover_leave();
                refresh.force_update();
            })
        };
        let onclick = {
            let wall = wall.clone();
            let overlay = overlay.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| {
                if wall.borrow().activate(&id) {
                    overlay.open(&id);
                }
            })
        };
        let dragging_this = state.dragging_id() == Some(id.as_str());
        html! {
            <div
                key={id.clone()}
                class={classes!("wall-item", dragging_this.then_some("dragging"))}
                style={style}
                onpointerdown={onpointerdown}
                onmouseenter={onmouseenter}
                onmouseleave={onmouseleave}
                onclick={onclick}
            >
                <div class="wall-item-face">
                    if let Some(src) = record.and_then(ContentRecord::cover_image) {
                        <img src={src.to_string()} alt={record.map(|r| r.title.clone()).unwrap_or_default()} draggable="false" />
                    } else {
                        <span class="wall-item-number">{ record.map(|r| r.number.clone()).unwrap_or_default() }</span>
                    }
                </div>
            </div>
        }
    });
    let items: Html = items.collect();
    let overlay_view = render_overlay(&set, &overlay, state.items());
    drop(state);

    html! {
        <div
            class={classes!("graphic", "graphic-wall", set.is_placeholder().then_some("placeholder"))}
            ref={container_ref}
            onmousemove={onmousemove}
        >
            { readout }
            { graphic_intro() }
            { caption }
            { items }
            { overlay_view }
        </div>
    }
}

#[function_component(GraphicCanvas)]
fn graphic_canvas() -> Html {
    let content = use_content(ContentKind::Graphic);
    let pan = use_mut_ref(CanvasPan::new);
    let refresh = use_force_update();
    let overlay = use_overlay();
    let viewport_ref = use_node_ref();

    {
        let viewport_ref = viewport_ref.clone();
        use_effect_with(content.is_some(), move |loaded| {
            let timer = loaded.then(|| {
                Timeout::new(CANVAS_CENTER_DELAY_MS, move || {
                    if let Some(viewport) = viewport_ref.cast::<Element>() {
                        let scroll = centered_scroll(
                            input::scroll_size(&viewport),
                            input::client_size(&viewport),
                        );
                        input::scroll_to(&viewport, scroll);
                    }
                })
            });
            move || drop(timer)
        });
    }

    let Some(set) = content else {
        return html! { <div class="graphic loading" /> };
    };

    let onpointerdown = {
        let pan = pan.clone();
        let refresh = refresh.clone();
        let viewport_ref = viewport_ref.clone();
        Callback::from(move |event: PointerEvent| {
            if let Some(viewport) = viewport_ref.cast::<Element>() {
                pan.borrow_mut()
                    .pointer_down(input::client_point(&event), input::scroll_point(&viewport));
                refresh.force_update();
            }
        })
    };
    let onpointermove = {
        let pan = pan.clone();
        let viewport_ref = viewport_ref.clone();
        Callback::from(move |event: PointerEvent| {
            let next = pan.borrow_mut().pointer_move(input::client_point(&event));
            if let (Some(scroll), Some(viewport)) = (next, viewport_ref.cast::<Element>()) {
                event.prevent_default();
                input::scroll_to(&viewport, scroll);
            }
        })
    };
    let end_pan = {
        let pan = pan.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: PointerEvent| {
            let mut pan = pan.borrow_mut();
            if pan.is_panning() {
                pan.pointer_up();
                refresh.force_update();
            }
        })
    };

    let cursor = format!("cursor: {}", pan.borrow().cursor().css());
    let canvas_style = format!(
        "width: {pct}%; height: {pct}%",
        pct = CANVAS_SCALE * 100.0
    );
    let items = items_from_records(&set.records);
    let cards = items.iter().map(|item| {
        let record = set.find(&item.id);
        let id = item.id.clone();
        let style = format!(
            "left: {}%; top: {}%; width: {}px; height: {}px",
            item.position.x, item.position.y, item.size.width, item.size.height
        );
        let onclick = {
            let pan = pan.clone();
            let overlay = overlay.clone();
            Callback::from(move |_: MouseEvent| {
                if pan.borrow().allows_activation() {
                    overlay.open(&id);
                }
            })
        };
        html! {
            <div key={item.id.clone()} class="canvas-item" style={style} onclick={onclick}>
                if let Some(src) = record.and_then(ContentRecord::cover_image) {
                    <img src={src.to_string()} alt="" draggable="false" />
                }
                if let Some(record) = record {
                    <span class="canvas-item-number">{ record.number.clone() }</span>
                }
            </div>
        }
    });
    let cards: Html = cards.collect();

    html! {
        <div class={classes!("graphic", "graphic-canvas", set.is_placeholder().then_some("placeholder"))}>
            { graphic_intro() }
            <div
                class="canvas-viewport"
                ref={viewport_ref}
                style={cursor}
                onpointerdown={onpointerdown}
                onpointermove={onpointermove}
                onpointerup={end_pan.clone()}
                onpointercancel={end_pan.clone()}
                onpointerleave={end_pan}
            >
                <div class="canvas-surface" style={canvas_style}>
                    { cards }
                </div>
            </div>
            { render_overlay(&set, &overlay, &items) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GraphicDetailProps {
    record: ContentRecord,
    position: Option<String>,
    closing: bool,
    on_close: Callback<()>,
}

#[function_component(GraphicDetail)]
fn graphic_detail(props: &GraphicDetailProps) -> Html {
    let record = &props.record;
    let on_close = props.on_close.clone();
    html! {
        <div
            class={classes!("graphic-detail", if props.closing { "closing" } else { "opening" })}
            onclick={Callback::from(move |_: MouseEvent| on_close.emit(()))}
        >
            <div class="graphic-detail-body">
                if let Some(src) = record.cover_image() {
                    <img src={src.to_string()} alt={record.title.clone()} />
                }
                <div class="graphic-detail-meta">
                    <span class="caption-number">{ record.number.clone() }</span>
                    if let Some(position) = props.position.clone() {
                        <span class="graphic-detail-position">{ position }</span>
                    }
                </div>
                <h4 class="caption-title">{ record.title.clone() }</h4>
                <p class="caption-description">{ record.description.clone() }</p>
            </div>
        </div>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AboutTab {
    Me,
    Skills,
    Contact,
}

impl AboutTab {
    const ALL: [AboutTab; 3] = [AboutTab::Me, AboutTab::Skills, AboutTab::Contact];

    fn number(self) -> &'static str {
        match self {
            AboutTab::Me => "(01)",
            AboutTab::Skills => "(02)",
            AboutTab::Contact => "(03)",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AboutTab::Me => "Me",
            AboutTab::Skills => "Tools",
            AboutTab::Contact => "Contact",
        }
    }
}

#[function_component(AboutView)]
fn about_view() -> Html {
    let compact = use_compact();
    // compact layouts start on the tab list, wide layouts on the first tab
    let active = use_state_eq(|| (!input::is_compact_viewport()).then_some(AboutTab::Me));
    {
        let active = active.clone();
        use_effect_with(compact, move |compact| {
            if !*compact && active.is_none() {
                active.set(Some(AboutTab::Me));
            }
            || ()
        });
    }

    let tabs = AboutTab::ALL.iter().copied().map(|tab| {
        let active_handle = active.clone();
        let selected = *active == Some(tab);
        html! {
            <div
                class={classes!("about-tab", selected.then_some("active"))}
                onclick={Callback::from(move |_: MouseEvent| active_handle.set(Some(tab)))}
            >
                <span class="about-tab-number">{ tab.number() }</span>
                <span class="about-tab-label">{ tab.label() }</span>
            </div>
        }
    });
    let section = match *active {
        None => html! {},
        Some(AboutTab::Me) => html! {
            <div class="about-section about-me">
                <h2>{ OWNER_NAME }</h2>
                <p>{ INTRO_TEXT }</p>
            </div>
        },
        Some(AboutTab::Skills) => html! {
            <div class="about-section about-skills">
                { for SKILLS.iter().map(|(name, level)| html! {
                    <div class="skill">
                        <span class="skill-name">{ *name }</span>
                        <div class="skill-track">
                            <div class="skill-fill" style={format!("width: {level}%")} />
                            { for SKILL_TICKS.iter().map(|tick| html! {
                                <div class="skill-tick" style={format!("left: {tick}%")} />
                            }) }
                        </div>
                    </div>
                }) }
            </div>
        },
        Some(AboutTab::Contact) => html! {
            <div class="about-section about-contact">
                { for CONTACT_LINKS.iter().map(|(label, href)| html! {
                    <a href={*href} target="_blank" rel="noopener noreferrer">{ *label }</a>
                }) }
            </div>
        },
    };
    let on_back = {
        let active = active.clone();
        Callback::from(move |_: MouseEvent| active.set(None))
    };

    html! {
        <div class={classes!("about", compact.then_some("compact"))}>
            <div class="about-index">{ for tabs }</div>
            if compact && active.is_some() {
                <button class="about-back" aria-label="Back" onclick={on_back}>
                    <svg width="20" height="20" viewBox="0 0 24 24" fill="none"
                        stroke="currentColor" stroke-width="2.5"
                        stroke-linecap="round" stroke-linejoin="round">
                        <path d="M19 12H5M12 19l-7-7 7-7" />
                    </svg>
                </button>
            }
            { section }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use folio_core::transition::CYCLE_MS;
    use folio_core::ContentConfig;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_root(id: &str) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        root
    }

    fn pointer_event(event_type: &str) -> PointerEvent {
        let init = web_sys::PointerEventInit::new();
        init.set_bubbles(true);
        init.set_pointer_type("mouse");
        PointerEvent::new_with_event_init_dict(event_type, &init).expect("pointer event")
    }

    async fn wait_for(root: &Element, selector: &str) -> Option<Element> {
        for _ in 0..100 {
            if let Some(found) = root.query_selector(selector).ok().flatten() {
                return Some(found);
            }
            TimeoutFuture::new(50).await;
        }
        None
    }

    fn render_gallery(root: &Element, gallery: GalleryMode) {
        app_router::replace_fragment("#/graphic");
        let core = SiteCore::new(&app_router::current_fragment());
        yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps {
                core,
                client: offline_client(),
                gallery,
            },
        )
        .render();
    }

    fn offline_client() -> Rc<SanityClient> {
        Rc::new(SanityClient::new(ContentConfig {
            project_id: "invalid-host-for-tests".to_string(),
            ..ContentConfig::default()
        }))
    }

    #[wasm_bindgen_test(async)]
    async fn navigation_veils_then_swaps_view() {
        set_panic_hook();
        app_router::replace_fragment("#/home");
        let root = mount_root("folio-test-nav");
        let core = SiteCore::new(&app_router::current_fragment());
        let _handle = yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps {
                core: core.clone(),
                client: offline_client(),
                gallery: GalleryMode::FreePlacement,
            },
        )
        .render();
        TimeoutFuture::new(20).await;
        assert_eq!(root.query_selector_all(".nav-link").map(|list| list.length()).ok(), Some(4));
        assert!(root.query_selector(".view-home").ok().flatten().is_some());

        core.navigate(View::About);
        TimeoutFuture::new(20).await;
        assert!(root.query_selector(".veil.veil-in").ok().flatten().is_some());

        TimeoutFuture::new(CYCLE_MS + 200).await;
        assert!(root.query_selector(".veil").ok().flatten().is_none());
        assert!(root.query_selector(".view-about").ok().flatten().is_some());
        assert_eq!(app_router::current_fragment(), "#/about");
    }

    #[wasm_bindgen_test(async)]
    async fn offline_projects_render_placeholders() {
        set_panic_hook();
        app_router::replace_fragment("#/projects");
        let root = mount_root("folio-test-projects");
        let core = SiteCore::new(&app_router::current_fragment());
        let _handle = yew::Renderer::<App>::with_root_and_props(
            root.clone(),
            AppProps {
                core,
                client: offline_client(),
                gallery: GalleryMode::CanvasPan,
            },
        )
        .render();
        let mut cards = 0;
        for _ in 0..100 {
            TimeoutFuture::new(50).await;
            cards = root
                .query_selector_all(".project-card")
                .map(|list| list.length())
                .unwrap_or(0);
            if cards > 0 {
                break;
            }
        }
        assert_eq!(cards as usize, folio_core::content::PLACEHOLDER_COUNT);
        assert!(root.query_selector(".nav-back").ok().flatten().is_none());
    }

    #[wasm_bindgen_test(async)]
    async fn wall_drag_ends_on_pointercancel_and_detail_shows_position() {
        set_panic_hook();
        if input::is_compact_viewport() {
            return;
        }
        let root = mount_root("folio-test-wall");
        render_gallery(&root, GalleryMode::FreePlacement);
        let item = wait_for(&root, ".wall-item").await.expect("wall item");

        item.dispatch_event(&pointer_event("pointerdown"))
            .expect("dispatch pointerdown");
        TimeoutFuture::new(20).await;
        assert!(root.query_selector(".wall-item.dragging").ok().flatten().is_some());

        let window = web_sys::window().expect("window available");
        window
            .dispatch_event(&pointer_event("pointercancel"))
            .expect("dispatch pointercancel");
        TimeoutFuture::new(20).await;
        assert!(root.query_selector(".wall-item.dragging").ok().flatten().is_none());

        item.dyn_ref::<web_sys::HtmlElement>()
            .expect("html element")
            .click();
        let position = wait_for(&root, ".graphic-detail-position")
            .await
            .and_then(|node| node.text_content())
            .unwrap_or_default();
        assert!(position.starts_with("X:"), "position label: {position:?}");
        assert!(position.contains(" Y:"), "position label: {position:?}");
    }

    #[wasm_bindgen_test(async)]
    async fn canvas_pan_ends_on_pointercancel() {
        set_panic_hook();
        let root = mount_root("folio-test-canvas");
        render_gallery(&root, GalleryMode::CanvasPan);
        wait_for(&root, ".canvas-item").await.expect("canvas item");
        let viewport = root
            .query_selector(".canvas-viewport")
            .ok()
            .flatten()
            .expect("canvas viewport");
        let cursor = |viewport: &Element| viewport.get_attribute("style").unwrap_or_default();

        viewport
            .dispatch_event(&pointer_event("pointerdown"))
            .expect("dispatch pointerdown");
        TimeoutFuture::new(20).await;
        assert_eq!(cursor(&viewport), "cursor: grabbing");

        viewport
            .dispatch_event(&pointer_event("pointercancel"))
            .expect("dispatch pointercancel");
        TimeoutFuture::new(20).await;
        assert_eq!(cursor(&viewport), "cursor: grab");
    }
}
