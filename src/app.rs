use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::animations::page::PageEffects;
use crate::animations::performance::PerformanceWatch;
use crate::components::notification::NotificationProvider;
use crate::components::overlays::{LoadingScreen, VideoModal};
use crate::config::Config;
use crate::navigation::{BackToTop, Nav};
use crate::pages::about::About;
use crate::pages::contact::Contact;
use crate::pages::courses::Courses;
use crate::pages::home::Home;
use crate::theme::ThemeToggle;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[at("/courses")]
    Courses,
    #[at("/contact")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::About => {
            info!("Rendering About page");
            html! { <About /> }
        }
        Route::Courses => {
            info!("Rendering Courses page");
            html! { <Courses /> }
        }
        Route::Contact => {
            info!("Rendering Contact page");
            html! { <Contact /> }
        }
        Route::NotFound => {
            warn!("Unknown route, rendering Home page");
            html! { <Home /> }
        }
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="footer">
            <div class="container footer-content">
                <div class="footer-brand">
                    <Link<Route> to={Route::Home} classes="nav-logo">
                        <i class="fas fa-graduation-cap"></i>{" LearnEase"}
                    </Link<Route>>
                    <p>{"Learning made simple, for everyone."}</p>
                </div>
                <div class="footer-links">
                    <Link<Route> to={Route::Courses}>{"Courses"}</Link<Route>>
                    <Link<Route> to={Route::About}>{"About"}</Link<Route>>
                    <Link<Route> to={Route::Contact}>{"Contact"}</Link<Route>>
                </div>
            </div>
            <p class="copyright">{"© 2024 LearnEase. All rights reserved."}</p>
        </footer>
    }
}

/// Everything inside the router. Page level effects are rebound whenever
/// the route changes, once the new page has rendered.
#[function_component(Shell)]
fn shell() -> Html {
    let route = use_route::<Route>();

    use_effect_with_deps(
        move |_| {
            let effects = Rc::new(RefCell::new(None::<PageEffects>));
            let slot = effects.clone();
            let bind = Timeout::new(0, move || *slot.borrow_mut() = Some(PageEffects::attach()));
            move || {
                drop(bind);
                effects.borrow_mut().take();
            }
        },
        route,
    );

    html! {
        <>
            <Nav>
                <ThemeToggle />
            </Nav>
            <Switch<Route> render={switch} />
            <Footer />
            <BackToTop />
        </>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| Config::load(), ());

    use_effect_with_deps(
        |_| {
            let watch = PerformanceWatch::attach()
                .map_err(|e| warn!("Performance monitoring disabled: {}", e))
                .ok();
            move || drop(watch)
        },
        (),
    );

    html! {
        <ContextProvider<Config> context={(*config).clone()}>
            <BrowserRouter>
                <NotificationProvider>
                    <VideoModal>
                        <Shell />
                    </VideoModal>
                </NotificationProvider>
            </BrowserRouter>
            <LoadingScreen />
        </ContextProvider<Config>>
    }
}
