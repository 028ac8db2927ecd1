use log::warn;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::config::Config;
use crate::components::cards::{Service, ServiceCard};
use crate::components::notification::use_notifier;
use crate::components::overlays::{VideoControl, DEFAULT_VIDEO};
use crate::components::ripple::RippleButton;
use crate::components::testimonials::Testimonials;
use crate::forms::NewsletterForm;
use crate::navigation::scroll_to_section;

struct Stat {
    target: &'static str,
    label: &'static str,
}

const STATS: [Stat; 4] = [
    Stat { target: "15000", label: "Active Students" },
    Stat { target: "120", label: "Expert Instructors" },
    Stat { target: "350", label: "Online Courses" },
    Stat { target: "98", label: "Satisfaction Rate" },
];

fn services() -> Vec<Service> {
    vec![
        Service {
            title: "Interactive Courses",
            icon: "fas fa-laptop-code",
            description: "Hands-on lessons with quizzes and projects that keep you engaged from the first minute.",
        },
        Service {
            title: "Live Mentoring",
            icon: "fas fa-chalkboard-teacher",
            description: "Weekly sessions with industry mentors who review your work and answer your questions.",
        },
        Service {
            title: "Certification",
            icon: "fas fa-certificate",
            description: "Earn certificates recognized by employers when you complete a learning path.",
        },
    ]
}

#[function_component(Home)]
pub fn home() -> Html {
    let notifier = use_notifier();
    let video = use_context::<VideoControl>();

    let watch_demo = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        match &video {
            Some(video) => video.open.emit(AttrValue::from(DEFAULT_VIDEO)),
            None => warn!("Video player is not mounted"),
        }
    });
    let explore = {
        let offset = use_context::<Config>().unwrap_or_default().scroll.offset;
        Callback::from(move |_: MouseEvent| {
            scroll_to_section("features", offset);
        })
    };

    html! {
        <main class="home-page">
            <section id="home" class="hero" data-mouse-trail="">
                <div class="particles"></div>
                <div class="container hero-content">
                    <h1 class="hero-title animate-on-load">
                        {"Learn without limits with "}<span class="typewriter-effect" data-speed="80">{"LearnEase"}</span>
                    </h1>
                    <p class="hero-subtitle animate-on-load">
                        {"Build the skills employers are looking for with courses taught by practitioners."}
                    </p>
                    <div class="hero-buttons animate-on-load">
                        <RippleButton class="btn primary" onclick={explore} glow={true}>{"Get Started"}</RippleButton>
                        <button class="btn secondary watch-demo" data-click-trail="" onclick={watch_demo}>
                            <i class="fas fa-play"></i>{" Watch Demo"}
                        </button>
                    </div>
                </div>
                <div class="hero-shape morph-shape parallax-element" data-speed="0.3"></div>
            </section>

            <section id="features" class="features">
                <div class="container">
                    <div class="section-header scroll-fade-in">
                        <h2 class="section-title text-reveal">{"Why LearnEase"}</h2>
                        <p>{"Everything you need to go from curious to confident."}</p>
                    </div>
                    <div class="services-grid" data-stagger="150">
                        { for services().into_iter().map(|service| html! { <ServiceCard {service} /> }) }
                    </div>
                </div>
            </section>

            <section id="stats" class="stats">
                <div class="container stats-grid">
                    { for STATS.iter().map(|stat| html! {
                        <div class="stat-item" data-aos="bounce-in">
                            <span class="stat-number" data-target={stat.target}>{"0"}</span>
                            <span class="stat-label">{ stat.label }</span>
                        </div>
                    }) }
                </div>
            </section>

            <Testimonials />

            <section id="newsletter" class="newsletter scroll-scale-in">
                <div class="container">
                    <h2>{"Stay in the loop"}</h2>
                    <p>{"New courses and learning tips, once a month."}</p>
                    <NewsletterForm {notifier} />
                    <Link<Route> to={Route::Courses} classes="btn link">{"Browse all courses"}</Link<Route>>
                </div>
            </section>
        </main>
    }
}
