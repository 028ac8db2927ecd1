use log::info;
use web_sys::Element;
use yew::prelude::*;

use crate::carousel::{AutoplayConfig, Carousel, CarouselEvent};
use crate::config::Config;
use crate::dom;
use crate::scheduler::BrowserScheduler;

#[derive(Clone, PartialEq)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
    pub avatar: &'static str,
    pub rating: u8,
}

pub fn default_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            name: "Sarah Johnson",
            role: "Web Developer",
            quote: "LearnEase transformed my career. The courses are practical and the instructors genuinely care about your progress.",
            avatar: "assets/images/testimonial-1.jpg",
            rating: 5,
        },
        Testimonial {
            name: "Michael Chen",
            role: "Data Analyst",
            quote: "The data science track gave me the confidence to switch industries. I landed my first analyst role within months.",
            avatar: "assets/images/testimonial-2.jpg",
            rating: 5,
        },
        Testimonial {
            name: "Emily Rodriguez",
            role: "UX Designer",
            quote: "Flexible, well structured and fun. I could learn at my own pace while working full time.",
            avatar: "assets/images/testimonial-3.jpg",
            rating: 4,
        },
    ]
}

#[derive(Properties, PartialEq)]
pub struct TestimonialsProps {
    #[prop_or_else(default_testimonials)]
    pub items: Vec<Testimonial>,
}

type ElementCarousel = Carousel<Element, BrowserScheduler>;

#[function_component(Testimonials)]
pub fn testimonials(props: &TestimonialsProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let container = use_node_ref();
    let carousel = use_mut_ref(|| None::<ElementCarousel>);

    // Bind to the rendered slides once they exist; tear down with the component.
    {
        let container = container.clone();
        let carousel = carousel.clone();
        let autoplay = AutoplayConfig::from(&config.testimonial);
        use_effect_with_deps(
            move |_| {
                if let Some(root) = container.cast::<Element>() {
                    let slides = dom::query_all_in(&root, ".testimonial-card");
                    let dots = dom::query_all_in(&root, ".dot");
                    info!("Testimonial carousel bound to {} slides", slides.len());
                    *carousel.borrow_mut() = Some(Carousel::new(slides, dots, autoplay, BrowserScheduler));
                }
                move || {
                    carousel.borrow_mut().take();
                }
            },
            props.items.len(),
        );
    }

    let dispatch = {
        let carousel = carousel.clone();
        move |event: CarouselEvent| {
            if let Some(carousel) = carousel.borrow().as_ref() {
                carousel.handle(event);
            }
        }
    };

    let on_prev = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch(CarouselEvent::Prev))
    };
    let on_next = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch(CarouselEvent::Next))
    };
    let on_enter = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch(CarouselEvent::HoverEnter))
    };
    let on_leave = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch(CarouselEvent::HoverLeave))
    };

    html! {
        <section id="testimonials" class="testimonials">
            <div class="container" ref={container}>
                <div class="section-header">
                    <h2 class="section-title">{"What Our Students Say"}</h2>
                    <p class="section-subtitle">{"Real stories from learners who changed their careers with LearnEase"}</p>
                </div>
                <div class="testimonial-slider">
                    { for props.items.iter().map(|t| html! {
                        <div class="testimonial-card" onmouseenter={on_enter.clone()} onmouseleave={on_leave.clone()}>
                            <div class="testimonial-rating">
                                { for (0..5).map(|i| html! {
                                    <i class={if i < t.rating { "fas fa-star" } else { "far fa-star" }}></i>
                                }) }
                            </div>
                            <p class="testimonial-text">{ format!("\"{}\"", t.quote) }</p>
                            <div class="testimonial-author">
                                <img src={t.avatar} alt={t.name} loading="lazy" />
                                <div>
                                    <h4>{ t.name }</h4>
                                    <span>{ t.role }</span>
                                </div>
                            </div>
                        </div>
                    }) }
                </div>
                <div class="testimonial-controls">
                    <button class="testimonial-prev" aria-label="Previous testimonial" onclick={on_prev}>
                        <i class="fas fa-chevron-left"></i>
                    </button>
                    <div class="testimonial-dots">
                        { for (0..props.items.len()).map(|index| {
                            let dispatch = dispatch.clone();
                            let onclick = Callback::from(move |_: MouseEvent| dispatch(CarouselEvent::Select(index)));
                            html! { <span class="dot" {onclick}></span> }
                        }) }
                    </div>
                    <button class="testimonial-next" aria-label="Next testimonial" onclick={on_next}>
                        <i class="fas fa-chevron-right"></i>
                    </button>
                </div>
            </div>
        </section>
    }
}
