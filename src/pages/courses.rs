use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::cards::{Course, CourseCard};
use crate::components::notification::use_notifier;
use crate::utils::collections::{sort_by, SortDirection};
use crate::utils::images::preload_multiple;

pub fn catalog() -> Vec<Course> {
    vec![
        Course {
            title: "Modern Web Development",
            category: "Development",
            description: "HTML, CSS and JavaScript from first principles to a deployed project.",
            image: "/assets/images/course-web.jpg",
            price: 89.99,
            lessons: 42,
            hours: 36,
            level: "Beginner",
        },
        Course {
            title: "Data Science Fundamentals",
            category: "Data",
            description: "Statistics, Python and visualization for people who work with data.",
            image: "/assets/images/course-data.jpg",
            price: 119.0,
            lessons: 38,
            hours: 40,
            level: "Intermediate",
        },
        Course {
            title: "UI/UX Design Essentials",
            category: "Design",
            description: "Research, wireframes and prototypes that users actually enjoy.",
            image: "/assets/images/course-design.jpg",
            price: 79.0,
            lessons: 28,
            hours: 22,
            level: "Beginner",
        },
        Course {
            title: "Machine Learning in Practice",
            category: "AI",
            description: "Train, evaluate and ship models with real world datasets.",
            image: "/assets/images/course-ml.jpg",
            price: 149.0,
            lessons: 50,
            hours: 55,
            level: "Advanced",
        },
    ]
}

/// Catalog order by default, otherwise sorted by price.
pub fn listed(order: Option<SortDirection>) -> Vec<Course> {
    match order {
        Some(direction) => sort_by(&catalog(), |c| c.price, direction),
        None => catalog(),
    }
}

fn next_order(order: Option<SortDirection>) -> Option<SortDirection> {
    match order {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}

#[function_component(Courses)]
pub fn courses() -> Html {
    let notifier = use_notifier();
    let order = use_state_eq(|| None::<SortDirection>);

    // Warm the cache so cards render with their images.
    use_effect_with_deps(
        |_| {
            spawn_local(async {
                let sources: Vec<&str> = catalog().iter().map(|c| c.image).collect();
                match preload_multiple(&sources).await {
                    Ok(images) => debug!("Preloaded {} course images", images.len()),
                    Err(e) => warn!("Course images did not preload: {}", e),
                }
            });
            || ()
        },
        (),
    );

    let on_sort = {
        let order = order.clone();
        Callback::from(move |_: MouseEvent| order.set(next_order(*order)))
    };
    let sort_label = match *order {
        None => "Sort by price",
        Some(SortDirection::Asc) => "Price: low to high",
        Some(SortDirection::Desc) => "Price: high to low",
    };

    html! {
        <main class="courses-page">
            <section id="courses" class="page-hero">
                <div class="container">
                    <h1 class="animate-on-load">{"Our Courses"}</h1>
                    <p class="animate-on-load">{"Pick a path and learn at your own pace."}</p>
                </div>
            </section>
            <section class="course-list">
                <div class="container course-toolbar">
                    <button class="btn secondary sort-btn" onclick={on_sort}>
                        <i class="fas fa-sort"></i>{" "}{ sort_label }
                    </button>
                </div>
                <div class="container courses-grid" data-stagger="120">
                    { for listed(*order).into_iter().map(|course| html! {
                        <CourseCard key={course.title} course={course.clone()} notifier={notifier.clone()} />
                    }) }
                </div>
            </section>
        </main>
    }
}
