use yew::prelude::*;

use crate::components::cards::{TeamCard, TeamMember};
use crate::components::media::{LazyImage, ProgressBar};

const SKILLS: [(&str, u8); 4] = [
    ("Web Development", 95),
    ("Data Science", 88),
    ("Design", 82),
    ("Career Coaching", 90),
];

fn team() -> Vec<TeamMember> {
    vec![
        TeamMember {
            name: "Sarah Johnson",
            role: "Founder & CEO",
            photo: "/assets/images/team-1.jpg",
            links: vec!["https://linkedin.com/in/sarahjohnson", "https://twitter.com/sarahj"],
        },
        TeamMember {
            name: "Michael Chen",
            role: "Head of Engineering",
            photo: "/assets/images/team-2.jpg",
            links: vec!["https://github.com/mchen", "https://linkedin.com/in/mchen"],
        },
        TeamMember {
            name: "Emily Rodriguez",
            role: "Lead Instructor",
            photo: "/assets/images/team-3.jpg",
            links: vec!["https://twitter.com/emilyr", "https://facebook.com/emilyr"],
        },
    ]
}

#[function_component(About)]
pub fn about() -> Html {
    html! {
        <main class="about-page">
            <section id="about" class="page-hero">
                <div class="container">
                    <h1 class="animate-on-load">{"About LearnEase"}</h1>
                    <p class="animate-on-load">{"We started LearnEase to make high quality education available to anyone with a browser."}</p>
                </div>
            </section>

            <section id="story" class="story">
                <div class="container story-grid">
                    <div class="story-text scroll-slide-in-left">
                        <h2 class="text-reveal">{"Our Story"}</h2>
                        <p>{"What began as a handful of recorded workshops is now a community of learners in more than 80 countries."}</p>
                    </div>
                    <div class="story-image scroll-slide-in-right">
                        <LazyImage src="/assets/images/about-story.jpg" alt="LearnEase team at work" />
                    </div>
                </div>
            </section>

            <section id="skills" class="skills">
                <div class="container">
                    <h2 class="section-title scroll-fade-in">{"What We Teach Best"}</h2>
                    { for SKILLS.iter().map(|&(label, percent)| html! { <ProgressBar {label} {percent} /> }) }
                </div>
            </section>

            <section id="team" class="team">
                <div class="container">
                    <h2 class="section-title scroll-fade-in">{"Meet the Team"}</h2>
                    <div class="team-grid" data-stagger="">
                        { for team().into_iter().map(|member| html! { <TeamCard {member} /> }) }
                    </div>
                </div>
            </section>
        </main>
    }
}
