use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use super::notification::Notifier;
use super::ripple::RippleButton;

const ENROLL_MODAL_DELAY_MS: u32 = 500;
const DETAILS_PRESS_MS: u32 = 200;
const EXPAND_DELAY_MS: u32 = 100;

pub fn enroll_message(course: &str) -> String {
    format!("Great choice! Starting enrollment for \"{}\"", course)
}

pub fn details_message(course: &str) -> String {
    format!("Loading details for \"{}\"...", course)
}

/// Card rotation in degrees for a pointer offset from the card center,
/// normalized by the card size.
pub fn tilt(dx: f64, dy: f64) -> (f64, f64) {
    (dy * -10.0, dx * 10.0)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!("perspective(1000px) rotateX({}deg) rotateY({}deg)", rotate_x, rotate_y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    LinkedIn,
    Twitter,
    GitHub,
    Facebook,
    Unknown,
}

impl SocialPlatform {
    pub fn detect(url: &str) -> Self {
        if url.contains("linkedin") {
            SocialPlatform::LinkedIn
        } else if url.contains("twitter") {
            SocialPlatform::Twitter
        } else if url.contains("github") {
            SocialPlatform::GitHub
        } else if url.contains("facebook") {
            SocialPlatform::Facebook
        } else {
            SocialPlatform::Unknown
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SocialPlatform::LinkedIn => "fab fa-linkedin",
            SocialPlatform::Twitter => "fab fa-twitter",
            SocialPlatform::GitHub => "fab fa-github",
            SocialPlatform::Facebook => "fab fa-facebook",
            SocialPlatform::Unknown => "fas fa-link",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Course {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub price: f64,
    pub lessons: u32,
    pub hours: u32,
    pub level: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct CourseCardProps {
    pub course: Course,
    pub notifier: Notifier,
}

#[function_component(CourseCard)]
pub fn course_card(props: &CourseCardProps) -> Html {
    let modal_open = use_state(|| false);
    let pressed = use_state(|| false);
    let timer = use_mut_ref(|| None::<Timeout>);
    let title = props.course.title;

    let on_enroll = {
        let notifier = props.notifier.clone();
        let modal_open = modal_open.clone();
        let timer = timer.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            notifier.success(enroll_message(title));
            let modal_open = modal_open.clone();
            *timer.borrow_mut() = Some(Timeout::new(ENROLL_MODAL_DELAY_MS, move || modal_open.set(true)));
        })
    };

    let on_details = {
        let notifier = props.notifier.clone();
        let pressed = pressed.clone();
        let timer = timer.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            pressed.set(true);
            let pressed = pressed.clone();
            let notifier = notifier.clone();
            *timer.borrow_mut() = Some(Timeout::new(DETAILS_PRESS_MS, move || {
                pressed.set(false);
                notifier.info(details_message(title));
            }));
        })
    };

    let on_close = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: ()| modal_open.set(false))
    };

    let course = &props.course;
    html! {
        <div class="course-card" style={(*pressed).then(|| "transform: scale(1.02)")} onmouseenter={Callback::from(move |_: MouseEvent| debug!("Hovering course {}", title))}>
            <div class="course-image">
                <img src={course.image} alt={course.title} loading="lazy" />
                <span class="course-category">{ course.category }</span>
            </div>
            <div class="course-content">
                <h3>{ course.title }</h3>
                <p>{ course.description }</p>
                <div class="course-meta">
                    <span><i class="fas fa-book"></i>{ format!(" {} Lessons", course.lessons) }</span>
                    <span><i class="fas fa-clock"></i>{ format!(" {} Hours", course.hours) }</span>
                    <span><i class="fas fa-signal"></i>{ format!(" {}", course.level) }</span>
                </div>
                <div class="course-footer">
                    <span class="course-price">{ crate::utils::numbers::format_currency(course.price, "USD") }</span>
                    <RippleButton class="course-btn" onclick={on_details}>{"View Details"}</RippleButton>
                    <RippleButton class="enroll-btn" onclick={on_enroll} pulse={true}>{"Enroll Now"}</RippleButton>
                </div>
            </div>
            if *modal_open {
                <EnrollmentModal course={course.title} on_close={on_close} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EnrollmentModalProps {
    pub course: &'static str,
    pub on_close: Callback<()>,
}

#[function_component(EnrollmentModal)]
pub fn enrollment_modal(props: &EnrollmentModalProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="enrollment-modal active">
            <div class="modal-backdrop" onclick={close.clone()}>
                <div class="modal-content" onclick={keep_open}>
                    <div class="modal-header">
                        <h3>{ format!("Enroll in {}", props.course) }</h3>
                        <button class="modal-close" onclick={close.clone()}>{"×"}</button>
                    </div>
                    <div class="modal-body">
                        <p>{"Ready to start your learning journey?"}</p>
                        <div class="enrollment-benefits">
                            { for ["Lifetime Access", "Certificate of Completion", "24/7 Support"].iter().map(|benefit| html! {
                                <div class="benefit">
                                    <i class="fas fa-check"></i>
                                    <span>{ *benefit }</span>
                                </div>
                            }) }
                        </div>
                    </div>
                    <div class="modal-footer">
                        <button class="btn secondary" onclick={close.clone()}>{"Maybe Later"}</button>
                        <button class="btn primary" onclick={close}>{"Enroll Now"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Clone, PartialEq)]
pub struct Service {
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct ServiceCardProps {
    pub service: Service,
}

#[function_component(ServiceCard)]
pub fn service_card(props: &ServiceCardProps) -> Html {
    let transform = use_state(|| None::<String>);
    let expanded = use_state(|| false);
    let show_details = use_state(|| false);
    let expand_timer = use_mut_ref(|| None::<Timeout>);

    let onmouseenter = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(Some(tilt_transform(5.0, 5.0))))
    };
    let onmouseleave = {
        let transform = transform.clone();
        Callback::from(move |_: MouseEvent| transform.set(None))
    };
    let onmousemove = {
        let transform = transform.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(card) = e.current_target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let rect = card.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let center_x = rect.left() + rect.width() / 2.0;
            let center_y = rect.top() + rect.height() / 2.0;
            let dx = (e.client_x() as f64 - center_x) / rect.width();
            let dy = (e.client_y() as f64 - center_y) / rect.height();
            let (rotate_x, rotate_y) = tilt(dx, dy);
            transform.set(Some(tilt_transform(rotate_x, rotate_y)));
        })
    };

    let on_learn_more = {
        let show_details = show_details.clone();
        let expanded = expanded.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            show_details.set(true);
            let expanded = expanded.clone();
            *expand_timer.borrow_mut() = Some(Timeout::new(EXPAND_DELAY_MS, move || expanded.set(true)));
        })
    };

    let service = &props.service;
    html! {
        <div class="service-card" style={(*transform).clone().map(|t| format!("transform: {}", t))}
            {onmouseenter} {onmouseleave} {onmousemove}>
            <div class="service-icon"><i class={service.icon}></i></div>
            <h3>{ service.title }</h3>
            <p>{ service.description }</p>
            <a href="#" class="service-btn" onclick={on_learn_more}>{"Learn More "}<i class="fas fa-arrow-right"></i></a>
            if *show_details {
                <div class={classes!("service-details", (*expanded).then(|| "expanded"))}>
                    <div class="details-content">
                        <h4>{ format!("About {}", service.title) }</h4>
                        <p>{ format!(
                            "Discover how our {} service can help you achieve your goals with cutting-edge technology and expert guidance.",
                            service.title.to_lowercase()
                        ) }</p>
                        <ul class="service-features">
                            <li><i class="fas fa-check"></i>{" Professional Implementation"}</li>
                            <li><i class="fas fa-check"></i>{" Ongoing Support"}</li>
                            <li><i class="fas fa-check"></i>{" Scalable Solutions"}</li>
                        </ul>
                        <button class="btn primary">{"Get Started"}</button>
                    </div>
                </div>
            }
        </div>
    }
}

#[derive(Clone, PartialEq)]
pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
    pub photo: &'static str,
    pub links: Vec<&'static str>,
}

#[derive(Properties, PartialEq)]
pub struct TeamCardProps {
    pub member: TeamMember,
}

#[function_component(TeamCard)]
pub fn team_card(props: &TeamCardProps) -> Html {
    let open = use_state(|| false);
    let member = &props.member;

    let onclick = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(true))
    };
    let on_close = {
        let open = open.clone();
        Callback::from(move |_: ()| open.set(false))
    };

    html! {
        <>
            <div class="team-card" {onclick}>
                <div class="team-image">
                    <img src={member.photo} alt={member.name} loading="lazy" />
                </div>
                <h3>{ member.name }</h3>
                <p>{ member.role }</p>
                <div class="social-links">
                    { for member.links.iter().map(|&url| {
                        let platform = SocialPlatform::detect(url);
                        let onclick = Callback::from(move |e: MouseEvent| {
                            e.stop_propagation();
                            debug!("Social click: {:?}", platform);
                        });
                        html! {
                            <a href={url} target="_blank" rel="noopener noreferrer" {onclick}>
                                <i class={platform.icon()}></i>
                            </a>
                        }
                    }) }
                </div>
            </div>
            if *open {
                <MemberModal member={member.clone()} on_close={on_close} />
            }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct MemberModalProps {
    pub member: TeamMember,
    pub on_close: Callback<()>,
}

#[function_component(MemberModal)]
pub fn member_modal(props: &MemberModalProps) -> Html {
    let visible = use_state(|| false);
    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let reveal = Timeout::new(EXPAND_DELAY_MS, move || visible.set(true));
                move || drop(reveal)
            },
            (),
        );
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let member = &props.member;

    html! {
        <div class={classes!("member-modal", (*visible).then(|| "active"))}>
            <div class="modal-backdrop" onclick={close.clone()}>
                <div class="modal-content" onclick={keep_open}>
                    <button class="modal-close" onclick={close}>{"×"}</button>
                    <div class="member-profile">
                        <div class="member-avatar">
                            <img src={member.photo} alt={member.name} />
                        </div>
                        <div class="member-info">
                            <h2>{ member.name }</h2>
                            <p class="member-role">{ member.role }</p>
                            <div class="member-bio">
                                <p>{"Experienced professional with a passion for education and technology. Dedicated to helping students achieve their learning goals through innovative teaching methods."}</p>
                                <div class="member-stats">
                                    <div class="stat"><span class="stat-number">{"500+"}</span><span class="stat-label">{"Students Taught"}</span></div>
                                    <div class="stat"><span class="stat-number">{"50+"}</span><span class="stat-label">{"Projects Completed"}</span></div>
                                    <div class="stat"><span class="stat-number">{"5"}</span><span class="stat-label">{"Years Experience"}</span></div>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_messages_quote_course_name() {
        assert_eq!(enroll_message("Rust 101"), "Great choice! Starting enrollment for \"Rust 101\"");
        assert_eq!(details_message("Rust 101"), "Loading details for \"Rust 101\"...");
    }

    #[test]
    fn tilt_follows_pointer() {
        assert_eq!(tilt(0.5, 0.5), (-5.0, 5.0));
        assert_eq!(tilt(-0.5, 0.0), (-0.0, -5.0));
        assert_eq!(tilt_transform(5.0, 5.0), "perspective(1000px) rotateX(5deg) rotateY(5deg)");
    }

    #[test]
    fn social_platform_from_url() {
        assert_eq!(SocialPlatform::detect("https://www.linkedin.com/in/x"), SocialPlatform::LinkedIn);
        assert_eq!(SocialPlatform::detect("https://twitter.com/x"), SocialPlatform::Twitter);
        assert_eq!(SocialPlatform::detect("https://github.com/x"), SocialPlatform::GitHub);
        assert_eq!(SocialPlatform::detect("https://facebook.com/x"), SocialPlatform::Facebook);
        assert_eq!(SocialPlatform::detect("https://example.com"), SocialPlatform::Unknown);
    }
}
