use yew::prelude::*;

use crate::components::notification::use_notifier;
use crate::forms::ContactForm;

#[function_component(Contact)]
pub fn contact() -> Html {
    let notifier = use_notifier();

    html! {
        <main class="contact-page">
            <section id="contact" class="page-hero">
                <div class="container">
                    <h1 class="animate-on-load">{"Get in Touch"}</h1>
                    <p class="animate-on-load">{"Questions about a course or a team plan? We answer within one business day."}</p>
                </div>
            </section>
            <section class="contact-section">
                <div class="container contact-grid">
                    <div class="contact-info scroll-slide-in-left">
                        <div class="info-item"><i class="fas fa-envelope"></i>{" hello@learnease.com"}</div>
                        <div class="info-item"><i class="fas fa-phone"></i>{" +1 (555) 123-4567"}</div>
                        <div class="info-item"><i class="fas fa-map-marker-alt"></i>{" 123 Learning Street, Education City"}</div>
                    </div>
                    <div class="contact-form-wrapper scroll-slide-in-right">
                        <ContactForm {notifier} />
                    </div>
                </div>
            </section>
        </main>
    }
}
