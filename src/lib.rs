pub mod app;
pub mod carousel;
pub mod config;
pub mod dom;
pub mod error;
pub mod forms;
pub mod navigation;
pub mod scheduler;
pub mod service_worker;
pub mod theme;

pub mod animations {
    pub mod easing;
    pub mod effects;
    pub mod frame;
    pub mod observer;
    pub mod page;
    pub mod particles;
    pub mod performance;
    pub mod reveal;
}
pub mod components {
    pub mod cards;
    pub mod media;
    pub mod notification;
    pub mod overlays;
    pub mod ripple;
    pub mod testimonials;
}
pub mod pages {
    pub mod about;
    pub mod contact;
    pub mod courses;
    pub mod home;
}
pub mod utils {
    pub mod collections;
    pub mod colors;
    pub mod cookies;
    pub mod dates;
    pub mod device;
    pub mod images;
    pub mod numbers;
    pub mod perf;
    pub mod query;
    pub mod storage;
    pub mod text;
    pub mod timing;
    pub mod validation;
}

pub use error::{Error, Result};
