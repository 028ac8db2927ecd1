use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;
use yew::prelude::*;

use crate::config::DEFAULT_NOTIFICATION_MS;
use crate::scheduler::{BrowserScheduler, Scheduler};

/// Delay before a freshly inserted toast slides in.
const REVEAL_DELAY_MS: u32 = 100;
/// Length of the fade-out transition before the toast leaves the DOM.
const REMOVE_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "fas fa-check-circle",
            NotificationKind::Error => "fas fa-exclamation-circle",
            NotificationKind::Warning => "fas fa-exclamation-triangle",
            NotificationKind::Info => "fas fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub shown: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastAction {
    Push { id: u64, message: String, kind: NotificationKind },
    Show(u64),
    Hide(u64),
    Remove(u64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl ToastList {
    pub fn apply(&mut self, action: ToastAction) {
        match action {
            ToastAction::Push { id, message, kind } => {
                self.toasts.push(Toast { id, message, kind, shown: false });
            }
            ToastAction::Show(id) => self.set_shown(id, true),
            ToastAction::Hide(id) => self.set_shown(id, false),
            ToastAction::Remove(id) => self.toasts.retain(|t| t.id != id),
        }
    }

    fn set_shown(&mut self, id: u64, shown: bool) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.shown = shown;
        }
    }
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

struct Inner<S: Scheduler> {
    scheduler: S,
    sink: Box<dyn Fn(ToastAction)>,
    next_id: Cell<u64>,
    live: RefCell<HashMap<u64, Vec<S::Handle>>>,
    leaving: RefCell<HashMap<u64, S::Handle>>,
}

/// Shows transient messages and owns their reveal/expiry timers.
pub struct Notifier<S: Scheduler = BrowserScheduler> {
    inner: Rc<Inner<S>>,
}

impl<S: Scheduler> Clone for Notifier<S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<S: Scheduler> PartialEq for Notifier<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: Scheduler + 'static> Notifier<S> {
    pub fn new(scheduler: S, sink: impl Fn(ToastAction) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                sink: Box::new(sink),
                next_id: Cell::new(0),
                live: RefCell::new(HashMap::new()),
                leaving: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.show_for(message, kind, DEFAULT_NOTIFICATION_MS)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Info)
    }

    pub fn show_for(&self, message: impl Into<String>, kind: NotificationKind, duration_ms: u32) -> u64 {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let message = message.into();
        debug!("Notification {} ({}): {}", id, kind.class(), message);
        (self.inner.sink)(ToastAction::Push { id, message, kind });

        let weak = Rc::downgrade(&self.inner);
        let reveal = self.inner.scheduler.after(
            REVEAL_DELAY_MS,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    (inner.sink)(ToastAction::Show(id));
                }
            }),
        );

        let weak = Rc::downgrade(&self.inner);
        let expire = self.inner.scheduler.after(
            duration_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Notifier { inner }.dismiss(id);
                }
            }),
        );

        self.inner.live.borrow_mut().insert(id, vec![reveal, expire]);
        id
    }

    /// Starts the fade-out. Dismissing an already dismissed toast does nothing.
    pub fn dismiss(&self, id: u64) {
        let timers = self.inner.live.borrow_mut().remove(&id);
        let Some(timers) = timers else {
            return;
        };
        drop(timers);
        (self.inner.sink)(ToastAction::Hide(id));

        let weak = Rc::downgrade(&self.inner);
        let removal = self.inner.scheduler.after(
            REMOVE_DELAY_MS,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let finished = inner.leaving.borrow_mut().remove(&id);
                    drop(finished);
                    (inner.sink)(ToastAction::Remove(id));
                }
            }),
        );
        self.inner.leaving.borrow_mut().insert(id, removal);
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let notifier = {
        let dispatcher = toasts.dispatcher();
        use_state(move || Notifier::new(BrowserScheduler, move |action| dispatcher.dispatch(action)))
    };

    html! {
        <ContextProvider<Notifier> context={(*notifier).clone()}>
            { for props.children.iter() }
            <div class="notification-stack">
                { for toasts.toasts.iter().map(|toast| {
                    let on_close = {
                        let notifier = (*notifier).clone();
                        let id = toast.id;
                        Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            notifier.dismiss(id);
                        })
                    };
                    let class = if toast.shown {
                        format!("notification {} show", toast.kind.class())
                    } else {
                        format!("notification {}", toast.kind.class())
                    };
                    html! {
                        <div key={toast.id} class={class}>
                            <i class={format!("notification-icon {}", toast.kind.icon())}></i>
                            <span>{ &toast.message }</span>
                            <button class="notification-close" aria-label="Close notification" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                }) }
            </div>
        </ContextProvider<Notifier>>
    }
}

/// The notifier of the closest `NotificationProvider`. Outside one,
/// messages are only logged.
#[hook]
pub fn use_notifier() -> Notifier {
    let fallback = use_memo(
        |_| Notifier::new(BrowserScheduler, |_| debug!("Dropped a notification outside NotificationProvider")),
        (),
    );
    use_context::<Notifier>().unwrap_or_else(|| (*fallback).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;

    fn harness() -> (Notifier<ManualScheduler>, ManualScheduler, Rc<RefCell<ToastList>>) {
        let scheduler = ManualScheduler::new();
        let list = Rc::new(RefCell::new(ToastList::default()));
        let sink = list.clone();
        let notifier = Notifier::new(scheduler.clone(), move |action| sink.borrow_mut().apply(action));
        (notifier, scheduler, list)
    }

    #[test]
    fn unknown_kind_falls_back_to_info() {
        assert_eq!(NotificationKind::parse("bogus"), NotificationKind::Info);
        assert_eq!(NotificationKind::parse("warning").icon(), "fas fa-exclamation-triangle");
        assert_eq!(NotificationKind::Success.icon(), "fas fa-check-circle");
    }

    #[test]
    fn toast_reveals_then_expires() {
        let (notifier, scheduler, list) = harness();
        let id = notifier.success("Saved");

        assert_eq!(list.borrow().toasts.len(), 1);
        assert!(!list.borrow().toasts[0].shown);

        scheduler.advance(100);
        assert!(list.borrow().toasts[0].shown);

        scheduler.advance(4900);
        assert_eq!(list.borrow().toasts[0].id, id);
        assert!(!list.borrow().toasts[0].shown);

        scheduler.advance(300);
        assert!(list.borrow().toasts.is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn manual_close_cancels_auto_dismiss() {
        let (notifier, scheduler, list) = harness();
        let id = notifier.show_for("Hello", NotificationKind::Info, 2000);
        scheduler.advance(500);

        notifier.dismiss(id);
        notifier.dismiss(id);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(300);
        assert!(list.borrow().toasts.is_empty());
        scheduler.advance(10_000);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn toasts_are_independent() {
        let (notifier, scheduler, list) = harness();
        notifier.show_for("first", NotificationKind::Info, 1000);
        scheduler.advance(500);
        notifier.show_for("second", NotificationKind::Error, 1000);

        scheduler.advance(800);
        let messages: Vec<String> = list.borrow().toasts.iter().map(|t| t.message.clone()).collect();
        assert_eq!(messages, vec!["second".to_string()]);
    }
}
