//! Toast Stack Component
//!
//! Fixed top-right stack of Bootstrap alerts mirroring the [`ToastQueue`].

use std::rc::Rc;

use ajax_controls::{Toast, ToastQueue};
use leptos::prelude::*;

/// Visible toasts with a close button each
///
/// # Arguments
/// * `toasts` - Current queue contents, oldest first
/// * `on_close` - Receives the id of a toast closed by hand
#[component]
pub fn ToastStack(toasts: ReadSignal<Vec<Toast>>, on_close: WriteSignal<Option<u32>>) -> impl IntoView {
    view! {
        <div
            class="toast-stack"
            style="position: fixed; top: 100px; right: 20px; z-index: 9999; min-width: 300px;"
        >
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("alert {} alert-dismissible fade show", toast.level.alert_class())
                            role="alert"
                        >
                            {toast.message}
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                on:click=move |_| on_close.set(Some(id))
                            ></button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Mount the stack on `<body>` and keep it in step with `queue`
pub fn mount_toasts(queue: Rc<ToastQueue>) {
    mount_to_body(move || {
        let (toasts, set_toasts) = signal(queue.snapshot());
        let (closing, set_closing) = signal(None::<u32>);
        queue.subscribe(move |current| set_toasts.set(current.to_vec()));

        // Close button -> queue; the queue's listener then redraws the stack
        Effect::new(move |_| {
            if let Some(id) = closing.get() {
                queue.dismiss(id);
            }
        });

        view! { <ToastStack toasts=toasts on_close=set_closing /> }
    });
}
