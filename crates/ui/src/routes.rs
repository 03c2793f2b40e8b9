use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::WorksheetView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", WorksheetView)] Worksheet {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        header { class: "app-header",
            h1 { class: "app-title", "V-Desk" }
            p { class: "app-subtitle",
                "V-Desk is a web application that allows users to practice by solving tasks"
            }
        }
    }
}
