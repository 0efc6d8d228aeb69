use yew::prelude::*;
use log::{info, Level};

mod config;
mod contact;
mod integrations;
mod scroll;
mod typing;
mod components {
    pub mod contact_form;
    pub mod typed_word;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[function_component]
fn App() -> Html {
    html! {
        <Landing />
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting landing page");
    yew::Renderer::<App>::new().render();
}
