//! Spectrum Analyzer front-end using Yew.
//! Resolves configuration, installs logging and mounts the upload screen.

use log::info;
use spectrum_analyzer::{logging, PickedFile};
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod utils;

use components::{ConstantsPanel, SelectedFileInfo, StatusLine};
use config::{AppConfig, LOG_LEVEL, VIDEO_ACCEPT};
use hooks::use_upload_screen;

/// The single screen: pick a video, upload it, inspect the constants.
#[function_component(UploadScreen)]
fn upload_screen() -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let screen = use_upload_screen(config);
    let state = &*screen.state;

    html! {
        <div class="container">
            <h1>{ "Spectrum Analyzer" }</h1>

            <div class="upload-controls">
                <label for="video_input">{ "Video:" }</label>
                <input type="file"
                    id="video_input"
                    accept={VIDEO_ACCEPT}
                    onchange={screen.on_file_change.clone()}
                />
                <button class="btn-primary"
                    disabled={state.is_uploading()}
                    onclick={screen.on_upload.clone()}
                >
                    { "Upload & Analyze" }
                </button>
                <button class="btn-secondary"
                    onclick={screen.on_run.clone()}
                >
                    { "Run with Constants" }
                </button>
            </div>

            if let Some(ref file) = state.selected_file {
                <SelectedFileInfo name={PickedFile::name(file)} size={PickedFile::size(file)} />
            }

            <StatusLine message={state.status_message.clone()} />

            <ConstantsPanel constants={state.constants.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

/// App wrapper providing the configuration to the screen.
#[function_component]
pub fn App(props: &AppProps) -> Html {
    html! {
        <ContextProvider<AppConfig> context={props.config.clone()}>
            <UploadScreen />
        </ContextProvider<AppConfig>>
    }
}

/// Entry point: installs console hooks and renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(LOG_LEVEL);

    let config = AppConfig::from_document();
    info!("Using analysis server at {}", config.api_base_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
