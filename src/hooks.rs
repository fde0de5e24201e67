//! Hooks owning the upload screen's state and side effects.

use crate::config::AppConfig;
use log::{info, warn};
use spectrum_analyzer::{api, logging, PickedFile, ScreenState, UploadAction};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callbacks backing the upload screen.
#[derive(Clone)]
pub struct UploadScreenHandle {
    pub state: UseReducerHandle<ScreenState>,
    /// `onchange` of the file input.
    pub on_file_change: Callback<Event>,
    pub on_upload: Callback<MouseEvent>,
    pub on_run: Callback<MouseEvent>,
}

/// Custom hook owning the upload screen's state.
///
/// Fetches the analysis constants once when the calling component mounts.
#[hook]
pub fn use_upload_screen(config: AppConfig) -> UploadScreenHandle {
    let state = use_reducer(ScreenState::default);

    // Fetch constants on mount
    {
        let state = state.clone();
        let base_url = config.api_base_url.clone();
        use_effect_with((), move |_| {
            state.dispatch(UploadAction::ConstantsRequested);
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_constants(&base_url).await {
                    Ok(constants) => state.dispatch(UploadAction::ConstantsLoaded(constants)),
                    Err(e) => {
                        warn!("Fetching constants failed: {}", e);
                        state.dispatch(UploadAction::ConstantsFailed(e));
                    }
                }
            });
            || ()
        });
    }

    let on_file_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // Only the first file is used
            let file = input.files().and_then(|files| files.get(0));
            if let Some(ref f) = file {
                info!("Selected {} ({} bytes)", PickedFile::name(f), PickedFile::size(f));
            }
            state.dispatch(UploadAction::SelectFile(file));
        })
    };

    // Send the file the reducer accepted. Each accepted request bumps
    // `upload_seq` exactly once, so this runs once per upload.
    {
        let state = state.clone();
        let base_url = config.api_base_url.clone();
        use_effect_with(state.upload_seq, move |_| {
            if let Some(file) = state.upload_in_flight.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let file_name = file.name();
                    match api::upload_video(&base_url, &file).await {
                        Ok(message) => {
                            info!("Analysis of {} finished: {}", file_name, message);
                            state.dispatch(UploadAction::UploadFinished(message));
                        }
                        Err(error) => {
                            warn!("Analysis of {} failed: {}", file_name, error);
                            state.dispatch(UploadAction::UploadFailed { file_name, error });
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_upload = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            state.dispatch(UploadAction::RequestUpload);
        })
    };

    let on_run = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            logging::log_constants(state.constants());
        })
    };

    UploadScreenHandle {
        state,
        on_file_change,
        on_upload,
        on_run,
    }
}
