//! Pure Yew view components for the upload screen.
//!
//! These render from props only; all state lives in the `use_upload_screen`
//! hook.

use crate::utils::{format_file_size, format_kernel, format_triple};
use spectrum_analyzer::{AnalysisConstants, ConstantsState};
use yew::prelude::*;

/// Renders one labelled row of the constants table.
fn constants_row(label: &str, value: String) -> Html {
    html! {
        <tr>
            <th scope="row">{ label }</th>
            <td>{ value }</td>
        </tr>
    }
}

/// Renders the fetched analysis constants as a two-column table.
pub fn render_constants(constants: &AnalysisConstants) -> Html {
    html! {
        <table class="constants-table">
            <tbody>
                { constants_row("Lower green", format_triple(&constants.lower_green)) }
                { constants_row("Upper green", format_triple(&constants.upper_green)) }
                { constants_row("Lower wave color", format_triple(&constants.lower_wave_color)) }
                { constants_row("Upper wave color", format_triple(&constants.upper_wave_color)) }
                { constants_row("Kernel size", format_kernel(&constants.kernel_size)) }
                { constants_row("Dilate iterations", constants.dilate_iterations.to_string()) }
                { constants_row("Erode iterations", constants.erode_iterations.to_string()) }
                { constants_row("Video path", constants.video_path.clone()) }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConstantsPanelProps {
    pub constants: ConstantsState,
}

/// Shows the constants once loaded. Fetch failures surface in the status line.
#[function_component(ConstantsPanel)]
pub fn constants_panel(props: &ConstantsPanelProps) -> Html {
    let body = match &props.constants {
        ConstantsState::Loading => html! {
            <p class="constants-loading">{ "Loading constants..." }</p>
        },
        ConstantsState::Loaded(constants) => render_constants(constants),
        ConstantsState::Absent | ConstantsState::Failed(_) => return html! {},
    };

    html! {
        <section class="constants-panel">
            <h2>{ "Analysis Constants" }</h2>
            { body }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub message: AttrValue,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    if props.message.is_empty() {
        return html! {};
    }
    html! {
        <p class="status-message" role="status">{ props.message.clone() }</p>
    }
}

/// Name and size of the currently selected file.
#[derive(Properties, PartialEq)]
pub struct SelectedFileProps {
    pub name: AttrValue,
    pub size: u64,
}

#[function_component(SelectedFileInfo)]
pub fn selected_file_info(props: &SelectedFileProps) -> Html {
    html! {
        <div class="selected-file">
            <span class="file-name">{ props.name.clone() }</span>
            <span class="file-size">{ format!(" ({})", format_file_size(props.size)) }</span>
        </div>
    }
}
