//! Core state and data model for the Spectrum Analyzer upload screen.
//!
//! The screen is driven by [`UploadState`], a `yew` reducer that is generic
//! over the platform file handle so its transitions can be exercised without
//! a browser. Network access lives in [`api`], console output in [`logging`].

use log::debug;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

pub mod api;
pub mod logging;

use api::{ConstantsFetchError, UploadError};

/// User-visible status strings.
pub mod messages {
    pub const FETCH_CONSTANTS_FAILED: &str = "Error fetching constants!";
    pub const NO_FILE_SELECTED: &str = "No file selected!";

    pub fn selected(name: &str) -> String {
        format!("Selected file: {}", name)
    }

    pub fn uploading(name: &str) -> String {
        format!("Uploading and analyzing {}...", name)
    }

    pub fn upload_failed(name: &str) -> String {
        format!("Error analyzing {}!", name)
    }
}

/// A lower or upper color bound as sent by the analysis server (HSV order).
pub type ColorTriple = [i32; 3];

/// Parameters the analysis server uses for masking and morphology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AnalysisConstants {
    pub lower_green: ColorTriple,
    pub upper_green: ColorTriple,
    pub lower_wave_color: ColorTriple,
    pub upper_wave_color: ColorTriple,
    pub kernel_size: KernelSize,
    pub dilate_iterations: u32,
    pub erode_iterations: u32,
    pub video_path: String,
}

/// Shape of the morphology kernel.
///
/// Deserializes from either a `[rows, cols]` pair or the full kernel matrix,
/// which is reduced to its shape. Always serializes as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[usize; 2]")]
pub struct KernelSize {
    pub rows: usize,
    pub cols: usize,
}

impl KernelSize {
    /// Derive the kernel shape from a matrix, rejecting empty or ragged input.
    pub fn from_matrix<T>(matrix: &[Vec<T>]) -> Result<Self, String> {
        let rows = matrix.len();
        let cols = matrix.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err("kernel matrix is empty".to_string());
        }
        if let Some(bad) = matrix.iter().position(|row| row.len() != cols) {
            return Err(format!(
                "kernel matrix is ragged: row {} has {} columns, expected {}",
                bad,
                matrix[bad].len(),
                cols
            ));
        }
        Ok(KernelSize { rows, cols })
    }
}

impl From<KernelSize> for [usize; 2] {
    fn from(k: KernelSize) -> Self {
        [k.rows, k.cols]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KernelRepr {
    Pair([usize; 2]),
    Matrix(Vec<Vec<f64>>),
}

impl<'de> Deserialize<'de> for KernelSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match KernelRepr::deserialize(deserializer)? {
            KernelRepr::Pair([rows, cols]) => Ok(KernelSize { rows, cols }),
            KernelRepr::Matrix(matrix) => KernelSize::from_matrix(&matrix).map_err(de::Error::custom),
        }
    }
}

/// A file handle picked by the user.
pub trait PickedFile: Clone + PartialEq + 'static {
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
}

impl PickedFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self).max(0.0) as u64
    }
}

/// Lifecycle of the constants fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConstantsState {
    #[default]
    Absent,
    Loading,
    Loaded(AnalysisConstants),
    Failed(ConstantsFetchError),
}

/// Everything the upload screen displays.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadState<F> {
    pub selected_file: Option<F>,
    pub status_message: String,
    pub constants: ConstantsState,
    /// File being sent to the analysis server, if any.
    pub upload_in_flight: Option<F>,
    /// Bumped each time an upload is accepted; the sender watches it.
    pub upload_seq: u32,
}

impl<F> Default for UploadState<F> {
    fn default() -> Self {
        UploadState {
            selected_file: None,
            status_message: String::new(),
            constants: ConstantsState::Absent,
            upload_in_flight: None,
            upload_seq: 0,
        }
    }
}

/// State used by the browser build.
pub type ScreenState = UploadState<web_sys::File>;

impl<F: PickedFile> UploadState<F> {
    /// The fetched constants, if the fetch succeeded.
    pub fn constants(&self) -> Option<&AnalysisConstants> {
        match &self.constants {
            ConstantsState::Loaded(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_loading_constants(&self) -> bool {
        self.constants == ConstantsState::Loading
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_in_flight.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadAction<F> {
    /// File input changed. `None` when the picker was cancelled.
    SelectFile(Option<F>),
    RequestUpload,
    ConstantsRequested,
    ConstantsLoaded(AnalysisConstants),
    ConstantsFailed(ConstantsFetchError),
    /// Server answered the upload with this message.
    UploadFinished(String),
    UploadFailed { file_name: String, error: UploadError },
}

impl<F: PickedFile> Reducible for UploadState<F> {
    type Action = UploadAction<F>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            UploadAction::SelectFile(None) => return self,
            UploadAction::SelectFile(Some(file)) => {
                next.status_message = messages::selected(&file.name());
                next.selected_file = Some(file);
            }
            UploadAction::RequestUpload => {
                if self.is_uploading() {
                    debug!("Upload already in flight, ignoring request");
                    return self;
                }
                match &self.selected_file {
                    None => next.status_message = messages::NO_FILE_SELECTED.to_string(),
                    Some(file) => {
                        next.status_message = messages::uploading(&file.name());
                        next.upload_in_flight = Some(file.clone());
                        next.upload_seq = self.upload_seq.wrapping_add(1);
                    }
                }
            }
            UploadAction::ConstantsRequested => {
                if self.constants != ConstantsState::Absent {
                    return self;
                }
                next.constants = ConstantsState::Loading;
            }
            UploadAction::ConstantsLoaded(constants) => {
                next.constants = ConstantsState::Loaded(constants);
            }
            UploadAction::ConstantsFailed(error) => {
                next.constants = ConstantsState::Failed(error);
                next.status_message = messages::FETCH_CONSTANTS_FAILED.to_string();
            }
            UploadAction::UploadFinished(message) => {
                next.upload_in_flight = None;
                next.status_message = message;
            }
            UploadAction::UploadFailed { file_name, .. } => {
                next.upload_in_flight = None;
                next.status_message = messages::upload_failed(&file_name);
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct MemFile {
        name: &'static str,
        bytes: Vec<u8>,
    }

    impl PickedFile for MemFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn size(&self) -> u64 {
            self.bytes.len() as u64
        }
    }

    fn clip() -> MemFile {
        MemFile { name: "clip.mp4", bytes: vec![0; 16] }
    }

    fn fresh() -> Rc<UploadState<MemFile>> {
        Rc::new(UploadState::default())
    }

    fn sample_constants() -> AnalysisConstants {
        serde_json::from_value(json!({
            "LOWER_GREEN": [33, 45, 45],
            "UPPER_GREEN": [92, 260, 260],
            "LOWER_WAVE_COLOR": [78, 145, 115],
            "UPPER_WAVE_COLOR": [102, 260, 260],
            "KERNEL_SIZE": [5, 5],
            "DILATE_ITERATIONS": 1,
            "ERODE_ITERATIONS": 1,
            "VIDEO_PATH": "CW Signal.mp4"
        }))
        .unwrap()
    }

    #[test]
    fn test_constants_decode_from_server_keys() {
        let c = sample_constants();
        assert_eq!(c.lower_green, [33, 45, 45]);
        assert_eq!(c.upper_wave_color, [102, 260, 260]);
        assert_eq!(c.kernel_size, KernelSize { rows: 5, cols: 5 });
        assert_eq!(c.video_path, "CW Signal.mp4");
    }

    #[test]
    fn test_kernel_size_from_matrix() {
        let c: AnalysisConstants = serde_json::from_value(json!({
            "LOWER_GREEN": [33, 45, 45],
            "UPPER_GREEN": [92, 260, 260],
            "LOWER_WAVE_COLOR": [78, 145, 115],
            "UPPER_WAVE_COLOR": [102, 260, 260],
            "KERNEL_SIZE": [[1, 1, 1], [1, 1, 1]],
            "DILATE_ITERATIONS": 2,
            "ERODE_ITERATIONS": 3,
            "VIDEO_PATH": "Pulsed Signal.mp4",
            "QUIT_KEY": "q"
        }))
        .unwrap();
        assert_eq!(c.kernel_size, KernelSize { rows: 2, cols: 3 });
        assert_eq!(c.erode_iterations, 3);
    }

    #[test]
    fn test_kernel_size_rejects_bad_matrix() {
        assert!(serde_json::from_value::<KernelSize>(json!([[1, 1], [1]])).is_err());
        assert!(serde_json::from_value::<KernelSize>(json!([])).is_err());
        assert!(serde_json::from_value::<KernelSize>(json!([[]])).is_err());
    }

    #[test]
    fn test_kernel_size_serializes_as_pair() {
        let k = KernelSize { rows: 5, cols: 3 };
        assert_eq!(serde_json::to_value(k).unwrap(), json!([5, 3]));
    }

    #[test]
    fn test_fetch_success_keeps_message() {
        let s = fresh()
            .reduce(UploadAction::ConstantsRequested)
            .reduce(UploadAction::ConstantsLoaded(sample_constants()));
        assert_eq!(s.constants(), Some(&sample_constants()));
        assert_eq!(s.status_message, "");
    }

    #[test]
    fn test_fetch_failure_sets_error_message() {
        let s = fresh()
            .reduce(UploadAction::ConstantsRequested)
            .reduce(UploadAction::ConstantsFailed(ConstantsFetchError::Network(
                "connection refused".into(),
            )));
        assert_eq!(s.status_message, "Error fetching constants!");
        assert!(s.constants().is_none());
    }

    #[test]
    fn test_constants_requested_only_from_absent() {
        let s = fresh().reduce(UploadAction::ConstantsRequested);
        assert!(s.is_loading_constants());
        let loaded = s.reduce(UploadAction::ConstantsLoaded(sample_constants()));
        let again = loaded.clone().reduce(UploadAction::ConstantsRequested);
        assert!(Rc::ptr_eq(&loaded, &again));
    }

    #[test]
    fn test_select_file() {
        let s = fresh().reduce(UploadAction::SelectFile(Some(clip())));
        assert_eq!(s.selected_file.as_ref().map(|f| f.name()), Some("clip.mp4".to_string()));
        assert_eq!(s.status_message, "Selected file: clip.mp4");
    }

    #[test]
    fn test_cancelled_selection_is_noop() {
        let before = fresh().reduce(UploadAction::SelectFile(Some(clip())));
        let after = before.clone().reduce(UploadAction::SelectFile(None));
        assert_eq!(*before, *after);

        let empty = fresh();
        assert_eq!(*empty.clone().reduce(UploadAction::SelectFile(None)), *empty);
    }

    #[test]
    fn test_select_same_file_twice_is_idempotent() {
        let once = fresh().reduce(UploadAction::SelectFile(Some(clip())));
        let twice = once.clone().reduce(UploadAction::SelectFile(Some(clip())));
        assert_eq!(*once, *twice);
    }

    #[test]
    fn test_upload_without_file() {
        let s = fresh().reduce(UploadAction::RequestUpload);
        assert_eq!(s.status_message, "No file selected!");
        assert!(!s.is_uploading());
        assert_eq!(s.upload_seq, 0);
    }

    #[test]
    fn test_upload_with_file() {
        let s = fresh()
            .reduce(UploadAction::SelectFile(Some(clip())))
            .reduce(UploadAction::RequestUpload);
        assert_eq!(s.status_message, "Uploading and analyzing clip.mp4...");
        assert_eq!(s.upload_in_flight, Some(clip()));
        assert_eq!(s.upload_seq, 1);
    }

    #[test]
    fn test_second_upload_ignored_while_in_flight() {
        let s = fresh()
            .reduce(UploadAction::SelectFile(Some(clip())))
            .reduce(UploadAction::RequestUpload);
        let again = s.clone().reduce(UploadAction::RequestUpload);
        assert!(Rc::ptr_eq(&s, &again));
        assert_eq!(again.upload_seq, 1);
    }

    #[test]
    fn test_new_selection_does_not_change_file_in_flight() {
        let other = MemFile { name: "other.mp4", bytes: vec![1; 4] };
        let s = fresh()
            .reduce(UploadAction::SelectFile(Some(clip())))
            .reduce(UploadAction::RequestUpload)
            .reduce(UploadAction::SelectFile(Some(other.clone())));
        assert_eq!(s.selected_file, Some(other));
        assert_eq!(s.upload_in_flight, Some(clip()));
        assert_eq!(s.upload_seq, 1);
    }

    #[test]
    fn test_upload_again_after_finish() {
        let s = fresh()
            .reduce(UploadAction::SelectFile(Some(clip())))
            .reduce(UploadAction::RequestUpload)
            .reduce(UploadAction::UploadFinished("done".into()))
            .reduce(UploadAction::RequestUpload);
        assert_eq!(s.upload_seq, 2);
        assert!(s.is_uploading());
    }

    #[test]
    fn test_upload_outcomes_clear_flag() {
        let in_flight = fresh()
            .reduce(UploadAction::SelectFile(Some(clip())))
            .reduce(UploadAction::RequestUpload);

        let ok = in_flight
            .clone()
            .reduce(UploadAction::UploadFinished("Video processed successfully!".into()));
        assert!(!ok.is_uploading());
        assert_eq!(ok.status_message, "Video processed successfully!");

        let failed = in_flight.reduce(UploadAction::UploadFailed {
            file_name: "clip.mp4".into(),
            error: UploadError::Status(500),
        });
        assert!(!failed.is_uploading());
        assert_eq!(failed.status_message, "Error analyzing clip.mp4!");
        assert_eq!(failed.selected_file, Some(clip()));
    }
}
