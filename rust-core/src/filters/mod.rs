//! Window functions, edge tapers and FIR filtering

pub mod windows;
pub mod design;
pub mod fast_fir;

pub use windows::{WindowType, TaperEdge, generate_window, kaiser_window, taper};
pub use design::{design_lowpass_fir, decimation_filter};
pub use fast_fir::FastFirFilter;
