mod panel;
pub mod repository;
pub mod utils;

pub use panel::AsistenciaPanel;
