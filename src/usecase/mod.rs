//! ユースケース層

pub mod board;
pub mod worklog;

pub use board::{BoardFilter, BoardView, FilterOptions};
pub use worklog::{Notice, WorkLogUseCase};
