mod config;
pub use config::{DEFAULT_ERROR_TTL_MS, ViewConfig};

mod board;
pub use board::{Board, Phase};

mod frame;
pub use frame::{Frame, Row};

mod render;
pub use render::{EMPTY_TEXT, LOADING_TEXT, Render, TextRenderer, frame_lines};

mod controller;
pub use controller::{Action, Controller};
