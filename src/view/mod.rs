//! Display projection of sessions, levels and chambers

pub mod markup;
pub mod render;
pub mod text;

pub use markup::{KeywordHighlighter, PlainText, TextMarkup};
pub use render::{
    render_chamber, render_level, render_session, BuffView, ChamberView, LevelButton, LevelView,
    OpponentCard, RewardView, SectorView, SessionView, WaveView,
};
