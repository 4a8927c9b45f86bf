pub mod cards;
pub mod decision;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod replayer;
pub mod sequencer;
pub mod session;
pub mod source;
pub mod stats;
pub mod store;
pub mod view;
pub mod web;

pub use decision::Verdict;
pub use history::HandHistory;
pub use replayer::{Replayer, ReplayerConfig};
pub use session::{SessionConfig, SessionController};
