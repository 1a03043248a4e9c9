pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod path_state;
pub mod render;
pub mod sitemap;
pub mod state;
pub mod status;
pub mod svg;
pub mod ui;

pub use app::router;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use models::{DateRange, ProgressData};
pub use path_state::{calculate_progress, parse_date, progress_bar_data};
pub use render::{render_progress_bar, render_progress_bar_for_image};
pub use state::AppState;
pub use svg::{progress_bar_svg, render_progress_bar_svg};
