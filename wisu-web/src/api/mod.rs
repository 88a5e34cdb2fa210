//! HTTP API handlers for wisu-web

pub mod analytics;
pub mod comments;
pub mod health;
pub mod ideas;
pub mod pairs;
pub mod profiles;
pub mod questions;
pub mod results;
pub mod stats;
pub mod ui;
pub mod visitors;
pub mod votes;

pub use analytics::analytics_routes;
pub use comments::comment_routes;
pub use health::health_routes;
pub use ideas::idea_routes;
pub use pairs::pair_routes;
pub use profiles::profile_routes;
pub use questions::question_routes;
pub use results::result_routes;
pub use stats::stats_routes;
pub use ui::ui_routes;
pub use visitors::visitor_routes;
pub use votes::vote_routes;
