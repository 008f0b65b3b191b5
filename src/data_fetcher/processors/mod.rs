pub mod detail;
pub mod game_status;
pub mod normalize;
pub mod time_parsing;

pub use detail::{GameDetail, SideUpdate, parse_game_detail};
pub use game_status::determine_game_status;
pub use normalize::{normalize_event, normalize_score};
pub use time_parsing::parse_start_time;
