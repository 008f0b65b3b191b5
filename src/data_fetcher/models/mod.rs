pub mod feed;
pub mod game;

pub use feed::{
    FeedCompetition, FeedCompetitor, FeedEvent, FeedScore, FeedStatus, FeedStatusType, FeedTeam,
    ScheduleResponse, SummaryHeader, SummaryResponse,
};
pub use game::{Game, GameStatus, TeamSnapshot};
