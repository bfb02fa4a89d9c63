pub mod events;
pub mod lineup;
pub mod player;
pub mod score;

pub use events::{Event, EventBase, TeamSide};
pub use lineup::{validate_matchup, ActiveFour, Line, Lineup};
pub use player::{effective_rating, Player, PlayerId, PlayerKind, Rating, FULL_ENERGY};
pub use score::{GameOutcome, Record, Score};
