pub mod json_api;

pub use json_api::{
    simulate_game_json, simulate_series_json, ApiError, GameRequest, GameResponse,
    SeriesRequest, SCHEMA_VERSION,
};
