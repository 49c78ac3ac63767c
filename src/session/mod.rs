/// Session-oriented rendering API.
pub mod card_session;
