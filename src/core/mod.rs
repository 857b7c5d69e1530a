pub mod catalog_item;
pub mod event;
pub mod player_poll;
pub mod search_response;

pub use catalog_item::{CatalogItemDetail, CatalogSearchHit, EXPANSION_TYPE};
pub use event::{Event, EventDay, EventVote, TimeSlot, UserNames};
pub use player_poll::PlayerCountPoll;
pub use search_response::SearchResponse;
