pub mod command;
pub mod event;
pub mod indicator_query;
pub mod search_result;

pub use command::{Command, CommandKind};
pub use event::{Attribute, Event, MispObject};
pub use indicator_query::{
    IndicatorQuery, SearchConstraints, SearchScope, IP_ATTRIBUTE_TYPES, SEARCH_RESULT_LIMIT,
};
pub use search_result::{decode_events, SearchResult};
