//! SurrealDB repository implementations.

mod calendar;
mod event;
mod event_template;
mod user;

pub use calendar::SurrealCalendarRepository;
pub use event::SurrealEventRepository;
pub use event_template::SurrealEventTemplateRepository;
pub use user::SurrealUserRepository;
