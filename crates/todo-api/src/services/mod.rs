//! 비즈니스 로직 서비스.
//!
//! 각 서비스는 store trait 객체만 보관하는 무상태 값입니다.

pub mod comments;
pub mod managers;
pub mod todos;
pub mod users;
pub mod weather;

pub use comments::CommentService;
pub use managers::ManagerService;
pub use todos::{TodoService, MAX_PAGE_SIZE};
pub use users::UserService;
pub use weather::{FixedWeather, WeatherClient, WeatherProvider};
