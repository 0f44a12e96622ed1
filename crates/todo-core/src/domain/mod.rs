//! 도메인 모델 및 영속성 추상화.

mod comment;
mod manager;
mod store;
mod todo;
mod user;

pub use comment::{Comment, NewComment};
pub use manager::{Manager, NewManager};
pub use store::{CommentStore, ManagerStore, TodoStore, UserStore};
pub use todo::{NewTodo, Todo, TodoPage};
pub use user::{NewUser, Role, User, UserSummary};
