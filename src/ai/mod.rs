pub mod dispatcher;
pub mod model;
pub mod prompt;

pub use dispatcher::{Dispatcher, Request};
pub use model::{BoxedModel, GenerativeModel, Part};
