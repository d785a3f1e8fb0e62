pub mod controller;
pub mod error;
pub mod events;
pub mod gateway;
pub mod types;
pub mod validation;
pub mod view;

pub use controller::*;
pub use error::*;
pub use events::*;
pub use gateway::*;
pub use types::*;
pub use validation::*;
pub use view::*;
