pub mod primitives;
pub mod purchase;
pub mod snapshot;
pub mod wallet;

pub use primitives::*;
pub use purchase::*;
pub use snapshot::*;
pub use wallet::*;
