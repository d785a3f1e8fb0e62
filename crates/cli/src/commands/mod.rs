pub mod buy;
pub mod quote;
pub mod status;
pub mod watch;
