pub mod concurrent;
pub mod logging;
