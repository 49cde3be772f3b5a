pub mod autoplay;
pub mod combo;
pub mod command;
pub mod config;
pub mod judge;
pub mod rhythm;
pub mod session;
pub mod state;
pub mod traits;
pub mod util;

#[cfg(test)]
mod test_utils;
