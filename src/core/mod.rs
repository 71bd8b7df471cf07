// Author: Dustin Pilgrim
// License: MIT

pub mod error;
pub mod events;
pub mod folder;
pub mod idle;
pub mod info;
pub mod session;
pub mod store;
pub mod tracker;
pub mod tracker_msg;
pub mod utils;
