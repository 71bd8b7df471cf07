// Author: Dustin Pilgrim
// License: MIT

pub mod schedule;
