//! # human-uom
//!
//! human-uom holds two small "units of measure" helpers that a
//! container toolkit needs when talking to people:
//!
//! * [`duration`] turns an elapsed time into a coarse phrase such as
//!   `About an hour` or `3 weeks`.
//! * [`ulimit`] parses `--ulimit` style arguments (`nofile=1024:2048`)
//!   and converts them into the numeric form that `setrlimit(2)`
//!   wants.
//!
//! ## Example
//!
//! ```
//! use human_uom::duration::{human_duration, Duration};
//! use human_uom::ulimit::parse_ulimit;
//!
//! assert_eq!(human_duration(Duration::from_mins(35)), "35 minutes");
//!
//! let limit = parse_ulimit("nofile=512:1024").unwrap();
//! assert_eq!(limit.to_string(), "nofile=512:1024");
//! assert_eq!(limit.to_resource_limit().unwrap().kind, 7);
//! ```
//!
//! Enabling the `serde` feature derives `Serialize` and `Deserialize`
//! for the public value types.

pub mod duration;
pub mod ulimit;
