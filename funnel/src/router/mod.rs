//! Route compilation and lookup.
//!
//! # Data Flow
//! ```text
//! Registration (builder phase):
//!     pattern string
//!     → path_pattern.rs (compile to segments, reject malformed patterns)
//!     → route_table.rs (store under method, reject duplicates)
//!
//! Dispatch:
//!     method + path
//!     → route_table.rs (scan the method's routes in registration order)
//!     → path_pattern.rs (align segments, bind params)
//!     → RouteMatch or no match
//! ```

mod path_pattern;
pub use path_pattern::{PathPattern, Segment};

mod route_table;
pub use route_table::{Route, RouteMatch, RouteTable};
