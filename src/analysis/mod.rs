// Analysis core — pure, synchronous computation over in-memory revisions.
//
// Everything here is deterministic and network-free: the same revision list
// always produces the same summary.

pub mod aggregate;
pub mod classify;
pub mod delta;
pub mod neutrality;
pub mod page;
pub mod phrases;
pub mod report;
pub mod revision;
