/*!
 * Side-channel hardening helpers
 */

pub mod constant_time;

pub use constant_time::{ct_tag_eq, ComparisonProbe, StepCounter};
