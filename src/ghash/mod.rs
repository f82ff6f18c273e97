/*!
 * GHASH accumulator
 *
 * GF(2^128) polynomial hash used as the authenticator in GCM. The field
 * arithmetic comes from the `ghash` crate; this module adds the streaming
 * interface the GCM engine drives: reset with associated data, fold data
 * in arbitrary slices, and take a length-closed digest.
 */

mod accumulator;

pub use accumulator::{GHashAccumulator, GHASH_DIGEST_SIZE, GHASH_KEY_SIZE};

#[cfg(test)]
mod tests;
