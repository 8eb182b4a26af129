// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The Extra Sauce
//! Defines a `TranscriptProtocol` trait for using a Merlin transcript.
//! ristretto point tooling
//!
//! We provide a `RistrettoBoth` type that contains both an uncompressed
//! `RistrettoPoint` along side its matching `CompressedRistretto`,
//! which helps several protocols avoid duplicate ristretto compressions
//! and/or decompressions.

use core::fmt::Debug;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use merlin::{Transcript, TranscriptRng};

use crate::errors::SchnorrError;

//
// Public Coin Abstraction
//

/// Extension trait to the Merlin transcript API that allows committing
/// scalars and points and generating challenges as scalars.
pub trait TranscriptProtocol {
    /// Commit a `scalar` with the given `label`.
    fn commit_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Commit a `point` with the given `label`.
    fn commit_point(&mut self, label: &'static [u8], point: &CompressedRistretto);

    /// Compute a `label`ed challenge variable.
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;

    /// Fork the transcript into an RNG keyed with the given `witness`
    /// bytes and fresh entropy from the operating system. The witness
    /// never enters the main transcript state.
    fn witness_rng(&self, label: &'static [u8], witness: &[u8]) -> TranscriptRng;
}

impl TranscriptProtocol for Transcript {
    fn commit_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, scalar.as_bytes());
    }

    fn commit_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.append_message(label, point.as_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);

        Scalar::from_bytes_mod_order_wide(&buf)
    }

    fn witness_rng(&self, label: &'static [u8], witness: &[u8]) -> TranscriptRng {
        self.build_rng()
            .rekey_with_witness_bytes(label, witness)
            .finalize(&mut rand::thread_rng())
    }
}

/// A Signing Context provides an abstraction for the signature protocol
/// Merlin Transcript
#[derive(Clone)]
pub struct SigningContext(Transcript);

impl SigningContext {
    /// Initialize a signing context from a static byte string that
    /// identifies the signature's role in the larger protocol.
    pub fn new(context: &'static [u8]) -> SigningContext {
        SigningContext(Transcript::new(context))
    }

    /// Initalize an owned signing transcript on a message provided as a byte array
    pub fn bytes(&self, bytes: &[u8]) -> Transcript {
        let mut t = self.0.clone();
        t.append_message(b"sign-bytes", bytes);
        t
    }
}

//
// Ristretto Helper Abstraction
//

/// Compressed Ristretto point length
pub const RISTRETTO_POINT_LENGTH: usize = 32;

/// A `RistrettoBoth` contains both an uncompressed `RistrettoPoint`
/// as well as the corresponding `CompressedRistretto`.  It provides
/// a convenient middle ground for protocols that both hash compressed
/// points to derive scalars for use with uncompressed points.
#[derive(Copy, Clone, Eq)] // PartialEq optimized below
pub struct RistrettoBoth {
    compressed: CompressedRistretto,
    point: RistrettoPoint,
}

impl Debug for RistrettoBoth {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "RistrettoPoint( {:?} )", self.compressed)
    }
}

impl RistrettoBoth {
    /// Access the compressed Ristretto form
    pub fn as_compressed(&self) -> &CompressedRistretto {
        &self.compressed
    }

    /// Extract the compressed Ristretto form
    pub fn into_compressed(self) -> CompressedRistretto {
        self.compressed
    }

    /// Access the point form
    pub fn as_point(&self) -> &RistrettoPoint {
        &self.point
    }

    /// Extract the point form
    pub fn into_point(self) -> RistrettoPoint {
        self.point
    }

    /// Decompress into the `RistrettoBoth` format that also retains the
    /// compressed form.
    pub fn from_compressed(compressed: CompressedRistretto) -> Result<RistrettoBoth, SchnorrError> {
        Ok(RistrettoBoth {
            point: compressed.decompress().ok_or(SchnorrError::InvalidPoint)?,
            compressed,
        })
    }

    /// Compress into the `RistrettoBoth` format that also retains the
    /// uncompressed form.
    pub fn from_point(point: RistrettoPoint) -> RistrettoBoth {
        RistrettoBoth {
            compressed: point.compress(),
            point,
        }
    }

    /// Convert this point to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; RISTRETTO_POINT_LENGTH] {
        self.compressed.to_bytes()
    }

    /// View this point as a byte array.
    #[inline]
    pub fn as_bytes<'a>(&'a self) -> &'a [u8; RISTRETTO_POINT_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Construct a `RistrettoBoth` from a slice of bytes, rejecting
    /// any encoding that is not a canonical compressed Ristretto point.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<RistrettoBoth, SchnorrError> {
        RistrettoBoth::from_bytes_ser("RistrettoBoth", bytes)
    }

    /// Variant of `RistrettoBoth::from_bytes` that propogates more informative errors.
    #[inline]
    pub fn from_bytes_ser(name: &'static str, bytes: &[u8]) -> Result<RistrettoBoth, SchnorrError> {
        if bytes.len() != RISTRETTO_POINT_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name,
                length: RISTRETTO_POINT_LENGTH,
            });
        }

        let mut compressed = CompressedRistretto([0u8; RISTRETTO_POINT_LENGTH]);
        compressed.0.copy_from_slice(&bytes[..32]);
        RistrettoBoth::from_compressed(compressed)
    }
}

/// We hide fields largely so that only compairing the compressed forms works.
impl PartialEq<Self> for RistrettoBoth {
    fn eq(&self, other: &Self) -> bool {
        let r = self.compressed.eq(&other.compressed);
        debug_assert_eq!(r, self.point.eq(&other.point));
        r
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn challenge_scalars_are_deterministic() {
        let mut a = Transcript::new(b"test");
        let mut b = Transcript::new(b"test");
        a.append_message(b"m", b"hello");
        b.append_message(b"m", b"hello");

        assert_eq!(a.challenge_scalar(b"c"), b.challenge_scalar(b"c"));
        // Squeezing advances the transcript state.
        assert_ne!(a.challenge_scalar(b"c"), b.challenge_scalar(b"x"));
    }

    #[test]
    fn witness_rngs_never_collide() {
        let t = Transcript::new(b"test");
        let mut rng_a = t.witness_rng(b"x", &[42u8; 32]);
        let mut rng_b = t.witness_rng(b"x", &[42u8; 32]);

        // Same transcript, same witness: still distinct because the RNG
        // mixes in system entropy.
        assert_ne!(Scalar::random(&mut rng_a), Scalar::random(&mut rng_b));
    }
}
