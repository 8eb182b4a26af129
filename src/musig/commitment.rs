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

//! The three per-party messages of the cosigning protocol: the nonce
//! precommitment broadcast in round one, the nonce commitment revealed
//! in round two and the signature share sent in round three.

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use subtle::{Choice, ConstantTimeEq};

use crate::errors::SchnorrError;
use crate::tools::TranscriptProtocol;

/// A hash binding a cosigner to its nonce commitment before the
/// commitment itself is revealed. Broadcasting these first prevents
/// any party from choosing its nonce as a function of the others'.
#[derive(Copy, Clone, Debug)]
pub struct NoncePrecommitment(pub(crate) [u8; 32]);

/// A cosigner's nonce commitment `R_i = r_i * G`.
#[derive(Copy, Clone, Debug)]
pub struct NonceCommitment(pub(crate) RistrettoPoint);

impl NonceCommitment {
    pub(crate) const DESCRIPTION: &'static str =
        "A nonce commitment as a 32-byte compressed Ristretto point";

    pub(crate) fn new(commitment: RistrettoPoint) -> Self {
        NonceCommitment(commitment)
    }

    /// Make H(R_i). Both the committing party and every verifier of the
    /// precommitment derive it through this same transcript, so the
    /// opening check in round two is exact.
    pub fn precommit(&self) -> NoncePrecommitment {
        let mut h = Transcript::new(b"MuSig.nonce-precommit");
        h.commit_point(b"R", &self.0.compress());
        let mut precommitment = [0u8; 32];
        h.challenge_bytes(b"precommitment", &mut precommitment);
        NoncePrecommitment(precommitment)
    }

    /// The compressed form of `R_i`.
    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    #[allow(non_snake_case)]
    pub(crate) fn sum(commitments: &[Self]) -> RistrettoPoint {
        commitments.iter().map(|R_i| R_i.0).sum()
    }

    /// Convert this nonce commitment to its 32-byte wire form.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Parse a nonce commitment from its wire form, rejecting anything
    /// that is not a canonical compressed Ristretto point.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<NonceCommitment, SchnorrError> {
        if bytes.len() != 32 {
            return Err(SchnorrError::BytesLengthError {
                name: "NonceCommitment",
                length: 32,
            });
        }
        let mut compressed = CompressedRistretto([0u8; 32]);
        compressed.0.copy_from_slice(bytes);

        compressed
            .decompress()
            .map(NonceCommitment)
            .ok_or(SchnorrError::InvalidPoint)
    }
}

serde_boilerplate!(NonceCommitment);

impl ConstantTimeEq for NoncePrecommitment {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl NoncePrecommitment {
    pub(crate) const DESCRIPTION: &'static str = "A 32-byte nonce precommitment hash";

    /// Convert this precommitment to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a precommitment from a byte array.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<NoncePrecommitment, SchnorrError> {
        if bytes.len() != 32 {
            return Err(SchnorrError::BytesLengthError {
                name: "NoncePrecommitment",
                length: 32,
            });
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(bytes);
        Ok(NoncePrecommitment(hash))
    }
}

serde_boilerplate!(NoncePrecommitment);

/// A cosigner's signature share `s_i = r_i + c * a_i * x_i`.
///
/// The sum of all shares in a session is the `s` half of the final
/// signature.
#[derive(Copy, Clone, Debug)]
pub struct Share(pub(crate) Scalar);

impl Share {
    pub(crate) const DESCRIPTION: &'static str = "A signature share as a 32-byte canonical scalar";

    /// Convert this share to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Parse a share from bytes, rejecting non-canonical scalars.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Share, SchnorrError> {
        if bytes.len() != 32 {
            return Err(SchnorrError::BytesLengthError {
                name: "Share",
                length: 32,
            });
        }
        let mut bits = [0u8; 32];
        bits.copy_from_slice(bytes);

        Scalar::from_canonical_bytes(bits)
            .map(Share)
            .ok_or(SchnorrError::InvalidScalar)
    }
}

serde_boilerplate!(Share);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn precommitment_matches_commitment() {
        use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;

        let commitment = NonceCommitment::new(RISTRETTO_BASEPOINT_POINT);
        let precommitment = commitment.precommit();

        // Recomputing from the revealed commitment gives the same hash.
        assert_eq!(
            precommitment.ct_eq(&commitment.precommit()).unwrap_u8(),
            1u8
        );

        // A different commitment hashes differently.
        let other = NonceCommitment::new(RISTRETTO_BASEPOINT_POINT + RISTRETTO_BASEPOINT_POINT);
        assert_eq!(precommitment.ct_eq(&other.precommit()).unwrap_u8(), 0u8);
    }

    #[test]
    fn nonce_commitment_rejects_bad_encodings() {
        assert_eq!(
            NonceCommitment::from_bytes(&[0xffu8; 32]).err(),
            Some(SchnorrError::InvalidPoint)
        );
        assert!(NonceCommitment::from_bytes(&[0u8; 31]).is_err());
    }
}
