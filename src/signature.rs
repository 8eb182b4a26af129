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

//! A Rust implementation of Schnorr signing

use std::fmt::Debug;

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use subtle::ConstantTimeEq;

use crate::errors::SchnorrError;
use crate::keys::{Keypair, PublicKey, SecretKey};
use crate::tools::TranscriptProtocol;

/// The length of a curve25519 Schnorr `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An Schnorr signature.
///
/// These signatures are "detached", they do **not** include a copy
/// of the message which has been signed.
///
/// A signature assembled by any number of cosigners through the MuSig
/// protocol has exactly this shape and verifies against the aggregated
/// key, so the verifier never learns the number of signers.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is the nonce commitment `r * G` (or the sum of the cosigners'
    /// nonce commitments), in compressed form.
    pub(crate) R: CompressedRistretto,

    /// `s = r + c * x`, where `c` is the transcript challenge binding
    /// the public key, `R` and the message.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    pub(crate) const DESCRIPTION: &'static str = "A 64 byte Ristretto Schnorr signature";

    /// Convert this `Signature` to a byte array, `R` then `s`.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s.as_bytes()[..]);
        signature_bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// The scalar half must be a canonical encoding below the group
    /// order; anything else fails with `InvalidScalar`.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SchnorrError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SchnorrError::BytesLengthError {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            });
        }
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let s = Scalar::from_canonical_bytes(upper).ok_or(SchnorrError::InvalidScalar)?;

        Ok(Signature {
            R: CompressedRistretto(lower),
            s,
        })
    }
}

serde_boilerplate!(Signature);

// === Implement signing and verification operations on key types === //

impl SecretKey {
    /// Sign a transcript with this `SecretKey`.
    ///
    /// Requires a transcript into which the message has already been
    /// fed, normally created from a `SigningContext`, as well as the
    /// public key corresponding to `self`.
    ///
    /// The nonce is drawn from a transcript fork keyed with the secret
    /// scalar and fresh system entropy, so it never repeats for
    /// distinct messages even if the system RNG misbehaves, and never
    /// repeats for the same message while the RNG is honest.
    #[allow(non_snake_case)]
    pub fn sign(&self, mut transcript: Transcript, public_key: &PublicKey) -> Signature {
        // Generate ephemeral keypair (r, R). r is a random nonce.
        let mut rng = transcript.witness_rng(b"x", self.as_bytes());
        let r: Scalar = Scalar::random(&mut rng);

        // R = r * G, commitment to the nonce
        let R: CompressedRistretto = (&r * &RISTRETTO_BASEPOINT_TABLE).compress();

        // Make c = H(X, R, m). The message `m` has already been fed
        // into the transcript.
        transcript.commit_point(b"X", public_key.as_compressed());
        transcript.commit_point(b"R", &R);
        let c = transcript.challenge_scalar(b"c");

        // s = r + cx
        let s = r + c * self.as_scalar();

        Signature { R, s }
    }

    /// Sign a message with this `SecretKey` under a context label.
    pub fn sign_simple(&self, ctx: &'static [u8], msg: &[u8], public_key: &PublicKey) -> Signature {
        let mut t = Transcript::new(ctx);
        t.append_message(b"sign-bytes", msg);
        self.sign(t, public_key)
    }
}

impl PublicKey {
    /// Verify a signature on a transcript with this public key.
    ///
    /// The transcript must have been built exactly as the signing
    /// transcript, message included. Works identically for single-key
    /// signatures and for MuSig aggregated signatures verified against
    /// the aggregated key.
    #[allow(non_snake_case)]
    pub fn verify(
        &self,
        mut transcript: Transcript,
        signature: &Signature,
    ) -> Result<(), SchnorrError> {
        // Make c = H(X, R, m)
        // The message `m` has already been fed into the transcript
        transcript.commit_point(b"X", self.as_compressed());
        transcript.commit_point(b"R", &signature.R);
        let c: Scalar = transcript.challenge_scalar(b"c");

        // Validate the final linear combination, `s * G = R + c * X`,
        // by recomputing R and comparing encodings without branching
        // on intermediate values.
        let A: &RistrettoPoint = self.as_point();
        let R: RistrettoPoint = &signature.s * &RISTRETTO_BASEPOINT_TABLE - c * A;

        let valid = R.compress().as_bytes().ct_eq(signature.R.as_bytes());
        if valid.unwrap_u8() == 0 {
            return Err(SchnorrError::BadSignature);
        }

        Ok(())
    }

    /// Verify a signature by this public key on a message.
    pub fn verify_simple(
        &self,
        ctx: &'static [u8],
        msg: &[u8],
        signature: &Signature,
    ) -> Result<(), SchnorrError> {
        let mut t = Transcript::new(ctx);
        t.append_message(b"sign-bytes", msg);
        self.verify(t, signature)
    }
}

impl Keypair {
    /// Sign a transcript with this keypair's secret key.
    ///
    /// Requires a transcript with the message already absorbed,
    /// normally created from a `SigningContext`:
    ///
    /// ```
    /// use musig::{Keypair, SigningContext};
    ///
    /// let keypair = Keypair::generate(&mut rand::thread_rng());
    /// let ctx = SigningContext::new(b"my signing context");
    ///
    /// let sig = keypair.sign(ctx.bytes(b"all i want is to pet all of the dogs"));
    ///
    /// assert!(keypair.verify(ctx.bytes(b"all i want is to pet all of the dogs"), &sig).is_ok());
    /// ```
    ///
    /// We require a context string for all signatures so that a
    /// signature created for one role in a protocol can never be
    /// replayed in another.
    pub fn sign(&self, t: Transcript) -> Signature {
        self.secret.sign(t, &self.public)
    }

    /// Sign a message with this keypair's secret key.
    pub fn sign_simple(&self, ctx: &'static [u8], msg: &[u8]) -> Signature {
        self.secret.sign_simple(ctx, msg, &self.public)
    }

    /// Verify a signature by this keypair's public key on a transcript.
    pub fn verify(&self, t: Transcript, signature: &Signature) -> Result<(), SchnorrError> {
        self.public.verify(t, signature)
    }

    /// Verify a signature by this keypair's public key on a message.
    pub fn verify_simple(
        &self,
        ctx: &'static [u8],
        msg: &[u8],
        signature: &Signature,
    ) -> Result<(), SchnorrError> {
        self.public.verify_simple(ctx, msg, signature)
    }
}

#[cfg(test)]
mod test {
    use rand::prelude::*;
    use rand_chacha::ChaChaRng;

    use crate::{Keypair, PublicKey, SchnorrError, SecretKey, Signature, SigningContext};
    use curve25519_dalek::scalar::Scalar;

    #[test]
    fn sign_verify_single() {
        let mut csprng = ChaChaRng::from_seed([0u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let ctx = SigningContext::new(b"example transcript");

        let sig = keypair.sign(ctx.bytes(b"hello"));

        assert!(keypair.verify(ctx.bytes(b"hello"), &sig).is_ok());
        assert_eq!(
            keypair.verify(ctx.bytes(b"goodbye"), &sig),
            Err(SchnorrError::BadSignature)
        );
        assert_eq!(
            keypair.verify(SigningContext::new(b"other context").bytes(b"hello"), &sig),
            Err(SchnorrError::BadSignature)
        );
    }

    #[test]
    fn unit_privkey_vector() {
        // x = 1, message "hello": X is the basepoint itself.
        let secret = SecretKey::from_scalar(Scalar::one());
        let public = PublicKey::from_secret(&secret);
        let ctx = SigningContext::new(b"unit vector");

        let sig = secret.sign(ctx.bytes(b"hello"), &public);
        assert!(public.verify(ctx.bytes(b"hello"), &sig).is_ok());

        // Flipping the low bit of s must break the equation.
        let mut bytes = sig.to_bytes();
        bytes[32] ^= 1;
        let tampered = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(
            public.verify(ctx.bytes(b"hello"), &tampered),
            Err(SchnorrError::BadSignature)
        );
    }

    #[test]
    fn nonces_are_randomized() {
        let mut csprng = ChaChaRng::from_seed([7u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let ctx = SigningContext::new(b"nonce test");

        // Same key, same message, two runs: the nonce commitments differ
        // because system entropy is folded into the nonce derivation.
        let one = keypair.sign(ctx.bytes(b"repeat me"));
        let two = keypair.sign(ctx.bytes(b"repeat me"));

        assert_ne!(one.to_bytes()[..32], two.to_bytes()[..32]);
        assert!(keypair.verify(ctx.bytes(b"repeat me"), &one).is_ok());
        assert!(keypair.verify(ctx.bytes(b"repeat me"), &two).is_ok());
    }

    #[test]
    fn non_canonical_scalar_is_rejected() {
        let mut csprng = ChaChaRng::from_seed([9u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let ctx = SigningContext::new(b"canonicality");
        let sig = keypair.sign(ctx.bytes(b"msg"));

        // Replace s with the group order: a valid integer, but not a
        // canonical encoding.
        let mut bytes = sig.to_bytes();
        bytes[32..].copy_from_slice(&[
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
            0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
        ]);

        assert_eq!(
            Signature::from_bytes(&bytes),
            Err(SchnorrError::InvalidScalar)
        );
    }

    #[test]
    fn signature_byte_round_trip() {
        let mut csprng = ChaChaRng::from_seed([3u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let ctx = SigningContext::new(b"round trip");

        let sig = keypair.sign(ctx.bytes(b"some bytes"));
        let restored = Signature::from_bytes(&sig.to_bytes()).unwrap();

        assert_eq!(sig, restored);
    }
}
