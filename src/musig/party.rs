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

//! The local signer's walk through the three rounds of the cosigning
//! protocol.
//!
//! Each round is a distinct type and every transition takes `self` by
//! value, so a party cannot replay a round or send a message out of
//! order; the borrow checker rejects such programs outright. Dropping
//! a state at any point aborts the session and wipes the secrets it
//! holds.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use subtle::ConstantTimeEq;

use crate::errors::SchnorrError;
use crate::keys::{Multikey, PublicKey, SecretKey};
use crate::musig::commitment::{NonceCommitment, NoncePrecommitment, Share};
use crate::musig::counterparty::{
    Counterparty, CounterpartyCommitted, CounterpartyPrecommitted,
};
use crate::signature::Signature;
use crate::tools::TranscriptProtocol;

/// Entry point to the multi-party signing protocol.
pub struct Party {}

/// A party that has broadcast its nonce precommitment and is waiting
/// for everyone else's.
#[allow(non_snake_case)]
pub struct PartyAwaitingPrecommitments {
    transcript: Transcript,
    multikey: Multikey,
    position: usize,
    X_i: PublicKey,
    x_i: SecretKey,
    r_i: SecretKey,
    R_i: NonceCommitment,
    counterparties: Vec<Counterparty>,
}

/// A party that has revealed its nonce commitment and is waiting for
/// the other cosigners' openings.
#[allow(non_snake_case)]
pub struct PartyAwaitingCommitments {
    transcript: Transcript,
    multikey: Multikey,
    X_i: PublicKey,
    x_i: SecretKey,
    r_i: SecretKey,
    counterparties: Vec<CounterpartyPrecommitted>,
}

/// A party that has sent its signature share and is waiting to
/// assemble the final signature.
#[allow(non_snake_case)]
pub struct PartyAwaitingShares {
    multikey: Multikey,
    challenge: Scalar,
    R: RistrettoPoint,
    counterparties: Vec<CounterpartyCommitted>,
}

impl Party {
    /// Create a new signing party for a given transcript.
    ///
    /// The message must already have been fed into `transcript`, and
    /// `pubkeys` must be the same ordered list (including this party's
    /// own public key) from which `multikey` was aggregated.
    #[allow(non_snake_case)]
    pub fn new(
        transcript: Transcript,
        privkey: SecretKey,
        multikey: Multikey,
        pubkeys: Vec<PublicKey>,
    ) -> Result<(PartyAwaitingPrecommitments, NoncePrecommitment), SchnorrError> {
        let X_i = PublicKey::from_secret(&privkey);
        let position = pubkeys
            .iter()
            .position(|X| X == &X_i)
            .ok_or(SchnorrError::BadArguments)?;

        // Generate ephemeral keypair (r_i, R_i). r_i is a random nonce.
        // The transcript fork is keyed with the private key and system
        // entropy, so a stuck RNG alone cannot repeat a nonce.
        let mut rng = transcript.witness_rng(b"x", privkey.as_bytes());
        let r_i = Scalar::random(&mut rng);

        // R_i = generator * r_i
        let R_i = NonceCommitment::new(&r_i * &RISTRETTO_BASEPOINT_TABLE);

        // Make H(R_i) to broadcast in round one.
        let precommitment = R_i.precommit();

        let counterparties = pubkeys
            .into_iter()
            .enumerate()
            .map(|(position, pubkey)| Counterparty::new(position, pubkey))
            .collect();

        Ok((
            PartyAwaitingPrecommitments {
                transcript,
                multikey,
                position,
                X_i,
                x_i: privkey,
                r_i: SecretKey::from_scalar(r_i),
                R_i,
                counterparties,
            },
            precommitment,
        ))
    }
}

impl PartyAwaitingPrecommitments {
    /// Round one is complete: store everyone's precommitment and reveal
    /// the local nonce commitment.
    ///
    /// The broadcast includes this party's own entry, which is checked
    /// against the locally computed precommitment; a mismatch means the
    /// batch was corrupted in transit or misordered.
    pub fn receive_precommitments(
        self,
        nonce_precommitments: Vec<NoncePrecommitment>,
    ) -> Result<(PartyAwaitingCommitments, NonceCommitment), SchnorrError> {
        if nonce_precommitments.len() != self.counterparties.len() {
            return Err(SchnorrError::Arity);
        }

        let own = self.R_i.precommit();
        let echoed = nonce_precommitments[self.position].ct_eq(&own);
        if echoed.unwrap_u8() == 0 {
            return Err(SchnorrError::ShareError {
                index: self.position,
            });
        }

        // Store the precommitments.
        let counterparties = self
            .counterparties
            .into_iter()
            .zip(nonce_precommitments)
            .map(|(counterparty, precommitment)| counterparty.precommit_nonce(precommitment))
            .collect();

        Ok((
            PartyAwaitingCommitments {
                transcript: self.transcript,
                multikey: self.multikey,
                X_i: self.X_i,
                x_i: self.x_i,
                r_i: self.r_i,
                counterparties,
            },
            self.R_i,
        ))
    }
}

impl PartyAwaitingCommitments {
    /// Round two is complete: check every opening against its
    /// precommitment, derive the challenge and produce this party's
    /// signature share.
    #[allow(non_snake_case)]
    pub fn receive_commitments(
        mut self,
        nonce_commitments: Vec<NonceCommitment>,
    ) -> Result<(PartyAwaitingShares, Share), SchnorrError> {
        if nonce_commitments.len() != self.counterparties.len() {
            return Err(SchnorrError::Arity);
        }

        // Check stored precommitments against received commitments.
        // Any equivocating cosigner is identified by index and the
        // session is dead; we never continue without a peer.
        let counterparties = self
            .counterparties
            .into_iter()
            .zip(&nonce_commitments)
            .map(|(counterparty, commitment)| counterparty.commit_nonce(*commitment))
            .collect::<Result<Vec<_>, _>>()?;

        // Make R = sum_i(R_i)
        let R = NonceCommitment::sum(&nonce_commitments);

        // Make c = H(X, R, m)
        // The message `m` has already been fed into the transcript.
        self.transcript
            .commit_point(b"X", self.multikey.aggregated_key().as_compressed());
        self.transcript.commit_point(b"R", &R.compress());
        let challenge = self.transcript.challenge_scalar(b"c");

        // Make a_i = H(<L>, X_i)
        let a_i = self.multikey.factor_for_key(&self.X_i);

        // Generate share: s_i = r_i + c * a_i * x_i
        let s_i = self.r_i.as_scalar() + challenge * a_i * self.x_i.as_scalar();

        // x_i and r_i are dropped (and wiped) with `self` here; only
        // public values cross into the next state.
        Ok((
            PartyAwaitingShares {
                multikey: self.multikey,
                challenge,
                R,
                counterparties,
            },
            Share(s_i),
        ))
    }
}

impl PartyAwaitingShares {
    /// Round three is complete: verify every share and assemble the
    /// aggregated signature.
    ///
    /// The resulting signature is identical across honest parties and
    /// verifies against the multikey's aggregated key.
    #[allow(non_snake_case)]
    pub fn receive_shares(self, shares: Vec<Share>) -> Result<Signature, SchnorrError> {
        if shares.len() != self.counterparties.len() {
            return Err(SchnorrError::Arity);
        }

        let PartyAwaitingShares {
            multikey,
            challenge,
            R,
            counterparties,
        } = self;

        // Check that all shares satisfy s_i * G = R_i + c * a_i * X_i.
        let s: Scalar = counterparties
            .into_iter()
            .zip(shares)
            .map(|(counterparty, share)| counterparty.sign(share, challenge, &multikey))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .sum();

        Ok(Signature { s, R: R.compress() })
    }

    /// Assemble the signature without verifying the individual shares.
    ///
    /// Intended for callers who have verified the shares out of band or
    /// trust every cosigner; a corrupt share yields a signature that
    /// fails verification without saying whose share was bad.
    #[allow(non_snake_case)]
    pub fn receive_trusted_shares(self, shares: Vec<Share>) -> Result<Signature, SchnorrError> {
        if shares.len() != self.counterparties.len() {
            return Err(SchnorrError::Arity);
        }

        // s = sum(s_i), s_i = r_i + c * a_i * x_i
        let s: Scalar = shares.into_iter().map(|share| share.0).sum();

        Ok(Signature {
            s,
            R: self.R.compress(),
        })
    }
}
