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

//! Other signers in the MuSig Protocol
//!
//! A `Counterparty` is the local view of one cosigner (the local signer
//! appears in its own list). Each round's message moves the counterparty
//! into a new state, and each check failure names the cosigner's index
//! so the caller knows whom to blame before aborting the session.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::scalar::Scalar;
use subtle::ConstantTimeEq;

use crate::errors::SchnorrError;
use crate::keys::{Multikey, PublicKey};
use crate::musig::commitment::{NonceCommitment, NoncePrecommitment, Share};

/// A cosigner that has not yet sent anything.
pub(crate) struct Counterparty {
    position: usize,
    pubkey: PublicKey,
}

/// A cosigner bound to its round-one precommitment.
pub(crate) struct CounterpartyPrecommitted {
    precommitment: NoncePrecommitment,
    position: usize,
    pubkey: PublicKey,
}

/// A cosigner whose revealed nonce commitment matched its precommitment.
pub(crate) struct CounterpartyCommitted {
    commitment: NonceCommitment,
    position: usize,
    pubkey: PublicKey,
}

impl Counterparty {
    pub(crate) fn new(position: usize, pubkey: PublicKey) -> Self {
        Counterparty { position, pubkey }
    }

    pub(crate) fn precommit_nonce(
        self,
        precommitment: NoncePrecommitment,
    ) -> CounterpartyPrecommitted {
        CounterpartyPrecommitted {
            precommitment,
            position: self.position,
            pubkey: self.pubkey,
        }
    }
}

impl CounterpartyPrecommitted {
    /// Round two: the cosigner opens its commitment.
    ///
    /// Check H(commitment) =? precommitment. A mismatch means the
    /// cosigner equivocated, and the session must be abandoned.
    pub(crate) fn commit_nonce(
        self,
        commitment: NonceCommitment,
    ) -> Result<CounterpartyCommitted, SchnorrError> {
        let received_precommitment = commitment.precommit();
        let equal = self.precommitment.ct_eq(&received_precommitment);

        if equal.unwrap_u8() == 0 {
            return Err(SchnorrError::ShareError {
                index: self.position,
            });
        }

        Ok(CounterpartyCommitted {
            commitment,
            position: self.position,
            pubkey: self.pubkey,
        })
    }
}

impl CounterpartyCommitted {
    /// Round three: check the partial Schnorr signature,
    /// `s_i * G == R_i + c * a_i * X_i`, and release the verified
    /// share scalar.
    #[allow(non_snake_case)]
    pub(crate) fn sign(
        self,
        share: Share,
        challenge: Scalar,
        multikey: &Multikey,
    ) -> Result<Scalar, SchnorrError> {
        let S_i = &share.0 * &RISTRETTO_BASEPOINT_TABLE;
        let a_i = multikey.factor_for_key(&self.pubkey);
        let X_i = self.pubkey.as_point();
        let expected = self.commitment.0 + (challenge * a_i) * X_i;

        let equal = S_i.compress().as_bytes().ct_eq(expected.compress().as_bytes());
        if equal.unwrap_u8() == 0 {
            return Err(SchnorrError::ShareError {
                index: self.position,
            });
        }

        Ok(share.0)
    }
}
