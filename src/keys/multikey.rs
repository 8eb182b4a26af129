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

//! MuSig aggregated Public Keys

//
// Key Aggregation
//
//
// Input: ordered list of public keys that will be aggregated
//
// Operation:
//      a. Create a new transcript using the tag "MuSig.aggregated-key".
//
//      b. Commit all the pubkeys to the transcript.
//         The transcript state corresponds to the commitment `<L>` in
//         the MuSig paper: `<L> = H(X_1 || X_2 || ... || X_n)`.
//
//      c. Create `aggregated_key = sum_i ( a_i * X_i )`.
//         Iterate over the pubkeys, compute the factor `a_i = H(<L>, X_i)`,
//         and add `a_i * X_i` to the aggregated key.
//
// Output: a new Multikey, with the transcript and aggregated key detailed above.
//
// The factor a_i is bound to the entire ordered key list, so a cosigner
// choosing its key last cannot pick one that cancels the honest keys out
// of the sum. Reordering the list produces a different aggregated key.
//

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use merlin::Transcript;

use crate::errors::SchnorrError;
use crate::keys::PublicKey;
use crate::tools::TranscriptProtocol;

/// MuSig aggregated key, together with the transcript state that binds
/// the ordered list of component keys.
#[derive(Clone)]
pub struct Multikey {
    transcript: Transcript,
    aggregated_key: PublicKey,
}

impl Multikey {
    /// Constructs a new MuSig multikey aggregating the pubkeys.
    #[allow(non_snake_case)]
    pub fn new(pubkeys: Vec<PublicKey>) -> Result<Self, SchnorrError> {
        if pubkeys.is_empty() {
            return Err(SchnorrError::BadArguments);
        }

        // Create transcript for Multikey
        let mut transcript = Transcript::new(b"MuSig.aggregated-key");

        // Commit pubkeys into the transcript
        // <L> = H(X_1 || X_2 || ... || X_n)
        for X in &pubkeys {
            transcript.commit_point(b"X", X.as_compressed());
        }

        // aggregated_key = sum_i ( a_i * X_i )
        let mut aggregated_key = RistrettoPoint::identity();
        for X in &pubkeys {
            let a = Multikey::compute_factor(&transcript, X);
            aggregated_key = aggregated_key + a * X.as_point();
        }

        Ok(Multikey {
            transcript,
            aggregated_key: PublicKey::from_point(aggregated_key),
        })
    }

    /// a_i = H(<L>, X_i). The list of pubkeys, <L>, has already been
    /// committed to the transcript.
    #[allow(non_snake_case)]
    fn compute_factor(transcript: &Transcript, X_i: &PublicKey) -> Scalar {
        let mut a_i_transcript = transcript.clone();
        a_i_transcript.commit_point(b"X", X_i.as_compressed());
        a_i_transcript.challenge_scalar(b"a_i")
    }

    /// Returns the `a_i` factor for a component key of the aggregated key.
    ///
    /// The stored transcript is cloned for each query, so this never
    /// mutates the bound key-list state.
    #[allow(non_snake_case)]
    pub fn factor_for_key(&self, X_i: &PublicKey) -> Scalar {
        Multikey::compute_factor(&self.transcript, X_i)
    }

    /// Returns VerificationKey representation of the aggregated key.
    pub fn aggregated_key(&self) -> PublicKey {
        self.aggregated_key
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaChaRng;

    use crate::keys::Keypair;

    fn make_keys(n: usize, seed: u8) -> Vec<PublicKey> {
        let mut csprng = ChaChaRng::from_seed([seed; 32]);
        (0..n)
            .map(|_| Keypair::generate(&mut csprng).public)
            .collect()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(Multikey::new(vec![]).is_err());
    }

    #[test]
    fn factors_are_deterministic() {
        let pubkeys = make_keys(4, 10);
        let multikey = Multikey::new(pubkeys.clone()).unwrap();

        for key in &pubkeys {
            assert_eq!(multikey.factor_for_key(key), multikey.factor_for_key(key));
        }

        // A second aggregation over the same list agrees completely.
        let again = Multikey::new(pubkeys.clone()).unwrap();
        assert_eq!(multikey.aggregated_key(), again.aggregated_key());
        assert_eq!(
            multikey.factor_for_key(&pubkeys[0]),
            again.factor_for_key(&pubkeys[0])
        );
    }

    #[test]
    fn key_order_changes_the_aggregated_key() {
        let pubkeys = make_keys(3, 11);

        let mut swapped = pubkeys.clone();
        swapped.swap(0, 2);

        let multikey = Multikey::new(pubkeys).unwrap();
        let shuffled = Multikey::new(swapped).unwrap();

        assert_ne!(multikey.aggregated_key(), shuffled.aggregated_key());
    }

    #[test]
    fn single_key_still_gets_a_factor() {
        let pubkeys = make_keys(1, 12);
        let multikey = Multikey::new(pubkeys.clone()).unwrap();

        // The lone key is delinearized like any other list entry.
        assert_ne!(multikey.aggregated_key(), pubkeys[0]);
        assert_eq!(
            multikey.aggregated_key().as_point(),
            &(multikey.factor_for_key(&pubkeys[0]) * pubkeys[0].as_point())
        );
    }
}
