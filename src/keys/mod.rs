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

//! Keys to the kingdom

//! Schnorr signatures on the 2-torsion free subgroup of ed25519,
//! as provided by the Ristretto point compression.

mod public;
pub use public::{PublicKey, PUBLIC_KEY_LENGTH};

mod secret;
pub use secret::{SecretKey, SECRET_KEY_LENGTH};

mod pair;
pub use pair::{Keypair, KEYPAIR_LENGTH};

mod multikey;
pub use multikey::Multikey;

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_COMPRESSED;
    use curve25519_dalek::scalar::Scalar;

    #[test]
    fn base_point_key() {
        // The public key for the scalar 1 is the Ristretto basepoint,
        // compressed form e2f2ae0a 6abc4e71 a884a961 c500515f
        //                 58e30b6a a582dd8d b6a65945 e08d2d76.
        let sk = SecretKey::from_scalar(Scalar::one());
        let pk = PublicKey::from_secret(&sk);

        assert_eq!(pk.as_compressed(), &RISTRETTO_BASEPOINT_COMPRESSED);
        assert_eq!(
            pk.to_bytes()[..4],
            [0xe2, 0xf2, 0xae, 0x0a],
        );
    }
}
