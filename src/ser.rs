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

//! Serde Support
//!
//! Every wire type in this crate has a fixed-length byte encoding, so serde
//! support is uniform: serialize the bytes, deserialize through the type's
//! own `from_bytes` so canonicality checks always run.

macro_rules! serde_boilerplate { ($t:ty) => {
    impl ::serde::Serialize for $t {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: ::serde::Serializer {
            serializer.serialize_bytes(&self.to_bytes()[..])
        }
    }

    impl<'d> ::serde::Deserialize<'d> for $t {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: ::serde::Deserializer<'d> {
            struct MyVisitor;

            impl<'d> ::serde::de::Visitor<'d> for MyVisitor {
                type Value = $t;

                fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    formatter.write_str(Self::Value::DESCRIPTION)
                }

                fn visit_bytes<E>(self, bytes: &[u8]) -> Result<$t, E> where E: ::serde::de::Error {
                    Self::Value::from_bytes(bytes).map_err(crate::errors::serde_error_from_schnorr_error)
                }
            }
            deserializer.deserialize_bytes(MyVisitor)
        }
    }
} } // macro_rules! serde_boilerplate

#[cfg(test)]
mod test {
    use crate::*;
    use rand::prelude::*;
    use rand_chacha::ChaChaRng;

    #[test]
    fn serialize_deserialize_signature() {
        let mut csprng = ChaChaRng::from_seed([0u8; 32]);
        let keypair = Keypair::generate(&mut csprng);
        let ctx = SigningContext::new(b"serde test");
        let sig = keypair.sign(ctx.bytes(b"flip the bits"));

        let encoded = bincode::serialize(&sig).unwrap();
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();

        assert_eq!(sig, decoded);
    }

    #[test]
    fn serialize_deserialize_keys() {
        let mut csprng = ChaChaRng::from_seed([1u8; 32]);
        let keypair = Keypair::generate(&mut csprng);

        let encoded = bincode::serialize(&keypair.public).unwrap();
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(keypair.public, decoded);

        let encoded = bincode::serialize(&keypair.secret).unwrap();
        let decoded: SecretKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(keypair.secret, decoded);
    }

    #[test]
    fn deserialize_rejects_bad_point() {
        // 32 bytes of 0xff is not a canonical Ristretto encoding.
        let bad = bincode::serialize(&vec![0xffu8; 32]).unwrap();
        assert!(bincode::deserialize::<PublicKey>(&bad).is_err());
    }
}
